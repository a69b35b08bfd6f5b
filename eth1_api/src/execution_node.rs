use anyhow::Result;
use async_trait::async_trait;
use types::primitives::ExecutionBlockHash;

use crate::ExecutionBlock;

#[async_trait]
pub trait ExecutionNode: Send + Sync {
    /// Returns `Ok(None)` if the execution client does not know a block with `block_hash`.
    async fn block_by_hash(
        &self,
        block_hash: ExecutionBlockHash,
    ) -> Result<Option<ExecutionBlock>>;
}
