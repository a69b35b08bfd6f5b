use anyhow::{bail, Context as _, Result};
use eth1_api::{ExecutionBlock, ExecutionNode};
use types::primitives::ExecutionBlockHash;

use crate::Error;

/// Looks up execution blocks referenced by beacon blocks.
///
/// The execution client is optional. Chain history before the merge has no execution layer.
pub struct ExecutionEnricher<E> {
    client: Option<E>,
}

impl<E: ExecutionNode> ExecutionEnricher<E> {
    #[must_use]
    pub const fn new(client: Option<E>) -> Self {
        Self { client }
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    /// Returns `Ok(None)` for the zero hash carried by blocks without an execution payload.
    pub async fn block_by_hash(
        &self,
        block_hash: ExecutionBlockHash,
    ) -> Result<Option<ExecutionBlock>> {
        let Some(client) = self.client.as_ref() else {
            bail!(Error::ExecutionClientNotInitialized);
        };

        if block_hash.is_zero() {
            return Ok(None);
        }

        match client
            .block_by_hash(block_hash)
            .await
            .context(Error::ExecutionLookup { block_hash })?
        {
            Some(block) => Ok(Some(block)),
            None => bail!(Error::ExecutionBlockNotFound { block_hash }),
        }
    }
}
