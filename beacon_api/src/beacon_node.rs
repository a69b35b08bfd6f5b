use anyhow::Result;
use async_trait::async_trait;
use types::{
    containers::{
        BeaconBlockHeader, BlockReward, FinalityCheckpoints, ProposerDuty,
        VersionedSignedBeaconBlock,
    },
    primitives::{Epoch, Slot, H256},
};

use crate::{BlockId, StateId};

/// Queries a block fetch needs from a consensus-layer node.
///
/// Implementations must be safe to share between concurrently running fetches.
#[async_trait]
pub trait BeaconNode: Send + Sync {
    /// Returns `Ok(None)` if the node has no block at `slot`.
    /// Transport and protocol failures are returned as errors.
    async fn block(&self, slot: Slot) -> Result<Option<VersionedSignedBeaconBlock>>;

    async fn proposer_duties(&self, epoch: Epoch) -> Result<Vec<ProposerDuty>>;

    async fn finality_checkpoints(&self, state_id: StateId) -> Result<FinalityCheckpoints>;

    async fn block_header(&self, block_id: BlockId) -> Result<BeaconBlockHeader>;

    async fn state_root(&self, slot: Slot) -> Result<H256>;

    async fn block_reward(&self, slot: Slot) -> Result<BlockReward>;
}
