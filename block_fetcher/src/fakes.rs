use core::sync::atomic::{AtomicUsize, Ordering};
use std::collections::{HashMap, HashSet};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use beacon_api::{BeaconNode, BlockId, StateId};
use eth1_api::{ExecutionBlock, ExecutionNode};
use types::{
    containers::{
        BeaconBlockHeader, BlockReward, Checkpoint, ExecutionPayload, FinalityCheckpoints, Phase,
        ProposerDuty, VersionedSignedBeaconBlock,
    },
    primitives::{Epoch, ExecutionBlockHash, Slot, ValidatorIndex, H256},
};

pub fn block(
    slot: Slot,
    proposer_index: ValidatorIndex,
    block_hash: Option<ExecutionBlockHash>,
) -> VersionedSignedBeaconBlock {
    let mut block = VersionedSignedBeaconBlock::default();

    block.data.message.slot = slot;
    block.data.message.proposer_index = proposer_index;
    block.data.message.state_root = H256::repeat_byte(0xbb);

    if let Some(block_hash) = block_hash {
        block.version = Phase::Bellatrix;
        block.data.message.body.execution_payload = Some(ExecutionPayload {
            block_hash,
            ..ExecutionPayload::default()
        });
    }

    block
}

pub fn duty(slot: Slot, validator_index: ValidatorIndex) -> ProposerDuty {
    ProposerDuty {
        slot,
        validator_index,
        ..ProposerDuty::default()
    }
}

#[derive(Default)]
pub struct FakeBeaconNode {
    pub blocks: HashMap<Slot, VersionedSignedBeaconBlock>,
    pub unreachable_slots: HashSet<Slot>,
    pub duties: HashMap<Epoch, Vec<ProposerDuty>>,
    pub finalized_epoch: Option<Epoch>,
    pub head_slot: Option<Slot>,
    pub state_roots: HashMap<Slot, H256>,
    pub rewards: HashMap<Slot, BlockReward>,
    pub reward_requests: AtomicUsize,
}

#[async_trait]
impl BeaconNode for FakeBeaconNode {
    async fn block(&self, slot: Slot) -> Result<Option<VersionedSignedBeaconBlock>> {
        if self.unreachable_slots.contains(&slot) {
            return Err(anyhow!("connection refused"));
        }

        Ok(self.blocks.get(&slot).cloned())
    }

    async fn proposer_duties(&self, epoch: Epoch) -> Result<Vec<ProposerDuty>> {
        self.duties
            .get(&epoch)
            .cloned()
            .ok_or_else(|| anyhow!("no duties for epoch {epoch}"))
    }

    async fn finality_checkpoints(&self, _state_id: StateId) -> Result<FinalityCheckpoints> {
        let epoch = self
            .finalized_epoch
            .ok_or_else(|| anyhow!("finality checkpoints unavailable"))?;

        Ok(FinalityCheckpoints {
            finalized: Checkpoint {
                epoch,
                root: H256::zero(),
            },
            ..FinalityCheckpoints::default()
        })
    }

    async fn block_header(&self, _block_id: BlockId) -> Result<BeaconBlockHeader> {
        let slot = self.head_slot.ok_or_else(|| anyhow!("head unavailable"))?;

        Ok(BeaconBlockHeader {
            slot,
            ..BeaconBlockHeader::default()
        })
    }

    async fn state_root(&self, slot: Slot) -> Result<H256> {
        self.state_roots
            .get(&slot)
            .copied()
            .ok_or_else(|| anyhow!("no state root for slot {slot}"))
    }

    async fn block_reward(&self, slot: Slot) -> Result<BlockReward> {
        self.reward_requests.fetch_add(1, Ordering::SeqCst);

        self.rewards
            .get(&slot)
            .copied()
            .ok_or_else(|| anyhow!("no reward for slot {slot}"))
    }
}

#[derive(Default)]
pub struct FakeExecutionNode {
    pub blocks: HashMap<ExecutionBlockHash, ExecutionBlock>,
    pub unreachable: bool,
}

#[async_trait]
impl ExecutionNode for FakeExecutionNode {
    async fn block_by_hash(
        &self,
        block_hash: ExecutionBlockHash,
    ) -> Result<Option<ExecutionBlock>> {
        if self.unreachable {
            return Err(anyhow!("execution client unreachable"));
        }

        Ok(self.blocks.get(&block_hash).cloned())
    }
}

pub fn execution_block(block_hash: ExecutionBlockHash, size: u64) -> ExecutionBlock {
    ExecutionBlock {
        hash: block_hash,
        size,
        ..ExecutionBlock::default()
    }
}
