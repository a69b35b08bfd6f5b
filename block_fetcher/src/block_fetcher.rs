use anyhow::{Context as _, Result};
use beacon_api::{BeaconNode, BlockId, StateId};
use eth1_api::ExecutionNode;
use tracing::{debug, warn};
use types::{primitives::Slot, CanonicalBlock, ChainSpec};

use crate::{
    normalizer::normalize, Enrichment, Error, ExecutionEnricher, FetchOutcome,
    MissingBlockSynthesizer,
};

#[derive(Clone, Copy, Default, Debug)]
pub struct Config {
    pub chain_spec: ChainSpec,
    pub collect_rewards: bool,
}

/// Per-slot entry point for retrieving blocks.
///
/// Each fetch issues its requests sequentially and shares no mutable state with other fetches,
/// so a single `BlockFetcher` can serve many slots concurrently.
pub struct BlockFetcher<B, E> {
    config: Config,
    beacon_node: B,
    execution: ExecutionEnricher<E>,
}

impl<B: BeaconNode, E: ExecutionNode> BlockFetcher<B, E> {
    #[must_use]
    pub const fn new(config: Config, beacon_node: B, execution_node: Option<E>) -> Self {
        Self {
            config,
            beacon_node,
            execution: ExecutionEnricher::new(execution_node),
        }
    }

    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    pub async fn fetch_block(&self, slot: Slot) -> Result<CanonicalBlock> {
        self.fetch_block_with_outcome(slot)
            .await
            .map(|outcome| outcome.block)
    }

    /// Fetches the block at `slot`, synthesizing a placeholder if none was proposed.
    ///
    /// Only a failure to query the beacon node for the block itself is returned as an error.
    pub async fn fetch_block_with_outcome(&self, slot: Slot) -> Result<FetchOutcome> {
        let Some(block) = self
            .beacon_node
            .block(slot)
            .await
            .context(Error::SlotFetch { slot })?
        else {
            warn!("block at slot {slot} not found, treating slot as missed");
            return Ok(self.missing_block_synthesizer().synthesize(slot).await);
        };

        debug!("fetched {} block at slot {slot}", block.version);

        let mut outcome = FetchOutcome::new(normalize(&block).context(Error::SlotFetch { slot })?);

        self.enrich_execution_payload(&mut outcome).await;

        resolve_state_root(&self.beacon_node, &mut outcome).await;

        if self.config.collect_rewards {
            self.enrich_reward(&mut outcome).await;
        }

        Ok(outcome)
    }

    /// Fetches the first block of the finalized epoch as seen by the head state.
    pub async fn fetch_finalized_block(&self) -> Result<CanonicalBlock> {
        let checkpoints = self
            .beacon_node
            .finality_checkpoints(StateId::Head)
            .await
            .context(Error::FinalityUnavailable)?;

        let slot = self
            .config
            .chain_spec
            .compute_start_slot_at_epoch(checkpoints.finalized.epoch);

        debug!(
            "finalized epoch {} starts at slot {slot}",
            checkpoints.finalized.epoch,
        );

        self.fetch_block(slot).await
    }

    pub async fn fetch_head_block(&self) -> Result<CanonicalBlock> {
        let slot = self.current_head_slot().await?;
        self.fetch_block(slot).await
    }

    /// Callers are expected to treat errors from this as fatal.
    pub async fn current_head_slot(&self) -> Result<Slot> {
        self.beacon_node
            .block_header(BlockId::Head)
            .await
            .map(|header| header.slot)
            .context(Error::HeadUnavailable)
    }

    pub const fn missing_block_synthesizer(&self) -> MissingBlockSynthesizer<'_, B> {
        MissingBlockSynthesizer::new(&self.beacon_node, self.config.chain_spec)
    }

    async fn enrich_execution_payload(&self, outcome: &mut FetchOutcome) {
        let block_hash = outcome.block.execution_payload.block_hash;

        match self.execution.block_by_hash(block_hash).await {
            Ok(Some(execution_block)) => {
                outcome.block.execution_payload.payload_size = execution_block.size;
            }
            Ok(None) => {}
            Err(error) => {
                warn!(
                    "failed to fetch execution block for slot {}: {error:?}",
                    outcome.block.slot,
                );

                outcome.absorb(Enrichment::ExecutionBlock, error);
            }
        }
    }

    async fn enrich_reward(&self, outcome: &mut FetchOutcome) {
        let slot = outcome.block.slot;

        match self.beacon_node.block_reward(slot).await {
            Ok(reward) => outcome.block.reward = Some(reward),
            Err(error) => {
                warn!("failed to fetch block reward for slot {slot}: {error:?}");
                outcome.absorb(Enrichment::BlockReward, error);
            }
        }
    }
}

pub(crate) async fn resolve_state_root(beacon_node: &impl BeaconNode, outcome: &mut FetchOutcome) {
    let slot = outcome.block.slot;

    match beacon_node.state_root(slot).await {
        Ok(state_root) => outcome.block.state_root = state_root,
        Err(error) => {
            warn!("failed to fetch state root for slot {slot}: {error:?}");
            outcome.absorb(Enrichment::StateRoot, error);
        }
    }
}
