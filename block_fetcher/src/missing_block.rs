use beacon_api::BeaconNode;
use tracing::{debug, warn};
use types::{
    primitives::{Slot, H256},
    CanonicalBlock,
    ChainSpec,
};

use crate::{block_fetcher::resolve_state_root, Enrichment, FetchOutcome};

/// Builds placeholders for slots in which no block was proposed.
pub struct MissingBlockSynthesizer<'node, B> {
    beacon_node: &'node B,
    chain_spec: ChainSpec,
}

impl<'node, B: BeaconNode> MissingBlockSynthesizer<'node, B> {
    #[must_use]
    pub const fn new(beacon_node: &'node B, chain_spec: ChainSpec) -> Self {
        Self {
            beacon_node,
            chain_spec,
        }
    }

    /// Never fails. Lookups that fail are recorded in [`FetchOutcome::soft_failures`].
    pub async fn synthesize(&self, slot: Slot) -> FetchOutcome {
        let epoch = self.chain_spec.compute_epoch_at_slot(slot);

        let mut outcome = FetchOutcome::new(CanonicalBlock::missed(slot, None, H256::zero()));

        match self.beacon_node.proposer_duties(epoch).await {
            Ok(duties) => {
                outcome.block.proposer_index = duties
                    .iter()
                    .find(|duty| duty.slot == slot)
                    .map(|duty| duty.validator_index);

                if outcome.block.proposer_index.is_none() {
                    debug!("no proposer duty found for slot {slot} in epoch {epoch}");
                }
            }
            Err(error) => {
                warn!("failed to fetch proposer duties for epoch {epoch}: {error:?}");
                outcome.absorb(Enrichment::ProposerDuties, error);
            }
        }

        resolve_state_root(self.beacon_node, &mut outcome).await;

        outcome
    }

    pub async fn synthesize_missing_block(&self, slot: Slot) -> CanonicalBlock {
        self.synthesize(slot).await.block
    }
}
