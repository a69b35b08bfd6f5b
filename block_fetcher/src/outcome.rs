use anyhow::Error as AnyhowError;
use derive_more::Display;
use types::CanonicalBlock;

/// Auxiliary lookups whose failure does not prevent producing a [`CanonicalBlock`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum Enrichment {
    #[display("proposer duties")]
    ProposerDuties,
    #[display("execution block")]
    ExecutionBlock,
    #[display("state root")]
    StateRoot,
    #[display("block reward")]
    BlockReward,
}

#[derive(Debug)]
pub struct SoftFailure {
    pub enrichment: Enrichment,
    pub error: AnyhowError,
}

/// A fetched block along with the enrichment failures that were absorbed while building it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub block: CanonicalBlock,
    pub soft_failures: Vec<SoftFailure>,
}

impl FetchOutcome {
    #[must_use]
    pub const fn new(block: CanonicalBlock) -> Self {
        Self {
            block,
            soft_failures: vec![],
        }
    }

    #[must_use]
    pub fn failed_enrichments(&self) -> Vec<Enrichment> {
        self.soft_failures
            .iter()
            .map(|failure| failure.enrichment)
            .collect()
    }

    pub(crate) fn absorb(&mut self, enrichment: Enrichment, error: AnyhowError) {
        self.soft_failures.push(SoftFailure { enrichment, error });
    }
}
