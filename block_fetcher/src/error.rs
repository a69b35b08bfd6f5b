use thiserror::Error;
use types::primitives::{ExecutionBlockHash, Slot};

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum Error {
    #[error("failed to fetch block at slot {slot}")]
    SlotFetch { slot: Slot },
    #[error("unable to determine current head slot")]
    HeadUnavailable,
    #[error("unable to determine finalized checkpoint")]
    FinalityUnavailable,
    #[error("execution client not initialized")]
    ExecutionClientNotInitialized,
    #[error("execution block lookup failed for hash {block_hash:?}")]
    ExecutionLookup { block_hash: ExecutionBlockHash },
    #[error("execution client does not know block {block_hash:?}")]
    ExecutionBlockNotFound { block_hash: ExecutionBlockHash },
}
