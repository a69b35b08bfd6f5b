pub use crate::{
    canonical_block::{CanonicalBlock, ExecutionPayloadSummary, SyncAggregateSummary},
    chain_spec::{ChainSpec, Network},
};

pub mod containers;
pub mod primitives;
pub mod redacting_url;
pub mod serde_utils;

mod canonical_block;
mod chain_spec;
