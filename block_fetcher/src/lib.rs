pub use crate::{
    block_fetcher::{BlockFetcher, Config},
    error::Error,
    execution_enricher::ExecutionEnricher,
    missing_block::MissingBlockSynthesizer,
    normalizer::normalize,
    outcome::{Enrichment, FetchOutcome, SoftFailure},
};

mod block_fetcher;
mod error;
mod execution_enricher;
mod missing_block;
mod normalizer;
mod outcome;

#[cfg(test)]
mod fakes;
