use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tracing::info;
use validator_pools::PoolKeys;

#[derive(Clone, Subcommand)]
#[cfg_attr(test, derive(PartialEq, Eq, Debug))]
pub enum AnalyzerCommand {
    /// Group validators by pool and collect validators outside any pool into "others"
    /// (example: slot_analyzer pools --pool-file pools.csv --validator-count 1000000)
    Pools {
        /// CSV file with val_idx,pubkey,custom_pool lines
        #[clap(long, value_name = "CSV_FILE")]
        pool_file: PathBuf,

        /// Total number of validators on the chain
        #[clap(long)]
        validator_count: u64,
    },

    /// Split validator indices into one batch per worker
    /// (example: slot_analyzer --worker-num 8 batch --validator-indices-file indices.json)
    Batch {
        /// JSON file containing an array of validator indices
        #[clap(long, value_name = "JSON_FILE")]
        validator_indices_file: PathBuf,
    },
}

#[derive(Serialize)]
struct PoolsReport {
    pools: Vec<PoolKeys>,
}

#[derive(Serialize)]
struct BatchReport {
    batches: Vec<PoolKeys>,
}

pub fn run(command: AnalyzerCommand, worker_num: usize) -> Result<String> {
    match command {
        AnalyzerCommand::Pools {
            pool_file,
            validator_count,
        } => {
            let pools = pools(&pool_file, validator_count)?;
            serde_json::to_string_pretty(&PoolsReport { pools }).map_err(Into::into)
        }
        AnalyzerCommand::Batch {
            validator_indices_file,
        } => {
            let validator_indices = validator_pools::read_validator_indices(validator_indices_file)?;
            let batches = validator_pools::batch(&validator_indices, worker_num)?;
            serde_json::to_string_pretty(&BatchReport { batches }).map_err(Into::into)
        }
    }
}

fn pools(pool_file: &Path, validator_count: u64) -> Result<Vec<PoolKeys>> {
    let mut pools = validator_pools::parse_pool_file(pool_file)?;

    let others = validator_pools::complement(
        validator_count,
        pools.iter().map(|pool| &pool.validator_indices),
    )?;

    info!("{} validators do not belong to any pool", others.len());

    validator_pools::attach_others(&mut pools, others);

    Ok(pools)
}
