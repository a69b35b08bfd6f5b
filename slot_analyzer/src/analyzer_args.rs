use core::{fmt::Display, time::Duration};

use analyzer_version::{APPLICATION_NAME, APPLICATION_VERSION};
use anyhow::{bail, ensure, Result};
use clap::{error::ErrorKind, CommandFactory as _, Error as ClapError, Parser, ValueEnum};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use types::{primitives::Slot, redacting_url::RedactingUrl, ChainSpec, Network};

use crate::{
    analyzer_config::{AnalyzerConfig, DownloadMode},
    commands::AnalyzerCommand,
};

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_WORKER_NUM: usize = 4;

/// Retrieves beacon chain blocks slot by slot and normalizes them,
/// reconstructing slots in which no block was proposed.
#[derive(Parser)]
#[clap(display_name = APPLICATION_NAME, verbatim_doc_comment, version = APPLICATION_VERSION)]
pub struct AnalyzerArgs {
    /// Log level of analyzer crates (overridden by directives in ANALYZER_LOG)
    #[clap(long, env = "LOG_LEVEL", default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// Network the beacon node is connected to
    #[clap(long, env = "NETWORK", default_value_t = Network::default())]
    network: Network,

    /// First slot to download in historical mode (inclusive)
    #[clap(long, env = "INIT_SLOT", value_name = "SLOT")]
    init_slot: Option<Slot>,

    /// Last slot to download in historical mode (inclusive)
    #[clap(long, env = "FINAL_SLOT", value_name = "SLOT")]
    final_slot: Option<Slot>,

    /// Beacon node API endpoint
    #[clap(long, env = "BN_ENDPOINT", value_name = "URL", default_value = "http://localhost:5052")]
    bn_endpoint: RedactingUrl,

    /// Execution node JSON-RPC endpoint
    #[clap(long, env = "EL_ENDPOINT", value_name = "URL")]
    el_endpoint: Option<RedactingUrl>,

    /// Which slots to download
    #[clap(long, env = "DOWNLOAD_MODE", value_enum, default_value_t = DownloadModeOption::Historical)]
    download_mode: DownloadModeOption,

    /// Number of slots fetched concurrently and number of validator batches
    #[clap(long, env = "WORKER_NUM", default_value_t = DEFAULT_WORKER_NUM)]
    worker_num: usize,

    /// Data to collect for each block
    #[clap(long, env = "METRICS", value_enum, value_delimiter = ',', default_value = "block")]
    metrics: Vec<Metric>,

    /// Timeout for requests to beacon and execution nodes in seconds
    #[clap(long, env = "REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECONDS)]
    request_timeout: u64,

    #[clap(subcommand)]
    command: Option<AnalyzerCommand>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum DownloadModeOption {
    /// Download a fixed slot range
    Historical,
    /// Download the first slot of the latest finalized epoch
    Finalized,
    /// Follow the chain head
    Head,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum Metric {
    /// Normalized block contents
    Block,
    /// Proposer rewards of each block
    Rewards,
}

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
enum Error {
    #[error("--worker-num must be greater than 0")]
    ZeroWorkers,
    #[error("--init-slot and --final-slot must be specified in historical download mode")]
    MissingSlotRange,
    #[error("--init-slot ({init_slot}) must not be greater than --final-slot ({final_slot})")]
    InvertedSlotRange { init_slot: Slot, final_slot: Slot },
}

impl AnalyzerArgs {
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn try_into_config(self) -> Result<AnalyzerConfig> {
        let Self {
            log_level,
            network,
            init_slot,
            final_slot,
            bn_endpoint,
            el_endpoint,
            download_mode,
            worker_num,
            metrics,
            request_timeout,
            command,
        } = self;

        ensure!(worker_num > 0, Error::ZeroWorkers);

        // Subcommands do not download blocks.
        let download_mode = match download_mode {
            DownloadModeOption::Historical if command.is_none() => {
                let (Some(init_slot), Some(final_slot)) = (init_slot, final_slot) else {
                    bail!(Error::MissingSlotRange);
                };

                ensure!(
                    init_slot <= final_slot,
                    Error::InvertedSlotRange {
                        init_slot,
                        final_slot,
                    },
                );

                DownloadMode::Historical {
                    init_slot,
                    final_slot,
                }
            }
            DownloadModeOption::Historical => DownloadMode::Historical {
                init_slot: init_slot.unwrap_or_default(),
                final_slot: final_slot.unwrap_or_default(),
            },
            DownloadModeOption::Finalized => DownloadMode::Finalized,
            DownloadModeOption::Head => DownloadMode::Head,
        };

        Ok(AnalyzerConfig {
            log_level,
            network,
            chain_spec: ChainSpec::from(network),
            beacon_node_url: bn_endpoint,
            execution_node_url: el_endpoint,
            download_mode,
            worker_num,
            collect_rewards: metrics.contains(&Metric::Rewards),
            request_timeout: Duration::from_secs(request_timeout),
            command,
        })
    }

    #[must_use]
    pub fn clap_error(message: impl Display) -> ClapError {
        Self::command().error(ErrorKind::ValueValidation, message)
    }
}
