use core::time::Duration;

use tracing::{info, level_filters::LevelFilter};
use types::{primitives::Slot, redacting_url::RedactingUrl, ChainSpec, Network};

use crate::commands::AnalyzerCommand;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DownloadMode {
    /// Fetch every slot in `init_slot..=final_slot`.
    Historical { init_slot: Slot, final_slot: Slot },
    /// Fetch the first slot of the latest finalized epoch.
    Finalized,
    /// Follow the chain head until interrupted.
    Head,
}

#[cfg_attr(test, derive(Debug))]
pub struct AnalyzerConfig {
    pub log_level: LevelFilter,
    pub network: Network,
    pub chain_spec: ChainSpec,
    pub beacon_node_url: RedactingUrl,
    pub execution_node_url: Option<RedactingUrl>,
    pub download_mode: DownloadMode,
    pub worker_num: usize,
    pub collect_rewards: bool,
    pub request_timeout: Duration,
    pub command: Option<AnalyzerCommand>,
}

impl AnalyzerConfig {
    pub fn report(&self) {
        let Self {
            log_level,
            network,
            beacon_node_url,
            execution_node_url,
            download_mode,
            worker_num,
            collect_rewards,
            request_timeout,
            ..
        } = self;

        info!("log level: {log_level}");
        info!("network: {network}");
        info!("beacon node endpoint: {beacon_node_url}");

        match execution_node_url {
            Some(url) => info!("execution node endpoint: {url}"),
            None => info!("execution node endpoint: none (payload sizes will not be collected)"),
        }

        info!("download mode: {download_mode:?}");
        info!("workers: {worker_num}");
        info!("collect rewards: {collect_rewards}");
        info!("request timeout: {request_timeout:?}");
    }
}
