use core::future::Future;
use std::{
    io::{self, Write as _},
    process::ExitCode,
};

use analyzer_version::version_with_platform;
use anyhow::Result;
use beacon_api::BeaconApi;
use block_fetcher::BlockFetcher;
use clap::{Error as ClapError, Parser as _};
use eth1_api::Eth1Api;
use reqwest::ClientBuilder;
use tokio::runtime::Builder;
use tracing::{error, info, level_filters::LevelFilter};
use types::CanonicalBlock;

use crate::{analyzer_args::AnalyzerArgs, analyzer_config::AnalyzerConfig};

mod analyzer_args;
mod analyzer_config;
mod commands;
mod download;

fn main() -> ExitCode {
    if let Err(error) = try_main() {
        error.downcast_ref().map(ClapError::exit);
        error!("{error:?}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    let tracing_handle = binary_utils::initialize_tracing_logger(
        module_path!(),
        LevelFilter::INFO,
        cfg!(feature = "logger-always-write-style"),
    )?;

    let args = AnalyzerArgs::try_parse()?;

    tracing_handle.set_level(module_path!(), args.log_level())?;

    let mut config = args.try_into_config().map_err(AnalyzerArgs::clap_error)?;

    if let Some(command) = config.command.take() {
        let output = commands::run(command, config.worker_num)?;
        writeln!(io::stdout().lock(), "{output}")?;
        return Ok(());
    }

    info!("starting {}", version_with_platform());
    config.report();

    block_on(run(config))
}

async fn run(config: AnalyzerConfig) -> Result<()> {
    let AnalyzerConfig {
        chain_spec,
        beacon_node_url,
        execution_node_url,
        download_mode,
        worker_num,
        collect_rewards,
        request_timeout,
        ..
    } = config;

    let client = ClientBuilder::new()
        .user_agent(version_with_platform())
        .build()?;

    let beacon_node = BeaconApi::new(client.clone(), beacon_node_url, request_timeout);

    let execution_node =
        execution_node_url.map(|url| Eth1Api::new(client, url, request_timeout));

    let fetcher = BlockFetcher::new(
        block_fetcher::Config {
            chain_spec,
            collect_rewards,
        },
        beacon_node,
        execution_node,
    );

    download::run(&fetcher, download_mode, worker_num, report_block).await
}

fn report_block(block: CanonicalBlock) {
    let CanonicalBlock {
        slot,
        proposed,
        proposer_index,
        attestations,
        deposits,
        voluntary_exits,
        execution_payload,
        json_size,
        reward,
        ..
    } = &block;

    info!(
        slot,
        proposed,
        proposer_index,
        attestations = attestations.len(),
        deposits = deposits.len(),
        voluntary_exits = voluntary_exits.len(),
        transactions = execution_payload.transactions.len(),
        payload_size = execution_payload.payload_size,
        json_size,
        reward = reward.as_ref().map(|reward| reward.total),
        "block processed"
    );
}

fn block_on(future: impl Future<Output = Result<()>>) -> Result<()> {
    Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(future)
}
