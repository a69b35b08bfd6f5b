use std::io::{self, IsTerminal as _};

use anyhow::Result;
use chrono::{Local, SecondsFormat};
use tracing::debug;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::Writer, time::FormatTime},
    prelude::*,
    reload::{self, Handle},
    EnvFilter,
    Registry,
};

const LOG_ENV_VARIABLE: &str = "ANALYZER_LOG";

const LIBRARY_CRATES: &[&str] = &[
    "beacon_api",
    "binary_utils",
    "block_fetcher",
    "eth1_api",
    "validator_pools",
];

#[derive(Clone, Debug)]
pub struct TracingHandle {
    log_handle: Handle<EnvFilter, Registry>,
}

impl TracingHandle {
    pub fn modify_log<F>(&self, f: F) -> Result<(), reload::Error>
    where
        F: FnOnce(&mut EnvFilter),
    {
        self.log_handle.modify(f)
    }

    /// Replaces the active filter with one built for `level`. `ANALYZER_LOG` still applies.
    pub fn set_level(&self, module_path: &str, level: LevelFilter) -> Result<()> {
        let filter = filter_with_env_directives(module_path, level)?;
        self.modify_log(|current| *current = filter)?;
        Ok(())
    }
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        write!(
            w,
            "[{}]",
            Local::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

/// Installs the global subscriber. Directives in `ANALYZER_LOG` take precedence over `level`.
pub fn initialize_tracing_logger(
    module_path: &str,
    level: LevelFilter,
    always_write_style: bool,
) -> Result<TracingHandle> {
    let filter = filter_with_env_directives(module_path, level)?;
    let (filter_layer, log_handle) = reload::Layer::new(filter);
    let enable_ansi = always_write_style || io::stdout().is_terminal();

    let stdout_layer = fmt::layer::<Registry>()
        .compact()
        .with_thread_ids(false)
        .with_target(true)
        .with_file(false)
        .with_line_number(true)
        .with_timer(LocalTimer)
        .with_ansi(enable_ansi)
        .with_filter(filter_layer);

    tracing_subscriber::registry().with(stdout_layer).try_init()?;

    debug!("tracing started");

    Ok(TracingHandle { log_handle })
}

fn filter_with_env_directives(module_path: &str, level: LevelFilter) -> Result<EnvFilter> {
    let mut filter = log_filter(module_path, level)?;

    if let Ok(env_filter) = EnvFilter::try_from_env(LOG_ENV_VARIABLE) {
        for directive in env_filter.to_string().split(',') {
            filter = filter.add_directive(directive.parse()?);
        }
    }

    Ok(filter)
}

fn log_filter(module_path: &str, level: LevelFilter) -> Result<EnvFilter> {
    let mut filter = EnvFilter::default().add_directive(LevelFilter::OFF.into());

    for target in LIBRARY_CRATES.iter().copied().chain([module_path]) {
        filter = filter.add_directive(format!("{target}={level}").parse()?);
    }

    Ok(filter)
}
