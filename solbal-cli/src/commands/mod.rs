//! CLI command implementations

pub mod balance;
pub mod doctor;
pub mod logs;
pub mod program;

use std::path::PathBuf;

use anyhow::{Context, Result};
use solbal_core::config::{self, ProviderConfig, COMMITMENT_ENV, PROVIDER_URL_ENV, WALLET_ENV};
use solbal_core::{Cluster, LogEvent, LoggingService, SolbalContext};

use crate::ProviderArgs;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let app_dir = config::app_dir();
    std::fs::create_dir_all(&app_dir).ok()?;
    LoggingService::new(&app_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// `command_executed` event, tagged with the cluster name when one is set
pub fn command_event(command: &str, args: &ProviderArgs) -> LogEvent {
    let event = LogEvent::new("command_executed").with_command(command);
    match cluster_name(args) {
        Some(cluster) => event.with_cluster(cluster),
        None => event,
    }
}

/// Record a failed command as `<command>_failed`
pub fn log_failure(logger: &Option<LoggingService>, command: &str, error: &anyhow::Error) {
    let mut event = LogEvent::new(format!("{}_failed", command))
        .with_command(command)
        .with_error(error.to_string());
    if error.chain().count() > 1 {
        event = event.with_error_details(format!("{:#}", error));
    }
    log_event(logger, event);
}

fn cluster_name(args: &ProviderArgs) -> Option<String> {
    let url = args.provider_url.as_deref()?;
    url.parse::<Cluster>().ok().map(|c| c.name().to_string())
}

/// Value for a provider setting: the flag (or its env var) wins
pub fn lookup(args: &ProviderArgs, key: &str) -> Option<String> {
    match key {
        PROVIDER_URL_ENV => args.provider_url.clone(),
        WALLET_ENV => args.wallet.clone(),
        COMMITMENT_ENV => args.commitment.clone(),
        _ => None,
    }
}

pub fn provider_config(args: &ProviderArgs) -> Result<ProviderConfig> {
    Ok(ProviderConfig::from_lookup(|key| lookup(args, key))?)
}

/// Directory the workspace search starts from
pub fn workspace_dir(args: &ProviderArgs) -> Result<PathBuf> {
    match &args.workspace {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().context("Failed to read current directory"),
    }
}

/// Configure the provider and open the workspace
pub fn get_context(args: &ProviderArgs) -> Result<SolbalContext> {
    let config = provider_config(args)?;
    let dir = workspace_dir(args)?;
    Ok(SolbalContext::new(config, &dir)?)
}
