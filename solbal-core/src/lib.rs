//! solbal core - wallet balance reporting for Anchor workspaces
//!
//! This crate follows a hexagonal architecture:
//!
//! - **domain**: Core types (Lamports, ProgramHandle, etc.) plus the solana-sdk types they use
//! - **ports**: Trait definitions for external dependencies (RpcConnection, ProgramRegistry)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (JSON-RPC over HTTP, Anchor workspace files)

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::anchor_workspace::AnchorWorkspace;
use config::ProviderConfig;
use ports::ProgramRegistry;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{Cluster, CommitmentConfig, Keypair, Lamports, ProgramHandle, Pubkey, LAMPORTS_PER_SOL};
pub use services::{LogEntry, LogEvent, LoggingService};

/// Main context for solbal operations
///
/// Holds the configured provider, the workspace registry and the services
/// built on them.
pub struct SolbalContext {
    pub config: ProviderConfig,
    pub provider: Arc<Provider>,
    pub workspace: Arc<AnchorWorkspace>,
    pub balance_service: BalanceService,
    pub program_service: ProgramService,
}

impl SolbalContext {
    /// Configure the provider, then open the workspace found from `workspace_dir`
    pub fn new(config: ProviderConfig, workspace_dir: &Path) -> Result<Self> {
        let provider = Arc::new(Provider::from_config(&config)?);
        let workspace = Arc::new(AnchorWorkspace::discover(workspace_dir)?);
        let registry: Arc<dyn ProgramRegistry> = workspace.clone();

        let balance_service = BalanceService::new(Arc::clone(&provider), Arc::clone(&registry));
        let program_service = ProgramService::new(registry);

        Ok(Self {
            config,
            provider,
            workspace,
            balance_service,
            program_service,
        })
    }
}
