//! solbal CLI - wallet address and balance for an Anchor workspace

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;
mod output;

use commands::{balance, doctor, logs, program};

/// Default workspace program
const DEFAULT_PROGRAM: &str = "zkarb";

/// solbal - print the provider wallet's address and SOL balance
#[derive(Parser)]
#[command(name = "solbal", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    provider: ProviderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Provider settings; each falls back to its environment variable
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// Cluster RPC URL or moniker (localnet, devnet, testnet, mainnet)
    #[arg(long, env = "ANCHOR_PROVIDER_URL", global = true)]
    pub provider_url: Option<String>,

    /// Path to the wallet keypair file
    #[arg(long, env = "ANCHOR_WALLET", global = true)]
    pub wallet: Option<String>,

    /// Commitment for reads (processed, confirmed, finalized)
    #[arg(long, env = "ANCHOR_COMMITMENT", global = true)]
    pub commitment: Option<String>,

    /// Directory to search (upwards) for Anchor.toml
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the wallet address and balance (default)
    Balance {
        /// Workspace program to resolve
        #[arg(long, default_value = DEFAULT_PROGRAM)]
        program: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect workspace programs
    Program {
        /// Program name
        #[arg(default_value = DEFAULT_PROGRAM)]
        name: String,
        /// List all programs in the workspace
        #[arg(long)]
        list: bool,
        /// Check that the program account is deployed and executable
        #[arg(long)]
        check_deployed: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check configuration, workspace and cluster connectivity
    Doctor {
        /// Workspace program to check
        #[arg(long, default_value = DEFAULT_PROGRAM)]
        program: String,
        /// Show check details
        #[arg(long, short)]
        verbose: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the local event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Balance { .. } => "balance",
            Commands::Program { .. } => "program",
            Commands::Doctor { .. } => "doctor",
            Commands::Logs { .. } => "logs",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Balance {
        program: DEFAULT_PROGRAM.to_string(),
        json: false,
    });
    let name = command.name();

    let logger = commands::get_logger();
    commands::log_event(&logger, commands::command_event(name, &cli.provider));

    match run(command, &cli.provider).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::log_failure(&logger, name, &e);
            output::error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, provider: &ProviderArgs) -> Result<()> {
    match command {
        Commands::Balance { program, json } => balance::run(provider, &program, json).await,
        Commands::Program { name, list, check_deployed, json } => {
            program::run(provider, &name, list, check_deployed, json).await
        }
        Commands::Doctor { program, verbose, json } => {
            doctor::run(provider, &program, verbose, json).await
        }
        Commands::Logs { command } => logs::run(command),
    }
}
