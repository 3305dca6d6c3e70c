//! Configuration management
//!
//! The provider is configured from the same environment variables Anchor's
//! tooling exports for client scripts:
//!
//! - `ANCHOR_PROVIDER_URL`: cluster RPC URL or moniker (required)
//! - `ANCHOR_WALLET`: path to the wallet keypair file (required)
//! - `ANCHOR_COMMITMENT`: commitment for reads (optional, default `processed`)
//!
//! `SOLBAL_DIR` selects the application directory (default `~/.solbal`).

use std::path::PathBuf;

use crate::domain::result::{Error, Result};
use crate::domain::{parse_commitment, Cluster, CommitmentConfig};

pub const PROVIDER_URL_ENV: &str = "ANCHOR_PROVIDER_URL";
pub const WALLET_ENV: &str = "ANCHOR_WALLET";
pub const COMMITMENT_ENV: &str = "ANCHOR_COMMITMENT";
pub const APP_DIR_ENV: &str = "SOLBAL_DIR";

/// Connection and identity settings for a `Provider`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub cluster: Cluster,
    pub wallet_path: PathBuf,
    pub commitment: CommitmentConfig,
}

impl ProviderConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = get(PROVIDER_URL_ENV)
            .ok_or_else(|| Error::config(format!("{} is not defined", PROVIDER_URL_ENV)))?;
        let cluster: Cluster = url.parse()?;

        let wallet = get(WALLET_ENV).ok_or_else(|| {
            Error::config(format!("expected environment variable `{}` is not set", WALLET_ENV))
        })?;

        let commitment = match get(COMMITMENT_ENV) {
            Some(value) => parse_commitment(&value)?,
            None => CommitmentConfig::processed(),
        };

        Ok(Self {
            cluster,
            wallet_path: expand_home(wallet.trim()),
            commitment,
        })
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Application directory from `SOLBAL_DIR`, else `~/.solbal`
pub fn app_dir() -> PathBuf {
    match std::env::var(APP_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .map(|home| home.join(".solbal"))
            .unwrap_or_else(|| PathBuf::from(".solbal")),
    }
}
