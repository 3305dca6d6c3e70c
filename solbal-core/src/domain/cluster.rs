//! Cluster selection and read commitment

use std::fmt;
use std::str::FromStr;

use url::Url;

use super::result::{Error, Result};
use super::CommitmentConfig;

const LOCALNET_URL: &str = "http://127.0.0.1:8899";
const DEVNET_URL: &str = "https://api.devnet.solana.com";
const TESTNET_URL: &str = "https://api.testnet.solana.com";
const MAINNET_URL: &str = "https://api.mainnet-beta.solana.com";

/// A Solana cluster, either a well-known one or a custom RPC endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cluster {
    Localnet,
    Devnet,
    Testnet,
    Mainnet,
    Custom(String),
}

impl Cluster {
    /// JSON-RPC endpoint for this cluster
    pub fn url(&self) -> &str {
        match self {
            Cluster::Localnet => LOCALNET_URL,
            Cluster::Devnet => DEVNET_URL,
            Cluster::Testnet => TESTNET_URL,
            Cluster::Mainnet => MAINNET_URL,
            Cluster::Custom(url) => url,
        }
    }

    /// Short name, as used for `[programs.<name>]` in Anchor.toml
    pub fn name(&self) -> &str {
        match self {
            Cluster::Localnet => "localnet",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::Mainnet => "mainnet",
            Cluster::Custom(_) => "custom",
        }
    }

    fn from_moniker(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "localnet" | "localhost" | "l" => Some(Cluster::Localnet),
            "devnet" | "d" => Some(Cluster::Devnet),
            "testnet" | "t" => Some(Cluster::Testnet),
            "mainnet" | "mainnet-beta" | "m" => Some(Cluster::Mainnet),
            _ => None,
        }
    }

    fn from_url(url: &Url) -> Self {
        let text = url.as_str().trim_end_matches('/');
        for known in [Cluster::Localnet, Cluster::Devnet, Cluster::Testnet, Cluster::Mainnet] {
            if known.url() == text {
                return known;
            }
        }
        if text == "http://localhost:8899" {
            return Cluster::Localnet;
        }
        Cluster::Custom(text.to_string())
    }
}

impl FromStr for Cluster {
    type Err = Error;

    /// Accepts a moniker (`localnet`, `devnet`, `testnet`, `mainnet`) or an http(s) URL
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(cluster) = Cluster::from_moniker(s) {
            return Ok(cluster);
        }

        let url = Url::parse(s)
            .map_err(|e| Error::config(format!("invalid cluster URL '{}': {}", s, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(Cluster::from_url(&url)),
            other => Err(Error::config(format!(
                "cluster URL must use http or https, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cluster::Custom(url) => f.write_str(url),
            named => f.write_str(named.name()),
        }
    }
}

/// Parse a commitment level for reads (`processed`, `confirmed`, `finalized`)
pub fn parse_commitment(value: &str) -> Result<CommitmentConfig> {
    match value.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(Error::config(format!(
            "unknown commitment '{}' (expected processed, confirmed or finalized)",
            other
        ))),
    }
}
