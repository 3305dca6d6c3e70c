//! Anchor workspace registry
//!
//! Resolves programs the way Anchor's client workspace does: find
//! `Anchor.toml` in the start directory or one of its ancestors, read the
//! `[programs.<cluster>]` table for the configured provider cluster, and pair
//! each program with its IDL from `target/idl/<name>.json`. A program whose
//! IDL has not been built does not resolve.
//!
//! ```toml
//! [provider]
//! cluster = "localnet"
//! wallet = "~/.config/solana/id.json"
//!
//! [programs.localnet]
//! zkarb = "GSJ1Uj1xh4LMEWAssmpni4i4HaXj7GLHM54BBcC9VTRK"
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::result::{Error, Result};
use crate::domain::{Idl, ProgramHandle, Pubkey};
use crate::ports::ProgramRegistry;

/// Workspace manifest file name
pub const MANIFEST_FILE: &str = "Anchor.toml";

const DEFAULT_CLUSTER: &str = "localnet";

#[derive(Debug, Default, Deserialize)]
struct AnchorManifest {
    #[serde(default)]
    provider: Option<ProviderSection>,
    /// cluster name -> program name -> entry
    #[serde(default)]
    programs: BTreeMap<String, BTreeMap<String, ProgramEntry>>,
}

#[derive(Debug, Deserialize)]
struct ProviderSection {
    #[serde(default)]
    cluster: Option<String>,
    #[serde(default)]
    wallet: Option<String>,
}

/// `name = "address"` or `name = { address = "...", idl = "path" }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProgramEntry {
    Address(String),
    Detailed {
        address: String,
        #[serde(default)]
        idl: Option<String>,
    },
}

impl ProgramEntry {
    fn address(&self) -> &str {
        match self {
            ProgramEntry::Address(address) => address,
            ProgramEntry::Detailed { address, .. } => address,
        }
    }

    fn idl_path(&self) -> Option<&str> {
        match self {
            ProgramEntry::Address(_) => None,
            ProgramEntry::Detailed { idl, .. } => idl.as_deref(),
        }
    }
}

/// Program registry backed by an Anchor workspace on disk
#[derive(Debug)]
pub struct AnchorWorkspace {
    root: PathBuf,
    manifest: AnchorManifest,
}

impl AnchorWorkspace {
    /// Find `Anchor.toml` in `start` or its nearest ancestor and open it
    pub fn discover(start: &Path) -> Result<Self> {
        let root = start
            .ancestors()
            .find(|dir| dir.join(MANIFEST_FILE).is_file())
            .ok_or_else(|| {
                Error::not_found(format!(
                    "{} not found in {} or any parent directory",
                    MANIFEST_FILE,
                    start.display()
                ))
            })?;
        Self::open(root)
    }

    /// Open the workspace rooted at `root`
    pub fn open(root: &Path) -> Result<Self> {
        let manifest_path = root.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&manifest_path)?;
        let manifest: AnchorManifest = toml::from_str(&content).map_err(|e| {
            Error::config(format!("invalid {}: {}", manifest_path.display(), e))
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            manifest,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Provider cluster from the manifest (defaults to localnet)
    pub fn cluster(&self) -> &str {
        self.manifest
            .provider
            .as_ref()
            .and_then(|p| p.cluster.as_deref())
            .unwrap_or(DEFAULT_CLUSTER)
    }

    /// Wallet path from the manifest, if set
    pub fn wallet(&self) -> Option<&str> {
        self.manifest.provider.as_ref().and_then(|p| p.wallet.as_deref())
    }

    fn idl_dir(&self) -> PathBuf {
        self.root.join("target").join("idl")
    }

    /// Programs declared for the provider cluster
    ///
    /// Anchor writes `[programs.localnet]` even when the provider cluster is
    /// spelled as a URL or alias, so fall back to the first matching alias.
    fn cluster_programs(&self) -> Option<&BTreeMap<String, ProgramEntry>> {
        let cluster = self.cluster().to_ascii_lowercase();
        let aliases: &[&str] = match cluster.as_str() {
            "localnet" | "localhost" | "l" | "http://127.0.0.1:8899" | "http://localhost:8899" => {
                &["localnet", "localhost"]
            }
            "mainnet" | "mainnet-beta" | "m" => &["mainnet", "mainnet-beta"],
            "devnet" | "d" => &["devnet"],
            "testnet" | "t" => &["testnet"],
            _ => &[],
        };

        self.manifest.programs.get(&cluster).or_else(|| {
            aliases
                .iter()
                .find_map(|alias| self.manifest.programs.get(*alias))
        })
    }

    /// IDL file stems present in target/idl
    fn idl_stems(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.idl_dir()) else {
            return Vec::new();
        };

        entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect()
    }

    fn read_idl(&self, path: &Path) -> Result<Idl> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("invalid IDL {}: {}", path.display(), e)))
    }
}

/// Program names compare case-insensitively, ignoring `_` and `-`
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl ProgramRegistry for AnchorWorkspace {
    fn resolve(&self, name: &str) -> Result<ProgramHandle> {
        let wanted = normalize_name(name);

        let entry = self
            .cluster_programs()
            .and_then(|programs| programs.iter().find(|(k, _)| normalize_name(k) == wanted));

        let declared = entry
            .and_then(|(_, e)| e.idl_path())
            .map(|path| self.root.join(path));
        let idl_path = match &declared {
            Some(path) => Some(path.clone()),
            None => self
                .idl_stems()
                .into_iter()
                .find(|stem| normalize_name(stem) == wanted)
                .map(|stem| self.idl_dir().join(format!("{}.json", stem))),
        };

        // Anchor's workspace refuses programs whose IDL was never built
        let idl = match idl_path.filter(|p| p.is_file()) {
            Some(path) => self.read_idl(&path)?,
            None if entry.is_none() => {
                return Err(Error::not_found(format!(
                    "program '{}' not found in workspace",
                    name
                )))
            }
            None => {
                return Err(Error::not_found(format!(
                    "IDL for program '{}' not found in {}",
                    name,
                    declared.unwrap_or_else(|| self.idl_dir()).display()
                )))
            }
        };

        let address = entry
            .map(|(_, e)| e.address().to_string())
            .or_else(|| idl.declared_address().map(str::to_string))
            .ok_or_else(|| {
                Error::not_found(format!("program '{}' not found in workspace", name))
            })?;

        let program_id: Pubkey = address.parse().map_err(|e| {
            Error::config(format!("invalid program id for '{}': {}", name, e))
        })?;

        let canonical = entry
            .map(|(k, _)| k.clone())
            .or_else(|| idl.program_name().map(str::to_string))
            .unwrap_or_else(|| name.to_string());

        Ok(ProgramHandle {
            name: canonical,
            program_id,
            cluster: self.cluster().to_string(),
            idl,
        })
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names: BTreeSet<String> = self
            .cluster_programs()
            .map(|programs| programs.keys().cloned().collect())
            .unwrap_or_default();

        // Only IDLs that are not already listed under another spelling
        let known: BTreeSet<String> = names.iter().map(|n| normalize_name(n)).collect();
        for stem in self.idl_stems() {
            if !known.contains(&normalize_name(&stem)) {
                names.insert(stem);
            }
        }

        Ok(names.into_iter().collect())
    }
}
