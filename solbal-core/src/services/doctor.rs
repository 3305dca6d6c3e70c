//! Doctor service - configuration and connectivity checks
//!
//! Each check reports independently. Checks that depend on an earlier one
//! that failed are reported as errors with a "skipped" message.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::adapters::anchor_workspace::AnchorWorkspace;
use crate::adapters::solana_rpc::SolanaRpcClient;
use crate::config::{expand_home, COMMITMENT_ENV, PROVIDER_URL_ENV, WALLET_ENV};
use crate::domain::result::Result;
use crate::domain::{parse_commitment, read_wallet, Cluster, CommitmentConfig, ProgramHandle};
use crate::ports::{ProgramRegistry, RpcConnection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<JsonValue>>,
}

impl CheckResult {
    fn pass(name: &str, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Pass, message)
    }

    fn warning(name: &str, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Warning, message)
    }

    fn error(name: &str, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Error, message)
    }

    fn skipped(name: &str, dependency: &str) -> Self {
        Self::error(name, format!("skipped: {} check failed", dependency))
    }

    fn with_status(name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: Vec<JsonValue>) -> Self {
        if !details.is_empty() {
            self.details = Some(details);
        }
        self
    }
}

#[derive(Debug, Default, Serialize)]
pub struct DoctorSummary {
    pub passed: usize,
    pub warnings: usize,
    pub errors: usize,
}

#[derive(Debug, Serialize)]
pub struct DoctorResult {
    pub checks: Vec<CheckResult>,
    pub summary: DoctorSummary,
}

impl DoctorResult {
    fn from_checks(checks: Vec<CheckResult>) -> Self {
        let mut summary = DoctorSummary::default();
        for check in &checks {
            match check.status {
                CheckStatus::Pass => summary.passed += 1,
                CheckStatus::Warning => summary.warnings += 1,
                CheckStatus::Error => summary.errors += 1,
            }
        }
        Self { checks, summary }
    }

    pub fn is_healthy(&self) -> bool {
        self.summary.errors == 0
    }
}

/// Doctor service for setup health checks
pub struct DoctorService {
    workspace_dir: PathBuf,
    program: String,
}

impl DoctorService {
    pub fn new(workspace_dir: PathBuf, program: impl Into<String>) -> Self {
        Self {
            workspace_dir,
            program: program.into(),
        }
    }

    /// Run all checks against the live cluster endpoint
    pub async fn run_checks<F>(&self, lookup: F) -> DoctorResult
    where
        F: Fn(&str) -> Option<String>,
    {
        self.run_checks_with(lookup, |url| {
            let client: Arc<dyn RpcConnection> =
                Arc::new(SolanaRpcClient::new(url, CommitmentConfig::processed()));
            Ok(client)
        })
        .await
    }

    /// Run all checks, opening connections with `connect`
    pub async fn run_checks_with<F, C>(&self, lookup: F, connect: C) -> DoctorResult
    where
        F: Fn(&str) -> Option<String>,
        C: Fn(&str) -> Result<Arc<dyn RpcConnection>>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut checks = Vec::new();

        // Provider URL
        let cluster = match get(PROVIDER_URL_ENV).map(|url| url.parse::<Cluster>()) {
            Some(Ok(cluster)) => {
                checks.push(CheckResult::pass(
                    "provider_url",
                    format!("{} ({})", cluster.name(), cluster.url()),
                ));
                Some(cluster)
            }
            Some(Err(e)) => {
                checks.push(CheckResult::error("provider_url", e.to_string()));
                None
            }
            None => {
                checks.push(CheckResult::error(
                    "provider_url",
                    format!("{} is not defined", PROVIDER_URL_ENV),
                ));
                None
            }
        };

        let commitment = match get(COMMITMENT_ENV).map(|c| parse_commitment(&c)) {
            Some(Ok(c)) => c,
            Some(Err(e)) => {
                checks.push(CheckResult::error("commitment", e.to_string()));
                CommitmentConfig::processed()
            }
            None => CommitmentConfig::processed(),
        };

        // Workspace, read early so the wallet check can point at Anchor.toml
        let workspace = AnchorWorkspace::discover(&self.workspace_dir);

        // Wallet
        match get(WALLET_ENV) {
            Some(path) => {
                let path = expand_home(path.trim());
                match read_wallet(&path) {
                    Ok(_) => checks.push(CheckResult::pass(
                        "wallet",
                        format!("keypair loaded from {}", path.display()),
                    )),
                    Err(e) => checks.push(CheckResult::error("wallet", e.to_string())),
                }
            }
            None => {
                let hint = workspace
                    .as_ref()
                    .ok()
                    .and_then(|ws| ws.wallet())
                    .map(|w| format!(" (Anchor.toml wallet is {})", w))
                    .unwrap_or_default();
                checks.push(CheckResult::error(
                    "wallet",
                    format!("{} is not set{}", WALLET_ENV, hint),
                ));
            }
        }

        // Workspace and program
        let handle = match &workspace {
            Ok(ws) => {
                checks.push(CheckResult::pass(
                    "workspace",
                    format!("{} (cluster {})", ws.root().display(), ws.cluster()),
                ));
                let program_check = check_program(ws, &self.program);
                let handle = program_check.1;
                checks.push(program_check.0);
                handle
            }
            Err(e) => {
                checks.push(CheckResult::error("workspace", e.to_string()));
                checks.push(CheckResult::skipped("program", "workspace"));
                None
            }
        };

        // RPC health
        let connection = match &cluster {
            Some(cluster) => match check_rpc(cluster, &connect).await {
                Ok((check, connection)) => {
                    checks.push(check);
                    Some(connection)
                }
                Err(check) => {
                    checks.push(check);
                    None
                }
            },
            None => {
                checks.push(CheckResult::skipped("rpc_health", "provider_url"));
                None
            }
        };

        // Program deployment
        match (&handle, &connection) {
            (Some(handle), Some(connection)) => {
                let check = match connection.get_account_info(&handle.program_id, commitment).await {
                    Ok(Some(info)) if info.executable => CheckResult::pass(
                        "program_deployed",
                        format!("{} is deployed and executable", handle.program_id),
                    ),
                    Ok(Some(_)) => CheckResult::error(
                        "program_deployed",
                        format!("{} exists but is not executable", handle.program_id),
                    ),
                    Ok(None) => CheckResult::error(
                        "program_deployed",
                        format!("{} not found on {}", handle.program_id, connection.endpoint()),
                    ),
                    Err(e) => CheckResult::error("program_deployed", e.to_string()),
                };
                checks.push(check);
            }
            (None, _) => checks.push(CheckResult::skipped("program_deployed", "program")),
            (_, None) => checks.push(CheckResult::skipped("program_deployed", "rpc_health")),
        }

        DoctorResult::from_checks(checks)
    }
}

fn check_program(ws: &AnchorWorkspace, name: &str) -> (CheckResult, Option<ProgramHandle>) {
    match ws.resolve(name) {
        Ok(handle) => {
            let details: Vec<JsonValue> = handle
                .instruction_names()
                .into_iter()
                .map(|ix| json!({ "instruction": ix }))
                .collect();
            let check = CheckResult::pass(
                "program",
                format!("{} = {}", handle.name, handle.program_id),
            )
            .with_details(details);
            (check, Some(handle))
        }
        Err(e) => (CheckResult::error("program", e.to_string()), None),
    }
}

async fn check_rpc<C>(
    cluster: &Cluster,
    connect: &C,
) -> std::result::Result<(CheckResult, Arc<dyn RpcConnection>), CheckResult>
where
    C: Fn(&str) -> Result<Arc<dyn RpcConnection>>,
{
    let connection = connect(cluster.url()).map_err(|e| CheckResult::error("rpc_health", e.to_string()))?;

    connection
        .get_health()
        .await
        .map_err(|e| CheckResult::error("rpc_health", e.to_string()))?;

    // A healthy node that will not report its version is still usable
    let check = match connection.get_version().await {
        Ok(version) => CheckResult::pass("rpc_health", format!("ok, solana-core {}", version)),
        Err(e) => CheckResult::warning("rpc_health", format!("ok, version unavailable: {}", e)),
    };
    Ok((check, connection))
}
