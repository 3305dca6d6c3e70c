//! Program service - inspect workspace programs

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{CommitmentConfig, Lamports, ProgramHandle, Pubkey};
use crate::ports::{ProgramRegistry, RpcConnection};

/// On-chain state of a program account
#[derive(Debug, Clone, Serialize)]
pub struct Deployment {
    pub exists: bool,
    pub executable: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::domain::serialize_opt_pubkey"
    )]
    pub owner: Option<Pubkey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lamports: Option<Lamports>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgramReport {
    #[serde(flatten)]
    pub handle: ProgramHandle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment: Option<Deployment>,
}

pub struct ProgramService {
    registry: Arc<dyn ProgramRegistry>,
}

impl ProgramService {
    pub fn new(registry: Arc<dyn ProgramRegistry>) -> Self {
        Self { registry }
    }

    pub fn list(&self) -> Result<Vec<String>> {
        self.registry.list()
    }

    /// Resolve a program without any network access
    pub fn describe(&self, name: &str) -> Result<ProgramReport> {
        Ok(ProgramReport {
            handle: self.registry.resolve(name)?,
            deployment: None,
        })
    }

    /// Resolve a program and look up its account on the cluster
    pub async fn describe_deployed(
        &self,
        name: &str,
        connection: &dyn RpcConnection,
        commitment: CommitmentConfig,
    ) -> Result<ProgramReport> {
        let handle = self.registry.resolve(name)?;
        let account = connection
            .get_account_info(&handle.program_id, commitment)
            .await?;

        let deployment = match account {
            Some(info) => Deployment {
                exists: true,
                executable: info.executable,
                owner: Some(info.owner),
                lamports: Some(info.lamports),
            },
            None => Deployment {
                exists: false,
                executable: false,
                owner: None,
                lamports: None,
            },
        };

        Ok(ProgramReport {
            handle,
            deployment: Some(deployment),
        })
    }
}
