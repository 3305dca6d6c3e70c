//! Solana RPC adapter
//!
//! Wraps the nonblocking `RpcClient` from `solana-client`. Only read-only
//! methods are used. No timeout beyond the client's default is configured and
//! nothing is retried here, so failures surface as the endpoint reports them.

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;

use crate::domain::result::Result;
use crate::domain::{AccountInfo, CommitmentConfig, Lamports, Pubkey};
use crate::ports::RpcConnection;

/// Connection to a single cluster endpoint
pub struct SolanaRpcClient {
    client: RpcClient,
    endpoint: String,
}

impl SolanaRpcClient {
    /// Create a client for `endpoint`; `commitment` applies to calls that take none
    pub fn new(endpoint: &str, commitment: CommitmentConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(endpoint.to_string(), commitment),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl RpcConnection for SolanaRpcClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_balance(
        &self,
        pubkey: &Pubkey,
        commitment: CommitmentConfig,
    ) -> Result<Lamports> {
        let response = self
            .client
            .get_balance_with_commitment(pubkey, commitment)
            .await?;
        Ok(Lamports(response.value))
    }

    async fn get_account_info(
        &self,
        pubkey: &Pubkey,
        commitment: CommitmentConfig,
    ) -> Result<Option<AccountInfo>> {
        let response = self
            .client
            .get_account_with_commitment(pubkey, commitment)
            .await?;

        Ok(response.value.map(|account| AccountInfo {
            lamports: Lamports(account.lamports),
            owner: account.owner,
            executable: account.executable,
            space: account.data.len() as u64,
        }))
    }

    async fn get_health(&self) -> Result<()> {
        self.client.get_health().await?;
        Ok(())
    }

    async fn get_version(&self) -> Result<String> {
        let version = self.client.get_version().await?;
        Ok(version.solana_core)
    }
}
