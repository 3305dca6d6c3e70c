//! Cluster RPC port
//!
//! Read-only view of a cluster. The balance report needs only
//! `get_balance`; the remaining calls back the diagnostic commands.

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{AccountInfo, CommitmentConfig, Lamports, Pubkey};

/// Connection to a cluster's JSON-RPC endpoint
///
/// Implementations must not add retries of their own.
#[async_trait]
pub trait RpcConnection: Send + Sync {
    /// Endpoint this connection talks to
    fn endpoint(&self) -> &str;

    /// Balance of `pubkey` in lamports
    async fn get_balance(&self, pubkey: &Pubkey, commitment: CommitmentConfig)
        -> Result<Lamports>;

    /// Account metadata, or `None` if the account does not exist
    async fn get_account_info(
        &self,
        pubkey: &Pubkey,
        commitment: CommitmentConfig,
    ) -> Result<Option<AccountInfo>>;

    /// Succeeds when the node reports itself healthy
    async fn get_health(&self) -> Result<()>;

    /// Version of the node software
    async fn get_version(&self) -> Result<String>;
}
