//! Provider - connection plus signing identity
//!
//! Built once from `ProviderConfig` and passed explicitly to the services
//! that need it.

use std::sync::Arc;

use solana_sdk::signer::Signer;

use crate::adapters::solana_rpc::SolanaRpcClient;
use crate::config::ProviderConfig;
use crate::domain::result::Result;
use crate::domain::{read_wallet, Cluster, CommitmentConfig, Keypair, Lamports, Pubkey};
use crate::ports::RpcConnection;

pub struct Provider {
    connection: Arc<dyn RpcConnection>,
    wallet: Keypair,
    cluster: Cluster,
    commitment: CommitmentConfig,
}

impl Provider {
    pub fn new(
        connection: Arc<dyn RpcConnection>,
        wallet: Keypair,
        cluster: Cluster,
        commitment: CommitmentConfig,
    ) -> Self {
        Self {
            connection,
            wallet,
            cluster,
            commitment,
        }
    }

    /// Load the wallet and open an RPC connection to the configured cluster
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let wallet = read_wallet(&config.wallet_path)?;
        let connection = Arc::new(SolanaRpcClient::new(
            config.cluster.url(),
            config.commitment,
        ));

        Ok(Self::new(
            connection,
            wallet,
            config.cluster.clone(),
            config.commitment,
        ))
    }

    /// Public key of the wallet
    pub fn public_key(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    pub fn connection(&self) -> &Arc<dyn RpcConnection> {
        &self.connection
    }

    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.commitment
    }

    /// Fetch the wallet balance (one RPC call)
    pub async fn balance(&self) -> Result<Lamports> {
        self.connection
            .get_balance(&self.public_key(), self.commitment)
            .await
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("endpoint", &self.connection.endpoint())
            .field("wallet", &self.public_key())
            .field("commitment", &self.commitment.commitment)
            .finish()
    }
}
