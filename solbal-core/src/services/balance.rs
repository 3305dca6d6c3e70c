//! Balance service - wallet address and balance report
//!
//! The report is strictly ordered: resolve the workspace program, print the
//! address, fetch the balance, print the balance. A failure at any step stops
//! the sequence, so a balance line is never printed without the address
//! line that identifies it.

use std::io::Write;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{Lamports, ProgramHandle, Pubkey};
use crate::ports::ProgramRegistry;
use crate::services::provider::Provider;

/// Address line of the report
pub fn address_line(address: &Pubkey) -> String {
    format!("My address: {}", address)
}

/// Balance line of the report
pub fn balance_line(lamports: Lamports) -> String {
    format!("My balance: {} SOL", lamports.to_sol())
}

/// Result of a balance query
#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    #[serde(serialize_with = "crate::domain::serialize_pubkey")]
    pub address: Pubkey,
    pub lamports: Lamports,
    pub sol: Decimal,
}

impl BalanceReport {
    pub fn new(address: Pubkey, lamports: Lamports) -> Self {
        Self {
            address,
            lamports,
            sol: lamports.to_sol(),
        }
    }
}

pub struct BalanceService {
    provider: Arc<Provider>,
    registry: Arc<dyn ProgramRegistry>,
}

impl BalanceService {
    pub fn new(provider: Arc<Provider>, registry: Arc<dyn ProgramRegistry>) -> Self {
        Self { provider, registry }
    }

    /// Resolve `program`, then write the address and balance lines to `out`
    pub async fn report<W: Write>(&self, program: &str, out: &mut W) -> Result<BalanceReport> {
        self.registry.resolve(program)?;

        let address = self.provider.public_key();
        writeln!(out, "{}", address_line(&address))?;
        out.flush()?;

        let lamports = self.provider.balance().await?;
        writeln!(out, "{}", balance_line(lamports))?;
        out.flush()?;

        Ok(BalanceReport::new(address, lamports))
    }

    /// Same sequence as `report` without writing anything
    pub async fn fetch(&self, program: &str) -> Result<BalanceReport> {
        self.registry.resolve(program)?;
        let address = self.provider.public_key();
        let lamports = self.provider.balance().await?;
        Ok(BalanceReport::new(address, lamports))
    }

    /// Resolve a program handle without touching the network
    pub fn resolve(&self, program: &str) -> Result<ProgramHandle> {
        self.registry.resolve(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::domain::result::Error;
    use crate::domain::{AccountInfo, Cluster, CommitmentConfig, Idl, Keypair};
    use crate::ports::RpcConnection;
    use solana_sdk::signer::keypair::keypair_from_seed;
    use solana_sdk::signer::Signer;

    /// RPC stub returning a fixed balance, or failing
    struct StubRpc {
        balance: Option<u64>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RpcConnection for StubRpc {
        fn endpoint(&self) -> &str {
            "stub://"
        }

        async fn get_balance(
            &self,
            _pubkey: &Pubkey,
            _commitment: CommitmentConfig,
        ) -> Result<Lamports> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.balance
                .map(Lamports)
                .ok_or_else(|| Error::network("connection refused"))
        }

        async fn get_account_info(
            &self,
            _pubkey: &Pubkey,
            _commitment: CommitmentConfig,
        ) -> Result<Option<AccountInfo>> {
            Ok(None)
        }

        async fn get_health(&self) -> Result<()> {
            Ok(())
        }

        async fn get_version(&self) -> Result<String> {
            Ok("stub".to_string())
        }
    }

    /// Registry knowing a single program
    struct OneProgram(&'static str);

    impl ProgramRegistry for OneProgram {
        fn resolve(&self, name: &str) -> Result<ProgramHandle> {
            if name.eq_ignore_ascii_case(self.0) {
                Ok(ProgramHandle {
                    name: self.0.to_string(),
                    program_id: Pubkey::new_from_array([1u8; 32]),
                    cluster: "localnet".to_string(),
                    idl: Idl::default(),
                })
            } else {
                Err(Error::not_found(format!("program '{}' not found in workspace", name)))
            }
        }

        fn list(&self) -> Result<Vec<String>> {
            Ok(vec![self.0.to_string()])
        }
    }

    fn service(balance: Option<u64>) -> (BalanceService, Arc<StubRpc>, Pubkey) {
        let rpc = Arc::new(StubRpc {
            balance,
            calls: AtomicUsize::new(0),
        });
        let keypair: Keypair = keypair_from_seed(&[4u8; 32]).unwrap();
        let pubkey = keypair.pubkey();
        let provider = Provider::new(
            rpc.clone(),
            keypair,
            Cluster::Localnet,
            CommitmentConfig::processed(),
        );
        let service = BalanceService::new(Arc::new(provider), Arc::new(OneProgram("zkarb")));
        (service, rpc, pubkey)
    }

    #[tokio::test]
    async fn test_report_prints_two_lines_in_order() {
        let (service, _, pubkey) = service(Some(2_500_000_000));
        let mut out = Vec::new();

        let report = service.report("Zkarb", &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("My address: {}", pubkey));
        assert_eq!(lines[1], "My balance: 2.5 SOL");
        assert_eq!(report.lamports, Lamports(2_500_000_000));
    }

    #[tokio::test]
    async fn test_zero_balance() {
        let (service, _, _) = service(Some(0));
        let mut out = Vec::new();
        service.report("zkarb", &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().last(), Some("My balance: 0 SOL"));
    }

    #[tokio::test]
    async fn test_unknown_program_prints_nothing() {
        let (service, rpc, _) = service(Some(1));
        let mut out = Vec::new();

        let err = service.report("escrow", &mut out).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(out.is_empty());
        assert_eq!(rpc.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_after_address() {
        let (service, rpc, pubkey) = service(None);
        let mut out = Vec::new();

        let err = service.report("zkarb", &mut out).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("My address: {}\n", pubkey));
        assert_eq!(rpc.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_serializes() {
        let (service, _, pubkey) = service(Some(1_000_000_001));
        let report = service.fetch("zkarb").await.unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["address"], pubkey.to_string());
        assert_eq!(json["lamports"], 1_000_000_001u64);
        assert_eq!(json["sol"], "1.000000001");
    }

    #[test]
    fn test_lines() {
        assert_eq!(balance_line(Lamports(2_500_000_000)), "My balance: 2.5 SOL");
        assert_eq!(
            address_line(&Pubkey::default()),
            "My address: 11111111111111111111111111111111"
        );
    }
}
