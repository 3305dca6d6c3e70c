//! On-chain account summary

use super::lamports::Lamports;
use super::Pubkey;

/// Account metadata returned by `getAccountInfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub lamports: Lamports,
    pub owner: Pubkey,
    pub executable: bool,
    /// Size of the account data in bytes
    pub space: u64,
}
