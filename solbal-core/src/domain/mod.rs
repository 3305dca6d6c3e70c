//! Core domain entities
//!
//! Addresses, keypairs and commitment levels are the `solana-sdk` types;
//! the rest are plain data with parsing and validation.

mod account;
pub mod cluster;
pub mod lamports;
pub mod program;
pub mod result;
pub mod wallet;

pub use account::AccountInfo;
pub use cluster::{parse_commitment, Cluster};
pub use lamports::Lamports;
pub use program::{Idl, IdlInstruction, ProgramHandle};
pub use solana_sdk::commitment_config::CommitmentConfig;
pub use solana_sdk::native_token::LAMPORTS_PER_SOL;
pub use solana_sdk::pubkey::Pubkey;
pub use solana_sdk::signature::Keypair;
pub use wallet::read_wallet;

/// Serialize a `Pubkey` as its base58 string rather than a byte array
pub(crate) fn serialize_pubkey<S>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(pubkey)
}

pub(crate) fn serialize_opt_pubkey<S>(
    pubkey: &Option<Pubkey>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match pubkey {
        Some(pubkey) => serializer.collect_str(pubkey),
        None => serializer.serialize_none(),
    }
}
