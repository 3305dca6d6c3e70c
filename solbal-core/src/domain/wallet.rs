//! Wallet keypair files

use std::path::Path;

use solana_sdk::signer::keypair::read_keypair_file;

use super::result::{Error, Result};
use super::Keypair;

/// Read a Solana CLI keypair file (a JSON array of 64 bytes)
pub fn read_wallet(path: &Path) -> Result<Keypair> {
    if !path.is_file() {
        return Err(Error::keypair(format!(
            "wallet file {} does not exist",
            path.display()
        )));
    }

    read_keypair_file(path).map_err(|e| {
        Error::keypair(format!("failed to read keypair {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::keypair::{keypair_from_seed, write_keypair_file};
    use solana_sdk::signer::Signer;
    use tempfile::tempdir;

    #[test]
    fn test_read_wallet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("id.json");
        let keypair = keypair_from_seed(&[7u8; 32]).unwrap();
        write_keypair_file(&keypair, &path).unwrap();

        let loaded = read_wallet(&path).unwrap();
        assert_eq!(loaded.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_wallet(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Keypair(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_wrong_length() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(read_wallet(&path).unwrap_err(), Error::Keypair(_)));
    }

    #[test]
    fn test_not_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("id.json");
        std::fs::write(&path, "not a keypair").unwrap();
        assert!(matches!(read_wallet(&path).unwrap_err(), Error::Keypair(_)));
    }
}
