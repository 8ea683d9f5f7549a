//! Deterministic wallet derivation
//!
//! `(seed, account index) -> WalletRecord`, one keypair per chain:
//! - Ethereum: secp256k1, BIP-32 at m/44'/60'/0'/0/{index}
//! - Solana: ed25519, SLIP-0010 at m/44'/501'/{index}'/0'
//!
//! Identical inputs always give byte-identical keys. Only the record id is
//! fresh on every call.

pub mod ethereum;
pub mod paths;
pub mod solana;

use tracing::debug;
use uuid::Uuid;

use crate::core::errors::WalletError;
use crate::core::seed::SeedPhrase;
use crate::core::wallet_info::{AccountIndex, WalletRecord};

/// Materialize the wallet at `index` for an already-validated seed.
pub fn derive_wallet(seed: &SeedPhrase, index: AccountIndex) -> Result<WalletRecord, WalletError> {
    let binary_seed = seed.to_seed();

    let ethereum = ethereum::derive_keypair(binary_seed, index)?;
    let solana = solana::derive_keypair(binary_seed, index)?;

    debug!(
        index,
        eth = %ethereum.address(),
        sol = %solana.address(),
        "Derived wallet"
    );

    Ok(WalletRecord {
        id: Uuid::new_v4().to_string(),
        account_index: index,
        ethereum,
        solana,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed;
    use std::collections::HashSet;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_derive_wallet_is_deterministic() {
        let phrase = seed::validate(TEST_MNEMONIC).unwrap();
        let a = derive_wallet(&phrase, 3).unwrap();
        let b = derive_wallet(&phrase, 3).unwrap();
        assert!(a.same_keys(&b));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_derive_wallet_distinct_indices() {
        let phrase = seed::validate(TEST_MNEMONIC).unwrap();
        let wallets: Vec<_> = (0..5).map(|i| derive_wallet(&phrase, i).unwrap()).collect();

        let eth: HashSet<_> = wallets.iter().map(|w| w.ethereum.address().to_string()).collect();
        let sol: HashSet<_> = wallets.iter().map(|w| w.solana.address().to_string()).collect();
        assert_eq!(eth.len(), 5);
        assert_eq!(sol.len(), 5);
    }

    #[test]
    fn test_derive_wallet_depends_on_seed() {
        let a = seed::validate(TEST_MNEMONIC).unwrap();
        let b = seed::validate(
            "legal winner thank year wave sausage worth useful legal winner thank yellow",
        )
        .unwrap();
        let wa = derive_wallet(&a, 0).unwrap();
        let wb = derive_wallet(&b, 0).unwrap();
        assert_ne!(wa.ethereum.address(), wb.ethereum.address());
        assert_ne!(wa.solana.address(), wb.solana.address());
    }

    #[test]
    fn test_derive_wallet_paths_carry_index() {
        let phrase = seed::validate(TEST_MNEMONIC).unwrap();
        let w = derive_wallet(&phrase, 9).unwrap();
        assert_eq!(w.account_index, 9);
        assert_eq!(w.ethereum.derivation_path(), "m/44'/60'/0'/0/9");
        assert_eq!(w.solana.derivation_path(), "m/44'/501'/9'/0'");
    }
}
