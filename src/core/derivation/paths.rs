//! BIP-44 derivation paths
//!
//! Path format: m/44'/coin_type'/account'/change/address_index
//!
//! - Ethereum: m/44'/60'/0'/0/{index} (account index is the address leaf)
//! - Solana:   m/44'/501'/{index}'/0' (account index is the account level,
//!   every level hardened for SLIP-0010)

use std::fmt;
use std::str::FromStr;

use crate::core::errors::WalletError;
use crate::core::wallet_info::AccountIndex;

/// Bit set on hardened child indices.
pub const HARDENED: u32 = 0x8000_0000;

pub const PURPOSE: u32 = 44;
pub const ETHEREUM_COIN_TYPE: u32 = 60;
pub const SOLANA_COIN_TYPE: u32 = 501;

/// A parsed derivation path, stored as raw BIP-32 child numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    indices: Vec<u32>,
}

impl DerivationPath {
    pub fn new(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    /// Raw child numbers, hardened ones with [`HARDENED`] set.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn is_fully_hardened(&self) -> bool {
        self.indices.iter().all(|i| i & HARDENED != 0)
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = path.trim();
        let rest = path.strip_prefix('m').ok_or_else(|| {
            WalletError::KeyDerivationError(format!("Path must start with 'm': {}", path))
        })?;

        if rest.is_empty() {
            return Ok(Self::new(Vec::new()));
        }

        let rest = rest.strip_prefix('/').ok_or_else(|| {
            WalletError::KeyDerivationError(format!("Malformed path: {}", path))
        })?;

        let mut indices = Vec::new();
        for segment in rest.split('/') {
            let (digits, hardened) = match segment
                .strip_suffix('\'')
                .or_else(|| segment.strip_suffix('h'))
            {
                Some(d) => (d, true),
                None => (segment, false),
            };

            let index: u32 = digits.parse().map_err(|e| {
                WalletError::KeyDerivationError(format!("Invalid index '{}': {}", segment, e))
            })?;
            if index & HARDENED != 0 {
                return Err(WalletError::KeyDerivationError(format!(
                    "Index out of range: {}",
                    segment
                )));
            }

            indices.push(if hardened { index | HARDENED } else { index });
        }

        Ok(Self::new(indices))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            if index & HARDENED != 0 {
                write!(f, "/{}'", index & !HARDENED)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}

fn check_index(index: AccountIndex) -> Result<(), WalletError> {
    if index & HARDENED != 0 {
        return Err(WalletError::KeyDerivationError(format!(
            "Account index {} exceeds 2^31 - 1",
            index
        )));
    }
    Ok(())
}

/// m/44'/60'/0'/0/{index}
pub fn ethereum(index: AccountIndex) -> Result<DerivationPath, WalletError> {
    check_index(index)?;
    Ok(DerivationPath::new(vec![
        PURPOSE | HARDENED,
        ETHEREUM_COIN_TYPE | HARDENED,
        HARDENED, // account 0'
        0,        // external chain
        index,
    ]))
}

/// m/44'/501'/{index}'/0'
pub fn solana(index: AccountIndex) -> Result<DerivationPath, WalletError> {
    check_index(index)?;
    Ok(DerivationPath::new(vec![
        PURPOSE | HARDENED,
        SOLANA_COIN_TYPE | HARDENED,
        index | HARDENED,
        HARDENED, // change 0'
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_ethereum_path() {
        let path = ethereum(0).unwrap();
        assert_eq!(path.indices(), &[0x8000002C, 0x8000003C, 0x80000000, 0, 0]);
        assert_eq!(path.to_string(), "m/44'/60'/0'/0/0");
        assert_eq!(ethereum(7).unwrap().to_string(), "m/44'/60'/0'/0/7");
        assert!(!path.is_fully_hardened());
    }

    #[test]
    fn test_solana_path() {
        let path = solana(3).unwrap();
        assert_eq!(path.to_string(), "m/44'/501'/3'/0'");
        assert!(path.is_fully_hardened());
    }

    #[test]
    fn test_index_out_of_range() {
        assert!(ethereum(HARDENED).is_err());
        assert!(solana(u32::MAX).is_err());
        assert!(solana(HARDENED - 1).is_ok());
    }

    #[test_case("m/44'/501'/0'/0'", "m/44'/501'/0'/0'" ; "apostrophe")]
    #[test_case("m/44h/60h/0h/0/1", "m/44'/60'/0'/0/1" ; "h suffix")]
    #[test_case(" m/0 ", "m/0" ; "whitespace")]
    #[test_case("m", "m" ; "master")]
    fn test_parse_roundtrips_to_canonical(input: &str, canonical: &str) {
        let path: DerivationPath = input.parse().unwrap();
        assert_eq!(path.to_string(), canonical);
    }

    #[test_case("44'/501'" ; "missing m")]
    #[test_case("m/" ; "trailing slash")]
    #[test_case("m//1" ; "empty segment")]
    #[test_case("m/abc" ; "not a number")]
    #[test_case("m/2147483648" ; "too large")]
    fn test_parse_rejects(input: &str) {
        assert!(input.parse::<DerivationPath>().is_err());
    }
}
