use std::fmt;
use thiserror::Error;

/// Why a candidate seed phrase was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("expected 12 or 24 words, got {0}")]
    WordCount(usize),

    #[error("word {position} ('{word}') is not in the BIP-39 word list")]
    UnknownWord { position: usize, word: String },

    #[error("checksum does not match the encoded entropy")]
    Checksum,

    #[error("entropy rejected: {0}")]
    Entropy(String),
}

/// Custom error type for vault operations.
#[derive(Debug)]
pub enum WalletError {
    /// Seed phrase failed validation. Raised before any vault mutation.
    InvalidSeed(SeedError),
    /// Attempt to delete the only wallet in the vault.
    LastWallet,
    /// Wallet operation attempted while the vault holds no seed.
    VaultEmpty,
    /// Transition not allowed from the current vault state.
    InvalidState(String),
    /// Resource not found errors.
    NotFoundError(String),
    /// Key derivation errors.
    KeyDerivationError(String),
    /// Balance query failed. Never fatal to the vault.
    OracleUnavailable(String),
    /// Configuration-related errors.
    ConfigError(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::InvalidSeed(err) => write!(f, "Invalid seed phrase: {}", err),
            WalletError::LastWallet => write!(
                f,
                "Cannot delete the last wallet: clear the entire vault instead"
            ),
            WalletError::VaultEmpty => write!(f, "Vault is empty: create a vault first"),
            WalletError::InvalidState(msg) => write!(f, "Invalid vault state: {}", msg),
            WalletError::NotFoundError(msg) => write!(f, "Not found: {}", msg),
            WalletError::KeyDerivationError(msg) => write!(f, "Key derivation error: {}", msg),
            WalletError::OracleUnavailable(msg) => write!(f, "Balance oracle unavailable: {}", msg),
            WalletError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for WalletError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WalletError::InvalidSeed(err) => Some(err),
            _ => None,
        }
    }
}

impl WalletError {
    /// The vault is untouched and the caller can carry on (possibly after
    /// asking the user for different input).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WalletError::InvalidSeed(_)
                | WalletError::LastWallet
                | WalletError::VaultEmpty
                | WalletError::OracleUnavailable(_)
        )
    }
}

impl From<SeedError> for WalletError {
    fn from(err: SeedError) -> Self {
        WalletError::InvalidSeed(err)
    }
}

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        WalletError::ConfigError(err.to_string())
    }
}

impl From<toml::de::Error> for WalletError {
    fn from(err: toml::de::Error) -> Self {
        WalletError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for WalletError {
    fn from(err: reqwest::Error) -> Self {
        WalletError::OracleUnavailable(err.to_string())
    }
}
