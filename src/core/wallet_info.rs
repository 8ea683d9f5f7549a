// src/core/wallet_info.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::security::redaction::redact_secret;
use crate::security::secret::SecretString;

/// Zero-based position of a wallet in its vault and the account component
/// of both derivation paths.
pub type AccountIndex = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    Secp256k1,
    Ed25519,
}

/// Address and exportable private key for one chain.
///
/// The private key is zeroized on drop and redacted from `Debug`.
#[derive(Clone)]
pub struct ChainKeypair {
    address: String,
    private_key: SecretString,
    curve: Curve,
    derivation_path: String,
}

impl ChainKeypair {
    pub fn new(
        address: String,
        private_key: SecretString,
        curve: Curve,
        derivation_path: String,
    ) -> Self {
        Self {
            address,
            private_key,
            curve,
            derivation_path,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Ethereum: `0x`-prefixed hex scalar. Solana: base-58 of seed || pubkey.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn derivation_path(&self) -> &str {
        &self.derivation_path
    }
}

impl PartialEq for ChainKeypair {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
            && self.private_key.as_str() == other.private_key.as_str()
            && self.curve == other.curve
            && self.derivation_path == other.derivation_path
    }
}

impl Eq for ChainKeypair {}

impl fmt::Debug for ChainKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainKeypair")
            .field("address", &self.address)
            .field("private_key", &redact_secret(&self.private_key))
            .field("curve", &self.curve)
            .field("derivation_path", &self.derivation_path)
            .finish()
    }
}

/// One derived identity in a vault: the same account index on both chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletRecord {
    pub id: String,
    pub account_index: AccountIndex,
    pub ethereum: ChainKeypair,
    pub solana: ChainKeypair,
}

impl WalletRecord {
    /// Same keys, ignoring the id.
    pub fn same_keys(&self, other: &WalletRecord) -> bool {
        self.account_index == other.account_index
            && self.ethereum == other.ethereum
            && self.solana == other.solana
    }

    pub fn summary(&self) -> WalletSummary {
        WalletSummary {
            id: self.id.clone(),
            account_index: self.account_index,
            ethereum_address: self.ethereum.address.clone(),
            solana_address: self.solana.address.clone(),
        }
    }
}

/// Public part of a [`WalletRecord`], safe to serialize and log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub id: String,
    pub account_index: AccountIndex,
    pub ethereum_address: String,
    pub solana_address: String,
}
