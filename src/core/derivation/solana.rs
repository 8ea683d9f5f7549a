//! Solana keys: SLIP-0010 ed25519 derivation and base-58 encodings
//!
//! SLIP-0010 for ed25519 only defines hardened children, so every level of
//! the path must carry the hardened marker. The derived 32-byte key is used
//! directly as the ed25519 secret seed.
//!
//! Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md

use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::derivation::paths::{self, DerivationPath, HARDENED};
use crate::core::errors::WalletError;
use crate::core::wallet_info::{AccountIndex, ChainKeypair, Curve};
use crate::security::secret::string_to_secret;

type HmacSha512 = Hmac<Sha512>;

/// SLIP-0010 master secret for the ed25519 curve.
const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";

/// One node of the SLIP-0010 ed25519 tree.
pub struct Slip10Node {
    key: Zeroizing<[u8; 32]>,
    chain_code: Zeroizing<[u8; 32]>,
}

impl Slip10Node {
    /// I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
    pub fn from_seed(seed: &[u8]) -> Result<Self, WalletError> {
        Self::from_hmac(ED25519_SEED_KEY, &[seed])
    }

    /// I = HMAC-SHA512(Key = chain_code, Data = 0x00 || key || ser32(index))
    pub fn derive_child(&self, index: u32) -> Result<Self, WalletError> {
        if index & HARDENED == 0 {
            return Err(WalletError::KeyDerivationError(format!(
                "ed25519 derivation requires hardened indices, got {}",
                index
            )));
        }
        Self::from_hmac(
            &self.chain_code[..],
            &[&[0x00u8][..], &self.key[..], &index.to_be_bytes()[..]],
        )
    }

    pub fn derive_path(seed: &[u8], path: &DerivationPath) -> Result<Self, WalletError> {
        let mut node = Self::from_seed(seed)?;
        for index in path.iter() {
            node = node.derive_child(index)?;
        }
        Ok(node)
    }

    pub fn private_key(&self) -> &[u8; 32] {
        &self.key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    fn from_hmac(key: &[u8], parts: &[&[u8]]) -> Result<Self, WalletError> {
        let mut mac = HmacSha512::new_from_slice(key)
            .map_err(|e| WalletError::KeyDerivationError(format!("HMAC init failed: {}", e)))?;
        for part in parts {
            mac.update(part);
        }
        let mut result = Zeroizing::new([0u8; 64]);
        result.copy_from_slice(&mac.finalize().into_bytes());

        let mut key = Zeroizing::new([0u8; 32]);
        let mut chain_code = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(&result[..32]);
        chain_code.copy_from_slice(&result[32..]);

        Ok(Self { key, chain_code })
    }
}

/// Derive the Solana keypair for `index` from a 64-byte BIP-39 seed.
pub fn derive_keypair(seed: &[u8], index: AccountIndex) -> Result<ChainKeypair, WalletError> {
    let path = paths::solana(index)?;
    debug!("Using derivation path: {}", path);

    let node = Slip10Node::derive_path(seed, &path)?;
    let signing_key = SigningKey::from_bytes(node.private_key());

    let address = bs58::encode(signing_key.verifying_key().to_bytes()).into_string();

    // seed || public key, the 64-byte layout wallets import
    let keypair_bytes = Zeroizing::new(signing_key.to_keypair_bytes());
    let private_key = string_to_secret(bs58::encode(&keypair_bytes[..]).into_string());

    Ok(ChainKeypair::new(
        address,
        private_key,
        Curve::Ed25519,
        path.to_string(),
    ))
}

/// Base-58 string decoding to exactly 32 bytes.
pub fn is_valid_address(address: &str) -> bool {
    matches!(bs58::decode(address).into_vec(), Ok(bytes) if bytes.len() == 32)
}
