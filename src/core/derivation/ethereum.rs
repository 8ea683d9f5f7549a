//! Ethereum keys: BIP-32 secp256k1 derivation and EIP-55 addresses
//!
//! ## Algorithm
//! 1. BIP-32 master node from the 64-byte seed (HMAC-SHA512, "Bitcoin seed")
//! 2. Walk m/44'/60'/0'/0/{index}
//! 3. Uncompressed public key, drop the 0x04 prefix, Keccak-256
//! 4. Last 20 bytes of the hash, mixed-case per EIP-55

use coins_bip32::xkeys::{Parent, XPriv};
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use sha3::{Digest, Keccak256};
use tracing::debug;
use zeroize::Zeroize;

use crate::core::derivation::paths::{self, DerivationPath};
use crate::core::errors::WalletError;
use crate::core::wallet_info::{AccountIndex, ChainKeypair, Curve};
use crate::security::secret::string_to_secret;

/// Walk `path` from the BIP-32 root of `seed`.
pub fn derive_node(seed: &[u8], path: &DerivationPath) -> Result<XPriv, WalletError> {
    let mut xpriv = XPriv::root_from_seed(seed, None)
        .map_err(|e| WalletError::KeyDerivationError(format!("Failed to create master key: {}", e)))?;

    for child in path.iter() {
        xpriv = xpriv.derive_child(child).map_err(|e| {
            WalletError::KeyDerivationError(format!("Child derivation failed at {}: {}", child, e))
        })?;
    }

    Ok(xpriv)
}

/// Derive the Ethereum keypair for `index` from a 64-byte BIP-39 seed.
pub fn derive_keypair(seed: &[u8], index: AccountIndex) -> Result<ChainKeypair, WalletError> {
    let path = paths::ethereum(index)?;
    debug!("Using derivation path: {}", path);

    let node = derive_node(seed, &path)?;
    let signing_key: &SigningKey = node.as_ref();

    let address = address_from_verifying_key(signing_key.verifying_key());

    let mut key_hex = hex::encode(signing_key.to_bytes());
    let private_key = string_to_secret(format!("0x{}", key_hex));
    key_hex.zeroize();

    Ok(ChainKeypair::new(
        address,
        private_key,
        Curve::Secp256k1,
        path.to_string(),
    ))
}

/// keccak256(uncompressed pubkey without prefix)[12..], EIP-55 encoded.
pub fn address_from_verifying_key(key: &VerifyingKey) -> String {
    let public_key = k256::PublicKey::from(key);
    let encoded = public_key.to_encoded_point(false);

    let hash = Keccak256::digest(&encoded.as_bytes()[1..]);
    to_checksum_address(&hex::encode(&hash[12..]))
}

/// EIP-55: mixed-case checksum address encoding
/// https://eips.ethereum.org/EIPS/eip-55
pub fn to_checksum_address(address: &str) -> String {
    let addr = address.trim_start_matches("0x").to_lowercase();
    let hash = Keccak256::digest(addr.as_bytes());

    let checksummed: String = addr
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let nibble = (hash[i / 2] >> (4 * (1 - (i % 2)))) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();

    format!("0x{}", checksummed)
}

/// Accepts all-lowercase or all-uppercase hex, and mixed case only when the
/// EIP-55 checksum matches.
pub fn is_valid_address(address: &str) -> bool {
    let body = match address.strip_prefix("0x") {
        Some(body) if body.len() == 40 => body,
        _ => return false,
    };
    if !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    let is_all_lower = !body.chars().any(|c| c.is_ascii_uppercase());
    let is_all_upper = !body.chars().any(|c| c.is_ascii_lowercase());
    if is_all_lower || is_all_upper {
        return true;
    }
    to_checksum_address(body) == address
}
