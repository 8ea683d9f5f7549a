//! Aliases for secret buffers that must be zeroized on drop.
use zeroize::Zeroizing;

/// Secret byte buffer, zeroed when dropped.
pub type SecretVec = Zeroizing<Vec<u8>>;

/// Secret text (seed phrases, exported private keys), zeroed when dropped.
pub type SecretString = Zeroizing<String>;

/// Convert a Vec<u8> into a `SecretVec` which will be zeroized on drop.
pub fn vec_to_secret(v: Vec<u8>) -> SecretVec {
    Zeroizing::new(v)
}

/// Move a String into a `SecretString` which will be zeroized on drop.
pub fn string_to_secret(s: String) -> SecretString {
    Zeroizing::new(s)
}
