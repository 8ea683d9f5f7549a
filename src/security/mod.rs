// src/security/mod.rs
//! Secret handling for seeds and private keys

pub mod secret;

// Secret buffer alias re-export
pub use secret::{SecretString, SecretVec};

// Redaction helpers to avoid accidental secret prints
pub mod redaction;
pub use redaction::{mask_phrase, redact_secret};
