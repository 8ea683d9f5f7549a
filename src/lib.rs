// src/lib.rs

pub mod blockchain;
pub mod cli;
pub mod core;
pub mod network;
pub mod security;

pub use crate::blockchain::{BalanceOracle, Chain, Network};
pub use crate::core::config::VaultConfig;
pub use crate::core::errors::{SeedError, WalletError};
pub use crate::core::seed::{SeedPhrase, WordCount};
pub use crate::core::{Vault, VaultManager, VaultState, WalletRecord};
