pub mod config;
pub mod derivation;
pub mod errors;
pub mod seed;
pub mod vault;
pub mod vault_manager;
pub mod wallet_info;

pub use vault::{Vault, VaultState};
pub use vault_manager::VaultManager;
pub use wallet_info::{ChainKeypair, WalletRecord, WalletSummary};
