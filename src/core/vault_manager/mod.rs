//! Vault Manager Core Module
//!
//! Shares one [`Vault`] between callers and pairs it with a balance oracle.
//!
//! ## Module Structure
//! - `lifecycle` - Vault lifecycle (create, add, delete, clear, list)
//! - `balance` - Balance queries across every wallet

pub mod balance;
pub mod lifecycle;

pub use balance::{Balance, BalanceReading};

use std::sync::Arc;

use parking_lot::RwLock;

use crate::blockchain::traits::BalanceOracle;
use crate::core::{config::VaultConfig, errors::WalletError, vault::Vault};
use crate::network::rpc_oracle::RpcBalanceOracle;

/// Vault manager
///
/// Every mutation takes the write lock. Balance queries only hold the read
/// lock long enough to copy addresses out.
pub struct VaultManager {
    pub config: VaultConfig,

    vault: Arc<RwLock<Vault>>,

    oracle: Arc<dyn BalanceOracle>,
}

impl VaultManager {
    /// Manager backed by the JSON-RPC oracle described in `config`.
    pub fn new(config: VaultConfig) -> Result<Self, WalletError> {
        let oracle = RpcBalanceOracle::new(&config.oracle)?;
        Ok(Self::with_oracle(config, Arc::new(oracle)))
    }

    pub fn with_oracle(config: VaultConfig, oracle: Arc<dyn BalanceOracle>) -> Self {
        Self {
            config,
            vault: Arc::new(RwLock::new(Vault::new())),
            oracle,
        }
    }

    /// Shared handle to the underlying vault.
    pub fn vault(&self) -> Arc<RwLock<Vault>> {
        Arc::clone(&self.vault)
    }
}
