//! Vault lifecycle management
//!
//! Thin locking wrappers over [`Vault`](crate::core::vault::Vault). Records
//! are cloned out so no lock outlives a call.

use super::VaultManager;
use crate::core::{
    errors::WalletError,
    seed::{self, SeedPhrase},
    vault::VaultState,
    wallet_info::{WalletRecord, WalletSummary},
};

impl VaultManager {
    /// Create the vault from a seed phrase, or from a freshly generated one
    /// (length per `config.seed.word_count`) when the input is blank.
    ///
    /// # Errors
    /// * `WalletError::InvalidSeed` - The phrase failed validation
    /// * `WalletError::InvalidState` - The vault is already active
    pub fn create_vault(&self, seed_input: Option<&str>) -> Result<WalletRecord, WalletError> {
        if self.vault.read().is_active() {
            return Err(WalletError::InvalidState(
                "vault already active: clear it before creating a new one".to_string(),
            ));
        }

        let phrase = match seed_input.map(str::trim).filter(|s| !s.is_empty()) {
            Some(candidate) => seed::validate(candidate)?,
            None => seed::generate_with(self.config.seed.word_count)?,
        };

        let mut vault = self.vault.write();
        vault.create_vault_from(phrase).cloned()
    }

    pub fn add_wallet(&self) -> Result<WalletRecord, WalletError> {
        self.vault.write().add_wallet().cloned()
    }

    pub fn delete_wallet(&self, id: &str) -> Result<WalletRecord, WalletError> {
        self.vault.write().delete_wallet(id)
    }

    /// Wipe the seed and all wallets. Callers confirm with the user first.
    pub fn clear_vault(&self) {
        self.vault.write().clear_vault();
    }

    pub fn state(&self) -> VaultState {
        self.vault.read().state()
    }

    pub fn seed_phrase(&self) -> Option<SeedPhrase> {
        self.vault.read().seed_phrase().cloned()
    }

    pub fn wallets(&self) -> Vec<WalletRecord> {
        self.vault.read().wallets().to_vec()
    }

    pub fn get_wallet(&self, id: &str) -> Option<WalletRecord> {
        self.vault.read().wallet(id).cloned()
    }

    pub fn list_wallets(&self) -> Vec<WalletSummary> {
        self.vault.read().wallets().iter().map(WalletRecord::summary).collect()
    }
}
