//! Vault state machine
//!
//! ```text
//!   Empty --create_vault--> Active --clear_vault--> Empty
//!                           Active --add_wallet / delete_wallet--> Active
//! ```
//!
//! An `Active` vault owns the seed and at least one wallet. Account indices
//! are permanent: they come from a monotonic counter, deleting a wallet
//! leaves a gap, and survivors keep the index their keys were derived at.

use serde::Serialize;
use tracing::{info, warn};

use crate::core::derivation::derive_wallet;
use crate::core::errors::WalletError;
use crate::core::seed::{self, SeedPhrase};
use crate::core::wallet_info::{AccountIndex, WalletRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultState {
    Empty,
    Active,
}

#[derive(Debug)]
struct ActiveVault {
    seed: SeedPhrase,
    wallets: Vec<WalletRecord>,
    next_index: AccountIndex,
}

/// The seed plus its ordered wallet records, held in memory only.
#[derive(Debug, Default)]
pub struct Vault {
    active: Option<ActiveVault>,
}

impl Vault {
    /// A vault in the `Empty` state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VaultState {
        match self.active {
            Some(_) => VaultState::Active,
            None => VaultState::Empty,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// `Empty -> Active`.
    ///
    /// A non-blank `seed_input` is validated and imported; otherwise a fresh
    /// 12-word phrase is generated. The wallet at index 0 is derived and
    /// returned. On an invalid phrase the vault stays `Empty`.
    pub fn create_vault(&mut self, seed_input: Option<&str>) -> Result<&WalletRecord, WalletError> {
        self.ensure_empty()?;

        let phrase = match seed_input.map(str::trim).filter(|s| !s.is_empty()) {
            Some(candidate) => seed::validate(candidate)?,
            None => seed::generate()?,
        };
        self.create_vault_from(phrase)
    }

    /// `Empty -> Active` from an already validated or generated phrase.
    pub fn create_vault_from(&mut self, phrase: SeedPhrase) -> Result<&WalletRecord, WalletError> {
        self.ensure_empty()?;

        let first = derive_wallet(&phrase, 0)?;
        info!(
            seed = %seed::describe(&phrase),
            wallet_id = %first.id,
            "Vault created"
        );

        let active = self.active.insert(ActiveVault {
            seed: phrase,
            wallets: vec![first],
            next_index: 1,
        });
        Ok(&active.wallets[0])
    }

    /// Derive the next account and append it.
    pub fn add_wallet(&mut self) -> Result<&WalletRecord, WalletError> {
        let active = self.active.as_mut().ok_or(WalletError::VaultEmpty)?;

        let index = active.next_index;
        let next = index.checked_add(1).ok_or_else(|| {
            WalletError::InvalidState("account index space exhausted".to_string())
        })?;

        let record = derive_wallet(&active.seed, index)?;
        info!(wallet_id = %record.id, index, "Wallet added");

        active.wallets.push(record);
        active.next_index = next;
        let last = active.wallets.len() - 1;
        Ok(&active.wallets[last])
    }

    /// Remove the wallet with `id`. The sole remaining wallet can't be
    /// deleted ([`WalletError::LastWallet`]); clear the vault instead.
    pub fn delete_wallet(&mut self, id: &str) -> Result<WalletRecord, WalletError> {
        let active = self.active.as_mut().ok_or(WalletError::VaultEmpty)?;

        let position = active
            .wallets
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| WalletError::NotFoundError(format!("Wallet '{}' not found", id)))?;

        // Unknown id is reported before the last-wallet refusal.
        if active.wallets.len() == 1 {
            warn!(wallet_id = %id, "Refusing to delete the last wallet");
            return Err(WalletError::LastWallet);
        }

        let removed = active.wallets.remove(position);
        info!(wallet_id = %id, index = removed.account_index, "Wallet deleted");
        Ok(removed)
    }

    /// `Active -> Empty`. Drops (and zeroizes) the seed and every key.
    /// Confirmation is the caller's job.
    pub fn clear_vault(&mut self) {
        if let Some(active) = self.active.take() {
            info!(wallets = active.wallets.len(), "Vault cleared");
        }
    }

    pub fn seed_phrase(&self) -> Option<&SeedPhrase> {
        self.active.as_ref().map(|a| &a.seed)
    }

    /// Wallets in creation order (ascending account index).
    pub fn wallets(&self) -> &[WalletRecord] {
        self.active.as_ref().map(|a| a.wallets.as_slice()).unwrap_or(&[])
    }

    pub fn wallet(&self, id: &str) -> Option<&WalletRecord> {
        self.wallets().iter().find(|w| w.id == id)
    }

    pub fn wallet_at(&self, index: AccountIndex) -> Option<&WalletRecord> {
        self.wallets().iter().find(|w| w.account_index == index)
    }

    pub fn len(&self) -> usize {
        self.wallets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets().is_empty()
    }

    /// Index the next `add_wallet` will derive, if active.
    pub fn next_index(&self) -> Option<AccountIndex> {
        self.active.as_ref().map(|a| a.next_index)
    }

    fn ensure_empty(&self) -> Result<(), WalletError> {
        if self.is_active() {
            return Err(WalletError::InvalidState(
                "vault already active: clear it before creating a new one".to_string(),
            ));
        }
        Ok(())
    }
}
