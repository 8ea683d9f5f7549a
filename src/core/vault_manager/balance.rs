//! Balance queries
//!
//! One oracle request per wallet and chain, all in flight together. A failed
//! request turns into [`Balance::Unknown`] for that cell only.

use std::fmt;

use futures::future::join_all;
use serde::{Serialize, Serializer};
use tracing::{info, warn};

use super::VaultManager;
use crate::blockchain::traits::{BalanceOracle, Chain, Network};
use crate::core::wallet_info::AccountIndex;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Balance {
    /// Whole-coin amount with four fractional digits
    Known(String),
    Unknown,
}

impl Balance {
    pub fn display(&self) -> &str {
        match self {
            Balance::Known(amount) => amount,
            Balance::Unknown => UNKNOWN,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Balance::Known(_))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Balance::Known(amount) => serializer.serialize_str(amount),
            Balance::Unknown => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReading {
    pub wallet_id: String,
    pub account_index: AccountIndex,
    pub network: Network,
    pub ethereum: Balance,
    pub solana: Balance,
}

struct AddressSnapshot {
    wallet_id: String,
    account_index: AccountIndex,
    ethereum: String,
    solana: String,
}

impl VaultManager {
    /// Balances for every wallet on `network`, in vault order.
    ///
    /// Never fails: an empty vault yields an empty list and oracle errors
    /// become `Balance::Unknown`.
    pub async fn fetch_balances(&self, network: Network) -> Vec<BalanceReading> {
        let snapshot: Vec<AddressSnapshot> = {
            let vault = self.vault.read();
            vault
                .wallets()
                .iter()
                .map(|w| AddressSnapshot {
                    wallet_id: w.id.clone(),
                    account_index: w.account_index,
                    ethereum: w.ethereum.address().to_string(),
                    solana: w.solana.address().to_string(),
                })
                .collect()
        };

        info!("Fetching balances for {} wallet(s) on {}", snapshot.len(), network);

        let oracle = self.oracle.as_ref();
        let readings = snapshot.into_iter().map(|w| async move {
            let (ethereum, solana) = futures::join!(
                query(oracle, Chain::Ethereum, &w.ethereum, network),
                query(oracle, Chain::Solana, &w.solana, network),
            );
            BalanceReading {
                wallet_id: w.wallet_id,
                account_index: w.account_index,
                network,
                ethereum,
                solana,
            }
        });

        join_all(readings).await
    }

    /// [`fetch_balances`](Self::fetch_balances) on `config.default_network`.
    pub async fn fetch_default_balances(&self) -> Vec<BalanceReading> {
        self.fetch_balances(self.config.default_network).await
    }
}

async fn query(oracle: &dyn BalanceOracle, chain: Chain, address: &str, network: Network) -> Balance {
    match oracle.get_balance(address, chain, network).await {
        Ok(amount) => Balance::Known(amount),
        Err(e) => {
            warn!(%chain, %network, address, "Balance unavailable: {}", e);
            Balance::Unknown
        }
    }
}
