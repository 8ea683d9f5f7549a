//! JSON-RPC balance oracle
//!
//! - Ethereum: `eth_getBalance(address, "latest")`, hex wei in `result`
//! - Solana: `getBalance(address)`, lamports in `result.value`
//!
//! Amounts are converted to whole coins and rendered with four fractional
//! digits, rounding half away from zero.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{json, Value};
use tracing::debug;

use crate::blockchain::traits::{BalanceOracle, Chain, Network};
use crate::core::config::{EndpointsConfig, OracleConfig};
use crate::core::derivation::{ethereum, solana};
use crate::core::errors::WalletError;

pub const LAMPORTS_DECIMALS: u32 = 9;
pub const WEI_DECIMALS: u32 = 18;
pub const DISPLAY_DECIMALS: u32 = 4;

pub struct RpcBalanceOracle {
    client: Client,
    endpoints: EndpointsConfig,
}

impl RpcBalanceOracle {
    pub fn new(config: &OracleConfig) -> Result<Self, WalletError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| WalletError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
        })
    }

    /// POST a JSON-RPC request and return its `result` member.
    async fn rpc_call(&self, url: &str, method: &str, params: Value) -> Result<Value, WalletError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let resp = self.client.post(url).json(&payload).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(WalletError::OracleUnavailable(format!(
                "{} returned HTTP {}",
                method, status
            )));
        }

        let mut body: Value = resp.json().await?;
        if let Some(err) = body.get("error") {
            return Err(WalletError::OracleUnavailable(format!(
                "{} returned error: {}",
                method, err
            )));
        }
        match body.get_mut("result") {
            Some(result) => Ok(result.take()),
            None => Err(WalletError::OracleUnavailable(format!(
                "{} response has no result",
                method
            ))),
        }
    }

    async fn ethereum_balance(&self, url: &str, address: &str) -> Result<String, WalletError> {
        if !ethereum::is_valid_address(address) {
            return Err(WalletError::OracleUnavailable(format!(
                "not an Ethereum address: {}",
                address
            )));
        }
        let result = self.rpc_call(url, "eth_getBalance", json!([address, "latest"])).await?;
        let hex = result.as_str().ok_or_else(|| {
            WalletError::OracleUnavailable(format!("unexpected eth_getBalance result: {}", result))
        })?;
        let wei = parse_hex_quantity(hex)?;
        format_wei(wei)
    }

    async fn solana_balance(&self, url: &str, address: &str) -> Result<String, WalletError> {
        if !solana::is_valid_address(address) {
            return Err(WalletError::OracleUnavailable(format!(
                "not a Solana address: {}",
                address
            )));
        }
        let result = self.rpc_call(url, "getBalance", json!([address])).await?;
        let lamports = result.get("value").and_then(Value::as_u64).ok_or_else(|| {
            WalletError::OracleUnavailable(format!("unexpected getBalance result: {}", result))
        })?;
        format_lamports(lamports)
    }
}

#[async_trait]
impl BalanceOracle for RpcBalanceOracle {
    async fn get_balance(
        &self,
        address: &str,
        chain: Chain,
        network: Network,
    ) -> Result<String, WalletError> {
        let url = self.endpoints.for_chain(chain).get(network);
        debug!(%chain, %network, address, "Querying balance");
        match chain {
            Chain::Ethereum => self.ethereum_balance(url, address).await,
            Chain::Solana => self.solana_balance(url, address).await,
        }
    }
}

/// `0x`-prefixed hex quantity as returned by Ethereum nodes.
pub fn parse_hex_quantity(hex: &str) -> Result<u128, WalletError> {
    let digits = hex.strip_prefix("0x").ok_or_else(|| {
        WalletError::OracleUnavailable(format!("quantity without 0x prefix: {}", hex))
    })?;
    if digits.is_empty() {
        return Err(WalletError::OracleUnavailable("empty hex quantity".to_string()));
    }
    u128::from_str_radix(digits, 16)
        .map_err(|e| WalletError::OracleUnavailable(format!("bad hex quantity {}: {}", hex, e)))
}

pub fn format_lamports(lamports: u64) -> Result<String, WalletError> {
    format_units(u128::from(lamports), LAMPORTS_DECIMALS)
}

pub fn format_wei(wei: u128) -> Result<String, WalletError> {
    format_units(wei, WEI_DECIMALS)
}

/// `amount / 10^decimals` with exactly four fractional digits.
fn format_units(amount: u128, decimals: u32) -> Result<String, WalletError> {
    let signed = i128::try_from(amount)
        .map_err(|_| WalletError::OracleUnavailable(format!("amount out of range: {}", amount)))?;
    let value = Decimal::try_from_i128_with_scale(signed, decimals)
        .map_err(|e| WalletError::OracleUnavailable(format!("amount out of range: {}", e)))?;

    let mut rounded = value.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DECIMALS);
    Ok(rounded.to_string())
}
