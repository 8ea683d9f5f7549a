// src/main.rs
//! HD vault CLI entry point
use anyhow::{anyhow, Result};
use clap::Parser;
use hd_vault::cli::{Cli, Commands};
use hd_vault::core::config::VaultConfig;
use hd_vault::core::seed;
use hd_vault::core::vault_manager::{BalanceReading, VaultManager};
use hd_vault::core::wallet_info::{AccountIndex, WalletRecord};
use hd_vault::security::redaction::mask_phrase;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WalletView {
    id: String,
    account_index: AccountIndex,
    ethereum_address: String,
    ethereum_path: String,
    solana_address: String,
    solana_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ethereum_private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    solana_private_key: Option<String>,
}

impl WalletView {
    fn new(record: &WalletRecord, show_secrets: bool) -> Self {
        let secret = |s: &str| show_secrets.then(|| s.to_string());
        Self {
            id: record.id.clone(),
            account_index: record.account_index,
            ethereum_address: record.ethereum.address().to_string(),
            ethereum_path: record.ethereum.derivation_path().to_string(),
            solana_address: record.solana.address().to_string(),
            solana_path: record.solana.derivation_path().to_string(),
            ethereum_private_key: secret(record.ethereum.private_key()),
            solana_private_key: secret(record.solana.private_key()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeriveOutput {
    seed_phrase: String,
    wallets: Vec<WalletView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    balances: Option<Vec<BalanceReading>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging()?;

    let config = match &cli.config {
        Some(path) => VaultConfig::load(path)?,
        None => VaultConfig::load_or_default(),
    };

    match cli.command {
        Commands::Generate { words } => {
            let word_count = words.unwrap_or(config.seed.word_count);
            let phrase = seed::generate_with(word_count)?;
            println!("{}", phrase.phrase());
        }
        Commands::Validate { phrase } => match seed::validate(&phrase) {
            Ok(valid) => println!("valid ({} words)", valid.word_count().words()),
            Err(e) => {
                println!("invalid: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Derive { phrase, count, delete, show_secrets, balances, network, json } => {
            let network = network.unwrap_or(config.default_network);
            let manager = VaultManager::new(config)?;

            manager.create_vault(phrase.as_deref())?;
            for _ in 1..count {
                manager.add_wallet()?;
            }
            for index in delete {
                let id = manager
                    .wallets()
                    .iter()
                    .find(|w| w.account_index == index)
                    .map(|w| w.id.clone())
                    .ok_or_else(|| anyhow!("no wallet at account index {}", index))?;
                manager.delete_wallet(&id)?;
            }

            let readings = if balances {
                Some(manager.fetch_balances(network).await)
            } else {
                None
            };

            let phrase = manager
                .seed_phrase()
                .ok_or_else(|| anyhow!("vault is empty"))?;
            let output = DeriveOutput {
                seed_phrase: if show_secrets {
                    phrase.phrase().to_string()
                } else {
                    mask_phrase(phrase.phrase())
                },
                wallets: manager
                    .wallets()
                    .iter()
                    .map(|w| WalletView::new(w, show_secrets))
                    .collect(),
                balances: readings,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_text(&output, network);
            }
            info!("Session finished with {} wallet(s)", output.wallets.len());
        }
    }

    Ok(())
}

fn print_text(output: &DeriveOutput, network: hd_vault::Network) {
    println!("Seed phrase: {}", output.seed_phrase);
    for wallet in &output.wallets {
        println!();
        println!("Wallet #{} ({})", wallet.account_index, wallet.id);
        println!("  ETH {}  [{}]", wallet.ethereum_address, wallet.ethereum_path);
        if let Some(key) = &wallet.ethereum_private_key {
            println!("      private key: {}", key);
        }
        println!("  SOL {}  [{}]", wallet.solana_address, wallet.solana_path);
        if let Some(key) = &wallet.solana_private_key {
            println!("      private key: {}", key);
        }
        if let Some(reading) = output
            .balances
            .as_ref()
            .and_then(|b| b.iter().find(|r| r.wallet_id == wallet.id))
        {
            println!(
                "  balance ({}): {} ETH, {} SOL",
                network, reading.ethereum, reading.solana
            );
        }
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=info,reqwest=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
