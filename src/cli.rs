use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::blockchain::traits::Network;
use crate::core::seed::WordCount;
use crate::core::wallet_info::AccountIndex;

/// HD vault CLI (library-facing definitions)
///
/// Each invocation is one in-memory session: nothing is written to disk.
#[derive(Debug, Parser)]
#[command(name = "hd-vault", about = "Multi-chain HD vault", version)]
pub struct Cli {
    /// TOML config file (overrides CONFIG_PATH)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a freshly generated seed phrase
    Generate {
        /// 12 or 24 (defaults to the configured length)
        #[arg(long, value_parser = parse_word_count)]
        words: Option<WordCount>,
    },
    /// Check a seed phrase (word count, word list, checksum)
    Validate {
        #[arg(long)]
        phrase: String,
    },
    /// Create a vault and print its wallets
    Derive {
        /// Seed phrase to import; a new one is generated when omitted
        #[arg(long)]
        phrase: Option<String>,

        /// Number of wallets to derive
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,

        /// Account index to delete after deriving (repeatable)
        #[arg(long = "delete")]
        delete: Vec<AccountIndex>,

        /// Print the seed phrase and private keys in clear text
        #[arg(long)]
        show_secrets: bool,

        /// Query balances for every wallet
        #[arg(long)]
        balances: bool,

        /// mainnet or devnet (defaults to the configured network)
        #[arg(long)]
        network: Option<Network>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub fn parse_word_count(s: &str) -> Result<WordCount, String> {
    let n: usize = s.parse().map_err(|_| format!("not a number: {}", s))?;
    WordCount::try_from(n).map_err(|e| e.to_string())
}
