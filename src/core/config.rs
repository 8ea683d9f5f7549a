use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::blockchain::traits::{Chain, Network};
use crate::core::errors::WalletError;
use crate::core::seed::WordCount;

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "hd-vault.toml";

/// RPC endpoints for one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEndpoints {
    pub mainnet: String,
    pub devnet: String,
}

impl ChainEndpoints {
    pub fn get(&self, network: Network) -> &str {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Devnet => &self.devnet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "EndpointsConfig::default_ethereum")]
    pub ethereum: ChainEndpoints,

    #[serde(default = "EndpointsConfig::default_solana")]
    pub solana: ChainEndpoints,
}

impl EndpointsConfig {
    fn default_ethereum() -> ChainEndpoints {
        ChainEndpoints {
            mainnet: "https://eth.llamarpc.com".to_string(),
            // Sepolia
            devnet: "https://rpc.sepolia.org".to_string(),
        }
    }

    fn default_solana() -> ChainEndpoints {
        ChainEndpoints {
            mainnet: "https://api.mainnet-beta.solana.com".to_string(),
            devnet: "https://api.devnet.solana.com".to_string(),
        }
    }

    pub fn for_chain(&self, chain: Chain) -> &ChainEndpoints {
        match chain {
            Chain::Ethereum => &self.ethereum,
            Chain::Solana => &self.solana,
        }
    }

    /// Same URL for every chain and network. Handy for pointing at a mock server.
    pub fn uniform(url: &str) -> Self {
        let both = ChainEndpoints {
            mainnet: url.to_string(),
            devnet: url.to_string(),
        };
        Self {
            ethereum: both.clone(),
            solana: both,
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            ethereum: Self::default_ethereum(),
            solana: Self::default_solana(),
        }
    }
}

/// Balance oracle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Per-request timeout (seconds)
    #[serde(default = "OracleConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,

    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

impl OracleConfig {
    fn default_request_timeout() -> u64 {
        10
    }

    pub fn endpoint(&self, chain: Chain, network: Network) -> &str {
        self.endpoints.for_chain(chain).get(network)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: Self::default_request_timeout(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Length of generated phrases, 12 or 24
    #[serde(default)]
    pub word_count: WordCount,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    #[serde(default)]
    pub oracle: OracleConfig,

    #[serde(default)]
    pub default_network: Network,

    #[serde(default)]
    pub seed: SeedConfig,
}

impl VaultConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        let config: VaultConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WalletError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `$CONFIG_PATH` (or `hd-vault.toml`). A missing or broken file
    /// falls back to defaults.
    pub fn load_or_default() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        if !Path::new(&path).exists() {
            info!("No config file at {}, using defaults", path);
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config from {}: {}. Using defaults", path, e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), WalletError> {
        if self.oracle.request_timeout_seconds == 0 {
            return Err(WalletError::ConfigError(
                "oracle.request_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        for chain in Chain::ALL {
            for network in [Network::Mainnet, Network::Devnet] {
                let url = self.oracle.endpoint(chain, network);
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(WalletError::ConfigError(format!(
                        "invalid {} {} endpoint: {}",
                        chain, network, url
                    )));
                }
            }
        }
        Ok(())
    }
}
