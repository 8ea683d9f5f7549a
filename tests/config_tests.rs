use std::io::Write;

use hd_vault::blockchain::traits::{Chain, Network};
use hd_vault::core::config::{VaultConfig, CONFIG_PATH_ENV};
use hd_vault::core::errors::WalletError;
use hd_vault::core::seed::WordCount;
use serial_test::serial;
use tempfile::NamedTempFile;

const SAMPLE: &str = r#"
default_network = "mainnet"

[seed]
word_count = 24

[oracle]
request_timeout_seconds = 30

[oracle.endpoints.ethereum]
mainnet = "http://localhost:8545"
devnet = "http://localhost:8546"
"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_temp(SAMPLE);
    let cfg = VaultConfig::load(file.path()).unwrap();

    assert_eq!(cfg.default_network, Network::Mainnet);
    assert_eq!(cfg.seed.word_count, WordCount::TwentyFour);
    assert_eq!(cfg.oracle.request_timeout_seconds, 30);
    assert_eq!(cfg.oracle.endpoint(Chain::Ethereum, Network::Devnet), "http://localhost:8546");
    // untouched chain keeps its defaults
    assert_eq!(
        cfg.oracle.endpoint(Chain::Solana, Network::Mainnet),
        "https://api.mainnet-beta.solana.com"
    );
}

#[test]
fn test_load_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = VaultConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, WalletError::ConfigError(_)));
}

#[test]
fn test_load_malformed_file_is_config_error() {
    let file = write_temp("default_network = [1, 2");
    assert!(matches!(VaultConfig::load(file.path()), Err(WalletError::ConfigError(_))));

    let file = write_temp("default_network = \"testnet\"");
    assert!(matches!(VaultConfig::load(file.path()), Err(WalletError::ConfigError(_))));
}

#[test]
#[serial]
fn test_load_or_default_via_env() {
    let file = write_temp(SAMPLE);
    std::env::set_var(CONFIG_PATH_ENV, file.path());
    assert_eq!(VaultConfig::load_or_default().default_network, Network::Mainnet);

    let broken = write_temp("[oracle]\nrequest_timeout_seconds = 0");
    std::env::set_var(CONFIG_PATH_ENV, broken.path());
    assert_eq!(VaultConfig::load_or_default(), VaultConfig::default());

    let dir = tempfile::tempdir().unwrap();
    std::env::set_var(CONFIG_PATH_ENV, dir.path().join("nope.toml"));
    assert_eq!(VaultConfig::load_or_default(), VaultConfig::default());

    std::env::remove_var(CONFIG_PATH_ENV);
}

#[test]
fn test_default_roundtrips_through_toml() {
    let rendered = toml::to_string(&VaultConfig::default()).unwrap();
    let parsed = VaultConfig::from_toml_str(&rendered).unwrap();
    assert_eq!(parsed, VaultConfig::default());
}
