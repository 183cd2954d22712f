//! Configuration management for the price oracle.
//!
//! Loads all settings from environment variables.

use crate::errors::{OracleError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint (e.g., https://soroban-testnet.stellar.org)
    pub rpc_url: String,

    /// Agricrowd contract address (Strkey format: C...). Only needed for
    /// commands that read the ledger.
    pub contract_id: Option<String>,

    /// Account (G...) used as the source of simulated read transactions.
    /// Only needed for commands that read the ledger.
    pub source_account: Option<String>,

    /// HTTP endpoint returning the latest `{answer, decimals, updated_at}`
    pub price_feed_url: String,

    /// Decimal places of the native token (7 for XLM)
    pub native_decimals: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `PRICE_FEED_URL`: HTTP price feed
    ///
    /// Optional variables (with defaults):
    /// - `RPC_URL`: Soroban RPC endpoint (defaults to testnet)
    /// - `CONTRACT_ID`: Agricrowd contract address (no default)
    /// - `SOURCE_ACCOUNT`: existing account used to simulate reads (no default)
    /// - `NATIVE_DECIMALS`: native token decimals (defaults to 7)
    /// - `TIMEOUT_SECS`: Request timeout (defaults to 30)
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            rpc_url: env_var("RPC_URL")
                .unwrap_or_else(|_| "https://soroban-testnet.stellar.org".to_string()),

            contract_id: env_var("CONTRACT_ID").ok(),

            source_account: env_var("SOURCE_ACCOUNT").ok(),

            price_feed_url: env_var("PRICE_FEED_URL")?,

            native_decimals: env_var("NATIVE_DECIMALS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .map_err(|_| OracleError::Config("Invalid NATIVE_DECIMALS".to_string()))?,

            timeout_secs: env_var("TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| OracleError::Config("Invalid TIMEOUT_SECS".to_string()))?,
        })
    }

    /// Validate that all configuration is well-formed.
    pub fn validate(&self) -> Result<()> {
        if let Some(contract_id) = &self.contract_id {
            stellar_strkey::Contract::from_string(contract_id).map_err(|_| {
                OracleError::Config(
                    "CONTRACT_ID must be a valid Stellar contract address (C...)".to_string(),
                )
            })?;
        }

        if let Some(source_account) = &self.source_account {
            stellar_strkey::ed25519::PublicKey::from_string(source_account).map_err(|_| {
                OracleError::Config(
                    "SOURCE_ACCOUNT must be a valid Stellar account address (G...)".to_string(),
                )
            })?;
        }

        if !self.rpc_url.starts_with("http") {
            return Err(OracleError::Config(
                "RPC_URL must be a valid HTTP(S) URL".to_string(),
            ));
        }

        if !self.price_feed_url.starts_with("http") {
            return Err(OracleError::Config(
                "PRICE_FEED_URL must be a valid HTTP(S) URL".to_string(),
            ));
        }

        if self.native_decimals > 18 {
            return Err(OracleError::Config(
                "NATIVE_DECIMALS must be at most 18".to_string(),
            ));
        }

        Ok(())
    }

    /// The contract address, or a configuration error for commands that
    /// need one.
    pub fn require_contract_id(&self) -> Result<&str> {
        self.contract_id.as_deref().ok_or_else(|| {
            OracleError::Config("Missing required environment variable: CONTRACT_ID".to_string())
        })
    }

    /// Raw ed25519 key of the simulation source account.
    pub fn require_source_account(&self) -> Result<[u8; 32]> {
        let account = self.source_account.as_deref().ok_or_else(|| {
            OracleError::Config(
                "Missing required environment variable: SOURCE_ACCOUNT".to_string(),
            )
        })?;
        stellar_strkey::ed25519::PublicKey::from_string(account)
            .map(|key| key.0)
            .map_err(|_| OracleError::Config("Invalid SOURCE_ACCOUNT".to_string()))
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| OracleError::Config(format!("Missing required environment variable: {key}")))
}

#[cfg(test)]
pub(crate) fn mock_config() -> Config {
    Config {
        rpc_url: "https://soroban-testnet.stellar.org".to_string(),
        contract_id: Some("CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAD2KM".to_string()),
        source_account: Some(
            "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF".to_string(),
        ),
        price_feed_url: "https://prices.example.com/xlm-usd".to_string(),
        native_decimals: 7,
        timeout_secs: 5,
    }
}
