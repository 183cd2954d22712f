//! Error types for the price oracle.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OracleError>;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Price feed error: {0}")]
    Feed(String),

    #[error("Invalid price: answer must be positive, got {0}")]
    InvalidPrice(i128),

    #[error("Stale price: last update {age_secs}s ago exceeds max age {max_age_secs}s")]
    StalePrice { age_secs: u64, max_age_secs: u64 },

    #[error("Arithmetic overflow while converting {0}")]
    Overflow(i128),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Contract error: {0}")]
    ContractError(String),
}
