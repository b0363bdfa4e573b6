use thiserror::Error;

/// Error type shared by the record sources, configuration and services.
///
/// Aggregation itself never fails; every variant here originates at a boundary
/// (disk, the remote store, or user-supplied definitions).
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fetch failed: {0}")]
    Fetch(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FinanceError>;
