//! Error types for the cf-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives the CLI one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Factor error: {0}")]
    Factors(String),

    #[error("Records error: {0}")]
    Records(String),

    #[error("Record validation failed: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Result type for cf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<cf_factors::FactorError> for AppError {
    fn from(err: cf_factors::FactorError) -> Self {
        AppError::Factors(err.to_string())
    }
}

impl From<cf_records::RecordsError> for AppError {
    fn from(err: cf_records::RecordsError) -> Self {
        match err {
            cf_records::RecordsError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Records(other.to_string()),
        }
    }
}

impl From<cf_records::ValidationError> for AppError {
    fn from(err: cf_records::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialize(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialize(err.to_string())
    }
}
