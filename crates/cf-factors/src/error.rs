//! Factor lookup errors.

use thiserror::Error;

/// Result type for factor operations.
pub type FactorResult<T> = Result<T, FactorError>;

/// Errors raised while fetching emission factors.
#[derive(Error, Debug)]
pub enum FactorError {
    /// A required factor row does not exist for the given filters.
    #[error("No factor rows in '{table}' for {key}")]
    NotFound { table: String, key: String },

    /// The source has no such table.
    #[error("Unknown factor table '{table}'")]
    UnknownTable { table: String },

    /// Backend (database) error.
    #[error("Factor source error: {message}")]
    Source { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FactorError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
