//! cf-records: typed activity records, validation and batch files.

pub mod record;
pub mod schema;
pub mod validate;

pub use record::{ActivityRecord, Category, Scope};
pub use schema::*;
pub use validate::{ValidationError, validate_record, validate_records};

use serde::{Deserialize, Serialize};
use std::path::Path;

pub type RecordsResult<T> = Result<T, RecordsError>;

#[derive(thiserror::Error, Debug)]
pub enum RecordsError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported file extension: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A named batch of records, typically one uploaded file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordBatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub records: Vec<ActivityRecord>,
}

impl RecordBatch {
    pub fn new(name: impl Into<String>, records: Vec<ActivityRecord>) -> Self {
        Self {
            name: Some(name.into()),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn load_yaml(path: &Path) -> RecordsResult<RecordBatch> {
    let content = std::fs::read_to_string(path)?;
    let batch: RecordBatch = serde_yaml::from_str(&content)?;
    validate_records(&batch.records)?;
    Ok(batch)
}

pub fn save_yaml(path: &Path, batch: &RecordBatch) -> RecordsResult<()> {
    validate_records(&batch.records)?;
    let content = serde_yaml::to_string(batch)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> RecordsResult<RecordBatch> {
    let content = std::fs::read_to_string(path)?;
    let batch: RecordBatch = serde_json::from_str(&content)?;
    validate_records(&batch.records)?;
    Ok(batch)
}

pub fn save_json(path: &Path, batch: &RecordBatch) -> RecordsResult<()> {
    validate_records(&batch.records)?;
    let content = serde_json::to_string_pretty(batch)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, `.yaml`/`.yml` as YAML.
pub fn load(path: &Path) -> RecordsResult<RecordBatch> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            load_yaml(path)
        }
        _ => Err(RecordsError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}
