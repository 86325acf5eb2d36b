//! Engine configuration files.

use std::path::Path;

use cf_factors::{GwpTable, TableNames};
use cf_records::Scope;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Everything that changes how factors are looked up and converted.
///
/// Every field is optional in the file:
///
/// ```yaml
/// gwp:
///   ch4: 28.0
///   n2o: 265.0
/// tables:
///   grid_table: s2ie_gef_2024
/// scope: financed
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gwp: GwpTable,
    pub tables: TableNames,
    /// Only calculate records of this scope; others are rejected.
    pub scope: Option<Scope>,
}

impl EngineConfig {
    /// Load by extension: `.json` is JSON, anything else is YAML.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let config = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| AppError::Config(format!("Failed to parse config JSON: {}", e)))?
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?
        };
        Ok(config)
    }

    pub fn save_yaml(&self, path: &Path) -> AppResult<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
