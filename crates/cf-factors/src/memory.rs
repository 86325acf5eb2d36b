//! In-memory factor source backed by YAML/JSON factor tables.

use crate::error::{FactorError, FactorResult};
use crate::row::FactorRow;
use crate::source::{FactorSource, Filters};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// On-disk layout: table name → rows.
///
/// ```yaml
/// s1sc_liquid:
///   - fuel_type: Diesel
///     kgCO2_litre: 2.68
///     gCH4_litre: 0.1
///     year: 2023
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorTables(pub BTreeMap<String, Vec<FactorRow>>);

impl FactorTables {
    pub fn load_yaml(path: &Path) -> FactorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn load_json(path: &Path) -> FactorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load by extension: `.json` is JSON, anything else is YAML.
    pub fn load(path: &Path) -> FactorResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::load_json(path),
            _ => Self::load_yaml(path),
        }
    }
}

/// Factor source answering queries from tables held in memory.
///
/// Counts every query it serves, which is how tests observe cache behavior.
#[derive(Debug, Default)]
pub struct InMemorySource {
    tables: BTreeMap<String, Vec<FactorRow>>,
    queries: AtomicUsize,
}

impl InMemorySource {
    pub fn new(tables: FactorTables) -> Self {
        Self {
            tables: tables.0,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>, rows: Vec<FactorRow>) -> Self {
        self.tables.entry(table.into()).or_default().extend(rows);
        self
    }

    /// Number of queries served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl FactorSource for InMemorySource {
    fn query(&self, table: &str, filters: &Filters) -> FactorResult<Vec<FactorRow>> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let rows = self
            .tables
            .get(table)
            .ok_or_else(|| FactorError::UnknownTable {
                table: table.to_string(),
            })?;
        Ok(rows.iter().filter(|r| filters.matches(r)).cloned().collect())
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> InMemorySource {
        InMemorySource::default().with_table(
            "s1sc_liquid",
            vec![
                FactorRow::new()
                    .with_text("fuel_type", "Diesel")
                    .with_number("kgCO2_litre", 2.68),
                FactorRow::new()
                    .with_text("fuel_type", "Petrol")
                    .with_number("kgCO2_litre", 2.31),
            ],
        )
    }

    #[test]
    fn filters_rows_and_counts_queries() {
        let src = source();
        let rows = src
            .query("s1sc_liquid", &Filters::new().eq("fuel_type", Some("Petrol")))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number("kgCO2_litre"), Some(2.31));

        let all = src.query("s1sc_liquid", &Filters::new()).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(src.query_count(), 2);
    }

    #[test]
    fn unknown_table_is_an_error() {
        let err = source().query("nope", &Filters::new()).unwrap_err();
        assert!(matches!(err, FactorError::UnknownTable { .. }));
    }

    #[test]
    fn tables_parse_from_yaml() {
        let yaml = "s1sc_gas:\n  - fuel_type: Natural gas\n    kgCO2_m3: 1.9225\n    year: 2022\n";
        let tables: FactorTables = serde_yaml::from_str(yaml).unwrap();
        let src = InMemorySource::new(tables);
        let rows = src.query("s1sc_gas", &Filters::new()).unwrap();
        assert_eq!(rows[0].number("kgCO2_m3"), Some(1.9225));
        assert_eq!(rows[0].year(), Some(2022));
    }
}
