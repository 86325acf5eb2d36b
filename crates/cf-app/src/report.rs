//! Serializable summaries of a finished run.

use std::collections::BTreeMap;
use std::path::Path;

use cf_calc::{Accumulator, CalculatedEmission, MetadataEntry, Method, Rejection, ResultKind};
use cf_core::{RecordId, as_tonnes, kg};
use cf_factors::CacheStats;
use cf_records::{Category, Scope};
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// One calculated record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSummary {
    pub index: usize,
    pub record_id: RecordId,
    pub category: Category,
    pub scope: Scope,
    pub kind: ResultKind,
    pub best_method: Option<Method>,
    /// kg CO2e of the best method.
    pub amount_kg: Option<f64>,
    pub data_quality: f64,
    pub metadata: Vec<MetadataEntry>,
}

impl From<&CalculatedEmission> for RecordSummary {
    fn from(result: &CalculatedEmission) -> Self {
        Self {
            index: result.index.position(),
            record_id: result.record.id(),
            category: result.record.category(),
            scope: result.record.scope(),
            kind: result.kind,
            best_method: result.best_entry().map(|e| e.method),
            amount_kg: result.contribution(),
            data_quality: result.data_quality,
            metadata: result.metadata.clone(),
        }
    }
}

/// A record whose calculation failed, usually for want of a required factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFailure {
    pub record_id: RecordId,
    pub category: Category,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub name: Option<String>,
    pub records: Vec<RecordSummary>,
    /// Best emissions per scope, kg CO2e. Removals are not included.
    pub emissions_by_scope: BTreeMap<Scope, f64>,
    pub total_emissions_kg: f64,
    pub total_emissions_tonnes: f64,
    pub total_removals_kg: f64,
    pub net_emissions_kg: f64,
    pub rejections: Vec<Rejection>,
    pub failures: Vec<RecordFailure>,
    pub cache: CacheStats,
}

impl BatchReport {
    pub fn from_accumulator(
        name: Option<String>,
        acc: &Accumulator,
        failures: Vec<RecordFailure>,
    ) -> Self {
        let records: Vec<RecordSummary> =
            acc.calculated_emissions().map(RecordSummary::from).collect();

        let mut emissions_by_scope = BTreeMap::new();
        for summary in &records {
            if summary.kind == ResultKind::Emission
                && let Some(amount) = summary.amount_kg
            {
                *emissions_by_scope.entry(summary.scope).or_insert(0.0) += amount;
            }
        }

        let total = acc.get_total_emissions();
        Self {
            name,
            records,
            emissions_by_scope,
            total_emissions_kg: total,
            total_emissions_tonnes: as_tonnes(kg(total)),
            total_removals_kg: acc.get_total_removals(),
            net_emissions_kg: acc.net_emissions(),
            rejections: acc.rejections().to_vec(),
            failures,
            cache: acc.cache_stats(),
        }
    }

    /// Records whose best method could not be evaluated.
    pub fn uncalculated(&self) -> impl Iterator<Item = &RecordSummary> {
        self.records.iter().filter(|r| r.amount_kg.is_none())
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_json(&self, path: &Path) -> AppResult<()> {
        std::fs::write(path, self.to_json()?).map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
