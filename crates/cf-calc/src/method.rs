//! Estimation methods and per-record candidate bookkeeping.

use cf_core::round2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Starting (least reliable) data-quality score. Lower scores are more reliable.
pub const WORST_QUALITY: f64 = 5.0;

/// Most reliable score a physical method can reach.
pub const BEST_QUALITY: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Method {
    #[serde(rename = "physical_emissions")]
    PhysicalEmissions,
    #[serde(rename = "distance_based_emissions")]
    DistanceBasedEmissions,
    #[serde(rename = "use_based_emissions")]
    UseBasedEmissions,
    #[serde(rename = "reported_emissions")]
    ReportedEmissions,
    #[serde(rename = "reported_emissions_1")]
    ReportedEmissions1,
    #[serde(rename = "reported_emissions_2")]
    ReportedEmissions2,
    #[serde(rename = "calculated_emissions")]
    CalculatedEmissions,
    #[serde(rename = "estimated_emissions")]
    EstimatedEmissions,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::PhysicalEmissions => "physical_emissions",
            Method::DistanceBasedEmissions => "distance_based_emissions",
            Method::UseBasedEmissions => "use_based_emissions",
            Method::ReportedEmissions => "reported_emissions",
            Method::ReportedEmissions1 => "reported_emissions_1",
            Method::ReportedEmissions2 => "reported_emissions_2",
            Method::CalculatedEmissions => "calculated_emissions",
            Method::EstimatedEmissions => "estimated_emissions",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a result adds to the footprint or offsets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    #[default]
    Emission,
    Removal,
}

/// One successful method evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataEntry {
    pub method: Method,
    /// kg CO2e.
    pub amount: f64,
    pub fields_used: Vec<&'static str>,
    pub data_quality: f64,
}

/// Every candidate amount a calculator produced for one record.
///
/// `data_quality` is the running score after the last evaluated method;
/// each entry in `metadata` carries the score at the time it was evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSet {
    pub kind: ResultKind,
    pub amounts: BTreeMap<Method, f64>,
    pub data_quality: f64,
    pub metadata: Vec<MetadataEntry>,
}

impl Default for MethodSet {
    fn default() -> Self {
        Self::emissions()
    }
}

impl MethodSet {
    pub fn emissions() -> Self {
        Self {
            kind: ResultKind::Emission,
            amounts: BTreeMap::new(),
            data_quality: WORST_QUALITY,
            metadata: Vec::new(),
        }
    }

    pub fn removals() -> Self {
        Self {
            kind: ResultKind::Removal,
            ..Self::emissions()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    /// Lower the running score without recording a method.
    pub fn penalize(&mut self, cost: f64) {
        self.data_quality -= cost;
    }

    /// Replace the running score outright.
    pub fn set_quality(&mut self, quality: f64) {
        self.data_quality = quality;
    }

    /// Record `method` at the current score.
    ///
    /// Non-finite amounts are dropped: a method that cannot produce a number is
    /// treated as not evaluated.
    pub fn record(&mut self, method: Method, amount: f64, fields_used: &[&'static str]) -> bool {
        if !amount.is_finite() {
            warn!(%method, amount, "dropping non-finite method result");
            return false;
        }
        self.amounts.insert(method, amount);
        self.metadata.push(MetadataEntry {
            method,
            amount,
            fields_used: fields_used.to_vec(),
            data_quality: round2(self.data_quality),
        });
        true
    }

    /// Lower the score by `cost`, then record `method`.
    pub fn evaluate(
        &mut self,
        method: Method,
        cost: f64,
        amount: f64,
        fields_used: &[&'static str],
    ) -> bool {
        if !amount.is_finite() {
            warn!(%method, amount, "dropping non-finite method result");
            return false;
        }
        self.penalize(cost);
        self.record(method, amount, fields_used)
    }

    /// Position of the authoritative entry: the first with the lowest score.
    pub fn best(&self) -> Option<usize> {
        best_entry(&self.metadata)
    }
}

/// First entry with the minimum `data_quality`.
pub fn best_entry(metadata: &[MetadataEntry]) -> Option<usize> {
    metadata
        .iter()
        .enumerate()
        .filter(|(_, e)| e.amount.is_finite())
        .min_by(|(_, a), (_, b)| a.data_quality.total_cmp(&b.data_quality))
        .map(|(i, _)| i)
}
