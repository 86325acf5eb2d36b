//! Emission factor rows.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One cell of a factor table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactorValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FactorValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Equality against a filter value, the way the factor database compares.
    pub fn matches(&self, wanted: &str) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => wanted.eq_ignore_ascii_case(if *b { "true" } else { "false" }),
            Self::Number(v) => wanted.trim().parse::<f64>().is_ok_and(|w| w == *v),
            Self::Text(s) => s == wanted,
        }
    }
}

impl fmt::Display for FactorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A flat factor-table row: factor columns (`kgCO2_litre`, `gCH4_litre`, ...) next to
/// descriptive columns (`fuel_type`, `country`, `year`, ...).
///
/// Rows are immutable once fetched; the builder methods exist for sources and fixtures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorRow(BTreeMap<String, FactorValue>);

impl FactorRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_number(mut self, column: impl Into<String>, value: f64) -> Self {
        self.0.insert(column.into(), FactorValue::Number(value));
        self
    }

    pub fn with_text(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(column.into(), FactorValue::Text(value.into()));
        self
    }

    pub fn with_null(mut self, column: impl Into<String>) -> Self {
        self.0.insert(column.into(), FactorValue::Null);
        self
    }

    pub fn get(&self, column: &str) -> Option<&FactorValue> {
        self.0.get(column)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(FactorValue::as_number)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(FactorValue::as_text)
    }

    /// Publication year of the factor, if the table carries one.
    pub fn year(&self) -> Option<i64> {
        match self.get("year")? {
            FactorValue::Number(v) if v.is_finite() => Some(*v as i64),
            FactorValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &FactorValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, FactorValue)> for FactorRow {
    fn from_iter<T: IntoIterator<Item = (String, FactorValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
