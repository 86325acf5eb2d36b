//! The external factor database boundary.

use crate::error::FactorResult;
use crate::row::FactorRow;

/// Equality filters for a factor query.
///
/// Filters whose value is `None` are kept for cache keys but never applied to the
/// query, so "no state" means "any state".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(Vec<(String, Option<String>)>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: Option<&str>) -> Self {
        self.0.push((column.into(), value.map(str::to_string)));
        self
    }

    /// Filters that actually constrain the query.
    pub fn applied(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
    }

    /// Deterministic key: the table name joined with the sorted `column_value` pairs.
    pub fn cache_key(&self, table: &str) -> String {
        let mut pairs: Vec<_> = self.0.iter().collect();
        pairs.sort();
        let mut key = table.to_string();
        for (k, v) in pairs {
            key.push('_');
            key.push_str(k);
            key.push('_');
            key.push_str(v.as_deref().unwrap_or("None"));
        }
        key
    }

    pub fn matches(&self, row: &FactorRow) -> bool {
        self.applied()
            .all(|(k, v)| row.get(k).is_some_and(|cell| cell.matches(v)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Trait for emission factor sources.
///
/// Implementations must be thread-safe (Send + Sync): parallel batch runs share one
/// source while every worker owns its own [`crate::LookupCache`].
pub trait FactorSource: Send + Sync {
    /// Return every row of `table` matching `filters`.
    fn query(&self, table: &str, filters: &Filters) -> FactorResult<Vec<FactorRow>>;

    /// Human-readable name for logs.
    fn name(&self) -> &str {
        "factor-source"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_sorted_and_stable() {
        let a = Filters::new()
            .eq("state", Some("Malacca"))
            .eq("country", Some("Malaysia"))
            .eq("energy_provider", None);
        let b = Filters::new()
            .eq("energy_provider", None)
            .eq("country", Some("Malaysia"))
            .eq("state", Some("Malacca"));
        assert_eq!(a.cache_key("s2ie_gef"), b.cache_key("s2ie_gef"));
        assert_eq!(
            a.cache_key("s2ie_gef"),
            "s2ie_gef_country_Malaysia_energy_provider_None_state_Malacca"
        );
    }

    #[test]
    fn none_filters_are_not_applied() {
        let f = Filters::new()
            .eq("country", Some("Malaysia"))
            .eq("state", None);
        let applied: Vec<_> = f.applied().collect();
        assert_eq!(applied, vec![("country", "Malaysia")]);

        let row = FactorRow::new().with_text("country", "Malaysia");
        assert!(f.matches(&row));
    }
}
