//! Memoizing facade over a [`FactorSource`].
//!
//! Every lookup is keyed by operation, table and the sorted filter pairs. The first
//! request for a key performs exactly one source query; every later request is served
//! from memory for the lifetime of the cache, including "nothing found" answers.
//! Entries are never invalidated: callers needing fresh data create a new cache.
//!
//! The cache mutates through `&mut self` and is meant to be owned by a single
//! accumulator. Parallel runs give every worker its own cache over a shared source.

use crate::error::{FactorError, FactorResult};
use crate::row::{FactorRow, FactorValue};
use crate::source::{FactorSource, Filters};
use crate::tables::TableNames;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
enum CachedLookup {
    Allowed(Option<Vec<String>>),
    Row(Option<FactorRow>),
}

/// Hit/miss counters, useful for logs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

pub struct LookupCache {
    source: Arc<dyn FactorSource>,
    tables: TableNames,
    entries: HashMap<String, CachedLookup>,
    stats: CacheStats,
}

impl fmt::Debug for LookupCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<LookupCache: {} items, source={}>",
            self.entries.len(),
            self.source.name()
        )
    }
}

impl LookupCache {
    pub fn new(source: Arc<dyn FactorSource>) -> Self {
        Self::with_tables(source, TableNames::default())
    }

    pub fn with_tables(source: Arc<dyn FactorSource>, tables: TableNames) -> Self {
        Self {
            source,
            tables,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn tables(&self) -> &TableNames {
        &self.tables
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A fresh, empty cache over the same source and tables.
    pub fn fork(&self) -> Self {
        Self::with_tables(Arc::clone(&self.source), self.tables.clone())
    }

    fn lookup(&mut self, key: &str) -> Option<CachedLookup> {
        let hit = self.entries.get(key).cloned();
        if hit.is_some() {
            self.stats.hits += 1;
            debug!(key, "factor cache hit");
        }
        hit
    }

    fn fetch(&mut self, table: &str, filters: &Filters) -> FactorResult<Vec<FactorRow>> {
        self.stats.misses += 1;
        let rows = self.source.query(table, filters)?;
        debug!(
            table,
            key = %filters.cache_key(table),
            rows = rows.len(),
            "factor source queried"
        );
        Ok(rows)
    }

    // ── Allowlists ──────────────────────────────────────────────────────

    fn allowed(
        &mut self,
        table: &str,
        column: &str,
        filters: Filters,
    ) -> FactorResult<Option<Vec<String>>> {
        let key = format!("allowed:{column}:{}", filters.cache_key(table));
        if let Some(CachedLookup::Allowed(values)) = self.lookup(&key) {
            return Ok(values);
        }

        let rows = self.fetch(table, &filters)?;
        let values = unique_values(&rows, column);
        self.entries
            .insert(key, CachedLookup::Allowed(values.clone()));
        Ok(values)
    }

    pub fn allowed_fuel_types(&mut self, fuel_state: &str) -> FactorResult<Option<Vec<String>>> {
        let table = self.tables.fuel_table(fuel_state);
        self.allowed(&table, "fuel_type", Filters::new())
    }

    /// Vehicle types of `table`, or of the configured vehicle table.
    pub fn allowed_vehicle_types(
        &mut self,
        table: Option<&str>,
    ) -> FactorResult<Option<Vec<String>>> {
        let table = table.map_or_else(|| self.tables.vehicle_table.clone(), str::to_string);
        self.allowed(&table, "vehicle_type", Filters::new())
    }

    pub fn allowed_freight_types(&mut self) -> FactorResult<Option<Vec<String>>> {
        let table = self.tables.freight_table.clone();
        self.allowed(&table, "freight_type", Filters::new())
    }

    pub fn allowed_waste_types(&mut self) -> FactorResult<Option<Vec<String>>> {
        let table = self.tables.waste_table.clone();
        self.allowed(&table, "waste_type", Filters::new())
    }

    pub fn allowed_waste_treatment_methods(
        &mut self,
        waste_type: Option<&str>,
    ) -> FactorResult<Option<Vec<String>>> {
        let table = self.tables.waste_table.clone();
        let filters = Filters::new().eq("waste_type", waste_type);
        self.allowed(&table, "waste_treatment_method", filters)
    }

    pub fn allowed_refrigerants(&mut self) -> FactorResult<Option<Vec<String>>> {
        let table = self.tables.refrigerant_table.clone();
        self.allowed(&table, "ashrae_number", Filters::new())
    }

    pub fn allowed_countries(&mut self) -> FactorResult<Option<Vec<String>>> {
        let table = self.tables.country_table.clone();
        self.allowed(&table, "name", Filters::new())
    }

    pub fn allowed_states(&mut self, country: Option<&str>) -> FactorResult<Option<Vec<String>>> {
        let table = self.tables.state_table.clone();
        let filters = Filters::new().eq("country_name", country);
        self.allowed(&table, "state_name", filters)
    }

    // ── Factor rows ─────────────────────────────────────────────────────

    fn row(
        &mut self,
        table: &str,
        filters: Filters,
        keep: fn(&FactorRow) -> bool,
    ) -> FactorResult<Option<FactorRow>> {
        let key = format!("row:{}", filters.cache_key(table));
        if let Some(CachedLookup::Row(row)) = self.lookup(&key) {
            return Ok(row);
        }

        let rows = self.fetch(table, &filters)?;
        let row = most_recent(rows.into_iter().filter(|r| keep(r)).collect());
        self.entries.insert(key, CachedLookup::Row(row.clone()));
        Ok(row)
    }

    pub fn fuel_factors(
        &mut self,
        fuel_state: &str,
        fuel_type: &str,
    ) -> FactorResult<Option<FactorRow>> {
        let table = self.tables.fuel_table(fuel_state);
        let filters = Filters::new().eq("fuel_type", Some(fuel_type));
        self.row(&table, filters, keep_all)
    }

    /// Distance factors for a vehicle; `table` defaults to the travel table.
    pub fn vehicle_factors(
        &mut self,
        table: Option<&str>,
        vehicle_type: &str,
        fuel_type: Option<&str>,
    ) -> FactorResult<Option<FactorRow>> {
        let table = table.map_or_else(|| self.tables.travel_table.clone(), str::to_string);
        let filters = Filters::new()
            .eq("vehicle_type", Some(vehicle_type))
            .eq("fuel_type", fuel_type);
        self.row(&table, filters, keep_all)
    }

    /// Grid electricity factors. Zero matching rows is an error: a physical
    /// calculation cannot proceed without a grid factor.
    pub fn grid_factors(
        &mut self,
        table: Option<&str>,
        country: &str,
        state: Option<&str>,
        energy_provider: Option<&str>,
    ) -> FactorResult<FactorRow> {
        let table = table.map_or_else(|| self.tables.grid_table.clone(), str::to_string);
        let filters = Filters::new()
            .eq("country", Some(country))
            .eq("state", state)
            .eq("energy_provider", energy_provider);
        let key = filters.cache_key(&table);
        self.row(&table, filters, keep_all)?
            .ok_or(FactorError::NotFound { table, key })
    }

    /// Waste treatment factors; rows without a `kgCO2_unit` value are ignored.
    pub fn waste_factors(
        &mut self,
        waste_type: &str,
        treatment_method: Option<&str>,
    ) -> FactorResult<Option<FactorRow>> {
        let table = self.tables.waste_table.clone();
        let filters = Filters::new()
            .eq("waste_type", Some(waste_type))
            .eq("waste_treatment_method", treatment_method);
        self.row(&table, filters, |r| r.number("kgCO2_unit").is_some())
    }

    pub fn refrigerant_gwp(&mut self, refrigerant_type: &str) -> FactorResult<Option<FactorRow>> {
        let table = self.tables.refrigerant_table.clone();
        let filters = Filters::new().eq("ashrae_number", Some(refrigerant_type));
        self.row(&table, filters, keep_all)
    }

    pub fn freight_factors(&mut self, freight_type: &str) -> FactorResult<Option<FactorRow>> {
        let table = self.tables.freight_table.clone();
        let filters = Filters::new().eq("freight_type", Some(freight_type));
        self.row(&table, filters, keep_all)
    }
}

fn keep_all(_: &FactorRow) -> bool {
    true
}

/// The newest row by `year`; rows without a year rank oldest, ties keep source order.
fn most_recent(mut rows: Vec<FactorRow>) -> Option<FactorRow> {
    rows.sort_by_key(|r| std::cmp::Reverse(r.year().unwrap_or(i64::MIN)));
    rows.into_iter().next()
}

/// Sorted distinct non-null values of `column`.
///
/// `None` when rows exist but the column is null everywhere; an empty list when the
/// query returned no rows at all.
fn unique_values(rows: &[FactorRow], column: &str) -> Option<Vec<String>> {
    let values: BTreeSet<String> = rows
        .iter()
        .filter_map(|r| r.get(column))
        .filter(|v| !v.is_null())
        .map(FactorValue::to_string)
        .collect();
    if values.is_empty() && !rows.is_empty() {
        return None;
    }
    Some(values.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySource;

    fn grid_rows() -> Vec<FactorRow> {
        vec![
            FactorRow::new()
                .with_text("country", "Malaysia")
                .with_text("state", "Malacca")
                .with_number("kgCO2e_kwh", 0.70)
                .with_number("year", 2020.0),
            FactorRow::new()
                .with_text("country", "Malaysia")
                .with_text("state", "Malacca")
                .with_number("kgCO2e_kwh", 0.66)
                .with_number("year", 2023.0),
            FactorRow::new()
                .with_text("country", "Malaysia")
                .with_text("state", "Sabah")
                .with_number("kgCO2e_kwh", 0.55)
                .with_number("year", 2023.0),
        ]
    }

    fn cache_over(source: InMemorySource) -> (Arc<InMemorySource>, LookupCache) {
        let source = Arc::new(source);
        let cache = LookupCache::new(source.clone());
        (source, cache)
    }

    #[test]
    fn most_recent_year_wins() {
        let (_, mut cache) = cache_over(InMemorySource::default().with_table("s2ie_gef", grid_rows()));
        let row = cache
            .grid_factors(None, "Malaysia", Some("Malacca"), None)
            .unwrap();
        assert_eq!(row.number("kgCO2e_kwh"), Some(0.66));
    }

    #[test]
    fn grid_miss_is_not_found_and_cached() {
        let (source, mut cache) =
            cache_over(InMemorySource::default().with_table("s2ie_gef", grid_rows()));
        let err = cache
            .grid_factors(None, "Atlantis", None, None)
            .unwrap_err();
        assert!(err.is_not_found());
        let err = cache
            .grid_factors(None, "Atlantis", None, None)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(source.query_count(), 1);
    }

    #[test]
    fn allowlist_sorted_and_deduplicated() {
        let (_, mut cache) = cache_over(InMemorySource::default().with_table(
            "s1sc_liquid",
            vec![
                FactorRow::new().with_text("fuel_type", "Petrol"),
                FactorRow::new().with_text("fuel_type", "Diesel"),
                FactorRow::new().with_text("fuel_type", "Petrol"),
                FactorRow::new().with_null("fuel_type"),
            ],
        ));
        let allowed = cache.allowed_fuel_types("liquid").unwrap();
        assert_eq!(allowed, Some(vec!["Diesel".to_string(), "Petrol".to_string()]));
    }

    #[test]
    fn allowlist_of_only_nulls_is_none_but_empty_table_is_empty() {
        let (_, mut cache) = cache_over(
            InMemorySource::default()
                .with_table(
                    "locations_states",
                    vec![FactorRow::new()
                        .with_text("country_name", "Narnia")
                        .with_null("state_name")],
                )
                .with_table("ghg_refrigerants_gwp_v2", vec![]),
        );
        assert_eq!(cache.allowed_states(Some("Narnia")).unwrap(), None);
        assert_eq!(cache.allowed_refrigerants().unwrap(), Some(vec![]));
    }

    #[test]
    fn allowlist_and_row_lookups_do_not_collide() {
        let (source, mut cache) = cache_over(InMemorySource::default().with_table(
            "s3c4_freight_factors",
            vec![FactorRow::new()
                .with_text("freight_type", "Rail")
                .with_number("kgCO2_unit", 0.03)],
        ));
        assert!(cache.freight_factors("Rail").unwrap().is_some());
        assert_eq!(
            cache.allowed_freight_types().unwrap(),
            Some(vec!["Rail".to_string()])
        );
        assert_eq!(source.query_count(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn waste_rows_without_unit_factor_are_ignored() {
        let (_, mut cache) = cache_over(InMemorySource::default().with_table(
            "s3c5_waste_factors",
            vec![
                FactorRow::new()
                    .with_text("waste_type", "Glass")
                    .with_text("waste_treatment_method", "Landfill")
                    .with_null("kgCO2_unit"),
                FactorRow::new()
                    .with_text("waste_type", "Glass")
                    .with_text("waste_treatment_method", "Recycled")
                    .with_number("kgCO2_unit", 0.02),
            ],
        ));
        let row = cache.waste_factors("Glass", None).unwrap().unwrap();
        assert_eq!(row.text("waste_treatment_method"), Some("Recycled"));
        assert!(cache.waste_factors("Glass", Some("Landfill")).unwrap().is_none());
    }

    #[test]
    fn source_errors_are_not_cached() {
        let (source, mut cache) = cache_over(InMemorySource::default());
        assert!(cache.freight_factors("Rail").is_err());
        assert!(cache.freight_factors("Rail").is_err());
        assert_eq!(source.query_count(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn fork_starts_empty() {
        let (source, mut cache) =
            cache_over(InMemorySource::default().with_table("s2ie_gef", grid_rows()));
        cache.grid_factors(None, "Malaysia", None, None).unwrap();
        let mut fork = cache.fork();
        assert!(fork.is_empty());
        fork.grid_factors(None, "Malaysia", None, None).unwrap();
        assert_eq!(source.query_count(), 2);
    }
}
