//! Integration tests for the factor lookup cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cf_factors::{
    FactorError, FactorResult, FactorRow, FactorSource, Filters, InMemorySource, LookupCache,
    TableNames,
};

fn fuel_source() -> InMemorySource {
    InMemorySource::default()
        .with_table(
            "s1sc_liquid",
            vec![
                FactorRow::new()
                    .with_text("fuel_type", "Diesel")
                    .with_number("kgCO2_litre", 2.60)
                    .with_number("year", 2021.0),
                FactorRow::new()
                    .with_text("fuel_type", "Diesel")
                    .with_number("kgCO2_litre", 2.68)
                    .with_number("year", 2023.0),
                FactorRow::new()
                    .with_text("fuel_type", "Petrol")
                    .with_number("kgCO2_litre", 2.31)
                    .with_number("year", 2023.0),
            ],
        )
        .with_table("fuels_2024_liquid", vec![])
}

#[test]
fn repeated_lookups_query_source_once() {
    let source = Arc::new(fuel_source());
    let mut cache = LookupCache::new(source.clone());

    for _ in 0..5 {
        let row = cache.fuel_factors("liquid", "Diesel").unwrap().unwrap();
        assert_eq!(row.number("kgCO2_litre"), Some(2.68));
    }
    assert_eq!(source.query_count(), 1);
    assert_eq!(cache.stats().misses, 1);
    assert_eq!(cache.stats().hits, 4);
}

#[test]
fn missing_rows_are_remembered() {
    let source = Arc::new(fuel_source());
    let mut cache = LookupCache::new(source.clone());

    assert!(cache.fuel_factors("liquid", "Kerosene").unwrap().is_none());
    assert!(cache.fuel_factors("liquid", "Kerosene").unwrap().is_none());
    assert_eq!(source.query_count(), 1);
}

#[test]
fn table_overrides_redirect_lookups() {
    let source = Arc::new(fuel_source());
    let tables = TableNames {
        fuel_table_prefix: "fuels_2024".to_string(),
        ..TableNames::default()
    };
    let mut cache = LookupCache::with_tables(source, tables);
    assert!(cache.fuel_factors("liquid", "Diesel").unwrap().is_none());
    assert_eq!(cache.allowed_fuel_types("liquid").unwrap(), Some(vec![]));
}

struct FlakySource {
    calls: AtomicUsize,
}

impl FactorSource for FlakySource {
    fn query(&self, _table: &str, _filters: &Filters) -> FactorResult<Vec<FactorRow>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(FactorError::Source {
            message: "connection reset".to_string(),
        })
    }
}

#[test]
fn backend_failures_propagate_and_retry() {
    let source = Arc::new(FlakySource {
        calls: AtomicUsize::new(0),
    });
    let mut cache = LookupCache::new(source.clone());

    let err = cache.refrigerant_gwp("R-410A").unwrap_err();
    assert!(matches!(err, FactorError::Source { .. }));
    assert!(cache.refrigerant_gwp("R-410A").is_err());
    assert_eq!(source.calls.load(Ordering::Relaxed), 2);
}

#[test]
fn workers_share_source_but_not_cache() {
    let source = Arc::new(fuel_source());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let source = source.clone();
            std::thread::spawn(move || {
                let mut cache = LookupCache::new(source);
                cache.fuel_factors("liquid", "Petrol").unwrap().is_some()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(source.query_count(), 4);
}
