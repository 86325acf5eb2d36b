//! Integration tests for batch runs over in-memory factor tables.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use cf_app::{AllowList, AppError, Engine, EngineConfig, run_batch, run_batches_parallel};
use cf_calc::Method;
use cf_core::RecordId;
use cf_factors::{FactorRow, InMemorySource};
use cf_records::{
    ActivityRecord, BusinessStay, Exposure, ListedEquity, PurchasedPower, RecordBatch, RecordMeta,
    Scope, StationaryCombustion,
};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn source() -> InMemorySource {
    InMemorySource::default()
        .with_table(
            "s1sc_liquid",
            vec![
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
        .with_table(
            "s2ie_gef",
            vec![
                FactorRow::new()
                    .with_text("country", "Malaysia")
                    .with_number("kgCO2_kwh", 0.5)
                    .with_number("year", 2023.0),
            ],
        )
}

fn engine(config: EngineConfig) -> Engine {
    Engine::new(Arc::new(source()), config)
}

fn meta(id: u128) -> RecordMeta {
    RecordMeta {
        id: RecordId::from_u128(id),
        ..RecordMeta::default()
    }
}

fn diesel(id: u128, litres: f64) -> ActivityRecord {
    ActivityRecord::StationaryCombustion(StationaryCombustion {
        meta: meta(id),
        fuel_type: Some("Diesel".into()),
        fuel_use: Some(litres),
        fuel_unit: Some("litre".into()),
        ..StationaryCombustion::default()
    })
}

fn electricity(id: u128, country: &str, kwh: f64) -> ActivityRecord {
    ActivityRecord::PurchasedPower(PurchasedPower {
        meta: meta(id),
        country: Some(country.into()),
        energy_use: Some(kwh),
        ..PurchasedPower::default()
    })
}

fn equity(id: u128, share: f64, reported: f64) -> ActivityRecord {
    ActivityRecord::ListedEquity(ListedEquity {
        meta: meta(id),
        exposure: Exposure {
            attribution_share: Some(share),
            reported_emissions: Some(reported),
            ..Exposure::default()
        },
        ..ListedEquity::default()
    })
}

#[test]
fn batch_continues_past_missing_grid_factor() {
    let batch = RecordBatch::new(
        "mixed",
        vec![
            diesel(1, 10.0),
            electricity(2, "Atlantis", 100.0),
            equity(3, 0.1, 10000.0),
        ],
    );
    let report = run_batch(&engine(EngineConfig::default()), &batch).unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].record_id, RecordId::from_u128(2));

    assert!((report.emissions_by_scope[&Scope::Scope1] - 26.8).abs() < 1e-9);
    assert_eq!(report.emissions_by_scope[&Scope::Financed], 1000.0);
    assert!((report.total_emissions_kg - 1026.8).abs() < 1e-9);
    assert!((report.total_emissions_tonnes - 1.0268).abs() < 1e-12);
    assert_eq!(report.records[0].best_method, Some(Method::PhysicalEmissions));
}

#[test]
fn records_without_factors_are_listed_as_uncalculated() {
    let peat = ActivityRecord::StationaryCombustion(StationaryCombustion {
        meta: meta(2),
        fuel_type: Some("Peat".into()),
        fuel_use: Some(5.0),
        fuel_unit: Some("litre".into()),
        ..StationaryCombustion::default()
    });
    let batch = RecordBatch::new("peat", vec![diesel(1, 10.0), peat]);
    let report = run_batch(&engine(EngineConfig::default()), &batch).unwrap();

    assert_eq!(report.records.len(), 2);
    assert!(report.failures.is_empty());
    let missing: Vec<RecordId> = report.uncalculated().map(|r| r.record_id).collect();
    assert_eq!(missing, vec![RecordId::from_u128(2)]);
    assert_eq!(report.records[1].best_method, None);
    assert!((report.total_emissions_kg - 26.8).abs() < 1e-9);
}

#[test]
fn duplicate_ids_fail_the_batch() {
    let batch = RecordBatch::new("dupes", vec![diesel(1, 1.0), diesel(1, 2.0)]);
    let err = run_batch(&engine(EngineConfig::default()), &batch).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn scope_restricted_runs_reject_other_scopes() {
    let config = EngineConfig {
        scope: Some(Scope::Scope2),
        ..EngineConfig::default()
    };
    let batch = RecordBatch::new(
        "scope2",
        vec![electricity(1, "Malaysia", 200.0), diesel(2, 5.0)],
    );
    let report = run_batch(&engine(config), &batch).unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.rejections.len(), 1);
    assert_eq!(report.rejections[0].record_id, RecordId::from_u128(2));
    assert!((report.total_emissions_kg - 100.0).abs() < 1e-9);
}

#[test]
fn parallel_runs_match_sequential_runs() {
    let engine = engine(EngineConfig::default());
    let batches: Vec<_> = (0..6)
        .map(|i| {
            RecordBatch::new(
                format!("batch-{i}"),
                vec![
                    diesel(10 * i + 1, i as f64),
                    electricity(10 * i + 2, "Malaysia", 100.0 * i as f64),
                    ActivityRecord::BusinessStay(BusinessStay {
                        meta: meta(10 * i + 3),
                        no_of_nights: Some(2.0),
                        hotel_emission_factor: Some(15.0),
                        ..BusinessStay::default()
                    }),
                ],
            )
        })
        .collect();

    let parallel = run_batches_parallel(&engine, &batches);
    assert_eq!(parallel.len(), batches.len());
    for (batch, report) in batches.iter().zip(parallel) {
        let report = report.unwrap();
        let sequential = run_batch(&engine, batch).unwrap();
        assert_eq!(report.name, batch.name);
        assert_eq!(report.total_emissions_kg, sequential.total_emissions_kg);
        assert_eq!(report.records, sequential.records);
    }
}

#[test]
fn allowlists_come_from_factor_tables() {
    let engine = engine(EngineConfig::default());
    let fuels = engine.allowed(AllowList::FuelTypes, Some("liquid")).unwrap();
    assert_eq!(fuels, Some(vec!["Diesel".to_string(), "Petrol".to_string()]));

    let err = engine.allowed(AllowList::FuelTypes, Some("plasma")).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[test]
fn engine_loads_factor_file_and_writes_report() {
    let dir = unique_temp_dir("cf_app_engine");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let factors = dir.join("factors.yaml");
    fs::write(
        &factors,
        "s1sc_liquid:\n  - fuel_type: Diesel\n    kgCO2_litre: 2.0\n    year: 2024\n",
    )
    .expect("failed to write factor file");

    let engine = Engine::from_factor_file(&factors, EngineConfig::default()).unwrap();
    let report = run_batch(&engine, &RecordBatch::new("file", vec![diesel(1, 3.0)])).unwrap();
    assert!((report.total_emissions_kg - 6.0).abs() < 1e-9);

    let out = dir.join("report.json");
    report.save_json(&out).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["name"], "file");
    assert_eq!(json["records"][0]["category"], "stationary_combustion");
    assert_eq!(json["records"][0]["best_method"], "physical_emissions");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn saved_config_loads_back() {
    let dir = unique_temp_dir("cf_app_config");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("config.yaml");

    let mut config = EngineConfig::default();
    config.gwp.ch4 = 28.0;
    config.scope = Some(Scope::Scope2);
    config.save_yaml(&path).unwrap();

    let loaded = EngineConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let err = config.save_yaml(&dir.join("missing").join("config.yaml")).unwrap_err();
    assert!(matches!(err, AppError::FileWrite { .. }));

    let _ = fs::remove_dir_all(&dir);
}
