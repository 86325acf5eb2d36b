//! Batch runs: many records through one accumulator.

use cf_records::{RecordBatch, validate_records};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::engine::Engine;
use crate::error::AppResult;
use crate::report::{BatchReport, RecordFailure};

/// Validate and calculate every record of `batch` in order.
///
/// A record whose calculation fails (a missing grid factor, a source error) is listed
/// in the report's failures and the run continues with the next record. Invalid input
/// fails the whole batch before anything is calculated.
pub fn run_batch(engine: &Engine, batch: &RecordBatch) -> AppResult<BatchReport> {
    validate_records(&batch.records)?;

    let mut acc = engine.accumulator();
    let mut failures = Vec::new();

    for record in &batch.records {
        let record_id = record.id();
        let category = record.category();
        if let Err(err) = acc.add_data(record.clone()) {
            warn!(%record_id, %category, error = %err, "record calculation failed");
            failures.push(RecordFailure {
                record_id,
                category,
                message: err.to_string(),
            });
        }
    }

    let report = BatchReport::from_accumulator(batch.name.clone(), &acc, failures);
    info!(
        batch = batch.name.as_deref().unwrap_or("<unnamed>"),
        records = report.records.len(),
        failures = report.failures.len(),
        total_kg = report.total_emissions_kg,
        "batch calculated"
    );
    Ok(report)
}

/// Run independent batches on the rayon pool.
///
/// Every batch gets its own cache and accumulator; only the factor source is
/// shared. Reports come back in input order.
pub fn run_batches_parallel(engine: &Engine, batches: &[RecordBatch]) -> Vec<AppResult<BatchReport>> {
    batches
        .par_iter()
        .map(|batch| run_batch(engine, batch))
        .collect()
}
