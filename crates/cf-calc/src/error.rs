//! Error types for emission calculation.

use cf_core::CoreError;
use cf_factors::FactorError;
use thiserror::Error;

/// Errors that abort the calculation of a single record.
///
/// Missing optional data never produces an error; the calculator evaluates fewer
/// methods instead.
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Factor lookup failed: {0}")]
    Lookup(#[from] FactorError),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

pub type CalcResult<T> = Result<T, CalcError>;
