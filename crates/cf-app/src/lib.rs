//! Shared application service layer for carbonflow.
//!
//! Loads configuration and factor tables, runs record batches through the
//! calculation engine and produces serializable reports for the CLI.

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;

pub use batch::{run_batch, run_batches_parallel};
pub use config::EngineConfig;
pub use engine::{AllowList, Engine};
pub use error::{AppError, AppResult};
pub use report::{BatchReport, RecordFailure, RecordSummary};
