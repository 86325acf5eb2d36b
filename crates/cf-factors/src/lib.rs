//! cf-factors: emission factor access for carbonflow.
//!
//! Provides:
//! - Factor rows as fetched from the external factor database
//! - `FactorSource` trait isolating the rest of carbonflow from the database backend
//! - An in-memory source (YAML/JSON tables) used by the CLI and by tests
//! - `LookupCache`, the memoizing facade every calculator goes through
//! - GWP-based CO2-equivalent conversion
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cf_factors::{FactorRow, InMemorySource, LookupCache, calculate_co2e, get_relevant_factors};
//!
//! let source = InMemorySource::default().with_table(
//!     "s1sc_liquid",
//!     vec![FactorRow::new()
//!         .with_text("fuel_type", "Diesel")
//!         .with_number("kgCO2_litre", 2.68)],
//! );
//! let mut cache = LookupCache::new(Arc::new(source));
//! let row = cache.fuel_factors("liquid", "Diesel").unwrap().unwrap();
//! let relevant = get_relevant_factors(&row, "litre");
//! let co2e = calculate_co2e(&relevant, 100.0, Some("litre"), None);
//! assert!((co2e - 268.0).abs() < 1e-9);
//! ```

pub mod cache;
pub mod conversion;
pub mod error;
pub mod memory;
pub mod row;
pub mod source;
pub mod tables;

// Re-exports for ergonomics
pub use cache::{CacheStats, LookupCache};
pub use conversion::{Gas, GwpTable, calculate_co2e, co2e_for_unit, get_relevant_factors};
pub use error::{FactorError, FactorResult};
pub use memory::{FactorTables, InMemorySource};
pub use row::{FactorRow, FactorValue};
pub use source::{FactorSource, Filters};
pub use tables::TableNames;
