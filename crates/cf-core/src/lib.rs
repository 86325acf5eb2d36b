//! cf-core: stable foundation for carbonflow.
//!
//! Contains:
//! - units (uom mass types + constructors, gas mass bases)
//! - numeric (rounding, clamping and guarded ratios)
//! - ids (record ids and sequential result indices)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
