//! cf-calc: turns activity records into CO2e amounts.
//!
//! Every category has a calculator that evaluates the estimation methods its
//! record supports, each lowering a data-quality score (lower is better).
//! The [`Accumulator`] keeps every outcome, selects the best one per record and
//! maintains the running emission and removal totals.

pub mod accumulator;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod financed;
pub mod method;
pub mod scope1;
pub mod scope2;
pub mod scope3;

pub use accumulator::{Accumulator, AddOutcome, CalculatedEmission, Rejection};
pub use context::CalcContext;
pub use dispatch::evaluate;
pub use error::{CalcError, CalcResult};
pub use method::{BEST_QUALITY, MetadataEntry, Method, MethodSet, ResultKind, WORST_QUALITY};
