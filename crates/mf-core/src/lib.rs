//! mf-core: stable foundation for microflow.
//!
//! Arena handles (`Id` and its aliases) plus the numeric ground types
//! every other crate builds on: `Real`, `Tolerances`, `nearly_equal`.

pub mod ids;
pub mod numeric;

pub use ids::*;
pub use numeric::*;
