//! mf-solver: solver adapter plus a built-in decision procedure.
//!
//! The adapter (`solve`, `solve_with_engine`, `solve_schematic`) turns a
//! compiled `ConstraintSystem` into a `Query`, hands it to a
//! `SolvingEngine` and decodes the verdict into an `Outcome`. The built-in
//! `IcpEngine` is an interval branch-and-prune procedure with HC4
//! contraction: satisfiable answers come back as per-variable intervals at
//! the engine's precision, and exceeding the step or wall-clock budget
//! yields `Unknown`, never a fabricated model.

pub mod adapter;
mod contract;
pub mod engine;
pub mod icp;
pub mod interval;
pub mod outcome;

pub use adapter::{encode, solve, solve_schematic, solve_with_engine};
pub use engine::{Answer, Query, QueryVariable, SolvingEngine};
pub use icp::{IcpConfig, IcpEngine};
pub use interval::Interval;
pub use outcome::{Outcome, Solution};
