//! mf-compiler: lowers a schematic into a flat constraint system.
//!
//! `compile` walks ports, nodes and channels in insertion order, binds the
//! physical rule library to each element's variables, appends user
//! constraints, and returns a `ConstraintSystem` ready for a solving
//! engine. Elements with no registered rule set fail compilation; they are
//! never silently skipped.

pub mod compile;
pub mod error;
mod tjunction;

pub use compile::compile;
pub use error::{CompileError, CompileResult};
