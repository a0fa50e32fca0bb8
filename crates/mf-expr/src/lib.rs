//! mf-expr: symbolic layer for the constraint compiler.
//!
//! Provides:
//! - `Expr`: real-valued arithmetic expressions over symbolic variables
//! - `Formula`: a relation (equality or inequality) between two expressions
//! - `Attribute` / `Domain` / `Variable` / `VariableRegistry`: one symbolic
//!   variable per (entity, physical-quantity) pair, allocated once and
//!   returned in first-requested order
//! - `ConstraintSystem`: the compiler's output, a flat formula set plus the
//!   uniform equality slack handed to the solving engine
//!
//! # Example
//!
//! ```
//! use mf_expr::{Attribute, Expr, Formula, VariableRegistry};
//!
//! let mut reg = VariableRegistry::new();
//! let q = reg.variable_for("in", Attribute::FlowRate, Attribute::FlowRate.default_domain());
//! let f = Formula::eq(Expr::var(q), Expr::constant(1e-9));
//! assert_eq!(reg.get(q).name, "in_flow_rate");
//! assert!(f.holds(&[1e-9], mf_core::Tolerances::default()));
//! ```

pub mod expr;
pub mod formula;
pub mod registry;
pub mod system;

// Re-exports for ergonomics
pub use expr::Expr;
pub use formula::{Formula, RelOp};
pub use registry::{Attribute, Domain, Variable, VariableRegistry};
pub use system::ConstraintSystem;
