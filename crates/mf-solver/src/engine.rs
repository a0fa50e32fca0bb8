//! The solving-engine boundary.
//!
//! A `Query` is the full, self-contained input to a nonlinear
//! real-arithmetic decision procedure: named variables with their initial
//! intervals, the formulas over them, and the uniform equality slack.
//! Formulas reference variables positionally (`VarId::index()` equals the
//! variable's position in `variables`).

use mf_core::Tolerances;
use mf_expr::Formula;

use crate::interval::Interval;

/// One named variable of a query with its admissible interval.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVariable {
    pub name: String,
    pub interval: Interval,
}

/// A satisfiability query over nonlinear real arithmetic.
#[derive(Debug, Clone)]
pub struct Query {
    pub variables: Vec<QueryVariable>,
    pub formulas: Vec<Formula>,
    pub slack: Tolerances,
}

/// Engine verdict. `Sat` carries one interval per query variable, in
/// query order, bounding the admissible values at the engine's precision.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Sat(Vec<Interval>),
    Unsat,
    Unknown,
}

/// A decision procedure for nonlinear real arithmetic. Implementations
/// must never fabricate a model: `Sat` intervals must satisfy every
/// formula up to the query's slack and the engine's precision.
pub trait SolvingEngine {
    fn check(&self, query: &Query) -> Answer;
}
