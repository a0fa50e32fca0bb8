//! Relations between expressions.

use core::fmt;

use mf_core::{nearly_equal, Real, Tolerances, VarId};

use crate::expr::Expr;

/// Relational operator of a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    Eq,
    Le,
    Lt,
    Ge,
    Gt,
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelOp::Eq => "=",
            RelOp::Le => "<=",
            RelOp::Lt => "<",
            RelOp::Ge => ">=",
            RelOp::Gt => ">",
        };
        write!(f, "{s}")
    }
}

/// One equation or inequality over symbolic variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    pub lhs: Expr,
    pub op: RelOp,
    pub rhs: Expr,
}

impl Formula {
    pub fn new(lhs: Expr, op: RelOp, rhs: Expr) -> Self {
        Self { lhs, op, rhs }
    }

    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        Self::new(lhs, RelOp::Eq, rhs)
    }

    pub fn le(lhs: Expr, rhs: Expr) -> Self {
        Self::new(lhs, RelOp::Le, rhs)
    }

    pub fn lt(lhs: Expr, rhs: Expr) -> Self {
        Self::new(lhs, RelOp::Lt, rhs)
    }

    pub fn ge(lhs: Expr, rhs: Expr) -> Self {
        Self::new(lhs, RelOp::Ge, rhs)
    }

    pub fn gt(lhs: Expr, rhs: Expr) -> Self {
        Self::new(lhs, RelOp::Gt, rhs)
    }

    pub fn is_equality(&self) -> bool {
        self.op == RelOp::Eq
    }

    /// Collect every variable occurring on either side.
    pub fn collect_vars(&self, out: &mut Vec<VarId>) {
        self.lhs.collect_vars(out);
        self.rhs.collect_vars(out);
    }

    /// Check the relation against a point assignment. Equalities are
    /// checked up to the given tolerance, matching the slack the solving
    /// engine applies.
    pub fn holds(&self, assignment: &[Real], tol: Tolerances) -> bool {
        let l = self.lhs.eval(assignment);
        let r = self.rhs.eval(assignment);
        match self.op {
            RelOp::Eq => nearly_equal(l, r, tol),
            RelOp::Le => l <= r,
            RelOp::Lt => l < r,
            RelOp::Ge => l >= r,
            RelOp::Gt => l > r,
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}
