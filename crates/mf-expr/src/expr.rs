//! Arithmetic expressions over symbolic real variables.

use core::fmt;
use std::ops;

use mf_core::{Real, VarId};

/// A real-valued arithmetic expression.
///
/// Expressions are built by the physical rule library and by user
/// constraints, then handed to the solving engine inside formulas. The
/// node set is deliberately small: it is exactly what the physical laws
/// need (polynomials, quotients and square roots).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(Real),
    Var(VarId),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    /// Integer power, exponent >= 1. `Expr::powi` folds a zero exponent
    /// into `Const(1.0)` so the engine never sees one.
    Pow(Box<Expr>, u32),
    Sqrt(Box<Expr>),
}

impl Expr {
    pub fn constant(value: Real) -> Self {
        Expr::Const(value)
    }

    pub fn var(id: VarId) -> Self {
        Expr::Var(id)
    }

    pub fn powi(self, exp: u32) -> Self {
        if exp == 0 {
            return Expr::Const(1.0);
        }
        Expr::Pow(Box::new(self), exp)
    }

    pub fn sqrt(self) -> Self {
        Expr::Sqrt(Box::new(self))
    }

    /// Sum a sequence of expressions; an empty sequence sums to zero.
    pub fn sum<I: IntoIterator<Item = Expr>>(terms: I) -> Self {
        let mut iter = terms.into_iter();
        match iter.next() {
            None => Expr::Const(0.0),
            Some(first) => iter.fold(first, |acc, t| acc + t),
        }
    }

    /// Evaluate against an assignment indexed by `VarId::index()`.
    pub fn eval(&self, assignment: &[Real]) -> Real {
        match self {
            Expr::Const(c) => *c,
            Expr::Var(id) => assignment[id.index() as usize],
            Expr::Neg(a) => -a.eval(assignment),
            Expr::Add(a, b) => a.eval(assignment) + b.eval(assignment),
            Expr::Sub(a, b) => a.eval(assignment) - b.eval(assignment),
            Expr::Mul(a, b) => a.eval(assignment) * b.eval(assignment),
            Expr::Div(a, b) => a.eval(assignment) / b.eval(assignment),
            Expr::Pow(a, n) => a.eval(assignment).powi(*n as i32),
            Expr::Sqrt(a) => a.eval(assignment).sqrt(),
        }
    }

    /// Collect every variable occurring in the expression.
    pub fn collect_vars(&self, out: &mut Vec<VarId>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(id) => out.push(*id),
            Expr::Neg(a) | Expr::Sqrt(a) | Expr::Pow(a, _) => a.collect_vars(out),
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) => {
                a.collect_vars(out);
                b.collect_vars(out);
            }
        }
    }
}

impl From<Real> for Expr {
    fn from(value: Real) -> Self {
        Expr::Const(value)
    }
}

impl From<VarId> for Expr {
    fn from(id: VarId) -> Self {
        Expr::Var(id)
    }
}

impl ops::Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }
}

impl ops::Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::Add(Box::new(self), Box::new(rhs))
    }
}

impl ops::Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl ops::Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl ops::Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::Div(Box::new(self), Box::new(rhs))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{c}"),
            Expr::Var(id) => write!(f, "v{}", id.index()),
            Expr::Neg(a) => write!(f, "(-{a})"),
            Expr::Add(a, b) => write!(f, "({a} + {b})"),
            Expr::Sub(a, b) => write!(f, "({a} - {b})"),
            Expr::Mul(a, b) => write!(f, "({a} * {b})"),
            Expr::Div(a, b) => write!(f, "({a} / {b})"),
            Expr::Pow(a, n) => write!(f, "{a}^{n}"),
            Expr::Sqrt(a) => write!(f, "sqrt({a})"),
        }
    }
}
