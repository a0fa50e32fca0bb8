//! User-supplied design constraints.
//!
//! A constraint is a relation over named physical quantities, e.g. "the
//! flow rates of these two channels are equal". It is stored symbolically
//! and lowered onto registered variables at compile time.

use std::ops;

use mf_core::Real;
use mf_expr::{Attribute, RelOp};

/// Reference to one (entity, attribute) quantity, e.g. the flow rate of
/// channel `in_out`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quantity {
    pub entity: String,
    pub attr: Attribute,
}

impl Quantity {
    pub fn new(entity: impl Into<String>, attr: Attribute) -> Self {
        Self {
            entity: entity.into(),
            attr,
        }
    }

    pub fn pressure(entity: impl Into<String>) -> Self {
        Self::new(entity, Attribute::Pressure)
    }

    pub fn flow_rate(entity: impl Into<String>) -> Self {
        Self::new(entity, Attribute::FlowRate)
    }

    pub fn width(entity: impl Into<String>) -> Self {
        Self::new(entity, Attribute::Width)
    }

    pub fn height(entity: impl Into<String>) -> Self {
        Self::new(entity, Attribute::Height)
    }

    pub fn length(entity: impl Into<String>) -> Self {
        Self::new(entity, Attribute::Length)
    }

    pub fn resistance(entity: impl Into<String>) -> Self {
        Self::new(entity, Attribute::Resistance)
    }

    pub fn droplet_volume(entity: impl Into<String>) -> Self {
        Self::new(entity, Attribute::DropletVolume)
    }
}

/// Expression over quantities and literals. Mirrors `mf_expr::Expr` but
/// with name-based leaves; the compiler resolves the names.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintExpr {
    Const(Real),
    Quantity(Quantity),
    Neg(Box<ConstraintExpr>),
    Add(Box<ConstraintExpr>, Box<ConstraintExpr>),
    Sub(Box<ConstraintExpr>, Box<ConstraintExpr>),
    Mul(Box<ConstraintExpr>, Box<ConstraintExpr>),
    Div(Box<ConstraintExpr>, Box<ConstraintExpr>),
    Pow(Box<ConstraintExpr>, u32),
    Sqrt(Box<ConstraintExpr>),
}

impl ConstraintExpr {
    pub fn powi(self, exp: u32) -> Self {
        ConstraintExpr::Pow(Box::new(self), exp)
    }

    pub fn sqrt(self) -> Self {
        ConstraintExpr::Sqrt(Box::new(self))
    }

    /// Collect every quantity referenced by this expression.
    pub fn collect_quantities<'a>(&'a self, out: &mut Vec<&'a Quantity>) {
        match self {
            ConstraintExpr::Const(_) => {}
            ConstraintExpr::Quantity(q) => out.push(q),
            ConstraintExpr::Neg(a) | ConstraintExpr::Sqrt(a) | ConstraintExpr::Pow(a, _) => {
                a.collect_quantities(out)
            }
            ConstraintExpr::Add(a, b)
            | ConstraintExpr::Sub(a, b)
            | ConstraintExpr::Mul(a, b)
            | ConstraintExpr::Div(a, b) => {
                a.collect_quantities(out);
                b.collect_quantities(out);
            }
        }
    }
}

impl From<Real> for ConstraintExpr {
    fn from(value: Real) -> Self {
        ConstraintExpr::Const(value)
    }
}

impl From<Quantity> for ConstraintExpr {
    fn from(q: Quantity) -> Self {
        ConstraintExpr::Quantity(q)
    }
}

impl ops::Neg for ConstraintExpr {
    type Output = ConstraintExpr;
    fn neg(self) -> ConstraintExpr {
        ConstraintExpr::Neg(Box::new(self))
    }
}

impl ops::Add for ConstraintExpr {
    type Output = ConstraintExpr;
    fn add(self, rhs: ConstraintExpr) -> ConstraintExpr {
        ConstraintExpr::Add(Box::new(self), Box::new(rhs))
    }
}

impl ops::Sub for ConstraintExpr {
    type Output = ConstraintExpr;
    fn sub(self, rhs: ConstraintExpr) -> ConstraintExpr {
        ConstraintExpr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl ops::Mul for ConstraintExpr {
    type Output = ConstraintExpr;
    fn mul(self, rhs: ConstraintExpr) -> ConstraintExpr {
        ConstraintExpr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl ops::Div for ConstraintExpr {
    type Output = ConstraintExpr;
    fn div(self, rhs: ConstraintExpr) -> ConstraintExpr {
        ConstraintExpr::Div(Box::new(self), Box::new(rhs))
    }
}

/// One user constraint: a relation between two quantity expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct UserConstraint {
    pub lhs: ConstraintExpr,
    pub op: RelOp,
    pub rhs: ConstraintExpr,
}

impl UserConstraint {
    pub fn new(lhs: impl Into<ConstraintExpr>, op: RelOp, rhs: impl Into<ConstraintExpr>) -> Self {
        Self {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
        }
    }

    pub fn eq(lhs: impl Into<ConstraintExpr>, rhs: impl Into<ConstraintExpr>) -> Self {
        Self::new(lhs, RelOp::Eq, rhs)
    }

    pub fn le(lhs: impl Into<ConstraintExpr>, rhs: impl Into<ConstraintExpr>) -> Self {
        Self::new(lhs, RelOp::Le, rhs)
    }

    pub fn ge(lhs: impl Into<ConstraintExpr>, rhs: impl Into<ConstraintExpr>) -> Self {
        Self::new(lhs, RelOp::Ge, rhs)
    }

    /// Equal flow rates between two named entities.
    pub fn equal_flow_rates(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::eq(Quantity::flow_rate(a), Quantity::flow_rate(b))
    }

    /// Every quantity referenced on either side.
    pub fn quantities(&self) -> Vec<&Quantity> {
        let mut out = Vec::new();
        self.lhs.collect_quantities(&mut out);
        self.rhs.collect_quantities(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_flow_rates_references_both_entities() {
        let c = UserConstraint::equal_flow_rates("a_b", "b_c");
        let qs = c.quantities();
        assert_eq!(qs.len(), 2);
        assert_eq!(qs[0].entity, "a_b");
        assert_eq!(qs[1].entity, "b_c");
        assert_eq!(c.op, RelOp::Eq);
    }

    #[test]
    fn arithmetic_over_quantities() {
        let c = UserConstraint::ge(
            ConstraintExpr::from(Quantity::width("ch")) * ConstraintExpr::from(2.0),
            Quantity::height("ch"),
        );
        assert_eq!(c.quantities().len(), 2);
    }
}
