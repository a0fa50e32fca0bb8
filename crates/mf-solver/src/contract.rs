//! HC4 forward-backward contraction.
//!
//! One pass per formula: evaluate the expression tree bottom-up over the
//! current box (forward), then push the relation's target interval back
//! down to the variable leaves (backward), narrowing their intervals.
//! Contraction only ever removes values that cannot satisfy the formula,
//! so an emptied interval proves the box contains no solution.

use mf_core::{Real, Tolerances};
use mf_expr::{Expr, Formula, RelOp};

use crate::interval::Interval;

/// Result of contracting a box against one formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contraction {
    /// A variable interval became empty: no solution in this box.
    Empty,
    Changed,
    Unchanged,
}

/// Plain interval evaluation of an expression over a box.
pub(crate) fn eval(e: &Expr, boxv: &[Interval]) -> Interval {
    match e {
        Expr::Const(c) => Interval::point(*c),
        Expr::Var(id) => boxv[id.index() as usize],
        Expr::Neg(a) => eval(a, boxv).neg(),
        Expr::Add(a, b) => eval(a, boxv).add(eval(b, boxv)),
        Expr::Sub(a, b) => eval(a, boxv).sub(eval(b, boxv)),
        Expr::Mul(a, b) => eval(a, boxv).mul(eval(b, boxv)),
        Expr::Div(a, b) => eval(a, boxv).div(eval(b, boxv)),
        Expr::Pow(a, n) => eval(a, boxv).powi(*n),
        Expr::Sqrt(a) => eval(a, boxv).sqrt(),
    }
}

/// The box certainly satisfies the formula: every point in it does.
/// Equalities are certain up to the uniform slack.
pub(crate) fn certainly_holds(f: &Formula, slack: Tolerances, boxv: &[Interval]) -> bool {
    let l = eval(&f.lhs, boxv);
    let r = eval(&f.rhs, boxv);
    if l.is_empty() || r.is_empty() {
        return false;
    }
    match f.op {
        RelOp::Eq => {
            let eps = slack.slack_for(l.magnitude().max(r.magnitude()));
            let d = l.sub(r);
            -eps <= d.lo && d.hi <= eps
        }
        RelOp::Le => l.hi <= r.lo,
        RelOp::Lt => l.hi < r.lo,
        RelOp::Ge => l.lo >= r.hi,
        RelOp::Gt => l.lo > r.hi,
    }
}

/// Contract the box against one formula.
pub(crate) fn contract(f: &Formula, slack: Tolerances, boxv: &mut [Interval]) -> Contraction {
    let l = forward(&f.lhs, boxv);
    let r = forward(&f.rhs, boxv);
    // Target interval for each side, derived from the other side's range.
    // Strict inequalities contract like their non-strict forms; the point
    // cases they exclude have measure zero under interval reasoning.
    let (l_target, r_target) = match f.op {
        RelOp::Eq => {
            let eps = slack.slack_for(l.itv.magnitude().max(r.itv.magnitude()));
            (r.itv.inflate(eps), l.itv.inflate(eps))
        }
        RelOp::Le | RelOp::Lt => (
            Interval::new(Real::NEG_INFINITY, r.itv.hi),
            Interval::new(l.itv.lo, Real::INFINITY),
        ),
        RelOp::Ge | RelOp::Gt => (
            Interval::new(r.itv.lo, Real::INFINITY),
            Interval::new(Real::NEG_INFINITY, l.itv.hi),
        ),
    };
    let mut changed = false;
    if !backward(&f.lhs, &l, l_target, boxv, &mut changed) {
        return Contraction::Empty;
    }
    if !backward(&f.rhs, &r, r_target, boxv, &mut changed) {
        return Contraction::Empty;
    }
    if changed {
        Contraction::Changed
    } else {
        Contraction::Unchanged
    }
}

/// Forward-evaluated expression tree: one interval per node.
struct Evaluated {
    itv: Interval,
    children: Vec<Evaluated>,
}

fn leaf(itv: Interval) -> Evaluated {
    Evaluated {
        itv,
        children: Vec::new(),
    }
}

fn unary(itv: Interval, a: Evaluated) -> Evaluated {
    Evaluated {
        itv,
        children: vec![a],
    }
}

fn binary(itv: Interval, a: Evaluated, b: Evaluated) -> Evaluated {
    Evaluated {
        itv,
        children: vec![a, b],
    }
}

fn forward(e: &Expr, boxv: &[Interval]) -> Evaluated {
    match e {
        Expr::Const(c) => leaf(Interval::point(*c)),
        Expr::Var(id) => leaf(boxv[id.index() as usize]),
        Expr::Neg(a) => {
            let a = forward(a, boxv);
            unary(a.itv.neg(), a)
        }
        Expr::Add(a, b) => {
            let (a, b) = (forward(a, boxv), forward(b, boxv));
            binary(a.itv.add(b.itv), a, b)
        }
        Expr::Sub(a, b) => {
            let (a, b) = (forward(a, boxv), forward(b, boxv));
            binary(a.itv.sub(b.itv), a, b)
        }
        Expr::Mul(a, b) => {
            let (a, b) = (forward(a, boxv), forward(b, boxv));
            binary(a.itv.mul(b.itv), a, b)
        }
        Expr::Div(a, b) => {
            let (a, b) = (forward(a, boxv), forward(b, boxv));
            binary(a.itv.div(b.itv), a, b)
        }
        Expr::Pow(a, n) => {
            let a = forward(a, boxv);
            unary(a.itv.powi(*n), a)
        }
        Expr::Sqrt(a) => {
            let a = forward(a, boxv);
            unary(a.itv.sqrt(), a)
        }
    }
}

/// Narrow this node to `target` and project onto the children. Returns
/// false when a variable interval empties.
fn backward(
    e: &Expr,
    ev: &Evaluated,
    target: Interval,
    boxv: &mut [Interval],
    changed: &mut bool,
) -> bool {
    let refined = ev.itv.intersect(target);
    if refined.is_empty() {
        return false;
    }
    match e {
        Expr::Const(_) => true,
        Expr::Var(id) => {
            let i = id.index() as usize;
            let cur = boxv[i];
            let new = cur.intersect(refined);
            if new.is_empty() {
                boxv[i] = new;
                return false;
            }
            if new.lo > cur.lo || new.hi < cur.hi {
                *changed = true;
                boxv[i] = new;
            }
            true
        }
        Expr::Neg(a) => backward(a, &ev.children[0], refined.neg(), boxv, changed),
        Expr::Add(a, b) => {
            let (ia, ib) = (ev.children[0].itv, ev.children[1].itv);
            backward(a, &ev.children[0], refined.sub(ib), boxv, changed)
                && backward(b, &ev.children[1], refined.sub(ia), boxv, changed)
        }
        Expr::Sub(a, b) => {
            let (ia, ib) = (ev.children[0].itv, ev.children[1].itv);
            backward(a, &ev.children[0], refined.add(ib), boxv, changed)
                && backward(b, &ev.children[1], ia.sub(refined), boxv, changed)
        }
        Expr::Mul(a, b) => {
            let (ia, ib) = (ev.children[0].itv, ev.children[1].itv);
            backward(a, &ev.children[0], refined.div(ib), boxv, changed)
                && backward(b, &ev.children[1], refined.div(ia), boxv, changed)
        }
        Expr::Div(a, b) => {
            let (ia, ib) = (ev.children[0].itv, ev.children[1].itv);
            backward(a, &ev.children[0], refined.mul(ib), boxv, changed)
                && backward(b, &ev.children[1], ia.div(refined), boxv, changed)
        }
        Expr::Pow(a, n) => {
            let inner = ev.children[0].itv;
            backward(a, &ev.children[0], refined.root(*n, inner), boxv, changed)
        }
        Expr::Sqrt(a) => {
            let clamped = refined.intersect(Interval::new(0.0, Real::INFINITY));
            backward(a, &ev.children[0], clamped.powi(2), boxv, changed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::Id;

    fn x() -> Expr {
        Expr::var(Id::from_index(0))
    }

    fn y() -> Expr {
        Expr::var(Id::from_index(1))
    }

    #[test]
    fn linear_equality_pins_the_variable() {
        // x + 2 = 5 over x in [0, 10]
        let f = Formula::eq(x() + Expr::constant(2.0), Expr::constant(5.0));
        let mut boxv = vec![Interval::new(0.0, 10.0)];
        let c = contract(&f, Tolerances::default(), &mut boxv);
        assert_eq!(c, Contraction::Changed);
        assert!(boxv[0].contains(3.0));
        assert!(boxv[0].width() < 1e-4);
    }

    #[test]
    fn contradictory_equalities_empty_the_box() {
        let pin2 = Formula::eq(x(), Expr::constant(2.0));
        let pin5 = Formula::eq(x(), Expr::constant(5.0));
        let mut boxv = vec![Interval::new(0.0, 10.0)];
        assert_eq!(contract(&pin2, Tolerances::default(), &mut boxv), Contraction::Changed);
        assert_eq!(contract(&pin5, Tolerances::default(), &mut boxv), Contraction::Empty);
    }

    #[test]
    fn inequality_contracts_one_side() {
        // x <= y with y in [0, 4]
        let f = Formula::le(x(), y());
        let mut boxv = vec![Interval::new(0.0, 10.0), Interval::new(0.0, 4.0)];
        let c = contract(&f, Tolerances::default(), &mut boxv);
        assert_eq!(c, Contraction::Changed);
        assert_eq!(boxv[0], Interval::new(0.0, 4.0));
        assert_eq!(boxv[1], Interval::new(0.0, 4.0));
    }

    #[test]
    fn square_root_projection_respects_sign() {
        // x^2 = 9 over x in [0, 10]
        let f = Formula::eq(x().powi(2), Expr::constant(9.0));
        let mut boxv = vec![Interval::new(0.0, 10.0)];
        contract(&f, Tolerances::default(), &mut boxv);
        assert!(boxv[0].contains(3.0));
        assert!(!boxv[0].contains(4.0));
        assert!(boxv[0].lo > 2.9);
    }

    #[test]
    fn products_propagate_both_ways() {
        // x * y = 12 with x pinned to 3
        let pin = Formula::eq(x(), Expr::constant(3.0));
        let prod = Formula::eq(x() * y(), Expr::constant(12.0));
        let mut boxv = vec![Interval::new(0.0, 10.0), Interval::new(0.0, 10.0)];
        contract(&pin, Tolerances::default(), &mut boxv);
        contract(&prod, Tolerances::default(), &mut boxv);
        assert!(boxv[1].contains(4.0));
        assert!(boxv[1].width() < 1e-3);
    }

    #[test]
    fn certainty_accounts_for_slack() {
        let f = Formula::eq(x(), Expr::constant(1.0));
        let tol = Tolerances::default();
        let tight = vec![Interval::new(1.0 - 1e-13, 1.0 + 1e-13)];
        assert!(certainly_holds(&f, tol, &tight));
        let loose = vec![Interval::new(0.5, 1.5)];
        assert!(!certainly_holds(&f, tol, &loose));
    }
}
