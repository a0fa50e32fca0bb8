//! Interval branch-and-prune engine.
//!
//! Each box from the search stack is contracted to an HC4 fixpoint over
//! all formulas. An emptied box is discarded. A box where every formula
//! certainly holds is a model; a box whose every variable is narrower
//! than the precision is a delta-model (no point in it violates any
//! formula by more than the slack plus the precision). Anything else is
//! split on the variable with the widest relative interval.

use std::time::{Duration, Instant};

use mf_core::{Real, Tolerances};
use mf_expr::Formula;
use tracing::{debug, trace};

use crate::contract::{certainly_holds, contract, Contraction};
use crate::engine::{Answer, Query, SolvingEngine};
use crate::interval::Interval;

/// Tuning knobs of the branch-and-prune search.
#[derive(Debug, Clone, Copy)]
pub struct IcpConfig {
    /// Relative interval width below which a variable counts as resolved.
    pub precision: Real,
    /// Boxes examined before giving up with `Unknown`.
    pub max_steps: u64,
    /// Wall-clock budget; `None` runs until the step budget is spent.
    pub timeout: Option<Duration>,
}

impl Default for IcpConfig {
    fn default() -> Self {
        Self {
            precision: 1e-6,
            max_steps: 100_000,
            timeout: None,
        }
    }
}

/// The built-in solving engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcpEngine {
    config: IcpConfig,
}

impl IcpEngine {
    pub fn new(config: IcpConfig) -> Self {
        Self { config }
    }
}

impl SolvingEngine for IcpEngine {
    fn check(&self, query: &Query) -> Answer {
        let boxv: Vec<Interval> = query.variables.iter().map(|v| v.interval).collect();
        search(boxv, &query.formulas, query.slack, &self.config)
    }
}

// Fixpoint passes per box; contraction gains shrink fast, so a small cap
// loses nothing.
const MAX_FIXPOINT_PASSES: usize = 64;

fn search(root: Vec<Interval>, formulas: &[Formula], slack: Tolerances, cfg: &IcpConfig) -> Answer {
    let start = Instant::now();
    let mut stack = vec![root];
    let mut steps: u64 = 0;

    while let Some(mut boxv) = stack.pop() {
        steps += 1;
        if steps > cfg.max_steps {
            debug!(steps, "step budget exhausted");
            return Answer::Unknown;
        }
        if let Some(limit) = cfg.timeout {
            if start.elapsed() >= limit {
                debug!(steps, "timeout exhausted");
                return Answer::Unknown;
            }
        }

        // Contract to fixpoint.
        let mut pruned = false;
        'fixpoint: for _ in 0..MAX_FIXPOINT_PASSES {
            let mut changed = false;
            for f in formulas {
                match contract(f, slack, &mut boxv) {
                    Contraction::Empty => {
                        pruned = true;
                        break 'fixpoint;
                    }
                    Contraction::Changed => changed = true,
                    Contraction::Unchanged => {}
                }
            }
            if !changed {
                break;
            }
        }
        if pruned {
            trace!(steps, "box pruned");
            continue;
        }

        if formulas.iter().all(|f| certainly_holds(f, slack, &boxv)) {
            debug!(steps, "model box found");
            return Answer::Sat(boxv);
        }

        let (widest, rel_width) = widest_variable(&boxv);
        if rel_width < cfg.precision {
            debug!(steps, "delta-model box found");
            return Answer::Sat(boxv);
        }

        // Split the widest variable; search the lower half first.
        let iv = boxv[widest];
        let mid = iv.midpoint();
        let mut upper = boxv.clone();
        upper[widest] = Interval::new(mid, iv.hi);
        boxv[widest] = Interval::new(iv.lo, mid);
        stack.push(upper);
        stack.push(boxv);
    }

    debug!(steps, "search space exhausted");
    Answer::Unsat
}

/// Index and relative width of the widest variable. Width is taken
/// relative to the interval's magnitude for values above 1, absolute
/// below, so microfluidic-scale quantities resolve without overdriving
/// the split loop.
fn widest_variable(boxv: &[Interval]) -> (usize, Real) {
    let mut idx = 0;
    let mut widest = 0.0;
    for (i, iv) in boxv.iter().enumerate() {
        let rel = iv.width() / iv.magnitude().max(1.0);
        if rel > widest {
            widest = rel;
            idx = i;
        }
    }
    (idx, widest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::Id;
    use mf_expr::Expr;

    use crate::engine::QueryVariable;

    fn qvar(name: &str, lo: Real, hi: Real) -> QueryVariable {
        QueryVariable {
            name: name.into(),
            interval: Interval::new(lo, hi),
        }
    }

    fn x() -> Expr {
        Expr::var(Id::from_index(0))
    }

    fn y() -> Expr {
        Expr::var(Id::from_index(1))
    }

    #[test]
    fn solves_coupled_equalities() {
        // x = 3, x * y = 12
        let query = Query {
            variables: vec![qvar("x", 0.0, 100.0), qvar("y", 0.0, 100.0)],
            formulas: vec![
                Formula::eq(x(), Expr::constant(3.0)),
                Formula::eq(x() * y(), Expr::constant(12.0)),
            ],
            slack: Tolerances::default(),
        };
        match IcpEngine::default().check(&query) {
            Answer::Sat(boxes) => {
                assert!((boxes[0].midpoint() - 3.0).abs() < 1e-3);
                assert!((boxes[1].midpoint() - 4.0).abs() < 1e-3);
            }
            other => panic!("expected sat, got {other:?}"),
        }
    }

    #[test]
    fn branches_through_sign_ambiguity() {
        // x^2 = 4 over [-10, 10]: two solution boxes, either is a model.
        let query = Query {
            variables: vec![qvar("x", -10.0, 10.0)],
            formulas: vec![Formula::eq(x().powi(2), Expr::constant(4.0))],
            slack: Tolerances::default(),
        };
        match IcpEngine::default().check(&query) {
            Answer::Sat(boxes) => assert!((boxes[0].midpoint().abs() - 2.0).abs() < 1e-3),
            other => panic!("expected sat, got {other:?}"),
        }
    }

    #[test]
    fn contradiction_is_unsat() {
        let query = Query {
            variables: vec![qvar("x", 0.0, 10.0)],
            formulas: vec![
                Formula::eq(x(), Expr::constant(2.0)),
                Formula::eq(x(), Expr::constant(7.0)),
            ],
            slack: Tolerances::default(),
        };
        assert_eq!(IcpEngine::default().check(&query), Answer::Unsat);
    }

    #[test]
    fn zero_step_budget_is_unknown() {
        let query = Query {
            variables: vec![qvar("x", 0.0, 10.0)],
            formulas: vec![Formula::eq(x(), Expr::constant(2.0))],
            slack: Tolerances::default(),
        };
        let engine = IcpEngine::new(IcpConfig {
            max_steps: 0,
            ..IcpConfig::default()
        });
        assert_eq!(engine.check(&query), Answer::Unknown);
    }

    #[test]
    fn zero_timeout_is_unknown() {
        let query = Query {
            variables: vec![qvar("x", 0.0, 10.0)],
            formulas: vec![Formula::eq(x(), Expr::constant(2.0))],
            slack: Tolerances::default(),
        };
        let engine = IcpEngine::new(IcpConfig {
            timeout: Some(Duration::ZERO),
            ..IcpConfig::default()
        });
        assert_eq!(engine.check(&query), Answer::Unknown);
    }

    #[test]
    fn inequalities_admit_a_range() {
        // 2 <= x <= 3: any sufficiently narrow box inside works.
        let query = Query {
            variables: vec![qvar("x", 0.0, 10.0)],
            formulas: vec![
                Formula::ge(x(), Expr::constant(2.0)),
                Formula::le(x(), Expr::constant(3.0)),
            ],
            slack: Tolerances::default(),
        };
        match IcpEngine::default().check(&query) {
            Answer::Sat(boxes) => {
                assert!(boxes[0].lo >= 2.0 - 1e-9);
                assert!(boxes[0].hi <= 3.0 + 1e-9);
            }
            other => panic!("expected sat, got {other:?}"),
        }
    }
}
