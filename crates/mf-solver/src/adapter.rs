//! Encoding constraint systems as queries and decoding answers.

use mf_compiler::{compile, CompileError};
use mf_expr::ConstraintSystem;
use mf_schematic::Schematic;
use tracing::debug;

use crate::engine::{Answer, Query, QueryVariable, SolvingEngine};
use crate::icp::IcpEngine;
use crate::interval::Interval;
use crate::outcome::{Outcome, Solution};

/// Serialize a constraint system into a query: one variable per registry
/// entry in first-requested order, domains as initial intervals. Formula
/// variable indices already match this order.
pub fn encode(system: &ConstraintSystem) -> Query {
    let variables = system
        .registry()
        .all_variables()
        .iter()
        .map(|v| QueryVariable {
            name: v.name.clone(),
            interval: Interval::new(v.domain.lo, v.domain.hi),
        })
        .collect();
    Query {
        variables,
        formulas: system.formulas().to_vec(),
        slack: system.equality_slack(),
    }
}

/// Solve with the built-in engine.
pub fn solve(system: &ConstraintSystem) -> Outcome {
    solve_with_engine(&IcpEngine::default(), system)
}

/// Solve with a caller-supplied engine. One query per call; the engine's
/// verdict is decoded without fabricating bindings.
pub fn solve_with_engine(engine: &dyn SolvingEngine, system: &ConstraintSystem) -> Outcome {
    let query = encode(system);
    debug!(
        variables = query.variables.len(),
        formulas = query.formulas.len(),
        "dispatching query"
    );
    match engine.check(&query) {
        Answer::Sat(intervals) => {
            let bindings = query
                .variables
                .into_iter()
                .map(|v| v.name)
                .zip(intervals)
                .collect();
            Outcome::Solved(Solution::new(bindings))
        }
        Answer::Unsat => Outcome::Unsatisfiable,
        Answer::Unknown => Outcome::Unknown,
    }
}

/// Compile and solve in one step. Compilation errors surface before any
/// engine invocation.
pub fn solve_schematic(schematic: &Schematic) -> Result<Outcome, CompileError> {
    let system = compile(schematic)?;
    Ok(solve(&system))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::Tolerances;
    use mf_expr::{Attribute, Expr, Formula, VariableRegistry};

    fn one_pin_system() -> ConstraintSystem {
        let mut reg = VariableRegistry::new();
        let p = reg.variable_for(
            "in",
            Attribute::Pressure,
            Attribute::Pressure.default_domain(),
        );
        let formulas = vec![Formula::eq(Expr::var(p), Expr::constant(250.0))];
        ConstraintSystem::new(reg, formulas, Tolerances::default())
    }

    #[test]
    fn encode_preserves_registry_order_and_domains() {
        let sys = one_pin_system();
        let query = encode(&sys);
        assert_eq!(query.variables.len(), 1);
        assert_eq!(query.variables[0].name, "in_pressure");
        assert_eq!(query.variables[0].interval, Interval::new(1e-6, 1e6));
    }

    #[test]
    fn sat_decodes_to_named_bindings() {
        let sys = one_pin_system();
        match solve(&sys) {
            Outcome::Solved(sol) => {
                let p = sol.get("in_pressure").unwrap();
                assert!((p.midpoint() - 250.0).abs() < 1e-3);
            }
            other => panic!("expected solved, got {other:?}"),
        }
    }

    struct AlwaysUnknown;

    impl SolvingEngine for AlwaysUnknown {
        fn check(&self, _query: &Query) -> Answer {
            Answer::Unknown
        }
    }

    #[test]
    fn engine_verdicts_pass_through() {
        let sys = one_pin_system();
        assert_eq!(solve_with_engine(&AlwaysUnknown, &sys), Outcome::Unknown);
    }
}
