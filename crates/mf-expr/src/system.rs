//! The compiled constraint system.

use mf_core::Tolerances;

use crate::formula::Formula;
use crate::registry::VariableRegistry;

/// Flat, read-only view of a compiled schematic: every variable the rules
/// referenced, every emitted formula, and the uniform slack applied to
/// equalities by the bounded-precision decision procedure.
#[derive(Debug)]
pub struct ConstraintSystem {
    registry: VariableRegistry,
    formulas: Vec<Formula>,
    equality_slack: Tolerances,
}

impl ConstraintSystem {
    pub fn new(registry: VariableRegistry, formulas: Vec<Formula>, equality_slack: Tolerances) -> Self {
        Self {
            registry,
            formulas,
            equality_slack,
        }
    }

    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    pub fn formulas(&self) -> &[Formula] {
        &self.formulas
    }

    pub fn equality_slack(&self) -> Tolerances {
        self.equality_slack
    }

    pub fn num_variables(&self) -> usize {
        self.registry.len()
    }

    pub fn num_formulas(&self) -> usize {
        self.formulas.len()
    }
}
