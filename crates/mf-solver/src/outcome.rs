//! Solve outcomes returned to callers.

use mf_core::Real;
use serde::Serialize;

use crate::interval::Interval;

/// Immutable mapping from variable name to the interval bounding its
/// admissible values. Iteration follows the compiled variable order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    bindings: Vec<(String, Interval)>,
}

impl Solution {
    pub(crate) fn new(bindings: Vec<(String, Interval)>) -> Self {
        Self { bindings }
    }

    pub fn get(&self, name: &str) -> Option<Interval> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, itv)| itv)
    }

    /// Midpoint of the named variable's interval, the usual single-number
    /// readback.
    pub fn value(&self, name: &str) -> Option<Real> {
        self.get(name).map(|itv| itv.midpoint())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Interval)> {
        self.bindings.iter().map(|(n, itv)| (n.as_str(), *itv))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Result of one solve call. Unsatisfiability is a legitimate answer
/// about the design space, not an error; `Unknown` means the engine ran
/// out of budget or precision before reaching a verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Solved(Solution),
    Unsatisfiable,
    Unknown,
}

impl Outcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        let s = Solution::new(vec![
            ("a_pressure".into(), Interval::new(1.0, 2.0)),
            ("b_pressure".into(), Interval::point(5.0)),
        ]);
        assert_eq!(s.get("b_pressure"), Some(Interval::point(5.0)));
        assert_eq!(s.value("a_pressure"), Some(1.5));
        assert_eq!(s.get("missing"), None);
        assert_eq!(s.len(), 2);
    }
}
