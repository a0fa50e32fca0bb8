/// Floating point type used throughout the system. All physical
/// quantities are raw SI values: Pa, m^3/s, Pa*s, kg/m^3, m.
pub type Real = f64;

/// One abs/rel tolerance pair for everything. The compiler attaches a
/// `Tolerances` to every constraint system as the uniform equality slack,
/// reflecting that the decision procedure reasons over bounded-precision
/// real arithmetic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-6,
        }
    }
}

impl Tolerances {
    /// Slack admitted around an equality whose sides have the given magnitude.
    pub fn slack_for(&self, magnitude: Real) -> Real {
        self.abs + self.rel * magnitude.abs()
    }
}

/// Equality up to `tol`: absolute near zero, relative elsewhere.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}
