//! Closed real intervals and the arithmetic the contractor needs.
//!
//! Endpoints are plain `f64`s without outward rounding; the equality slack
//! carried by every query absorbs the resulting imprecision, matching the
//! delta-decision semantics of the engine.

use mf_core::Real;
use serde::Serialize;

/// A closed interval `[lo, hi]`. Empty when `lo > hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub lo: Real,
    pub hi: Real,
}

impl Interval {
    pub const ENTIRE: Interval = Interval {
        lo: Real::NEG_INFINITY,
        hi: Real::INFINITY,
    };

    pub const EMPTY: Interval = Interval {
        lo: Real::INFINITY,
        hi: Real::NEG_INFINITY,
    };

    pub fn new(lo: Real, hi: Real) -> Self {
        Self { lo, hi }
    }

    pub fn point(v: Real) -> Self {
        Self { lo: v, hi: v }
    }

    pub fn is_empty(&self) -> bool {
        !(self.lo <= self.hi)
    }

    pub fn width(&self) -> Real {
        if self.is_empty() {
            0.0
        } else {
            self.hi - self.lo
        }
    }

    /// Largest absolute value the interval contains.
    pub fn magnitude(&self) -> Real {
        if self.is_empty() {
            0.0
        } else {
            self.lo.abs().max(self.hi.abs())
        }
    }

    pub fn midpoint(&self) -> Real {
        0.5 * (self.lo + self.hi)
    }

    pub fn contains(&self, v: Real) -> bool {
        self.lo <= v && v <= self.hi
    }

    pub fn intersect(self, other: Interval) -> Interval {
        Interval::new(self.lo.max(other.lo), self.hi.min(other.hi))
    }

    /// Widen both endpoints by a non-negative slack.
    pub fn inflate(self, slack: Real) -> Interval {
        Interval::new(self.lo - slack, self.hi + slack)
    }

    pub fn neg(self) -> Interval {
        if self.is_empty() {
            return Interval::EMPTY;
        }
        Interval::new(-self.hi, -self.lo)
    }

    pub fn add(self, o: Interval) -> Interval {
        if self.is_empty() || o.is_empty() {
            return Interval::EMPTY;
        }
        // -inf + inf has no information; widen to the matching infinity.
        let mut lo = self.lo + o.lo;
        if lo.is_nan() {
            lo = Real::NEG_INFINITY;
        }
        let mut hi = self.hi + o.hi;
        if hi.is_nan() {
            hi = Real::INFINITY;
        }
        Interval::new(lo, hi)
    }

    pub fn sub(self, o: Interval) -> Interval {
        self.add(o.neg())
    }

    pub fn mul(self, o: Interval) -> Interval {
        if self.is_empty() || o.is_empty() {
            return Interval::EMPTY;
        }
        let mut lo = Real::INFINITY;
        let mut hi = Real::NEG_INFINITY;
        for a in [self.lo, self.hi] {
            for b in [o.lo, o.hi] {
                // 0 * inf is 0 here: the zero endpoint dominates.
                let p = if a == 0.0 || b == 0.0 { 0.0 } else { a * b };
                lo = lo.min(p);
                hi = hi.max(p);
            }
        }
        Interval::new(lo, hi)
    }

    /// Quotient hull. A denominator straddling zero yields the entire
    /// line, which is sound for contraction (no pruning, never a wrong
    /// exclusion).
    pub fn div(self, o: Interval) -> Interval {
        if self.is_empty() || o.is_empty() {
            return Interval::EMPTY;
        }
        if o.lo <= 0.0 && o.hi >= 0.0 {
            return Interval::ENTIRE;
        }
        self.mul(Interval::new(1.0 / o.hi, 1.0 / o.lo))
    }

    pub fn powi(self, n: u32) -> Interval {
        if self.is_empty() {
            return Interval::EMPTY;
        }
        // x^0 is identically 1, including across sign changes.
        if n == 0 {
            return Interval::point(1.0);
        }
        let lo_n = powi(self.lo, n);
        let hi_n = powi(self.hi, n);
        if n % 2 == 1 {
            Interval::new(lo_n, hi_n)
        } else if self.lo >= 0.0 {
            Interval::new(lo_n, hi_n)
        } else if self.hi <= 0.0 {
            Interval::new(hi_n, lo_n)
        } else {
            Interval::new(0.0, lo_n.max(hi_n))
        }
    }

    pub fn sqrt(self) -> Interval {
        if self.is_empty() || self.hi < 0.0 {
            return Interval::EMPTY;
        }
        Interval::new(self.lo.max(0.0).sqrt(), self.hi.sqrt())
    }

    /// Preimage of `self` under x^n, refined against the current `x`.
    ///
    /// For even n the preimage is a symmetric pair of intervals; when the
    /// current box already fixes the sign the matching branch is used,
    /// otherwise their hull.
    pub fn root(self, n: u32, current: Interval) -> Interval {
        if self.is_empty() || current.is_empty() {
            return Interval::EMPTY;
        }
        // x^0 = 1 carries no information about x.
        if n == 0 {
            return if self.contains(1.0) {
                current
            } else {
                Interval::EMPTY
            };
        }
        if n % 2 == 1 {
            let r = Interval::new(signed_root(self.lo, n), signed_root(self.hi, n));
            return r.intersect(current);
        }
        // Even power: x^n is non-negative.
        let z = self.intersect(Interval::new(0.0, Real::INFINITY));
        if z.is_empty() {
            return Interval::EMPTY;
        }
        let r_lo = powi_inv(z.lo, n);
        let r_hi = powi_inv(z.hi, n);
        let positive = Interval::new(r_lo, r_hi);
        let negative = positive.neg();
        if current.lo >= 0.0 {
            positive.intersect(current)
        } else if current.hi <= 0.0 {
            negative.intersect(current)
        } else {
            Interval::new(negative.lo, positive.hi).intersect(current)
        }
    }
}

fn powi(v: Real, n: u32) -> Real {
    v.powi(n as i32)
}

/// n-th root of a non-negative value.
fn powi_inv(v: Real, n: u32) -> Real {
    v.powf(1.0 / n as Real)
}

/// Sign-preserving n-th root for odd n.
fn signed_root(v: Real, n: u32) -> Real {
    v.signum() * v.abs().powf(1.0 / n as Real)
}
