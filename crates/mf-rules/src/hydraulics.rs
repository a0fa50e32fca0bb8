//! Pressure-driven laminar flow in rectangular channels.

use mf_core::Real;
use mf_expr::{Expr, Formula};

/// Hagen-Poiseuille analogue: the pressure drop across a channel equals
/// flow rate times hydraulic resistance.
///
/// `p_from - p_to = q * r`
pub fn pressure_flow(p_from: Expr, p_to: Expr, flow: Expr, resistance: Expr) -> Formula {
    Formula::eq(p_from - p_to, flow * resistance)
}

/// Hydraulic resistance of a rectangular duct (Bruus approximation):
///
/// `r = 12 * mu * l / (w * h^3 * (1 - 0.63 * h / w))`
///
/// valid only for `h < w`, so the validity inequality is emitted alongside
/// the defining equality. The equality is stated in product form,
/// `r * w * h^3 * (1 - 0.63 h/w) = 12 mu l`, which keeps the geometric
/// denominator out of interval division during contraction.
pub fn rectangular_resistance(
    resistance: Expr,
    viscosity: Expr,
    length: Expr,
    width: Expr,
    height: Expr,
) -> [Formula; 2] {
    let validity = Formula::lt(height.clone(), width.clone());
    let shape = Expr::constant(1.0)
        - Expr::constant(0.63) * (height.clone() / width.clone());
    let lhs = resistance * width * height.powi(3) * shape;
    let rhs = Expr::constant(12.0) * viscosity * length;
    [validity, Formula::eq(lhs, rhs)]
}

/// Point evaluation of the rectangular resistance law, for checking
/// candidate solutions against the symbolic form.
pub fn rectangular_resistance_value(viscosity: Real, length: Real, width: Real, height: Real) -> Real {
    12.0 * viscosity * length / (width * height.powi(3) * (1.0 - 0.63 * height / width))
}

/// Bernoulli inflow at a pressure-driven input port with total attached
/// cross-section `area`:
///
/// `q^2 = area^2 * 2 * p / rho`
///
/// Squared on both sides so the relation stays polynomial.
pub fn port_inflow(flow: Expr, pressure: Expr, density: Expr, area: Expr) -> Formula {
    Formula::eq(
        flow.powi(2),
        area.powi(2) * (Expr::constant(2.0) * pressure / density),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::{Id, Tolerances};
    use proptest::prelude::*;

    #[test]
    fn product_form_matches_point_evaluation() {
        // r, mu, l, w, h at indices 0..5
        let ids: Vec<Id> = (0..5).map(Id::from_index).collect();
        let [_, eq] = rectangular_resistance(
            Expr::var(ids[0]),
            Expr::var(ids[1]),
            Expr::var(ids[2]),
            Expr::var(ids[3]),
            Expr::var(ids[4]),
        );
        let (mu, l, w, h) = (1e-3, 0.01, 2e-4, 1e-4);
        let r = rectangular_resistance_value(mu, l, w, h);
        assert!(eq.holds(&[r, mu, l, w, h], Tolerances::default()));
        // Wrong resistance violates the relation.
        assert!(!eq.holds(&[2.0 * r, mu, l, w, h], Tolerances::default()));
    }

    #[test]
    fn water_resistance_magnitude() {
        // 1 cm of 200 x 100 um channel with water is order 1e11..1e12 Pa*s/m^3.
        let r = rectangular_resistance_value(1e-3, 0.01, 2e-4, 1e-4);
        assert!(r > 1e11 && r < 1e12, "r = {r}");
    }

    #[test]
    fn bernoulli_inflow_holds_at_consistent_point() {
        let q = Id::from_index(0);
        let p = Id::from_index(1);
        let rho = Id::from_index(2);
        let a = Id::from_index(3);
        let f = port_inflow(Expr::var(q), Expr::var(p), Expr::var(rho), Expr::var(a));
        // q = a * sqrt(2p/rho)
        let (pv, rhov, av): (f64, f64, f64) = (1000.0, 1000.0, 2e-8);
        let qv = av * (2.0 * pv / rhov).sqrt();
        assert!(f.holds(&[qv, pv, rhov, av], Tolerances::default()));
    }

    proptest! {
        #[test]
        fn resistance_monotone_in_geometry(
            mu in 1e-4f64..1e2,
            l in 1e-6f64..1.0,
            w in 1e-5f64..1e-2,
            frac in 0.05f64..0.8,
        ) {
            let h = w * frac;
            let r = rectangular_resistance_value(mu, l, w, h);
            prop_assert!(r.is_finite() && r > 0.0);
            // Longer channel resists more.
            prop_assert!(rectangular_resistance_value(mu, 1.5 * l, w, h) >= r);
            // Wider or taller channel resists less (h stays below w).
            prop_assert!(rectangular_resistance_value(mu, l, 1.2 * w, h) <= r);
            prop_assert!(rectangular_resistance_value(mu, l, w, 1.1 * h) <= r);
        }
    }
}
