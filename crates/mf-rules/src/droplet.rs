//! Droplet generation at a T-junction, after van Steijn et al.,
//! "Predictive model for the size of bubbles and droplets created in
//! microfluidic T-junctions", Lab Chip 10, 2513 (2010).

use std::f64::consts::PI;

use mf_core::Real;
use mf_expr::{Expr, Formula};

/// Fraction of the continuous phase that bypasses the forming droplet
/// through the gutters. Fixed at 0.1 in the van Steijn model.
pub const Q_GUTTER: Real = 0.1;

/// Corner sharpness of the junction, tied to the continuous channel
/// width: `epsilon = 0.01 * w_continuous`.
pub fn sharpness(epsilon: Expr, continuous_width: Expr) -> Formula {
    Formula::eq(epsilon, Expr::constant(0.01) * continuous_width)
}

/// Predicted droplet volume at a T-junction.
///
/// `h`, `w` are the continuous (and output) channel height and width,
/// `w_in` the dispersed inlet width, `epsilon` the corner sharpness and
/// `q_d`, `q_c` the dispersed and continuous flow rates. The model fills
/// to `v_fill`, then squeezes for `alpha * q_d / q_c`:
///
/// `v = h * w^2 * (v_fill + alpha * q_d / q_c)`
pub fn droplet_volume(
    volume: Expr,
    h: Expr,
    w: Expr,
    w_in: Expr,
    epsilon: Expr,
    q_d: Expr,
    q_c: Expr,
) -> Formula {
    let hw_ratio = h.clone() / w.clone();

    let v_fill = Expr::constant(3.0 * PI / 8.0)
        - Expr::constant(PI / 2.0) * Expr::constant(1.0 - PI / 4.0) * hw_ratio.clone();

    // Harmonic half-sum of the cross-section sides.
    let hw_parallel = (h.clone() * w.clone()) / (h.clone() + w.clone());

    let r_pinch = w.clone()
        + ((w_in.clone() - (hw_parallel.clone() - epsilon))
            + (Expr::constant(2.0)
                * ((w_in - hw_parallel.clone()) * (w.clone() - hw_parallel)))
            .sqrt());
    let r_fill = w.clone();

    let alpha = Expr::constant(1.0 - PI / 4.0)
        * Expr::constant(1.0 / (1.0 - Q_GUTTER))
        * (((r_pinch.clone() / w.clone()).powi(2) - (r_fill.clone() / w.clone()).powi(2))
            + (Expr::constant(PI / 4.0) * (r_pinch / w.clone())
                - (r_fill / w.clone()))
                * hw_ratio);

    Formula::eq(volume, h * w.powi(2) * (v_fill + alpha * (q_d / q_c)))
}

/// Point evaluation of the van Steijn volume, for checking candidate
/// solutions against the symbolic form.
pub fn droplet_volume_value(
    h: Real,
    w: Real,
    w_in: Real,
    epsilon: Real,
    q_d: Real,
    q_c: Real,
) -> Real {
    let v_fill = 3.0 * PI / 8.0 - (PI / 2.0) * (1.0 - PI / 4.0) * (h / w);
    let hw_parallel = h * w / (h + w);
    let r_pinch =
        w + ((w_in - (hw_parallel - epsilon)) + (2.0 * (w_in - hw_parallel) * (w - hw_parallel)).sqrt());
    let r_fill = w;
    let alpha = (1.0 - PI / 4.0)
        * (1.0 / (1.0 - Q_GUTTER))
        * (((r_pinch / w).powi(2) - (r_fill / w).powi(2))
            + (PI / 4.0 * (r_pinch / w) - r_fill / w) * (h / w));
    h * w.powi(2) * (v_fill + alpha * q_d / q_c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::{Id, Tolerances};
    use proptest::prelude::*;

    // 100 x 200 um junction, 2:1 continuous:dispersed flow.
    const H: Real = 1e-4;
    const W: Real = 2e-4;
    const W_IN: Real = 2e-4;
    const EPS: Real = 0.01 * W;

    #[test]
    fn symbolic_form_matches_point_evaluation() {
        let ids: Vec<Id> = (0..7).map(Id::from_index).collect();
        let f = droplet_volume(
            Expr::var(ids[0]),
            Expr::var(ids[1]),
            Expr::var(ids[2]),
            Expr::var(ids[3]),
            Expr::var(ids[4]),
            Expr::var(ids[5]),
            Expr::var(ids[6]),
        );
        let (qd, qc) = (1e-10, 2e-10);
        let v = droplet_volume_value(H, W, W_IN, EPS, qd, qc);
        assert!(f.holds(&[v, H, W, W_IN, EPS, qd, qc], Tolerances::default()));
        assert!(!f.holds(&[2.0 * v, H, W, W_IN, EPS, qd, qc], Tolerances::default()));
    }

    #[test]
    fn volume_is_plausible() {
        // A droplet is at least the fill volume and no more than a few
        // channel volumes at moderate flow ratios.
        let v = droplet_volume_value(H, W, W_IN, EPS, 1e-10, 2e-10);
        let channel_section = H * W * W;
        assert!(v > 0.5 * channel_section && v < 10.0 * channel_section, "v = {v}");
    }

    #[test]
    fn sharpness_ties_to_continuous_width() {
        let eps = Id::from_index(0);
        let w = Id::from_index(1);
        let f = sharpness(Expr::var(eps), Expr::var(w));
        assert!(f.holds(&[2e-6, 2e-4], Tolerances::default()));
    }

    proptest! {
        #[test]
        fn squeezing_grows_with_flow_ratio(
            qd in 1e-12f64..1e-8,
            qc in 1e-12f64..1e-8,
        ) {
            let v = droplet_volume_value(H, W, W_IN, EPS, qd, qc);
            prop_assert!(v.is_finite() && v > 0.0);
            // More dispersed flow per continuous flow squeezes longer.
            prop_assert!(droplet_volume_value(H, W, W_IN, EPS, 2.0 * qd, qc) >= v);
            prop_assert!(droplet_volume_value(H, W, W_IN, EPS, qd, 2.0 * qc) <= v);
        }
    }
}
