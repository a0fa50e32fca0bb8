//! Planar layout relations: lengths, bounds and angles.

use mf_core::Real;
use mf_expr::{Expr, Formula};

/// Channel length from endpoint positions, Pythagorean form:
///
/// `l^2 = (x2 - x1)^2 + (y2 - y1)^2`
pub fn pythagorean_length(x1: Expr, y1: Expr, x2: Expr, y2: Expr, length: Expr) -> Formula {
    Formula::eq(length.powi(2), (x2 - x1).powi(2) + (y2 - y1).powi(2))
}

/// Lower bound on a dimension: `value >= floor`.
pub fn min_floor(value: Expr, floor: Real) -> Formula {
    Formula::ge(value, Expr::constant(floor))
}

/// Keep a position inside the chip rectangle.
pub fn within_chip(
    x: Expr,
    y: Expr,
    x_min: Real,
    y_min: Real,
    x_max: Real,
    y_max: Real,
) -> [Formula; 4] {
    [
        Formula::ge(x.clone(), Expr::constant(x_min)),
        Formula::le(x, Expr::constant(x_max)),
        Formula::ge(y.clone(), Expr::constant(y_min)),
        Formula::le(y, Expr::constant(y_max)),
    ]
}

/// Three points are collinear when the signed triangle area vanishes:
///
/// `x1 (y3 - y2) + x3 (y2 - y1) + x2 (y1 - y3) = 0`
pub fn collinear(a: (Expr, Expr), b: (Expr, Expr), c: (Expr, Expr)) -> Formula {
    let (x1, y1) = a;
    let (x2, y2) = b;
    let (x3, y3) = c;
    let area2 = x1 * (y3.clone() - y2.clone())
        + x3 * (y2 - y1.clone())
        + x2 * (y1 - y3);
    Formula::eq(area2, Expr::constant(0.0))
}

/// Upper bound on the angle spanned at `mid` by the segments to `a` and
/// `b`: `cos^2(angle) >= cos^2(critical)`, stated via the law of cosines
/// in product form,
///
/// `(u . v)^2 >= cos^2(crit) * |u|^2 * |v|^2`
///
/// with `u = a - mid`, `v = b - mid`. Product form keeps zero-length
/// segments out of interval division.
pub fn crit_angle_bound(
    a: (Expr, Expr),
    mid: (Expr, Expr),
    b: (Expr, Expr),
    cos_sq_crit: Real,
) -> Formula {
    let ux = a.0 - mid.0.clone();
    let uy = a.1 - mid.1.clone();
    let vx = b.0 - mid.0;
    let vy = b.1 - mid.1;
    let dot = ux.clone() * vx.clone() + uy.clone() * vy.clone();
    let norm_sq = (ux.powi(2) + uy.powi(2)) * (vx.powi(2) + vy.powi(2));
    Formula::ge(dot.powi(2), Expr::constant(cos_sq_crit) * norm_sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::{Id, Tolerances};

    fn ids(n: u32) -> Vec<Id> {
        (0..n).map(Id::from_index).collect()
    }

    #[test]
    fn length_from_positions() {
        let v = ids(5);
        let f = pythagorean_length(
            Expr::var(v[0]),
            Expr::var(v[1]),
            Expr::var(v[2]),
            Expr::var(v[3]),
            Expr::var(v[4]),
        );
        // 3-4-5 triangle scaled to mm.
        assert!(f.holds(&[0.0, 0.0, 3e-3, 4e-3, 5e-3], Tolerances::default()));
        assert!(!f.holds(&[0.0, 0.0, 3e-3, 4e-3, 6e-3], Tolerances::default()));
    }

    #[test]
    fn collinear_detects_bends() {
        let v = ids(6);
        let f = collinear(
            (Expr::var(v[0]), Expr::var(v[1])),
            (Expr::var(v[2]), Expr::var(v[3])),
            (Expr::var(v[4]), Expr::var(v[5])),
        );
        let tol = Tolerances::default();
        assert!(f.holds(&[0.0, 0.0, 1.0, 1.0, 2.0, 2.0], tol));
        assert!(!f.holds(&[0.0, 0.0, 1.0, 1.0, 2.0, 3.0], tol));
    }

    #[test]
    fn straight_run_passes_angle_bound() {
        let v = ids(6);
        let f = crit_angle_bound(
            (Expr::var(v[0]), Expr::var(v[1])),
            (Expr::var(v[2]), Expr::var(v[3])),
            (Expr::var(v[4]), Expr::var(v[5])),
            0.9,
        );
        let tol = Tolerances::default();
        // Opposite directions through the midpoint: cos^2 = 1.
        assert!(f.holds(&[0.0, 0.0, 1.0, 0.0, 2.0, 0.0], tol));
        // Right angle: cos^2 = 0 < 0.9.
        assert!(!f.holds(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0], tol));
    }

    #[test]
    fn chip_rectangle_bounds() {
        let v = ids(2);
        let fs = within_chip(Expr::var(v[0]), Expr::var(v[1]), 0.0, 0.0, 1.0, 1.0);
        let tol = Tolerances::default();
        assert!(fs.iter().all(|f| f.holds(&[0.5, 0.5], tol)));
        assert!(!fs.iter().all(|f| f.holds(&[1.5, 0.5], tol)));
    }
}
