//! Argument validation helpers shared by the builder methods.

use mf_core::Real;

use crate::error::{SchematicError, SchematicResult};

/// A declared physical value must be finite and strictly positive.
pub(crate) fn check_positive(value: Real, what: &'static str) -> SchematicResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SchematicError::NonPositive { what })
    }
}

/// Like `check_positive`, for optional declarations.
pub(crate) fn check_positive_opt(value: Option<Real>, what: &'static str) -> SchematicResult<()> {
    match value {
        Some(v) => check_positive(v, what),
        None => Ok(()),
    }
}

/// Positions may sit on the chip origin, so zero is allowed.
pub(crate) fn check_position(position: Option<[Real; 2]>, what: &'static str) -> SchematicResult<()> {
    if let Some([x, y]) = position {
        if !(x.is_finite() && y.is_finite() && x >= 0.0 && y >= 0.0) {
            return Err(SchematicError::NonPositive { what });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nan_zero_and_negative() {
        assert!(check_positive(1.0, "w").is_ok());
        assert!(check_positive(0.0, "w").is_err());
        assert!(check_positive(-2.0, "w").is_err());
        assert!(check_positive(Real::NAN, "w").is_err());
    }

    #[test]
    fn position_allows_origin() {
        assert!(check_position(Some([0.0, 0.0]), "pos").is_ok());
        assert!(check_position(Some([-1.0, 0.0]), "pos").is_err());
        assert!(check_position(None, "pos").is_ok());
    }
}
