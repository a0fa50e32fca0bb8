//! Static catalog of working fluids.

use mf_core::Real;
use serde::Serialize;

use crate::error::{FluidError, FluidResult};

/// One catalog row. Densities in kg/m^3, viscosities in Pa*s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidCatalogEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub density: Real,
    pub viscosity: Real,
}

impl FluidCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        self.canonical_id.to_ascii_lowercase() == query
            || self.display_name.to_ascii_lowercase() == query
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase() == query)
    }
}

/// Fluids commonly pumped through microfluidic chips.
pub const FLUID_CATALOG: [FluidCatalogEntry; 4] = [
    FluidCatalogEntry {
        canonical_id: "water",
        display_name: "Water",
        aliases: &["h2o", "di-water"],
        density: 999.87,
        viscosity: 0.001,
    },
    FluidCatalogEntry {
        canonical_id: "mineraloil",
        display_name: "Mineral Oil",
        aliases: &["mineral oil", "oil"],
        density: 800.0,
        viscosity: 0.0003051,
    },
    FluidCatalogEntry {
        canonical_id: "polyacrylamide",
        display_name: "Polyacrylamide",
        aliases: &["paa"],
        density: 1100.0,
        viscosity: 0.003,
    },
    FluidCatalogEntry {
        canonical_id: "glycerol",
        display_name: "Glycerol",
        aliases: &["glycerine", "glycerin"],
        density: 1261.0,
        viscosity: 1.412,
    },
];

/// Look a fluid up by canonical id, display name or alias.
pub fn find_fluid(name: &str) -> FluidResult<&'static FluidCatalogEntry> {
    FLUID_CATALOG
        .iter()
        .find(|e| e.matches_query(name))
        .ok_or_else(|| FluidError::UnknownFluid {
            name: name.to_string(),
        })
}

/// Fluid identity carried by a port. Unspecified properties stay free for
/// the solver.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Fluid {
    pub density: Option<Real>,
    pub viscosity: Option<Real>,
}

impl Fluid {
    /// A fluid whose properties the solver may choose freely.
    pub fn unspecified() -> Self {
        Self::default()
    }

    /// Resolve a named fluid from the catalog.
    pub fn named(name: &str) -> FluidResult<Self> {
        let entry = find_fluid(name)?;
        Ok(Self {
            density: Some(entry.density),
            viscosity: Some(entry.viscosity),
        })
    }

    /// A fluid with explicit properties.
    pub fn custom(density: Real, viscosity: Real) -> Self {
        Self {
            density: Some(density),
            viscosity: Some(viscosity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_lookup() {
        let f = Fluid::named("water").unwrap();
        assert_eq!(f.density, Some(999.87));
        assert_eq!(f.viscosity, Some(0.001));
    }

    #[test]
    fn alias_lookup_is_case_insensitive() {
        let entry = find_fluid("Mineral Oil").unwrap();
        assert_eq!(entry.canonical_id, "mineraloil");
        assert!(find_fluid("H2O").is_ok());
    }

    #[test]
    fn unknown_fluid_is_an_error() {
        let err = Fluid::named("unobtainium").unwrap_err();
        assert_eq!(
            err,
            FluidError::UnknownFluid {
                name: "unobtainium".into()
            }
        );
    }

    #[test]
    fn unspecified_leaves_properties_free() {
        let f = Fluid::unspecified();
        assert!(f.density.is_none());
        assert!(f.viscosity.is_none());
    }
}
