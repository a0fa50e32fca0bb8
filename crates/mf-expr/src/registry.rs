//! Variable allocation: one symbolic variable per (entity, attribute) pair.

use core::fmt;
use std::collections::HashMap;

use mf_core::{Real, VarId};

/// Physical quantity attached to a schematic entity.
///
/// Each (entity name, attribute) pair owns exactly one symbolic variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Pressure at a port or node (Pa).
    Pressure,
    /// Volumetric flow rate (m^3/s).
    FlowRate,
    /// Dynamic viscosity (Pa*s).
    Viscosity,
    /// Fluid density (kg/m^3).
    Density,
    /// Planar x position on the chip (m).
    X,
    /// Planar y position on the chip (m).
    Y,
    /// Channel length (m).
    Length,
    /// Channel width (m).
    Width,
    /// Channel height (m).
    Height,
    /// Hydraulic resistance (kg/(m^4*s)).
    Resistance,
    /// Droplet volume produced into a channel (m^3).
    DropletVolume,
    /// T-junction corner sharpness, epsilon in Steijn's model (m).
    Sharpness,
}

impl Attribute {
    /// Suffix used in variable names, e.g. `t_j_out_resistance`.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Pressure => "pressure",
            Attribute::FlowRate => "flow_rate",
            Attribute::Viscosity => "viscosity",
            Attribute::Density => "density",
            Attribute::X => "x",
            Attribute::Y => "y",
            Attribute::Length => "length",
            Attribute::Width => "width",
            Attribute::Height => "height",
            Attribute::Resistance => "resistance",
            Attribute::DropletVolume => "droplet_volume",
            Attribute::Sharpness => "epsilon",
        }
    }

    /// Default admissible range for a free quantity of this kind.
    ///
    /// The envelope keeps the search space physically sensible: pressures
    /// between 1 uPa and 1 MPa, flows between 1 pL/s and 1 L/s, channel
    /// cross sections below 1 cm, liquid densities between 500 and
    /// 2000 kg/m^3, viscosities between liquid-helium scale and 100 Pa*s.
    pub fn default_domain(self) -> Domain {
        match self {
            Attribute::Pressure => Domain::bounded(1e-6, 1e6),
            Attribute::FlowRate => Domain::bounded(1e-12, 1e-3),
            Attribute::Viscosity => Domain::bounded(1e-4, 1e2),
            Attribute::Density => Domain::bounded(500.0, 2000.0),
            Attribute::X | Attribute::Y => Domain::bounded(0.0, 10.0),
            Attribute::Length => Domain::bounded(1e-9, 1.0),
            Attribute::Width | Attribute::Height => Domain::bounded(1e-9, 1e-2),
            Attribute::Resistance => Domain::bounded(1.0, 1e15),
            Attribute::DropletVolume => Domain::bounded(1e-18, 1e-5),
            Attribute::Sharpness => Domain::bounded(1e-12, 1e-3),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Closed numeric range a variable may take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub lo: Real,
    pub hi: Real,
}

impl Domain {
    pub fn bounded(lo: Real, hi: Real) -> Self {
        debug_assert!(lo <= hi, "domain bounds out of order");
        Self { lo, hi }
    }

    pub fn non_negative() -> Self {
        Self { lo: 0.0, hi: 1e30 }
    }

    pub fn positive() -> Self {
        Self { lo: 1e-30, hi: 1e30 }
    }

    pub fn contains(&self, v: Real) -> bool {
        self.lo <= v && v <= self.hi
    }
}

/// A named symbolic real quantity bound to one (entity, attribute) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub id: VarId,
    pub name: String,
    pub entity: String,
    pub attr: Attribute,
    pub domain: Domain,
}

/// Memoizing variable allocator, keyed by (entity name, attribute).
///
/// The first request for a key allocates; every later request is a pure
/// lookup returning the same variable. Variables are reported in
/// first-requested order, which underwrites reproducible solver queries.
#[derive(Debug, Default)]
pub struct VariableRegistry {
    vars: Vec<Variable>,
    index: HashMap<(String, Attribute), VarId>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the variable for (entity, attribute), allocating it with the
    /// given domain on first request. The domain passed on later calls is
    /// ignored: the first allocation wins.
    pub fn variable_for(&mut self, entity: &str, attr: Attribute, domain: Domain) -> VarId {
        if let Some(&id) = self.index.get(&(entity.to_string(), attr)) {
            return id;
        }
        let id = VarId::from_index(self.vars.len() as u32);
        self.vars.push(Variable {
            id,
            name: format!("{}_{}", entity, attr.key()),
            entity: entity.to_string(),
            attr,
            domain,
        });
        self.index.insert((entity.to_string(), attr), id);
        id
    }

    /// Pure lookup; `None` if the key was never allocated.
    pub fn lookup(&self, entity: &str, attr: Attribute) -> Option<VarId> {
        self.index.get(&(entity.to_string(), attr)).copied()
    }

    pub fn get(&self, id: VarId) -> &Variable {
        &self.vars[id.index() as usize]
    }

    /// All variables in first-requested order.
    pub fn all_variables(&self) -> &[Variable] {
        &self.vars
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
