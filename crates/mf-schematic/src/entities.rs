//! Entity types of the circuit graph.

use mf_core::{EntityId, Real};
use mf_fluids::Fluid;
use serde::Serialize;

/// Direction of a boundary port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PortKind {
    /// Fluid enters the circuit here.
    Input,
    /// Fluid exits the circuit here.
    Output,
}

/// A boundary terminal of the circuit. Ports are leaves of the graph:
/// they cannot be intermediate hops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Port {
    pub name: String,
    pub kind: PortKind,
    /// Declared pressure (Pa); free if absent.
    pub fixed_pressure: Option<Real>,
    /// Declared volumetric flow rate (m^3/s); free if absent.
    pub fixed_flow_rate: Option<Real>,
    pub fluid: Fluid,
    /// Planar position on the chip (m); free if absent.
    pub position: Option<[Real; 2]>,
}

/// Optional attributes of a port, builder style.
#[derive(Debug, Clone, Default)]
pub struct PortSpec {
    pub fixed_pressure: Option<Real>,
    pub fixed_flow_rate: Option<Real>,
    pub fluid: Fluid,
    pub position: Option<[Real; 2]>,
}

impl PortSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the port pressure (Pa).
    pub fn pressure(mut self, pa: Real) -> Self {
        self.fixed_pressure = Some(pa);
        self
    }

    /// Fix the port flow rate (m^3/s).
    pub fn flow_rate(mut self, m3s: Real) -> Self {
        self.fixed_flow_rate = Some(m3s);
        self
    }

    pub fn fluid(mut self, fluid: Fluid) -> Self {
        self.fluid = fluid;
        self
    }

    /// Pin the port position on the chip (m).
    pub fn at(mut self, x: Real, y: Real) -> Self {
        self.position = Some([x, y]);
        self
    }
}

/// Kind of an internal junction. Unknown spellings are carried through to
/// compilation, where they fail with an unsupported-kind error rather than
/// being silently skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    /// Plain junction where channels merge or split.
    Junction,
    /// Droplet-generating T-junction: two inbound phases, one outbound.
    TJunction,
    /// A kind with no registered rule set.
    Other(String),
}

impl NodeKind {
    /// Parse the original textual spellings ("node", "t-junction", "tjunc").
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "node" | "junction" => NodeKind::Junction,
            "t-junction" | "tjunc" | "t_junction" => NodeKind::TJunction,
            other => NodeKind::Other(other.to_string()),
        }
    }
}

/// An internal junction/device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub position: Option<[Real; 2]>,
}

/// A port or a node; names are unique across both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Entity {
    Port(Port),
    Node(Node),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Port(p) => &p.name,
            Entity::Node(n) => &n.name,
        }
    }

    pub fn position(&self) -> Option<[Real; 2]> {
        match self {
            Entity::Port(p) => p.position,
            Entity::Node(n) => n.position,
        }
    }

    pub fn as_port(&self) -> Option<&Port> {
        match self {
            Entity::Port(p) => Some(p),
            Entity::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Entity::Node(n) => Some(n),
            Entity::Port(_) => None,
        }
    }
}

/// Cross-section shape of a channel. As with node kinds, unknown shapes
/// survive until compilation and fail there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ChannelShape {
    Rectangle,
    Other(String),
}

impl ChannelShape {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => ChannelShape::Rectangle,
            other => ChannelShape::Other(other.to_string()),
        }
    }
}

/// Phase carried by a channel, used to select T-junction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Phase {
    #[default]
    None,
    Continuous,
    Dispersed,
    Output,
}

/// A directed conduit between two entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    /// `{from}_{to}`; used as the entity part of this channel's variable names.
    pub name: String,
    pub from_name: String,
    pub to_name: String,
    #[serde(skip)]
    pub from: EntityId,
    #[serde(skip)]
    pub to: EntityId,
    pub shape: ChannelShape,
    pub phase: Phase,
    /// Geometry floors (m); free above 0 if absent.
    pub min_length: Option<Real>,
    pub min_width: Option<Real>,
    pub min_height: Option<Real>,
}

/// Optional attributes of a channel, builder style.
#[derive(Debug, Clone)]
pub struct ChannelSpec {
    pub shape: ChannelShape,
    pub phase: Phase,
    pub min_length: Option<Real>,
    pub min_width: Option<Real>,
    pub min_height: Option<Real>,
}

impl Default for ChannelSpec {
    fn default() -> Self {
        Self {
            shape: ChannelShape::Rectangle,
            phase: Phase::None,
            min_length: None,
            min_width: None,
            min_height: None,
        }
    }
}

impl ChannelSpec {
    /// A rectangular channel with no floors.
    pub fn rectangle() -> Self {
        Self::default()
    }

    pub fn shape(mut self, shape: ChannelShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    pub fn min_length(mut self, m: Real) -> Self {
        self.min_length = Some(m);
        self
    }

    pub fn min_width(mut self, m: Real) -> Self {
        self.min_width = Some(m);
        self
    }

    pub fn min_height(mut self, m: Real) -> Self {
        self.min_height = Some(m);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_parsing() {
        assert_eq!(NodeKind::parse("node"), NodeKind::Junction);
        assert_eq!(NodeKind::parse("T-Junction"), NodeKind::TJunction);
        assert_eq!(NodeKind::parse("tjunc"), NodeKind::TJunction);
        assert_eq!(NodeKind::parse("bogus"), NodeKind::Other("bogus".into()));
    }

    #[test]
    fn channel_shape_parsing() {
        assert_eq!(ChannelShape::parse("rectangle"), ChannelShape::Rectangle);
        assert_eq!(
            ChannelShape::parse("parabolic"),
            ChannelShape::Other("parabolic".into())
        );
    }

    #[test]
    fn port_spec_builder() {
        let spec = PortSpec::new().pressure(100.0).at(0.01, 0.02);
        assert_eq!(spec.fixed_pressure, Some(100.0));
        assert_eq!(spec.position, Some([0.01, 0.02]));
        assert!(spec.fixed_flow_rate.is_none());
    }
}
