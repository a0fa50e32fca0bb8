//! mf-schematic: graph model for microfluidic circuits.
//!
//! Provides:
//! - Entity types (Port, Node, Channel) and their kind tags
//! - `Schematic`: the owning, insertion-ordered collection of entities,
//!   channels and user constraints, built incrementally with fail-fast
//!   validation
//! - `UserConstraint`: extra relations over named physical quantities
//!
//! # Example
//!
//! ```
//! use mf_schematic::{ChannelSpec, PortKind, PortSpec, Schematic};
//!
//! let mut sch = Schematic::new();
//! sch.add_port("in", PortKind::Input, PortSpec::new().pressure(100.0)).unwrap();
//! sch.add_port("out", PortKind::Output, PortSpec::new()).unwrap();
//! sch.add_channel("in", "out", ChannelSpec::rectangle().min_width(1e-4)).unwrap();
//!
//! assert_eq!(sch.channels().len(), 1);
//! ```

pub mod constraint;
pub mod entities;
pub mod error;
pub mod schematic;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use constraint::{ConstraintExpr, Quantity, UserConstraint};
pub use entities::{Channel, ChannelShape, ChannelSpec, Entity, Node, NodeKind, Phase, Port, PortKind, PortSpec};
pub use error::{SchematicError, SchematicResult};
pub use schematic::{ChipBounds, Schematic};
