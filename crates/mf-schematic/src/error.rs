//! Schematic construction errors.
//!
//! All of these are raised synchronously by the offending builder call and
//! leave the schematic's prior state untouched.

use thiserror::Error;

pub type SchematicResult<T> = Result<T, SchematicError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchematicError {
    /// A port or node name collides with an existing entity.
    #[error("Duplicate name: '{name}' already exists in this schematic")]
    DuplicateName { name: String },

    /// A channel endpoint does not resolve to any port or node.
    #[error("Channel {from} -> {to} references unknown entity '{name}'")]
    UnknownEndpoint {
        from: String,
        to: String,
        name: String,
    },

    /// Ports are leaves: no channel may enter an input port or leave an
    /// output port.
    #[error("Port '{name}' cannot be an intermediate hop: {what}")]
    PortNotLeaf { name: String, what: &'static str },

    /// At most one channel per directed (from, to) pair.
    #[error("Channel already exists between '{from}' and '{to}'")]
    DuplicateChannel { from: String, to: String },

    /// A declared value must be a positive finite number.
    #[error("{what} must be a positive finite number")]
    NonPositive { what: &'static str },

    /// A user constraint references an entity not present in the schematic.
    #[error("Constraint references unknown entity '{name}'")]
    UnknownReference { name: String },

    /// Chip bounds must be finite with min < max on both axes.
    #[error("Chip bounds must be finite with x_min < x_max and y_min < y_max")]
    InvalidChipBounds,
}
