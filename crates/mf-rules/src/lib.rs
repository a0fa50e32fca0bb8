//! mf-rules: physical rule library.
//!
//! Pure, stateless constructors mapping bound variables and literal values
//! to the equations and inequalities the governing physics require. Rules
//! never see the schematic; the constraint compiler binds each rule to the
//! variables of a concrete graph element and collects the results.
//!
//! Quantities are raw SI values: Pa, m^3/s, Pa*s, kg/m^3, m.

pub mod continuity;
pub mod droplet;
pub mod geometry;
pub mod hydraulics;

pub use continuity::{continuity, flow_balance};
pub use droplet::{droplet_volume, droplet_volume_value, sharpness, Q_GUTTER};
pub use geometry::{collinear, crit_angle_bound, min_floor, pythagorean_length, within_chip};
pub use hydraulics::{
    port_inflow, pressure_flow, rectangular_resistance, rectangular_resistance_value,
};
