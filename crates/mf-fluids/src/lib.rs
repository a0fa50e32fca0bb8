//! mf-fluids: fluid property catalog for microflow.
//!
//! Ports declare the identity of the fluid they inject; the catalog maps
//! common working fluids to the density and viscosity the physical rules
//! pin down. A fluid with unspecified properties leaves those quantities
//! free for the solver, bounded only by their default domains.

pub mod catalog;
pub mod error;

pub use catalog::{find_fluid, Fluid, FluidCatalogEntry, FLUID_CATALOG};
pub use error::{FluidError, FluidResult};
