//! Emission models for shrimp aquaculture.
//!
//! One module per emission source. Each request type implements
//! [`footprint_core::source::EmissionSource`] and also exposes a free function
//! for standalone use.

pub mod audit;
pub mod energy;
pub mod land;
pub mod parameters;
pub mod pond;
pub mod procurement;
