//! Method parameters
//!
//! Parameter structures for the emission models. Each struct documents its
//! defaults, which follow the footprint methodology; they fill in any value an
//! operator leaves out when building a request.

mod aeration;
mod hydraulic;
mod luluc;
mod pond_flux;

pub use aeration::AerationParameters;
pub use hydraulic::HydraulicParameters;
pub use luluc::LulucParameters;
pub use pond_flux::{GwpValues, OrganicMatterScaling, PondFluxParameters};

use footprint_core::errors::FootprintResult;
use serde::de::DeserializeOwned;

/// Load a parameter struct from TOML.
///
/// Every parameter struct uses `#[serde(default)]`, so fields left out of the
/// document keep their defaults.
pub fn from_toml_str<T: DeserializeOwned>(source: &str) -> FootprintResult<T> {
    Ok(toml::from_str(source)?)
}
