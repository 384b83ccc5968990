//! Hydraulic pumping parameters
//!
//! Pipe geometry and fluid properties for the hydraulic pumping estimate.

use serde::{Deserialize, Serialize};

/// Defaults for the hydraulic pumping method.
///
/// The hydraulic energy is
///
/// $$E = \frac{\rho g V (h_s + h_f)}{\eta}, \quad h_f = f \frac{L}{D} \frac{v^2}{2g}$$
///
/// so density, gravity and efficiency scale the result directly while pipe
/// length and diameter only enter through the friction term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydraulicParameters {
    /// Pipe internal diameter
    /// unit: m
    /// default: 1.5
    pub pipe_diameter_m: f64,

    /// Pipe length
    /// unit: m
    /// default: 100.0
    pub pipe_length_m: f64,

    /// Static lift between source and pond water level
    /// unit: m
    /// default: 0.0
    pub static_head_m: f64,

    /// Water density (seawater)
    /// unit: kg/m³
    /// default: 1025.0
    pub water_density_kg_m3: f64,

    /// Darcy friction factor
    /// unit: dimensionless
    /// default: 0.02
    pub friction_factor: f64,

    /// Wire-to-water pump efficiency
    /// unit: dimensionless
    /// default: 0.70
    pub pump_efficiency: f64,

    /// Gravitational acceleration
    /// unit: m/s²
    /// default: 9.81
    pub gravity_m_s2: f64,
}

impl Default for HydraulicParameters {
    fn default() -> Self {
        Self {
            pipe_diameter_m: 1.5,
            pipe_length_m: 100.0,
            static_head_m: 0.0,
            water_density_kg_m3: 1025.0,
            friction_factor: 0.02,
            pump_efficiency: 0.70,
            gravity_m_s2: 9.81,
        }
    }
}
