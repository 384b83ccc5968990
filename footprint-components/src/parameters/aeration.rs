//! Aeration parameters

use serde::{Deserialize, Serialize};

/// Default efficiencies for converting aerator shaft power to electrical demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AerationParameters {
    /// Electric motor efficiency
    /// unit: dimensionless
    /// default: 0.80
    pub motor_efficiency: f64,

    /// Additional blower efficiency term (1.0 for paddlewheels)
    /// unit: dimensionless
    /// default: 1.0
    pub blower_efficiency: f64,
}

impl Default for AerationParameters {
    fn default() -> Self {
        Self {
            motor_efficiency: 0.80,
            blower_efficiency: 1.0,
        }
    }
}
