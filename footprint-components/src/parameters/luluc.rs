//! Land-use change parameters
//!
//! Allocation of a soil-carbon loss event over time.

use serde::{Deserialize, Serialize};

/// Defaults for allocating soil carbon lost at land conversion.
///
/// A fraction of the total loss is released immediately and counted in full
/// in any year that is still within the immediate window. The rest is spread
/// evenly over the amortization horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LulucParameters {
    /// Share of the soil carbon released at conversion
    /// unit: dimensionless
    /// default: 0.7
    pub immediate_release_fraction: f64,

    /// Years after conversion in which the immediate share is still counted
    /// unit: years
    /// default: 5.0
    pub immediate_window_years: f64,

    /// Horizon over which the gradual share is allocated
    /// unit: years
    /// default: 20.0
    pub amortization_years: f64,
}

impl Default for LulucParameters {
    fn default() -> Self {
        Self {
            immediate_release_fraction: 0.7,
            immediate_window_years: 5.0,
            amortization_years: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = LulucParameters::default();
        assert!((params.immediate_release_fraction - 0.7).abs() < 1e-10);
        assert!(params.immediate_window_years < params.amortization_years);
    }
}
