//! Pond CH4/N2O flux parameters
//!
//! Global warming potentials and the organic-matter scaling used by the
//! tier-2 pond flux method.

use footprint_core::errors::FootprintResult;
use footprint_core::validation::{non_negative, positive};
use serde::{Deserialize, Serialize};

/// Global warming potentials applied to the pond gas masses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GwpValues {
    /// Methane GWP (20-year horizon, as stated in the methodology)
    /// unit: kg CO2e/kg CH4
    /// default: 84.0
    pub ch4: f64,

    /// Nitrous oxide GWP (100-year horizon)
    /// unit: kg CO2e/kg N2O
    /// default: 298.0
    pub n2o: f64,
}

impl Default for GwpValues {
    fn default() -> Self {
        Self {
            ch4: 84.0,
            n2o: 298.0,
        }
    }
}

impl GwpValues {
    pub fn validate(&self) -> FootprintResult<()> {
        non_negative("gwp_ch4", self.ch4)?;
        non_negative("gwp_n2o", self.n2o)?;
        Ok(())
    }
}

/// Saturating response of pond gas flux to total organic matter (TOM).
///
/// $$m(c) = 1 + a \frac{x}{x + k}, \quad x = \max(0, c - c_{floor})$$
///
/// The multiplier is 1 at or below the floor, never decreases with
/// concentration, and stays below $1 + a$.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganicMatterScaling {
    /// Concentration below which no scaling is applied
    /// unit: mg/L
    /// default: 10.0
    pub floor_mg_per_l: f64,

    /// Excess concentration at which half the maximum uplift is reached (k)
    /// unit: mg/L
    /// default: 15.0
    pub half_saturation_mg_per_l: f64,

    /// Maximum relative uplift (a)
    /// unit: dimensionless
    /// default: 1.0
    pub max_uplift: f64,

    /// Use the 95th-percentile reading for CH4 when it is available.
    /// Peak organic loading drives methanogenesis more than the mean does.
    /// default: true
    pub ch4_uses_p95: bool,
}

impl Default for OrganicMatterScaling {
    fn default() -> Self {
        Self {
            floor_mg_per_l: 10.0,
            half_saturation_mg_per_l: 15.0,
            max_uplift: 1.0,
            ch4_uses_p95: true,
        }
    }
}

impl OrganicMatterScaling {
    pub fn validate(&self) -> FootprintResult<()> {
        non_negative("organic_matter_floor_mg_per_l", self.floor_mg_per_l)?;
        positive(
            "organic_matter_half_saturation_mg_per_l",
            self.half_saturation_mg_per_l,
        )?;
        non_negative("organic_matter_max_uplift", self.max_uplift)?;
        Ok(())
    }

    /// Emission-factor multiplier at a TOM concentration (mg/L).
    pub fn multiplier(&self, concentration_mg_per_l: f64) -> f64 {
        let excess = (concentration_mg_per_l - self.floor_mg_per_l).max(0.0);
        1.0 + self.max_uplift * excess / (excess + self.half_saturation_mg_per_l)
    }
}

/// All pond flux method constants.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PondFluxParameters {
    pub gwp: GwpValues,
    pub organic_matter: OrganicMatterScaling,
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_multiplier_is_one_at_floor() {
        let scaling = OrganicMatterScaling::default();
        assert!(is_close!(scaling.multiplier(scaling.floor_mg_per_l), 1.0));
        assert!(is_close!(scaling.multiplier(0.0), 1.0));
    }

    #[test]
    fn test_multiplier_half_saturation() {
        let scaling = OrganicMatterScaling::default();
        let at_k = scaling.floor_mg_per_l + scaling.half_saturation_mg_per_l;
        assert!(is_close!(
            scaling.multiplier(at_k),
            1.0 + scaling.max_uplift / 2.0
        ));
    }

    #[test]
    fn test_multiplier_monotonic_and_bounded() {
        let scaling = OrganicMatterScaling::default();
        let mut previous = scaling.multiplier(0.0);
        for step in 1..=2000 {
            let concentration = step as f64 * 0.5;
            let m = scaling.multiplier(concentration);
            assert!(m >= previous, "multiplier decreased at {concentration} mg/L");
            assert!(m < 1.0 + scaling.max_uplift, "multiplier reached bound at {concentration}");
            previous = m;
        }
    }

    #[test]
    fn test_zero_half_saturation_rejected() {
        let scaling = OrganicMatterScaling {
            half_saturation_mg_per_l: 0.0,
            ..OrganicMatterScaling::default()
        };
        assert!(scaling.validate().is_err());
    }

    #[test]
    fn test_default_gwp() {
        let params = PondFluxParameters::default();
        assert!(is_close!(params.gwp.ch4, 84.0));
        assert!(is_close!(params.gwp.n2o, 298.0));
    }
}
