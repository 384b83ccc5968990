//! Energy to emissions conversion.
//!
//! Pumping and aeration both end in an electricity or fuel demand expressed in
//! kWh. This module turns that demand into kg CO2e:
//!
//! - **Grid**: $E \times EF_{grid}$ with $EF_{grid}$ the caller's override or
//!   the country default.
//! - **Fuel**: $E \times 3.6 / LHV \times EF_{fuel}$, i.e. kWh to MJ, MJ to
//!   litres via the lower heating value, litres to kg CO2e.

use crate::audit::{resolve_factor, FactorOrigin};
use crate::constants::MJ_PER_KWH;
use crate::errors::{FootprintError, FootprintResult};
use crate::reference::{Fuel, ReferenceData};
use crate::validation::{non_negative, non_negative_opt};
use serde::{Deserialize, Serialize};

/// How the energy is supplied, with optional emission-factor override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "energy_source", rename_all = "snake_case")]
pub enum EnergySupply {
    Grid {
        #[serde(default)]
        grid_country: Option<String>,
        /// unit: kg CO2e/kWh
        #[serde(default)]
        grid_ef_kgco2e_per_kwh: Option<f64>,
    },
    Diesel {
        /// unit: kg CO2e/L
        #[serde(default)]
        fuel_ef_kgco2e_per_liter: Option<f64>,
    },
    Petrol {
        /// unit: kg CO2e/L
        #[serde(default)]
        fuel_ef_kgco2e_per_liter: Option<f64>,
    },
}

impl EnergySupply {
    /// Grid electricity using the country's default factor.
    pub fn grid(country: &str) -> Self {
        Self::Grid {
            grid_country: Some(country.to_string()),
            grid_ef_kgco2e_per_kwh: None,
        }
    }

    /// Grid electricity with an explicit factor (kg CO2e/kWh).
    pub fn grid_with_factor(factor: f64) -> Self {
        Self::Grid {
            grid_country: None,
            grid_ef_kgco2e_per_kwh: Some(factor),
        }
    }

    pub fn fuel(fuel: Fuel) -> Self {
        match fuel {
            Fuel::Diesel => Self::Diesel {
                fuel_ef_kgco2e_per_liter: None,
            },
            Fuel::Petrol => Self::Petrol {
                fuel_ef_kgco2e_per_liter: None,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Grid { .. } => "grid",
            Self::Diesel { .. } => "diesel",
            Self::Petrol { .. } => "petrol",
        }
    }

    /// Convert an energy demand into emissions.
    pub fn emissions(
        &self,
        energy_kwh: f64,
        reference: &ReferenceData,
    ) -> FootprintResult<EnergyEmissions> {
        let energy_kwh = non_negative("energy_kwh", energy_kwh)?;

        match self {
            Self::Grid {
                grid_country,
                grid_ef_kgco2e_per_kwh,
            } => {
                let override_value =
                    non_negative_opt("grid_ef_kgco2e_per_kwh", *grid_ef_kgco2e_per_kwh)?;
                let (factor, origin) = match (override_value, grid_country) {
                    (Some(value), _) => (value, FactorOrigin::Override),
                    (None, Some(country)) => {
                        (reference.grid_factor(country)?, FactorOrigin::Default)
                    }
                    (None, None) => {
                        return Err(FootprintError::missing(
                            "grid energy source",
                            &["grid_country", "grid_ef_kgco2e_per_kwh"],
                        ))
                    }
                };

                Ok(EnergyEmissions {
                    kgco2e: energy_kwh * factor,
                    audit: EnergyAudit {
                        energy_kwh,
                        energy_source: self.label().to_string(),
                        grid_country: grid_country.clone(),
                        emission_factor: factor,
                        emission_factor_unit: "kgCO2e/kWh".to_string(),
                        factor_origin: origin,
                        fuel_liters: None,
                        lhv_mj_per_liter: None,
                    },
                })
            }
            Self::Diesel {
                fuel_ef_kgco2e_per_liter,
            } => fuel_emissions(Fuel::Diesel, *fuel_ef_kgco2e_per_liter, energy_kwh, reference),
            Self::Petrol {
                fuel_ef_kgco2e_per_liter,
            } => fuel_emissions(Fuel::Petrol, *fuel_ef_kgco2e_per_liter, energy_kwh, reference),
        }
    }
}

fn fuel_emissions(
    fuel: Fuel,
    override_value: Option<f64>,
    energy_kwh: f64,
    reference: &ReferenceData,
) -> FootprintResult<EnergyEmissions> {
    let override_value = non_negative_opt("fuel_ef_kgco2e_per_liter", override_value)?;
    let props = reference.fuels.properties(fuel);
    let (factor, origin) = resolve_factor(override_value, props.kgco2e_per_liter);

    let mj = energy_kwh * MJ_PER_KWH;
    let liters = mj / props.lhv_mj_per_liter;

    Ok(EnergyEmissions {
        kgco2e: liters * factor,
        audit: EnergyAudit {
            energy_kwh,
            energy_source: fuel.to_string(),
            grid_country: None,
            emission_factor: factor,
            emission_factor_unit: "kgCO2e/L".to_string(),
            factor_origin: origin,
            fuel_liters: Some(liters),
            lhv_mj_per_liter: Some(props.lhv_mj_per_liter),
        },
    })
}

/// Emissions from an energy demand, with the values used to compute them.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyEmissions {
    pub kgco2e: f64,
    pub audit: EnergyAudit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyAudit {
    pub energy_kwh: f64,
    pub energy_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_country: Option<String>,
    pub emission_factor: f64,
    pub emission_factor_unit: String,
    pub factor_origin: FactorOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_liters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lhv_mj_per_liter: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_country_lookup() {
        let out = EnergySupply::grid("Ecuador")
            .emissions(1000.0, ReferenceData::builtin())
            .unwrap();
        assert_relative_eq!(out.kgco2e, 206.0, max_relative = 1e-12);
        assert_eq!(out.audit.factor_origin, FactorOrigin::Default);
    }

    #[test]
    fn test_grid_override_beats_country() {
        let supply = EnergySupply::Grid {
            grid_country: Some("Atlantis".to_string()),
            grid_ef_kgco2e_per_kwh: Some(0.5),
        };
        let out = supply.emissions(1000.0, ReferenceData::builtin()).unwrap();
        assert_relative_eq!(out.kgco2e, 500.0, max_relative = 1e-12);
        assert_eq!(out.audit.factor_origin, FactorOrigin::Override);
    }

    #[test]
    fn test_grid_unknown_country_fails() {
        let err = EnergySupply::grid("Atlantis")
            .emissions(1.0, ReferenceData::builtin())
            .unwrap_err();
        assert!(matches!(err, FootprintError::UnknownCategory { .. }));
    }

    #[test]
    fn test_grid_without_country_or_factor_fails() {
        let supply = EnergySupply::Grid {
            grid_country: None,
            grid_ef_kgco2e_per_kwh: None,
        };
        let err = supply.emissions(1.0, ReferenceData::builtin()).unwrap_err();
        assert!(matches!(err, FootprintError::MissingField { .. }));
    }

    #[test]
    fn test_diesel_conversion() {
        // 100 kWh = 360 MJ = 10 L at 36 MJ/L = 26.4 kg CO2e
        let out = EnergySupply::fuel(Fuel::Diesel)
            .emissions(100.0, ReferenceData::builtin())
            .unwrap();
        assert_relative_eq!(out.audit.fuel_liters.unwrap(), 10.0, max_relative = 1e-12);
        assert_relative_eq!(out.kgco2e, 26.4, max_relative = 1e-12);
    }

    #[test]
    fn test_petrol_override() {
        let supply = EnergySupply::Petrol {
            fuel_ef_kgco2e_per_liter: Some(3.0),
        };
        let out = supply.emissions(34.2 / 3.6, ReferenceData::builtin()).unwrap();
        // exactly one litre
        assert_relative_eq!(out.kgco2e, 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_tagged_serde_shape() {
        let supply: EnergySupply =
            serde_json::from_str(r#"{"energy_source": "grid", "grid_country": "Mexico"}"#)
                .unwrap();
        assert_eq!(supply, EnergySupply::grid("Mexico"));
    }
}
