//! Aeration emissions
//!
//! Shaft power is converted to electrical demand and integrated over the
//! operating hours:
//!
//! $$E = \frac{P_{hp} \times 0.7457}{\eta_{motor} \, \eta_{blower}} \times t$$
//!
//! The demand is then turned into emissions by the selected energy supply.

use crate::parameters::AerationParameters;
use footprint_core::constants::HP_TO_KW;
use footprint_core::energy::{EnergyAudit, EnergySupply};
use footprint_core::errors::FootprintResult;
use footprint_core::reference::ReferenceData;
use footprint_core::source::{EmissionSource, EstimationContext, SourceEstimate, SourceKind};
use footprint_core::validation::{efficiency, non_negative};
use serde::{Deserialize, Serialize};
use tracing::debug;

fn default_motor_efficiency() -> f64 {
    AerationParameters::default().motor_efficiency
}

fn default_blower_efficiency() -> f64 {
    AerationParameters::default().blower_efficiency
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AerationRequest {
    /// Installed aerator shaft power
    /// unit: hp
    pub total_aeration_hp: f64,
    /// Total hours of operation in the reporting period
    /// unit: h
    pub operating_hours: f64,
    #[serde(default = "default_motor_efficiency")]
    pub motor_efficiency: f64,
    #[serde(default = "default_blower_efficiency")]
    pub blower_efficiency: f64,
    pub energy: EnergySupply,
}

impl AerationRequest {
    /// A request using the default efficiencies.
    pub fn new(total_aeration_hp: f64, operating_hours: f64, energy: EnergySupply) -> Self {
        Self::from_parameters(
            &AerationParameters::default(),
            total_aeration_hp,
            operating_hours,
            energy,
        )
    }

    pub fn from_parameters(
        parameters: &AerationParameters,
        total_aeration_hp: f64,
        operating_hours: f64,
        energy: EnergySupply,
    ) -> Self {
        Self {
            total_aeration_hp,
            operating_hours,
            motor_efficiency: parameters.motor_efficiency,
            blower_efficiency: parameters.blower_efficiency,
            energy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AerationAudit {
    pub total_aeration_hp: f64,
    pub operating_hours: f64,
    pub motor_efficiency: f64,
    pub blower_efficiency: f64,
    pub electrical_kw: f64,
    pub energy: EnergyAudit,
}

/// Electrical energy drawn by the aerators (kWh).
pub fn aeration_energy_kwh(request: &AerationRequest) -> FootprintResult<f64> {
    Ok(electrical_kw(request)? * non_negative("operating_hours", request.operating_hours)?)
}

fn electrical_kw(request: &AerationRequest) -> FootprintResult<f64> {
    let hp = non_negative("total_aeration_hp", request.total_aeration_hp)?;
    let motor = efficiency("motor_efficiency", request.motor_efficiency)?;
    let blower = efficiency("blower_efficiency", request.blower_efficiency)?;
    Ok(hp * HP_TO_KW / (motor * blower))
}

/// Aeration emissions (kg CO2e) with the audit of values used.
pub fn aeration_emissions(
    request: &AerationRequest,
    reference: &ReferenceData,
) -> FootprintResult<(f64, AerationAudit)> {
    let kw = electrical_kw(request)?;
    let energy_kwh = aeration_energy_kwh(request)?;
    let emissions = request.energy.emissions(energy_kwh, reference)?;

    debug!(energy_kwh, kgco2e = emissions.kgco2e, "Aeration emissions resolved");

    Ok((
        emissions.kgco2e,
        AerationAudit {
            total_aeration_hp: request.total_aeration_hp,
            operating_hours: request.operating_hours,
            motor_efficiency: request.motor_efficiency,
            blower_efficiency: request.blower_efficiency,
            electrical_kw: kw,
            energy: emissions.audit,
        },
    ))
}

impl EmissionSource for AerationRequest {
    type Audit = AerationAudit;

    fn kind(&self) -> SourceKind {
        SourceKind::Aeration
    }

    fn estimate(&self, ctx: &EstimationContext<'_>) -> FootprintResult<SourceEstimate<AerationAudit>> {
        let (kgco2e, audit) = aeration_emissions(self, ctx.reference)?;
        Ok(SourceEstimate::for_period(kgco2e, audit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use footprint_core::reference::Fuel;

    #[test]
    fn test_energy_from_shaft_power() {
        // 50 hp at 0.8 motor efficiency for 1080 h
        let request = AerationRequest::new(50.0, 1080.0, EnergySupply::grid("Ecuador"));
        let expected = 50.0 * 0.7457 / 0.8 * 1080.0;
        assert_relative_eq!(
            aeration_energy_kwh(&request).unwrap(),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_override_scales_proportionally() {
        let by_country = AerationRequest::new(50.0, 1080.0, EnergySupply::grid("Ecuador"));
        let by_override = AerationRequest::new(50.0, 1080.0, EnergySupply::grid_with_factor(0.5));

        let (country_kg, _) = aeration_emissions(&by_country, ReferenceData::builtin()).unwrap();
        let (override_kg, audit) =
            aeration_emissions(&by_override, ReferenceData::builtin()).unwrap();

        assert_relative_eq!(override_kg / country_kg, 0.5 / 0.206, max_relative = 1e-12);
        assert_eq!(audit.energy.emission_factor, 0.5);
    }

    #[test]
    fn test_blower_efficiency_increases_demand() {
        let base = AerationRequest::new(10.0, 100.0, EnergySupply::grid("Mexico"));
        let with_blower = AerationRequest {
            blower_efficiency: 0.7,
            ..base.clone()
        };
        let ratio =
            aeration_energy_kwh(&with_blower).unwrap() / aeration_energy_kwh(&base).unwrap();
        assert_relative_eq!(ratio, 1.0 / 0.7, max_relative = 1e-12);
    }

    #[test]
    fn test_diesel_aeration() {
        let request = AerationRequest::new(10.0, 100.0, EnergySupply::fuel(Fuel::Diesel));
        let (kgco2e, audit) = aeration_emissions(&request, ReferenceData::builtin()).unwrap();
        let kwh = 10.0 * 0.7457 / 0.8 * 100.0;
        assert_relative_eq!(kgco2e, kwh * 3.6 / 36.0 * 2.64, max_relative = 1e-12);
        assert_eq!(audit.energy.energy_source, "diesel");
    }

    #[test]
    fn test_validation() {
        let request = AerationRequest {
            motor_efficiency: 0.0,
            ..AerationRequest::new(10.0, 100.0, EnergySupply::grid("Mexico"))
        };
        assert_eq!(
            aeration_energy_kwh(&request).unwrap_err().field(),
            Some("motor_efficiency")
        );

        let request = AerationRequest::new(10.0, -1.0, EnergySupply::grid("Mexico"));
        assert_eq!(
            aeration_energy_kwh(&request).unwrap_err().field(),
            Some("operating_hours")
        );

        let request = AerationRequest::new(-10.0, 1.0, EnergySupply::grid("Mexico"));
        assert_eq!(
            aeration_energy_kwh(&request).unwrap_err().field(),
            Some("total_aeration_hp")
        );
    }
}
