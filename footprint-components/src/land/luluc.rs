//! Land-use change (LULUC) soil carbon emissions
//!
//! Converting natural land to ponds is assumed to lose the full soil organic
//! carbon stock of the converted area. That one-off event is allocated to
//! reporting years:
//!
//! 1. Total event: $C_{loss} = SOC \times A$ (t C), $\times 3.67$ for t CO2.
//! 2. Immediate share $f$: counted in full while the years since conversion
//!    are within the immediate window, zero afterwards.
//! 3. Gradual share $1 - f$: spread evenly over the amortization horizon,
//!    counted only while still inside it.
//! 4. Annual allocation (kg) = (immediate + gradual) × 1000; the cycle
//!    allocation scales that by cycle_days/365.

use crate::parameters::LulucParameters;
use footprint_core::audit::FactorOrigin;
use footprint_core::constants::{C_TO_CO2, DAYS_PER_YEAR, KG_PER_TONNE};
use footprint_core::errors::{FootprintError, FootprintResult};
use footprint_core::reference::{ReferenceData, SoilType};
use footprint_core::source::{EmissionSource, EstimationContext, SourceEstimate, SourceKind};
use footprint_core::validation::{non_negative, non_negative_opt, positive};
use serde::{Deserialize, Serialize};
use tracing::warn;

fn default_immediate_release_fraction() -> f64 {
    LulucParameters::default().immediate_release_fraction
}

fn default_immediate_window_years() -> f64 {
    LulucParameters::default().immediate_window_years
}

fn default_amortization_years() -> f64 {
    LulucParameters::default().amortization_years
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LulucRequest {
    pub soil_type: SoilType,
    /// Site SOC stock resolved from an external soil survey; replaces the
    /// soil-type default when present.
    /// unit: t C/ha
    #[serde(default)]
    pub soc_tc_per_ha: Option<f64>,
    /// unit: ha
    pub area_ha: f64,
    #[serde(default)]
    pub years_since_conversion: Option<f64>,
    /// Older name for `years_since_conversion`.
    #[serde(default)]
    pub farm_age_years: Option<f64>,
    pub cycle_days: f64,
    #[serde(default = "default_immediate_release_fraction")]
    pub immediate_release_fraction: f64,
    #[serde(default = "default_immediate_window_years")]
    pub immediate_window_years: f64,
    #[serde(default = "default_amortization_years")]
    pub amortization_years: f64,
}

impl LulucRequest {
    /// A request using the default allocation parameters.
    pub fn new(soil_type: SoilType, area_ha: f64, years_since_conversion: f64, cycle_days: f64) -> Self {
        Self::from_parameters(
            &LulucParameters::default(),
            soil_type,
            area_ha,
            years_since_conversion,
            cycle_days,
        )
    }

    pub fn from_parameters(
        parameters: &LulucParameters,
        soil_type: SoilType,
        area_ha: f64,
        years_since_conversion: f64,
        cycle_days: f64,
    ) -> Self {
        Self {
            soil_type,
            soc_tc_per_ha: None,
            area_ha,
            years_since_conversion: Some(years_since_conversion),
            farm_age_years: None,
            cycle_days,
            immediate_release_fraction: parameters.immediate_release_fraction,
            immediate_window_years: parameters.immediate_window_years,
            amortization_years: parameters.amortization_years,
        }
    }

    /// Years since conversion, accepting the older field name.
    pub fn resolved_years_since_conversion(&self) -> FootprintResult<f64> {
        let years = self
            .years_since_conversion
            .or(self.farm_age_years)
            .ok_or_else(|| {
                FootprintError::missing("LULUC", &["years_since_conversion", "farm_age_years"])
            })?;
        non_negative("years_since_conversion", years)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LulucAudit {
    pub soil_type: SoilType,
    pub soc_tc_per_ha: f64,
    pub soc_origin: FactorOrigin,
    pub area_ha: f64,
    pub years_since_conversion: f64,
    pub immediate_release_fraction: f64,
    pub immediate_window_years: f64,
    pub amortization_years: f64,
    pub total_event_tco2: f64,
    pub immediate_tco2: f64,
    pub gradual_tco2: f64,
    pub annual_kgco2e: f64,
}

/// Current-year LULUC allocation (kg CO2e/yr) with the audit of values used.
pub fn luluc_annual_emissions(
    request: &LulucRequest,
    reference: &ReferenceData,
) -> FootprintResult<(f64, LulucAudit)> {
    let area = non_negative("area_ha", request.area_ha)?;
    positive("cycle_days", request.cycle_days)?;
    let amortization = positive("amortization_years", request.amortization_years)?;
    let window = non_negative("immediate_window_years", request.immediate_window_years)?;
    let years = request.resolved_years_since_conversion()?;

    if request.immediate_release_fraction.is_nan() {
        return Err(FootprintError::out_of_range(
            "immediate_release_fraction",
            "a number",
            request.immediate_release_fraction,
        ));
    }
    let fraction = request.immediate_release_fraction.clamp(0.0, 1.0);
    if fraction != request.immediate_release_fraction {
        warn!(
            requested = request.immediate_release_fraction,
            used = fraction,
            "Immediate release fraction clamped into [0, 1]"
        );
    }

    let (soc, soc_origin) = match non_negative_opt("soc_tc_per_ha", request.soc_tc_per_ha)? {
        Some(soc) => (soc, FactorOrigin::Override),
        None => (
            reference.soil_carbon.total(request.soil_type),
            FactorOrigin::Default,
        ),
    };

    let total_tco2 = soc * area * C_TO_CO2;

    let immediate_tco2 = if years <= window {
        total_tco2 * fraction
    } else {
        0.0
    };
    let gradual_tco2 = if years < amortization {
        total_tco2 * (1.0 - fraction) / amortization
    } else {
        0.0
    };

    let annual_kg = (immediate_tco2 + gradual_tco2) * KG_PER_TONNE;

    Ok((
        annual_kg,
        LulucAudit {
            soil_type: request.soil_type,
            soc_tc_per_ha: soc,
            soc_origin,
            area_ha: area,
            years_since_conversion: years,
            immediate_release_fraction: fraction,
            immediate_window_years: window,
            amortization_years: amortization,
            total_event_tco2: total_tco2,
            immediate_tco2,
            gradual_tco2,
            annual_kgco2e: annual_kg,
        },
    ))
}

/// LULUC allocation for one cycle of `cycle_days` (kg CO2e).
pub fn luluc_cycle_emissions(
    request: &LulucRequest,
    reference: &ReferenceData,
) -> FootprintResult<f64> {
    let (annual_kg, _) = luluc_annual_emissions(request, reference)?;
    Ok(annual_kg * request.cycle_days / DAYS_PER_YEAR)
}

impl EmissionSource for LulucRequest {
    type Audit = LulucAudit;

    fn kind(&self) -> SourceKind {
        SourceKind::Luluc
    }

    /// Annual allocation; the reporting period decides how much of it counts.
    fn estimate(&self, ctx: &EstimationContext<'_>) -> FootprintResult<SourceEstimate<LulucAudit>> {
        if let Some(period_days) = ctx.period.cycle_days() {
            if self.cycle_days != period_days {
                return Err(FootprintError::conflicting("LULUC", &["cycle_days"]));
            }
        }
        let (annual_kg, audit) = luluc_annual_emissions(self, ctx.reference)?;
        Ok(SourceEstimate::annual(annual_kg, audit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use footprint_core::period::{Boundary, ReportingPeriod};

    fn reference() -> &'static ReferenceData {
        ReferenceData::builtin()
    }

    fn total_event_kg(soil: SoilType, area_ha: f64) -> f64 {
        reference().soil_carbon.total(soil) * area_ha * C_TO_CO2 * KG_PER_TONNE
    }

    #[test]
    fn test_mangrove_two_years_after_conversion() {
        let request = LulucRequest {
            amortization_years: 20.0,
            ..LulucRequest::new(SoilType::Mangrove, 5.0, 2.0, 90.0)
        };
        let (annual, audit) = luluc_annual_emissions(&request, reference()).unwrap();

        // 750 tC/ha × 5 ha × 3.67 = 13762.5 tCO2
        assert_relative_eq!(audit.total_event_tco2, 13_762.5, max_relative = 1e-12);
        let expected = (13_762.5 * 0.7 + 13_762.5 * 0.3 / 20.0) * 1000.0;
        assert_relative_eq!(annual, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_year_zero_gets_immediate_plus_one_share() {
        for soil in [SoilType::Desert, SoilType::Tropical, SoilType::Peatland] {
            for area in [0.5, 3.0, 40.0] {
                let request = LulucRequest::new(soil, area, 0.0, 120.0);
                let (annual, _) = luluc_annual_emissions(&request, reference()).unwrap();
                let total = total_event_kg(soil, area);
                assert_relative_eq!(
                    annual,
                    total * 0.7 + total * 0.3 / 20.0,
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_beyond_amortization_only_immediate_within_window() {
        // Window extends past the horizon: immediate share still applies.
        let request = LulucRequest {
            immediate_window_years: 30.0,
            ..LulucRequest::new(SoilType::Tropical, 2.0, 25.0, 90.0)
        };
        let (annual, audit) = luluc_annual_emissions(&request, reference()).unwrap();
        assert_eq!(audit.gradual_tco2, 0.0);
        assert_relative_eq!(
            annual,
            total_event_kg(SoilType::Tropical, 2.0) * 0.7,
            max_relative = 1e-12
        );

        // Outside both: nothing left to allocate.
        let request = LulucRequest::new(SoilType::Tropical, 2.0, 20.0, 90.0);
        let (annual, _) = luluc_annual_emissions(&request, reference()).unwrap();
        assert_eq!(annual, 0.0);
    }

    #[test]
    fn test_gradual_only_after_window() {
        let request = LulucRequest::new(SoilType::Boreal, 1.0, 6.0, 90.0);
        let (annual, audit) = luluc_annual_emissions(&request, reference()).unwrap();
        assert_eq!(audit.immediate_tco2, 0.0);
        assert_relative_eq!(
            annual,
            total_event_kg(SoilType::Boreal, 1.0) * 0.3 / 20.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_cycle_scales_annual() {
        let request = LulucRequest::new(SoilType::Mangrove, 5.0, 2.0, 73.0);
        let (annual, _) = luluc_annual_emissions(&request, reference()).unwrap();
        let cycle = luluc_cycle_emissions(&request, reference()).unwrap();
        assert_relative_eq!(cycle, annual * 0.2, max_relative = 1e-12);
    }

    #[test]
    fn test_legacy_alias_and_missing_years() {
        let request = LulucRequest {
            years_since_conversion: None,
            farm_age_years: Some(2.0),
            ..LulucRequest::new(SoilType::Mangrove, 5.0, 0.0, 90.0)
        };
        assert_eq!(request.resolved_years_since_conversion().unwrap(), 2.0);

        let request = LulucRequest {
            years_since_conversion: None,
            farm_age_years: None,
            ..request
        };
        let err = luluc_annual_emissions(&request, reference()).unwrap_err();
        assert!(matches!(err, FootprintError::MissingField { .. }));
        assert!(err.to_string().contains("farm_age_years"));
    }

    #[test]
    fn test_preferred_name_wins_over_alias() {
        let request = LulucRequest {
            years_since_conversion: Some(1.0),
            farm_age_years: Some(9.0),
            ..LulucRequest::new(SoilType::Mangrove, 5.0, 0.0, 90.0)
        };
        assert_eq!(request.resolved_years_since_conversion().unwrap(), 1.0);
    }

    #[test]
    fn test_immediate_fraction_is_clamped() {
        let request = LulucRequest {
            immediate_release_fraction: 1.5,
            ..LulucRequest::new(SoilType::Desert, 1.0, 0.0, 90.0)
        };
        let (annual, audit) = luluc_annual_emissions(&request, reference()).unwrap();
        assert_eq!(audit.immediate_release_fraction, 1.0);
        assert_relative_eq!(
            annual,
            total_event_kg(SoilType::Desert, 1.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_measured_soc_replaces_default() {
        let request = LulucRequest {
            soc_tc_per_ha: Some(100.0),
            ..LulucRequest::new(SoilType::Mangrove, 1.0, 10.0, 90.0)
        };
        let (_, audit) = luluc_annual_emissions(&request, reference()).unwrap();
        assert_eq!(audit.soc_origin, FactorOrigin::Override);
        assert_relative_eq!(audit.total_event_tco2, 367.0, max_relative = 1e-12);
    }

    #[test]
    fn test_validation() {
        let cases = [
            (
                LulucRequest::new(SoilType::Desert, -1.0, 0.0, 90.0),
                "area_ha",
            ),
            (
                LulucRequest::new(SoilType::Desert, 1.0, 0.0, 0.0),
                "cycle_days",
            ),
            (
                LulucRequest::new(SoilType::Desert, 1.0, -1.0, 90.0),
                "years_since_conversion",
            ),
            (
                LulucRequest {
                    amortization_years: 0.0,
                    ..LulucRequest::new(SoilType::Desert, 1.0, 0.0, 90.0)
                },
                "amortization_years",
            ),
        ];
        for (request, field) in cases {
            let err = luluc_annual_emissions(&request, reference()).unwrap_err();
            assert_eq!(err.field(), Some(field));
        }
    }

    #[test]
    fn test_cycle_length_must_match_reporting_period() {
        let request = LulucRequest::new(SoilType::Mangrove, 1.0, 2.0, 365.0);
        let ctx = |period| EstimationContext {
            period,
            boundary: Boundary::A,
            harvested_kg: 1000.0,
            reference: reference(),
        };

        let err = request.estimate(&ctx(ReportingPeriod::cycle(90.0))).unwrap_err();
        assert_eq!(
            err,
            FootprintError::conflicting("LULUC", &["cycle_days"])
        );
        assert!(request.estimate(&ctx(ReportingPeriod::cycle(365.0))).is_ok());
        assert!(request.estimate(&ctx(ReportingPeriod::Year)).is_ok());
    }
}
