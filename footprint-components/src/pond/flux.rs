//! Pond CH4 and N2O flux
//!
//! Area-based emission factors (g gas/m²/day) integrated over the reporting
//! period and weighted by global warming potential.
//!
//! # Tiers
//!
//! 1. `default`: category midpoint for the farming-intensity class, unless a
//!    manual factor is supplied for a gas.
//! 2. `organic-matter-scaled`: the tier-1 factors multiplied by a saturating
//!    response to total organic matter (TOM), see [`OrganicMatterScaling`].
//!    CH4 may respond to the 95th-percentile TOM reading instead of the mean.
//! 3. `measured`: directly measured daily fluxes for both gases.
//!
//! # Mass
//!
//! $$m_{gas} = EF_{gas} \times A_{pond} \times days / 1000 \quad (kg)$$
//!
//! and $kg\,CO_2e = m_{CH_4} \cdot GWP_{CH_4} + m_{N_2O} \cdot GWP_{N_2O}$.

use crate::parameters::{GwpValues, OrganicMatterScaling, PondFluxParameters};
use footprint_core::constants::G_PER_KG;
use footprint_core::errors::{FootprintError, FootprintResult};
use footprint_core::reference::{IntensityClass, ReferenceData};
use footprint_core::source::{EmissionSource, EstimationContext, SourceEstimate, SourceKind};
use footprint_core::validation::{non_negative, non_negative_opt};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Manual replacements for the category default factors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorOverrides {
    /// unit: g CH4/m²/day
    #[serde(default)]
    pub ch4_ef_g_m2_day: Option<f64>,
    /// unit: g N2O/m²/day
    #[serde(default)]
    pub n2o_ef_g_m2_day: Option<f64>,
}

/// Summary of TOM monitoring over the period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrganicMatterSummary {
    /// unit: mg/L
    pub average_mg_per_l: f64,
    /// unit: mg/L
    #[serde(default)]
    pub p95_mg_per_l: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PondTier {
    #[default]
    Default,
    OrganicMatterScaled,
    Measured,
}

impl fmt::Display for PondTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::OrganicMatterScaled => write!(f, "organic-matter-scaled"),
            Self::Measured => write!(f, "measured"),
        }
    }
}

/// Emission-factor method; each tier carries only the data it uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "kebab-case")]
pub enum PondFluxMethod {
    Default {
        #[serde(default)]
        overrides: FactorOverrides,
    },
    OrganicMatterScaled {
        organic_matter: OrganicMatterSummary,
        #[serde(default)]
        overrides: FactorOverrides,
        #[serde(default)]
        scaling: OrganicMatterScaling,
    },
    Measured {
        ch4_g_m2_day: f64,
        n2o_g_m2_day: f64,
    },
}

impl Default for PondFluxMethod {
    fn default() -> Self {
        Self::Default {
            overrides: FactorOverrides::default(),
        }
    }
}

impl PondFluxMethod {
    pub fn tier(&self) -> PondTier {
        match self {
            Self::Default { .. } => PondTier::Default,
            Self::OrganicMatterScaled { .. } => PondTier::OrganicMatterScaled,
            Self::Measured { .. } => PondTier::Measured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PondFluxRequest {
    /// unit: m²
    pub pond_area_m2: f64,
    #[serde(default = "default_system_type")]
    pub system_type: IntensityClass,
    #[serde(default)]
    pub method: PondFluxMethod,
    #[serde(default)]
    pub gwp: GwpValues,
}

fn default_system_type() -> IntensityClass {
    IntensityClass::SemiIntensive
}

impl PondFluxRequest {
    /// Tier-1 request with default GWPs.
    pub fn new(pond_area_m2: f64, system_type: IntensityClass) -> Self {
        Self {
            pond_area_m2,
            system_type,
            method: PondFluxMethod::default(),
            gwp: GwpValues::default(),
        }
    }

    pub fn with_method(mut self, method: PondFluxMethod) -> Self {
        self.method = method;
        self
    }
}

/// Factors actually applied, per gas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFactors {
    /// unit: g CH4/m²/day
    pub ch4_g_m2_day: f64,
    /// unit: g N2O/m²/day
    pub n2o_g_m2_day: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ch4_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n2o_multiplier: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PondFluxAudit {
    pub tier: PondTier,
    pub system_type: IntensityClass,
    pub pond_area_m2: f64,
    pub period_days: f64,
    pub factors: ResolvedFactors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organic_matter: Option<OrganicMatterSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organic_matter_scaling: Option<OrganicMatterScaling>,
    pub gwp: GwpValues,
    pub ch4_kg: f64,
    pub n2o_kg: f64,
    pub ch4_kgco2e: f64,
    pub n2o_kgco2e: f64,
    pub note: String,
}

fn tier_one_factors(
    request: &PondFluxRequest,
    overrides: &FactorOverrides,
    reference: &ReferenceData,
) -> FootprintResult<(f64, f64)> {
    let ranges = reference.pond_factors.ranges(request.system_type);
    let ch4 = non_negative_opt("ch4_ef_g_m2_day", overrides.ch4_ef_g_m2_day)?
        .unwrap_or_else(|| ranges.ch4.midpoint());
    let n2o = non_negative_opt("n2o_ef_g_m2_day", overrides.n2o_ef_g_m2_day)?
        .unwrap_or_else(|| ranges.n2o.midpoint());
    Ok((ch4, n2o))
}

/// Resolve the daily emission factors for the request's tier.
pub fn resolve_factors(
    request: &PondFluxRequest,
    reference: &ReferenceData,
) -> FootprintResult<ResolvedFactors> {
    let factors = match &request.method {
        PondFluxMethod::Default { overrides } => {
            let (ch4, n2o) = tier_one_factors(request, overrides, reference)?;
            ResolvedFactors {
                ch4_g_m2_day: ch4,
                n2o_g_m2_day: n2o,
                ch4_multiplier: None,
                n2o_multiplier: None,
            }
        }
        PondFluxMethod::OrganicMatterScaled {
            organic_matter,
            overrides,
            scaling,
        } => {
            scaling.validate()?;
            let average = non_negative("organic_matter_average_mg_per_l", organic_matter.average_mg_per_l)?;
            let p95 = non_negative_opt("organic_matter_p95_mg_per_l", organic_matter.p95_mg_per_l)?;

            let ch4_concentration = match (scaling.ch4_uses_p95, p95) {
                (true, Some(p95)) => p95,
                (true, None) => {
                    warn!(
                        average,
                        "No 95th-percentile organic matter reading; CH4 scaling uses the average"
                    );
                    average
                }
                (false, _) => average,
            };

            let (ch4, n2o) = tier_one_factors(request, overrides, reference)?;
            let ch4_multiplier = scaling.multiplier(ch4_concentration);
            let n2o_multiplier = scaling.multiplier(average);

            ResolvedFactors {
                ch4_g_m2_day: ch4 * ch4_multiplier,
                n2o_g_m2_day: n2o * n2o_multiplier,
                ch4_multiplier: Some(ch4_multiplier),
                n2o_multiplier: Some(n2o_multiplier),
            }
        }
        PondFluxMethod::Measured {
            ch4_g_m2_day,
            n2o_g_m2_day,
        } => ResolvedFactors {
            ch4_g_m2_day: *ch4_g_m2_day,
            n2o_g_m2_day: *n2o_g_m2_day,
            ch4_multiplier: None,
            n2o_multiplier: None,
        },
    };

    non_negative("ch4_ef_g_m2_day", factors.ch4_g_m2_day)?;
    non_negative("n2o_ef_g_m2_day", factors.n2o_g_m2_day)?;
    Ok(factors)
}

fn method_note(request: &PondFluxRequest) -> String {
    match &request.method {
        PondFluxMethod::Default { overrides } => {
            let overridden = overrides.ch4_ef_g_m2_day.is_some() || overrides.n2o_ef_g_m2_day.is_some();
            format!(
                "Tier 1: area-based emission factors for {} ponds (midpoint of literature range{})",
                request.system_type,
                if overridden { ", manual override applied" } else { "" }
            )
        }
        PondFluxMethod::OrganicMatterScaled { scaling, .. } => format!(
            "Tier 2: tier-1 factors scaled by total organic matter, 1 + {}·x/(x + {}) with x above {} mg/L{}",
            scaling.max_uplift,
            scaling.half_saturation_mg_per_l,
            scaling.floor_mg_per_l,
            if scaling.ch4_uses_p95 {
                "; CH4 follows the 95th percentile"
            } else {
                ""
            }
        ),
        PondFluxMethod::Measured { .. } => {
            "Tier 3: directly measured daily CH4 and N2O fluxes".to_string()
        }
    }
}

/// Pond CH4 + N2O emissions (kg CO2e) over `period_days`.
pub fn pond_flux_emissions(
    request: &PondFluxRequest,
    period_days: f64,
    reference: &ReferenceData,
) -> FootprintResult<(f64, PondFluxAudit)> {
    let area = non_negative("pond_area_m2", request.pond_area_m2)?;
    let days = non_negative("period_days", period_days)?;
    request.gwp.validate()?;

    let factors = resolve_factors(request, reference)?;

    let ch4_kg = factors.ch4_g_m2_day * area * days / G_PER_KG;
    let n2o_kg = factors.n2o_g_m2_day * area * days / G_PER_KG;
    let ch4_kgco2e = ch4_kg * request.gwp.ch4;
    let n2o_kgco2e = n2o_kg * request.gwp.n2o;

    debug!(
        tier = %request.method.tier(),
        ch4_kgco2e,
        n2o_kgco2e,
        "Pond CH4/N2O emissions resolved"
    );

    let (organic_matter, organic_matter_scaling) = match &request.method {
        PondFluxMethod::OrganicMatterScaled {
            organic_matter,
            scaling,
            ..
        } => (Some(*organic_matter), Some(*scaling)),
        _ => (None, None),
    };

    Ok((
        ch4_kgco2e + n2o_kgco2e,
        PondFluxAudit {
            tier: request.method.tier(),
            system_type: request.system_type,
            pond_area_m2: area,
            period_days: days,
            factors,
            organic_matter,
            organic_matter_scaling,
            gwp: request.gwp,
            ch4_kg,
            n2o_kg,
            ch4_kgco2e,
            n2o_kgco2e,
            note: method_note(request),
        },
    ))
}

impl EmissionSource for PondFluxRequest {
    type Audit = PondFluxAudit;

    fn kind(&self) -> SourceKind {
        SourceKind::PondCh4N2o
    }

    fn estimate(&self, ctx: &EstimationContext<'_>) -> FootprintResult<SourceEstimate<PondFluxAudit>> {
        let (kgco2e, audit) = pond_flux_emissions(self, ctx.period.days(), ctx.reference)?;
        Ok(SourceEstimate::for_period(kgco2e, audit))
    }
}

/// Flat, form-style pond record with every tier's fields optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PondFluxInputs {
    pub pond_area_m2: f64,
    #[serde(default = "default_system_type")]
    pub system_type: IntensityClass,
    #[serde(default)]
    pub tier: PondTier,
    pub ch4_ef_g_m2_day: Option<f64>,
    pub n2o_ef_g_m2_day: Option<f64>,
    pub om_average_mg_per_l: Option<f64>,
    pub om_p95_mg_per_l: Option<f64>,
    pub measured_ch4_g_m2_day: Option<f64>,
    pub measured_n2o_g_m2_day: Option<f64>,
    pub gwp_ch4: Option<f64>,
    pub gwp_n2o: Option<f64>,
}

impl PondFluxInputs {
    pub fn new(pond_area_m2: f64, system_type: IntensityClass) -> Self {
        Self {
            pond_area_m2,
            system_type,
            tier: PondTier::Default,
            ch4_ef_g_m2_day: None,
            n2o_ef_g_m2_day: None,
            om_average_mg_per_l: None,
            om_p95_mg_per_l: None,
            measured_ch4_g_m2_day: None,
            measured_n2o_g_m2_day: None,
            gwp_ch4: None,
            gwp_n2o: None,
        }
    }
}

fn set_fields(fields: &[(&'static str, Option<f64>)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter_map(|(name, value)| value.map(|_| *name))
        .collect()
}

impl PondFluxInputs {
    /// Build the tier-specific request, filling unset constants from `defaults`.
    pub fn into_request(self, defaults: &PondFluxParameters) -> FootprintResult<PondFluxRequest> {
        let inputs = self;
        let overrides = FactorOverrides {
            ch4_ef_g_m2_day: inputs.ch4_ef_g_m2_day,
            n2o_ef_g_m2_day: inputs.n2o_ef_g_m2_day,
        };
        let organic_fields = [
            ("om_average_mg_per_l", inputs.om_average_mg_per_l),
            ("om_p95_mg_per_l", inputs.om_p95_mg_per_l),
        ];
        let measured_fields = [
            ("measured_ch4_g_m2_day", inputs.measured_ch4_g_m2_day),
            ("measured_n2o_g_m2_day", inputs.measured_n2o_g_m2_day),
        ];
        let override_fields = [
            ("ch4_ef_g_m2_day", inputs.ch4_ef_g_m2_day),
            ("n2o_ef_g_m2_day", inputs.n2o_ef_g_m2_day),
        ];

        let method = match inputs.tier {
            PondTier::Default => {
                let mut conflicts = set_fields(&organic_fields);
                conflicts.extend(set_fields(&measured_fields));
                if !conflicts.is_empty() {
                    return Err(FootprintError::conflicting("default pond tier", &conflicts));
                }
                PondFluxMethod::Default { overrides }
            }
            PondTier::OrganicMatterScaled => {
                let conflicts = set_fields(&measured_fields);
                if !conflicts.is_empty() {
                    return Err(FootprintError::conflicting(
                        "organic-matter-scaled pond tier",
                        &conflicts,
                    ));
                }
                let average = inputs.om_average_mg_per_l.ok_or_else(|| {
                    FootprintError::missing("organic-matter-scaled pond tier", &["om_average_mg_per_l"])
                })?;
                PondFluxMethod::OrganicMatterScaled {
                    organic_matter: OrganicMatterSummary {
                        average_mg_per_l: average,
                        p95_mg_per_l: inputs.om_p95_mg_per_l,
                    },
                    overrides,
                    scaling: defaults.organic_matter,
                }
            }
            PondTier::Measured => {
                let mut conflicts = set_fields(&organic_fields);
                conflicts.extend(set_fields(&override_fields));
                if !conflicts.is_empty() {
                    return Err(FootprintError::conflicting("measured pond tier", &conflicts));
                }
                match (inputs.measured_ch4_g_m2_day, inputs.measured_n2o_g_m2_day) {
                    (Some(ch4), Some(n2o)) => PondFluxMethod::Measured {
                        ch4_g_m2_day: ch4,
                        n2o_g_m2_day: n2o,
                    },
                    (None, _) => {
                        return Err(FootprintError::missing(
                            "measured pond tier",
                            &["measured_ch4_g_m2_day"],
                        ))
                    }
                    (_, None) => {
                        return Err(FootprintError::missing(
                            "measured pond tier",
                            &["measured_n2o_g_m2_day"],
                        ))
                    }
                }
            }
        };

        Ok(PondFluxRequest {
            pond_area_m2: inputs.pond_area_m2,
            system_type: inputs.system_type,
            method,
            gwp: GwpValues {
                ch4: inputs.gwp_ch4.unwrap_or(defaults.gwp.ch4),
                n2o: inputs.gwp_n2o.unwrap_or(defaults.gwp.n2o),
            },
        })
    }
}

impl TryFrom<PondFluxInputs> for PondFluxRequest {
    type Error = FootprintError;

    fn try_from(inputs: PondFluxInputs) -> FootprintResult<Self> {
        inputs.into_request(&PondFluxParameters::default())
    }
}
