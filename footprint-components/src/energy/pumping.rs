//! Pumping (water exchange) emissions
//!
//! Estimates the energy needed to move the pumped water volume and converts
//! it to emissions with the selected energy supply.
//!
//! # Methods
//!
//! - `metered`: the energy reading is used as is.
//! - `specific-energy`: $E = V \times e_{spec}$ with $e_{spec}$ in kWh/m³.
//! - `hydraulic` (default):
//!   1. pipe area $A = \pi (D/2)^2$
//!   2. flow $Q$ and mean velocity $v = Q/A$, from the pumping duration or
//!      from an assumed velocity (duration back-solved as $V/(vA)$)
//!   3. friction loss $h_f = f (L/D) v^2 / 2g$
//!   4. total dynamic head $H = h_s + h_f$
//!   5. energy $E = \rho g V H / \eta$ (J), divided by $3.6 \times 10^6$ for kWh

use crate::parameters::HydraulicParameters;
use footprint_core::constants::{HOURS_PER_DAY, J_PER_KWH, SECONDS_PER_HOUR};
use footprint_core::energy::{EnergyAudit, EnergySupply};
use footprint_core::errors::{FootprintError, FootprintResult};
use footprint_core::reference::ReferenceData;
use footprint_core::source::{EmissionSource, EstimationContext, SourceEstimate, SourceKind};
use footprint_core::validation::{efficiency, non_negative, positive};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// How the pumping time (and so the flow velocity) is determined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "kebab-case")]
pub enum FlowBasis {
    /// Total hours spent pumping in the period.
    Duration { pumping_duration_hours: f64 },
    /// Assumed mean velocity in the pipe; the duration follows from the volume.
    MeanVelocity { mean_velocity_m_s: f64 },
    /// Pumping spread evenly over the whole cycle (cycle_days × 24 h).
    SpreadOverCycle { cycle_days: f64 },
}

/// Pipe, fluid and flow description for the hydraulic method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydraulicSetup {
    pub pipe_diameter_m: f64,
    pub pipe_length_m: f64,
    pub static_head_m: f64,
    pub water_density_kg_m3: f64,
    pub friction_factor: f64,
    pub pump_efficiency: f64,
    pub gravity_m_s2: f64,
    pub flow: FlowBasis,
}

impl HydraulicSetup {
    /// Default pipe and fluid properties with the given flow basis.
    pub fn new(flow: FlowBasis) -> Self {
        Self::from_parameters(&HydraulicParameters::default(), flow)
    }

    pub fn from_parameters(parameters: &HydraulicParameters, flow: FlowBasis) -> Self {
        Self {
            pipe_diameter_m: parameters.pipe_diameter_m,
            pipe_length_m: parameters.pipe_length_m,
            static_head_m: parameters.static_head_m,
            water_density_kg_m3: parameters.water_density_kg_m3,
            friction_factor: parameters.friction_factor,
            pump_efficiency: parameters.pump_efficiency,
            gravity_m_s2: parameters.gravity_m_s2,
            flow,
        }
    }

    fn validate(&self) -> FootprintResult<()> {
        positive("pipe_diameter_m", self.pipe_diameter_m)?;
        non_negative("pipe_length_m", self.pipe_length_m)?;
        non_negative("static_head_m", self.static_head_m)?;
        positive("water_density_kg_m3", self.water_density_kg_m3)?;
        non_negative("friction_factor", self.friction_factor)?;
        efficiency("pump_efficiency", self.pump_efficiency)?;
        positive("gravity_m_s2", self.gravity_m_s2)?;
        match self.flow {
            FlowBasis::Duration {
                pumping_duration_hours,
            } => positive("pumping_duration_hours", pumping_duration_hours)?,
            FlowBasis::MeanVelocity { mean_velocity_m_s } => {
                positive("mean_velocity_m_s", mean_velocity_m_s)?
            }
            FlowBasis::SpreadOverCycle { cycle_days } => positive("cycle_days", cycle_days)?,
        };
        Ok(())
    }
}

/// Pumping energy method; each variant carries only what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum PumpingMethod {
    Metered { energy_kwh: f64 },
    SpecificEnergy { kwh_per_m3: f64 },
    Hydraulic(HydraulicSetup),
}

impl PumpingMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Metered { .. } => "metered",
            Self::SpecificEnergy { .. } => "specific-energy",
            Self::Hydraulic(_) => "hydraulic",
        }
    }
}

/// Water exchange over the reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpingRequest {
    /// unit: m³
    pub volume_m3: f64,
    pub method: PumpingMethod,
    pub energy: EnergySupply,
}

impl PumpingRequest {
    pub fn new(volume_m3: f64, method: PumpingMethod, energy: EnergySupply) -> Self {
        Self {
            volume_m3,
            method,
            energy,
        }
    }
}

/// Intermediate hydraulic quantities, kept for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydraulicBreakdown {
    pub pipe_area_m2: f64,
    pub flow_rate_m3_s: f64,
    pub velocity_m_s: f64,
    pub pumping_duration_hours: f64,
    pub friction_head_m: f64,
    pub total_dynamic_head_m: f64,
}

/// Pumping energy with the method details that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PumpingEnergy {
    pub energy_kwh: f64,
    pub hydraulics: Option<HydraulicBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpingAudit {
    pub volume_m3: f64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_energy_kwh_per_m3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydraulics: Option<HydraulicSetup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydraulic_breakdown: Option<HydraulicBreakdown>,
    pub energy: EnergyAudit,
}

fn hydraulic_energy(volume_m3: f64, setup: &HydraulicSetup) -> FootprintResult<PumpingEnergy> {
    setup.validate()?;

    let area = PI * (setup.pipe_diameter_m / 2.0).powi(2);

    let (flow_rate, velocity, duration_s) = match setup.flow {
        FlowBasis::MeanVelocity { mean_velocity_m_s } => {
            let flow_rate = mean_velocity_m_s * area;
            (flow_rate, mean_velocity_m_s, volume_m3 / flow_rate)
        }
        FlowBasis::Duration {
            pumping_duration_hours,
        } => {
            let duration_s = pumping_duration_hours * SECONDS_PER_HOUR;
            let flow_rate = volume_m3 / duration_s;
            (flow_rate, flow_rate / area, duration_s)
        }
        FlowBasis::SpreadOverCycle { cycle_days } => {
            let duration_s = cycle_days * HOURS_PER_DAY * SECONDS_PER_HOUR;
            let flow_rate = volume_m3 / duration_s;
            (flow_rate, flow_rate / area, duration_s)
        }
    };

    let friction_head = setup.friction_factor
        * (setup.pipe_length_m / setup.pipe_diameter_m)
        * (velocity.powi(2) / (2.0 * setup.gravity_m_s2));
    let total_head = setup.static_head_m + friction_head;

    // P·t with P = ρgQH/η and Q·t = V
    let energy_j =
        setup.water_density_kg_m3 * setup.gravity_m_s2 * volume_m3 * total_head / setup.pump_efficiency;

    Ok(PumpingEnergy {
        energy_kwh: energy_j / J_PER_KWH,
        hydraulics: Some(HydraulicBreakdown {
            pipe_area_m2: area,
            flow_rate_m3_s: flow_rate,
            velocity_m_s: velocity,
            pumping_duration_hours: duration_s / SECONDS_PER_HOUR,
            friction_head_m: friction_head,
            total_dynamic_head_m: total_head,
        }),
    })
}

/// Energy required to pump the requested volume (kWh).
pub fn pumping_energy(request: &PumpingRequest) -> FootprintResult<PumpingEnergy> {
    let volume = non_negative("volume_m3", request.volume_m3)?;

    match &request.method {
        PumpingMethod::Metered { energy_kwh } => Ok(PumpingEnergy {
            energy_kwh: non_negative("metered_energy_kwh", *energy_kwh)?,
            hydraulics: None,
        }),
        PumpingMethod::SpecificEnergy { kwh_per_m3 } => Ok(PumpingEnergy {
            energy_kwh: volume * non_negative("specific_energy_kwh_per_m3", *kwh_per_m3)?,
            hydraulics: None,
        }),
        PumpingMethod::Hydraulic(setup) => hydraulic_energy(volume, setup),
    }
}

/// Pumping emissions (kg CO2e) with the audit of values used.
pub fn pumping_emissions(
    request: &PumpingRequest,
    reference: &ReferenceData,
) -> FootprintResult<(f64, PumpingAudit)> {
    let energy = pumping_energy(request)?;
    let emissions = request.energy.emissions(energy.energy_kwh, reference)?;

    debug!(
        method = request.method.label(),
        energy_kwh = energy.energy_kwh,
        kgco2e = emissions.kgco2e,
        "Pumping emissions resolved"
    );

    let audit = PumpingAudit {
        volume_m3: request.volume_m3,
        method: request.method.label().to_string(),
        specific_energy_kwh_per_m3: match request.method {
            PumpingMethod::SpecificEnergy { kwh_per_m3 } => Some(kwh_per_m3),
            _ => None,
        },
        hydraulics: match &request.method {
            PumpingMethod::Hydraulic(setup) => Some(setup.clone()),
            _ => None,
        },
        hydraulic_breakdown: energy.hydraulics,
        energy: emissions.audit,
    };
    Ok((emissions.kgco2e, audit))
}

impl EmissionSource for PumpingRequest {
    type Audit = PumpingAudit;

    fn kind(&self) -> SourceKind {
        SourceKind::Pumping
    }

    fn estimate(&self, ctx: &EstimationContext<'_>) -> FootprintResult<SourceEstimate<PumpingAudit>> {
        let (kgco2e, audit) = pumping_emissions(self, ctx.reference)?;
        Ok(SourceEstimate::for_period(kgco2e, audit))
    }
}

/// Which pumping method a flat input record selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PumpingMethodKind {
    Metered,
    #[default]
    Hydraulic,
    SpecificEnergy,
}

/// Flat, form-style pumping record with every method's fields optional.
///
/// Converting into a [`PumpingRequest`] checks that the selected method has
/// its companion fields and that no other method's fields are set. Hydraulic
/// fields left empty take their values from [`HydraulicParameters`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpingInputs {
    pub volume_m3: f64,
    #[serde(default)]
    pub method: PumpingMethodKind,
    pub cycle_days: Option<f64>,
    pub metered_energy_kwh: Option<f64>,
    pub specific_energy_kwh_per_m3: Option<f64>,
    pub pipe_diameter_m: Option<f64>,
    pub pipe_length_m: Option<f64>,
    pub static_head_m: Option<f64>,
    pub water_density_kg_m3: Option<f64>,
    pub friction_factor: Option<f64>,
    pub pump_efficiency: Option<f64>,
    pub gravity_m_s2: Option<f64>,
    pub pumping_duration_hours: Option<f64>,
    pub mean_velocity_m_s: Option<f64>,
    pub energy: EnergySupply,
}

impl PumpingInputs {
    pub fn new(volume_m3: f64, energy: EnergySupply) -> Self {
        Self {
            volume_m3,
            method: PumpingMethodKind::default(),
            cycle_days: None,
            metered_energy_kwh: None,
            specific_energy_kwh_per_m3: None,
            pipe_diameter_m: None,
            pipe_length_m: None,
            static_head_m: None,
            water_density_kg_m3: None,
            friction_factor: None,
            pump_efficiency: None,
            gravity_m_s2: None,
            pumping_duration_hours: None,
            mean_velocity_m_s: None,
            energy,
        }
    }

    fn hydraulic_fields_set(&self) -> Vec<&'static str> {
        [
            ("pipe_diameter_m", self.pipe_diameter_m),
            ("pipe_length_m", self.pipe_length_m),
            ("static_head_m", self.static_head_m),
            ("water_density_kg_m3", self.water_density_kg_m3),
            ("friction_factor", self.friction_factor),
            ("pump_efficiency", self.pump_efficiency),
            ("gravity_m_s2", self.gravity_m_s2),
            ("pumping_duration_hours", self.pumping_duration_hours),
            ("mean_velocity_m_s", self.mean_velocity_m_s),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|_| name))
        .collect()
    }

    /// Convert using explicit hydraulic defaults.
    pub fn into_request(self, defaults: &HydraulicParameters) -> FootprintResult<PumpingRequest> {
        let method = match self.method {
            PumpingMethodKind::Metered => {
                let mut conflicts = self.hydraulic_fields_set();
                if self.specific_energy_kwh_per_m3.is_some() {
                    conflicts.push("specific_energy_kwh_per_m3");
                }
                if !conflicts.is_empty() {
                    return Err(FootprintError::conflicting("metered pumping", &conflicts));
                }
                let energy_kwh = self
                    .metered_energy_kwh
                    .ok_or_else(|| FootprintError::missing("metered pumping", &["metered_energy_kwh"]))?;
                PumpingMethod::Metered { energy_kwh }
            }
            PumpingMethodKind::SpecificEnergy => {
                let mut conflicts = self.hydraulic_fields_set();
                if self.metered_energy_kwh.is_some() {
                    conflicts.push("metered_energy_kwh");
                }
                if !conflicts.is_empty() {
                    return Err(FootprintError::conflicting(
                        "specific-energy pumping",
                        &conflicts,
                    ));
                }
                let kwh_per_m3 = self.specific_energy_kwh_per_m3.ok_or_else(|| {
                    FootprintError::missing(
                        "specific-energy pumping",
                        &["specific_energy_kwh_per_m3"],
                    )
                })?;
                PumpingMethod::SpecificEnergy { kwh_per_m3 }
            }
            PumpingMethodKind::Hydraulic => {
                let mut conflicts = Vec::new();
                if self.metered_energy_kwh.is_some() {
                    conflicts.push("metered_energy_kwh");
                }
                if self.specific_energy_kwh_per_m3.is_some() {
                    conflicts.push("specific_energy_kwh_per_m3");
                }
                if self.pumping_duration_hours.is_some() && self.mean_velocity_m_s.is_some() {
                    conflicts.extend(["pumping_duration_hours", "mean_velocity_m_s"]);
                }
                if !conflicts.is_empty() {
                    return Err(FootprintError::conflicting("hydraulic pumping", &conflicts));
                }

                let flow = match (
                    self.pumping_duration_hours,
                    self.mean_velocity_m_s,
                    self.cycle_days,
                ) {
                    (Some(hours), _, _) => FlowBasis::Duration {
                        pumping_duration_hours: hours,
                    },
                    (None, Some(velocity), _) => FlowBasis::MeanVelocity {
                        mean_velocity_m_s: velocity,
                    },
                    (None, None, Some(cycle_days)) => FlowBasis::SpreadOverCycle { cycle_days },
                    (None, None, None) => {
                        return Err(FootprintError::missing(
                            "hydraulic pumping",
                            &["pumping_duration_hours", "mean_velocity_m_s", "cycle_days"],
                        ))
                    }
                };

                PumpingMethod::Hydraulic(HydraulicSetup {
                    pipe_diameter_m: self.pipe_diameter_m.unwrap_or(defaults.pipe_diameter_m),
                    pipe_length_m: self.pipe_length_m.unwrap_or(defaults.pipe_length_m),
                    static_head_m: self.static_head_m.unwrap_or(defaults.static_head_m),
                    water_density_kg_m3: self
                        .water_density_kg_m3
                        .unwrap_or(defaults.water_density_kg_m3),
                    friction_factor: self.friction_factor.unwrap_or(defaults.friction_factor),
                    pump_efficiency: self.pump_efficiency.unwrap_or(defaults.pump_efficiency),
                    gravity_m_s2: self.gravity_m_s2.unwrap_or(defaults.gravity_m_s2),
                    flow,
                })
            }
        };

        Ok(PumpingRequest {
            volume_m3: self.volume_m3,
            method,
            energy: self.energy,
        })
    }
}

impl TryFrom<PumpingInputs> for PumpingRequest {
    type Error = FootprintError;

    fn try_from(inputs: PumpingInputs) -> FootprintResult<Self> {
        inputs.into_request(&HydraulicParameters::default())
    }
}
