//! Vegetation carbon sequestration
//!
//! Retained or restored vegetation on the farm takes up carbon. The annual
//! removal is approximated from the standing biomass stock:
//!
//! $$R = (AGB + AGB \cdot r) \times g \times A \times 3.67 \times 1000$$
//!
//! with $r$ the root-to-shoot ratio and $g$ the annual growth fraction. The
//! result is positive; it enters the footprint as a removal.

use footprint_core::constants::{C_TO_CO2, KG_PER_TONNE};
use footprint_core::errors::FootprintResult;
use footprint_core::reference::{ReferenceData, VegetationType};
use footprint_core::source::{EmissionSource, EstimationContext, SourceEstimate, SourceKind};
use footprint_core::validation::non_negative;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequestrationRequest {
    pub vegetation_type: VegetationType,
    /// unit: ha
    pub area_ha: f64,
}

impl SequestrationRequest {
    pub fn new(vegetation_type: VegetationType, area_ha: f64) -> Self {
        Self {
            vegetation_type,
            area_ha,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequestrationAudit {
    pub vegetation_type: VegetationType,
    pub area_ha: f64,
    pub above_ground_tc_per_ha: f64,
    pub below_ground_tc_per_ha: f64,
    pub growth_rate: f64,
    pub annual_removal_kgco2e: f64,
}

/// Annual removal (kg CO2e/yr, positive).
pub fn sequestration_annual_removal(
    request: &SequestrationRequest,
    reference: &ReferenceData,
) -> FootprintResult<(f64, SequestrationAudit)> {
    let area = non_negative("area_ha", request.area_ha)?;
    let profile = reference.vegetation.profile(request.vegetation_type);

    let above = profile.above_ground_tc_per_ha;
    let below = above * profile.root_to_shoot;
    let annual_tc = (above + below) * profile.growth_rate * area;
    let annual_kg = annual_tc * C_TO_CO2 * KG_PER_TONNE;

    Ok((
        annual_kg,
        SequestrationAudit {
            vegetation_type: request.vegetation_type,
            area_ha: area,
            above_ground_tc_per_ha: above,
            below_ground_tc_per_ha: below,
            growth_rate: profile.growth_rate,
            annual_removal_kgco2e: annual_kg,
        },
    ))
}

impl EmissionSource for SequestrationRequest {
    type Audit = SequestrationAudit;

    fn kind(&self) -> SourceKind {
        SourceKind::Sequestration
    }

    fn estimate(
        &self,
        ctx: &EstimationContext<'_>,
    ) -> FootprintResult<SourceEstimate<SequestrationAudit>> {
        let (annual_kg, audit) = sequestration_annual_removal(self, ctx.reference)?;
        Ok(SourceEstimate::annual_removal(annual_kg, audit))
    }
}
