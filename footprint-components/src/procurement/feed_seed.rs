//! Feed and seed (post-larvae) procurement emissions
//!
//! Both are intensity-factor models: quantity × kg CO2e per unit. The
//! intensity is the caller's supplier-specific value when one is given,
//! otherwise the Boundary A literature default from the reference tables.
//!
//! The boundary mode travels with the result for audit. It does not change
//! the arithmetic: an explicit intensity is honoured under either mode.

use footprint_core::audit::{resolve_factor, FactorOrigin};
use footprint_core::errors::FootprintResult;
use footprint_core::period::Boundary;
use footprint_core::reference::ReferenceData;
use footprint_core::source::{EmissionSource, EstimationContext, SourceEstimate, SourceKind};
use footprint_core::validation::{non_negative, non_negative_opt};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How much feed was used in the period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedQuantity {
    /// Total feed mass (kg).
    TotalFeedKg(f64),
    /// Feed conversion ratio (kg feed/kg harvested); mass = FCR × harvest.
    ConversionRatio(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRequest {
    pub quantity: FeedQuantity,
    /// Supplier or LCA-specific intensity
    /// unit: kg CO2e/kg feed
    #[serde(default)]
    pub emission_intensity_kgco2e_per_kg: Option<f64>,
}

impl FeedRequest {
    pub fn total(total_feed_kg: f64) -> Self {
        Self {
            quantity: FeedQuantity::TotalFeedKg(total_feed_kg),
            emission_intensity_kgco2e_per_kg: None,
        }
    }

    pub fn from_ratio(fcr: f64) -> Self {
        Self {
            quantity: FeedQuantity::ConversionRatio(fcr),
            emission_intensity_kgco2e_per_kg: None,
        }
    }

    pub fn with_intensity(mut self, kgco2e_per_kg: f64) -> Self {
        self.emission_intensity_kgco2e_per_kg = Some(kgco2e_per_kg);
        self
    }

    /// Feed mass for the period (kg).
    pub fn feed_kg(&self, harvested_kg: f64) -> FootprintResult<f64> {
        match self.quantity {
            FeedQuantity::TotalFeedKg(kg) => non_negative("total_feed_kg", kg),
            FeedQuantity::ConversionRatio(fcr) => {
                Ok(non_negative("fcr", fcr)? * non_negative("harvested_shrimp_kg", harvested_kg)?)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedAudit {
    pub total_feed_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fcr: Option<f64>,
    pub emission_intensity_kgco2e_per_kg: f64,
    pub factor_origin: FactorOrigin,
    pub boundary: Boundary,
}

/// Feed emissions (kg CO2e).
pub fn feed_emissions(
    request: &FeedRequest,
    harvested_kg: f64,
    boundary: Boundary,
    reference: &ReferenceData,
) -> FootprintResult<(f64, FeedAudit)> {
    let feed_kg = request.feed_kg(harvested_kg)?;
    let override_value = non_negative_opt(
        "feed_emission_intensity_kgco2e_per_kg",
        request.emission_intensity_kgco2e_per_kg,
    )?;
    let (intensity, origin) = resolve_factor(override_value, reference.feed_kgco2e_per_kg);

    debug!(feed_kg, intensity, ?origin, ?boundary, "Feed emissions resolved");

    Ok((
        feed_kg * intensity,
        FeedAudit {
            total_feed_kg: feed_kg,
            fcr: match request.quantity {
                FeedQuantity::ConversionRatio(fcr) => Some(fcr),
                FeedQuantity::TotalFeedKg(_) => None,
            },
            emission_intensity_kgco2e_per_kg: intensity,
            factor_origin: origin,
            boundary,
        },
    ))
}

impl EmissionSource for FeedRequest {
    type Audit = FeedAudit;

    fn kind(&self) -> SourceKind {
        SourceKind::Feed
    }

    fn estimate(&self, ctx: &EstimationContext<'_>) -> FootprintResult<SourceEstimate<FeedAudit>> {
        let (kgco2e, audit) = feed_emissions(self, ctx.harvested_kg, ctx.boundary, ctx.reference)?;
        Ok(SourceEstimate::for_period(kgco2e, audit))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRequest {
    /// Post-larvae stocked, in thousands
    pub thousand_pl: f64,
    /// Hatchery-specific intensity
    /// unit: kg CO2e/1000 PL
    #[serde(default)]
    pub emission_intensity_kgco2e_per_thousand_pl: Option<f64>,
}

impl SeedRequest {
    pub fn new(thousand_pl: f64) -> Self {
        Self {
            thousand_pl,
            emission_intensity_kgco2e_per_thousand_pl: None,
        }
    }

    pub fn with_intensity(mut self, kgco2e_per_thousand_pl: f64) -> Self {
        self.emission_intensity_kgco2e_per_thousand_pl = Some(kgco2e_per_thousand_pl);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedAudit {
    pub thousand_pl: f64,
    pub emission_intensity_kgco2e_per_thousand_pl: f64,
    pub factor_origin: FactorOrigin,
    pub boundary: Boundary,
}

/// Seed emissions (kg CO2e).
pub fn seed_emissions(
    request: &SeedRequest,
    boundary: Boundary,
    reference: &ReferenceData,
) -> FootprintResult<(f64, SeedAudit)> {
    let thousand_pl = non_negative("thousand_pl", request.thousand_pl)?;
    let override_value = non_negative_opt(
        "seed_emission_intensity_kgco2e_per_thousand_pl",
        request.emission_intensity_kgco2e_per_thousand_pl,
    )?;
    let (intensity, origin) =
        resolve_factor(override_value, reference.seed_kgco2e_per_thousand_pl);

    Ok((
        thousand_pl * intensity,
        SeedAudit {
            thousand_pl,
            emission_intensity_kgco2e_per_thousand_pl: intensity,
            factor_origin: origin,
            boundary,
        },
    ))
}

impl EmissionSource for SeedRequest {
    type Audit = SeedAudit;

    fn kind(&self) -> SourceKind {
        SourceKind::Seed
    }

    fn estimate(&self, ctx: &EstimationContext<'_>) -> FootprintResult<SourceEstimate<SeedAudit>> {
        let (kgco2e, audit) = seed_emissions(self, ctx.boundary, ctx.reference)?;
        Ok(SourceEstimate::for_period(kgco2e, audit))
    }
}
