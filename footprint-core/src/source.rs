//! The seam every emission model plugs into.

use crate::errors::FootprintResult;
use crate::period::{Boundary, ReportingPeriod};
use crate::reference::ReferenceData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a source in the result breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "pumping")]
    Pumping,
    #[serde(rename = "aeration")]
    Aeration,
    #[serde(rename = "feed")]
    Feed,
    #[serde(rename = "seed")]
    Seed,
    #[serde(rename = "luluc")]
    Luluc,
    #[serde(rename = "sequestration")]
    Sequestration,
    #[serde(rename = "pond_ch4_n2o")]
    PondCh4N2o,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pumping => "pumping",
            Self::Aeration => "aeration",
            Self::Feed => "feed",
            Self::Seed => "seed",
            Self::Luluc => "luluc",
            Self::Sequestration => "sequestration",
            Self::PondCh4N2o => "pond_ch4_n2o",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a source may need beyond its own request.
#[derive(Debug, Clone, Copy)]
pub struct EstimationContext<'a> {
    pub period: ReportingPeriod,
    pub boundary: Boundary,
    /// unit: kg
    pub harvested_kg: f64,
    pub reference: &'a ReferenceData,
}

/// Time basis of a source's raw figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBasis {
    /// Already expressed over the reporting period.
    Period,
    /// Expressed per year; scaled by the period's fraction of a year.
    Annual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluxDirection {
    Emission,
    /// Carbon taken up; enters the total with a negative sign.
    Removal,
}

/// The raw (unsigned) result of one source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEstimate<A> {
    /// unit: kg CO2e
    pub kgco2e: f64,
    pub basis: TimeBasis,
    pub direction: FluxDirection,
    pub audit: A,
}

impl<A> SourceEstimate<A> {
    /// An emission already expressed over the reporting period.
    pub fn for_period(kgco2e: f64, audit: A) -> Self {
        Self {
            kgco2e,
            basis: TimeBasis::Period,
            direction: FluxDirection::Emission,
            audit,
        }
    }

    /// An emission allocated per year.
    pub fn annual(kgco2e: f64, audit: A) -> Self {
        Self {
            kgco2e,
            basis: TimeBasis::Annual,
            direction: FluxDirection::Emission,
            audit,
        }
    }

    /// A removal accrued per year.
    pub fn annual_removal(kgco2e: f64, audit: A) -> Self {
        Self {
            kgco2e,
            basis: TimeBasis::Annual,
            direction: FluxDirection::Removal,
            audit,
        }
    }

    /// Signed contribution to the total over `period`.
    pub fn contribution(&self, period: ReportingPeriod) -> f64 {
        let scaled = match self.basis {
            TimeBasis::Period => self.kgco2e,
            TimeBasis::Annual => self.kgco2e * period.fraction_of_year(),
        };
        match self.direction {
            FluxDirection::Emission => scaled,
            FluxDirection::Removal => -scaled,
        }
    }
}

/// An independently estimable emission source.
///
/// Implementations are pure: the same request and context always give the
/// same estimate, and nothing is shared between calls.
pub trait EmissionSource {
    /// Per-source record of the values actually used.
    type Audit;

    fn kind(&self) -> SourceKind;

    fn estimate(&self, ctx: &EstimationContext<'_>) -> FootprintResult<SourceEstimate<Self::Audit>>;
}
