//! The aggregate estimation request.

use footprint_components::energy::{AerationRequest, PumpingRequest};
use footprint_components::land::{LulucRequest, SequestrationRequest};
use footprint_components::pond::PondFluxRequest;
use footprint_components::procurement::{FeedRequest, SeedRequest};
use footprint_core::period::{Boundary, ReportingPeriod};
use serde::{Deserialize, Serialize};

/// Everything needed to estimate one footprint.
///
/// Each source is optional. A source left out is not estimated: it has no
/// breakdown entry and adds nothing to the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    /// unit: kg
    pub harvested_shrimp_kg: f64,
    #[serde(flatten)]
    pub period: ReportingPeriod,
    #[serde(default)]
    pub boundary: Boundary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pumping: Option<PumpingRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aeration: Option<AerationRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed: Option<FeedRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<SeedRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luluc: Option<LulucRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequestration: Option<SequestrationRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pond_ch4_n2o: Option<PondFluxRequest>,
}

impl EstimationRequest {
    /// A request with no sources, reporting on Boundary A.
    pub fn new(harvested_shrimp_kg: f64, period: ReportingPeriod) -> Self {
        Self {
            harvested_shrimp_kg,
            period,
            boundary: Boundary::default(),
            pumping: None,
            aeration: None,
            feed: None,
            seed: None,
            luluc: None,
            sequestration: None,
            pond_ch4_n2o: None,
        }
    }

    pub fn with_boundary(&mut self, boundary: Boundary) -> &mut Self {
        self.boundary = boundary;
        self
    }

    pub fn with_pumping(&mut self, request: PumpingRequest) -> &mut Self {
        self.pumping = Some(request);
        self
    }

    pub fn with_aeration(&mut self, request: AerationRequest) -> &mut Self {
        self.aeration = Some(request);
        self
    }

    pub fn with_feed(&mut self, request: FeedRequest) -> &mut Self {
        self.feed = Some(request);
        self
    }

    pub fn with_seed(&mut self, request: SeedRequest) -> &mut Self {
        self.seed = Some(request);
        self
    }

    pub fn with_luluc(&mut self, request: LulucRequest) -> &mut Self {
        self.luluc = Some(request);
        self
    }

    pub fn with_sequestration(&mut self, request: SequestrationRequest) -> &mut Self {
        self.sequestration = Some(request);
        self
    }

    pub fn with_pond_ch4_n2o(&mut self, request: PondFluxRequest) -> &mut Self {
        self.pond_ch4_n2o = Some(request);
        self
    }
}
