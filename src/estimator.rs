//! Aggregation of the per-source models into one footprint.

use crate::request::EstimationRequest;
use crate::result::{EstimationResult, ResolvedInputsBuilder};
use footprint_components::audit::SourceAudit;
use footprint_core::errors::FootprintResult;
use footprint_core::reference::ReferenceData;
use footprint_core::source::{EmissionSource, EstimationContext, SourceKind};
use footprint_core::validation::positive;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Runs estimation requests against one set of reference data.
///
/// The estimator holds no state between calls and can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    reference: &'a ReferenceData,
}

impl Estimator<'static> {
    /// An estimator backed by the built-in reference tables.
    pub fn new() -> Self {
        Self {
            reference: ReferenceData::builtin(),
        }
    }
}

impl Default for Estimator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Estimator<'a> {
    pub fn with_reference(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &'a ReferenceData {
        self.reference
    }

    /// Estimate the footprint of `request`.
    ///
    /// The harvested mass and the period are checked before any source runs.
    /// The first source that fails aborts the whole estimation.
    pub fn estimate(&self, request: &EstimationRequest) -> FootprintResult<EstimationResult> {
        let harvested_kg = positive("harvested_shrimp_kg", request.harvested_shrimp_kg)?;
        request.period.validate()?;

        let ctx = EstimationContext {
            period: request.period,
            boundary: request.boundary,
            harvested_kg,
            reference: self.reference,
        };
        let mut tally = Tally::new(&ctx);

        if let Some(source) = &request.pumping {
            tally.add(source)?;
        }
        if let Some(source) = &request.aeration {
            tally.add(source)?;
        }
        if let Some(source) = &request.feed {
            tally.add(source)?;
        }
        if let Some(source) = &request.seed {
            tally.add(source)?;
        }
        if let Some(source) = &request.luluc {
            tally.add(source)?;
        }
        if let Some(source) = &request.sequestration {
            tally.add(source)?;
        }
        if let Some(source) = &request.pond_ch4_n2o {
            tally.add(source)?;
        }

        let (breakdown, inputs) = tally.finish();
        let total: f64 = breakdown.values().sum();
        let intensity = total / harvested_kg;

        info!(
            period = %request.period,
            sources = breakdown.len(),
            total_kgco2e = total,
            intensity_kgco2e_per_kg_shrimp = intensity,
            "Footprint estimated"
        );

        Ok(EstimationResult {
            period: request.period,
            boundary: request.boundary,
            harvested_shrimp_kg: harvested_kg,
            total_kgco2e: total,
            intensity_kgco2e_per_kg_shrimp: intensity,
            breakdown_kgco2e: breakdown,
            inputs,
        })
    }
}

/// Running breakdown and audit for one estimation call.
struct Tally<'c, 'r> {
    ctx: &'c EstimationContext<'r>,
    breakdown: BTreeMap<SourceKind, f64>,
    inputs: ResolvedInputsBuilder,
}

impl<'c, 'r> Tally<'c, 'r> {
    fn new(ctx: &'c EstimationContext<'r>) -> Self {
        Self {
            ctx,
            breakdown: BTreeMap::new(),
            inputs: ResolvedInputsBuilder::new(ctx.period),
        }
    }

    fn add<S>(&mut self, source: &S) -> FootprintResult<()>
    where
        S: EmissionSource,
        S::Audit: Into<SourceAudit>,
    {
        let estimate = source.estimate(self.ctx)?;
        let contribution = estimate.contribution(self.ctx.period);
        debug!(
            source = %source.kind(),
            raw_kgco2e = estimate.kgco2e,
            contribution_kgco2e = contribution,
            "Source estimated"
        );
        self.breakdown.insert(source.kind(), contribution);
        self.inputs.record(estimate.audit);
        Ok(())
    }

    fn finish(self) -> (BTreeMap<SourceKind, f64>, crate::result::ResolvedInputs) {
        (self.breakdown, self.inputs.build())
    }
}

/// Estimate `request` with the built-in reference tables.
pub fn estimate(request: &EstimationRequest) -> FootprintResult<EstimationResult> {
    Estimator::new().estimate(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_components::land::SequestrationRequest;
    use footprint_components::procurement::{FeedRequest, SeedRequest};
    use footprint_core::errors::FootprintError;
    use footprint_core::period::ReportingPeriod;
    use footprint_core::reference::VegetationType;
    use is_close::is_close;

    #[test]
    fn test_zero_harvest_rejected_before_sources() {
        let mut request = EstimationRequest::new(0.0, ReportingPeriod::cycle(90.0));
        // Would fail on its own with a different field
        request.with_feed(FeedRequest::total(-1.0));

        let err = estimate(&request).unwrap_err();
        assert_eq!(err.field(), Some("harvested_shrimp_kg"));
    }

    #[test]
    fn test_infinite_harvest_rejected() {
        let mut request = EstimationRequest::new(f64::INFINITY, ReportingPeriod::Year);
        request.with_feed(FeedRequest::total(10.0));

        let err = estimate(&request).unwrap_err();
        assert_eq!(err.field(), Some("harvested_shrimp_kg"));
    }

    #[test]
    fn test_zero_cycle_days_rejected() {
        let request = EstimationRequest::new(100.0, ReportingPeriod::cycle(0.0));
        assert!(matches!(
            estimate(&request).unwrap_err(),
            FootprintError::OutOfRange { .. }
        ));
    }

    #[test]
    fn test_empty_request_has_zero_total() {
        let result = estimate(&EstimationRequest::new(100.0, ReportingPeriod::Year)).unwrap();
        assert!(result.breakdown_kgco2e.is_empty());
        assert_eq!(result.total_kgco2e, 0.0);
        assert_eq!(result.intensity_kgco2e_per_kg_shrimp, 0.0);
    }

    #[test]
    fn test_total_is_sum_of_breakdown() {
        let mut request = EstimationRequest::new(500.0, ReportingPeriod::cycle(120.0));
        request
            .with_feed(FeedRequest::from_ratio(1.4))
            .with_seed(SeedRequest::new(300.0))
            .with_sequestration(SequestrationRequest::new(VegetationType::Wetlands, 2.0));

        let result = estimate(&request).unwrap();
        let sum: f64 = result.breakdown_kgco2e.values().sum();
        assert!(is_close!(result.total_kgco2e, sum));
        assert!(result.contribution(SourceKind::Sequestration).unwrap() < 0.0);
        assert!(is_close!(
            result.intensity_kgco2e_per_kg_shrimp,
            result.total_kgco2e / 500.0
        ));
    }

    #[test]
    fn test_custom_reference_data() {
        let reference = ReferenceData {
            feed_kgco2e_per_kg: 1.0,
            ..ReferenceData::default()
        };
        let mut request = EstimationRequest::new(10.0, ReportingPeriod::Year);
        request.with_feed(FeedRequest::total(25.0));

        let result = Estimator::with_reference(&reference).estimate(&request).unwrap();
        assert!(is_close!(result.total_kgco2e, 25.0));
    }
}
