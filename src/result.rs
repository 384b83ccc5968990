//! Estimation result and the resolved-inputs audit record.

use footprint_components::audit::SourceAudit;
use footprint_components::energy::{AerationAudit, PumpingAudit};
use footprint_components::land::{LulucAudit, SequestrationAudit};
use footprint_components::pond::PondFluxAudit;
use footprint_components::procurement::{FeedAudit, SeedAudit};
use footprint_core::period::{Boundary, ReportingPeriod};
use footprint_core::source::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values, tiers and factors each estimated source actually used.
///
/// A source that was not part of the request has no entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResolvedInputs {
    /// Scaling applied to annualised sources (LULUC, sequestration)
    pub period_fraction_of_year: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pumping: Option<PumpingAudit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aeration: Option<AerationAudit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed: Option<FeedAudit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<SeedAudit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luluc: Option<LulucAudit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequestration: Option<SequestrationAudit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pond_ch4_n2o: Option<PondFluxAudit>,
}

impl ResolvedInputs {
    /// Sources with an audit entry, in breakdown order.
    pub fn sources(&self) -> Vec<SourceKind> {
        [
            (SourceKind::Pumping, self.pumping.is_some()),
            (SourceKind::Aeration, self.aeration.is_some()),
            (SourceKind::Feed, self.feed.is_some()),
            (SourceKind::Seed, self.seed.is_some()),
            (SourceKind::Luluc, self.luluc.is_some()),
            (SourceKind::Sequestration, self.sequestration.is_some()),
            (SourceKind::PondCh4N2o, self.pond_ch4_n2o.is_some()),
        ]
        .into_iter()
        .filter_map(|(kind, present)| present.then_some(kind))
        .collect()
    }
}

/// Collects per-source audit records as the estimator runs each source.
#[derive(Debug, Default)]
pub struct ResolvedInputsBuilder {
    inputs: ResolvedInputs,
}

impl ResolvedInputsBuilder {
    pub fn new(period: ReportingPeriod) -> Self {
        Self {
            inputs: ResolvedInputs {
                period_fraction_of_year: period.fraction_of_year(),
                ..ResolvedInputs::default()
            },
        }
    }

    /// Record a source's audit, replacing any earlier record for that source.
    pub fn record(&mut self, audit: impl Into<SourceAudit>) -> &mut Self {
        match audit.into() {
            SourceAudit::Pumping(audit) => self.inputs.pumping = Some(audit),
            SourceAudit::Aeration(audit) => self.inputs.aeration = Some(audit),
            SourceAudit::Feed(audit) => self.inputs.feed = Some(audit),
            SourceAudit::Seed(audit) => self.inputs.seed = Some(audit),
            SourceAudit::Luluc(audit) => self.inputs.luluc = Some(audit),
            SourceAudit::Sequestration(audit) => self.inputs.sequestration = Some(audit),
            SourceAudit::PondCh4N2o(audit) => self.inputs.pond_ch4_n2o = Some(audit),
        }
        self
    }

    pub fn build(self) -> ResolvedInputs {
        self.inputs
    }
}

/// Footprint of one reporting period.
///
/// Serialises as a flat record: `period`, `cycle_days` (cycle only),
/// `boundary`, the totals, `breakdown_kgco2e` and `inputs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    #[serde(flatten)]
    pub period: ReportingPeriod,
    pub boundary: Boundary,
    /// unit: kg
    pub harvested_shrimp_kg: f64,
    /// unit: kg CO2e
    pub total_kgco2e: f64,
    /// unit: kg CO2e/kg shrimp
    pub intensity_kgco2e_per_kg_shrimp: f64,
    /// Signed contribution per estimated source; removals are negative.
    /// unit: kg CO2e
    pub breakdown_kgco2e: BTreeMap<SourceKind, f64>,
    pub inputs: ResolvedInputs,
}

impl EstimationResult {
    pub fn contribution(&self, kind: SourceKind) -> Option<f64> {
        self.breakdown_kgco2e.get(&kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_components::procurement::{feed_emissions, FeedRequest};
    use footprint_core::reference::ReferenceData;

    #[test]
    fn test_builder_records_only_given_sources() {
        let (_, audit) = feed_emissions(
            &FeedRequest::total(100.0),
            1000.0,
            Boundary::A,
            ReferenceData::builtin(),
        )
        .unwrap();

        let mut builder = ResolvedInputsBuilder::new(ReportingPeriod::cycle(73.0));
        builder.record(audit);
        let inputs = builder.build();

        assert_eq!(inputs.sources(), vec![SourceKind::Feed]);
        assert!(inputs.pumping.is_none());
        assert_eq!(inputs.period_fraction_of_year, 0.2);
    }

    #[test]
    fn test_absent_sources_are_not_serialised() {
        let inputs = ResolvedInputsBuilder::new(ReportingPeriod::Year).build();
        let json = serde_json::to_value(&inputs).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("period_fraction_of_year"));
    }
}
