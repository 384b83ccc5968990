//! Per-source audit records under one type.

use crate::energy::{AerationAudit, PumpingAudit};
use crate::land::{LulucAudit, SequestrationAudit};
use crate::pond::PondFluxAudit;
use crate::procurement::{FeedAudit, SeedAudit};
use footprint_core::source::SourceKind;
use serde::{Deserialize, Serialize};

/// The resolved inputs of any emission source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SourceAudit {
    Pumping(PumpingAudit),
    Aeration(AerationAudit),
    Feed(FeedAudit),
    Seed(SeedAudit),
    Luluc(LulucAudit),
    Sequestration(SequestrationAudit),
    PondCh4N2o(PondFluxAudit),
}

impl SourceAudit {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Pumping(_) => SourceKind::Pumping,
            Self::Aeration(_) => SourceKind::Aeration,
            Self::Feed(_) => SourceKind::Feed,
            Self::Seed(_) => SourceKind::Seed,
            Self::Luluc(_) => SourceKind::Luluc,
            Self::Sequestration(_) => SourceKind::Sequestration,
            Self::PondCh4N2o(_) => SourceKind::PondCh4N2o,
        }
    }
}

macro_rules! impl_from_audit {
    ($($audit:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$audit> for SourceAudit {
                fn from(audit: $audit) -> Self {
                    Self::$variant(audit)
                }
            }
        )*
    };
}

impl_from_audit!(
    PumpingAudit => Pumping,
    AerationAudit => Aeration,
    FeedAudit => Feed,
    SeedAudit => Seed,
    LulucAudit => Luluc,
    SequestrationAudit => Sequestration,
    PondFluxAudit => PondCh4N2o,
);
