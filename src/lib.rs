//! Greenhouse-gas footprint of shrimp aquaculture.
//!
//! Independent emission-source models (pumping, aeration, feed, seed, land
//! conversion, vegetation sequestration and pond CH4/N2O) combined into one
//! total and a per-kilogram intensity, with a record of every value used.
//!
//! ```
//! use shrimp_footprint::{estimate, EstimationRequest, FeedRequest, ReportingPeriod};
//!
//! let mut request = EstimationRequest::new(10_000.0, ReportingPeriod::cycle(90.0));
//! request.with_feed(FeedRequest::total(15_000.0));
//!
//! let result = estimate(&request).unwrap();
//! assert_eq!(result.breakdown_kgco2e.len(), 1);
//! ```

pub mod estimator;
pub mod request;
pub mod result;

pub use estimator::{estimate, Estimator};
pub use request::EstimationRequest;
pub use result::{EstimationResult, ResolvedInputs, ResolvedInputsBuilder};

pub use footprint_components::audit::SourceAudit;
pub use footprint_components::energy::{
    AerationRequest, FlowBasis, HydraulicSetup, PumpingInputs, PumpingMethod, PumpingRequest,
};
pub use footprint_components::land::{LulucRequest, SequestrationRequest};
pub use footprint_components::parameters;
pub use footprint_components::pond::{
    FactorOverrides, OrganicMatterSummary, PondFluxInputs, PondFluxMethod, PondFluxRequest,
    PondTier,
};
pub use footprint_components::procurement::{FeedRequest, SeedRequest};
pub use footprint_core::energy::EnergySupply;
pub use footprint_core::errors::{FootprintError, FootprintResult};
pub use footprint_core::period::{Boundary, ReportingPeriod};
pub use footprint_core::reference::{
    Fuel, IntensityClass, ReferenceData, SoilType, VegetationType,
};
pub use footprint_core::source::SourceKind;
