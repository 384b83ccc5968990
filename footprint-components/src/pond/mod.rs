//! Pond water-column greenhouse gases.

mod flux;

pub use flux::{
    pond_flux_emissions, resolve_factors, FactorOverrides, OrganicMatterSummary, PondFluxAudit,
    PondFluxInputs, PondFluxMethod, PondFluxRequest, PondTier, ResolvedFactors,
};
