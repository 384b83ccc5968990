//! Energy use: water pumping and pond aeration.

mod aeration;
mod pumping;

pub use aeration::{aeration_emissions, aeration_energy_kwh, AerationAudit, AerationRequest};
pub use pumping::{
    pumping_emissions, pumping_energy, FlowBasis, HydraulicBreakdown, HydraulicSetup,
    PumpingAudit, PumpingEnergy, PumpingInputs, PumpingMethod, PumpingMethodKind,
    PumpingRequest,
};
