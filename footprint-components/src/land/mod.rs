//! Land: soil carbon lost at conversion and carbon taken up by vegetation.

mod luluc;
mod sequestration;

pub use luluc::{luluc_annual_emissions, luluc_cycle_emissions, LulucAudit, LulucRequest};
pub use sequestration::{sequestration_annual_removal, SequestrationAudit, SequestrationRequest};
