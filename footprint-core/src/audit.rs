//! Building blocks shared by the per-source audit records.

use serde::{Deserialize, Serialize};

/// Where a resolved factor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorOrigin {
    /// Looked up in the reference tables.
    Default,
    /// Supplied by the caller (supplier LCA, metered data, policy factor).
    Override,
}

/// Pick the caller's override when present, otherwise the default.
pub fn resolve_factor(override_value: Option<f64>, default: f64) -> (f64, FactorOrigin) {
    match override_value {
        Some(value) => (value, FactorOrigin::Override),
        None => (default, FactorOrigin::Default),
    }
}
