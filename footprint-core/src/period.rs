//! Reporting period and boundary.

use crate::constants::DAYS_PER_YEAR;
use crate::errors::FootprintResult;
use crate::validation::positive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time basis the footprint is reported on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "period", rename_all = "snake_case")]
pub enum ReportingPeriod {
    /// One production cycle (pond preparation to harvest).
    Cycle { cycle_days: f64 },
    /// A full calendar year.
    Year,
}

impl ReportingPeriod {
    pub fn cycle(cycle_days: f64) -> Self {
        Self::Cycle { cycle_days }
    }

    /// Number of days covered by the period.
    pub fn days(&self) -> f64 {
        match self {
            Self::Cycle { cycle_days } => *cycle_days,
            Self::Year => DAYS_PER_YEAR,
        }
    }

    /// Share of a year covered by the period, used to scale annualised sources.
    pub fn fraction_of_year(&self) -> f64 {
        match self {
            Self::Cycle { cycle_days } => cycle_days / DAYS_PER_YEAR,
            Self::Year => 1.0,
        }
    }

    pub fn cycle_days(&self) -> Option<f64> {
        match self {
            Self::Cycle { cycle_days } => Some(*cycle_days),
            Self::Year => None,
        }
    }

    pub fn validate(&self) -> FootprintResult<()> {
        if let Self::Cycle { cycle_days } = self {
            positive("cycle_days", *cycle_days)?;
        }
        Ok(())
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle { .. } => write!(f, "cycle"),
            Self::Year => write!(f, "year"),
        }
    }
}

/// Reporting-scope mode for procurement factors.
///
/// `A` uses literature defaults; `B` permits supplier or LCA-specific data.
/// The mode is recorded for audit: an explicit override is honoured in
/// either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Boundary {
    #[default]
    A,
    B,
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_fraction_of_year() {
        assert!(is_close!(ReportingPeriod::Year.fraction_of_year(), 1.0));
        assert!(is_close!(
            ReportingPeriod::cycle(73.0).fraction_of_year(),
            0.2
        ));
    }

    #[test]
    fn test_days() {
        assert!(is_close!(ReportingPeriod::Year.days(), 365.0));
        assert!(is_close!(ReportingPeriod::cycle(90.0).days(), 90.0));
    }

    #[test]
    fn test_zero_cycle_rejected() {
        assert!(ReportingPeriod::cycle(0.0).validate().is_err());
        assert!(ReportingPeriod::Year.validate().is_ok());
    }
}
