//! Physical and unit conversion constants.
//!
//! Fixed values shared by every emission model. Anything an operator may
//! reasonably want to change lives in [`crate::reference::ReferenceData`] or
//! in a parameters struct instead.

/// Mass ratio of CO2 to elemental carbon (44/12, as rounded in the methodology).
pub const C_TO_CO2: f64 = 3.67;

/// Mechanical horsepower to kilowatts.
pub const HP_TO_KW: f64 = 0.7457;

/// Joules per kilowatt-hour.
pub const J_PER_KWH: f64 = 3.6e6;

/// Megajoules per kilowatt-hour.
pub const MJ_PER_KWH: f64 = 3.6;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Hours per day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Length of the reporting year used to annualise and de-annualise figures [days].
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Kilograms per tonne.
pub const KG_PER_TONNE: f64 = 1000.0;

/// Grams per kilogram.
pub const G_PER_KG: f64 = 1000.0;
