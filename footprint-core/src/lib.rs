//! Core types for shrimp aquaculture footprint estimation.
//!
//! This crate holds the plumbing shared by every emission model: the error
//! type, unit constants, reference-data tables, the energy to emissions
//! conversion, the reporting period, and the [`source::EmissionSource`] trait.

pub mod audit;
pub mod constants;
pub mod energy;
pub mod errors;
pub mod period;
pub mod reference;
pub mod source;
pub mod validation;
