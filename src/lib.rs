//! Heating cost calculator: blended tariff, fixed charge, VAT, and period normalization.

/// Optional REST API (feature `api`).
#[cfg(feature = "api")]
pub mod api;
/// Cost engine, consumption input, and meter aggregation.
pub mod calc;
pub mod config;
pub mod error;
/// CSV import and export.
pub mod io;
/// Tariff parameters and the built-in default.
pub mod tariff;

pub use calc::{CalculationRequest, CalculationResult, ConsumptionInput, Period, compute};
pub use error::CalcError;
pub use tariff::{Tariff, default_tariff};
