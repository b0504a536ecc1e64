/// Cost engine: blended rate, VAT, period normalization.
pub mod engine;
/// Total-or-meters consumption input.
pub mod input;
/// Meter readings and aggregation.
pub mod meters;
pub mod types;

pub use engine::{compute, compute_exact};
pub use input::ConsumptionInput;
pub use meters::{MeterReading, aggregate};
pub use types::{CalculationRequest, CalculationResult, CostBreakdown, Period};
