//! Validation errors raised at the calculation boundary.

use thiserror::Error;

/// Reasons a consumption figure or tariff is rejected before costing.
///
/// The cost engine itself never fails; these are produced by the checked
/// constructors ([`crate::tariff::Tariff::new`],
/// [`crate::calc::types::CalculationRequest::new`]) and by
/// [`crate::calc::input::ConsumptionInput::resolve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Consumption is negative or not a finite number.
    #[error("invalid consumption {value} kWh: must be a finite number >= 0")]
    InvalidConsumption { value: f64 },
    /// Generation shares do not add up to one.
    #[error("invalid tariff shares: boiler {boiler_share} + chp {chp_share} must equal 1")]
    InvalidTariffShares { boiler_share: f64, chp_share: f64 },
    /// A single tariff parameter is out of range.
    #[error("invalid tariff value for `{field}`: {value}")]
    InvalidTariffValue { field: &'static str, value: f64 },
}
