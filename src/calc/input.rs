//! Mode-tagged consumption input: one total figure or a set of meters.

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

use super::meters::{IndexedWarning, MeterReading, aggregate, meter_warnings};
use super::types::check_consumption;

/// How the consumer supplies their consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionInput {
    /// A single aggregate figure in kWh.
    Total(f64),
    /// Per-room meter readings, summed by [`aggregate`].
    Meters(Vec<MeterReading>),
}

impl ConsumptionInput {
    /// Checks the input without resolving it.
    ///
    /// Reversed meter readings are not errors; see [`Self::warnings`].
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidConsumption`] for a negative or
    /// non-finite total, or for any non-finite meter value.
    pub fn validate(&self) -> Result<(), CalcError> {
        match self {
            Self::Total(kwh) => check_consumption(*kwh),
            Self::Meters(readings) => readings
                .iter()
                .flat_map(|r| [r.start, r.end])
                .flatten()
                .find(|v| !v.is_finite())
                .map_or(Ok(()), |value| Err(CalcError::InvalidConsumption { value })),
        }
    }

    /// Resolves the input to a single consumption figure in kWh.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::validate`], plus a meter sum that
    /// overflows to infinity.
    pub fn resolve(&self) -> Result<f64, CalcError> {
        self.validate()?;
        let kwh = match self {
            Self::Total(kwh) => *kwh,
            Self::Meters(readings) => aggregate(readings),
        };
        check_consumption(kwh)?;
        Ok(kwh)
    }

    /// Advisory meter warnings; always empty for a total figure.
    pub fn warnings(&self) -> Vec<IndexedWarning> {
        match self {
            Self::Total(_) => Vec::new(),
            Self::Meters(readings) => meter_warnings(readings),
        }
    }
}
