//! Shared test fixtures for integration tests.

use heat_cost::calc::meters::MeterReading;
use heat_cost::calc::types::{CalculationRequest, Period};
use heat_cost::tariff::{REFERENCE_2023, Tariff};

/// Reference 2023 tariff (VAT 19%, 29100.89 fixed, 19.30/15.49 ct, 0.6466/0.3534).
pub fn reference_tariff() -> Tariff {
    REFERENCE_2023
}

/// Unchecked request on the reference tariff.
pub fn request(consumption_kwh: f64, period: Period, include_vat: bool) -> CalculationRequest {
    CalculationRequest {
        consumption_kwh,
        period,
        include_vat,
        tariff: reference_tariff(),
    }
}

/// Three meters: one forward (120), one reversed, one unchanged.
pub fn three_rooms() -> Vec<MeterReading> {
    vec![
        MeterReading::new("Living room", 0.0, 120.0),
        MeterReading::new("Bedroom", 50.0, 40.0),
        MeterReading::new("Hall", 10.0, 10.0),
    ]
}
