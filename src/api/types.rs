//! API request and response bodies.

use serde::{Deserialize, Serialize};

use crate::calc::input::ConsumptionInput;
use crate::calc::meters::IndexedWarning;
use crate::calc::types::{CalculationResult, Period};
use crate::tariff::{Tariff, TariffParams};

/// Body of `POST /calculate`.
///
/// `tariff` is kept unchecked here so that invalid parameters surface as
/// a 400 with a message rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculateBody {
    pub input: ConsumptionInput,
    #[serde(default)]
    pub period: Option<Period>,
    #[serde(default)]
    pub include_vat: Option<bool>,
    #[serde(default)]
    pub tariff: Option<TariffOverride>,
}

/// Per-request tariff override.
///
/// Omitted fields keep the server's configured tariff, not the built-in
/// reference card.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffOverride {
    pub vat_rate: Option<f64>,
    pub fixed_charge_net_per_year: Option<f64>,
    pub boiler_rate_ct_per_kwh: Option<f64>,
    pub chp_rate_ct_per_kwh: Option<f64>,
    pub boiler_share: Option<f64>,
    pub chp_share: Option<f64>,
}

impl TariffOverride {
    /// Fills every omitted field from `base`; the result is still unchecked.
    pub fn merged_onto(&self, base: Tariff) -> TariffParams {
        let base = TariffParams::from(base);
        TariffParams {
            vat_rate: self.vat_rate.unwrap_or(base.vat_rate),
            fixed_charge_net_per_year: self
                .fixed_charge_net_per_year
                .unwrap_or(base.fixed_charge_net_per_year),
            boiler_rate_ct_per_kwh: self
                .boiler_rate_ct_per_kwh
                .unwrap_or(base.boiler_rate_ct_per_kwh),
            chp_rate_ct_per_kwh: self.chp_rate_ct_per_kwh.unwrap_or(base.chp_rate_ct_per_kwh),
            boiler_share: self.boiler_share.unwrap_or(base.boiler_share),
            chp_share: self.chp_share.unwrap_or(base.chp_share),
        }
    }
}

/// Successful calculation with any advisory meter warnings.
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub result: CalculationResult,
    pub warnings: Vec<IndexedWarning>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
