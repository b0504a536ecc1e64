//! Request, breakdown, and result types for the cost engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::tariff::{Tariff, default_tariff};

/// Decimal places for currency-scale output fields.
pub const CURRENCY_DECIMALS: u32 = 2;
/// Decimal places for the per-kWh monetary rate.
pub const RATE_DECIMALS: u32 = 4;

/// Billing period the fixed charge is normalized to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Year,
    Month,
}

impl Period {
    /// Number of periods per year.
    pub fn per_year(self) -> f64 {
        match self {
            Self::Year => 1.0,
            Self::Month => 12.0,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year => write!(f, "year"),
            Self::Month => write!(f, "month"),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            other => Err(format!("must be \"year\" or \"month\", got \"{other}\"")),
        }
    }
}

/// Fully resolved input to [`crate::calc::engine::compute`].
///
/// The tariff is always present: callers resolve any override against
/// [`default_tariff`] before the engine runs. Build with
/// [`CalculationRequest::new`] for a checked request with defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    /// Energy consumed in the billing period (kWh).
    pub consumption_kwh: f64,
    /// Period the fixed charge is reported for.
    pub period: Period,
    /// Whether output figures include VAT.
    pub include_vat: bool,
    /// Tariff used for pricing.
    pub tariff: Tariff,
}

impl CalculationRequest {
    /// Creates a yearly, VAT-inclusive request on the default tariff.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidConsumption`] if `consumption_kwh` is
    /// negative or not finite.
    pub fn new(consumption_kwh: f64) -> Result<Self, CalcError> {
        let request = Self {
            consumption_kwh,
            period: Period::default(),
            include_vat: true,
            tariff: default_tariff(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn with_vat(mut self, include_vat: bool) -> Self {
        self.include_vat = include_vat;
        self
    }

    /// Replaces the tariff when an override is given; `None` keeps the current one.
    pub fn with_tariff(mut self, tariff: Option<Tariff>) -> Self {
        if let Some(t) = tariff {
            self.tariff = t;
        }
        self
    }

    /// Checks the request without computing costs.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidConsumption`] for negative or non-finite consumption.
    pub fn validate(&self) -> Result<(), CalcError> {
        check_consumption(self.consumption_kwh)
    }
}

pub(crate) fn check_consumption(value: f64) -> Result<(), CalcError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::InvalidConsumption { value })
    }
}

/// Unrounded cost figures, straight from the arithmetic.
///
/// `total_cost == fixed_charge_for_period + energy_cost` holds exactly here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub blended_rate_net_ct_per_kwh: f64,
    pub blended_rate_per_kwh: f64,
    pub fixed_charge_for_period: f64,
    pub energy_cost: f64,
    pub total_cost: f64,
    pub total_consumption_kwh: f64,
    pub period: Period,
    pub include_vat: bool,
}

impl CostBreakdown {
    /// Rounds every field independently for display.
    pub fn rounded(&self) -> CalculationResult {
        CalculationResult {
            blended_rate_net_ct_per_kwh: round_dp(
                self.blended_rate_net_ct_per_kwh,
                CURRENCY_DECIMALS,
            ),
            blended_rate_per_kwh: round_dp(self.blended_rate_per_kwh, RATE_DECIMALS),
            fixed_charge_for_period: round_dp(self.fixed_charge_for_period, CURRENCY_DECIMALS),
            energy_cost: round_dp(self.energy_cost, CURRENCY_DECIMALS),
            total_cost: round_dp(self.total_cost, CURRENCY_DECIMALS),
            total_consumption_kwh: round_dp(self.total_consumption_kwh, CURRENCY_DECIMALS),
            period: self.period,
            include_vat: self.include_vat,
        }
    }
}

/// Display-ready cost breakdown.
///
/// Each field is rounded on its own, so `total_cost` may differ from
/// `fixed_charge_for_period + energy_cost` by one unit in the last place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Share-weighted net energy rate (ct/kWh), 2 dp.
    pub blended_rate_net_ct_per_kwh: f64,
    /// Energy rate per kWh in major currency units, VAT per request, 4 dp.
    pub blended_rate_per_kwh: f64,
    /// Fixed charge for the requested period, 2 dp.
    pub fixed_charge_for_period: f64,
    /// Consumption times rate, 2 dp.
    pub energy_cost: f64,
    /// Fixed charge plus energy cost, 2 dp.
    pub total_cost: f64,
    /// Echo of the consumption, 2 dp.
    pub total_consumption_kwh: f64,
    /// Period the figures refer to.
    pub period: Period,
    /// Whether VAT is included.
    pub include_vat: bool,
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vat = if self.include_vat { "gross" } else { "net" };
        writeln!(f, "--- Cost Breakdown ({}, {vat}) ---", self.period)?;
        writeln!(
            f,
            "Consumption:           {:.2} kWh",
            self.total_consumption_kwh
        )?;
        writeln!(
            f,
            "Blended rate (net):    {:.2} ct/kWh",
            self.blended_rate_net_ct_per_kwh
        )?;
        writeln!(
            f,
            "Blended rate:          {:.4} EUR/kWh",
            self.blended_rate_per_kwh
        )?;
        writeln!(
            f,
            "Fixed charge:          {:.2} EUR",
            self.fixed_charge_for_period
        )?;
        writeln!(f, "Energy cost:           {:.2} EUR", self.energy_cost)?;
        write!(f, "Total cost:            {:.2} EUR", self.total_cost)
    }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_parses_and_displays() {
        assert_eq!("year".parse::<Period>(), Ok(Period::Year));
        assert_eq!("month".parse::<Period>(), Ok(Period::Month));
        assert!("week".parse::<Period>().is_err());
        assert_eq!(Period::Month.to_string(), "month");
        assert_eq!(Period::default(), Period::Year);
    }

    #[test]
    fn new_request_uses_defaults() {
        let req = CalculationRequest::new(100.0).ok();
        assert_eq!(req.as_ref().map(|r| r.period), Some(Period::Year));
        assert_eq!(req.as_ref().map(|r| r.include_vat), Some(true));
        assert_eq!(req.as_ref().map(|r| r.tariff), Some(default_tariff()));
    }

    #[test]
    fn new_request_rejects_negative_consumption() {
        assert_eq!(
            CalculationRequest::new(-1.0),
            Err(CalcError::InvalidConsumption { value: -1.0 })
        );
        assert!(CalculationRequest::new(f64::INFINITY).is_err());
    }

    #[test]
    fn with_tariff_none_keeps_default() {
        let req = CalculationRequest::new(1.0).map(|r| r.with_tariff(None));
        assert_eq!(req.map(|r| r.tariff), Ok(default_tariff()));
    }

    #[test]
    fn round_dp_rounds_half_away_from_zero() {
        assert_eq!(round_dp(1.005_f64 + 1e-12, 2), 1.01);
        assert_eq!(round_dp(-2.5, 0), -3.0);
        assert_eq!(round_dp(0.21364719, 4), 0.2136);
    }

    #[test]
    fn display_lists_every_figure() {
        let result = CalculationResult {
            blended_rate_net_ct_per_kwh: 17.95,
            blended_rate_per_kwh: 0.2136,
            fixed_charge_for_period: 34630.06,
            energy_cost: 2136.47,
            total_cost: 36766.53,
            total_consumption_kwh: 10000.0,
            period: Period::Year,
            include_vat: true,
        };
        let text = result.to_string();
        assert!(text.starts_with("--- Cost Breakdown (year, gross) ---"));
        assert!(text.contains("Total cost:            36766.53 EUR"));
        assert!(text.contains("Blended rate:          0.2136 EUR/kWh"));
    }
}
