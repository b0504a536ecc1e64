//! Heating tariff parameters and the built-in reference rate card.

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Allowed deviation of `boiler_share + chp_share` from one.
pub const SHARE_TOLERANCE: f64 = 1e-6;

/// The 2023 rate card, used whenever the caller does not supply a tariff.
pub const REFERENCE_2023: Tariff = Tariff {
    vat_rate: 0.19,
    fixed_charge_net_per_year: 29100.89,
    boiler_rate_ct_per_kwh: 19.30,
    chp_rate_ct_per_kwh: 15.49,
    boiler_share: 0.6466,
    chp_share: 0.3534,
};

/// Returns the built-in default tariff.
pub fn default_tariff() -> Tariff {
    REFERENCE_2023
}

/// Unchecked tariff parameters, as read from configuration or JSON.
///
/// Convert into a [`Tariff`] with `Tariff::try_from` to enforce the
/// range and share invariants. Missing fields fall back to
/// [`REFERENCE_2023`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffParams {
    /// VAT as a fraction (0.19 = 19%).
    pub vat_rate: f64,
    /// Annual fixed charge, net of VAT.
    pub fixed_charge_net_per_year: f64,
    /// Boiler energy rate in ct/kWh, net of VAT.
    pub boiler_rate_ct_per_kwh: f64,
    /// Combined-heat-and-power energy rate in ct/kWh, net of VAT.
    pub chp_rate_ct_per_kwh: f64,
    /// Boiler contribution weight (0.0–1.0).
    pub boiler_share: f64,
    /// CHP contribution weight (0.0–1.0).
    pub chp_share: f64,
}

impl Default for TariffParams {
    fn default() -> Self {
        REFERENCE_2023.into()
    }
}

impl TariffParams {
    /// Every range and share problem, in field order.
    ///
    /// The share sum is only checked once both shares lie in `[0, 1]`.
    pub fn problems(&self) -> Vec<CalcError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("vat_rate", self.vat_rate),
            ("fixed_charge_net_per_year", self.fixed_charge_net_per_year),
            ("boiler_rate_ct_per_kwh", self.boiler_rate_ct_per_kwh),
            ("chp_rate_ct_per_kwh", self.chp_rate_ct_per_kwh),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(CalcError::InvalidTariffValue { field, value });
            }
        }

        let mut shares_in_range = true;
        for (field, value) in [
            ("boiler_share", self.boiler_share),
            ("chp_share", self.chp_share),
        ] {
            if !(0.0..=1.0).contains(&value) {
                shares_in_range = false;
                errors.push(CalcError::InvalidTariffValue { field, value });
            }
        }

        if shares_in_range && (self.boiler_share + self.chp_share - 1.0).abs() > SHARE_TOLERANCE {
            errors.push(CalcError::InvalidTariffShares {
                boiler_share: self.boiler_share,
                chp_share: self.chp_share,
            });
        }

        errors
    }
}

/// A validated heating tariff.
///
/// Invariants: every value is finite and non-negative, both shares lie in
/// `[0, 1]`, and they sum to one within [`SHARE_TOLERANCE`].
///
/// # Examples
///
/// ```
/// use heat_cost::tariff::{Tariff, TariffParams};
///
/// let params = TariffParams { boiler_share: 0.5, chp_share: 0.5, ..TariffParams::default() };
/// let tariff = Tariff::new(params).unwrap();
/// assert_eq!(tariff.boiler_share(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TariffParams", into = "TariffParams")]
pub struct Tariff {
    vat_rate: f64,
    fixed_charge_net_per_year: f64,
    boiler_rate_ct_per_kwh: f64,
    chp_rate_ct_per_kwh: f64,
    boiler_share: f64,
    chp_share: f64,
}

impl Tariff {
    /// Builds a tariff, rejecting out-of-range values and shares that do not sum to one.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidTariffValue`] for a negative or non-finite
    /// parameter (or a share above one) and [`CalcError::InvalidTariffShares`]
    /// when the shares do not sum to one.
    pub fn new(params: TariffParams) -> Result<Self, CalcError> {
        if let Some(err) = params.problems().into_iter().next() {
            return Err(err);
        }

        Ok(Self {
            vat_rate: params.vat_rate,
            fixed_charge_net_per_year: params.fixed_charge_net_per_year,
            boiler_rate_ct_per_kwh: params.boiler_rate_ct_per_kwh,
            chp_rate_ct_per_kwh: params.chp_rate_ct_per_kwh,
            boiler_share: params.boiler_share,
            chp_share: params.chp_share,
        })
    }

    pub fn vat_rate(&self) -> f64 {
        self.vat_rate
    }

    pub fn fixed_charge_net_per_year(&self) -> f64 {
        self.fixed_charge_net_per_year
    }

    pub fn boiler_rate_ct_per_kwh(&self) -> f64 {
        self.boiler_rate_ct_per_kwh
    }

    pub fn chp_rate_ct_per_kwh(&self) -> f64 {
        self.chp_rate_ct_per_kwh
    }

    pub fn boiler_share(&self) -> f64 {
        self.boiler_share
    }

    pub fn chp_share(&self) -> f64 {
        self.chp_share
    }
}

impl Default for Tariff {
    fn default() -> Self {
        default_tariff()
    }
}

impl TryFrom<TariffParams> for Tariff {
    type Error = CalcError;

    fn try_from(params: TariffParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<Tariff> for TariffParams {
    fn from(t: Tariff) -> Self {
        Self {
            vat_rate: t.vat_rate,
            fixed_charge_net_per_year: t.fixed_charge_net_per_year,
            boiler_rate_ct_per_kwh: t.boiler_rate_ct_per_kwh,
            chp_rate_ct_per_kwh: t.chp_rate_ct_per_kwh,
            boiler_share: t.boiler_share,
            chp_share: t.chp_share,
        }
    }
}
