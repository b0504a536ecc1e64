//! Tariff cost engine: consumption + tariff in, itemized cost out.

use crate::tariff::Tariff;

use super::types::{CalculationRequest, CalculationResult, CostBreakdown};

/// Share-weighted average of the boiler and CHP net rates (ct/kWh).
pub fn blended_rate_net_ct(tariff: &Tariff) -> f64 {
    tariff.boiler_rate_ct_per_kwh() * tariff.boiler_share()
        + tariff.chp_rate_ct_per_kwh() * tariff.chp_share()
}

/// Computes the unrounded cost breakdown for a request.
///
/// Performs no validation: negative consumption yields a negative energy
/// cost. Use [`CalculationRequest::validate`] first to reject it.
pub fn compute_exact(request: &CalculationRequest) -> CostBreakdown {
    let tariff = &request.tariff;
    let rate_net_ct = blended_rate_net_ct(tariff);
    let vat_factor = if request.include_vat {
        1.0 + tariff.vat_rate()
    } else {
        1.0
    };

    let rate_per_kwh = (rate_net_ct / 100.0) * vat_factor;
    let fixed_year = tariff.fixed_charge_net_per_year() * vat_factor;
    let fixed_for_period = fixed_year / request.period.per_year();

    let energy_cost = request.consumption_kwh * rate_per_kwh;

    CostBreakdown {
        blended_rate_net_ct_per_kwh: rate_net_ct,
        blended_rate_per_kwh: rate_per_kwh,
        fixed_charge_for_period: fixed_for_period,
        energy_cost,
        total_cost: fixed_for_period + energy_cost,
        total_consumption_kwh: request.consumption_kwh,
        period: request.period,
        include_vat: request.include_vat,
    }
}

/// Computes the display-ready cost breakdown for a request.
///
/// # Examples
///
/// ```
/// use heat_cost::calc::engine::compute;
/// use heat_cost::calc::types::CalculationRequest;
///
/// let request = CalculationRequest::new(10_000.0).unwrap();
/// let result = compute(&request);
/// assert_eq!(result.total_cost, 36766.53);
/// ```
pub fn compute(request: &CalculationRequest) -> CalculationResult {
    compute_exact(request).rounded()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::calc::types::Period;
    use crate::tariff::{REFERENCE_2023, TariffParams};

    fn request(consumption_kwh: f64, period: Period, include_vat: bool) -> CalculationRequest {
        CalculationRequest {
            consumption_kwh,
            period,
            include_vat,
            tariff: REFERENCE_2023,
        }
    }

    #[test]
    fn blended_rate_is_weighted_average() {
        // 19.30 * 0.6466 + 15.49 * 0.3534
        assert_relative_eq!(blended_rate_net_ct(&REFERENCE_2023), 17.953546, epsilon = 1e-9);
    }

    #[test]
    fn equal_rates_blend_to_that_rate() {
        let tariff = Tariff::new(TariffParams {
            boiler_rate_ct_per_kwh: 12.0,
            chp_rate_ct_per_kwh: 12.0,
            ..TariffParams::default()
        });
        let rate = tariff.as_ref().map(blended_rate_net_ct).ok();
        assert_relative_eq!(rate.unwrap_or_default(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn reference_year_gross_scenario() {
        let result = compute(&request(10_000.0, Period::Year, true));
        assert_eq!(result.blended_rate_net_ct_per_kwh, 17.95);
        assert_eq!(result.blended_rate_per_kwh, 0.2136);
        assert_eq!(result.fixed_charge_for_period, 34630.06);
        assert_eq!(result.energy_cost, 2136.47);
        assert_eq!(result.total_cost, 36766.53);
        assert_eq!(result.total_consumption_kwh, 10_000.0);
    }

    #[test]
    fn month_net_fixed_charge_is_twelfth_of_year_net() {
        let year = compute_exact(&request(500.0, Period::Year, false));
        let month = compute_exact(&request(500.0, Period::Month, false));
        assert_eq!(month.fixed_charge_for_period, year.fixed_charge_for_period / 12.0);
        assert_eq!(compute(&request(500.0, Period::Month, false)).fixed_charge_for_period, 2425.07);
    }

    #[test]
    fn total_equals_fixed_plus_energy_before_rounding() {
        for consumption in [0.0, 1.0, 123.456, 10_000.0, 987_654.321] {
            for period in [Period::Year, Period::Month] {
                for vat in [true, false] {
                    let b = compute_exact(&request(consumption, period, vat));
                    assert_eq!(b.total_cost, b.fixed_charge_for_period + b.energy_cost);
                }
            }
        }
    }

    #[test]
    fn excluding_vat_divides_rate_and_fixed_charge_by_vat_factor() {
        let gross = compute_exact(&request(2_000.0, Period::Year, true));
        let net = compute_exact(&request(2_000.0, Period::Year, false));
        let factor = 1.0 + REFERENCE_2023.vat_rate();
        assert_relative_eq!(
            net.blended_rate_per_kwh,
            gross.blended_rate_per_kwh / factor,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            net.fixed_charge_for_period,
            gross.fixed_charge_for_period / factor,
            max_relative = 1e-12
        );
        assert_eq!(net.blended_rate_net_ct_per_kwh, gross.blended_rate_net_ct_per_kwh);
    }

    #[test]
    fn zero_consumption_costs_only_fixed_charge() {
        let b = compute_exact(&request(0.0, Period::Year, true));
        assert_eq!(b.energy_cost, 0.0);
        assert_eq!(b.total_cost, b.fixed_charge_for_period);
    }

    #[test]
    fn negative_consumption_passes_through_unchecked() {
        let b = compute_exact(&request(-100.0, Period::Year, false));
        assert!(b.energy_cost < 0.0);
        assert_relative_eq!(b.energy_cost, -100.0 * b.blended_rate_per_kwh, max_relative = 1e-12);
    }

    #[test]
    fn compute_is_deterministic() {
        let req = request(4321.0, Period::Month, true);
        assert_eq!(compute(&req), compute(&req));
    }
}
