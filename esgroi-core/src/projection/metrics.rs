//! Summary metrics derived from a projected cashflow table.

use super::result::RoiYearRow;

pub const IRR_INITIAL_GUESS: f64 = 0.1;
pub const IRR_TOLERANCE: f64 = 1e-7;
pub const IRR_MAX_ITERATIONS: u32 = 100;
const IRR_MIN_DERIVATIVE: f64 = 1e-14;

pub fn npv(rows: &[RoiYearRow]) -> f64 {
    rows.iter().map(|r| r.discounted_cf).sum()
}

/// Internal rate of return of `cashflows` (index = period) by Newton–Raphson.
///
/// Returns `None` when the derivative vanishes, an iterate leaves the finite range,
/// or the rate has not settled within `IRR_MAX_ITERATIONS`. All-positive or
/// all-negative series typically end up here.
pub fn irr(cashflows: &[f64]) -> Option<f64> {
    let mut rate = IRR_INITIAL_GUESS;

    for _ in 0..IRR_MAX_ITERATIONS {
        let mut value = 0.0;
        let mut derivative = 0.0;
        for (t, cf) in cashflows.iter().enumerate() {
            let t = t as i32;
            value += cf / (1.0 + rate).powi(t);
            if t > 0 {
                derivative -= f64::from(t) * cf / (1.0 + rate).powi(t + 1);
            }
        }

        if derivative.abs() < IRR_MIN_DERIVATIVE {
            return None;
        }

        let next = rate - value / derivative;
        if !next.is_finite() {
            return None;
        }
        if (next - rate).abs() < IRR_TOLERANCE {
            return Some(next);
        }
        rate = next;
    }

    None
}

/// Years until the cumulative cashflow turns non-negative, interpolated linearly
/// inside the first year where it crosses from negative to non-negative.
///
/// A projection whose cumulative cashflow never drops below zero (no net
/// investment, no losses) pays back immediately. One that dips and never
/// recovers has no payback.
pub fn payback_years(rows: &[RoiYearRow]) -> Option<f64> {
    let crossing = rows.windows(2).enumerate().find_map(|(i, pair)| {
        let (prev, curr) = (&pair[0], &pair[1]);
        if curr.cumulative_cf >= 0.0 && prev.cumulative_cf < 0.0 {
            // prev < 0 <= curr, so this year's cashflow is strictly positive
            Some(i as f64 + (-prev.cumulative_cf / curr.net_cashflow))
        } else {
            None
        }
    });

    crossing.or_else(|| {
        let never_negative =
            !rows.is_empty() && rows.iter().all(|row| row.cumulative_cf >= 0.0);
        never_negative.then_some(0.0)
    })
}

/// Undiscounted total benefit as a multiple of net CAPEX.
pub fn quick_roi(rows: &[RoiYearRow], net_capex: f64) -> f64 {
    if net_capex <= 0.0 {
        return 0.0;
    }
    let total_benefit: f64 = rows.iter().map(|r| r.total_benefit).sum();
    total_benefit / net_capex
}

pub fn marginal_abatement_cost(rows: &[RoiYearRow], npv: f64) -> Option<f64> {
    let total_reduction: f64 = rows.iter().map(|r| r.kpi_reduction).sum();
    if total_reduction > 0.0 {
        Some(-npv / total_reduction)
    } else {
        None
    }
}
