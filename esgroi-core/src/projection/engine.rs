use super::{
    metrics,
    ramp::go_live_factor,
    result::{RoiResult, RoiYearRow},
};
use crate::{error::RoiError, logger::CashflowLogger, variable};
use chrono::Datelike;
use esgroi_schemas::{
    action::{Action, ImpactType},
    settings::RoiSettings,
};

/// Treats a missing or non-finite input as zero.
fn amount(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn is_zero_equivalent(value: Option<f64>) -> bool {
    amount(value) == 0.0
}

/// Appraises `action` with the current calendar year as the investment year.
pub fn compute_roi(action: &Action, settings: &RoiSettings) -> Option<RoiResult> {
    compute_roi_at(action, settings, chrono::Local::now().year())
}

/// Appraises `action` with `current_year` as the investment year (`t = 0`).
///
/// Returns `None` until both a KPI baseline and an impact value are set; that is a
/// request for more input, not a failure.
pub fn compute_roi_at(
    action: &Action,
    settings: &RoiSettings,
    current_year: i32,
) -> Option<RoiResult> {
    if is_zero_equivalent(action.kpi_baseline_per_year)
        || is_zero_equivalent(action.impact_value)
    {
        return None;
    }

    let horizon = settings.cashflow_horizon_years;
    // (1 + r)^t must stay positive for the discount factor to be finite
    let discount_rate = match amount(Some(settings.discount_rate)) {
        r if 1.0 + r > 0.0 => r,
        r => {
            tracing::warn!(
                discount_rate = r,
                "discount rate at or below -100%, projecting undiscounted"
            );
            0.0
        }
    };
    let tax_rate = amount(Some(settings.tax_rate));

    // --- CAPEX and funding ---
    let capex = &action.capex;
    let capex_total = amount(capex.equipment)
        + amount(capex.installation)
        + amount(capex.software)
        + amount(capex.consulting)
        + amount(capex.other);

    let grant_amount = amount(action.funding.grant_amount);
    let effective_grant = if grant_amount != 0.0 {
        grant_amount
    } else {
        capex_total * (amount(action.funding.grant_percent) / 100.0)
    };
    let net_capex = capex_total - effective_grant;

    // --- OPEX ---
    let opex = &action.opex;
    let opex_per_year = amount(opex.maintenance)
        + amount(opex.licenses)
        + amount(opex.personnel)
        + amount(opex.other);

    // --- KPI reduction ---
    let baseline = amount(action.kpi_baseline_per_year);
    let impact = amount(action.impact_value);
    let kpi_reduction_per_year = match action.impact_type {
        Some(ImpactType::ReductionPercent) => baseline * (impact / 100.0),
        // a negative absolute impact is an increase in the KPI, still counted by magnitude
        Some(ImpactType::ReductionAbsolute) | None => impact.abs(),
    };

    // --- Depreciation ---
    let depreciation_years = action
        .depreciation_years
        .unwrap_or_else(|| i32::try_from(horizon).unwrap_or(i32::MAX));
    let annual_depreciation = if depreciation_years > 0 {
        net_capex / f64::from(depreciation_years)
    } else {
        0.0
    };

    let other_benefits_per_year = amount(action.other_benefits_per_year);
    let other_costs_per_year = amount(action.other_costs_per_year);
    let fixed_rate = amount(action.monetization_fixed_rate_per_unit);

    // --- Year-by-year projection ---
    let mut years = Vec::with_capacity(horizon as usize + 1);
    let mut cumulative_cf = -net_capex;

    years.push(RoiYearRow {
        year: current_year,
        t: 0,
        go_live_factor: 0.0,
        kpi_reduction: 0.0,
        rate_per_unit: 0.0,
        gross_benefit: 0.0,
        other_benefits: 0.0,
        total_benefit: 0.0,
        opex: 0.0,
        other_costs: 0.0,
        depreciation: 0.0,
        ebit: -net_capex,
        taxes: 0.0,
        net_cashflow: -net_capex,
        discount_factor: 1.0,
        discounted_cf: -net_capex,
        cumulative_cf,
    });

    for t in 1..=horizon {
        let year = current_year.saturating_add(i32::try_from(t).unwrap_or(i32::MAX));
        let glf = go_live_factor(action.due_date, current_year, year);

        let kpi_reduction = kpi_reduction_per_year * glf;
        let rate_per_unit = match &action.monetization_variable {
            Some(v) => variable::resolve(v, year),
            None => fixed_rate,
        };

        let gross_benefit = kpi_reduction * rate_per_unit;
        let other_benefits = other_benefits_per_year * glf;
        let total_benefit = gross_benefit + other_benefits;

        let opex = opex_per_year * glf;
        let other_costs = other_costs_per_year * glf;
        let depreciation = if i64::from(t) <= i64::from(depreciation_years) {
            annual_depreciation
        } else {
            0.0
        };

        let ebit = total_benefit - opex - other_costs - depreciation;
        let taxes = if ebit > 0.0 { ebit * tax_rate } else { 0.0 };
        // depreciation only shields tax, it is not a cash item
        let net_cashflow = total_benefit - opex - other_costs - taxes;

        let discount_factor = 1.0 / (1.0 + discount_rate).powi(t as i32);
        let discounted_cf = net_cashflow * discount_factor;
        cumulative_cf += net_cashflow;

        years.push(RoiYearRow {
            year,
            t,
            go_live_factor: glf,
            kpi_reduction,
            rate_per_unit,
            gross_benefit,
            other_benefits,
            total_benefit,
            opex,
            other_costs,
            depreciation,
            ebit,
            taxes,
            net_cashflow,
            discount_factor,
            discounted_cf,
            cumulative_cf,
        });
    }

    // --- Summary metrics ---
    let npv = metrics::npv(&years);
    let cashflows: Vec<f64> = years.iter().map(|r| r.net_cashflow).collect();
    let irr = metrics::irr(&cashflows);
    let payback_years = metrics::payback_years(&years);
    let quick_roi = metrics::quick_roi(&years, net_capex);
    let marginal_abatement_cost = metrics::marginal_abatement_cost(&years, npv);

    tracing::debug!(
        action_id = %action.action_id,
        npv,
        ?irr,
        ?payback_years,
        "computed ROI projection"
    );

    Some(RoiResult {
        capex_total,
        effective_grant,
        net_capex,
        opex_per_year,
        kpi_reduction_per_year,
        npv,
        irr,
        payback_years,
        quick_roi,
        marginal_abatement_cost,
        years,
    })
}

/// A configured projection run for one action, produced by `ProjectionBuilder`.
pub struct ProjectionEngine {
    pub(super) action: Action,
    pub(super) settings: RoiSettings,
    pub(super) reference_year: i32,
    pub(super) log_path: Option<String>,
}

impl ProjectionEngine {
    /// Computes the projection and, when a log path is configured, writes every row.
    ///
    /// `Ok(None)` means the action lacks KPI data, and no log file is created in that
    /// case. Errors only come from the logger.
    pub fn run(&mut self) -> Result<Option<RoiResult>, RoiError> {
        let result = compute_roi_at(&self.action, &self.settings, self.reference_year);

        match (&result, &self.log_path) {
            (Some(roi), Some(path)) => {
                let mut logger =
                    CashflowLogger::new(path).map_err(|e| RoiError::FileIO(path.clone(), e))?;
                for row in &roi.years {
                    logger.log_row(&self.action.action_id, row)?;
                }
            }
            (None, _) => {
                tracing::info!(
                    action_id = %self.action.action_id,
                    "skipping projection: KPI baseline or impact value missing"
                );
            }
            _ => {}
        }

        Ok(result)
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }
}
