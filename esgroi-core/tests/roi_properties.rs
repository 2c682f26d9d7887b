use esgroi_core::{
    projection::{compute_roi_at, metrics},
    variable::resolve,
    RoiResult,
};
use esgroi_schemas::{
    action::{Action, ImpactType},
    settings::RoiSettings,
    variable::{ForecastMethod, Variable},
};
use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use std::collections::BTreeMap;

const YEAR: i32 = 2026;

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}, tolerance {tol}"
    );
}

fn settings(discount_rate: f64, tax_rate: f64, horizon: u32) -> RoiSettings {
    RoiSettings {
        currency: "EUR".to_string(),
        discount_rate,
        tax_rate,
        cashflow_horizon_years: horizon,
    }
}

/// An action whose yearly gross benefit is `benefit` once fully active.
fn action_with_benefit(capex: f64, benefit: f64) -> Action {
    let mut action = Action {
        action_id: "ACT-TEST".to_string(),
        title: "Test action".to_string(),
        kpi_baseline_per_year: Some(100.0),
        impact_type: Some(ImpactType::ReductionAbsolute),
        impact_value: Some(100.0),
        monetization_fixed_rate_per_unit: Some(benefit / 100.0),
        ..Action::default()
    };
    action.capex.equipment = Some(capex);
    action
}

fn variable(method: ForecastMethod, start_value: f64, growth_rate: f64) -> Variable {
    Variable {
        variable_id: "VAR-1".to_string(),
        name: "Rate".to_string(),
        description: None,
        unit: "EUR".to_string(),
        method,
        start_year: 2025,
        horizon_years: 10,
        start_value,
        growth_rate,
        overrides: BTreeMap::new(),
    }
}

fn assert_result_is_finite(roi: &RoiResult) {
    for value in [
        roi.capex_total,
        roi.effective_grant,
        roi.net_capex,
        roi.opex_per_year,
        roi.kpi_reduction_per_year,
        roi.npv,
        roi.quick_roi,
    ] {
        assert!(value.is_finite());
    }
    assert!(roi.irr.map_or(true, f64::is_finite));
    assert!(roi.payback_years.map_or(true, f64::is_finite));
    assert!(roi.marginal_abatement_cost.map_or(true, f64::is_finite));
    for row in &roi.years {
        assert!(row.net_cashflow.is_finite());
        assert!(row.discounted_cf.is_finite());
        assert!(row.cumulative_cf.is_finite());
    }
}

#[test]
fn scenario_zero_capex_single_year() {
    let action = action_with_benefit(0.0, 100.0);
    let roi = compute_roi_at(&action, &settings(0.0, 0.0, 1), YEAR).unwrap();

    assert_eq!(roi.years.len(), 2);
    assert_close(roi.npv, 100.0, 1e-9);
    assert_eq!(roi.payback_years, Some(0.0));
    assert_eq!(roi.quick_roi, 0.0);
    assert_eq!(roi.irr, None);
}

#[test]
fn zero_capex_with_losses_has_no_payback() {
    let mut action = action_with_benefit(0.0, 0.0);
    action.opex.maintenance = Some(50.0);
    let roi = compute_roi_at(&action, &settings(0.0, 0.0, 5), YEAR).unwrap();

    assert_close(roi.years[5].cumulative_cf, -250.0, 1e-9);
    assert_eq!(roi.payback_years, None);
}

#[test]
fn non_positive_discount_base_keeps_results_finite() {
    let action = action_with_benefit(1000.0, 600.0);
    for rate in [-1.0, -2.5] {
        let roi = compute_roi_at(&action, &settings(rate, 0.3, 2), YEAR).unwrap();
        assert_result_is_finite(&roi);
    }
}

#[test]
fn scenario_constant_cashflow_payback_interpolation() {
    let action = action_with_benefit(1000.0, 500.0);
    let roi = compute_roi_at(&action, &settings(0.0, 0.0, 3), YEAR).unwrap();

    assert_close(roi.npv, 500.0, 1e-9);
    assert_close(roi.payback_years.unwrap(), 2.0, 1e-12);
    assert_close(roi.quick_roi, 1.5, 1e-12);
    assert_close(roi.marginal_abatement_cost.unwrap(), -500.0 / 300.0, 1e-12);
}

#[test]
fn scenario_compound_growth_variable() {
    let v = variable(ForecastMethod::CompoundGrowth, 10.0, 0.1);
    assert_close(resolve(&v, 2027), 12.1, 1e-9);
    assert_eq!(resolve(&v, 2024), 10.0);
}

#[test]
fn scenario_irr_residual() {
    let cashflows = [-1000.0, 600.0, 600.0];
    let r = metrics::irr(&cashflows).expect("converges");
    let residual = -1000.0 + 600.0 / (1.0 + r) + 600.0 / (1.0 + r).powi(2);
    assert!(residual.abs() < 1e-6, "residual {residual}");

    let action = action_with_benefit(1000.0, 600.0);
    let roi = compute_roi_at(&action, &settings(0.05, 0.0, 2), YEAR).unwrap();
    assert_close(roi.irr.unwrap(), r, 1e-9);
}

#[test]
fn no_result_without_kpi_data_regardless_of_other_fields() {
    let mut action = action_with_benefit(5000.0, 900.0);
    action.kpi_baseline_per_year = None;
    action.other_benefits_per_year = Some(10_000.0);
    assert!(compute_roi_at(&action, &settings(0.05, 0.3, 10), YEAR).is_none());

    let mut action = action_with_benefit(5000.0, 900.0);
    action.impact_value = None;
    assert!(compute_roi_at(&action, &settings(0.05, 0.3, 10), YEAR).is_none());
}

#[test]
fn manual_override_resolution_is_idempotent() {
    let mut v = variable(ForecastMethod::ManualOverride, 7.0, 0.0);
    v.overrides.insert(2028, 9.5);
    assert_eq!(resolve(&v, 2028), 9.5);
    assert_eq!(resolve(&v, 2028), resolve(&v, 2028));
    assert_eq!(resolve(&v, 2029), 7.0);
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_fixed_variable_is_constant(start in -1000i32..1000, year in 1900i32..2200) {
        let v = variable(ForecastMethod::Fixed, start as f64 / 10.0, 0.25);
        prop_assert_eq!(resolve(&v, year), start as f64 / 10.0);
    }

    #[test]
    fn prop_compound_growth_matches_closed_form(n in 0i32..40, growth_bp in -500i32..1500) {
        let g = growth_bp as f64 / 10_000.0;
        let v = variable(ForecastMethod::CompoundGrowth, 42.0, g);
        let expected = 42.0 * (1.0 + g).powi(n);
        prop_assert!((resolve(&v, 2025 + n) - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        prop_assert_eq!(resolve(&v, 2024), 42.0);
    }

    #[test]
    fn prop_projection_invariants(
        capex in 0u32..50_000,
        grant_percent in 0u32..100,
        opex in 0u32..5_000,
        baseline in 1u32..10_000,
        impact_percent in 1u32..100,
        rate in 0u32..200,
        other_benefits in 0u32..2_000,
        discount_bp in 0u32..2_000,
        tax_bp in 0u32..5_000,
        horizon in 1u32..25,
        depreciation in 0i32..30,
        due_month in 0u32..13,
    ) {
        let mut action = Action {
            action_id: "ACT-PROP".to_string(),
            title: "prop".to_string(),
            kpi_baseline_per_year: Some(baseline as f64),
            impact_type: Some(ImpactType::ReductionPercent),
            impact_value: Some(impact_percent as f64),
            monetization_fixed_rate_per_unit: Some(rate as f64),
            other_benefits_per_year: Some(other_benefits as f64),
            depreciation_years: Some(depreciation),
            ..Action::default()
        };
        action.capex.equipment = Some(capex as f64);
        action.funding.grant_percent = Some(grant_percent as f64);
        action.opex.maintenance = Some(opex as f64);
        // month 0 means "no due date"
        action.due_date = if due_month == 0 {
            None
        } else {
            chrono::NaiveDate::from_ymd_opt(YEAR + 1, due_month, 1)
        };

        let s = settings(discount_bp as f64 / 10_000.0, tax_bp as f64 / 10_000.0, horizon);
        let roi = compute_roi_at(&action, &s, YEAR).unwrap();
        assert_result_is_finite(&roi);

        prop_assert_eq!(roi.years.len(), horizon as usize + 1);
        let independent_npv: f64 = roi.years.iter().map(|r| r.discounted_cf).sum();
        prop_assert!((roi.npv - independent_npv).abs() <= 1e-9 * independent_npv.abs().max(1.0));

        let mut running = 0.0;
        for row in &roi.years {
            running += row.net_cashflow;
            prop_assert!((row.cumulative_cf - running).abs() <= 1e-6 * running.abs().max(1.0));
        }

        let recovery = roi
            .years
            .windows(2)
            .position(|pair| pair[0].cumulative_cf < 0.0 && pair[1].cumulative_cf >= 0.0);
        let never_negative = roi.years.iter().all(|row| row.cumulative_cf >= 0.0);
        match (roi.payback_years, recovery) {
            (Some(payback), Some(i)) => {
                prop_assert!(roi.years[i].cumulative_cf < 0.0);
                prop_assert!(payback >= i as f64 && payback <= (i + 1) as f64 + 1e-9);
            }
            (Some(payback), None) => {
                prop_assert!(never_negative);
                prop_assert_eq!(payback, 0.0);
            }
            (None, None) => prop_assert!(!never_negative),
            (None, Some(i)) => prop_assert!(false, "missed recovery in year {}", i + 1),
        }

        if let Some(r) = roi.irr.filter(|r| *r > -0.5) {
            let cashflows: Vec<f64> = roi.years.iter().map(|y| y.net_cashflow).collect();
            let scale: f64 = cashflows.iter().map(|c| c.abs()).sum::<f64>().max(1.0);
            let residual: f64 = cashflows
                .iter()
                .enumerate()
                .map(|(t, cf)| cf / (1.0 + r).powi(t as i32))
                .sum();
            prop_assert!(residual.abs() <= 1e-6 * scale);
        }

        let again = compute_roi_at(&action, &s, YEAR).unwrap();
        prop_assert_eq!(roi, again);
    }
}
