//! Text renderings of projection results for the terminal and for markdown files.

use esgroi_core::{
    format::{format_currency, format_number, format_percent},
    portfolio::Portfolio,
    variable::VariablePoint,
    RoiResult,
};
use esgroi_schemas::{action::Action, settings::RoiSettings, variable::Variable};

fn or_na<T>(value: Option<T>, render: impl Fn(T) -> String) -> String {
    value.map(render).unwrap_or_else(|| "n/a".to_string())
}

pub fn print_action_report(action: &Action, roi: &RoiResult, settings: &RoiSettings) {
    let currency = settings.currency.as_str();
    let unit = action.kpi_unit.as_deref().unwrap_or("unit");

    println!("\n\n--- [ROI Report] {} ---", action.title);
    println!("========================================");
    println!("Assumptions:");
    println!("  - Discount Rate (WACC):      {}", format_percent(settings.discount_rate, 1));
    println!("  - Tax Rate:                  {}", format_percent(settings.tax_rate, 1));
    println!("  - Horizon:                   {} years", settings.cashflow_horizon_years);
    println!("----------------------------------------");

    println!("\nInvestment:");
    println!("  - CAPEX:                     {}", format_currency(roi.capex_total, 0, currency));
    println!(
        "  - Grant:                    -{}",
        format_currency(roi.effective_grant, 0, currency)
    );
    println!("  - Net CAPEX:                 {}", format_currency(roi.net_capex, 0, currency));
    println!("  - OPEX per Year:             {}", format_currency(roi.opex_per_year, 0, currency));
    println!(
        "  - KPI Reduction per Year:    {} {}",
        format_number(roi.kpi_reduction_per_year, 1),
        unit
    );

    println!("\nKey Figures:");
    println!("  - NPV:                       {}", format_currency(roi.npv, 0, currency));
    println!("  - IRR:                       {}", or_na(roi.irr, |irr| format_percent(irr, 1)));
    println!(
        "  - Payback:                   {}",
        or_na(roi.payback_years, |years| format!("{:.1} years", years))
    );
    println!("  - Quick ROI:                 {}x", format_number(roi.quick_roi, 2));
    println!(
        "  - Abatement Cost (MACC):     {}",
        or_na(roi.marginal_abatement_cost, |macc| {
            format!("{} {}/{}", format_number(macc, 2), currency, unit)
        })
    );

    println!("\nCashflow:");
    println!(
        "  {:>6} {:>5} {:>12} {:>12} {:>12} {:>12} {:>12} {:>14}",
        "Year", "GLF", "Benefit", "OPEX", "Taxes", "Net CF", "Disc. CF", "Cumulative"
    );
    for row in &roi.years {
        println!(
            "  {:>6} {:>5.2} {:>12} {:>12} {:>12} {:>12} {:>12} {:>14}",
            row.year,
            row.go_live_factor,
            format_number(row.total_benefit, 0),
            format_number(row.opex, 0),
            format_number(row.taxes, 0),
            format_number(row.net_cashflow, 0),
            format_number(row.discounted_cf, 0),
            format_number(row.cumulative_cf, 0),
        );
    }
    println!("========================================");
}

pub fn print_portfolio_report(portfolio: &Portfolio, settings: &RoiSettings) {
    let currency = settings.currency.as_str();
    let summary = &portfolio.summary;

    println!("\n\n--- [Portfolio Summary] ---");
    println!("========================================");
    println!("Actions Evaluated: {} ({} without KPI data)", summary.evaluated, summary.skipped);
    println!(
        "  - Total CAPEX:               {}",
        format_currency(summary.total_capex, 0, currency)
    );
    println!(
        "  - Total Grants:              {}",
        format_currency(summary.total_grant, 0, currency)
    );
    println!(
        "  - Total Net CAPEX:           {}",
        format_currency(summary.total_net_capex, 0, currency)
    );
    println!("  - Total NPV:                 {}", format_currency(summary.total_npv, 0, currency));
    println!(
        "  - Average Payback:           {}",
        or_na(summary.average_payback_years, |years| format!("{:.1} years", years))
    );

    println!("\nNPV Ranking:");
    for (i, entry) in portfolio.npv_ranking().iter().enumerate() {
        println!(
            "  {:>2}. {:<40} {:>16}",
            i + 1,
            entry.title,
            format_currency(entry.npv, 0, currency)
        );
    }

    println!("\nAbatement Cost Curve (cheapest first):");
    for entry in portfolio.macc_curve() {
        println!(
            "  - {:<40} {:>12} per unit, {:>10} units/year",
            entry.title,
            format_currency(entry.marginal_abatement_cost, 2, currency),
            format_number(entry.kpi_reduction_per_year, 1)
        );
    }
    println!("========================================");
}

/// Markdown version of the portfolio dashboard.
pub fn portfolio_markdown(portfolio: &Portfolio, settings: &RoiSettings) -> String {
    let currency = settings.currency.as_str();
    let summary = &portfolio.summary;

    let mut md = String::from("# Portfolio ROI Report\n\n");
    md.push_str(&format!(
        "Discount rate {}, tax rate {}, horizon {} years.\n\n",
        format_percent(settings.discount_rate, 1),
        format_percent(settings.tax_rate, 1),
        settings.cashflow_horizon_years
    ));
    md.push_str("| Metric | Value |\n|--------|-------|\n");
    md.push_str(&format!(
        "| Total CAPEX | {} |\n",
        format_currency(summary.total_capex, 0, currency)
    ));
    md.push_str(&format!(
        "| Total grants | {} |\n",
        format_currency(summary.total_grant, 0, currency)
    ));
    md.push_str(&format!(
        "| Total net CAPEX | {} |\n",
        format_currency(summary.total_net_capex, 0, currency)
    ));
    md.push_str(&format!("| Total NPV | {} |\n", format_currency(summary.total_npv, 0, currency)));
    md.push_str(&format!(
        "| Average payback | {} |\n\n",
        or_na(summary.average_payback_years, |years| format!("{:.1} years", years))
    ));

    md.push_str("| Action | Status | NPV | IRR | Payback | Quick ROI | MACC |\n");
    md.push_str("|--------|--------|-----|-----|---------|-----------|------|\n");
    for appraisal in &portfolio.appraisals {
        let roi = &appraisal.roi;
        let unit = appraisal.kpi_unit.as_deref().unwrap_or("unit");
        md.push_str(&format!(
            "| {} | {:?} | {} | {} | {} | {}x | {} |\n",
            appraisal.title,
            appraisal.status,
            format_currency(roi.npv, 0, currency),
            or_na(roi.irr, |irr| format_percent(irr, 1)),
            or_na(roi.payback_years, |years| format!("{:.1}", years)),
            format_number(roi.quick_roi, 2),
            or_na(roi.marginal_abatement_cost, |macc| {
                format!("{} {}/{}", format_number(macc, 2), currency, unit)
            }),
        ));
    }
    md
}

pub fn print_variable_series(variable: &Variable, points: &[VariablePoint]) {
    println!("\n--- [Variable] {} ({:?}) ---", variable.name, variable.method);
    for point in points {
        println!("  {:>6}  {:>14} {}", point.year, format_number(point.value, 2), variable.unit);
    }
}
