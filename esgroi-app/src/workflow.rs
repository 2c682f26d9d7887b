use crate::config::Catalog;
use crate::report;
use anyhow::{Context, Result};
use esgroi_core::{
    portfolio::{evaluate_portfolio, Portfolio},
    projection::ProjectionBuilder,
    variable, RoiResult,
};
use esgroi_schemas::action::ActionStatus;
use serde::Serialize;
use std::{fs, path::Path};

#[derive(Serialize)]
struct ActionExport<'a> {
    action_id: &'a str,
    title: &'a str,
    reference_year: i32,
    currency: &'a str,
    result: &'a RoiResult,
}

#[derive(Serialize)]
struct PortfolioExport<'a> {
    reference_year: i32,
    currency: &'a str,
    portfolio: &'a Portfolio,
}

/// Projects a single action, prints its report and writes the cashflow table and
/// the full result to `output_dir`.
///
/// Returns `Ok(None)` when the action still lacks KPI data.
pub fn run_action_report(
    catalog: &Catalog,
    action_id: &str,
    output_dir: &str,
    reference_year: i32,
) -> Result<Option<RoiResult>> {
    println!("\n--- [Workflow] Projecting action {} ---", action_id);
    let action = catalog.action(action_id)?;

    let log_path = Path::new(output_dir).join(format!("cashflow_{}.csv", action.action_id));
    let log_path = log_path
        .to_str()
        .context("Output path is not valid UTF-8")?;

    let mut engine = ProjectionBuilder::new()
        .with_action(action.clone())
        .with_settings(catalog.settings.clone())
        .with_reference_year(reference_year)
        .with_cashflow_logging_to_file(log_path)
        .build()?;

    let Some(roi) = engine.run()? else {
        println!(
            "Action '{}' has no KPI baseline or impact value yet; nothing to project.",
            action.title
        );
        return Ok(None);
    };

    let export = ActionExport {
        action_id: &action.action_id,
        title: &action.title,
        reference_year,
        currency: &catalog.settings.currency,
        result: &roi,
    };
    let json_path = Path::new(output_dir).join(format!("roi_{}.json", action.action_id));
    fs::write(&json_path, serde_json::to_string_pretty(&export)?)
        .with_context(|| format!("Failed to write {:?}", json_path))?;

    report::print_action_report(action, &roi, &catalog.settings);
    Ok(Some(roi))
}

/// Appraises every action matching `statuses` and writes the dashboard reports.
pub fn run_portfolio_report(
    catalog: &Catalog,
    statuses: &[ActionStatus],
    output_dir: &str,
    reference_year: i32,
) -> Result<Portfolio> {
    println!("\n--- [Workflow] Evaluating portfolio ---");
    let portfolio = evaluate_portfolio(
        catalog.actions.values(),
        &catalog.settings,
        statuses,
        reference_year,
    );

    let markdown = report::portfolio_markdown(&portfolio, &catalog.settings);
    fs::write(Path::new(output_dir).join("portfolio_report.md"), markdown)?;

    let export = PortfolioExport {
        reference_year,
        currency: &catalog.settings.currency,
        portfolio: &portfolio,
    };
    fs::write(
        Path::new(output_dir).join("portfolio.json"),
        serde_json::to_string_pretty(&export)?,
    )?;

    report::print_portfolio_report(&portfolio, &catalog.settings);
    Ok(portfolio)
}

pub fn run_variable_preview(catalog: &Catalog, variable_id: &str) -> Result<()> {
    let forecast = catalog.variable(variable_id)?;
    let points = variable::series(forecast);
    report::print_variable_series(forecast, &points);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_action(dir: &Path) -> Catalog {
        fs::create_dir_all(dir.join("actions")).unwrap();
        fs::write(
            dir.join("actions/lighting.yaml"),
            "\
schema_version: \"1.0\"
actions:
  - action_id: ACT-LED
    title: LED retrofit
    status: OFFEN
    kpi_unit: MWh
    kpi_baseline_per_year: 400.0
    impact_type: reduction_percent
    impact_value: 25.0
    monetization_fixed_rate_per_unit: 180.0
    capex:
      equipment: 30000.0
      installation: 5000.0
    opex:
      maintenance: 500.0
  - action_id: ACT-DRAFT
    title: Draft idea
",
        )
        .unwrap();
        Catalog::load(dir.to_str().unwrap()).unwrap()
    }

    #[test]
    fn action_report_writes_csv_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog_with_action(dir.path());
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();

        let roi = run_action_report(&catalog, "ACT-LED", out.to_str().unwrap(), 2026)
            .unwrap()
            .unwrap();
        assert_eq!(roi.capex_total, 35_000.0);
        assert!(out.join("cashflow_ACT-LED.csv").exists());

        let exported = fs::read_to_string(out.join("roi_ACT-LED.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(json["reference_year"], 2026);
        assert_eq!(json["result"]["years"].as_array().unwrap().len(), 11);
    }

    #[test]
    fn draft_action_yields_no_result() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog_with_action(dir.path());
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();

        assert!(run_action_report(&catalog, "ACT-DRAFT", out.to_str().unwrap(), 2026)
            .unwrap()
            .is_none());
        assert!(!out.join("cashflow_ACT-DRAFT.csv").exists());
        assert!(!out.join("roi_ACT-DRAFT.json").exists());
        assert!(run_action_report(&catalog, "ACT-NONE", out.to_str().unwrap(), 2026).is_err());
    }

    #[test]
    fn portfolio_report_skips_incomplete_actions() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = catalog_with_action(dir.path());
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();

        let portfolio = run_portfolio_report(&catalog, &[], out.to_str().unwrap(), 2026).unwrap();
        assert_eq!(portfolio.summary.evaluated, 1);
        assert_eq!(portfolio.summary.skipped, 1);
        assert!(out.join("portfolio_report.md").exists());
        assert!(out.join("portfolio.json").exists());

        let done_only = run_portfolio_report(
            &catalog,
            &[ActionStatus::Done],
            out.to_str().unwrap(),
            2026,
        )
        .unwrap();
        assert_eq!(done_only.summary.evaluated, 0);
    }
}
