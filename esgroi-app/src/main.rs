use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use esgroi_schemas::action::ActionStatus;
use std::fs;

mod config;
mod report;
mod workflow;

#[derive(Parser)]
#[command(name = "esgroi", version, about = "ROI projections for sustainability actions")]
struct Cli {
    /// Directory holding settings.yaml, variables/ and actions/
    #[arg(long, global = true, default_value = "./data/catalog")]
    catalog: String,

    /// Where reports are written (defaults to a timestamped folder under ./data/runs)
    #[arg(long, global = true)]
    output: Option<String>,

    /// Investment year used as t=0 (defaults to the current year)
    #[arg(long, global = true)]
    reference_year: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project a single action and write its cashflow table
    Action { action_id: String },
    /// Appraise every action and summarise the portfolio
    Portfolio {
        /// Only include actions with these statuses (repeatable)
        #[arg(long = "status", value_enum)]
        statuses: Vec<CliStatus>,
    },
    /// Print the yearly values of a forecast variable
    Variable { variable_id: String },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliStatus {
    Open,
    InProgress,
    Done,
}

impl From<CliStatus> for ActionStatus {
    fn from(value: CliStatus) -> Self {
        match value {
            CliStatus::Open => ActionStatus::Open,
            CliStatus::InProgress => ActionStatus::InProgress,
            CliStatus::Done => ActionStatus::Done,
        }
    }
}

fn prepare_output_dir(output: Option<String>) -> Result<String> {
    let output_dir = output.unwrap_or_else(|| {
        format!("./data/runs/roi_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
    });
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;
    Ok(output_dir)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("esgroi=info,warn")),
        )
        .init();

    let cli = Cli::parse();
    println!("--- ESG ROI ---");

    let catalog = config::Catalog::load(&cli.catalog)?;
    let reference_year = cli
        .reference_year
        .unwrap_or_else(|| chrono::Local::now().year());

    match cli.command {
        Command::Action { action_id } => {
            let output_dir = prepare_output_dir(cli.output)?;
            if workflow::run_action_report(&catalog, &action_id, &output_dir, reference_year)?
                .is_some()
            {
                println!("\nResults are in '{}'", output_dir);
            }
        }
        Command::Portfolio { statuses } => {
            let output_dir = prepare_output_dir(cli.output)?;
            let statuses: Vec<ActionStatus> = statuses.into_iter().map(Into::into).collect();
            workflow::run_portfolio_report(&catalog, &statuses, &output_dir, reference_year)?;
            println!("\nResults are in '{}'", output_dir);
        }
        Command::Variable { variable_id } => {
            workflow::run_variable_preview(&catalog, &variable_id)?;
        }
    }

    Ok(())
}
