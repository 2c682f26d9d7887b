use crate::variable::Variable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    #[serde(alias = "OFFEN")]
    Open,
    #[serde(alias = "IN_PROGRESS", alias = "in-progress")]
    InProgress,
    #[serde(alias = "DONE")]
    Done,
}

/// How `impact_value` relates to the KPI baseline.
///
/// Anything other than a percentage reduction is read as an absolute change,
/// which is also what a missing impact type means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "snake_case")]
pub enum ImpactType {
    ReductionPercent,
    #[default]
    ReductionAbsolute,
}

impl From<String> for ImpactType {
    fn from(value: String) -> Self {
        match value.trim() {
            "reduction_percent" | "reductionPercent" => ImpactType::ReductionPercent,
            _ => ImpactType::ReductionAbsolute,
        }
    }
}

/// One-off capital expenditure, split by cost type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capex {
    pub equipment: Option<f64>,
    pub installation: Option<f64>,
    pub software: Option<f64>,
    pub consulting: Option<f64>,
    pub other: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Funding {
    pub grant_amount: Option<f64>,
    pub grant_percent: Option<f64>,
}

/// Recurring operating expenditure per year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Opex {
    pub maintenance: Option<f64>,
    pub licenses: Option<f64>,
    pub personnel: Option<f64>,
    pub other: Option<f64>,
}

/// A sustainability measure under appraisal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ActionStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    // KPI
    #[serde(default)]
    pub kpi_name: Option<String>,
    #[serde(default)]
    pub kpi_unit: Option<String>,
    #[serde(default)]
    pub kpi_baseline_per_year: Option<f64>,
    #[serde(default)]
    pub impact_type: Option<ImpactType>,
    #[serde(default)]
    pub impact_value: Option<f64>,

    // Monetization
    #[serde(default)]
    pub monetization_fixed_rate_per_unit: Option<f64>,
    #[serde(default)]
    pub monetization_variable_id: Option<String>,
    /// Resolved from `monetization_variable_id` when the catalog is loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monetization_variable: Option<Variable>,

    #[serde(default)]
    pub capex: Capex,
    #[serde(default)]
    pub funding: Funding,
    #[serde(default)]
    pub opex: Opex,

    #[serde(default)]
    pub other_benefits_per_year: Option<f64>,
    #[serde(default)]
    pub other_costs_per_year: Option<f64>,
    #[serde(default)]
    pub depreciation_years: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}
