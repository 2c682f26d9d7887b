use serde::{Deserialize, Serialize};

/// One projected year. `t = 0` is the investment year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiYearRow {
    pub year: i32,
    pub t: u32,
    pub go_live_factor: f64,
    pub kpi_reduction: f64,
    pub rate_per_unit: f64,
    pub gross_benefit: f64,
    pub other_benefits: f64,
    pub total_benefit: f64,
    pub opex: f64,
    pub other_costs: f64,
    pub depreciation: f64,
    pub ebit: f64,
    pub taxes: f64,
    pub net_cashflow: f64,
    pub discount_factor: f64,
    pub discounted_cf: f64,
    pub cumulative_cf: f64,
}

/// Appraisal of a single action. Derived on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub capex_total: f64,
    pub effective_grant: f64,
    pub net_capex: f64,
    pub opex_per_year: f64,
    pub kpi_reduction_per_year: f64,

    pub npv: f64,
    pub irr: Option<f64>,
    pub payback_years: Option<f64>,
    pub quick_roi: f64,
    /// Net cost per unit of KPI reduction; negative values are profitable abatement.
    pub marginal_abatement_cost: Option<f64>,

    pub years: Vec<RoiYearRow>,
}
