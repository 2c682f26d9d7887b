use crate::projection::{compute_roi_at, RoiResult};
use esgroi_schemas::{
    action::{Action, ActionStatus},
    settings::RoiSettings,
};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Serialize)]
pub struct ActionAppraisal {
    pub action_id: String,
    pub title: String,
    pub status: ActionStatus,
    pub kpi_unit: Option<String>,
    pub roi: RoiResult,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PortfolioSummary {
    pub total_capex: f64,
    pub total_net_capex: f64,
    pub total_grant: f64,
    pub total_npv: f64,
    /// Mean over the actions that pay back within the horizon.
    pub average_payback_years: Option<f64>,
    pub evaluated: usize,
    /// Actions in the filter that still lack KPI data.
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct NpvEntry {
    pub action_id: String,
    pub title: String,
    pub npv: f64,
}

/// One bar of a marginal abatement cost curve.
#[derive(Debug, Clone, Serialize)]
pub struct MaccEntry {
    pub action_id: String,
    pub title: String,
    pub marginal_abatement_cost: f64,
    pub kpi_reduction_per_year: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Portfolio {
    pub appraisals: Vec<ActionAppraisal>,
    pub summary: PortfolioSummary,
}

/// Appraises every action whose status is in `status_filter` (all when empty).
pub fn evaluate_portfolio<'a, I>(
    actions: I,
    settings: &RoiSettings,
    status_filter: &[ActionStatus],
    current_year: i32,
) -> Portfolio
where
    I: IntoIterator<Item = &'a Action>,
{
    let mut appraisals = Vec::new();
    let mut skipped = 0;

    for action in actions {
        if !status_filter.is_empty() && !status_filter.contains(&action.status) {
            continue;
        }
        match compute_roi_at(action, settings, current_year) {
            Some(roi) => appraisals.push(ActionAppraisal {
                action_id: action.action_id.clone(),
                title: action.title.clone(),
                status: action.status,
                kpi_unit: action.kpi_unit.clone(),
                roi,
            }),
            None => skipped += 1,
        }
    }

    let summary = summarize(&appraisals, skipped);
    tracing::debug!(
        evaluated = summary.evaluated,
        skipped = summary.skipped,
        total_npv = summary.total_npv,
        "evaluated portfolio"
    );

    Portfolio {
        appraisals,
        summary,
    }
}

fn summarize(appraisals: &[ActionAppraisal], skipped: usize) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        evaluated: appraisals.len(),
        skipped,
        ..PortfolioSummary::default()
    };

    let mut payback_sum = 0.0;
    let mut payback_count = 0usize;
    for appraisal in appraisals {
        summary.total_capex += appraisal.roi.capex_total;
        summary.total_net_capex += appraisal.roi.net_capex;
        summary.total_grant += appraisal.roi.effective_grant;
        summary.total_npv += appraisal.roi.npv;
        if let Some(payback) = appraisal.roi.payback_years {
            payback_sum += payback;
            payback_count += 1;
        }
    }
    if payback_count > 0 {
        summary.average_payback_years = Some(payback_sum / payback_count as f64);
    }
    summary
}

impl Portfolio {
    /// Actions ordered from highest to lowest NPV.
    pub fn npv_ranking(&self) -> Vec<NpvEntry> {
        let mut ranking: Vec<NpvEntry> = self
            .appraisals
            .iter()
            .map(|a| NpvEntry {
                action_id: a.action_id.clone(),
                title: a.title.clone(),
                npv: a.roi.npv,
            })
            .collect();
        ranking.sort_by(|a, b| b.npv.partial_cmp(&a.npv).unwrap_or(Ordering::Equal));
        ranking
    }

    /// Actions with a defined abatement cost, cheapest first.
    pub fn macc_curve(&self) -> Vec<MaccEntry> {
        let mut curve: Vec<MaccEntry> = self
            .appraisals
            .iter()
            .filter_map(|a| {
                a.roi.marginal_abatement_cost.map(|macc| MaccEntry {
                    action_id: a.action_id.clone(),
                    title: a.title.clone(),
                    marginal_abatement_cost: macc,
                    kpi_reduction_per_year: a.roi.kpi_reduction_per_year,
                })
            })
            .collect();
        curve.sort_by(|a, b| {
            a.marginal_abatement_cost
                .partial_cmp(&b.marginal_abatement_cost)
                .unwrap_or(Ordering::Equal)
        });
        curve
    }
}
