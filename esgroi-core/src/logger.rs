use crate::{error::RoiError, projection::result::RoiYearRow};
use csv::Writer;
use serde::Serialize;
use std::fs;
use std::io;

#[derive(Debug, Serialize)]
struct CashflowEntry<'a> {
    action_id: &'a str,
    year: i32,
    t: u32,
    go_live_factor: f64,
    kpi_reduction: f64,
    rate_per_unit: f64,
    total_benefit: f64,
    opex: f64,
    other_costs: f64,
    depreciation: f64,
    ebit: f64,
    taxes: f64,
    net_cashflow: f64,
    discounted_cf: f64,
    cumulative_cf: f64,
}

/// Writes projected cashflow rows to a CSV file, one record per year.
pub struct CashflowLogger {
    path: String,
    writer: Writer<fs::File>,
}

impl CashflowLogger {
    pub fn new(path: &str) -> Result<Self, io::Error> {
        let writer = Writer::from_path(path)?;
        Ok(Self {
            path: path.to_string(),
            writer,
        })
    }

    pub fn log_row(&mut self, action_id: &str, row: &RoiYearRow) -> Result<(), RoiError> {
        let entry = CashflowEntry {
            action_id,
            year: row.year,
            t: row.t,
            go_live_factor: row.go_live_factor,
            kpi_reduction: row.kpi_reduction,
            rate_per_unit: row.rate_per_unit,
            total_benefit: row.total_benefit,
            opex: row.opex,
            other_costs: row.other_costs,
            depreciation: row.depreciation,
            ebit: row.ebit,
            taxes: row.taxes,
            net_cashflow: row.net_cashflow,
            discounted_cf: row.discounted_cf,
            cumulative_cf: row.cumulative_cf,
        };

        self.writer
            .serialize(entry)
            .map_err(|e| RoiError::CsvError(self.path.clone(), e))?;
        self.writer
            .flush()
            .map_err(|e| RoiError::FileIO(self.path.clone(), e))?;
        Ok(())
    }
}
