//! Resolution of forecast variables into concrete yearly values.

use esgroi_schemas::variable::{ForecastMethod, Variable};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariablePoint {
    pub year: i32,
    pub value: f64,
}

/// Returns the value of `variable` in `year`.
///
/// Total over every input: years before `start_year` always yield `start_value`,
/// and manual overrides fall back to `start_value` for years they do not cover.
pub fn resolve(variable: &Variable, year: i32) -> f64 {
    let offset = i64::from(year) - i64::from(variable.start_year);
    if offset < 0 {
        return variable.start_value;
    }

    match variable.method {
        ForecastMethod::Fixed => variable.start_value,
        ForecastMethod::CompoundGrowth => {
            let exponent = i32::try_from(offset).unwrap_or(i32::MAX);
            variable.start_value * (1.0 + variable.growth_rate).powi(exponent)
        }
        ForecastMethod::ManualOverride => variable
            .overrides
            .get(&year)
            .copied()
            .unwrap_or(variable.start_value),
    }
}

/// Preview series from `start_year` through `start_year + horizon_years`.
pub fn series(variable: &Variable) -> Vec<VariablePoint> {
    (0..=variable.horizon_years as i64)
        .filter_map(|i| i32::try_from(i64::from(variable.start_year) + i).ok())
        .map(|year| VariablePoint {
            year,
            value: resolve(variable, year),
        })
        .collect()
}
