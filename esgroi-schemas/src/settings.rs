use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_discount_rate() -> f64 {
    0.08
}

fn default_tax_rate() -> f64 {
    0.30
}

fn default_horizon() -> u32 {
    10
}

/// Global financial assumptions shared by every projection.
///
/// Both rates are fractions (0.08 = 8 %), not percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiSettings {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default = "default_horizon")]
    pub cashflow_horizon_years: u32,
}

impl Default for RoiSettings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            discount_rate: default_discount_rate(),
            tax_rate: default_tax_rate(),
            cashflow_horizon_years: default_horizon(),
        }
    }
}
