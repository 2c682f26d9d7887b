use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// How a variable's value evolves from its start year onwards.
///
/// Deserialised from a plain string. Unknown spellings fall back to `Fixed` so a
/// stray value in a catalog file never stops a projection from running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "snake_case")]
pub enum ForecastMethod {
    #[default]
    Fixed,
    CompoundGrowth,
    ManualOverride,
}

impl From<String> for ForecastMethod {
    fn from(value: String) -> Self {
        match value.trim() {
            "compound_growth" | "compoundGrowth" | "cagr" => ForecastMethod::CompoundGrowth,
            "manual_override" | "manualOverride" | "manual" => ForecastMethod::ManualOverride,
            _ => ForecastMethod::Fixed,
        }
    }
}

fn default_unit() -> String {
    "EUR".to_string()
}

fn default_horizon_years() -> u32 {
    10
}

/// A named scalar time series, e.g. a carbon price forecast in EUR per tonne.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub variable_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub method: ForecastMethod,
    pub start_year: i32,
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
    #[serde(default)]
    pub start_value: f64,
    #[serde(default)]
    pub growth_rate: f64,
    #[serde(default, deserialize_with = "deserialize_overrides")]
    pub overrides: BTreeMap<i32, f64>,
}

#[derive(Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
enum YearKey {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOverrides {
    Map(HashMap<YearKey, f64>),
    Encoded(String),
}

/// Accepts the override table either as a mapping or as a JSON-encoded string,
/// the form the table takes when it comes out of a database column.
fn deserialize_overrides<'de, D>(deserializer: D) -> Result<BTreeMap<i32, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = match Option::<RawOverrides>::deserialize(deserializer)? {
        None => return Ok(BTreeMap::new()),
        Some(RawOverrides::Map(map)) => map,
        Some(RawOverrides::Encoded(text)) if text.trim().is_empty() => HashMap::new(),
        Some(RawOverrides::Encoded(text)) => serde_json::from_str(&text).map_err(D::Error::custom)?,
    };

    raw.into_iter()
        .map(|(key, value)| {
            let year = match &key {
                YearKey::Number(n) => i32::try_from(*n).ok(),
                YearKey::Text(text) => text.trim().parse::<i32>().ok(),
            };
            year.map(|year| (year, value)).ok_or_else(|| match key {
                YearKey::Number(n) => {
                    D::Error::custom(format!("override year {} is out of range", n))
                }
                YearKey::Text(text) => {
                    D::Error::custom(format!("override year '{}' is not an integer", text))
                }
            })
        })
        .collect()
}
