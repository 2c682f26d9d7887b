use crate::{action::Action, settings::RoiSettings, variable::Variable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct VariableFile {
    pub schema_version: String,
    pub variables: Vec<Variable>,
}

#[derive(Debug, Deserialize)]
pub struct ActionFile {
    pub schema_version: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsFile {
    pub schema_version: String,
    pub settings: RoiSettings,
}
