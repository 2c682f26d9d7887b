use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoiError {
    #[error("Action definition is missing")]
    ActionNotDefined,

    #[error("ROI settings are missing")]
    SettingsNotDefined,

    #[error("Action '{0}' not found in catalog")]
    ActionNotFound(String),

    #[error("Variable '{0}' not found in catalog")]
    VariableNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
