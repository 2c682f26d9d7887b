use crate::{error::RoiError, projection::engine::ProjectionEngine};
use chrono::Datelike;
use esgroi_schemas::{action::Action, settings::RoiSettings};

/// A fluent builder for constructing a `ProjectionEngine`.
///
/// Collects the action under appraisal, the global settings and optional output
/// configuration before a projection is run.
#[derive(Default)]
pub struct ProjectionBuilder {
    action: Option<Action>,
    settings: Option<RoiSettings>,
    reference_year: Option<i32>,
    log_path: Option<String>,
}

impl ProjectionBuilder {
    /// Creates a new, empty `ProjectionBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `Action` to appraise. Its monetization variable must already be linked.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets the global `RoiSettings` (discount rate, tax rate, horizon).
    pub fn with_settings(mut self, settings: RoiSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Pins the investment year instead of using the current calendar year.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Configures the projection to write its cashflow table to the specified CSV file.
    ///
    /// The file is only created once `run` produces a result.
    pub fn with_cashflow_logging_to_file(mut self, path: &str) -> Self {
        self.log_path = Some(path.to_string());
        self
    }

    /// Consumes the builder and returns a fully configured `ProjectionEngine`.
    ///
    /// # Errors
    ///
    /// Returns a `RoiError` if the action or settings have not been provided.
    pub fn build(self) -> Result<ProjectionEngine, RoiError> {
        let action = self.action.ok_or(RoiError::ActionNotDefined)?;
        let settings = self.settings.ok_or(RoiError::SettingsNotDefined)?;

        Ok(ProjectionEngine {
            action,
            settings,
            reference_year: self
                .reference_year
                .unwrap_or_else(|| chrono::Local::now().year()),
            log_path: self.log_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_action_and_settings() {
        let missing_action = ProjectionBuilder::new()
            .with_settings(RoiSettings::default())
            .build();
        assert!(matches!(missing_action, Err(RoiError::ActionNotDefined)));

        let missing_settings = ProjectionBuilder::new()
            .with_action(Action::default())
            .build();
        assert!(matches!(missing_settings, Err(RoiError::SettingsNotDefined)));
    }

    #[test]
    fn action_without_kpi_runs_to_no_result() {
        let mut engine = ProjectionBuilder::new()
            .with_action(Action::default())
            .with_settings(RoiSettings::default())
            .with_reference_year(2030)
            .build()
            .unwrap();
        assert_eq!(engine.reference_year(), 2030);
        assert!(engine.run().unwrap().is_none());
    }
}
