use crate::error::RoiError;
use esgroi_schemas::settings::RoiSettings;

/// Checks the invariants the projection relies on.
///
/// Rates above 1 are accepted but logged, since they usually mean a percentage was
/// entered where a fraction is expected.
pub fn validate_settings(settings: &RoiSettings) -> Result<(), RoiError> {
    if settings.cashflow_horizon_years == 0 {
        return Err(RoiError::ConfigError(
            "cashflow_horizon_years must be at least 1".to_string(),
        ));
    }
    for (name, rate) in [
        ("discount_rate", settings.discount_rate),
        ("tax_rate", settings.tax_rate),
    ] {
        if !rate.is_finite() {
            return Err(RoiError::ConfigError(format!("{} must be a finite number", name)));
        }
        if rate > 1.0 {
            tracing::warn!("{} is {}; rates are fractions, not percentages", name, rate);
        }
    }
    if settings.discount_rate <= -1.0 {
        return Err(RoiError::ConfigError(
            "discount_rate must be greater than -1".to_string(),
        ));
    }
    Ok(())
}
