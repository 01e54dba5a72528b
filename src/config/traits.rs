use crate::error::TrussevoError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), TrussevoError>;
}

/// Shared check for probabilities such as mutation or crossover rates
pub(crate) fn check_probability(
    section: &str,
    field: &str,
    value: f64,
) -> Result<(), TrussevoError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(TrussevoError::Configuration(format!(
            "{}.{} must be between 0 and 1, got {}",
            section, field, value
        )));
    }
    Ok(())
}

pub(crate) fn check_positive(section: &str, field: &str, value: f64) -> Result<(), TrussevoError> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(TrussevoError::Configuration(format!(
            "{}.{} must be positive, got {}",
            section, field, value
        )));
    }
    Ok(())
}
