use crate::error::DesignError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), DesignError>;
}

/// Shared range check used by the sections
pub(crate) fn check_range(
    section: &str,
    field: &str,
    value: f64,
    accept: impl Fn(f64) -> bool,
    expected: &str,
) -> Result<(), DesignError> {
    if value.is_finite() && accept(value) {
        Ok(())
    } else {
        Err(DesignError::Configuration(format!(
            "{}.{} must be {}, got {}",
            section, field, expected, value
        )))
    }
}
