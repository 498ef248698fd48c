use super::traits::{check_range, ConfigSection};
use crate::error::DesignError;
use serde::{Deserialize, Serialize};

/// Weights of the composite score terms. They need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub on_target: f64,
    pub off_target: f64,
    pub coverage: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            on_target: 0.5,
            off_target: 0.3,
            coverage: 0.2,
        }
    }
}

impl ConfigSection for ScoringWeights {
    fn section_name() -> &'static str {
        "weights"
    }

    fn validate(&self) -> Result<(), DesignError> {
        let section = Self::section_name();
        for (field, value) in [
            ("on_target", self.on_target),
            ("off_target", self.off_target),
            ("coverage", self.coverage),
        ] {
            check_range(section, field, value, |v| v >= 0.0, "a non-negative number")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_valid() {
        assert!(ScoringWeights::default().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoringWeights {
            off_target: -0.1,
            ..Default::default()
        };
        let err = weights.validate().unwrap_err();
        assert!(err.to_string().contains("weights.off_target"));
    }

    #[test]
    fn test_nan_weight_rejected() {
        let weights = ScoringWeights {
            coverage: f64::NAN,
            ..Default::default()
        };
        assert!(weights.validate().is_err());
    }
}
