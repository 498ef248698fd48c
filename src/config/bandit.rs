use super::traits::{check_range, ConfigSection};
use crate::error::DesignError;
use serde::{Deserialize, Serialize};

/// Exploration and learning parameters of the bandit optimizer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RlParams {
    pub epsilon: f64,
    pub learning_rate: f64,
}

impl Default for RlParams {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            learning_rate: 0.01,
        }
    }
}

impl ConfigSection for RlParams {
    fn section_name() -> &'static str {
        "rl_params"
    }

    fn validate(&self) -> Result<(), DesignError> {
        let section = Self::section_name();
        check_range(
            section,
            "epsilon",
            self.epsilon,
            |v| (0.0..=1.0).contains(&v),
            "between 0 and 1",
        )?;
        check_range(
            section,
            "learning_rate",
            self.learning_rate,
            |v| v > 0.0 && v <= 1.0,
            "in (0, 1]",
        )?;
        Ok(())
    }
}
