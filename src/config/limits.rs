use super::traits::ConfigSection;
use crate::error::DesignError;
use serde::{Deserialize, Serialize};

/// Per-request work bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignLimits {
    /// Candidates kept after the scan, in locus order
    pub max_candidates: usize,
    /// Guides the bandit selects
    pub select_top_k: usize,
    /// Guides returned after reranking
    pub final_top_k: usize,
}

impl Default for DesignLimits {
    fn default() -> Self {
        Self {
            max_candidates: 1000,
            select_top_k: 20,
            final_top_k: 10,
        }
    }
}

impl ConfigSection for DesignLimits {
    fn section_name() -> &'static str {
        "limits"
    }

    fn validate(&self) -> Result<(), DesignError> {
        for (field, value) in [
            ("max_candidates", self.max_candidates),
            ("select_top_k", self.select_top_k),
            ("final_top_k", self.final_top_k),
        ] {
            if value == 0 {
                return Err(DesignError::Configuration(format!(
                    "{}.{} must be positive",
                    Self::section_name(),
                    field
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_names_the_field() {
        let limits = DesignLimits {
            select_top_k: 0,
            ..Default::default()
        };
        let err = limits.validate().unwrap_err();
        assert!(err.to_string().contains("limits.select_top_k"));
        assert!(DesignLimits::default().validate().is_ok());
    }
}
