use super::{
    bandit::RlParams,
    limits::DesignLimits,
    scoring::ScoringWeights,
    traits::ConfigSection,
};
use crate::engines::scanning::PamPattern;
use crate::error::DesignError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix of the environment variables layered over the config file,
/// e.g. `CRISPR_SEED` or `CRISPR_RL_PARAMS__EPSILON`.
pub const ENV_PREFIX: &str = "CRISPR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    pub pam_sequence: String,
    pub guide_length: usize,
    pub weights: ScoringWeights,
    pub rl_params: RlParams,
    pub limits: DesignLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pam_sequence: "NGG".to_string(),
            guide_length: 20,
            weights: ScoringWeights::default(),
            rl_params: RlParams::default(),
            limits: DesignLimits::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), DesignError> {
        PamPattern::parse(&self.pam_sequence)?;
        if self.guide_length == 0 {
            return Err(DesignError::Configuration(
                "guide_length must be positive".to_string(),
            ));
        }
        self.weights.validate()?;
        self.rl_params.validate()?;
        self.limits.validate()?;
        Ok(())
    }

    /// Layer an optional config file and `CRISPR_*` environment variables.
    ///
    /// `env` replaces the process environment when given.
    pub fn from_sources(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, DesignError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn with_config(config: AppConfig) -> Result<Self, DesignError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// Build from an optional file plus the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, DesignError> {
        let config = AppConfig::from_sources(path, None)?;
        log::info!(
            "Configuration loaded (pam={}, guide_length={}, seed={})",
            config.pam_sequence,
            config.guide_length,
            config.seed
        );
        Self::with_config(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DesignError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DesignError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| DesignError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DesignError> {
        let toml_str = self.to_toml()?;

        std::fs::write(path, toml_str)
            .map_err(|e| DesignError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, DesignError> {
        let config = self.get();
        toml::to_string_pretty(&config)
            .map_err(|e| DesignError::Configuration(format!("Failed to serialize: {}", e)))
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run `f` against the current configuration while holding the read lock,
    /// so no update can land until `f` returns
    pub fn read<R>(&self, f: impl FnOnce(&AppConfig) -> R) -> R {
        let guard = self.config.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Apply `f` to a copy and commit it only if the result validates
    pub fn update<F>(&self, f: F) -> Result<AppConfig, DesignError>
    where
        F: FnOnce(&mut AppConfig),
    {
        self.update_with(f, |_| Ok(()))
    }

    /// Like [`update`](Self::update), with `on_commit` run under the write
    /// lock once the new configuration validates. An `on_commit` error
    /// leaves the previous configuration in place.
    pub fn update_with<F, C>(&self, f: F, on_commit: C) -> Result<AppConfig, DesignError>
    where
        F: FnOnce(&mut AppConfig),
        C: FnOnce(&AppConfig) -> Result<(), DesignError>,
    {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = guard.clone();
        f(&mut candidate);
        candidate.validate()?;
        on_commit(&candidate)?;
        *guard = candidate.clone();
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pam_sequence, "NGG");
        assert_eq!(config.guide_length, 20);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_invalid_pam_rejected() {
        let config = AppConfig {
            pam_sequence: "NGX".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DesignError::Configuration(_))));
    }

    #[test]
    fn test_update_rejects_and_keeps_previous() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.rl_params.epsilon = 2.0);
        assert!(result.is_err());
        assert_eq!(manager.get().rl_params.epsilon, 0.1);

        let updated = manager.update(|c| c.rl_params.epsilon = 0.5).unwrap();
        assert_eq!(updated.rl_params.epsilon, 0.5);
        assert_eq!(manager.get().rl_params.epsilon, 0.5);
    }

    #[test]
    fn test_failed_commit_hook_keeps_previous() {
        let manager = ConfigManager::new();
        let result = manager.update_with(
            |c| c.seed = 7,
            |_| Err(DesignError::Configuration("rejected".to_string())),
        );
        assert!(result.is_err());
        assert_eq!(manager.get().seed, 42);

        let mut seen = None;
        manager
            .update_with(|c| c.seed = 9, |c| {
                seen = Some(c.seed);
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, Some(9));
        assert_eq!(manager.read(|c| c.seed), 9);
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::from_sources(
            None,
            env(&[
                ("CRISPR_SEED", "7"),
                ("CRISPR_GUIDE_LENGTH", "18"),
                ("CRISPR_RL_PARAMS__EPSILON", "0.25"),
            ]),
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.guide_length, 18);
        assert_eq!(config.rl_params.epsilon, 0.25);
        assert_eq!(config.rl_params.learning_rate, 0.01);
        assert_eq!(config.pam_sequence, "NGG");
    }

    #[test]
    fn test_environment_out_of_range_fails_at_load() {
        let result = AppConfig::from_sources(None, env(&[("CRISPR_RL_PARAMS__LEARNING_RATE", "0")]));
        assert!(matches!(result, Err(DesignError::Configuration(_))));
    }

    #[test]
    fn test_file_then_environment() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "pam_sequence = \"NAG\"\nguide_length = 12\n\n[weights]\non_target = 1.0\n"
        )
        .unwrap();

        let config = AppConfig::from_sources(Some(file.path()), env(&[("CRISPR_GUIDE_LENGTH", "15")]))
            .unwrap();
        assert_eq!(config.pam_sequence, "NAG");
        assert_eq!(config.guide_length, 15);
        assert_eq!(config.weights.on_target, 1.0);
        assert_eq!(config.weights.off_target, 0.3);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crispr.toml");

        let manager = ConfigManager::new();
        manager.update(|c| c.guide_length = 23).unwrap();
        manager.save_to_file(&path).unwrap();

        let reloaded = ConfigManager::new();
        reloaded.load_from_file(&path).unwrap();
        assert_eq!(reloaded.get(), manager.get());
    }
}
