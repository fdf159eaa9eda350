//! Configuration module for the heavy-hitter toolkit.
//!
//! This module provides a configuration system that can load settings
//! from files (TOML, YAML, JSON) and override them with environment variables.
//! All configuration values are validated for correctness before use.

use std::path::{Path, PathBuf};

use crate::data_structures::{MinCutConfig, SelectiveBloomConfig};
use crate::error::config::ConfigError;
use crate::harness::WorkloadConfig;
use config::{Config, ConfigError as ExternalConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "HEAVY_HITTERS";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for a measurement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HeavyHittersConfig {
    /// Synthetic workload shape
    pub workload: WorkloadConfig,

    /// Min-Cut sketch parameters
    pub min_cut: MinCutConfig,

    /// Selective counting Bloom filter parameters
    pub selective_bloom: SelectiveBloomConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for HeavyHittersConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.workload.validate().map_err(|e| ConfigError::ValueOutOfRange {
            key: "workload".to_string(),
            message: e.to_string(),
        })?;
        self.min_cut
            .validate()
            .map_err(|e| ConfigError::from_sketch("min_cut", e))?;
        self.selective_bloom
            .validate()
            .map_err(|e| ConfigError::from_sketch("selective_bloom", e))?;
        self.log.validate()?;
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: true,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Configuration loader for measurement runs.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from defaults, a file and environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(HeavyHittersConfig)` if the configuration was loaded successfully
    /// * `Err(ConfigError)` if there was an error loading or validating the configuration
    pub fn load(&self) -> ConfigResult<HeavyHittersConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&HeavyHittersConfig::default())
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };
            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| match e {
            ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
            other => ConfigError::ParseError(other.to_string()),
        })?;

        let loaded: HeavyHittersConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        loaded.validate()?;
        tracing::debug!(path = ?self.config_path, "Configuration loaded");

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(HeavyHittersConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = HeavyHittersConfig::default();
        config.log.level = "verbose".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_sketch_errors_name_their_section() {
        let mut config = HeavyHittersConfig::default();
        config.selective_bloom.max_n = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[selective_bloom]"));
        assert!(err.to_string().contains("max_n"));
    }

    #[test]
    fn test_workload_errors_are_out_of_range() {
        let mut config = HeavyHittersConfig::default();
        config.workload.repeat_percent = 150;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "workload"
        ));
    }

    #[test]
    fn test_load_without_file_gives_defaults() {
        let loader = ConfigLoader::new(None::<&Path>, "HEAVY_HITTERS_UNIT_TEST_UNUSED");
        assert_eq!(loader.load().unwrap(), HeavyHittersConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let loader = ConfigLoader::new(Some("/nonexistent/heavy_hitters.toml"), ENV_PREFIX);
        assert!(matches!(loader.load(), Err(ConfigError::FileNotFound(_))));
    }
}
