//! Configuration Loader
//!
//! Environment-aware configuration loading. Merges the base file, an optional
//! per-environment override file and `MUONRECO__`-prefixed environment variables.

use super::error::{ConfigResult, ConfigurationError};
use super::{ParameterSet, TrackMatchConfig, PRODUCER_SECTION, TRACK_MATCH_SECTION};
use config::{Config, Environment, File, FileFormat};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Base configuration file name inside the configuration directory
pub const CONFIG_FILE_NAME: &str = "muon-reco.toml";

/// Environment variable prefix for overrides, e.g.
/// `MUONRECO__GEM_TRACK_MATCH__MIN_PT=10`
pub const ENV_PREFIX: &str = "MUONRECO";

pub struct ConfigManager {
    root: ParameterSet,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment.
    /// Tests use this to avoid touching global environment variables.
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));
        let base_file = config_directory.join(CONFIG_FILE_NAME);

        debug!(
            environment = %environment,
            directory = %config_directory.display(),
            "Loading muon reconstruction configuration"
        );

        if !base_file.is_file() {
            return Err(ConfigurationError::load_error(
                base_file.display().to_string(),
                "configuration file not found",
            ));
        }

        let override_file = Self::environment_override_path(&config_directory, environment);

        let config = Config::builder()
            .add_source(File::from(base_file.as_path()).required(true))
            .add_source(File::from(override_file.as_path()).required(false))
            .add_source(Self::environment_source())
            .build()?;

        let manager = Self::from_config(config, environment, config_directory)?;
        Ok(Arc::new(manager))
    }

    /// Build configuration from an in-memory TOML document (no environment overrides)
    pub fn from_toml_str(contents: &str, environment: &str) -> ConfigResult<ConfigManager> {
        let config = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;

        Self::from_config(config, environment, PathBuf::from("."))
    }

    fn from_config(
        config: Config,
        environment: &str,
        config_directory: PathBuf,
    ) -> ConfigResult<ConfigManager> {
        let value: serde_json::Value = config.try_deserialize()?;
        let root = ParameterSet::from_value("", value)?;

        let manager = ConfigManager {
            root,
            environment: environment.to_string(),
            config_directory,
        };
        manager.validate()?;

        crate::log_config!(debug, "Configuration loaded successfully",
            environment: manager.environment,
            sections: manager.root.keys().collect::<Vec<_>>()
        );

        Ok(manager)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.root.contains(TRACK_MATCH_SECTION) {
            self.track_match_config()?.validate()?;
        }
        Ok(())
    }

    fn environment_source() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn environment_override_path(config_directory: &Path, environment: &str) -> PathBuf {
        config_directory
            .join("environments")
            .join(format!("{environment}.toml"))
    }

    fn detect_environment() -> String {
        env::var("MUONRECO_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
    }

    /// The whole configuration tree
    pub fn root(&self) -> &ParameterSet {
        &self.root
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Block handed to the stand-alone muon producer
    pub fn producer_parameters(&self) -> ConfigResult<ParameterSet> {
        self.root.get_parameter_set(PRODUCER_SECTION)
    }

    /// GEM track-matching configuration; an absent block yields the defaults
    pub fn track_match_config(&self) -> ConfigResult<TrackMatchConfig> {
        if !self.root.contains(TRACK_MATCH_SECTION) {
            return Ok(TrackMatchConfig::default());
        }
        self.root
            .get_parameter_set(TRACK_MATCH_SECTION)?
            .deserialize()
    }
}

impl std::fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigManager")
            .field("environment", &self.environment)
            .field("config_directory", &self.config_directory)
            .field("sections", &self.root.keys().collect::<Vec<_>>())
            .finish()
    }
}
