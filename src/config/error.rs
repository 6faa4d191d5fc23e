//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Missing required parameter '{key}' in {block}")]
    MissingParameter { block: String, key: String },

    #[error("Parameter '{key}' in {block} has the wrong type: {reason}")]
    InvalidType {
        block: String,
        key: String,
        reason: String,
    },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration from {location}: {reason}")]
    LoadError { location: String, reason: String },
}

impl ConfigurationError {
    pub fn missing_parameter(block: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingParameter {
            block: block.into(),
            key: key.into(),
        }
    }

    pub fn invalid_type(
        block: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidType {
            block: block.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn load_error(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadError {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for ConfigurationError {
    fn from(error: config::ConfigError) -> Self {
        ConfigurationError::load_error("configuration sources", error.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigurationError>;
