//! Error types for muon reconstruction and GEM validation.

use crate::config::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MuonRecoError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Missing input collection '{label}'")]
    MissingInput { label: String },
    #[error("Event error: {0}")]
    EventError(String),
    #[error("Geometry lookup miss: {0}")]
    GeometryLookupMiss(String),
    #[error("Out of range query: {0}")]
    OutOfRangeQuery(String),
    #[error("Reconstruction error: {0}")]
    ReconstructionError(String),
}

impl MuonRecoError {
    pub fn missing_input(label: impl Into<String>) -> Self {
        Self::MissingInput {
            label: label.into(),
        }
    }

    /// Errors that only affect the current event, as opposed to setup failures.
    pub fn is_event_level(&self) -> bool {
        matches!(
            self,
            Self::MissingInput { .. } | Self::EventError(_) | Self::ReconstructionError(_)
        )
    }
}

impl From<ConfigurationError> for MuonRecoError {
    fn from(error: ConfigurationError) -> Self {
        MuonRecoError::ConfigurationError(error.to_string())
    }
}

impl From<serde_json::Error> for MuonRecoError {
    fn from(error: serde_json::Error) -> Self {
        MuonRecoError::ConfigurationError(format!("JSON deserialization error: {error}"))
    }
}

pub type Result<T> = std::result::Result<T, MuonRecoError>;
