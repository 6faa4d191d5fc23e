//! # Muon Reconstruction Configuration
//!
//! Configuration is a tree of [`ParameterSet`]s loaded through the `config` crate
//! (TOML/YAML/JSON files plus environment overrides). Producers receive their own
//! block and read the keys they need; missing required keys fail construction.
//!
//! ## Layout
//!
//! ```toml
//! [standalone_muon_producer]
//! muon_seed_collection_label = "MuonSeed"
//!
//! [standalone_muon_producer.sta_traj_builder_parameters]
//! algorithm = "standalone"
//! min_valid_hits = 2
//!
//! [gem_track_match]
//! sim_input_label = "g4SimHits"
//! min_pt = 5.0
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use muon_reco_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let producer_pset = manager.producer_parameters()?;
//! let match_config = manager.track_match_config()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;
pub mod parameter_set;

use serde::{Deserialize, Serialize};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;
pub use parameter_set::ParameterSet;

/// Top-level block read by the stand-alone muon producer
pub const PRODUCER_SECTION: &str = "standalone_muon_producer";

/// Top-level block read by the GEM track matcher
pub const TRACK_MATCH_SECTION: &str = "gem_track_match";

/// Sim-track selection and input naming for GEM track matching
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrackMatchConfig {
    /// Label of the simulated-track collection in the event
    #[serde(default = "default_sim_input_label")]
    pub sim_input_label: String,

    /// Minimum transverse momentum (GeV)
    #[serde(default = "default_min_pt")]
    pub min_pt: f64,

    /// Minimum |eta| of the GEM acceptance
    #[serde(default = "default_min_eta")]
    pub min_eta: f64,

    /// Maximum |eta| of the GEM acceptance
    #[serde(default = "default_max_eta")]
    pub max_eta: f64,
}

fn default_sim_input_label() -> String {
    "g4SimHits".to_string()
}

fn default_min_pt() -> f64 {
    5.0
}

fn default_min_eta() -> f64 {
    1.55
}

fn default_max_eta() -> f64 {
    2.45
}

impl Default for TrackMatchConfig {
    fn default() -> Self {
        Self {
            sim_input_label: default_sim_input_label(),
            min_pt: default_min_pt(),
            min_eta: default_min_eta(),
            max_eta: default_max_eta(),
        }
    }
}

impl TrackMatchConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.sim_input_label.is_empty() {
            return Err(ConfigurationError::missing_parameter(
                TRACK_MATCH_SECTION,
                "sim_input_label",
            ));
        }

        if !(self.min_pt >= 0.0) {
            return Err(ConfigurationError::invalid_value(
                "gem_track_match.min_pt",
                self.min_pt.to_string(),
                "minimum pt must be non-negative",
            ));
        }

        if !(self.min_eta >= 0.0 && self.min_eta <= self.max_eta) {
            return Err(ConfigurationError::invalid_value(
                "gem_track_match.min_eta",
                format!("[{}, {}]", self.min_eta, self.max_eta),
                "eta window must satisfy 0 <= min_eta <= max_eta",
            ));
        }

        Ok(())
    }
}
