//! # Trajectory Builder Strategy
//!
//! A trajectory builder turns one seed into zero or more trajectories given the
//! event's field and detector-layer context. Each reconstruction algorithm
//! family is one implementation of [`MuonTrajectoryBuilder`]; the producer owns
//! exactly one instance for its whole lifetime.

use super::standalone_builder::StandAloneMuonTrajectoryBuilder;
use crate::config::{ConfigurationError, ParameterSet};
use crate::error::Result;
use crate::event::{EventId, EventSetup};
use crate::models::{TrajectoryContainer, TrajectorySeed};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub trait MuonTrajectoryBuilder: Send {
    /// Algorithm name used in logs
    fn name(&self) -> &'static str;

    /// Called once per event before the first seed is processed
    fn set_event(&mut self, _event_id: EventId) {}

    /// Build trajectories from a single seed
    fn trajectories(
        &mut self,
        seed_index: usize,
        seed: &TrajectorySeed,
        setup: &EventSetup,
    ) -> Result<TrajectoryContainer>;
}

/// Algorithm families selectable through the `algorithm` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryBuilderKind {
    StandAlone,
}

impl FromStr for TrajectoryBuilderKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standalone" | "stand_alone" => Ok(TrajectoryBuilderKind::StandAlone),
            other => Err(ConfigurationError::invalid_value(
                "algorithm",
                other,
                "unknown trajectory builder algorithm",
            )),
        }
    }
}

impl fmt::Display for TrajectoryBuilderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajectoryBuilderKind::StandAlone => write!(f, "standalone"),
        }
    }
}

/// Instantiate the builder selected by the builder parameter block
pub fn build_trajectory_builder(parameters: &ParameterSet) -> Result<Box<dyn MuonTrajectoryBuilder>> {
    let algorithm: String = parameters.get_or("algorithm", "standalone".to_string())?;
    let kind: TrajectoryBuilderKind = algorithm.parse()?;

    match kind {
        TrajectoryBuilderKind::StandAlone => Ok(Box::new(
            StandAloneMuonTrajectoryBuilder::from_parameters(parameters)?,
        )),
    }
}
