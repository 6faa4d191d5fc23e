//! Trajectory seeds: starting hypotheses for muon pattern recognition.

use super::kinematics::{GlobalPoint, GlobalVector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Muon subdetector technologies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuonSubdetector {
    Dt,
    Csc,
    Rpc,
    Gem,
}

impl fmt::Display for MuonSubdetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MuonSubdetector::Dt => "DT",
            MuonSubdetector::Csc => "CSC",
            MuonSubdetector::Rpc => "RPC",
            MuonSubdetector::Gem => "GEM",
        };
        write!(f, "{name}")
    }
}

/// Reference to a detector layer (subdetector + station)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetLayerId {
    pub subdetector: MuonSubdetector,
    pub station: u8,
}

impl DetLayerId {
    pub const fn new(subdetector: MuonSubdetector, station: u8) -> Self {
        Self {
            subdetector,
            station,
        }
    }
}

impl fmt::Display for DetLayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} station {}", self.subdetector, self.station)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropagationDirection {
    #[default]
    AlongMomentum,
    OppositeToMomentum,
}

/// Starting state of a trajectory hypothesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySeed {
    pub position: GlobalPoint,
    pub momentum: GlobalVector,
    pub charge: i8,
    pub layer: DetLayerId,
    #[serde(default)]
    pub direction: PropagationDirection,
}

impl TrajectorySeed {
    pub fn new(position: GlobalPoint, momentum: GlobalVector, charge: i8, layer: DetLayerId) -> Self {
        Self {
            position,
            momentum,
            charge,
            layer,
            direction: PropagationDirection::AlongMomentum,
        }
    }

    pub fn with_direction(mut self, direction: PropagationDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn pt(&self) -> f64 {
        self.momentum.perp()
    }
}

pub type SeedCollection = Vec<TrajectorySeed>;
