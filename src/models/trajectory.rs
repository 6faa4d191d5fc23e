//! Builder output consumed by the track loader.

use super::kinematics::{GlobalPoint, GlobalVector};
use super::track::TrackingRecHit;
use serde::{Deserialize, Serialize};

/// Predicted state and hit at one detector crossing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryMeasurement {
    pub position: GlobalPoint,
    pub momentum: GlobalVector,
    pub hit: TrackingRecHit,
}

/// Ordered measurements built from one seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Index of the originating seed in the event's seed collection
    pub seed_index: usize,
    pub charge: i8,
    pub chi2: f64,
    pub measurements: Vec<TrajectoryMeasurement>,
}

impl Trajectory {
    pub fn new(seed_index: usize, charge: i8) -> Self {
        Self {
            seed_index,
            charge,
            chi2: 0.0,
            measurements: Vec::new(),
        }
    }

    pub fn push(&mut self, measurement: TrajectoryMeasurement) {
        self.measurements.push(measurement);
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn valid_hits(&self) -> usize {
        self.measurements.iter().filter(|m| m.hit.valid).count()
    }

    /// Degrees of freedom of a five-parameter helix fit
    pub fn ndof(&self) -> f64 {
        (2 * self.valid_hits()).saturating_sub(5) as f64
    }

    pub fn first_measurement(&self) -> Option<&TrajectoryMeasurement> {
        self.measurements.first()
    }

    pub fn last_measurement(&self) -> Option<&TrajectoryMeasurement> {
        self.measurements.last()
    }
}

pub type TrajectoryContainer = Vec<Trajectory>;
