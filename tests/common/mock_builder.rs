use muon_reco_core::event::{EventId, EventSetup};
use muon_reco_core::models::{
    DetLayerId, MuonSubdetector, TrackingRecHit, Trajectory, TrajectoryContainer,
    TrajectoryMeasurement, TrajectorySeed,
};
use muon_reco_core::{MuonRecoError, MuonTrajectoryBuilder, Result};
use std::sync::{Arc, Mutex};

/// What the mock builder observed
#[derive(Debug, Default)]
pub struct MockBuilderLog {
    pub events: Vec<EventId>,
    pub seed_indices: Vec<usize>,
}

/// Trajectory builder returning one fixed-length trajectory per seed
#[derive(Debug)]
pub struct MockTrajectoryBuilder {
    pub hits_per_trajectory: usize,
    pub fail_on_seed: Option<usize>,
    pub log: Arc<Mutex<MockBuilderLog>>,
}

impl MockTrajectoryBuilder {
    pub fn new(hits_per_trajectory: usize) -> Self {
        Self {
            hits_per_trajectory,
            fail_on_seed: None,
            log: Arc::new(Mutex::new(MockBuilderLog::default())),
        }
    }

    pub fn failing_on(mut self, seed_index: usize) -> Self {
        self.fail_on_seed = Some(seed_index);
        self
    }
}

impl MuonTrajectoryBuilder for MockTrajectoryBuilder {
    fn name(&self) -> &'static str {
        "MockTrajectoryBuilder"
    }

    fn set_event(&mut self, event_id: EventId) {
        self.log.lock().unwrap().events.push(event_id);
    }

    fn trajectories(
        &mut self,
        seed_index: usize,
        seed: &TrajectorySeed,
        _setup: &EventSetup,
    ) -> Result<TrajectoryContainer> {
        self.log.lock().unwrap().seed_indices.push(seed_index);
        if self.fail_on_seed == Some(seed_index) {
            return Err(MuonRecoError::ReconstructionError(format!(
                "mock failure on seed {seed_index}"
            )));
        }

        let mut trajectory = Trajectory::new(seed_index, seed.charge);
        for station in 1..=self.hits_per_trajectory {
            let layer = DetLayerId::new(MuonSubdetector::Dt, station as u8);
            trajectory.push(TrajectoryMeasurement {
                position: seed.position,
                momentum: seed.momentum,
                hit: TrackingRecHit::valid(layer, seed.position, 0.1),
            });
        }
        Ok(vec![trajectory])
    }
}
