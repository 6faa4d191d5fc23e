//! Track finder: runs the owned trajectory builder over every seed of an
//! event and hands the trajectories to the loader.

use super::track_loader::{LoadSummary, MuonTrackLoader};
use super::trajectory_builder::MuonTrajectoryBuilder;
use crate::error::Result;
use crate::event::{Event, EventSetup};
use crate::models::{SeedCollection, TrajectoryContainer};
use std::fmt;

pub struct MuonTrackFinder {
    builder: Box<dyn MuonTrajectoryBuilder>,
    loader: MuonTrackLoader,
}

impl MuonTrackFinder {
    pub fn new(builder: Box<dyn MuonTrajectoryBuilder>) -> Self {
        Self {
            builder,
            loader: MuonTrackLoader::new(),
        }
    }

    pub fn builder_name(&self) -> &'static str {
        self.builder.name()
    }

    /// Build trajectories from all seeds, then publish tracks, hits and extras.
    /// A builder failure on any seed aborts the event before anything is published.
    pub fn reconstruct(
        &mut self,
        seeds: &SeedCollection,
        event: &mut Event,
        setup: &EventSetup,
    ) -> Result<LoadSummary> {
        self.builder.set_event(event.id());

        let mut trajectories = TrajectoryContainer::new();
        for (seed_index, seed) in seeds.iter().enumerate() {
            trajectories.extend(self.builder.trajectories(seed_index, seed, setup)?);
        }

        self.loader.load_tracks(trajectories, event)
    }
}

impl fmt::Debug for MuonTrackFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MuonTrackFinder")
            .field("builder", &self.builder.name())
            .field("loader", &self.loader)
            .finish()
    }
}
