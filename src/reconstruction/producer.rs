//! # Stand-Alone Muon Producer
//!
//! Reconstructs muons from internal seeds. The producer reads its parameter
//! block once, owns a single trajectory builder (wrapped in a
//! [`MuonTrackFinder`]) for its whole lifetime and, per event, publishes
//! tracks, rec-hits and track extras.
//!
//! ## Lifecycle
//!
//! ```text
//! new()/with_trajectory_builder() ──► ready ──► produce()* ──► drop
//! ```
//!
//! `produce` takes `&mut self`; one instance serves one event at a time.
//!
//! ## Usage
//!
//! ```rust
//! use muon_reco_core::config::ParameterSet;
//! use muon_reco_core::event::{Event, EventId, EventSetup};
//! use muon_reco_core::reconstruction::StandAloneMuonProducer;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pset = ParameterSet::from_value(
//!     "standalone_muon_producer",
//!     json!({
//!         "muon_seed_collection_label": "MuonSeed",
//!         "sta_traj_builder_parameters": { "min_valid_hits": 2 }
//!     }),
//! )?;
//! let mut producer = StandAloneMuonProducer::new(&pset)?;
//!
//! let mut event = Event::new(EventId::new(1, 1, 1)).with_seeds("MuonSeed", Vec::new());
//! producer.produce(&mut event, &EventSetup::default())?;
//! assert!(event.tracks().unwrap().is_empty());
//! # Ok(())
//! # }
//! ```

use super::track_finder::MuonTrackFinder;
use super::trajectory_builder::{build_trajectory_builder, MuonTrajectoryBuilder};
use crate::config::ParameterSet;
use crate::error::Result;
use crate::event::{Event, EventSetup, ProductKind};
use crate::logging::categories;
use tracing::{debug, error, warn};

/// Builder parameter block inside the producer configuration
pub const BUILDER_PARAMETERS_KEY: &str = "sta_traj_builder_parameters";

/// Label of the input seed collection
pub const SEED_COLLECTION_LABEL_KEY: &str = "muon_seed_collection_label";

const PRODUCTS: [ProductKind; 3] = [
    ProductKind::Tracks,
    ProductKind::RecHits,
    ProductKind::TrackExtras,
];

#[derive(Debug)]
pub struct StandAloneMuonProducer {
    seed_collection_label: String,
    track_finder: MuonTrackFinder,
}

impl StandAloneMuonProducer {
    /// Construct from configuration, instantiating the configured builder
    pub fn new(parameters: &ParameterSet) -> Result<Self> {
        debug!(target: categories::STANDALONE_MUON_PRODUCER, "constructor called");

        let builder_parameters = parameters.get_parameter_set(BUILDER_PARAMETERS_KEY)?;
        let seed_collection_label: String = parameters.get(SEED_COLLECTION_LABEL_KEY)?;
        let builder = build_trajectory_builder(&builder_parameters)?;

        Ok(Self::assemble(seed_collection_label, builder))
    }

    /// Construct with an externally created builder; only the seed label is read
    pub fn with_trajectory_builder(
        parameters: &ParameterSet,
        builder: Box<dyn MuonTrajectoryBuilder>,
    ) -> Result<Self> {
        let seed_collection_label: String = parameters.get(SEED_COLLECTION_LABEL_KEY)?;
        Ok(Self::assemble(seed_collection_label, builder))
    }

    fn assemble(seed_collection_label: String, builder: Box<dyn MuonTrajectoryBuilder>) -> Self {
        let track_finder = MuonTrackFinder::new(builder);

        crate::log_reconstruction!(debug, "producer ready",
            seed_collection_label: seed_collection_label,
            builder: track_finder.builder_name(),
            products: PRODUCTS
        );

        Self {
            seed_collection_label,
            track_finder,
        }
    }

    pub fn seed_collection_label(&self) -> &str {
        &self.seed_collection_label
    }

    pub fn builder_name(&self) -> &'static str {
        self.track_finder.builder_name()
    }

    /// Products declared at construction
    pub fn produces(&self) -> &'static [ProductKind] {
        &PRODUCTS
    }

    /// Reconstruct muons in one event
    pub fn produce(&mut self, event: &mut Event, setup: &EventSetup) -> Result<()> {
        crate::log_reconstruction!(debug, "Stand Alone Muon Reconstruction Started",
            event: event.id()
        );

        self.reconstruct_event(event, setup).inspect_err(|err| {
            if err.is_event_level() {
                warn!(
                    target: categories::STANDALONE_MUON_PRODUCER,
                    event = %event.id(),
                    error = %err,
                    "Event skipped"
                );
            } else {
                error!(
                    target: categories::STANDALONE_MUON_PRODUCER,
                    event = %event.id(),
                    error = %err,
                    "Stand-alone muon reconstruction failed"
                );
            }
        })
    }

    fn reconstruct_event(&mut self, event: &mut Event, setup: &EventSetup) -> Result<()> {
        debug!(
            target: categories::STANDALONE_MUON_PRODUCER,
            label = %self.seed_collection_label,
            "Taking the seeds"
        );
        let seeds = event.seeds(&self.seed_collection_label)?;

        debug!(
            target: categories::STANDALONE_MUON_PRODUCER,
            seeds = seeds.len(),
            "Track Reconstruction"
        );
        let summary = self.track_finder.reconstruct(&seeds, event, setup)?;

        crate::log_reconstruction!(debug, "Event loaded",
            event: event.id(),
            tracks: summary.tracks,
            rec_hits: summary.rec_hits,
            skipped_trajectories: summary.skipped_trajectories
        );

        Ok(())
    }
}

impl Drop for StandAloneMuonProducer {
    fn drop(&mut self) {
        debug!(
            target: categories::STANDALONE_MUON_PRODUCER,
            builder = self.track_finder.builder_name(),
            "StandAloneMuonProducer destructor called"
        );
    }
}
