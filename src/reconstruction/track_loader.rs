//! # Muon Track Loader
//!
//! Converts builder trajectories into the three reconstruction products and
//! publishes them into the event. Products are always published, empty or not,
//! so downstream consumers never see a missing collection.

use crate::error::Result;
use crate::event::Event;
use crate::logging::categories;
use crate::models::{
    RecHitCollection, Track, TrackCollection, TrackExtra, TrackExtraCollection,
    TrajectoryContainer,
};
use tracing::{debug, warn};

/// Outcome of loading one event's trajectories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub tracks: usize,
    pub rec_hits: usize,
    pub skipped_trajectories: usize,
}

/// Collections assembled from trajectories, not yet published
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackProducts {
    pub tracks: TrackCollection,
    pub rec_hits: RecHitCollection,
    pub track_extras: TrackExtraCollection,
    pub skipped_trajectories: usize,
}

#[derive(Debug, Default)]
pub struct MuonTrackLoader;

impl MuonTrackLoader {
    pub fn new() -> Self {
        Self
    }

    /// Assemble products; extras index into `rec_hits`, tracks into `track_extras`
    pub fn build_products(&self, trajectories: TrajectoryContainer) -> TrackProducts {
        let mut products = TrackProducts::default();

        for trajectory in trajectories {
            let (Some(inner), Some(outer)) =
                (trajectory.first_measurement(), trajectory.last_measurement())
            else {
                warn!(
                    target: categories::MUON_TRACK_LOADER,
                    seed_index = trajectory.seed_index,
                    "Skipping trajectory without measurements"
                );
                products.skipped_trajectories += 1;
                continue;
            };

            let extra = TrackExtra {
                inner_position: inner.position,
                inner_momentum: inner.momentum,
                outer_position: outer.position,
                outer_momentum: outer.momentum,
                first_hit: products.rec_hits.len(),
                hit_count: trajectory.measurements.len(),
            };

            let track = Track {
                chi2: trajectory.chi2,
                ndof: trajectory.ndof(),
                charge: trajectory.charge,
                momentum: inner.momentum,
                reference_point: inner.position,
                found_hits: trajectory.valid_hits(),
                extra: Some(products.track_extras.len()),
            };

            products
                .rec_hits
                .extend(trajectory.measurements.iter().map(|m| m.hit.clone()));
            products.track_extras.push(extra);
            products.tracks.push(track);
        }

        products
    }

    /// Build and publish rec-hits, track extras and tracks together; if any
    /// of them is already in the event, nothing is published
    pub fn load_tracks(&self, trajectories: TrajectoryContainer, event: &mut Event) -> Result<LoadSummary> {
        let products = self.build_products(trajectories);
        let summary = LoadSummary {
            tracks: products.tracks.len(),
            rec_hits: products.rec_hits.len(),
            skipped_trajectories: products.skipped_trajectories,
        };

        event.put_products(products.tracks, products.rec_hits, products.track_extras)?;

        debug!(
            target: categories::MUON_TRACK_LOADER,
            event = %event.id(),
            tracks = summary.tracks,
            rec_hits = summary.rec_hits,
            skipped = summary.skipped_trajectories,
            "Products loaded into event"
        );

        Ok(summary)
    }
}
