//! # Event Store
//!
//! In-memory stand-in for the event-data service. Input collections (seeds,
//! simulated tracks) are registered under labels and handed out as shared
//! `Arc` handles; reconstruction products are single-assignment slots, so each
//! product can be published at most once per event.

pub mod setup;

use crate::error::{MuonRecoError, Result};
use crate::models::{
    RecHitCollection, SeedCollection, SimTrackCollection, TrackCollection, TrackExtraCollection,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub use setup::{EventSetup, MagneticField, MuonDetLayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EventId {
    pub run: u32,
    pub luminosity_block: u32,
    pub event: u64,
}

impl EventId {
    pub const fn new(run: u32, luminosity_block: u32, event: u64) -> Self {
        Self {
            run,
            luminosity_block,
            event,
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.run, self.luminosity_block, self.event)
    }
}

/// Products a producer may publish into the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    Tracks,
    RecHits,
    TrackExtras,
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProductKind::Tracks => "TrackCollection",
            ProductKind::RecHits => "TrackingRecHitCollection",
            ProductKind::TrackExtras => "TrackExtraCollection",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Default)]
pub struct Event {
    id: EventId,
    seeds: HashMap<String, Arc<SeedCollection>>,
    sim_tracks: HashMap<String, Arc<SimTrackCollection>>,
    tracks: Option<TrackCollection>,
    rec_hits: Option<RecHitCollection>,
    track_extras: Option<TrackExtraCollection>,
}

impl Event {
    pub fn new(id: EventId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    /// Register a seed collection under `label`, replacing any previous one
    pub fn with_seeds(mut self, label: impl Into<String>, seeds: SeedCollection) -> Self {
        self.seeds.insert(label.into(), Arc::new(seeds));
        self
    }

    pub fn with_sim_tracks(
        mut self,
        label: impl Into<String>,
        sim_tracks: SimTrackCollection,
    ) -> Self {
        self.sim_tracks.insert(label.into(), Arc::new(sim_tracks));
        self
    }

    /// Seed collection by label; absence is a missing-input error
    pub fn seeds(&self, label: &str) -> Result<Arc<SeedCollection>> {
        self.seeds
            .get(label)
            .cloned()
            .ok_or_else(|| MuonRecoError::missing_input(label))
    }

    pub fn sim_tracks(&self, label: &str) -> Result<Arc<SimTrackCollection>> {
        self.sim_tracks
            .get(label)
            .cloned()
            .ok_or_else(|| MuonRecoError::missing_input(label))
    }

    pub fn put_tracks(&mut self, tracks: TrackCollection) -> Result<()> {
        put_once(&mut self.tracks, tracks, ProductKind::Tracks, self.id)
    }

    pub fn put_rec_hits(&mut self, rec_hits: RecHitCollection) -> Result<()> {
        put_once(&mut self.rec_hits, rec_hits, ProductKind::RecHits, self.id)
    }

    pub fn put_track_extras(&mut self, track_extras: TrackExtraCollection) -> Result<()> {
        put_once(
            &mut self.track_extras,
            track_extras,
            ProductKind::TrackExtras,
            self.id,
        )
    }

    /// Publish all three reconstruction products, or none of them if any
    /// slot is already filled
    pub fn put_products(
        &mut self,
        tracks: TrackCollection,
        rec_hits: RecHitCollection,
        track_extras: TrackExtraCollection,
    ) -> Result<()> {
        let published: Vec<String> = [ProductKind::RecHits, ProductKind::TrackExtras, ProductKind::Tracks]
            .into_iter()
            .filter(|kind| self.is_published(*kind))
            .map(|kind| kind.to_string())
            .collect();
        if !published.is_empty() {
            return Err(MuonRecoError::EventError(format!(
                "{} already published in event {}",
                published.join(", "),
                self.id
            )));
        }

        self.rec_hits = Some(rec_hits);
        self.track_extras = Some(track_extras);
        self.tracks = Some(tracks);
        Ok(())
    }

    pub fn tracks(&self) -> Option<&TrackCollection> {
        self.tracks.as_ref()
    }

    pub fn rec_hits(&self) -> Option<&RecHitCollection> {
        self.rec_hits.as_ref()
    }

    pub fn track_extras(&self) -> Option<&TrackExtraCollection> {
        self.track_extras.as_ref()
    }

    pub fn is_published(&self, kind: ProductKind) -> bool {
        match kind {
            ProductKind::Tracks => self.tracks.is_some(),
            ProductKind::RecHits => self.rec_hits.is_some(),
            ProductKind::TrackExtras => self.track_extras.is_some(),
        }
    }
}

fn put_once<T>(slot: &mut Option<T>, value: T, kind: ProductKind, id: EventId) -> Result<()> {
    if slot.is_some() {
        return Err(MuonRecoError::EventError(format!(
            "{kind} already published in event {id}"
        )));
    }
    *slot = Some(value);
    Ok(())
}
