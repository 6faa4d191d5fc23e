//! Reconstruction products: rec-hits, track extras and tracks.
//!
//! A [`TrackExtra`] refers to a contiguous range of the event's rec-hit
//! collection; a [`Track`] refers to its extra by index. Both indices are only
//! meaningful together with the collections published in the same event.

use super::kinematics::{GlobalPoint, GlobalVector};
use super::seed::DetLayerId;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A measured hit used by a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecHit {
    pub layer: DetLayerId,
    pub position: GlobalPoint,
    /// Measurement uncertainty in the bending plane (cm)
    pub error_rphi: f64,
    pub valid: bool,
}

impl TrackingRecHit {
    pub fn valid(layer: DetLayerId, position: GlobalPoint, error_rphi: f64) -> Self {
        Self {
            layer,
            position,
            error_rphi,
            valid: true,
        }
    }
}

/// Auxiliary fit information of a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackExtra {
    pub inner_position: GlobalPoint,
    pub inner_momentum: GlobalVector,
    pub outer_position: GlobalPoint,
    pub outer_momentum: GlobalVector,
    /// Index of the first hit in the event's rec-hit collection
    pub first_hit: usize,
    pub hit_count: usize,
}

impl TrackExtra {
    /// `None` when `first_hit + hit_count` does not fit in `usize`
    pub fn hit_range(&self) -> Option<Range<usize>> {
        let end = self.first_hit.checked_add(self.hit_count)?;
        Some(self.first_hit..end)
    }

    /// Hits of this extra within the event's rec-hit collection
    pub fn hits<'a>(&self, hits: &'a [TrackingRecHit]) -> Option<&'a [TrackingRecHit]> {
        hits.get(self.hit_range()?)
    }
}

/// A fitted muon trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub chi2: f64,
    pub ndof: f64,
    pub charge: i8,
    pub momentum: GlobalVector,
    pub reference_point: GlobalPoint,
    pub found_hits: usize,
    /// Index of the extra in the event's track-extra collection
    pub extra: Option<usize>,
}

impl Track {
    pub fn pt(&self) -> f64 {
        self.momentum.perp()
    }

    pub fn eta(&self) -> f64 {
        self.momentum.eta()
    }

    pub fn phi(&self) -> f64 {
        self.momentum.phi()
    }

    pub fn normalized_chi2(&self) -> f64 {
        if self.ndof > 0.0 {
            self.chi2 / self.ndof
        } else {
            self.chi2
        }
    }
}

pub type TrackCollection = Vec<Track>;
pub type TrackExtraCollection = Vec<TrackExtra>;
pub type RecHitCollection = Vec<TrackingRecHit>;
