//! # GEM Track Matching
//!
//! [`GemTrackMatch`] derives, from the detector geometry, the radial extent of
//! odd and even GE1/1 chambers and a phi lookup table per endcap. Validation
//! analyzers use it to pick simulated muons worth matching and to find the
//! chambers a track at a given phi may cross.
//!
//! ```text
//! set_geometry(&dyn GemGeometry)
//!     ├── odd  reference chamber (C1) ──► ChamberRadialExtent
//!     ├── even reference chamber (C2) ──► ChamberRadialExtent
//!     └── super-chamber count N       ──► ChamberLut (+1) / ChamberLut (-1)
//! ```
//!
//! The geometry is borrowed only for the duration of `set_geometry`; every
//! call discards previously derived state before rebuilding it.

use super::gem_det_id::GemDetId;
use super::gem_geometry::GemGeometry;
use super::phi_lut::{uniform_phi_boundaries, ChamberLut, PhiBinning};
use super::selection::SimTrackSelection;
use crate::config::TrackMatchConfig;
use crate::error::{MuonRecoError, Result};
use crate::event::Event;
use crate::models::{LocalPoint, SimTrack};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chamber class by chamber number; odd and even GE1/1 chambers differ in length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChamberParity {
    Odd,
    Even,
}

impl ChamberParity {
    pub fn of(chamber: u8) -> Self {
        if chamber % 2 == 1 {
            Self::Odd
        } else {
            Self::Even
        }
    }

    /// Chamber whose geometry stands for the whole class
    pub fn reference_chamber(&self) -> u8 {
        match self {
            Self::Odd => 1,
            Self::Even => 2,
        }
    }
}

impl fmt::Display for ChamberParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Odd => write!(f, "odd"),
            Self::Even => write!(f, "even"),
        }
    }
}

/// Radial position and height of a chamber class (cm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChamberRadialExtent {
    pub radius_center: f64,
    pub chamber_height: f64,
}

impl ChamberRadialExtent {
    pub fn inner_radius(&self) -> f64 {
        self.radius_center - self.chamber_height / 2.0
    }

    pub fn outer_radius(&self) -> f64 {
        self.radius_center + self.chamber_height / 2.0
    }

    pub fn contains(&self, radius: f64) -> bool {
        radius >= self.inner_radius() && radius <= self.outer_radius()
    }
}

#[derive(Debug, Clone)]
struct MatchGeometry {
    odd: ChamberRadialExtent,
    even: ChamberRadialExtent,
    positive_lut: ChamberLut,
    negative_lut: ChamberLut,
}

#[derive(Debug, Clone)]
pub struct GemTrackMatch {
    sim_input_label: String,
    selection: SimTrackSelection,
    phi_binning: PhiBinning,
    geometry: Option<MatchGeometry>,
}

impl Default for GemTrackMatch {
    fn default() -> Self {
        Self::from_config(&TrackMatchConfig::default())
    }
}

impl GemTrackMatch {
    pub fn new(sim_input_label: impl Into<String>, selection: SimTrackSelection) -> Self {
        Self {
            sim_input_label: sim_input_label.into(),
            selection,
            phi_binning: uniform_phi_boundaries,
            geometry: None,
        }
    }

    pub fn from_config(config: &TrackMatchConfig) -> Self {
        Self::new(config.sim_input_label.clone(), SimTrackSelection::from(config))
    }

    /// Replace the phi boundary strategy used by the next `set_geometry`
    pub fn with_phi_binning(mut self, binning: PhiBinning) -> Self {
        self.phi_binning = binning;
        self
    }

    pub fn sim_input_label(&self) -> &str {
        &self.sim_input_label
    }

    pub fn selection(&self) -> SimTrackSelection {
        self.selection
    }

    pub fn is_geometry_set(&self) -> bool {
        self.geometry.is_some()
    }

    /// Derive chamber extents and lookup tables from `geometry`.
    ///
    /// On error the matcher is left without geometry.
    pub fn set_geometry(&mut self, geometry: &dyn GemGeometry) -> Result<()> {
        self.geometry = None;

        let odd = radial_extent(geometry, ChamberParity::Odd)?;
        let even = radial_extent(geometry, ChamberParity::Even)?;

        let n_chambers = geometry.super_chambers_in_first_station();
        let positive_lut = ChamberLut::build(1, n_chambers, self.phi_binning)?;
        let negative_lut = ChamberLut::build(-1, n_chambers, self.phi_binning)?;

        crate::log_geometry!(info, "max chamber",
            max_chamber: n_chambers,
            odd: odd,
            even: even
        );

        self.geometry = Some(MatchGeometry {
            odd,
            even,
            positive_lut,
            negative_lut,
        });
        Ok(())
    }

    /// Pure selection with explicit cuts
    pub fn is_sim_track_good(track: &SimTrack, min_pt: f64, max_eta: f64, min_eta: f64) -> bool {
        super::selection::is_good_sim_track(track, min_pt, max_eta, min_eta)
    }

    /// Selection with the configured cuts
    pub fn accepts(&self, track: &SimTrack) -> bool {
        self.selection.accepts(track)
    }

    /// Simulated tracks of the configured collection that pass the cuts
    pub fn select_good_sim_tracks(&self, event: &Event) -> Result<Vec<SimTrack>> {
        let sim_tracks = event.sim_tracks(&self.sim_input_label)?;
        let selected: Vec<SimTrack> = sim_tracks
            .iter()
            .filter(|track| self.selection.accepts(track))
            .cloned()
            .collect();

        crate::log_geometry!(debug, "sim tracks selected",
            event: event.id(),
            total: sim_tracks.len(),
            selected: selected.len()
        );

        Ok(selected)
    }

    /// Neighbouring chambers around `phi` (degrees) in endcap `region`
    pub fn closest_chambers(&self, region: i32, phi: f64) -> Result<(GemDetId, GemDetId)> {
        self.lut(region)?.closest_chambers(phi)
    }

    pub fn lut(&self, region: i32) -> Result<&ChamberLut> {
        let geometry = self.derived()?;
        match region {
            1 => Ok(&geometry.positive_lut),
            -1 => Ok(&geometry.negative_lut),
            other => Err(MuonRecoError::OutOfRangeQuery(format!(
                "region {other} is not an endcap (expected -1 or 1)"
            ))),
        }
    }

    pub fn radial_extent(&self, parity: ChamberParity) -> Result<ChamberRadialExtent> {
        let geometry = self.derived()?;
        Ok(match parity {
            ChamberParity::Odd => geometry.odd,
            ChamberParity::Even => geometry.even,
        })
    }

    fn derived(&self) -> Result<&MatchGeometry> {
        self.geometry.as_ref().ok_or_else(|| {
            MuonRecoError::OutOfRangeQuery("GEM geometry has not been set".to_string())
        })
    }
}

/// Top of the first present roll to the bottom of the last designed roll
fn radial_extent(geometry: &dyn GemGeometry, parity: ChamberParity) -> Result<ChamberRadialExtent> {
    let chamber_id = GemDetId::new(1, 1, 1, 1, parity.reference_chamber(), 0)?;

    let reference_id = chamber_id.with_roll(1)?;
    let top_roll = match geometry.eta_partition(reference_id) {
        Some(roll) => roll,
        None => {
            crate::log_geometry!(debug, "reference roll missing, trying roll 2",
                chamber: chamber_id.to_string(),
                parity: parity
            );
            let fallback_id = chamber_id.with_roll(2)?;
            geometry.eta_partition(fallback_id).ok_or_else(|| {
                MuonRecoError::GeometryLookupMiss(format!(
                    "neither roll 1 nor roll 2 of {chamber_id} is in the geometry"
                ))
            })?
        }
    };

    let chamber = geometry.chamber(chamber_id).ok_or_else(|| {
        MuonRecoError::GeometryLookupMiss(format!("chamber {chamber_id} is not in the geometry"))
    })?;
    let bottom_id = chamber_id.with_roll(chamber.n_eta_partitions())?;
    let bottom_roll = geometry.eta_partition(bottom_id).ok_or_else(|| {
        MuonRecoError::GeometryLookupMiss(format!("bottom roll {bottom_id} is not in the geometry"))
    })?;

    let top = top_roll.to_global(LocalPoint::new(0.0, top_roll.strip_length() / 2.0, 0.0));
    let bottom = bottom_roll.to_global(LocalPoint::new(0.0, -bottom_roll.strip_length() / 2.0, 0.0));

    Ok(ChamberRadialExtent {
        radius_center: (bottom.perp() + top.perp()) / 2.0,
        chamber_height: top.perp() - bottom.perp(),
    })
}
