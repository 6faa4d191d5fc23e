//! # GEM Validation Support
//!
//! Geometry-derived helpers for GEM validation analyzers:
//!
//! - [`gem_det_id`] - GEM detector identifiers and raw-id packing
//! - [`gem_geometry`] - read-only geometry service and a ring-shaped implementation
//! - [`phi_lut`] - phi-to-chamber lookup tables
//! - [`selection`] - simulated-muon selection cuts
//! - [`track_match`] - [`GemTrackMatch`], tying the above together

pub mod gem_det_id;
pub mod gem_geometry;
pub mod phi_lut;
pub mod selection;
pub mod track_match;

pub use gem_det_id::GemDetId;
pub use gem_geometry::{
    ChamberShape, EtaPartition, GemChamber, GemGeometry, RingGemGeometry, RingGemGeometryBuilder,
};
pub use phi_lut::{uniform_phi_boundaries, ChamberLut, PhiBinning};
pub use selection::{is_good_sim_track, SimTrackSelection};
pub use track_match::{ChamberParity, ChamberRadialExtent, GemTrackMatch};
