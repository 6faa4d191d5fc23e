//! # Event Data Models
//!
//! Plain data carried between the event store, the reconstruction chain and the
//! validation code: seeds, trajectories, tracks and simulated tracks.

pub mod kinematics;
pub mod seed;
pub mod sim_track;
pub mod track;
pub mod trajectory;

pub use kinematics::{GlobalPoint, GlobalVector, LocalPoint, LorentzVector};
pub use seed::{DetLayerId, MuonSubdetector, PropagationDirection, SeedCollection, TrajectorySeed};
pub use sim_track::{SimTrack, SimTrackCollection, MUON_PDG_ID};
pub use track::{
    RecHitCollection, Track, TrackCollection, TrackExtra, TrackExtraCollection, TrackingRecHit,
};
pub use trajectory::{Trajectory, TrajectoryContainer, TrajectoryMeasurement};
