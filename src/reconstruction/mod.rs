//! # Muon Track Reconstruction
//!
//! ```text
//! Event ──seeds──► StandAloneMuonProducer
//!                        │
//!                        ▼
//!                  MuonTrackFinder ──► dyn MuonTrajectoryBuilder (one per producer)
//!                        │
//!                        ▼
//!                  MuonTrackLoader ──► tracks / rec-hits / track extras ──► Event
//! ```

pub mod producer;
pub mod standalone_builder;
pub mod track_finder;
pub mod track_loader;
pub mod trajectory_builder;

pub use producer::StandAloneMuonProducer;
pub use standalone_builder::{StandAloneBuilderConfig, StandAloneMuonTrajectoryBuilder};
pub use track_finder::MuonTrackFinder;
pub use track_loader::{LoadSummary, MuonTrackLoader, TrackProducts};
pub use trajectory_builder::{build_trajectory_builder, MuonTrajectoryBuilder, TrajectoryBuilderKind};
