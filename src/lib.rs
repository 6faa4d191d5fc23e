#![allow(clippy::doc_markdown)] // Allow technical terms like GEMTrackMatch, GE1/1 in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Muon Reco Core Rust
//!
//! Muon reconstruction and GEM validation building blocks.
//!
//! ## Overview
//!
//! Two independent pieces share one event model, configuration layer and
//! logging setup:
//!
//! - **Stand-alone muon reconstruction**: a producer that reads muon seeds from
//!   the event, grows them into trajectories through a pluggable trajectory
//!   builder and publishes tracks, rec-hits and track extras.
//! - **GEM track matching**: derives chamber radial extents and phi lookup
//!   tables from the GEM geometry, selects simulated muons, and answers
//!   closest-chamber queries.
//!
//! ## Module Organization
//!
//! - [`config`] - Parameter sets and file/environment configuration loading
//! - [`error`] - Structured error handling
//! - [`event`] - Event store and event setup (magnetic field, detector layers)
//! - [`logging`] - Structured logging with message-logger categories
//! - [`models`] - Seeds, trajectories, tracks and simulated tracks
//! - [`reconstruction`] - Stand-alone muon producer and trajectory builders
//! - [`validation`] - GEM identifiers, geometry and track matching
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use muon_reco_core::config::ConfigManager;
//! use muon_reco_core::event::{Event, EventId, EventSetup};
//! use muon_reco_core::reconstruction::StandAloneMuonProducer;
//! use muon_reco_core::validation::{GemTrackMatch, RingGemGeometry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! muon_reco_core::logging::init_structured_logging();
//! let manager = ConfigManager::load()?;
//!
//! let mut producer = StandAloneMuonProducer::new(&manager.producer_parameters()?)?;
//! let mut event = Event::new(EventId::new(1, 1, 1)).with_seeds("MuonSeed", Vec::new());
//! producer.produce(&mut event, &EventSetup::default())?;
//!
//! let mut matcher = GemTrackMatch::from_config(&manager.track_match_config()?);
//! matcher.set_geometry(&RingGemGeometry::builder().build()?)?;
//! let (first, second) = matcher.closest_chambers(1, 42.0)?;
//! println!("phi 42 lies between {first} and {second}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib                         # Unit tests
//! cargo test                               # All tests
//! cargo bench --features benchmarks        # Criterion benchmarks
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod models;
pub mod reconstruction;
pub mod validation;

pub use config::{ConfigManager, ConfigurationError, ParameterSet, TrackMatchConfig};
pub use error::{MuonRecoError, Result};
pub use event::{Event, EventId, EventSetup, ProductKind};
pub use reconstruction::{MuonTrajectoryBuilder, StandAloneMuonProducer};
pub use validation::{GemDetId, GemGeometry, GemTrackMatch};
