//! GEM track matching against a mock geometry
//!
//! The mock implements `GemGeometry` directly so tests control exactly which
//! eta partitions and chambers resolve.

mod common;

use common::*;
use muon_reco_core::event::{Event, EventId};
use muon_reco_core::models::GlobalPoint;
use muon_reco_core::validation::{
    ChamberParity, EtaPartition, GemChamber, GemDetId, GemGeometry, GemTrackMatch,
    SimTrackSelection,
};
use muon_reco_core::{MuonRecoError, TrackMatchConfig};
use std::collections::HashMap;

/// Two reference chambers per endcap with hand-placed rolls
struct MockGemGeometry {
    super_chambers: usize,
    partitions: HashMap<GemDetId, EtaPartition>,
    chambers: HashMap<GemDetId, GemChamber>,
}

impl MockGemGeometry {
    /// Rolls of height 10 cm from `top` downwards, at phi = 0
    fn new(super_chambers: usize, rolls: u8, top: f64) -> Self {
        let mut geometry = Self {
            super_chambers,
            partitions: HashMap::new(),
            chambers: HashMap::new(),
        };
        for chamber in [1u8, 2] {
            let chamber_id = GemDetId::new(1, 1, 1, 1, chamber, 0).unwrap();
            geometry
                .chambers
                .insert(chamber_id, GemChamber::new(chamber_id, rolls));
            for roll in 1..=rolls {
                let id = chamber_id.with_roll(roll).unwrap();
                let radius = top - 5.0 - 10.0 * f64::from(roll - 1);
                geometry
                    .partitions
                    .insert(id, EtaPartition::new(id, radius, 0.0, 570.0, 10.0));
            }
        }
        geometry
    }

    fn without(mut self, chamber: u8, roll: u8) -> Self {
        self.partitions
            .remove(&GemDetId::new(1, 1, 1, 1, chamber, roll).unwrap());
        self
    }
}

impl GemGeometry for MockGemGeometry {
    fn region_count(&self) -> usize {
        2
    }

    fn super_chambers_in_first_station(&self) -> usize {
        self.super_chambers
    }

    fn eta_partition(&self, id: GemDetId) -> Option<&EtaPartition> {
        self.partitions.get(&id)
    }

    fn chamber(&self, id: GemDetId) -> Option<&GemChamber> {
        self.chambers.get(&id.chamber_id())
    }
}

#[test]
fn radial_extent_spans_first_to_last_roll() {
    let mut matcher = GemTrackMatch::default();
    matcher.set_geometry(&MockGemGeometry::new(4, 8, 250.0)).unwrap();

    let odd = matcher.radial_extent(ChamberParity::Odd).unwrap();
    assert!((odd.chamber_height - 80.0).abs() < 1e-9);
    assert!((odd.radius_center - 210.0).abs() < 1e-9);
    assert_eq!(
        matcher.radial_extent(ChamberParity::Even).unwrap(),
        odd,
        "identical mock chambers"
    );
}

#[test]
fn odd_constants_fall_back_to_roll_two() {
    let geometry = MockGemGeometry::new(4, 8, 250.0).without(1, 1);
    let mut matcher = GemTrackMatch::default();
    matcher.set_geometry(&geometry).unwrap();

    let odd = matcher.radial_extent(ChamberParity::Odd).unwrap();
    let even = matcher.radial_extent(ChamberParity::Even).unwrap();
    assert!((odd.outer_radius() - 240.0).abs() < 1e-9);
    assert!((even.outer_radius() - 250.0).abs() < 1e-9);
}

#[test]
fn unresolvable_reference_chamber_is_geometry_miss() {
    let geometry = MockGemGeometry::new(4, 8, 250.0).without(1, 1).without(1, 2);
    let mut matcher = GemTrackMatch::default();

    let err = matcher.set_geometry(&geometry).unwrap_err();
    assert!(matches!(err, MuonRecoError::GeometryLookupMiss(_)));
}

#[test]
fn missing_bottom_roll_is_geometry_miss() {
    let geometry = MockGemGeometry::new(4, 8, 250.0).without(2, 8);
    let mut matcher = GemTrackMatch::default();
    assert!(matches!(
        matcher.set_geometry(&geometry),
        Err(MuonRecoError::GeometryLookupMiss(_))
    ));
}

#[test]
fn zero_super_chambers_is_geometry_miss() {
    let mut matcher = GemTrackMatch::default();
    assert!(matcher.set_geometry(&MockGemGeometry::new(0, 8, 250.0)).is_err());
    assert!(!matcher.is_geometry_set());
}

#[test]
fn closest_chambers_for_four_chamber_ring() {
    let mut matcher = GemTrackMatch::default();
    matcher.set_geometry(&MockGemGeometry::new(4, 8, 250.0)).unwrap();

    let chambers = |phi: f64| {
        let (first, second) = matcher.closest_chambers(1, phi).unwrap();
        (first.chamber(), second.chamber())
    };
    assert_eq!(chambers(45.0), (1, 2));
    assert_eq!(chambers(0.0), (1, 2));
    assert_eq!(chambers(359.0), (4, 1));
    assert!(matches!(
        matcher.closest_chambers(1, 360.0),
        Err(MuonRecoError::OutOfRangeQuery(_))
    ));
}

#[test]
fn second_geometry_replaces_first() {
    let mut matcher = GemTrackMatch::default();
    matcher.set_geometry(&MockGemGeometry::new(4, 8, 250.0)).unwrap();
    matcher.set_geometry(&MockGemGeometry::new(6, 4, 200.0)).unwrap();

    let lut = matcher.lut(-1).unwrap();
    assert_eq!(lut.chamber_count(), 6);
    assert_eq!(lut.phi_boundaries().len(), 7);
    assert_eq!(lut.chamber_ids()[0].chamber(), 6);

    let odd = matcher.radial_extent(ChamberParity::Odd).unwrap();
    assert!((odd.chamber_height - 40.0).abs() < 1e-9);
}

#[test]
fn custom_phi_binning_is_used() {
    fn shifted(n: usize) -> Vec<f64> {
        (0..=n).map(|i| -5.0 + i as f64 * 360.0 / n as f64).collect()
    }

    let mut matcher = GemTrackMatch::default().with_phi_binning(shifted);
    matcher.set_geometry(&MockGemGeometry::new(4, 8, 250.0)).unwrap();

    let (first, _) = matcher.closest_chambers(1, 87.0).unwrap();
    assert_eq!(first.chamber(), 2);
}

#[test]
fn good_sim_tracks_selected_from_event() {
    let config = TrackMatchConfig {
        sim_input_label: "g4SimHits".to_string(),
        min_pt: 2.0,
        ..TrackMatchConfig::default()
    };
    let matcher = GemTrackMatch::from_config(&config);
    assert_eq!(matcher.selection(), SimTrackSelection::new(2.0, 2.45, 1.55));

    let mut unlinked = sim_muon(4, 20.0, 2.0);
    unlinked.gen_particle_index = None;
    let tracks = vec![
        sim_muon(1, 20.0, 2.0),
        sim_muon(2, 1.0, 2.0),
        sim_muon(3, 20.0, 0.3),
        unlinked,
        sim_muon(5, 3.0, -1.8),
    ];
    let event = Event::new(EventId::new(1, 1, 1)).with_sim_tracks("g4SimHits", tracks);

    let selected: Vec<u32> = matcher
        .select_good_sim_tracks(&event)
        .unwrap()
        .iter()
        .map(|track| track.track_id)
        .collect();
    assert_eq!(selected, vec![1, 5]);
}

#[test]
fn radial_extent_contains_roll_centres() {
    let mut matcher = GemTrackMatch::default();
    let geometry = MockGemGeometry::new(4, 8, 250.0);
    matcher.set_geometry(&geometry).unwrap();

    let odd = matcher.radial_extent(ChamberParity::Odd).unwrap();
    for roll in 1..=8u8 {
        let id = GemDetId::new(1, 1, 1, 1, 1, roll).unwrap();
        let centre: GlobalPoint = geometry.eta_partition(id).unwrap().position();
        assert!(odd.contains(centre.perp()), "roll {roll} outside extent");
    }
}
