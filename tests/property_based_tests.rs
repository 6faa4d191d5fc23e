mod common;

use common::strategies::*;
use muon_reco_core::validation::{
    is_good_sim_track, uniform_phi_boundaries, ChamberLut, GemDetId,
};
use proptest::prelude::*;

proptest! {
    /// Property: uniform boundaries start at 0, end at 360 and step by 360/N
    #[test]
    fn uniform_boundaries_are_evenly_spaced(n in chamber_count_strategy()) {
        let boundaries = uniform_phi_boundaries(n);
        prop_assert_eq!(boundaries.len(), n + 1);
        prop_assert_eq!(boundaries[0], 0.0);
        prop_assert!((boundaries[n] - 360.0).abs() < 1e-9);
        for (i, boundary) in boundaries.iter().enumerate() {
            prop_assert!((boundary - i as f64 * 360.0 / n as f64).abs() < 1e-9);
        }
        prop_assert!(boundaries.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    /// Property: the returned pair are neighbours and bracket phi from above
    #[test]
    fn closest_chambers_are_adjacent(n in chamber_count_strategy(), phi in phi_degrees_strategy()) {
        let lut = ChamberLut::build(1, n, uniform_phi_boundaries).unwrap();
        let (first, second) = lut.closest_chambers(phi).unwrap();

        let first_chamber = usize::from(first.chamber());
        prop_assert_eq!(usize::from(second.chamber()), first_chamber % n + 1);
        prop_assert!(lut.phi_boundaries()[first_chamber] > phi);
        prop_assert!(lut.phi_boundaries()[first_chamber - 1] <= phi);
    }

    /// Property: both endcaps share chamber numbering and differ only in region
    #[test]
    fn endcap_tables_mirror_each_other(n in chamber_count_strategy(), phi in phi_degrees_strategy()) {
        let positive = ChamberLut::build(1, n, uniform_phi_boundaries).unwrap();
        let negative = ChamberLut::build(-1, n, uniform_phi_boundaries).unwrap();

        let (p_first, p_second) = positive.closest_chambers(phi).unwrap();
        let (n_first, n_second) = negative.closest_chambers(phi).unwrap();
        prop_assert_eq!(p_first.chamber(), n_first.chamber());
        prop_assert_eq!(p_second.chamber(), n_second.chamber());
        prop_assert_eq!(n_first.region(), -1);
    }

    /// Property: accepted tracks always satisfy every individual cut
    #[test]
    fn accepted_sim_tracks_pass_each_cut(track in sim_track_strategy()) {
        let (min_pt, max_eta, min_eta) = (5.0, 2.45, 1.55);
        if is_good_sim_track(&track, min_pt, max_eta, min_eta) {
            prop_assert!(!track.no_vertex());
            prop_assert!(!track.no_genpart());
            prop_assert_eq!(track.particle_type.abs(), 13);
            prop_assert!(track.pt() >= min_pt);
            prop_assert!(track.eta().abs() >= min_eta && track.eta().abs() <= max_eta);
        }
    }

    /// Property: raw ids decode back to the same detector
    #[test]
    fn raw_ids_are_reversible(
        region in prop_oneof![Just(-1i8), Just(0), Just(1)],
        ring in 1u8..=3,
        station in 1u8..=3,
        layer in 0u8..=2,
        chamber in 1u8..=36,
        roll in 0u8..=12,
    ) {
        let id = GemDetId::new(region, ring, station, layer, chamber, roll).unwrap();
        prop_assert_eq!(GemDetId::from_raw(id.raw_id()).unwrap(), id);
    }
}
