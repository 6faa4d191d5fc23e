use muon_reco_core::models::{LorentzVector, SimTrack};
use proptest::prelude::*;

/// Number of super-chambers in a ring
pub fn chamber_count_strategy() -> impl Strategy<Value = usize> {
    1usize..=36
}

/// Azimuth in degrees, kept clear of the 360 degree boundary
pub fn phi_degrees_strategy() -> impl Strategy<Value = f64> {
    0.0f64..359.9
}

/// Simulated tracks with arbitrary linkage, species and kinematics
pub fn sim_track_strategy() -> impl Strategy<Value = SimTrack> {
    (
        prop_oneof![Just(13i32), Just(-13), Just(11), Just(211)],
        0.1f64..100.0,
        -3.0f64..3.0,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(particle_type, pt, eta, has_vertex, has_genpart)| {
            let mut track = SimTrack::new(1, particle_type, LorentzVector::from_pt_eta_phi_m(pt, eta, 0.0, 0.1));
            if has_vertex {
                track = track.with_vertex(0);
            }
            if has_genpart {
                track = track.with_gen_particle(0);
            }
            track
        })
}
