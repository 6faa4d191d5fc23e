use muon_reco_core::event::{EventSetup, MagneticField, MuonDetLayer};
use muon_reco_core::models::{
    DetLayerId, GlobalPoint, GlobalVector, LorentzVector, MuonSubdetector, SimTrack,
    TrajectorySeed,
};

/// DT barrel with four stations between 400 and 720 cm
pub fn barrel_setup() -> EventSetup {
    [(1, 420.0), (2, 510.0), (3, 610.0), (4, 710.0)]
        .into_iter()
        .fold(EventSetup::new(MagneticField::default()), |setup, (station, radius)| {
            setup.with_layer(MuonDetLayer::new(
                DetLayerId::new(MuonSubdetector::Dt, station),
                radius,
                650.0,
            ))
        })
}

/// Seed just inside the first DT station, heading outwards
pub fn barrel_seed(pt: f64, phi: f64, charge: i8) -> TrajectorySeed {
    let (sin, cos) = phi.sin_cos();
    TrajectorySeed::new(
        GlobalPoint::new(400.0 * cos, 400.0 * sin, 10.0),
        GlobalVector::new(pt * cos, pt * sin, 0.1 * pt),
        charge,
        DetLayerId::new(MuonSubdetector::Dt, 1),
    )
}

/// Generator-linked muon with a production vertex
pub fn sim_muon(track_id: u32, pt: f64, eta: f64) -> SimTrack {
    SimTrack::new(track_id, 13, LorentzVector::from_pt_eta_phi_m(pt, eta, 0.5, 0.1057))
        .with_vertex(0)
        .with_gen_particle(track_id as usize)
}
