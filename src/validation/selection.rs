//! Simulated-track selection for GEM validation.

use crate::config::TrackMatchConfig;
use crate::models::SimTrack;
use serde::{Deserialize, Serialize};

/// Kinematic cuts applied to simulated tracks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimTrackSelection {
    pub min_pt: f64,
    pub max_eta: f64,
    pub min_eta: f64,
}

impl SimTrackSelection {
    pub fn new(min_pt: f64, max_eta: f64, min_eta: f64) -> Self {
        Self {
            min_pt,
            max_eta,
            min_eta,
        }
    }

    pub fn accepts(&self, track: &SimTrack) -> bool {
        is_good_sim_track(track, self.min_pt, self.max_eta, self.min_eta)
    }
}

impl Default for SimTrackSelection {
    fn default() -> Self {
        Self::from(&TrackMatchConfig::default())
    }
}

impl From<&TrackMatchConfig> for SimTrackSelection {
    fn from(config: &TrackMatchConfig) -> Self {
        Self::new(config.min_pt, config.max_eta, config.min_eta)
    }
}

/// True for a generator-linked muon with a production vertex inside the pt and
/// |eta| window. A NaN pt or eta never passes.
pub fn is_good_sim_track(track: &SimTrack, min_pt: f64, max_eta: f64, min_eta: f64) -> bool {
    if track.no_vertex() || track.no_genpart() {
        return false;
    }
    if !track.is_muon() {
        return false;
    }
    if !(track.pt() >= min_pt) {
        return false;
    }

    let abs_eta = track.eta().abs();
    abs_eta <= max_eta && abs_eta >= min_eta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LorentzVector;

    fn muon(pt: f64, eta: f64) -> SimTrack {
        SimTrack::new(1, 13, LorentzVector::from_pt_eta_phi_m(pt, eta, 0.3, 0.105))
            .with_vertex(0)
            .with_gen_particle(0)
    }

    #[test]
    fn test_accepts_linked_muon_in_window() {
        assert!(is_good_sim_track(&muon(5.0, 1.0), 0.0, 2.4, 0.0));
        assert!(is_good_sim_track(&muon(5.0, -1.0), 0.0, 2.4, 0.0));
    }

    #[test]
    fn test_requires_vertex_and_gen_particle() {
        let no_vertex = SimTrack::new(1, 13, LorentzVector::from_pt_eta_phi_m(5.0, 1.0, 0.0, 0.105))
            .with_gen_particle(0);
        let no_genpart = SimTrack::new(1, -13, LorentzVector::from_pt_eta_phi_m(5.0, 1.0, 0.0, 0.105))
            .with_vertex(0);
        assert!(!is_good_sim_track(&no_vertex, 0.0, 2.4, 0.0));
        assert!(!is_good_sim_track(&no_genpart, 0.0, 2.4, 0.0));
    }

    #[test]
    fn test_rejects_electrons_and_low_pt() {
        let mut electron = muon(5.0, 1.0);
        electron.particle_type = 11;
        assert!(!is_good_sim_track(&electron, 0.0, 2.4, 0.0));
        assert!(!is_good_sim_track(&muon(0.5, 1.0), 1.0, 2.4, 0.0));
    }

    #[test]
    fn test_eta_window_is_on_absolute_eta() {
        let selection = SimTrackSelection::new(1.0, 2.45, 1.55);
        assert!(selection.accepts(&muon(10.0, -2.0)));
        assert!(!selection.accepts(&muon(10.0, 1.0)));
        assert!(!selection.accepts(&muon(10.0, -2.6)));
    }

    #[test]
    fn test_selection_from_config() {
        let selection = SimTrackSelection::from(&TrackMatchConfig::default());
        assert_eq!(selection, SimTrackSelection::new(5.0, 2.45, 1.55));
        assert_eq!(SimTrackSelection::default(), selection);
    }
}
