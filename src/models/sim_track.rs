//! Simulated-truth particle tracks.

use super::kinematics::LorentzVector;
use serde::{Deserialize, Serialize};

/// PDG code of the muon
pub const MUON_PDG_ID: i32 = 13;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimTrack {
    pub track_id: u32,
    /// PDG particle code; negative for antiparticles
    pub particle_type: i32,
    pub momentum: LorentzVector,
    /// Index of the production vertex, if the simulation recorded one
    pub vertex_index: Option<usize>,
    /// Index of the generator particle this track descends from
    pub gen_particle_index: Option<usize>,
}

impl SimTrack {
    pub fn new(track_id: u32, particle_type: i32, momentum: LorentzVector) -> Self {
        Self {
            track_id,
            particle_type,
            momentum,
            vertex_index: None,
            gen_particle_index: None,
        }
    }

    pub fn with_vertex(mut self, vertex_index: usize) -> Self {
        self.vertex_index = Some(vertex_index);
        self
    }

    pub fn with_gen_particle(mut self, gen_particle_index: usize) -> Self {
        self.gen_particle_index = Some(gen_particle_index);
        self
    }

    pub fn no_vertex(&self) -> bool {
        self.vertex_index.is_none()
    }

    pub fn no_genpart(&self) -> bool {
        self.gen_particle_index.is_none()
    }

    pub fn is_muon(&self) -> bool {
        self.particle_type.abs() == MUON_PDG_ID
    }

    pub fn pt(&self) -> f64 {
        self.momentum.pt()
    }

    pub fn eta(&self) -> f64 {
        self.momentum.eta()
    }
}

pub type SimTrackCollection = Vec<SimTrack>;
