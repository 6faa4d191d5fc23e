//! Points, vectors and four-momenta in the detector frames.
//!
//! Lengths are in centimetres, momenta in GeV, angles in radians unless a
//! method name says otherwise.

use serde::{Deserialize, Serialize};

/// Position in the global (CMS) frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Position in the local frame of a detector unit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Direction or momentum in the global frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl GlobalPoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Transverse distance from the beam line
    pub fn perp(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn phi(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn eta(&self) -> f64 {
        pseudorapidity(self.perp(), self.z)
    }

    pub fn mag(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl LocalPoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl GlobalVector {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn perp(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn phi(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn eta(&self) -> f64 {
        pseudorapidity(self.perp(), self.z)
    }

    pub fn mag(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Energy-momentum four-vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LorentzVector {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl LorentzVector {
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Build from (pt, eta, phi, mass)
    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, mass: f64) -> Self {
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let p2 = px * px + py * py + pz * pz;
        Self {
            px,
            py,
            pz,
            e: (p2 + mass * mass).sqrt(),
        }
    }

    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    pub fn eta(&self) -> f64 {
        pseudorapidity(self.pt(), self.pz)
    }

    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }
}

/// eta = asinh(z / r); infinite along the beam line
fn pseudorapidity(perp: f64, z: f64) -> f64 {
    if perp == 0.0 {
        if z == 0.0 {
            return 0.0;
        }
        return f64::INFINITY.copysign(z);
    }
    (z / perp).asinh()
}
