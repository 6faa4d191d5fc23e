//! Per-run context handed to reconstruction: magnetic field and the muon
//! detector layers trajectories are propagated through.

use crate::models::DetLayerId;
use serde::{Deserialize, Serialize};

/// Conversion constant between GeV, tesla and metres
const GEV_PER_TESLA_METRE: f64 = 0.299_792_458;

/// Uniform solenoid field along +z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagneticField {
    pub bz_tesla: f64,
}

impl MagneticField {
    pub const fn uniform(bz_tesla: f64) -> Self {
        Self { bz_tesla }
    }

    /// Radius of curvature (cm) of a particle with transverse momentum `pt` (GeV).
    /// `None` when the particle does not bend.
    pub fn curvature_radius_cm(&self, pt: f64, charge: i8) -> Option<f64> {
        let bending = GEV_PER_TESLA_METRE * f64::from(charge).abs() * self.bz_tesla.abs();
        if bending == 0.0 || pt <= 0.0 {
            return None;
        }
        Some(100.0 * pt / bending)
    }
}

impl Default for MagneticField {
    fn default() -> Self {
        Self::uniform(3.8)
    }
}

/// Barrel-like cylindrical detector layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuonDetLayer {
    pub id: DetLayerId,
    pub radius_cm: f64,
    pub half_length_cm: f64,
}

impl MuonDetLayer {
    pub const fn new(id: DetLayerId, radius_cm: f64, half_length_cm: f64) -> Self {
        Self {
            id,
            radius_cm,
            half_length_cm,
        }
    }

    pub fn contains_z(&self, z: f64) -> bool {
        z.abs() <= self.half_length_cm
    }
}

/// Geometry and field context for one event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSetup {
    pub magnetic_field: MagneticField,
    layers: Vec<MuonDetLayer>,
}

impl EventSetup {
    pub fn new(magnetic_field: MagneticField) -> Self {
        Self {
            magnetic_field,
            layers: Vec::new(),
        }
    }

    /// Add a layer, keeping layers ordered by radius
    pub fn with_layer(mut self, layer: MuonDetLayer) -> Self {
        let position = self
            .layers
            .partition_point(|existing| existing.radius_cm <= layer.radius_cm);
        self.layers.insert(position, layer);
        self
    }

    /// Layers in ascending radius
    pub fn layers(&self) -> &[MuonDetLayer] {
        &self.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MuonSubdetector;

    #[test]
    fn test_curvature_radius() {
        let field = MagneticField::uniform(2.0);
        let radius = field.curvature_radius_cm(0.299_792_458 * 2.0, 1).unwrap();
        assert!((radius - 100.0).abs() < 1e-9);
        assert!(field.curvature_radius_cm(10.0, 0).is_none());
        assert!(MagneticField::uniform(0.0)
            .curvature_radius_cm(10.0, -1)
            .is_none());
    }

    #[test]
    fn test_layers_kept_sorted() {
        let setup = EventSetup::default()
            .with_layer(MuonDetLayer::new(
                DetLayerId::new(MuonSubdetector::Dt, 3),
                600.0,
                650.0,
            ))
            .with_layer(MuonDetLayer::new(
                DetLayerId::new(MuonSubdetector::Dt, 1),
                420.0,
                650.0,
            ));

        let radii: Vec<f64> = setup.layers().iter().map(|l| l.radius_cm).collect();
        assert_eq!(radii, vec![420.0, 600.0]);
    }
}
