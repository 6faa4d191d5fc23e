//! # GEM Geometry Service
//!
//! [`GemGeometry`] is the read-only view of the GEM detector the matching code
//! needs: counts, eta-partition lookup and chamber lookup. Lookups return
//! `None` for detectors that are not part of the geometry; callers decide how to
//! recover.
//!
//! [`RingGemGeometry`] is a concrete geometry of rectangular
//! chambers arranged in one ring, built through [`RingGemGeometryBuilder`]. It
//! can leave out individual eta partitions to model incomplete geometries.

use super::gem_det_id::{GemDetId, MAX_CHAMBER, MAX_ROLL};
use crate::error::{MuonRecoError, Result};
use crate::models::{GlobalPoint, LocalPoint};
use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

/// Distance between the two layers of a super-chamber along z (cm)
const LAYER_SPACING_CM: f64 = 2.5;

pub trait GemGeometry {
    fn region_count(&self) -> usize;

    /// Number of super-chambers in the first station of the first region
    fn super_chambers_in_first_station(&self) -> usize;

    fn eta_partition(&self, id: GemDetId) -> Option<&EtaPartition>;

    /// Chamber containing `id`; the roll of `id` is ignored
    fn chamber(&self, id: GemDetId) -> Option<&GemChamber>;
}

/// One eta partition (roll) of a chamber.
///
/// Local frame: `x` along the strips' measuring direction (increasing phi),
/// `y` radially outwards, `z` away from the interaction point.
#[derive(Debug, Clone, PartialEq)]
pub struct EtaPartition {
    id: GemDetId,
    radius_cm: f64,
    phi: f64,
    z_cm: f64,
    strip_length_cm: f64,
}

impl EtaPartition {
    pub fn new(id: GemDetId, radius_cm: f64, phi: f64, z_cm: f64, strip_length_cm: f64) -> Self {
        Self {
            id,
            radius_cm,
            phi,
            z_cm,
            strip_length_cm,
        }
    }

    pub fn id(&self) -> GemDetId {
        self.id
    }

    pub fn strip_length(&self) -> f64 {
        self.strip_length_cm
    }

    /// Global position of the partition centre
    pub fn position(&self) -> GlobalPoint {
        self.to_global(LocalPoint::default())
    }

    pub fn to_global(&self, local: LocalPoint) -> GlobalPoint {
        let (sin, cos) = self.phi.sin_cos();
        let radius = self.radius_cm + local.y;
        let z_direction = self.z_cm.signum();
        GlobalPoint::new(
            radius * cos - local.x * sin,
            radius * sin + local.x * cos,
            self.z_cm + local.z * z_direction,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GemChamber {
    id: GemDetId,
    n_eta_partitions: u8,
}

impl GemChamber {
    pub fn new(id: GemDetId, n_eta_partitions: u8) -> Self {
        Self {
            id: id.chamber_id(),
            n_eta_partitions,
        }
    }

    pub fn id(&self) -> GemDetId {
        self.id
    }

    /// Designed number of eta partitions, independent of which ones are present
    pub fn n_eta_partitions(&self) -> u8 {
        self.n_eta_partitions
    }
}

/// Radial extent and z position of one chamber type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChamberShape {
    pub inner_radius_cm: f64,
    pub outer_radius_cm: f64,
    pub z_cm: f64,
}

impl ChamberShape {
    pub const fn new(inner_radius_cm: f64, outer_radius_cm: f64, z_cm: f64) -> Self {
        Self {
            inner_radius_cm,
            outer_radius_cm,
            z_cm,
        }
    }

    pub fn height(&self) -> f64 {
        self.outer_radius_cm - self.inner_radius_cm
    }
}

#[derive(Debug, Clone)]
pub struct RingGemGeometry {
    regions: Vec<i8>,
    chambers_per_ring: usize,
    partitions: HashMap<GemDetId, EtaPartition>,
    chambers: HashMap<GemDetId, GemChamber>,
}

impl RingGemGeometry {
    pub fn builder() -> RingGemGeometryBuilder {
        RingGemGeometryBuilder::default()
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }
}

impl GemGeometry for RingGemGeometry {
    fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn super_chambers_in_first_station(&self) -> usize {
        if self.regions.is_empty() {
            0
        } else {
            self.chambers_per_ring
        }
    }

    fn eta_partition(&self, id: GemDetId) -> Option<&EtaPartition> {
        self.partitions.get(&id)
    }

    fn chamber(&self, id: GemDetId) -> Option<&GemChamber> {
        self.chambers.get(&id.chamber_id())
    }
}

/// Builds a single-station, single-ring geometry with two layers per super-chamber.
/// Chamber `c` is centred at phi = (c - 0.5) * 360/N degrees; roll 1 is outermost.
#[derive(Debug, Clone)]
pub struct RingGemGeometryBuilder {
    regions: Vec<i8>,
    chambers_per_ring: u8,
    eta_partitions: u8,
    odd_shape: ChamberShape,
    even_shape: ChamberShape,
    missing_partitions: HashSet<GemDetId>,
}

impl Default for RingGemGeometryBuilder {
    fn default() -> Self {
        Self {
            regions: vec![-1, 1],
            chambers_per_ring: 36,
            eta_partitions: 8,
            odd_shape: ChamberShape::new(130.0, 250.0, 570.0),
            even_shape: ChamberShape::new(130.0, 236.0, 566.0),
            missing_partitions: HashSet::new(),
        }
    }
}

impl RingGemGeometryBuilder {
    pub fn regions(mut self, regions: Vec<i8>) -> Self {
        self.regions = regions;
        self
    }

    pub fn chambers_per_ring(mut self, chambers: u8) -> Self {
        self.chambers_per_ring = chambers;
        self
    }

    pub fn eta_partitions(mut self, partitions: u8) -> Self {
        self.eta_partitions = partitions;
        self
    }

    pub fn odd_shape(mut self, shape: ChamberShape) -> Self {
        self.odd_shape = shape;
        self
    }

    pub fn even_shape(mut self, shape: ChamberShape) -> Self {
        self.even_shape = shape;
        self
    }

    /// Leave a partition out of the built geometry
    pub fn without_partition(mut self, id: GemDetId) -> Self {
        self.missing_partitions.insert(id);
        self
    }

    pub fn build(self) -> Result<RingGemGeometry> {
        if self.chambers_per_ring == 0 || self.chambers_per_ring > MAX_CHAMBER {
            return Err(MuonRecoError::GeometryLookupMiss(format!(
                "chambers per ring must be in [1, {MAX_CHAMBER}], got {}",
                self.chambers_per_ring
            )));
        }
        if self.eta_partitions == 0 || self.eta_partitions > MAX_ROLL {
            return Err(MuonRecoError::GeometryLookupMiss(format!(
                "eta partitions must be in [1, {MAX_ROLL}], got {}",
                self.eta_partitions
            )));
        }
        for shape in [self.odd_shape, self.even_shape] {
            if !(shape.height() > 0.0) || shape.z_cm <= 0.0 {
                return Err(MuonRecoError::GeometryLookupMiss(format!(
                    "invalid chamber shape {shape:?}"
                )));
            }
        }

        let mut partitions = HashMap::new();
        let mut chambers = HashMap::new();
        let chamber_pitch = TAU / f64::from(self.chambers_per_ring);

        for &region in &self.regions {
            for layer in 1..=2u8 {
                for chamber in 1..=self.chambers_per_ring {
                    let shape = if chamber % 2 == 1 {
                        self.odd_shape
                    } else {
                        self.even_shape
                    };
                    let phi = (f64::from(chamber) - 0.5) * chamber_pitch;
                    let z = f64::from(region)
                        * (shape.z_cm + f64::from(layer - 1) * LAYER_SPACING_CM);
                    let roll_height = shape.height() / f64::from(self.eta_partitions);

                    let chamber_id = GemDetId::new(region, 1, 1, layer, chamber, 0)?;
                    chambers.insert(chamber_id, GemChamber::new(chamber_id, self.eta_partitions));

                    for roll in 1..=self.eta_partitions {
                        let id = chamber_id.with_roll(roll)?;
                        if self.missing_partitions.contains(&id) {
                            continue;
                        }
                        let radius = shape.outer_radius_cm - (f64::from(roll) - 0.5) * roll_height;
                        partitions.insert(id, EtaPartition::new(id, radius, phi, z, roll_height));
                    }
                }
            }
        }

        Ok(RingGemGeometry {
            regions: self.regions,
            chambers_per_ring: usize::from(self.chambers_per_ring),
            partitions,
            chambers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_counts() {
        let geometry = RingGemGeometry::builder().build().unwrap();
        assert_eq!(geometry.region_count(), 2);
        assert_eq!(geometry.super_chambers_in_first_station(), 36);
        // 2 regions x 2 layers x 36 chambers x 8 rolls
        assert_eq!(geometry.partition_count(), 1152);
    }

    #[test]
    fn test_roll_one_is_outermost() {
        let geometry = RingGemGeometry::builder().build().unwrap();
        let id = GemDetId::new(1, 1, 1, 1, 1, 1).unwrap();
        let roll = geometry.eta_partition(id).unwrap();

        let top = roll.to_global(LocalPoint::new(0.0, roll.strip_length() / 2.0, 0.0));
        assert!((top.perp() - 250.0).abs() < 1e-9);
        assert!(roll.position().z > 0.0);
        assert_eq!(geometry.chamber(id).unwrap().n_eta_partitions(), 8);
    }

    #[test]
    fn test_negative_region_mirrors_z() {
        let geometry = RingGemGeometry::builder().build().unwrap();
        let id = GemDetId::new(-1, 1, 1, 2, 4, 3).unwrap();
        let roll = geometry.eta_partition(id).unwrap();
        assert!((roll.position().z + 568.5).abs() < 1e-9);
        assert!(roll.to_global(LocalPoint::new(0.0, 0.0, 1.0)).z < roll.position().z);
    }

    #[test]
    fn test_missing_partition_is_absent() {
        let missing = GemDetId::new(1, 1, 1, 1, 1, 1).unwrap();
        let geometry = RingGemGeometry::builder()
            .without_partition(missing)
            .build()
            .unwrap();
        assert!(geometry.eta_partition(missing).is_none());
        assert!(geometry.eta_partition(missing.with_roll(2).unwrap()).is_some());
        assert!(geometry.chamber(missing).is_some());
    }

    #[test]
    fn test_invalid_builder_settings() {
        assert!(RingGemGeometry::builder().chambers_per_ring(0).build().is_err());
        assert!(RingGemGeometry::builder().eta_partitions(13).build().is_err());
        assert!(RingGemGeometry::builder()
            .odd_shape(ChamberShape::new(250.0, 130.0, 570.0))
            .build()
            .is_err());
    }
}
