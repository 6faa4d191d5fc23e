//! # Chamber Phi Lookup Tables
//!
//! Maps an azimuthal angle (degrees) to the pair of neighbouring chambers that
//! cover it. A table holds N+1 ascending phi boundaries and the chamber id at
//! each boundary: `[chamber N, chamber 1, ..., chamber N]`, where the leading
//! entry stands for the wrap-around below the first boundary.
//!
//! Boundaries come from a [`PhiBinning`] strategy. The default,
//! [`uniform_phi_boundaries`], assumes chambers evenly spaced at 360/N degrees
//! rather than reading their actual phi positions from the geometry.

use super::gem_det_id::GemDetId;
use crate::error::{MuonRecoError, Result};

/// Produces N+1 non-decreasing phi boundaries (degrees) for N chambers
pub type PhiBinning = fn(usize) -> Vec<f64>;

/// `b[0] = 0`, `b[i] = i * 360/N`
pub fn uniform_phi_boundaries(n_chambers: usize) -> Vec<f64> {
    if n_chambers == 0 {
        return vec![0.0];
    }
    let pitch = 360.0 / n_chambers as f64;
    (0..=n_chambers).map(|i| i as f64 * pitch).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChamberLut {
    region: i8,
    phi_boundaries: Vec<f64>,
    chamber_ids: Vec<GemDetId>,
}

impl ChamberLut {
    /// Table for `region` over `n_chambers` chambers of ring 1, station 1, layer 1
    pub fn build(region: i8, n_chambers: usize, binning: PhiBinning) -> Result<Self> {
        if n_chambers == 0 {
            return Err(MuonRecoError::GeometryLookupMiss(
                "no super-chambers in the first station".to_string(),
            ));
        }

        let phi_boundaries = binning(n_chambers);
        if phi_boundaries.len() != n_chambers + 1 {
            return Err(MuonRecoError::GeometryLookupMiss(format!(
                "phi binning produced {} boundaries for {} chambers",
                phi_boundaries.len(),
                n_chambers
            )));
        }
        if phi_boundaries.iter().any(|phi| !phi.is_finite())
            || phi_boundaries.windows(2).any(|pair| pair[1] < pair[0])
        {
            return Err(MuonRecoError::GeometryLookupMiss(
                "phi boundaries must be finite and non-decreasing".to_string(),
            ));
        }

        let chamber_number = |chamber: usize| {
            u8::try_from(chamber).map_err(|_| {
                MuonRecoError::GeometryLookupMiss(format!("chamber number {chamber} out of range"))
            })
        };
        let reference_id = |chamber: usize| GemDetId::new(region, 1, 1, 1, chamber_number(chamber)?, 1);

        let mut chamber_ids = Vec::with_capacity(n_chambers + 1);
        chamber_ids.push(reference_id(n_chambers)?);
        for chamber in 1..=n_chambers {
            chamber_ids.push(reference_id(chamber)?);
        }

        Ok(Self {
            region,
            phi_boundaries,
            chamber_ids,
        })
    }

    pub fn region(&self) -> i8 {
        self.region
    }

    pub fn phi_boundaries(&self) -> &[f64] {
        &self.phi_boundaries
    }

    pub fn chamber_ids(&self) -> &[GemDetId] {
        &self.chamber_ids
    }

    pub fn chamber_count(&self) -> usize {
        self.chamber_ids.len() - 1
    }

    /// Chamber at the first boundary strictly above `phi`, and its successor
    pub fn closest_chambers(&self, phi: f64) -> Result<(GemDetId, GemDetId)> {
        if !phi.is_finite() {
            return Err(MuonRecoError::OutOfRangeQuery(format!(
                "phi {phi} is not a finite angle"
            )));
        }

        let upper = self.phi_boundaries.partition_point(|boundary| *boundary <= phi);
        let first = self.chamber_ids.get(upper).ok_or_else(|| {
            MuonRecoError::OutOfRangeQuery(format!(
                "phi {phi} beyond last boundary {}",
                self.phi_boundaries[self.phi_boundaries.len() - 1]
            ))
        })?;
        let second = self.chamber_ids[(upper + 1) % self.chamber_count()];

        Ok((*first, second))
    }
}
