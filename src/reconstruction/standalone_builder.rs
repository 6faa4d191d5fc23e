//! # Stand-Alone Muon Trajectory Builder
//!
//! Propagates each seed through the cylindrical muon layers of the event setup
//! using a helix in the uniform solenoid field (a straight line for neutral
//! seeds or a vanishing field). Every layer crossing inside the layer
//! half-length becomes a valid rec-hit. The hits lie on the prediction, so the
//! resulting trajectory carries a zero chi2.
//!
//! Parameters (all optional):
//!
//! | key                 | type   | default |
//! |---------------------|--------|---------|
//! | `min_valid_hits`    | int    | 1       |
//! | `hit_resolution_cm` | float  | 0.1     |

use super::trajectory_builder::MuonTrajectoryBuilder;
use crate::config::{ConfigResult, ConfigurationError, ParameterSet};
use crate::error::Result;
use crate::event::{EventId, EventSetup, MagneticField, MuonDetLayer};
use crate::logging::categories;
use crate::models::{
    GlobalPoint, GlobalVector, PropagationDirection, TrackingRecHit, Trajectory,
    TrajectoryContainer, TrajectoryMeasurement, TrajectorySeed,
};
use std::f64::consts::TAU;
use tracing::debug;

/// Seeds sitting this close inside a layer still reach it
const LAYER_TOLERANCE_CM: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct StandAloneBuilderConfig {
    pub min_valid_hits: usize,
    pub hit_resolution_cm: f64,
}

impl Default for StandAloneBuilderConfig {
    fn default() -> Self {
        Self {
            min_valid_hits: 1,
            hit_resolution_cm: 0.1,
        }
    }
}

impl StandAloneBuilderConfig {
    pub fn from_parameters(parameters: &ParameterSet) -> ConfigResult<Self> {
        let defaults = Self::default();
        let config = Self {
            min_valid_hits: parameters.get_or("min_valid_hits", defaults.min_valid_hits)?,
            hit_resolution_cm: parameters
                .get_or("hit_resolution_cm", defaults.hit_resolution_cm)?,
        };

        if config.min_valid_hits == 0 {
            return Err(ConfigurationError::invalid_value(
                format!("{}.min_valid_hits", parameters.label()),
                "0",
                "at least one valid hit is required",
            ));
        }

        if !(config.hit_resolution_cm > 0.0) {
            return Err(ConfigurationError::invalid_value(
                format!("{}.hit_resolution_cm", parameters.label()),
                config.hit_resolution_cm.to_string(),
                "hit resolution must be positive",
            ));
        }

        Ok(config)
    }
}

#[derive(Debug)]
pub struct StandAloneMuonTrajectoryBuilder {
    config: StandAloneBuilderConfig,
    event_id: Option<EventId>,
}

impl StandAloneMuonTrajectoryBuilder {
    pub fn new(config: StandAloneBuilderConfig) -> Self {
        Self {
            config,
            event_id: None,
        }
    }

    pub fn from_parameters(parameters: &ParameterSet) -> ConfigResult<Self> {
        Ok(Self::new(StandAloneBuilderConfig::from_parameters(
            parameters,
        )?))
    }

    pub fn config(&self) -> &StandAloneBuilderConfig {
        &self.config
    }
}

impl MuonTrajectoryBuilder for StandAloneMuonTrajectoryBuilder {
    fn name(&self) -> &'static str {
        "StandAloneMuonTrajectoryBuilder"
    }

    fn set_event(&mut self, event_id: EventId) {
        self.event_id = Some(event_id);
    }

    fn trajectories(
        &mut self,
        seed_index: usize,
        seed: &TrajectorySeed,
        setup: &EventSetup,
    ) -> Result<TrajectoryContainer> {
        let pt = seed.pt();
        if !(pt > 0.0) || !pt.is_finite() {
            debug!(
                target: categories::STANDALONE_TRAJECTORY_BUILDER,
                seed_index = seed_index,
                pt = pt,
                "Seed has no transverse momentum, skipping"
            );
            return Ok(Vec::new());
        }

        let outward = seed.direction == PropagationDirection::AlongMomentum;
        let helix = if outward {
            Helix::new(seed.position, seed.momentum, seed.charge, &setup.magnetic_field)
        } else {
            // Walk backwards by reversing both momentum and charge
            Helix::new(
                seed.position,
                flip(seed.momentum),
                -seed.charge,
                &setup.magnetic_field,
            )
        };

        let start_radius = seed.position.perp();
        let reachable: Vec<&MuonDetLayer> = if outward {
            setup
                .layers()
                .iter()
                .filter(|layer| layer.radius_cm >= start_radius - LAYER_TOLERANCE_CM)
                .collect()
        } else {
            setup
                .layers()
                .iter()
                .rev()
                .filter(|layer| layer.radius_cm <= start_radius + LAYER_TOLERANCE_CM)
                .collect()
        };

        let mut trajectory = Trajectory::new(seed_index, seed.charge);
        for layer in reachable {
            let Some(state) = helix.propagate_to_radius(layer.radius_cm) else {
                continue;
            };
            if !layer.contains_z(state.position.z) {
                continue;
            }

            let momentum = if outward {
                state.momentum
            } else {
                flip(state.momentum)
            };

            trajectory.push(TrajectoryMeasurement {
                position: state.position,
                momentum,
                hit: TrackingRecHit::valid(layer.id, state.position, self.config.hit_resolution_cm),
            });
        }

        if trajectory.valid_hits() < self.config.min_valid_hits {
            debug!(
                target: categories::STANDALONE_TRAJECTORY_BUILDER,
                event = ?self.event_id,
                seed_index = seed_index,
                valid_hits = trajectory.valid_hits(),
                required = self.config.min_valid_hits,
                "Trajectory rejected: not enough valid hits"
            );
            return Ok(Vec::new());
        }

        Ok(vec![trajectory])
    }
}

fn flip(v: GlobalVector) -> GlobalVector {
    GlobalVector::new(-v.x, -v.y, -v.z)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HelixState {
    position: GlobalPoint,
    momentum: GlobalVector,
}

/// Track model projected on the transverse plane
#[derive(Debug, Clone, Copy)]
struct Helix {
    origin: GlobalPoint,
    momentum: GlobalVector,
    pt: f64,
    /// Curvature radius and rotation sense (+1 clockwise seen from +z)
    bending: Option<(f64, f64)>,
}

impl Helix {
    fn new(origin: GlobalPoint, momentum: GlobalVector, charge: i8, field: &MagneticField) -> Self {
        let pt = momentum.perp();
        let bending = field.curvature_radius_cm(pt, charge).map(|radius| {
            let sense = (f64::from(charge) * field.bz_tesla).signum();
            (radius, sense)
        });
        Self {
            origin,
            momentum,
            pt,
            bending,
        }
    }

    fn dz_ds(&self) -> f64 {
        self.momentum.z / self.pt
    }

    fn propagate_to_radius(&self, radius: f64) -> Option<HelixState> {
        match self.bending {
            None => self.straight_to_radius(radius),
            Some((curvature, sense)) => self.circle_to_radius(radius, curvature, sense),
        }
    }

    fn straight_to_radius(&self, radius: f64) -> Option<HelixState> {
        let (ux, uy) = (self.momentum.x / self.pt, self.momentum.y / self.pt);
        let (x0, y0) = (self.origin.x, self.origin.y);

        let b = x0 * ux + y0 * uy;
        let c = x0 * x0 + y0 * y0 - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let s = [-b - root, -b + root]
            .into_iter()
            .filter(|s| *s >= -LAYER_TOLERANCE_CM)
            .fold(f64::INFINITY, f64::min);
        if !s.is_finite() {
            return None;
        }

        Some(HelixState {
            position: GlobalPoint::new(
                x0 + s * ux,
                y0 + s * uy,
                self.origin.z + s * self.dz_ds(),
            ),
            momentum: self.momentum,
        })
    }

    fn circle_to_radius(&self, radius: f64, curvature: f64, sense: f64) -> Option<HelixState> {
        let (ux, uy) = (self.momentum.x / self.pt, self.momentum.y / self.pt);
        let (x0, y0) = (self.origin.x, self.origin.y);

        // Centre lies to the right of the direction of motion for clockwise rotation
        let cx = x0 + sense * curvature * uy;
        let cy = y0 - sense * curvature * ux;
        let d = cx.hypot(cy);

        if d == 0.0 || d > radius + curvature || d < (radius - curvature).abs() {
            return None;
        }

        let a = (radius * radius - curvature * curvature + d * d) / (2.0 * d);
        let h = (radius * radius - a * a).max(0.0).sqrt();
        let (bx, by) = (a * cx / d, a * cy / d);
        let (ox, oy) = (-cy * h / d, cx * h / d);

        let start_angle = (y0 - cy).atan2(x0 - cx);
        let turning = |px: f64, py: f64| {
            let angle = (py - cy).atan2(px - cx);
            let delta = if sense > 0.0 {
                start_angle - angle
            } else {
                angle - start_angle
            };
            let delta = delta.rem_euclid(TAU);
            // A crossing at the start point is reached immediately, not after a full turn
            if TAU - delta < 1e-12 {
                0.0
            } else {
                delta
            }
        };

        let candidates = [(bx + ox, by + oy), (bx - ox, by - oy)];
        let (px, py, delta) = candidates
            .into_iter()
            .map(|(px, py)| (px, py, turning(px, py)))
            .min_by(|a, b| a.2.total_cmp(&b.2))?;

        let arc = curvature * delta;
        let (rx, ry) = ((px - cx) / curvature, (py - cy) / curvature);
        let (tx, ty) = if sense > 0.0 { (ry, -rx) } else { (-ry, rx) };

        Some(HelixState {
            position: GlobalPoint::new(px, py, self.origin.z + arc * self.dz_ds()),
            momentum: GlobalVector::new(tx * self.pt, ty * self.pt, self.momentum.z),
        })
    }
}
