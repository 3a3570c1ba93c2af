//! A single drifting point of the constellation.

use crate::field::FieldParams;
use crate::prng::RandomSource;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One point of the field.
///
/// Velocity is chosen once at creation; afterwards its components only ever
/// change sign, when the particle reflects off an edge of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
}

impl Particle {
    pub fn new(position: DVec2, velocity: DVec2, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Draws a particle uniformly inside `[0, bounds.x) x [0, bounds.y)`.
    ///
    /// Values are drawn in the order x, y, radius, vx, vy so a given random
    /// sequence always lays out the same field.
    pub fn random(bounds: DVec2, params: &FieldParams, rng: &mut dyn RandomSource) -> Self {
        let half_speed = params.max_speed / 2.0;
        let position = DVec2::new(rng.next_range(0.0, bounds.x), rng.next_range(0.0, bounds.y));
        let radius = rng.next_range(params.min_radius, params.max_radius);
        let velocity = DVec2::new(
            rng.next_range(-half_speed, half_speed),
            rng.next_range(-half_speed, half_speed),
        );
        Self::new(position, velocity, radius)
    }

    /// Moves the particle by its velocity, reflecting off the edges of
    /// `[0, bounds.x] x [0, bounds.y]`.
    pub fn advance(&mut self, bounds: DVec2) {
        let next = self.position + self.velocity;
        let (x, vx) = reflect_axis(next.x, self.velocity.x, bounds.x);
        let (y, vy) = reflect_axis(next.y, self.velocity.y, bounds.y);
        self.position = DVec2::new(x, y);
        self.velocity = DVec2::new(vx, vy);
    }

    /// True if the position lies inside the closed rectangle `[0, bounds]`.
    pub fn is_within(&self, bounds: DVec2) -> bool {
        (0.0..=bounds.x).contains(&self.position.x) && (0.0..=bounds.y).contains(&self.position.y)
    }
}

/// Reflects one coordinate that may have left `[0, extent]`.
///
/// The overshoot is mirrored back across the crossed edge, then clamped so a
/// step larger than the extent still lands inside.
fn reflect_axis(coord: f64, velocity: f64, extent: f64) -> (f64, f64) {
    if coord < 0.0 {
        ((-coord).min(extent), -velocity)
    } else if coord > extent {
        ((2.0 * extent - coord).max(0.0), -velocity)
    } else {
        (coord, velocity)
    }
}
