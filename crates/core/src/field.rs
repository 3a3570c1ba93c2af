//! The particle field renderer.
//!
//! A [`ParticleField`] owns a fixed set of [`Particle`]s over a rectangle the
//! size of the host's drawing surface at activation time. Each call to
//! [`ParticleField::advance_frame`] clears the surface, draws and moves every
//! particle, then joins every pair of particles closer than the connection
//! distance with a line that fades out linearly towards the threshold.
//!
//! The pair pass is an exhaustive O(n²) sweep over unordered pairs. Fields
//! are small (50 particles by default) and the visible threshold behaviour
//! depends on every pair being tested exactly once per frame.

use crate::color::{Rgba, Srgb};
use crate::error::FieldError;
use crate::params::{param_f64, param_rgba, param_srgb, param_usize};
use crate::particle::Particle;
use crate::prng::RandomSource;
use crate::surface::DrawSurface;
use glam::DVec2;
use serde::Serialize;
use serde_json::{json, Value};

/// Default number of particles per field.
pub const DEFAULT_PARTICLE_COUNT: usize = 50;
/// Largest accepted particle count. Each frame tests every pair.
pub const MAX_PARTICLE_COUNT: usize = 10_000;
/// Default distance below which two particles are joined.
pub const DEFAULT_CONNECTION_DISTANCE: f64 = 150.0;
/// Default speed range; each velocity component lies in `[-max/2, max/2)`.
pub const DEFAULT_MAX_SPEED: f64 = 0.5;
/// Default smallest particle radius (inclusive).
pub const DEFAULT_MIN_RADIUS: f64 = 1.0;
/// Default largest particle radius (exclusive).
pub const DEFAULT_MAX_RADIUS: f64 = 3.0;
/// Opacity of a link between two coincident particles.
pub const DEFAULT_LINK_MAX_OPACITY: f64 = 0.1;
/// Stroke width of a link between two coincident particles.
pub const DEFAULT_LINK_MAX_WIDTH: f64 = 1.0;

/// Emerald, `#10b981`.
const EMERALD: (u8, u8, u8) = (16, 185, 129);
const PARTICLE_ALPHA: f64 = 0.3;

/// Tunable parameters for a particle field.
///
/// [`Default`] reproduces the portfolio pages' background: 50 emerald
/// particles, links under 150 px, speeds up to 0.25 px per frame per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub particle_count: usize,
    pub connection_distance: f64,
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Fill for particle dots.
    pub particle_color: Rgba,
    /// Stroke color for links; alpha comes from the link strength.
    pub link_color: Srgb,
    pub link_max_opacity: f64,
    pub link_max_width: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        let (r, g, b) = EMERALD;
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            connection_distance: DEFAULT_CONNECTION_DISTANCE,
            max_speed: DEFAULT_MAX_SPEED,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            particle_color: Rgba::from_u8(r, g, b, PARTICLE_ALPHA),
            link_color: Srgb::from_u8(r, g, b),
            link_max_opacity: DEFAULT_LINK_MAX_OPACITY,
            link_max_width: DEFAULT_LINK_MAX_WIDTH,
        }
    }
}

impl FieldParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self::default().merged(params)
    }

    /// Returns a copy with any keys present in `params` overriding `self`.
    ///
    /// Missing or mistyped keys keep the current value.
    pub fn merged(&self, params: &Value) -> Self {
        Self {
            particle_count: param_usize(params, "particle_count", self.particle_count),
            connection_distance: param_f64(params, "connection_distance", self.connection_distance),
            max_speed: param_f64(params, "max_speed", self.max_speed),
            min_radius: param_f64(params, "min_radius", self.min_radius),
            max_radius: param_f64(params, "max_radius", self.max_radius),
            particle_color: param_rgba(params, "particle_color", self.particle_color),
            link_color: param_srgb(params, "link_color", self.link_color),
            link_max_opacity: param_f64(params, "link_max_opacity", self.link_max_opacity),
            link_max_width: param_f64(params, "link_max_width", self.link_max_width),
        }
    }

    /// Checks every numeric parameter against its allowed range.
    pub fn validate(&self) -> Result<(), FieldError> {
        let invalid = |name: &str, reason: &str| {
            Err(FieldError::InvalidParam {
                name: name.to_string(),
                reason: reason.to_string(),
            })
        };

        if self.particle_count > MAX_PARTICLE_COUNT {
            return invalid("particle_count", &format!("must be at most {MAX_PARTICLE_COUNT}"));
        }
        if !(self.connection_distance.is_finite() && self.connection_distance > 0.0) {
            return invalid("connection_distance", "must be positive and finite");
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return invalid("max_speed", "must be non-negative and finite");
        }
        if !(self.min_radius.is_finite() && self.min_radius >= 0.0) {
            return invalid("min_radius", "must be non-negative and finite");
        }
        if !(self.max_radius.is_finite() && self.max_radius >= self.min_radius) {
            return invalid("max_radius", "must be finite and at least min_radius");
        }
        if !(0.0..=1.0).contains(&self.link_max_opacity) {
            return invalid("link_max_opacity", "must lie in [0, 1]");
        }
        if !(self.link_max_width.is_finite() && self.link_max_width >= 0.0) {
            return invalid("link_max_width", "must be non-negative and finite");
        }
        Ok(())
    }

    /// Current parameter values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "particle_count": self.particle_count,
            "connection_distance": self.connection_distance,
            "max_speed": self.max_speed,
            "min_radius": self.min_radius,
            "max_radius": self.max_radius,
            "particle_color": self.particle_color,
            "link_color": self.link_color,
            "link_max_opacity": self.link_max_opacity,
            "link_max_width": self.link_max_width,
        })
    }

    /// Schema describing all parameters, their types, ranges, and defaults.
    pub fn schema() -> Value {
        let defaults = Self::default();
        json!({
            "particle_count": {
                "type": "integer",
                "default": DEFAULT_PARTICLE_COUNT,
                "min": 0,
                "max": MAX_PARTICLE_COUNT,
                "description": "Number of particles, fixed for the lifetime of a field"
            },
            "connection_distance": {
                "type": "number",
                "default": DEFAULT_CONNECTION_DISTANCE,
                "min": 0.0,
                "description": "Pairs closer than this are joined by a line"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "description": "Velocity components are drawn from [-max_speed/2, max_speed/2)"
            },
            "min_radius": {
                "type": "number",
                "default": DEFAULT_MIN_RADIUS,
                "min": 0.0,
                "description": "Smallest particle radius (inclusive)"
            },
            "max_radius": {
                "type": "number",
                "default": DEFAULT_MAX_RADIUS,
                "min": 0.0,
                "description": "Largest particle radius (exclusive)"
            },
            "particle_color": {
                "type": "color",
                "default": defaults.particle_color,
                "description": "Particle fill, as rgba(...) or #rrggbb[aa]"
            },
            "link_color": {
                "type": "color",
                "default": defaults.link_color,
                "description": "Link stroke color as #rrggbb; alpha follows link strength"
            },
            "link_max_opacity": {
                "type": "number",
                "default": DEFAULT_LINK_MAX_OPACITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Link opacity at distance 0"
            },
            "link_max_width": {
                "type": "number",
                "default": DEFAULT_LINK_MAX_WIDTH,
                "min": 0.0,
                "description": "Link stroke width at distance 0"
            }
        })
    }
}

/// A line drawn between two particles in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Link {
    /// Index of the first particle; always less than `b`.
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
    pub width: f64,
}

/// Linear falloff `1 - distance / connection_distance`, floored at zero.
///
/// 1 for coincident particles, exactly 0 at the threshold.
pub fn link_weight(distance: f64, connection_distance: f64) -> f64 {
    (1.0 - distance / connection_distance).max(0.0)
}

/// Strength of the link between two positions, or `None` when they are at
/// least `connection_distance` apart.
///
/// Symmetric in `a` and `b`.
pub fn link_strength(a: DVec2, b: DVec2, connection_distance: f64) -> Option<f64> {
    let distance = a.distance(b);
    (distance < connection_distance).then(|| link_weight(distance, connection_distance))
}

/// A live set of particles bound to one drawing surface.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: DVec2,
    params: FieldParams,
}

impl ParticleField {
    /// Creates `params.particle_count` random particles over a
    /// `width x height` surface.
    ///
    /// Returns `FieldError::InvalidDimensions` if either extent is zero,
    /// negative or non-finite, and `FieldError::InvalidParam` if `params`
    /// fail validation.
    pub fn activate(
        width: f64,
        height: f64,
        params: &FieldParams,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, FieldError> {
        let bounds = checked_bounds(width, height)?;
        params.validate()?;
        let particles = (0..params.particle_count)
            .map(|_| Particle::random(bounds, params, rng))
            .collect();
        Ok(Self {
            particles,
            bounds,
            params: *params,
        })
    }

    /// Creates a field from explicit particles, bypassing randomness.
    ///
    /// `params.particle_count` is ignored; the field holds exactly the
    /// particles given. Particles outside the surface are rejected.
    pub fn from_particles(
        width: f64,
        height: f64,
        params: &FieldParams,
        particles: Vec<Particle>,
    ) -> Result<Self, FieldError> {
        let bounds = checked_bounds(width, height)?;
        params.validate()?;
        if let Some(index) = particles.iter().position(|p| !p.is_within(bounds)) {
            return Err(FieldError::InvalidParam {
                name: "particles".into(),
                reason: format!("particle {index} lies outside the {width} x {height} surface"),
            });
        }
        let params = FieldParams {
            particle_count: particles.len(),
            ..*params
        };
        Ok(Self {
            particles,
            bounds,
            params,
        })
    }

    /// Renders one frame onto `surface` and advances the simulation.
    ///
    /// Clears the whole surface, draws each particle at its current position
    /// and then moves it, then strokes every link between the moved
    /// positions.
    pub fn advance_frame(&mut self, surface: &mut dyn DrawSurface) {
        surface.clear_rect(0.0, 0.0, surface.width(), surface.height());

        for particle in &mut self.particles {
            surface.fill_circle(particle.position, particle.radius, self.params.particle_color);
            particle.advance(self.bounds);
        }

        for link in self.links() {
            surface.stroke_line(
                self.particles[link.a].position,
                self.particles[link.b].position,
                self.params.link_color.with_alpha(link.opacity),
                link.width,
            );
        }
    }

    /// Every link between the current positions, ordered by `(a, b)`.
    pub fn links(&self) -> Vec<Link> {
        let cutoff = self.params.connection_distance;
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                if let Some(strength) = link_strength(a.position, b.position, cutoff) {
                    links.push(Link {
                        a: i,
                        b: j,
                        distance: a.position.distance(b.position),
                        opacity: self.params.link_max_opacity * strength,
                        width: self.params.link_max_width * strength,
                    });
                }
            }
        }
        links
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Surface size captured at activation.
    pub fn bounds(&self) -> DVec2 {
        self.bounds
    }

    pub fn field_params(&self) -> &FieldParams {
        &self.params
    }

    /// Current parameter values as a JSON object.
    pub fn params(&self) -> Value {
        self.params.to_json()
    }

    /// See [`FieldParams::schema`].
    pub fn param_schema(&self) -> Value {
        FieldParams::schema()
    }
}

fn checked_bounds(width: f64, height: f64) -> Result<DVec2, FieldError> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if usable(width) && usable(height) {
        Ok(DVec2::new(width, height))
    } else {
        Err(FieldError::InvalidDimensions { width, height })
    }
}
