#![deny(unsafe_code)]
//! Core types for the constellation background effect.
//!
//! Provides the `Particle` model, the `ParticleField` renderer, the
//! `DrawSurface` and `FrameScheduler` seams a host implements, the
//! `Animation` task tying them together, `FieldParams` configuration,
//! `Srgb`/`Rgba` colors, the `RandomSource` trait with `Xorshift64`,
//! page presets and parallax helpers.

pub mod animation;
pub mod color;
pub mod error;
pub mod field;
pub mod parallax;
pub mod params;
pub mod particle;
pub mod preset;
pub mod prng;
pub mod scheduler;
pub mod seed;
pub mod surface;

pub use animation::Animation;
pub use color::{Rgba, Srgb};
pub use error::FieldError;
pub use field::{FieldParams, Link, ParticleField};
pub use particle::Particle;
pub use preset::PagePreset;
pub use prng::{RandomSource, Xorshift64};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use seed::FieldSeed;
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
