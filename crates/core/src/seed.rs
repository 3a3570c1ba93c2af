//! Reproducible description of a headless render.
//!
//! A [`FieldSeed`] captures everything needed to redraw the same frames:
//! page preset, surface size, parameter overrides, PRNG seed and frame count.

use crate::animation::Animation;
use crate::error::FieldError;
use crate::field::FieldParams;
use crate::preset::PagePreset;
use crate::prng::Xorshift64;
use crate::scheduler::ManualScheduler;
use crate::surface::DrawSurface;
use serde::{Deserialize, Serialize};

/// Reproducible render specification.
///
/// Two identical `FieldSeed` values produce identical particle layouts and
/// identical frames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSeed {
    pub preset: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl FieldSeed {
    /// Creates a seed with no overrides (`{}`) and zero frames.
    pub fn new(preset: &str, width: u32, height: u32, seed: u64) -> Self {
        Self {
            preset: preset.to_string(),
            width,
            height,
            params: empty_params(),
            seed,
            frames: 0,
        }
    }

    /// Checks the preset name, the surface size and the resolved parameters.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::InvalidDimensions {
                width: self.width as f64,
                height: self.height as f64,
            });
        }
        self.field_params()?.validate()
    }

    /// The preset's parameters with this seed's overrides applied.
    pub fn field_params(&self) -> Result<FieldParams, FieldError> {
        let preset = PagePreset::from_name(&self.preset)?;
        Ok(preset.params().merged(&self.params))
    }

    /// Activates a field on `surface` and fires `frames` frames headlessly.
    ///
    /// The returned task is still active, with one frame pending. The surface
    /// must be exactly `width x height`; any other size, including an empty
    /// surface, is reported as `FieldError::InvalidDimensions`.
    pub fn play<S: DrawSurface>(
        &self,
        surface: S,
    ) -> Result<Animation<S, ManualScheduler>, FieldError> {
        self.validate()?;
        let (width, height) = (surface.width(), surface.height());
        if width != self.width as f64 || height != self.height as f64 {
            return Err(FieldError::InvalidDimensions { width, height });
        }
        let mut animation = Animation::new(surface, ManualScheduler::new(), self.field_params()?)?;
        if !animation.start(&mut Xorshift64::new(self.seed)) {
            return Err(FieldError::InvalidDimensions { width, height });
        }
        animation.pump(self.frames);
        Ok(animation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn new_creates_seed_with_default_params_and_frames() {
        let s = FieldSeed::new("home", 1280, 720, 42);
        assert_eq!(s.preset, "home");
        assert_eq!((s.width, s.height), (1280, 720));
        assert_eq!(s.seed, 42);
        assert_eq!(s.frames, 0);
        assert_eq!(s.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut s = FieldSeed::new("contact", 800, 600, 99);
        s.params = serde_json::json!({"particle_count": 80, "connection_distance": 120.0});
        s.frames = 240;

        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: FieldSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn missing_params_and_frames_default() {
        let s: FieldSeed =
            serde_json::from_str(r#"{"preset": "skills", "width": 10, "height": 10, "seed": 1}"#)
                .unwrap();
        assert_eq!(s.params, serde_json::json!({}));
        assert_eq!(s.frames, 0);
    }

    #[test]
    fn field_params_applies_overrides() {
        let mut s = FieldSeed::new("project", 800, 600, 1);
        s.params = serde_json::json!({"particle_count": 5});
        let p = s.field_params().unwrap();
        assert_eq!(p.particle_count, 5);
        assert_eq!(p.connection_distance, 150.0);
    }

    #[test]
    fn validate_succeeds_for_valid_seed() {
        assert!(FieldSeed::new("home", 800, 600, 42).validate().is_ok());
    }

    #[test]
    fn validate_fails_for_zero_dimensions() {
        assert!(FieldSeed::new("home", 0, 600, 42).validate().is_err());
        assert!(FieldSeed::new("home", 800, 0, 42).validate().is_err());
    }

    #[test]
    fn validate_fails_for_unknown_preset() {
        assert!(matches!(
            FieldSeed::new("blog", 800, 600, 42).validate(),
            Err(FieldError::UnknownPreset(_))
        ));
    }

    #[test]
    fn validate_fails_for_bad_override() {
        let mut s = FieldSeed::new("home", 800, 600, 42);
        s.params = serde_json::json!({"max_speed": -3.0});
        assert!(matches!(s.validate(), Err(FieldError::InvalidParam { .. })));
    }

    // ---- Headless playback ----

    #[test]
    fn play_fires_requested_frames() {
        let mut s = FieldSeed::new("home", 320, 240, 7);
        s.frames = 12;
        let anim = s.play(RecordingSurface::new(320.0, 240.0)).unwrap();
        assert_eq!(anim.frames_drawn(), 12);
        assert_eq!(anim.surface().frames(), 12);
        assert!(anim.pending_frame().is_some());
    }

    #[test]
    fn play_is_reproducible() {
        let mut s = FieldSeed::new("skills", 320, 240, 11);
        s.frames = 30;
        let a = s.play(RecordingSurface::new(320.0, 240.0)).unwrap();
        let b = s.play(RecordingSurface::new(320.0, 240.0)).unwrap();
        assert_eq!(a.surface().commands(), b.surface().commands());
    }

    #[test]
    fn play_rejects_surface_of_another_size() {
        let s = FieldSeed::new("home", 320, 240, 1);
        match s.play(RecordingSurface::new(640.0, 480.0)) {
            Err(FieldError::InvalidDimensions { width, height }) => {
                assert_eq!((width, height), (640.0, 480.0));
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("mismatched surface accepted"),
        }
    }

    #[test]
    fn play_reports_empty_surface() {
        let s = FieldSeed::new("home", 320, 240, 1);
        assert!(matches!(
            s.play(RecordingSurface::new(0.0, 0.0)),
            Err(FieldError::InvalidDimensions { .. })
        ));
    }
}
