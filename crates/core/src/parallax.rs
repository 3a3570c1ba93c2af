//! Pointer-driven parallax offsets for decorative background layers.
//!
//! Each page stacks a few blurred shapes behind its content; moving the
//! pointer shifts layer `i` by `(pointer - 0.5) * speed(i) * 100` pixels,
//! where the pointer is normalised to `[0, 1]` over the viewport and deeper
//! layers (higher index) move faster.

use glam::DVec2;

/// Speed of the first layer.
const BASE_SPEED: f64 = 0.02;
/// Speed added per layer index.
const SPEED_STEP: f64 = 0.01;
/// Pixels of travel per unit of speed at the viewport edge.
const TRAVEL: f64 = 100.0;

/// Parallax speed factor of layer `index`.
pub fn layer_speed(index: usize) -> f64 {
    BASE_SPEED + SPEED_STEP * index as f64
}

/// Translation for layer `index` given a pointer position in viewport pixels.
///
/// A viewport with a zero or non-finite extent yields no offset on that axis.
pub fn layer_offset(pointer: DVec2, viewport: DVec2, index: usize) -> DVec2 {
    let normalise = |p: f64, extent: f64| {
        if extent.is_finite() && extent > 0.0 {
            p / extent - 0.5
        } else {
            0.0
        }
    };
    let centred = DVec2::new(normalise(pointer.x, viewport.x), normalise(pointer.y, viewport.y));
    centred * layer_speed(index) * TRAVEL
}

/// Offsets for layers `0..count`.
pub fn layer_offsets(pointer: DVec2, viewport: DVec2, count: usize) -> Vec<DVec2> {
    (0..count)
        .map(|i| layer_offset(pointer, viewport, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: DVec2 = DVec2::new(1000.0, 800.0);

    #[test]
    fn centred_pointer_has_no_offset() {
        for offset in layer_offsets(DVec2::new(500.0, 400.0), VIEWPORT, 3) {
            assert_eq!(offset, DVec2::ZERO);
        }
    }

    #[test]
    fn top_left_corner_moves_first_layer_one_pixel() {
        let offset = layer_offset(DVec2::ZERO, VIEWPORT, 0);
        assert!((offset.x + 1.0).abs() < 1e-12, "x = {}", offset.x);
        assert!((offset.y + 1.0).abs() < 1e-12, "y = {}", offset.y);
    }

    #[test]
    fn deeper_layers_move_further() {
        let offsets = layer_offsets(VIEWPORT, VIEWPORT, 3);
        assert!((offsets[0].x - 1.0).abs() < 1e-12);
        assert!((offsets[1].x - 1.5).abs() < 1e-12);
        assert!((offsets[2].x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_viewport_yields_zero_offset() {
        let offset = layer_offset(DVec2::new(10.0, 10.0), DVec2::new(0.0, 800.0), 2);
        assert_eq!(offset.x, 0.0);
        assert!(offset.y.is_finite());
    }

    #[test]
    fn layer_speed_follows_index() {
        assert!((layer_speed(0) - 0.02).abs() < 1e-12);
        assert!((layer_speed(5) - 0.07).abs() < 1e-12);
    }
}
