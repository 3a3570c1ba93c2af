//! CPU drawing surface backed by an RGBA8 pixel buffer.
//!
//! [`Raster`] implements [`DrawSurface`] with straight-alpha source-over
//! blending, so the field can be rendered without a browser: snapshots,
//! previews, tests. Shapes are sampled at pixel centres with no
//! anti-aliasing.

use constellation_core::color::{Rgba, Srgb};
use constellation_core::error::FieldError;
use constellation_core::surface::DrawSurface;
use glam::DVec2;

/// An RGBA8 image that the field renderer can draw into.
///
/// The buffer length is `width * height * 4`, row-major from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
    background: Option<Srgb>,
}

impl Raster {
    /// Creates a fully transparent raster.
    ///
    /// Returns `FieldError::InvalidDimensions` if either extent is zero or
    /// the buffer size overflows `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, FieldError> {
        let invalid = || FieldError::InvalidDimensions {
            width: width as f64,
            height: height as f64,
        };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(invalid)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
            background: None,
        })
    }

    /// Sets an opaque background that `clear_rect` paints instead of
    /// transparency, and fills the whole raster with it.
    pub fn with_background(mut self, background: Srgb) -> Self {
        self.background = Some(background);
        self.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
        self
    }

    pub fn width_px(&self) -> u32 {
        self.width
    }

    pub fn height_px(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// RGBA of pixel `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x as usize, y as usize);
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    fn index(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * 4
    }

    /// Pixel columns and rows whose centres may fall in `[min, max]`.
    fn pixel_span(&self, min: DVec2, max: DVec2) -> Option<(usize, usize, usize, usize)> {
        let clamp = |v: f64, extent: u32| v.max(0.0).min(extent as f64) as usize;
        let (x0, x1) = (clamp(min.x.floor(), self.width), clamp(max.x.ceil(), self.width));
        let (y0, y1) = (clamp(min.y.floor(), self.height), clamp(max.y.ceil(), self.height));
        (x0 < x1 && y0 < y1).then_some((x0, x1, y0, y1))
    }

    /// Composites `color` over pixel `(x, y)` at the given alpha.
    fn blend(&mut self, x: usize, y: usize, color: Srgb, alpha: f64) {
        if alpha <= 0.0 {
            return;
        }
        let i = self.index(x, y);
        let dst_a = self.data[i + 3] as f64 / 255.0;
        let out_a = alpha + dst_a * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }
        for (offset, src) in [color.r, color.g, color.b].into_iter().enumerate() {
            let dst = self.data[i + offset] as f64 / 255.0;
            let out = (src * alpha + dst * dst_a * (1.0 - alpha)) / out_a;
            self.data[i + offset] = to_byte(out);
        }
        self.data[i + 3] = to_byte(out_a);
    }
}

fn to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Centre of pixel `(x, y)`.
fn centre(x: usize, y: usize) -> DVec2 {
    DVec2::new(x as f64 + 0.5, y as f64 + 0.5)
}

/// Shortest distance from `p` to the segment `a`-`b`.
fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl DrawSurface for Raster {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some((x0, x1, y0, y1)) =
            self.pixel_span(DVec2::new(x, y), DVec2::new(x + width, y + height))
        else {
            return;
        };
        let fill = match self.background {
            Some(bg) => {
                let [r, g, b] = bg.to_u8();
                [r, g, b, 255]
            }
            None => [0; 4],
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let i = self.index(px, py);
                self.data[i..i + 4].copy_from_slice(&fill);
            }
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        let reach = DVec2::splat(radius);
        let Some((x0, x1, y0, y1)) = self.pixel_span(center - reach, center + reach) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                if centre(px, py).distance(center) <= radius {
                    self.blend(px, py, color.color, color.alpha);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        if !(width > 0.0) {
            return;
        }
        // Hairlines are drawn one pixel wide and faded by their width.
        let half = width.max(1.0) / 2.0;
        let alpha = color.alpha * width.min(1.0);
        let reach = DVec2::splat(half);
        let Some((x0, x1, y0, y1)) = self.pixel_span(from.min(to) - reach, from.max(to) + reach)
        else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                if distance_to_segment(centre(px, py), from, to) <= half {
                    self.blend(px, py, color.color, alpha);
                }
            }
        }
    }
}
