//! The drawing-surface seam between the field renderer and its host.
//!
//! The host page owns the surface and hands it to the renderer; the renderer
//! never looks a surface up by itself. Browser hosts wrap a 2D canvas
//! context, the raster crate draws into a pixel buffer, and
//! [`RecordingSurface`] keeps the draw calls for inspection.

use crate::color::Rgba;
use glam::DVec2;
use serde::Serialize;

/// The 2D drawing operations the field renderer needs.
///
/// This trait is **object-safe**: the renderer draws through
/// `&mut dyn DrawSurface`.
pub trait DrawSurface {
    /// Current surface width in pixels.
    fn width(&self) -> f64;

    /// Current surface height in pixels.
    fn height(&self) -> f64;

    /// Erases the given rectangle.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fills a circle.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);

    /// Strokes a straight segment with the given color and line width.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    StrokeLine {
        from: DVec2,
        to: DVec2,
        color: Rgba,
        width: f64,
    },
}

/// A surface that records draw calls instead of producing pixels.
///
/// A `clear_rect` covering the whole surface starts a new frame: the previous
/// frame's commands are discarded, so [`commands`](Self::commands) always
/// holds at most one frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Changes the reported size, as a host resize would.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Commands recorded since the last full clear (inclusive).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of full-surface clears seen so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let covers_all = x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height;
        if covers_all {
            self.commands.clear();
            self.frames += 1;
        }
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            color,
            width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Rgba {
        Rgba::from_u8(255, 255, 255, 1.0)
    }

    #[test]
    fn surface_trait_is_object_safe() {
        let mut surface = RecordingSurface::new(10.0, 20.0);
        let dyn_surface: &mut dyn DrawSurface = &mut surface;
        assert_eq!(dyn_surface.width(), 10.0);
        assert_eq!(dyn_surface.height(), 20.0);
        dyn_surface.fill_circle(DVec2::ZERO, 1.0, white());
        assert_eq!(surface.commands().len(), 1);
    }

    #[test]
    fn full_clear_starts_new_frame() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.clear_rect(0.0, 0.0, 100.0, 100.0);
        surface.fill_circle(DVec2::new(5.0, 5.0), 2.0, white());
        surface.clear_rect(0.0, 0.0, 100.0, 100.0);
        assert_eq!(surface.frames(), 2);
        assert_eq!(surface.commands().len(), 1);
        assert_eq!(surface.circles().count(), 0);
    }

    #[test]
    fn partial_clear_is_recorded_without_new_frame() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.fill_circle(DVec2::new(5.0, 5.0), 2.0, white());
        surface.clear_rect(10.0, 10.0, 5.0, 5.0);
        assert_eq!(surface.frames(), 0);
        assert_eq!(surface.commands().len(), 2);
    }

    #[test]
    fn filters_split_circles_and_lines() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.fill_circle(DVec2::ZERO, 1.0, white());
        surface.stroke_line(DVec2::ZERO, DVec2::ONE, white(), 0.5);
        surface.fill_circle(DVec2::ONE, 1.0, white());
        assert_eq!(surface.circles().count(), 2);
        assert_eq!(surface.lines().count(), 1);
    }

    #[test]
    fn resize_changes_reported_size() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.resize(300.0, 200.0);
        assert_eq!((surface.width(), surface.height()), (300.0, 200.0));
    }

    #[test]
    fn commands_serialize_with_op_tag() {
        let cmd = DrawCommand::StrokeLine {
            from: DVec2::new(1.0, 2.0),
            to: DVec2::new(3.0, 4.0),
            color: Rgba::from_u8(16, 185, 129, 0.05),
            width: 0.5,
        };
        let v = serde_json::to_value(&cmd).unwrap();
        assert_eq!(v["op"], "stroke_line");
        assert_eq!(v["from"], serde_json::json!([1.0, 2.0]));
        assert_eq!(v["color"], "rgba(16, 185, 129, 0.05)");
    }
}
