//! [`DrawSurface`] over a host-supplied 2D canvas.

use constellation_core::color::Rgba;
use constellation_core::surface::DrawSurface;
use glam::DVec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A canvas element and its 2D context.
///
/// Style strings are cached so a frame of same-colored particles sets the
/// fill style once.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    fill_style: String,
    stroke_style: String,
}

impl CanvasSurface {
    /// Wraps `canvas`, or returns `None` if it has no 2D context.
    pub fn acquire(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            fill_style: String::new(),
            stroke_style: String::new(),
        })
    }

    fn set_fill(&mut self, color: Rgba) {
        let css = color.to_css();
        if css != self.fill_style {
            self.ctx.set_fill_style_str(&css);
            self.fill_style = css;
        }
    }

    fn set_stroke(&mut self, color: Rgba) {
        let css = color.to_css();
        if css != self.stroke_style {
            self.ctx.set_stroke_style_str(&css);
            self.stroke_style = css;
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.set_fill(color);
        self.ctx.begin_path();
        // arc only fails for a negative radius
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.set_stroke(color);
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}
