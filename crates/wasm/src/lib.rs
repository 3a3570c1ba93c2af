#![deny(unsafe_code)]
//! WASM bindings for the constellation background.
//!
//! A page passes its own canvas element to
//! [`ConstellationBackground::activate`]; the returned object keeps the field
//! animating via `requestAnimationFrame` until `deactivate()` or `free()`.

mod canvas;
mod frame;

use canvas::CanvasSurface;
use constellation_core::field::FieldParams;
use constellation_core::parallax::layer_offsets;
use constellation_core::{Animation, PagePreset, Xorshift64};
use frame::RafScheduler;
use glam::DVec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

type Task = Animation<CanvasSurface, RafScheduler>;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// A running constellation on one canvas.
#[wasm_bindgen]
pub struct ConstellationBackground {
    task: Rc<RefCell<Task>>,
}

#[wasm_bindgen]
impl ConstellationBackground {
    /// Starts a field sized to the canvas's current width and height.
    ///
    /// `params` is an optional JSON object of field overrides and `seed` an
    /// optional PRNG seed. Returns `undefined` if the canvas has no 2D context
    /// or no area; throws on malformed or out-of-range parameters.
    pub fn activate(
        canvas: HtmlCanvasElement,
        params: Option<String>,
        seed: Option<u64>,
    ) -> Result<Option<ConstellationBackground>, JsValue> {
        let params = match params {
            Some(json) => {
                let value: serde_json::Value = serde_json::from_str(&json)
                    .map_err(|e| JsValue::from_str(&format!("invalid params JSON: {e}")))?;
                FieldParams::from_json(&value)
            }
            None => FieldParams::default(),
        };

        let Some(window) = web_sys::window() else {
            return Ok(None);
        };
        let Some(surface) = CanvasSurface::acquire(canvas) else {
            log::debug!("canvas has no 2d context; constellation not started");
            return Ok(None);
        };

        let task = Animation::new(surface, RafScheduler::new(window), params)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let task = Rc::new(RefCell::new(task));

        let weak = Rc::downgrade(&task);
        let on_frame = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            if let Some(task) = weak.upgrade() {
                if let Ok(mut task) = task.try_borrow_mut() {
                    task.on_frame();
                }
            }
        });
        task.borrow_mut().scheduler_mut().set_callback(on_frame);

        let mut rng = Xorshift64::new(seed.unwrap_or_else(entropy_seed));
        if !task.borrow_mut().start(&mut rng) {
            return Ok(None);
        }
        Ok(Some(ConstellationBackground { task }))
    }

    /// Cancels the pending frame and drops the particles. Idempotent.
    pub fn deactivate(&self) {
        if let Ok(mut task) = self.task.try_borrow_mut() {
            task.stop();
        }
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.task.borrow().is_active()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.task.borrow().field().map_or(0, |f| f.len())
    }

    #[wasm_bindgen(js_name = framesDrawn)]
    pub fn frames_drawn(&self) -> f64 {
        self.task.borrow().frames_drawn() as f64
    }
}

/// Flattened `[x0, y0, x1, y1, ...]` translations for `count` parallax layers.
#[wasm_bindgen(js_name = parallaxOffsets)]
pub fn parallax_offsets(
    pointer_x: f64,
    pointer_y: f64,
    viewport_width: f64,
    viewport_height: f64,
    count: usize,
) -> Vec<f64> {
    layer_offsets(
        DVec2::new(pointer_x, pointer_y),
        DVec2::new(viewport_width, viewport_height),
        count,
    )
    .into_iter()
    .flat_map(|o| [o.x, o.y])
    .collect()
}

/// Canvas element id used by a page preset, or `undefined` if unknown.
#[wasm_bindgen(js_name = presetCanvasId)]
pub fn preset_canvas_id(name: &str) -> Option<String> {
    PagePreset::from_name(name)
        .ok()
        .map(|p| p.canvas_id().to_string())
}

fn entropy_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallax_offsets_are_flattened_per_layer() {
        let flat = parallax_offsets(0.0, 800.0, 1000.0, 800.0, 3);
        assert_eq!(flat.len(), 6);
        // Pointer at the bottom-left corner: x pulls left, y pushes down.
        let expected = [-1.0, 1.0, -1.5, 1.5, -2.0, 2.0];
        for (got, want) in flat.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{flat:?}");
        }
    }

    #[test]
    fn parallax_offsets_for_no_layers_is_empty() {
        assert!(parallax_offsets(10.0, 10.0, 100.0, 100.0, 0).is_empty());
    }

    #[test]
    fn preset_canvas_ids_resolve_by_page() {
        assert_eq!(preset_canvas_id("home").as_deref(), Some("constellation-canvas"));
        assert_eq!(
            preset_canvas_id("contact").as_deref(),
            Some("contact-constellation-canvas")
        );
        assert_eq!(preset_canvas_id("blog"), None);
    }
}
