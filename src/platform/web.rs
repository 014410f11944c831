//! Browser implementations of the drawing surface and frame scheduler

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use crate::driver::{FrameHandle, FrameScheduler};
use crate::render::Surface;
use crate::sim::{Bounds, Color};

/// [`Surface`] backed by a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, bounds: &Bounds) {
        self.ctx
            .clear_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_err()
        {
            // Negative radius; nothing sensible to draw
            return;
        }
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn fill_text(&mut self, text: &str, center: Vec2, font_px: f32, color: Color) {
        self.ctx.set_font(&format!("{}px Arial", font_px));
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(text, center.x as f64, center.y as f64);
    }
}

/// Shared slot holding the per-frame callback handed to the browser
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// [`FrameScheduler`] on top of `requestAnimationFrame`
pub struct RafScheduler {
    callback: FrameCallback,
}

impl RafScheduler {
    /// The callback slot is filled after the driver exists, since the
    /// callback itself needs the driver.
    pub fn new(callback: FrameCallback) -> Self {
        Self { callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let window = web_sys::window()?;
        let slot = self.callback.borrow();
        let closure = slot.as_ref()?;
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.cancel_animation_frame(handle.0) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }
}

/// Size the canvas to the window and return the new world bounds
pub fn fit_canvas_to_window(canvas: &HtmlCanvasElement) -> Bounds {
    let (width, height) = web_sys::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            (width, height)
        })
        .unwrap_or((800.0, 600.0));
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    Bounds::new(width as f32, height as f32)
}

/// Show the restart control with the final score on it
pub fn show_restart(button: &HtmlElement, text: &str) {
    if let Err(e) = button.style().set_property("visibility", "visible") {
        log::warn!("Failed to show restart control: {:?}", e);
    }
    button.set_inner_text(text);
}
