//! `Surface` backed by a Canvas 2D context.

use glam::DVec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};
use zettacars_ui_core::color::Hsla;
use zettacars_ui_core::{Surface, SurfaceSize, Viewport};

use crate::dom;

pub struct CanvasSurface {
    window: Window,
    canvas: HtmlCanvasElement,
    /// `None` when the browser refuses a 2D context; drawing becomes a no-op.
    ctx: Option<CanvasRenderingContext2d>,
}

impl CanvasSurface {
    pub fn new(window: Window, canvas: HtmlCanvasElement) -> Self {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        if ctx.is_none() {
            log::warn!("canvas 2d context unavailable; particles will not draw");
        }
        Self {
            window,
            canvas,
            ctx,
        }
    }
}

impl Surface for CanvasSurface {
    fn viewport(&self) -> Viewport {
        let extent = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport::new(
            extent(self.window.inner_width()),
            extent(self.window.inner_height()),
            self.window.device_pixel_ratio(),
        )
    }

    fn resize(&mut self, size: &SurfaceSize) {
        self.canvas.set_width(size.backing_width());
        self.canvas.set_height(size.backing_height());
        dom::set_style(&self.canvas, "width", &format!("{}px", size.css_width));
        dom::set_style(&self.canvas, "height", &format!("{}px", size.css_height));
    }

    fn clear(&mut self, width: f64, height: f64) {
        if let Some(ctx) = &self.ctx {
            ctx.clear_rect(0.0, 0.0, width, height);
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Hsla) {
        let Some(ctx) = &self.ctx else { return };
        ctx.set_stroke_style_str(&color.to_css());
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke();
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Hsla) {
        let Some(ctx) = &self.ctx else { return };
        ctx.set_fill_style_str(&color.to_css());
        ctx.begin_path();
        if ctx.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            ctx.fill();
        }
    }
}
