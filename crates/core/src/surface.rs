//! Drawable surface abstraction and density-aware sizing.
//!
//! Animations draw through the object-safe [`Surface`] trait so the same
//! simulation runs against a browser canvas or the [`HeadlessSurface`]
//! recorder used by tests and the CLI.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Hsla;

/// Default cap on device pixel ratio; bounds per-frame cost on dense displays.
pub const DEFAULT_MAX_PIXEL_RATIO: f64 = 2.0;

/// Host viewport as reported by the environment.
///
/// `width`/`height` are CSS pixels (`innerWidth`/`innerHeight`);
/// `device_pixel_ratio` is the raw, uncapped ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

/// Backing-store and display dimensions derived from a [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    /// Capped pixel ratio actually applied.
    pub pixel_ratio: f64,
    /// Simulation bounds in device pixels, at least 1.
    pub width: f64,
    pub height: f64,
    /// Logical (CSS) display size.
    pub css_width: f64,
    pub css_height: f64,
}

impl SurfaceSize {
    /// Computes sizing for `viewport`, capping the ratio at `max_ratio`.
    ///
    /// A missing (zero, negative or non-finite) ratio reads as 1.0 and
    /// negative or non-finite viewport extents read as 0.
    pub fn from_viewport(viewport: Viewport, max_ratio: f64) -> Self {
        let raw = viewport.device_pixel_ratio;
        let ratio = if raw.is_finite() && raw > 0.0 { raw } else { 1.0 };
        let pixel_ratio = ratio.min(max_ratio.max(1.0));
        let css_width = sanitize_extent(viewport.width);
        let css_height = sanitize_extent(viewport.height);
        Self {
            pixel_ratio,
            width: (css_width * pixel_ratio).max(1.0),
            height: (css_height * pixel_ratio).max(1.0),
            css_width,
            css_height,
        }
    }

    /// Integer canvas backing width (truncated, like the DOM does).
    pub fn backing_width(&self) -> u32 {
        self.width as u32
    }

    /// Integer canvas backing height.
    pub fn backing_height(&self) -> u32 {
        self.height as u32
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// A 2D drawing target.
///
/// Implementations never fail: a surface that can no longer draw simply
/// produces no output.
pub trait Surface {
    /// Current viewport of the host window.
    fn viewport(&self) -> Viewport;

    /// Applies new backing and display dimensions.
    fn resize(&mut self, size: &SurfaceSize);

    /// Clears a `width` × `height` device-pixel rectangle at the origin.
    fn clear(&mut self, width: f64, height: f64);

    /// Strokes a 1px line between two points.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Hsla);

    /// Fills a circle.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Hsla);
}

/// One recorded drawing command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Line { from: DVec2, to: DVec2, color: Hsla },
    Circle { center: DVec2, radius: f64, color: Hsla },
}

/// A [`Surface`] that records commands instead of rasterizing.
///
/// Only the commands since the last `clear` are kept, i.e. one frame.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    viewport: Viewport,
    size: Option<SurfaceSize>,
    commands: Vec<DrawCommand>,
    frames_cleared: u64,
}

impl HeadlessSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            size: None,
            commands: Vec::new(),
            frames_cleared: 0,
        }
    }

    /// Changes what the next `viewport()` call reports.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Last size applied through [`Surface::resize`].
    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    /// Commands recorded since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Number of clears seen, one per rendered frame.
    pub fn frames_cleared(&self) -> u64 {
        self.frames_cleared
    }
}

impl Surface for HeadlessSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, size: &SurfaceSize) {
        self.size = Some(*size);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
        self.frames_cleared += 1;
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Hsla) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Hsla) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}
