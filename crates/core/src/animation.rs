//! The `Animation` trait implemented by every canvas animation on the page.
//!
//! The trait is object-safe so a page can drive `Box<dyn Animation>` through
//! a [`FrameLoop`](crate::frame_loop::FrameLoop) without knowing which
//! animation it holds.

use serde_json::Value;

use crate::surface::Surface;
use crate::theme::Theme;

/// A theme-aware, frame-driven canvas animation.
pub trait Animation {
    /// Renders one frame and advances the simulation by one step.
    fn frame(&mut self, surface: &mut dyn Surface);

    /// Re-reads the surface viewport after a host resize.
    fn resize(&mut self, surface: &mut dyn Surface);

    /// Switches color mapping; takes effect on the next frame.
    fn set_theme(&mut self, theme: Theme);

    /// Releases simulation state. Must be idempotent.
    fn dispose(&mut self);

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing parameters, their types, ranges and defaults.
    fn param_schema(&self) -> Value;
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn frame(&mut self, surface: &mut dyn Surface) {
        (**self).frame(surface)
    }

    fn resize(&mut self, surface: &mut dyn Surface) {
        (**self).resize(surface)
    }

    fn set_theme(&mut self, theme: Theme) {
        (**self).set_theme(theme)
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }

    fn params(&self) -> Value {
        (**self).params()
    }

    fn param_schema(&self) -> Value {
        (**self).param_schema()
    }
}
