//! Run-until-cancelled frame loop with an owned cancellation token.
//!
//! The host calls [`FrameLoop::tick`] once per display refresh and only
//! schedules another frame while it returns `ControlFlow::Continue`. The
//! loop never terminates on its own; [`FrameLoop::cancel`] (or any clone of
//! its [`CancellationToken`]) is the single way out.

use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::animation::Animation;
use crate::surface::Surface;
use crate::theme::Theme;

/// Shared single-threaded cancellation flag.
///
/// Clones observe the same flag. Cancelling is sticky.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Owns an animation and drives it until cancelled.
pub struct FrameLoop<A: Animation> {
    animation: A,
    token: CancellationToken,
    frames: u64,
    disposed: bool,
}

impl<A: Animation> FrameLoop<A> {
    pub fn new(animation: A) -> Self {
        Self {
            animation,
            token: CancellationToken::new(),
            frames: 0,
            disposed: false,
        }
    }

    /// A token that cancels this loop from outside.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    /// Renders one frame unless cancelled.
    ///
    /// On the first tick after cancellation the animation is disposed.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> ControlFlow<()> {
        if self.token.is_cancelled() {
            self.dispose_once();
            return ControlFlow::Break(());
        }
        self.animation.frame(surface);
        self.frames += 1;
        ControlFlow::Continue(())
    }

    pub fn resize(&mut self, surface: &mut dyn Surface) {
        if self.is_running() {
            self.animation.resize(surface);
        }
    }

    /// Forwards a theme change. Allowed at any time, including after
    /// cancellation.
    pub fn set_theme(&mut self, theme: Theme) {
        self.animation.set_theme(theme);
    }

    /// Cancels the loop and disposes the animation. Idempotent.
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.dispose_once();
    }

    fn dispose_once(&mut self) {
        if !self.disposed {
            self.disposed = true;
            log::debug!("frame loop stopped after {} frames", self.frames);
            self.animation.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tests::CountingAnimation;
    use crate::surface::{HeadlessSurface, Viewport};

    fn surface() -> HeadlessSurface {
        HeadlessSurface::new(Viewport::new(8.0, 8.0, 1.0))
    }

    #[test]
    fn tick_continues_until_cancelled() {
        let mut frame_loop = FrameLoop::new(CountingAnimation::default());
        let mut surface = surface();
        for _ in 0..5 {
            assert_eq!(frame_loop.tick(&mut surface), ControlFlow::Continue(()));
        }
        assert_eq!(frame_loop.frames(), 5);
        assert_eq!(frame_loop.animation().frames, 5);
    }

    #[test]
    fn external_token_stops_the_loop_and_disposes_once() {
        let mut frame_loop = FrameLoop::new(CountingAnimation::default());
        let mut surface = surface();
        let token = frame_loop.token();
        frame_loop.tick(&mut surface);

        token.cancel();
        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.tick(&mut surface), ControlFlow::Break(()));
        assert_eq!(frame_loop.tick(&mut surface), ControlFlow::Break(()));
        assert_eq!(frame_loop.animation().frames, 1);
        assert_eq!(frame_loop.animation().disposals, 1);
    }

    #[test]
    fn cancel_is_idempotent_and_safe_before_any_frame() {
        let mut frame_loop = FrameLoop::new(CountingAnimation::default());
        frame_loop.cancel();
        frame_loop.cancel();
        assert_eq!(frame_loop.animation().disposals, 1);
        assert_eq!(frame_loop.tick(&mut surface()), ControlFlow::Break(()));
        assert_eq!(frame_loop.animation().disposals, 1);
    }

    #[test]
    fn resize_is_ignored_after_cancel() {
        let mut frame_loop = FrameLoop::new(CountingAnimation::default());
        let mut surface = surface();
        frame_loop.resize(&mut surface);
        frame_loop.cancel();
        frame_loop.resize(&mut surface);
        assert_eq!(frame_loop.animation().resizes, 1);
    }

    #[test]
    fn set_theme_reaches_animation() {
        let mut frame_loop = FrameLoop::new(CountingAnimation::default());
        frame_loop.set_theme(Theme::Light);
        assert_eq!(frame_loop.animation().theme, Theme::Light);
    }

    #[test]
    fn token_clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
