//! Drives the particle field from `requestAnimationFrame`.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::{Rc, Weak};

use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};
use zettacars_ui_core::{FrameLoop, Theme, UiError};
use zettacars_ui_particles::ParticleField;

use crate::canvas::CanvasSurface;
use crate::dom::{dom_err, Listener};

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct State {
    frame_loop: FrameLoop<ParticleField>,
    surface: CanvasSurface,
    raf_id: Option<i32>,
}

/// A running particle background. Stops on [`ParticleBackground::dispose`]
/// or drop.
pub struct ParticleBackground {
    window: Window,
    state: Rc<RefCell<State>>,
    tick: TickSlot,
    resize: Option<Listener>,
}

impl ParticleBackground {
    pub fn start(
        window: Window,
        canvas: HtmlCanvasElement,
        theme: Theme,
        seed: u64,
        params: &Value,
    ) -> Result<Self, UiError> {
        let mut surface = CanvasSurface::new(window.clone(), canvas);
        let field = ParticleField::from_json(&mut surface, theme, seed, params);
        let state = Rc::new(RefCell::new(State {
            frame_loop: FrameLoop::new(field),
            surface,
            raf_id: None,
        }));

        let weak = Rc::downgrade(&state);
        let resize = Listener::new(window.as_ref(), "resize", move |_| {
            if let Some(state) = weak.upgrade() {
                let mut guard = state.borrow_mut();
                let state = &mut *guard;
                state.frame_loop.resize(&mut state.surface);
            }
        })?;

        let tick: TickSlot = Rc::new(RefCell::new(None));
        let tick_handle = Rc::clone(&tick);
        let frame_window = window.clone();
        let weak = Rc::downgrade(&state);
        *tick.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            let Some(state) = weak.upgrade() else { return };
            let mut guard = state.borrow_mut();
            let state = &mut *guard;
            state.raf_id = match state.frame_loop.tick(&mut state.surface) {
                ControlFlow::Continue(()) => request_frame(&frame_window, &tick_handle),
                ControlFlow::Break(()) => None,
            };
        }));

        let Some(first) = request_frame(&window, &tick) else {
            tick.borrow_mut().take();
            return Err(UiError::Dom("requestAnimationFrame unavailable".to_string()));
        };
        state.borrow_mut().raf_id = Some(first);

        Ok(Self {
            window,
            state,
            tick,
            resize: Some(resize),
        })
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().frame_loop.is_running()
    }

    pub fn frames(&self) -> u64 {
        self.state.borrow().frame_loop.frames()
    }

    /// A theme listener that keeps recoloring while the background lives.
    pub fn theme_listener(&self) -> impl FnMut(Theme) + 'static {
        let weak: Weak<RefCell<State>> = Rc::downgrade(&self.state);
        move |theme| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().frame_loop.set_theme(theme);
            }
        }
    }

    /// Cancels the pending frame, detaches the resize listener and releases
    /// the field. Idempotent.
    pub fn dispose(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            state.frame_loop.cancel();
            if let Some(id) = state.raf_id.take() {
                if let Err(e) = self.window.cancel_animation_frame(id) {
                    log::debug!("cancelAnimationFrame: {}", dom_err(e));
                }
            }
        }
        self.resize = None;
        self.tick.borrow_mut().take();
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn request_frame(window: &Window, tick: &TickSlot) -> Option<i32> {
    let slot = tick.borrow();
    let callback = slot.as_ref()?;
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("requestAnimationFrame: {}", dom_err(e));
            None
        }
    }
}
