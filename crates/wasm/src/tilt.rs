//! Pointer tilt on `[data-tilt]` cards.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, HtmlElement, MouseEvent};
use zettacars_ui_core::tilt::{parse_strength, RESET_TRANSFORM};
use zettacars_ui_core::{ElementRect, TiltController, UiError};

use crate::dom::{self, dom_err, Listener};

/// Attaches tilt handlers to every element matching `selector`.
pub fn bind_all(
    document: &Document,
    selector: &str,
    default_strength: f64,
) -> Result<Vec<Listener>, UiError> {
    let nodes = document.query_selector_all(selector).map_err(dom_err)?;
    let mut listeners = Vec::new();
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        listeners.extend(bind(&element, default_strength)?);
    }
    log::debug!("tilt: {} listeners on {selector}", listeners.len());
    Ok(listeners)
}

fn bind(element: &HtmlElement, default_strength: f64) -> Result<Vec<Listener>, UiError> {
    let strength = element
        .get_attribute("data-tilt")
        .map_or(default_strength, |attr| parse_strength(&attr, default_strength));
    let controller = Rc::new(RefCell::new(TiltController::new(strength)));
    let target: &EventTarget = element.as_ref();

    let enter = {
        let (controller, element) = (Rc::clone(&controller), element.clone());
        move |_: web_sys::Event| {
            controller.borrow_mut().enter(rect_of(&element));
            dom::set_style(&element, "will-change", "transform");
        }
    };
    let leave = {
        let (controller, element) = (Rc::clone(&controller), element.clone());
        move |_: web_sys::Event| {
            let reset = controller.borrow_mut().leave();
            dom::set_style(&element, "transform", reset);
            dom::set_style(&element, "will-change", "auto");
        }
    };
    let moved = {
        let (controller, element) = (Rc::clone(&controller), element.clone());
        move |event: web_sys::Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else { return };
            let pointer = DVec2::new(f64::from(event.client_x()), f64::from(event.client_y()));
            if let Some(css) = controller.borrow().pointer_move(pointer) {
                dom::set_style(&element, "transform", &css);
            }
        }
    };

    dom::set_style(element, "transform", RESET_TRANSFORM);
    Ok(vec![
        Listener::new(target, "mouseenter", enter.clone())?,
        Listener::new(target, "mousemove", moved)?,
        Listener::new(target, "mouseleave", leave.clone())?,
        Listener::passive(target, "touchstart", enter)?,
        Listener::passive(target, "touchend", leave)?,
    ])
}

fn rect_of(element: &HtmlElement) -> ElementRect {
    let r = element.get_bounding_client_rect();
    ElementRect::new(r.left(), r.top(), r.width(), r.height())
}
