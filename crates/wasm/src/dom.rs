//! Small DOM helpers shared by the page bindings.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, Event, EventTarget, HtmlElement, Window};
use zettacars_ui_core::UiError;

/// Converts a thrown JS value into a [`UiError`].
pub fn dom_err(value: JsValue) -> UiError {
    UiError::Dom(
        value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

pub fn to_js(err: UiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub fn window() -> Result<Window, UiError> {
    web_sys::window().ok_or_else(|| UiError::Dom("no global window".to_string()))
}

pub fn document(window: &Window) -> Result<Document, UiError> {
    window
        .document()
        .ok_or_else(|| UiError::Dom("window has no document".to_string()))
}

/// Looks up `#id` as an `HtmlElement`; `None` when absent or not HTML.
pub fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    let element = document.get_element_by_id(id);
    if element.is_none() {
        log::debug!("#{id} not found; feature disabled");
    }
    element.and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

/// Sets an inline style property, ignoring failures.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::debug!("style {property}: {}", dom_err(e));
    }
}

/// An event listener removed from its target when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, UiError> {
        let callback = Closure::<dyn FnMut(Event)>::new(callback);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Like [`Listener::new`] but registered as passive (never calls
    /// `preventDefault`), for touch handlers.
    pub fn passive(
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, UiError> {
        let callback = Closure::<dyn FnMut(Event)>::new(callback);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(dom_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}
