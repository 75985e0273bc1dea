//! Footer year and keyboard activation for button-styled links.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, KeyboardEvent};
use zettacars_ui_core::a11y::activates_link;
use zettacars_ui_core::UiError;

use crate::dom::{self, Listener};

pub fn set_footer_year(document: &Document, id: &str) {
    if let Some(el) = dom::html_by_id(document, id) {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}

/// Enter or Space on a focused `a.btn` clicks it.
pub fn bind_keyboard_activation(document: &Document) -> Result<Listener, UiError> {
    let doc = document.clone();
    Listener::new(document.as_ref(), "keydown", move |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else { return };
        let Some(active) = doc.active_element() else { return };
        let styled = active.class_list().contains("btn");
        if !activates_link(&key_event.key(), &active.tag_name(), styled) {
            return;
        }
        if let Some(link) = active.dyn_ref::<HtmlElement>() {
            event.prevent_default();
            link.click();
        }
    })
}
