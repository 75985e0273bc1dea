//! Binds [`ThemeStore`] to `<html data-theme>`, the toggle button and the
//! `prefers-color-scheme` media query.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MediaQueryList, MediaQueryListEvent, Window};
use zettacars_ui_core::{Theme, ThemeStore};

use crate::dom::{dom_err, Listener};
use crate::storage::LocalStore;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

pub type SharedThemeStore = Rc<RefCell<ThemeStore<LocalStore>>>;

pub struct ThemeBinding {
    store: SharedThemeStore,
    _listeners: Vec<Listener>,
}

impl ThemeBinding {
    pub fn bind(
        window: &Window,
        document: &Document,
        button: Option<HtmlElement>,
        storage_key: &str,
    ) -> Self {
        let media = dark_query(window);
        let prefers_dark = media.as_ref().is_some_and(MediaQueryList::matches);
        let mut store = ThemeStore::load(LocalStore::new(window), storage_key, prefers_dark);

        let root = document.document_element();
        apply(root.as_ref(), button.as_ref(), store.current());
        let paint_button = button.clone();
        store.subscribe(move |theme| apply(root.as_ref(), paint_button.as_ref(), theme));
        log::info!(
            "theme {} ({})",
            store.current(),
            if store.is_forced() { "saved" } else { "system" }
        );

        let store = Rc::new(RefCell::new(store));
        let mut listeners = Vec::new();

        if let Some(button) = &button {
            let store = Rc::clone(&store);
            match Listener::new(button.as_ref(), "click", move |_| {
                let theme = store.borrow_mut().toggle();
                log::debug!("theme toggled to {theme}");
            }) {
                Ok(l) => listeners.push(l),
                Err(e) => log::warn!("theme button: {e}"),
            }
        }

        if let Some(media) = &media {
            let store = Rc::clone(&store);
            // Older Safari has no addEventListener on MediaQueryList.
            match Listener::new(media.as_ref(), "change", move |event| {
                if let Some(event) = event.dyn_ref::<MediaQueryListEvent>() {
                    store.borrow_mut().system_changed(event.matches());
                }
            }) {
                Ok(l) => listeners.push(l),
                Err(e) => log::debug!("system theme changes not observed: {e}"),
            }
        }

        Self {
            store,
            _listeners: listeners,
        }
    }

    pub fn store(&self) -> &SharedThemeStore {
        &self.store
    }

    pub fn current(&self) -> Theme {
        self.store.borrow().current()
    }
}

/// Whether the system currently prefers a dark scheme.
pub fn system_prefers_dark(window: &Window) -> bool {
    dark_query(window).is_some_and(|m| m.matches())
}

fn dark_query(window: &Window) -> Option<MediaQueryList> {
    match window.match_media(DARK_QUERY) {
        Ok(list) => list,
        Err(e) => {
            log::debug!("matchMedia: {}", dom_err(e));
            None
        }
    }
}

fn apply(root: Option<&Element>, button: Option<&HtmlElement>, theme: Theme) {
    if let Some(root) = root {
        if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
            log::warn!("data-theme: {}", dom_err(e));
        }
    }
    if let Some(button) = button {
        let pressed = if theme.is_dark() { "true" } else { "false" };
        let _ = button.set_attribute("aria-pressed", pressed);
    }
}
