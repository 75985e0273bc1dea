//! `localStorage` as a [`PreferenceStore`].

use web_sys::{Storage, Window};
use zettacars_ui_core::PreferenceStore;

use crate::dom::dom_err;

/// Reads and writes `window.localStorage`. Private browsing modes may deny
/// access; reads then return `None` and writes are dropped.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::debug!("localStorage unavailable: {}", dom_err(e));
                None
            }
        };
        Self { storage }
    }
}

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                log::warn!("could not persist {key}: {}", dom_err(e));
            }
        }
    }
}
