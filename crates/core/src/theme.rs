//! Light/dark theme, its persisted preference, and change notification.
//!
//! [`ThemeStore`] owns the current theme and a [`PreferenceStore`]. An
//! explicit toggle persists the choice; a system color-scheme change is only
//! honored while nothing is persisted. Both notify every subscriber, which is
//! how the particle field and the DOM attribute stay in sync.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UiError;

/// One of the two visual modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UiError::UnknownTheme(other.to_string())),
        }
    }
}

/// Durable string key-value store (browser `localStorage` in production).
///
/// Implementations swallow storage failures: a blocked store behaves like
/// an empty one.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory [`PreferenceStore`] for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.set(key, value);
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

type Listener = Box<dyn FnMut(Theme)>;

/// Current theme plus its persistence and subscribers.
pub struct ThemeStore<S: PreferenceStore> {
    store: S,
    key: String,
    current: Theme,
    listeners: Vec<Listener>,
}

impl<S: PreferenceStore> ThemeStore<S> {
    /// Resolves the startup theme: a valid persisted value wins, otherwise
    /// the system preference.
    ///
    /// An unparseable persisted value is ignored and does not count as a
    /// forced choice.
    pub fn load(store: S, key: impl Into<String>, system_prefers_dark: bool) -> Self {
        let key = key.into();
        let current = persisted(&store, &key)
            .unwrap_or_else(|| Theme::from_prefers_dark(system_prefers_dark));
        log::debug!("theme store loaded with {current}");
        Self {
            store,
            key,
            current,
            listeners: Vec::new(),
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// True when the user has explicitly chosen a theme.
    pub fn is_forced(&self) -> bool {
        persisted(&self.store, &self.key).is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers an observer called after every theme change.
    pub fn subscribe(&mut self, listener: impl FnMut(Theme) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Flips the theme, persists the new value, notifies subscribers.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        self.store.set(&self.key, next.as_str());
        self.apply(next);
        next
    }

    /// Handles a system color-scheme change.
    ///
    /// Returns the new theme when honored, `None` when a persisted choice
    /// overrides the system.
    pub fn system_changed(&mut self, prefers_dark: bool) -> Option<Theme> {
        if self.is_forced() {
            log::debug!("ignoring system theme change: preference is persisted");
            return None;
        }
        let next = Theme::from_prefers_dark(prefers_dark);
        self.apply(next);
        Some(next)
    }

    fn apply(&mut self, theme: Theme) {
        self.current = theme;
        for listener in &mut self.listeners {
            listener(theme);
        }
    }
}

fn persisted<S: PreferenceStore>(store: &S, key: &str) -> Option<Theme> {
    store.get(key).and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const KEY: &str = "zc-theme";

    fn recorder(store: &mut ThemeStore<MemoryStore>) -> Rc<RefCell<Vec<Theme>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |t| sink.borrow_mut().push(t));
        seen
    }

    #[test]
    fn theme_parses_and_displays() {
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!(matches!("Dark".parse::<Theme>(), Err(UiError::UnknownTheme(_))));
        assert_eq!(Theme::Light.to_string(), "light");
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn theme_serializes_as_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        let t: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(t, Theme::Dark);
    }

    #[test]
    fn load_prefers_persisted_value_over_system() {
        let store = ThemeStore::load(MemoryStore::with_value(KEY, "light"), KEY, true);
        assert_eq!(store.current(), Theme::Light);
        assert!(store.is_forced());
    }

    #[test]
    fn load_falls_back_to_system_preference() {
        let dark = ThemeStore::load(MemoryStore::new(), KEY, true);
        let light = ThemeStore::load(MemoryStore::new(), KEY, false);
        assert_eq!(dark.current(), Theme::Dark);
        assert_eq!(light.current(), Theme::Light);
        assert!(!dark.is_forced());
    }

    #[test]
    fn load_ignores_garbage_persisted_value() {
        let store = ThemeStore::load(MemoryStore::with_value(KEY, "sepia"), KEY, false);
        assert_eq!(store.current(), Theme::Light);
        assert!(!store.is_forced());
    }

    #[test]
    fn toggle_persists_and_notifies() {
        let mut store = ThemeStore::load(MemoryStore::new(), KEY, true);
        let seen = recorder(&mut store);

        assert_eq!(store.toggle(), Theme::Light);
        assert_eq!(store.store().get(KEY).as_deref(), Some("light"));
        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.store().get(KEY).as_deref(), Some("dark"));
        assert_eq!(*seen.borrow(), vec![Theme::Light, Theme::Dark]);
    }

    #[test]
    fn system_change_is_honored_without_persisted_choice() {
        let mut store = ThemeStore::load(MemoryStore::new(), KEY, false);
        let seen = recorder(&mut store);

        assert_eq!(store.system_changed(true), Some(Theme::Dark));
        assert_eq!(store.current(), Theme::Dark);
        assert_eq!(store.store().get(KEY), None);
        assert_eq!(*seen.borrow(), vec![Theme::Dark]);
    }

    #[test]
    fn system_change_is_ignored_after_toggle() {
        let mut store = ThemeStore::load(MemoryStore::new(), KEY, false);
        store.toggle();
        let seen = recorder(&mut store);

        assert_eq!(store.system_changed(false), None);
        assert_eq!(store.current(), Theme::Dark);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn every_subscriber_is_notified() {
        let mut store = ThemeStore::load(MemoryStore::new(), KEY, false);
        let a = recorder(&mut store);
        let b = recorder(&mut store);
        assert_eq!(store.subscriber_count(), 2);
        store.toggle();
        assert_eq!(*a.borrow(), vec![Theme::Dark]);
        assert_eq!(*b.borrow(), vec![Theme::Dark]);
    }
}
