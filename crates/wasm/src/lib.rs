#![deny(unsafe_code)]
//! Browser bindings for the zettacars landing page.
//!
//! `start` resolves a [`PageConfig`], installs the console logger and wires
//! every enabled feature to the DOM. Features whose elements are missing are
//! skipped with a debug log. The returned [`LandingPage`] owns all listeners;
//! `dispose` tears them down.

mod background;
mod canvas;
mod chrome;
mod clipboard;
mod dom;
mod logger;
mod storage;
mod theme;
mod tilt;
mod toast;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, Window};
use zettacars_ui_core::{PageConfig, Theme, UiError, Xorshift64};

use background::ParticleBackground;
use clipboard::CopySource;
use dom::Listener;
use theme::ThemeBinding;
use toast::ToastView;

/// Boots the page. `config` is an optional JSON object; see `PageConfig`.
#[wasm_bindgen]
pub fn start(config: Option<String>) -> Result<LandingPage, JsValue> {
    console_error_panic_hook::set_once();
    let config = PageConfig::from_json_str(config.as_deref().unwrap_or("")).map_err(dom::to_js)?;
    logger::init(&config.log_level);
    LandingPage::mount(config).map_err(dom::to_js)
}

#[wasm_bindgen]
pub struct LandingPage {
    theme: Option<ThemeBinding>,
    background: Option<ParticleBackground>,
    listeners: Vec<Listener>,
}

impl LandingPage {
    fn mount(config: PageConfig) -> Result<Self, UiError> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        log::info!("mounting {} profile", config.profile);

        chrome::set_footer_year(&document, &config.year_id);

        let mut listeners = bind_copy(&window, &document, &config);

        let theme_binding = config.theme.then(|| {
            ThemeBinding::bind(
                &window,
                &document,
                dom::html_by_id(&document, &config.theme_button_id),
                &config.storage_key,
            )
        });

        if config.tilt {
            match tilt::bind_all(&document, &config.tilt_selector, config.tilt_strength) {
                Ok(l) => listeners.extend(l),
                Err(e) => log::warn!("tilt: {e}"),
            }
        }

        let background = if config.particles {
            let initial = theme_binding.as_ref().map_or_else(
                || Theme::from_prefers_dark(theme::system_prefers_dark(&window)),
                ThemeBinding::current,
            );
            start_background(&window, &document, &config, initial)
        } else {
            None
        };
        if let (Some(binding), Some(background)) = (&theme_binding, &background) {
            binding.store().borrow_mut().subscribe(background.theme_listener());
        }

        match chrome::bind_keyboard_activation(&document) {
            Ok(l) => listeners.push(l),
            Err(e) => log::warn!("keyboard activation: {e}"),
        }

        Ok(Self {
            theme: theme_binding,
            background,
            listeners,
        })
    }
}

#[wasm_bindgen]
impl LandingPage {
    /// Current theme name, or `undefined` when theming is disabled.
    pub fn theme(&self) -> Option<String> {
        self.theme.as_ref().map(|t| t.current().to_string())
    }

    /// Flips and persists the theme, returning the new name.
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&self) -> Option<String> {
        let binding = self.theme.as_ref()?;
        let next = binding.store().borrow_mut().toggle();
        Some(next.to_string())
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.background.as_ref().is_some_and(ParticleBackground::is_running)
    }

    /// Frames drawn so far by the particle background.
    pub fn frames(&self) -> f64 {
        self.background.as_ref().map_or(0.0, |b| b.frames() as f64)
    }

    /// Stops the animation and removes every listener. Safe to call twice.
    pub fn dispose(&mut self) {
        if let Some(background) = self.background.as_mut() {
            background.dispose();
        }
        self.background = None;
        self.listeners.clear();
        self.theme = None;
        log::debug!("landing page disposed");
    }
}

fn bind_copy(window: &Window, document: &Document, config: &PageConfig) -> Vec<Listener> {
    let buttons = [
        (
            &config.copy_button_id,
            CopySource::Fixed(config.copy_text.clone()),
        ),
        (&config.copy_mail_id, CopySource::DataAttribute),
    ];
    let chain = Rc::new(clipboard::chain(window, document, config));
    let toast = ToastView::new(dom::html_by_id(document, &config.toast_id));
    log::debug!("copy chain: {}", chain.names().join(" -> "));

    let mut listeners = Vec::new();
    for (id, source) in buttons {
        let Some(button) = dom::html_by_id(document, id) else { continue };
        match clipboard::bind_button(
            &button,
            source,
            Rc::clone(&chain),
            Rc::clone(&toast),
            config.toast_message.clone(),
            config.toast_ms,
        ) {
            Ok(l) => listeners.push(l),
            Err(e) => log::warn!("#{id}: {e}"),
        }
    }
    listeners
}

fn start_background(
    window: &Window,
    document: &Document,
    config: &PageConfig,
    theme: Theme,
) -> Option<ParticleBackground> {
    let canvas = document
        .get_element_by_id(&config.canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
    let Some(canvas) = canvas else {
        log::debug!("#{} is not a canvas; particles disabled", config.canvas_id);
        return None;
    };
    let seed = Xorshift64::from_unit_f64(js_sys::Math::random()).next_u64();
    match ParticleBackground::start(window.clone(), canvas, theme, seed, &config.particle_params) {
        Ok(background) => Some(background),
        Err(e) => {
            log::warn!("particles: {e}");
            None
        }
    }
}
