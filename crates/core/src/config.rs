//! Page configuration resolved from a lenient JSON object.
//!
//! `profile` picks a base set of defaults (`full` page with theme, particles
//! and tilt, or the `minimal` copy-only page); every other key overrides a
//! single field. Unknown keys are ignored and wrong types fall back to the
//! profile default, so a page never fails to boot because of its config.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clipboard::DOMAIN_TEXT;
use crate::error::UiError;
use crate::params::{
    param_bool, param_f64, param_object, param_opt_string, param_string, param_u32,
};
use crate::tilt::DEFAULT_TILT_STRENGTH;
use crate::toast::{DEFAULT_TOAST_MESSAGE, DEFAULT_TOAST_MS, MINIMAL_TOAST_MS};

/// Which variant of the landing page is being wired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    #[default]
    Full,
    Minimal,
}

impl Profile {
    pub fn list_names() -> &'static [&'static str] {
        &["full", "minimal"]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Profile::Full => "full",
            Profile::Minimal => "minimal",
        })
    }
}

impl FromStr for Profile {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Profile::Full),
            "minimal" => Ok(Profile::Minimal),
            other => Err(UiError::UnknownProfile(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageConfig {
    pub profile: Profile,

    pub canvas_id: String,
    pub toast_id: String,
    pub theme_button_id: String,
    pub copy_button_id: String,
    pub copy_mail_id: String,
    pub year_id: String,
    /// Selector for elements that get the tilt effect.
    pub tilt_selector: String,

    pub storage_key: String,
    pub copy_text: String,
    pub toast_message: String,
    pub toast_ms: u32,
    /// Whether a `mailto:` composer is the last clipboard strategy.
    pub mailto_fallback: bool,
    /// Recipient used by the `mailto:` fallback when the copied text is not
    /// itself an address.
    pub mailto_to: Option<String>,

    pub theme: bool,
    pub particles: bool,
    pub tilt: bool,
    pub tilt_strength: f64,

    /// Raw parameter object handed to the particle field.
    pub particle_params: Value,
    pub log_level: String,
}

impl PageConfig {
    pub fn for_profile(profile: Profile) -> Self {
        let full = profile == Profile::Full;
        Self {
            profile,
            canvas_id: "particles".to_string(),
            toast_id: "toast".to_string(),
            theme_button_id: "theme".to_string(),
            copy_button_id: "copyBtn".to_string(),
            copy_mail_id: "copyMail".to_string(),
            year_id: "year".to_string(),
            tilt_selector: "[data-tilt]".to_string(),
            storage_key: "zc-theme".to_string(),
            copy_text: DOMAIN_TEXT.to_string(),
            toast_message: DEFAULT_TOAST_MESSAGE.to_string(),
            toast_ms: if full { DEFAULT_TOAST_MS } else { MINIMAL_TOAST_MS },
            mailto_fallback: !full,
            mailto_to: None,
            theme: full,
            particles: full,
            tilt: full,
            tilt_strength: DEFAULT_TILT_STRENGTH,
            particle_params: Value::Object(serde_json::Map::new()),
            log_level: "info".to_string(),
        }
    }

    /// Resolves a config object. An unknown `profile` is an error; every
    /// other key is lenient.
    pub fn from_json(params: &Value) -> Result<Self, UiError> {
        let profile: Profile = param_string(params, "profile", "full").parse()?;
        let base = Self::for_profile(profile);
        Ok(Self {
            profile,
            canvas_id: param_string(params, "canvas_id", &base.canvas_id),
            toast_id: param_string(params, "toast_id", &base.toast_id),
            theme_button_id: param_string(params, "theme_button_id", &base.theme_button_id),
            copy_button_id: param_string(params, "copy_button_id", &base.copy_button_id),
            copy_mail_id: param_string(params, "copy_mail_id", &base.copy_mail_id),
            year_id: param_string(params, "year_id", &base.year_id),
            tilt_selector: param_string(params, "tilt_selector", &base.tilt_selector),
            storage_key: param_string(params, "storage_key", &base.storage_key),
            copy_text: param_string(params, "copy_text", &base.copy_text),
            toast_message: param_string(params, "toast_message", &base.toast_message),
            toast_ms: param_u32(params, "toast_ms", base.toast_ms),
            mailto_fallback: param_bool(params, "mailto_fallback", base.mailto_fallback),
            mailto_to: param_opt_string(params, "mailto_to").or(base.mailto_to),
            theme: param_bool(params, "theme", base.theme),
            particles: param_bool(params, "particles", base.particles),
            tilt: param_bool(params, "tilt", base.tilt),
            tilt_strength: param_f64(params, "tilt_strength", base.tilt_strength),
            particle_params: param_object(params, "particle_params"),
            log_level: param_string(params, "log_level", &base.log_level),
        })
    }

    /// Parses a JSON string; empty input means all defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, UiError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        Self::from_json(&value)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::for_profile(Profile::Full)
    }
}
