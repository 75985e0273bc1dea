//! Error types for the landing page core.

use thiserror::Error;

/// Errors produced by core operations.
#[derive(Debug, Error)]
pub enum UiError {
    /// Width or height was zero, negative or not finite.
    #[error("invalid dimensions: width and height must be positive and finite")]
    InvalidDimensions,

    /// A theme string was neither `light` nor `dark`.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// A page profile string was not recognized.
    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    /// The page config could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A single clipboard strategy could not deliver the text.
    #[error("clipboard strategy '{strategy}' failed: {reason}")]
    Clipboard {
        strategy: &'static str,
        reason: String,
    },

    /// Every clipboard strategy in a copy chain failed.
    #[error("all {attempts} clipboard strategies failed")]
    ClipboardExhausted { attempts: usize },

    /// A browser call failed. Carries the stringified JS value.
    #[error("dom error: {0}")]
    Dom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = UiError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn unknown_theme_includes_value() {
        let msg = UiError::UnknownTheme("sepia".into()).to_string();
        assert!(msg.contains("sepia"), "missing theme in: {msg}");
    }

    #[test]
    fn unknown_profile_includes_value() {
        let msg = UiError::UnknownProfile("compact".into()).to_string();
        assert!(msg.contains("compact"), "missing profile in: {msg}");
    }

    #[test]
    fn invalid_config_includes_message() {
        let msg = UiError::InvalidConfig("trailing comma".into()).to_string();
        assert!(msg.contains("trailing comma"), "missing message in: {msg}");
    }

    #[test]
    fn clipboard_includes_strategy_and_reason() {
        let err = UiError::Clipboard {
            strategy: "async-clipboard",
            reason: "NotAllowedError".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("async-clipboard"), "missing strategy in: {msg}");
        assert!(msg.contains("NotAllowedError"), "missing reason in: {msg}");
    }

    #[test]
    fn clipboard_exhausted_includes_attempt_count() {
        let msg = UiError::ClipboardExhausted { attempts: 3 }.to_string();
        assert!(msg.contains('3'), "missing attempts in: {msg}");
    }

    #[test]
    fn ui_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UiError>();
    }

    #[test]
    fn ui_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<UiError>();
    }
}
