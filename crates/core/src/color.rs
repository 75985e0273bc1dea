//! HSL colors as consumed by Canvas 2D `strokeStyle` / `fillStyle`.
//!
//! The particle palette is expressed entirely in HSL: a theme-dependent base
//! hue nudged per particle, fixed saturation, theme-dependent lightness.

use serde::{Deserialize, Serialize};

/// HSL color with an alpha channel.
///
/// `h` is in degrees and is not wrapped (CSS accepts any angle);
/// `s` and `l` are percentages in [0, 100]; `a` is in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    pub fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Returns a copy with alpha replaced, clamped to [0, 1].
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string, e.g. `hsla(215.5, 88%, 45%, 0.1)`.
    ///
    /// Saturation and lightness are clamped to [0, 100], alpha to [0, 1].
    /// Non-finite hues render as 0.
    pub fn to_css(self) -> String {
        let h = if self.h.is_finite() { self.h } else { 0.0 };
        let s = self.s.clamp(0.0, 100.0);
        let l = self.l.clamp(0.0, 100.0);
        let a = self.a.clamp(0.0, 1.0);
        format!("hsla({}, {}%, {}%, {})", trim(h), trim(s), trim(l), trim(a))
    }
}

/// Formats with at most three decimals and no trailing zeros.
fn trim(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_css_formats_integral_components_without_decimals() {
        let c = Hsla::new(210.0, 88.0, 45.0, 1.0);
        assert_eq!(c.to_css(), "hsla(210, 88%, 45%, 1)");
    }

    #[test]
    fn to_css_keeps_fractional_hue_and_alpha() {
        let c = Hsla::new(243.5, 88.0, 65.0, 0.12);
        assert_eq!(c.to_css(), "hsla(243.5, 88%, 65%, 0.12)");
    }

    #[test]
    fn to_css_clamps_out_of_range_components() {
        let c = Hsla::new(10.0, 120.0, -5.0, 1.5);
        assert_eq!(c.to_css(), "hsla(10, 100%, 0%, 1)");
    }

    #[test]
    fn to_css_replaces_non_finite_hue() {
        let c = Hsla::new(f64::NAN, 88.0, 50.0, 0.5);
        assert_eq!(c.to_css(), "hsla(0, 88%, 50%, 0.5)");
    }

    #[test]
    fn to_css_does_not_render_negative_zero() {
        let c = Hsla::new(-0.0001, 88.0, 50.0, 0.0);
        assert_eq!(c.to_css(), "hsla(0, 88%, 50%, 0)");
    }

    #[test]
    fn with_alpha_replaces_and_clamps() {
        let c = Hsla::new(220.0, 88.0, 70.0, 1.0);
        assert_eq!(c.with_alpha(0.85).a, 0.85);
        assert_eq!(c.with_alpha(-1.0).a, 0.0);
        assert_eq!(c.with_alpha(3.0).a, 1.0);
        assert_eq!(c.with_alpha(0.5).h, 220.0);
    }

    #[test]
    fn hue_is_not_wrapped() {
        let c = Hsla::new(400.0, 88.0, 50.0, 1.0);
        assert_eq!(c.to_css(), "hsla(400, 88%, 50%, 1)");
    }
}
