//! Per-theme palette for links and dots.

use zettacars_ui_core::color::Hsla;
use zettacars_ui_core::Theme;

const SATURATION: f64 = 88.0;

/// Color constants for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeStyle {
    pub base_hue: f64,
    /// Link opacity at distance zero.
    pub link_alpha: f64,
    pub link_lightness: f64,
    pub dot_alpha: f64,
    pub dot_lightness: f64,
}

impl ThemeStyle {
    pub const LIGHT: ThemeStyle = ThemeStyle {
        base_hue: 210.0,
        link_alpha: 0.10,
        link_lightness: 45.0,
        dot_alpha: 0.75,
        dot_lightness: 50.0,
    };

    pub const DARK: ThemeStyle = ThemeStyle {
        base_hue: 220.0,
        link_alpha: 0.12,
        link_lightness: 65.0,
        dot_alpha: 0.85,
        dot_lightness: 70.0,
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }

    /// Line color between particles with hue offsets `hue_a` and `hue_b`.
    pub fn link_color(&self, hue_a: f64, hue_b: f64, alpha: f64) -> Hsla {
        Hsla::new(
            self.base_hue + (hue_a + hue_b) / 14.0,
            SATURATION,
            self.link_lightness,
            alpha,
        )
    }

    pub fn dot_color(&self, hue: f64) -> Hsla {
        Hsla::new(
            self.base_hue + hue / 6.0,
            SATURATION,
            self.dot_lightness,
            self.dot_alpha,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_and_dark_differ_in_base_hue_and_lightness() {
        let light = ThemeStyle::for_theme(Theme::Light);
        let dark = ThemeStyle::for_theme(Theme::Dark);
        assert_eq!(light.base_hue, 210.0);
        assert_eq!(dark.base_hue, 220.0);
        assert_eq!(light.link_lightness, 45.0);
        assert_eq!(dark.link_lightness, 65.0);
    }

    #[test]
    fn link_color_uses_sum_of_hue_offsets() {
        let c = ThemeStyle::LIGHT.link_color(210.0, 210.0, 0.05);
        assert_eq!(c.h, 240.0);
        assert_eq!(c.s, 88.0);
        assert_eq!(c.l, 45.0);
        assert_eq!(c.a, 0.05);
    }

    #[test]
    fn dot_color_uses_sixth_of_offset() {
        let c = ThemeStyle::DARK.dot_color(240.0);
        assert_eq!(c.h, 260.0);
        assert_eq!(c.l, 70.0);
        assert_eq!(c.a, 0.85);
        assert_eq!(ThemeStyle::LIGHT.dot_color(240.0).a, 0.75);
    }
}
