//! Pointer-driven 3D tilt for hoverable cards.

use glam::DVec2;

/// Default maximum rotation in degrees at the element edges.
pub const DEFAULT_TILT_STRENGTH: f64 = 10.0;

/// CSS transform applied when the pointer leaves.
pub const RESET_TRANSFORM: &str = "rotateX(0) rotateY(0)";

/// Element bounds in client coordinates (`getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Pointer position as a fraction of the rect; `None` for degenerate rects.
    pub fn normalize(&self, pointer: DVec2) -> Option<DVec2> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        Some(DVec2::new(
            (pointer.x - self.left) / self.width,
            (pointer.y - self.top) / self.height,
        ))
    }
}

/// Rotation around the X and Y axes, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    /// Tilt for a pointer over `rect`: top edge tips toward the viewer,
    /// right edge away. Centered pointer gives zero rotation.
    pub fn from_pointer(pointer: DVec2, rect: ElementRect, strength: f64) -> Option<Self> {
        let n = rect.normalize(pointer)?;
        Some(Self {
            rotate_x: (0.5 - n.y) * strength,
            rotate_y: (n.x - 0.5) * strength,
        })
    }

    pub fn to_css(self) -> String {
        format!(
            "rotateX({}deg) rotateY({}deg) translateZ(0)",
            self.rotate_x, self.rotate_y
        )
    }
}

/// Parses a `data-tilt` attribute value into a strength.
///
/// Empty or non-numeric values (the usual bare `data-tilt`) use `default`.
pub fn parse_strength(attr: &str, default: f64) -> f64 {
    attr.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Enter/move/leave state for one tilted element.
#[derive(Debug, Clone)]
pub struct TiltController {
    strength: f64,
    rect: Option<ElementRect>,
}

impl TiltController {
    pub fn new(strength: f64) -> Self {
        Self {
            strength,
            rect: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.rect.is_some()
    }

    /// Pointer entered; caches the element rect for subsequent moves.
    pub fn enter(&mut self, rect: ElementRect) {
        self.rect = Some(rect);
    }

    /// Transform for a pointer move, or `None` if not entered.
    pub fn pointer_move(&self, pointer: DVec2) -> Option<String> {
        let rect = self.rect?;
        Tilt::from_pointer(pointer, rect, self.strength).map(Tilt::to_css)
    }

    /// Pointer left; returns the reset transform.
    pub fn leave(&mut self) -> &'static str {
        self.rect = None;
        RESET_TRANSFORM
    }
}

impl Default for TiltController {
    fn default() -> Self {
        Self::new(DEFAULT_TILT_STRENGTH)
    }
}
