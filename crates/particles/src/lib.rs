#![deny(unsafe_code)]
//! Theme-aware particle field animator.
//!
//! A fixed set of points drifts across the surface, bouncing off its edges.
//! Every pair closer than the link distance is joined by a faint line whose
//! opacity fades linearly with distance. Colors come from a small HSL
//! palette that depends only on the current [`Theme`], so switching themes
//! recolors the next frame without touching the simulation.

use glam::DVec2;
use serde::Serialize;
use serde_json::{json, Value};
use zettacars_ui_core::params::{param_f64, param_usize};
use zettacars_ui_core::prng::Xorshift64;
use zettacars_ui_core::surface::{Surface, SurfaceSize, DEFAULT_MAX_PIXEL_RATIO};
use zettacars_ui_core::{Animation, Theme};

mod style;

pub use style::ThemeStyle;

/// Number of particles in the field.
const DEFAULT_COUNT: usize = 70;
/// Link distance in CSS pixels, scaled by pixel ratio.
const DEFAULT_LINK_DISTANCE: f64 = 120.0;
/// Full width of the per-axis velocity range in CSS pixels per frame.
const DEFAULT_SPEED: f64 = 0.25;
const DEFAULT_RADIUS_MIN: f64 = 0.6;
const DEFAULT_RADIUS_SPAN: f64 = 1.8;
const DEFAULT_HUE_MIN: f64 = 200.0;
const DEFAULT_HUE_SPAN: f64 = 80.0;

/// Tunable constants of the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleParams {
    pub count: usize,
    pub link_distance: f64,
    pub max_pixel_ratio: f64,
    /// Velocity per axis is uniform in `[-speed / 2, speed / 2)` × ratio.
    pub speed: f64,
    /// Radius is uniform in `[radius_min, radius_min + radius_span)` × ratio.
    pub radius_min: f64,
    pub radius_span: f64,
    /// Hue offset is uniform in `[hue_min, hue_min + hue_span)`.
    pub hue_min: f64,
    pub hue_span: f64,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            link_distance: DEFAULT_LINK_DISTANCE,
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
            speed: DEFAULT_SPEED,
            radius_min: DEFAULT_RADIUS_MIN,
            radius_span: DEFAULT_RADIUS_SPAN,
            hue_min: DEFAULT_HUE_MIN,
            hue_span: DEFAULT_HUE_SPAN,
        }
    }
}

impl ParticleParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            count: param_usize(params, "count", DEFAULT_COUNT),
            link_distance: param_f64(params, "link_distance", DEFAULT_LINK_DISTANCE),
            max_pixel_ratio: param_f64(params, "max_pixel_ratio", DEFAULT_MAX_PIXEL_RATIO),
            speed: param_f64(params, "speed", DEFAULT_SPEED),
            radius_min: param_f64(params, "radius_min", DEFAULT_RADIUS_MIN),
            radius_span: param_f64(params, "radius_span", DEFAULT_RADIUS_SPAN),
            hue_min: param_f64(params, "hue_min", DEFAULT_HUE_MIN),
            hue_span: param_f64(params, "hue_span", DEFAULT_HUE_SPAN),
        }
    }
}

/// A single simulated point. Positions and radii are in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    /// Fixed per-particle hue offset.
    pub hue: f64,
}

impl Particle {
    fn random(rng: &mut Xorshift64, size: &SurfaceSize, params: &ParticleParams) -> Self {
        let ratio = size.pixel_ratio;
        let position = DVec2::new(
            rng.next_range(0.0, size.width),
            rng.next_range(0.0, size.height),
        );
        let velocity = DVec2::new(
            rng.next_centered(params.speed) * ratio,
            rng.next_centered(params.speed) * ratio,
        );
        let radius = (rng.next_f64() * params.radius_span + params.radius_min) * ratio;
        let hue = params.hue_min + rng.next_f64() * params.hue_span;
        Self {
            position,
            velocity,
            radius,
            hue,
        }
    }

    /// Moves by one velocity step, then reflects each axis that is outside
    /// `[0, bounds]` and still heading outward.
    ///
    /// Positions are never clamped. A particle crossing a wall overshoots for
    /// one frame; one stranded outside (after a shrinking resize) is turned
    /// around once and drifts back in.
    pub fn advance(&mut self, bounds: DVec2) {
        self.position += self.velocity;
        let p = self.position;
        let v = self.velocity;
        if (p.x < 0.0 && v.x < 0.0) || (p.x > bounds.x && v.x > 0.0) {
            self.velocity.x = -v.x;
        }
        if (p.y < 0.0 && v.y < 0.0) || (p.y > bounds.y && v.y > 0.0) {
            self.velocity.y = -v.y;
        }
    }
}

/// The particle field animator.
///
/// Owns its particles, the current theme and the surface size. The particle
/// count is fixed at construction; only [`ParticleField::dispose`] empties it.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    params: ParticleParams,
    theme: Theme,
    size: SurfaceSize,
}

impl ParticleField {
    /// Sizes `surface` for the current viewport and scatters
    /// `params.count` particles over it.
    pub fn new(surface: &mut dyn Surface, theme: Theme, seed: u64, params: ParticleParams) -> Self {
        let size = SurfaceSize::from_viewport(surface.viewport(), params.max_pixel_ratio);
        surface.resize(&size);
        let mut rng = Xorshift64::new(seed);
        let particles = (0..params.count)
            .map(|_| Particle::random(&mut rng, &size, &params))
            .collect();
        log::debug!(
            "particle field: {} particles on {}x{} at ratio {}",
            params.count,
            size.backing_width(),
            size.backing_height(),
            size.pixel_ratio
        );
        Self {
            particles,
            params,
            theme,
            size,
        }
    }

    /// Creates a field from a JSON params object.
    pub fn from_json(surface: &mut dyn Surface, theme: Theme, seed: u64, params: &Value) -> Self {
        Self::new(surface, theme, seed, ParticleParams::from_json(params))
    }

    /// Builds a field around existing particles without touching a surface.
    pub fn with_particles(
        particles: Vec<Particle>,
        size: SurfaceSize,
        theme: Theme,
        params: ParticleParams,
    ) -> Self {
        Self {
            particles,
            params,
            theme,
            size,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn bounds(&self) -> DVec2 {
        DVec2::new(self.size.width, self.size.height)
    }

    /// Link threshold in device pixels.
    pub fn link_distance(&self) -> f64 {
        self.params.link_distance * self.size.pixel_ratio
    }

    /// Stores the theme for the next frame. Particles are untouched.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Recomputes surface dimensions from the current viewport.
    ///
    /// Existing particles keep their positions, velocities and radii even if
    /// they now lie outside the new bounds.
    pub fn resize(&mut self, surface: &mut dyn Surface) {
        self.size = SurfaceSize::from_viewport(surface.viewport(), self.params.max_pixel_ratio);
        surface.resize(&self.size);
        log::debug!(
            "particle field resized to {}x{}",
            self.size.backing_width(),
            self.size.backing_height()
        );
    }

    /// Advances every particle one step without drawing.
    pub fn advance(&mut self) {
        let bounds = self.bounds();
        for p in &mut self.particles {
            p.advance(bounds);
        }
    }

    /// Clears the surface, draws links, then moves and draws every particle.
    pub fn render_frame(&mut self, surface: &mut dyn Surface) {
        let style = ThemeStyle::for_theme(self.theme);
        surface.clear(self.size.width, self.size.height);
        self.draw_links(surface, &style);

        let bounds = self.bounds();
        for p in &mut self.particles {
            p.advance(bounds);
            surface.fill_circle(p.position, p.radius, style.dot_color(p.hue));
        }
    }

    fn draw_links(&self, surface: &mut dyn Surface, style: &ThemeStyle) {
        let max = self.link_distance();
        if max <= 0.0 {
            return;
        }
        let max_sq = max * max;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let dist_sq = a.position.distance_squared(b.position);
                if dist_sq < max_sq {
                    let alpha = (1.0 - dist_sq.sqrt() / max) * style.link_alpha;
                    surface.stroke_line(a.position, b.position, style.link_color(a.hue, b.hue, alpha));
                }
            }
        }
    }

    /// Clears the particle collection. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if !self.particles.is_empty() {
            log::debug!("particle field disposed");
        }
        self.particles.clear();
    }
}

impl Animation for ParticleField {
    fn frame(&mut self, surface: &mut dyn Surface) {
        self.render_frame(surface);
    }

    fn resize(&mut self, surface: &mut dyn Surface) {
        ParticleField::resize(self, surface);
    }

    fn set_theme(&mut self, theme: Theme) {
        ParticleField::set_theme(self, theme);
    }

    fn dispose(&mut self) {
        ParticleField::dispose(self);
    }

    fn params(&self) -> Value {
        json!({
            "count": self.params.count,
            "link_distance": self.params.link_distance,
            "max_pixel_ratio": self.params.max_pixel_ratio,
            "speed": self.params.speed,
            "radius_min": self.params.radius_min,
            "radius_span": self.params.radius_span,
            "hue_min": self.params.hue_min,
            "hue_span": self.params.hue_span,
        })
    }

    fn param_schema(&self) -> Value {
        param_schema()
    }
}

/// Schema for [`ParticleParams`], available without a field instance.
pub fn param_schema() -> Value {
    json!({
        "count": {
            "type": "integer",
            "default": DEFAULT_COUNT,
            "min": 0,
            "max": 500,
            "description": "Number of particles; fixed for the field's lifetime"
        },
        "link_distance": {
            "type": "number",
            "default": DEFAULT_LINK_DISTANCE,
            "min": 0.0,
            "max": 400.0,
            "description": "Max distance (CSS px) at which two particles are linked"
        },
        "max_pixel_ratio": {
            "type": "number",
            "default": DEFAULT_MAX_PIXEL_RATIO,
            "min": 1.0,
            "max": 4.0,
            "description": "Cap on device pixel ratio for the backing store"
        },
        "speed": {
            "type": "number",
            "default": DEFAULT_SPEED,
            "min": 0.0,
            "max": 5.0,
            "description": "Width of the per-axis velocity range (CSS px per frame)"
        },
        "radius_min": {
            "type": "number",
            "default": DEFAULT_RADIUS_MIN,
            "min": 0.0,
            "max": 10.0,
            "description": "Smallest particle radius (CSS px)"
        },
        "radius_span": {
            "type": "number",
            "default": DEFAULT_RADIUS_SPAN,
            "min": 0.0,
            "max": 10.0,
            "description": "Radius range above radius_min (CSS px)"
        },
        "hue_min": {
            "type": "number",
            "default": DEFAULT_HUE_MIN,
            "min": 0.0,
            "max": 360.0,
            "description": "Lowest per-particle hue offset"
        },
        "hue_span": {
            "type": "number",
            "default": DEFAULT_HUE_SPAN,
            "min": 0.0,
            "max": 360.0,
            "description": "Hue offset range above hue_min"
        }
    })
}
