//! Stars, drifting dust and pulsing nebulas behind the solar system.

use std::f32::consts::TAU;

use orrery_core::{Bounds, Rgba, Surface, Vec2};
use rand::Rng;

/// Peak deviation of a star's brightness from its base value.
pub const TWINKLE_AMPLITUDE: f32 = 0.3;
/// Peak relative change of a nebula's radius.
pub const PULSE_AMPLITUDE: f32 = 0.1;

const DUST_COLOR: Rgba = Rgba::new(200, 210, 255, 0.35);

/// Nebula tints, drawn at low opacity.
const NEBULA_COLORS: [Rgba; 4] = [
    Rgba::new(138, 43, 226, 0.12),
    Rgba::new(65, 105, 225, 0.1),
    Rgba::new(255, 105, 180, 0.08),
    Rgba::new(72, 61, 139, 0.12),
];

fn random_point<R: Rng>(rng: &mut R, bounds: Bounds) -> Vec2 {
    Vec2::new(
        rng.gen_range(0.0..1.0) * bounds.width,
        rng.gen_range(0.0..1.0) * bounds.height,
    )
}

/// A twinkling background star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub size: f32,
    /// Base brightness in `0.0..0.8`.
    pub brightness: f32,
    /// Twinkle angular rate per tick.
    pub twinkle_rate: f32,
    /// Twinkle angle, kept in `0..TAU`.
    pub twinkle_phase: f32,
}

impl Star {
    pub fn random<R: Rng>(rng: &mut R, bounds: Bounds) -> Self {
        Self {
            position: random_point(rng, bounds),
            size: rng.gen_range(0.5..2.0),
            brightness: rng.gen_range(0.0..0.8),
            twinkle_rate: rng.gen_range(0.01..0.06),
            twinkle_phase: rng.gen_range(0.0..TAU),
        }
    }

    /// Advance the twinkle one tick.
    pub fn twinkle(&mut self, scale: f32) {
        self.twinkle_phase = (self.twinkle_phase + self.twinkle_rate * scale).rem_euclid(TAU);
    }

    /// Raw brightness, in `-0.3..=1.1`.
    pub fn current_brightness(&self) -> f32 {
        self.brightness + self.twinkle_phase.sin() * TWINKLE_AMPLITUDE
    }

    /// Brightness as drawn: never negative.
    pub fn visible_brightness(&self) -> f32 {
        self.current_brightness().max(0.0)
    }

    pub fn render<S: Surface>(&self, surface: &mut S) {
        let alpha = self.visible_brightness().min(1.0);
        if alpha > 0.0 {
            surface.fill_circle(self.position, self.size, Rgba::WHITE.with_alpha(alpha));
        }
    }
}

/// A mote of dust drifting in a straight line, wrapping at the edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Dust {
    pub position: Vec2,
    pub size: f32,
    pub speed: f32,
    /// Direction of travel in radians.
    pub heading: f32,
}

impl Dust {
    pub fn random<R: Rng>(rng: &mut R, bounds: Bounds) -> Self {
        Self {
            position: random_point(rng, bounds),
            size: rng.gen_range(0.5..2.0),
            speed: rng.gen_range(0.1..0.4),
            heading: rng.gen_range(0.0..TAU),
        }
    }

    /// Move one tick and re-enter from the opposite edge when leaving.
    pub fn drift(&mut self, bounds: Bounds, scale: f32) {
        self.position += Vec2::from_angle(self.heading) * (self.speed * scale);
        self.position.x = wrap(self.position.x, bounds.width);
        self.position.y = wrap(self.position.y, bounds.height);
    }

    pub fn render<S: Surface>(&self, surface: &mut S) {
        surface.fill_circle(self.position, self.size, DUST_COLOR);
    }
}

/// Past the far edge restarts at 0, before the near edge restarts at `extent`.
fn wrap(value: f32, extent: f32) -> f32 {
    if value > extent {
        0.0
    } else if value < 0.0 {
        extent
    } else {
        value
    }
}

/// A soft glowing cloud whose radius breathes slowly.
#[derive(Debug, Clone, PartialEq)]
pub struct Nebula {
    pub position: Vec2,
    pub radius: f32,
    pub color: Rgba,
    pub pulse_rate: f32,
    /// Pulse angle, kept in `0..TAU`.
    pub pulse_phase: f32,
}

impl Nebula {
    pub fn random<R: Rng>(rng: &mut R, bounds: Bounds) -> Self {
        Self {
            position: random_point(rng, bounds),
            radius: rng.gen_range(100.0..250.0),
            color: NEBULA_COLORS[rng.gen_range(0..NEBULA_COLORS.len())],
            pulse_rate: rng.gen_range(0.005..0.015),
            pulse_phase: rng.gen_range(0.0..TAU),
        }
    }

    /// Advance the pulse one tick.
    pub fn pulse(&mut self, scale: f32) {
        self.pulse_phase = (self.pulse_phase + self.pulse_rate * scale).rem_euclid(TAU);
    }

    /// Radius multiplier, in `0.9..=1.1`.
    pub fn pulse_factor(&self) -> f32 {
        1.0 + self.pulse_phase.sin() * PULSE_AMPLITUDE
    }

    pub fn current_radius(&self) -> f32 {
        self.radius * self.pulse_factor()
    }

    pub fn render<S: Surface>(&self, surface: &mut S) {
        surface.fill_radial_gradient(
            self.position,
            self.current_radius(),
            &[(0.0, self.color), (1.0, self.color.with_alpha(0.0))],
        );
    }
}
