//! Scene selection, animation speed and per-scene settings.

use serde::{Deserialize, Serialize};

use crate::Vec2;

/// Which animation is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    /// Drifting particles linked by faint lines.
    #[default]
    Particles,
    /// Sun, orbiting planets, stars, dust and nebulas.
    SolarSystem,
}

impl SceneKind {
    /// Cycle to the next scene.
    pub fn next(self) -> Self {
        match self {
            SceneKind::Particles => SceneKind::SolarSystem,
            SceneKind::SolarSystem => SceneKind::Particles,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Particles => "Particles",
            SceneKind::SolarSystem => "Solar System",
        }
    }
}

/// Animation speed, scaling every per-tick increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to per-tick motion.
    pub fn tick_scale(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

/// Pointer state written by the input adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// Last known position; `None` until the pointer first moves.
    pub position: Option<Vec2>,
    /// Radius within which particles are pushed away.
    pub radius: f32,
}

impl Pointer {
    pub fn new(radius: f32) -> Self {
        Self {
            position: None,
            radius,
        }
    }
}

/// Particle field parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Number of particles.
    pub count: usize,
    /// Pointer influence radius.
    pub pointer_radius: f32,
    /// Maximum distance at which two particles are linked.
    pub link_distance: f32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 150,
            pointer_radius: 100.0,
            link_distance: 100.0,
        }
    }
}

/// Solar system background parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarSettings {
    pub stars: usize,
    pub dust: usize,
    pub nebulas: usize,
}

impl Default for SolarSettings {
    fn default() -> Self {
        Self {
            stars: 200,
            dust: 120,
            nebulas: 5,
        }
    }
}
