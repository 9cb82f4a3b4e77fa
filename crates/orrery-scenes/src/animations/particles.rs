//! Particle field animation (stateful).
//!
//! Particles follow a small circular wave, get pushed away from the pointer,
//! drift with their own velocity and bounce off the canvas edges. Particles
//! closer than the link distance are joined by faint lines.

use std::f32::consts::TAU;

use orrery_core::{Bounds, ParticleSettings, Pointer, Rgba, Surface, Vec2};
use rand::Rng;

/// Colours a particle can be given.
pub const PARTICLE_COLORS: [Rgba; 3] = [
    Rgba::new(102, 126, 234, 0.6),
    Rgba::new(118, 75, 162, 0.6),
    Rgba::new(255, 255, 255, 0.4),
];

/// Phase advance per tick.
const PHASE_STEP: f32 = 0.02;
/// Wave displacement per unit of amplitude.
const WAVE_SCALE: f32 = 0.3;
/// Displacement at zero distance from the pointer.
const REPULSION_STRENGTH: f32 = 5.0;
/// Halo width around each particle.
const GLOW_BLUR: f32 = 15.0;
/// Link opacity at zero distance.
const LINK_MAX_ALPHA: f32 = 0.2;
const LINK_WIDTH: f32 = 0.5;

/// State for a single particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Disc radius, always positive.
    pub size: f32,
    /// Constant drift per tick; components flip on bounce.
    pub velocity: Vec2,
    pub color: Rgba,
    /// Wave phase in radians, advanced every tick and kept in `0..TAU`.
    pub phase: f32,
    pub wave_amplitude: f32,
}

impl Particle {
    /// A particle placed uniformly inside `bounds`.
    pub fn random<R: Rng>(rng: &mut R, bounds: Bounds) -> Self {
        Self {
            position: Vec2::new(
                rng.gen_range(0.0..1.0) * bounds.width,
                rng.gen_range(0.0..1.0) * bounds.height,
            ),
            size: rng.gen_range(1.0..4.0),
            velocity: Vec2::new(rng.gen_range(-1.5..1.5), rng.gen_range(-1.5..1.5)),
            color: PARTICLE_COLORS[rng.gen_range(0..PARTICLE_COLORS.len())],
            phase: rng.gen_range(0.0..TAU),
            wave_amplitude: rng.gen_range(1.0..3.0),
        }
    }

    /// Advance one tick.
    pub fn update(&mut self, pointer: &Pointer, bounds: Bounds, scale: f32) {
        // Wave motion
        self.phase = (self.phase + PHASE_STEP * scale).rem_euclid(TAU);
        let wave = self.wave_amplitude * WAVE_SCALE * scale;
        self.position += Vec2::new(self.phase.sin(), self.phase.cos()) * wave;

        // Pointer repulsion
        if let Some(push) = repulsion(self.position, pointer) {
            self.position += push * scale;
        }

        self.position += self.velocity * scale;

        // Bounce off walls
        if self.position.x < 0.0 || self.position.x > bounds.width {
            self.velocity.x = -self.velocity.x;
            self.position.x = self.position.x.clamp(0.0, bounds.width);
        }
        if self.position.y < 0.0 || self.position.y > bounds.height {
            self.velocity.y = -self.velocity.y;
            self.position.y = self.position.y.clamp(0.0, bounds.height);
        }
    }
}

/// Displacement pushing `position` away from the pointer, if within reach.
///
/// The magnitude falls linearly from [`REPULSION_STRENGTH`] at the pointer
/// to zero at its radius.
pub fn repulsion(position: Vec2, pointer: &Pointer) -> Option<Vec2> {
    let origin = pointer.position?;
    let offset = position - origin;
    let distance = offset.length();
    if distance >= pointer.radius {
        return None;
    }
    let direction = if distance > 0.0 {
        offset * (1.0 / distance)
    } else {
        Vec2::new(1.0, 0.0)
    };
    let force = (pointer.radius - distance) / pointer.radius;
    Some(direction * (force * REPULSION_STRENGTH))
}

/// Opacity of the line joining two particles `distance` apart, or `None`
/// when they are too far apart to be linked.
pub fn link_alpha(distance: f32, link_distance: f32) -> Option<f32> {
    (distance < link_distance).then(|| (1.0 - distance / link_distance) * LINK_MAX_ALPHA)
}

/// The particle field.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    settings: ParticleSettings,
    bounds: Bounds,
}

impl ParticleField {
    /// Create `settings.count` particles inside `bounds`.
    pub fn new<R: Rng>(settings: ParticleSettings, bounds: Bounds, rng: &mut R) -> Self {
        let particles = (0..settings.count)
            .map(|_| Particle::random(rng, bounds))
            .collect();
        Self {
            particles,
            settings,
            bounds,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Change the canvas bounds; particles keep their state and are brought
    /// back inside by the next bounce.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Advance every particle one tick.
    pub fn update(&mut self, pointer: &Pointer, scale: f32) {
        for particle in &mut self.particles {
            particle.update(pointer, self.bounds, scale);
        }
    }

    /// Pairs `(i, j, alpha)` with `i < j` close enough to be linked.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let link_distance = self.settings.link_distance;
        self.particles.iter().enumerate().flat_map(move |(i, a)| {
            self.particles[i + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, b)| {
                    link_alpha(a.position.distance(b.position), link_distance)
                        .map(|alpha| (i, i + 1 + offset, alpha))
                })
        })
    }

    /// Draw links first, then the particles on top.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        surface.clear();

        for (i, j, alpha) in self.links() {
            surface.stroke_line(
                self.particles[i].position,
                self.particles[j].position,
                LINK_WIDTH,
                Rgba::WHITE.with_alpha(alpha),
            );
        }

        for particle in &self.particles {
            surface.fill_glow_circle(particle.position, particle.size, GLOW_BLUR, particle.color);
        }
    }
}
