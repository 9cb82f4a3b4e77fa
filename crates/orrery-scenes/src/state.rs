//! Scene state management.

use orrery_core::{
    AnimationSpeed, Bounds, ParticleSettings, Pointer, SceneKind, SolarSettings, Surface, Vec2,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::animations::particles::ParticleField;
use crate::animations::solar::SolarSystem;

/// Everything needed to build a [`SceneState`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneOptions {
    pub kind: SceneKind,
    pub speed: AnimationSpeed,
    /// Seed for every random choice the scenes make.
    pub seed: u64,
    pub particles: ParticleSettings,
    pub solar: SolarSettings,
}

/// Both animations plus the input they react to.
#[derive(Debug)]
pub struct SceneState {
    options: SceneOptions,
    /// Particle field scene.
    particles: ParticleField,
    /// Solar system scene.
    solar: SolarSystem,
    /// Pointer written by the input adapter.
    pointer: Pointer,
    /// Last known canvas bounds.
    bounds: Bounds,
    rng: StdRng,
    ticks: u64,
    /// The collections were generated with no room and still sit at the origin.
    built_empty: bool,
}

impl SceneState {
    /// Build both scenes inside `bounds`.
    pub fn new(options: SceneOptions, bounds: Bounds) -> Self {
        let mut rng = StdRng::seed_from_u64(options.seed);
        let particles = ParticleField::new(options.particles, bounds, &mut rng);
        let solar = SolarSystem::new(options.solar, bounds, &mut rng);
        Self {
            options,
            particles,
            solar,
            pointer: Pointer::new(options.particles.pointer_radius),
            bounds,
            rng,
            ticks: 0,
            built_empty: bounds.is_empty(),
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.options.kind
    }

    pub fn set_kind(&mut self, kind: SceneKind) {
        if kind != self.options.kind {
            info!(scene = kind.name(), "switching scene");
            self.options.kind = kind;
        }
    }

    pub fn speed(&self) -> AnimationSpeed {
        self.options.speed
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.options.speed = speed;
    }

    pub fn seed(&self) -> u64 {
        self.options.seed
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn solar(&self) -> &SolarSystem {
        &self.solar
    }

    /// Record where the pointer is, or that it left.
    pub fn set_pointer(&mut self, position: Option<Vec2>) {
        self.pointer.position = position;
    }

    /// Throw away every object and rebuild from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        info!(seed, "reseeding scenes");
        let pointer = self.pointer;
        *self = Self::new(
            SceneOptions {
                seed,
                ..self.options
            },
            self.bounds,
        );
        self.pointer = pointer;
    }

    /// Adopt new canvas bounds. Returns true when they changed.
    ///
    /// The first real bounds after building without room rebuild everything,
    /// since those objects all sit at the origin. Later resizes, including
    /// through an empty canvas, keep particles and planets.
    pub fn sync_bounds(&mut self, bounds: Bounds) -> bool {
        if bounds == self.bounds {
            return false;
        }
        debug!(width = bounds.width, height = bounds.height, "canvas resized");
        if self.built_empty && !bounds.is_empty() {
            let pointer = self.pointer;
            let ticks = self.ticks;
            *self = Self::new(self.options, bounds);
            self.pointer = pointer;
            self.ticks = ticks;
        } else {
            self.bounds = bounds;
            self.particles.resize(bounds);
            self.solar.resize(bounds, &mut self.rng);
        }
        true
    }

    /// Advance the active scene one tick.
    pub fn tick(&mut self) {
        let scale = self.options.speed.tick_scale();
        match self.options.kind {
            SceneKind::Particles => self.particles.update(&self.pointer, scale),
            SceneKind::SolarSystem => self.solar.update(scale),
        }
        self.ticks += 1;
    }

    /// Paint the active scene.
    pub fn render<S: Surface>(&mut self, surface: &mut S) {
        match self.options.kind {
            SceneKind::Particles => self.particles.render(surface),
            SceneKind::SolarSystem => self.solar.render(surface, &mut self.rng),
        }
    }
}
