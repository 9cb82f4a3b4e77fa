//! Solar system animation (stateful).

mod backdrop;
mod bodies;

pub use backdrop::{Dust, Nebula, PULSE_AMPLITUDE, Star, TWINKLE_AMPLITUDE};
pub use bodies::{Planet, PlanetFeatures, Sun, planets};

use orrery_core::{Bounds, Rgba, SolarSettings, Surface};
use rand::Rng;

const SPACE_COLOR: Rgba = Rgba::opaque(5, 6, 20);

/// Everything in the solar system scene.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    stars: Vec<Star>,
    dust: Vec<Dust>,
    nebulas: Vec<Nebula>,
    sun: Sun,
    planets: Vec<Planet>,
    settings: SolarSettings,
    bounds: Bounds,
}

impl SolarSystem {
    pub fn new<R: Rng>(settings: SolarSettings, bounds: Bounds, rng: &mut R) -> Self {
        let mut system = Self {
            stars: Vec::new(),
            dust: Vec::new(),
            nebulas: Vec::new(),
            sun: Sun::new(bounds),
            planets: planets(rng),
            settings,
            bounds,
        };
        system.scatter_backdrop(rng);
        system
    }

    /// Regenerate stars, dust and nebulas inside the current bounds.
    fn scatter_backdrop<R: Rng>(&mut self, rng: &mut R) {
        let bounds = self.bounds;
        self.stars = (0..self.settings.stars)
            .map(|_| Star::random(rng, bounds))
            .collect();
        self.dust = (0..self.settings.dust)
            .map(|_| Dust::random(rng, bounds))
            .collect();
        self.nebulas = (0..self.settings.nebulas)
            .map(|_| Nebula::random(rng, bounds))
            .collect();
    }

    /// New bounds: the backdrop is regenerated, the sun recentred, planets kept.
    pub fn resize<R: Rng>(&mut self, bounds: Bounds, rng: &mut R) {
        self.bounds = bounds;
        self.sun = Sun::new(bounds);
        self.scatter_backdrop(rng);
    }

    pub fn update(&mut self, scale: f32) {
        for star in &mut self.stars {
            star.twinkle(scale);
        }
        for nebula in &mut self.nebulas {
            nebula.pulse(scale);
        }
        for dust in &mut self.dust {
            dust.drift(self.bounds, scale);
        }
        for planet in &mut self.planets {
            planet.advance(scale);
        }
    }

    /// Paint back to front: nebulas, stars, dust, orbits, sun, planets.
    pub fn render<S: Surface, R: Rng>(&self, surface: &mut S, rng: &mut R) {
        surface.clear();
        let bounds = surface.bounds();
        surface.fill_radial_gradient(
            bounds.center(),
            bounds.width.hypot(bounds.height) / 2.0,
            &[(0.0, SPACE_COLOR.with_alpha(0.6)), (1.0, SPACE_COLOR)],
        );

        for nebula in &self.nebulas {
            nebula.render(surface);
        }
        for star in &self.stars {
            star.render(surface);
        }
        for dust in &self.dust {
            dust.render(surface);
        }
        for planet in &self.planets {
            planet.render_orbit(surface, self.sun.center);
        }
        self.sun.render(surface, rng);
        for planet in &self.planets {
            planet.render(surface, self.sun.center, rng);
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn dust(&self) -> &[Dust] {
        &self.dust
    }

    pub fn nebulas(&self) -> &[Nebula] {
        &self.nebulas
    }

    pub fn sun(&self) -> &Sun {
        &self.sun
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }
}
