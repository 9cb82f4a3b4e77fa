//! The sun and its planets.

use std::f32::consts::TAU;

use orrery_core::{Bounds, Rgba, Surface, Vec2};
use rand::Rng;

use crate::color::{darken, lighten};

const SUN_CORE_RADIUS: f32 = 30.0;
const SUN_GLOW_RADIUS: f32 = 80.0;
const SUN_CORE_COLOR: Rgba = Rgba::opaque(253, 184, 19);
const SUN_BLEMISHES: usize = 6;
const TEXTURE_BLEMISHES: usize = 4;
const ORBIT_COLOR: Rgba = Rgba::new(255, 255, 255, 0.08);

/// The sun, always at the canvas center.
#[derive(Debug, Clone, PartialEq)]
pub struct Sun {
    pub center: Vec2,
    pub core_radius: f32,
    pub glow_radius: f32,
}

impl Sun {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            center: bounds.center(),
            core_radius: SUN_CORE_RADIUS,
            glow_radius: SUN_GLOW_RADIUS,
        }
    }

    /// Glow, core disc, then surface spots that change every frame.
    pub fn render<S: Surface, R: Rng>(&self, surface: &mut S, rng: &mut R) {
        surface.fill_radial_gradient(
            self.center,
            self.glow_radius,
            &[
                (0.0, Rgba::new(255, 240, 150, 0.9)),
                (0.35, Rgba::new(255, 170, 40, 0.5)),
                (1.0, Rgba::new(255, 120, 0, 0.0)),
            ],
        );
        surface.fill_circle(self.center, self.core_radius, SUN_CORE_COLOR);

        let spot_color = darken(SUN_CORE_COLOR, 0.12).with_alpha(0.5);
        for _ in 0..SUN_BLEMISHES {
            let offset = Vec2::from_angle(rng.gen_range(0.0..TAU))
                * (rng.gen_range(0.0..0.7) * self.core_radius);
            let radius = self.core_radius * rng.gen_range(0.05..0.2);
            surface.fill_circle(self.center + offset, radius, spot_color);
        }
    }
}

/// Optional surface decorations of a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanetFeatures {
    pub rings: bool,
    pub bands: bool,
    pub clouds: bool,
    pub texture: bool,
}

impl PlanetFeatures {
    const PLAIN: PlanetFeatures = PlanetFeatures {
        rings: false,
        bands: false,
        clouds: false,
        texture: false,
    };
}

/// A planet on a fixed circular orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub name: &'static str,
    /// Orbit radius around the sun center.
    pub distance: f32,
    pub size: f32,
    pub color: Rgba,
    /// Orbital angle step per tick, positive.
    pub angular_speed: f32,
    /// Orbital angle in `0.0..TAU`.
    pub angle: f32,
    /// Spin angle of the planet itself.
    pub rotation: f32,
    pub rotation_speed: f32,
    pub features: PlanetFeatures,
}

/// `(name, distance, size, color, angular speed, rotation speed, features)`
type PlanetRow = (&'static str, f32, f32, Rgba, f32, f32, PlanetFeatures);

const PLANETS: [PlanetRow; 8] = [
    ("Mercury", 60.0, 3.0, Rgba::opaque(169, 169, 169), 0.047, 0.010, PlanetFeatures::PLAIN),
    ("Venus", 85.0, 5.0, Rgba::opaque(255, 198, 73), 0.035, 0.008, PlanetFeatures::PLAIN),
    (
        "Earth",
        115.0,
        5.5,
        Rgba::opaque(100, 149, 237),
        0.029,
        0.050,
        PlanetFeatures {
            clouds: true,
            ..PlanetFeatures::PLAIN
        },
    ),
    ("Mars", 145.0, 4.0, Rgba::opaque(193, 68, 14), 0.024, 0.048, PlanetFeatures::PLAIN),
    (
        "Jupiter",
        190.0,
        12.0,
        Rgba::opaque(216, 202, 157),
        0.013,
        0.040,
        PlanetFeatures {
            bands: true,
            texture: true,
            ..PlanetFeatures::PLAIN
        },
    ),
    (
        "Saturn",
        240.0,
        10.0,
        Rgba::opaque(250, 213, 165),
        0.009,
        0.038,
        PlanetFeatures {
            rings: true,
            texture: true,
            ..PlanetFeatures::PLAIN
        },
    ),
    (
        "Uranus",
        285.0,
        7.0,
        Rgba::opaque(79, 208, 231),
        0.006,
        0.030,
        PlanetFeatures {
            rings: true,
            ..PlanetFeatures::PLAIN
        },
    ),
    (
        "Neptune",
        325.0,
        7.0,
        Rgba::opaque(65, 102, 245),
        0.005,
        0.032,
        PlanetFeatures {
            texture: true,
            ..PlanetFeatures::PLAIN
        },
    ),
];

/// The eight planets, each starting at a random point of its orbit.
pub fn planets<R: Rng>(rng: &mut R) -> Vec<Planet> {
    PLANETS
        .iter()
        .map(
            |&(name, distance, size, color, angular_speed, rotation_speed, features)| Planet {
                name,
                distance,
                size,
                color,
                angular_speed,
                angle: rng.gen_range(0.0..TAU),
                rotation: 0.0,
                rotation_speed,
                features,
            },
        )
        .collect()
}

impl Planet {
    /// Advance orbit and spin one tick.
    pub fn advance(&mut self, scale: f32) {
        self.angle = (self.angle + self.angular_speed * scale).rem_euclid(TAU);
        self.rotation = (self.rotation + self.rotation_speed * scale).rem_euclid(TAU);
    }

    /// Position on the orbit around `sun`.
    pub fn position(&self, sun: Vec2) -> Vec2 {
        sun + Vec2::from_angle(self.angle) * self.distance
    }

    pub fn render_orbit<S: Surface>(&self, surface: &mut S, sun: Vec2) {
        surface.stroke_circle(sun, self.distance, 0.5, ORBIT_COLOR);
    }

    pub fn render<S: Surface, R: Rng>(&self, surface: &mut S, sun: Vec2, rng: &mut R) {
        let center = self.position(sun);
        let size = self.size;

        surface.fill_circle(center, size, self.color);

        if self.features.bands {
            let band = darken(self.color, 0.12).with_alpha(0.7);
            for row in [-0.5_f32, 0.0, 0.5] {
                let y = row * size;
                let half = (size * size - y * y).sqrt();
                surface.stroke_line(
                    center + Vec2::new(-half, y),
                    center + Vec2::new(half, y),
                    size * 0.15,
                    band,
                );
            }
        }

        if self.features.texture {
            let spot = lighten(self.color, 0.12).with_alpha(0.6);
            for _ in 0..TEXTURE_BLEMISHES {
                let offset = Vec2::new(
                    rng.gen_range(-0.6..0.6) * size,
                    rng.gen_range(-0.6..0.6) * size,
                )
                .rotate(self.rotation);
                surface.fill_circle(center + offset, size * rng.gen_range(0.1..0.25), spot);
            }
        }

        if self.features.clouds {
            let cloud = Rgba::new(255, 255, 255, 0.35);
            for (angle, reach) in [(0.0_f32, 0.5_f32), (2.2, 0.4), (4.1, 0.6)] {
                let offset = Vec2::from_angle(angle + self.rotation) * (reach * size);
                surface.fill_circle(center + offset, size * 0.3, cloud);
            }
        }

        if self.features.rings {
            surface.stroke_ellipse(
                center,
                Vec2::new(size * 2.0, size * 0.6),
                -0.3,
                1.5,
                lighten(self.color, 0.1).with_alpha(0.7),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::{DrawCommand, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn catalogue_has_eight_planets_in_order() {
        let planets = planets(&mut rng());
        let names: Vec<_> = planets.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
        assert!(planets.windows(2).all(|w| w[0].distance < w[1].distance));
        assert!(planets.iter().all(|p| p.angular_speed > 0.0 && p.size > 0.0));
    }

    #[test]
    fn angle_advances_by_its_step() {
        let mut planets = planets(&mut rng());
        for _ in 0..2000 {
            for planet in &mut planets {
                let before = planet.angle;
                planet.advance(1.0);
                let step = (planet.angle - before).rem_euclid(TAU);
                assert!((step - planet.angular_speed).abs() < 1e-4, "{}", planet.name);
                assert!((0.0..TAU).contains(&planet.angle));
            }
        }
    }

    #[test]
    fn position_stays_on_orbit() {
        let sun = Vec2::new(400.0, 300.0);
        let mut planets = planets(&mut rng());
        for _ in 0..500 {
            for planet in &mut planets {
                planet.advance(2.0);
                let r = planet.position(sun).distance(sun);
                assert!((r - planet.distance).abs() < 1e-3, "{}: {r}", planet.name);
            }
        }
    }

    #[test]
    fn sun_follows_canvas_center() {
        let sun = Sun::new(Bounds::new(640.0, 480.0));
        assert_eq!(sun.center, Vec2::new(320.0, 240.0));
    }

    #[test]
    fn sun_spots_lie_inside_core() {
        let sun = Sun::new(Bounds::new(600.0, 600.0));
        let mut surface = RecordingSurface::new(Bounds::new(600.0, 600.0));
        sun.render(&mut surface, &mut rng());
        let discs: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(discs.len(), 1 + SUN_BLEMISHES);
        for (center, _) in &discs[1..] {
            assert!(center.distance(sun.center) <= sun.core_radius * 0.7 + 1e-3);
        }
    }

    #[test]
    fn ringed_planets_draw_an_ellipse() {
        let sun = Vec2::new(300.0, 300.0);
        let mut r = rng();
        for planet in planets(&mut r) {
            let mut surface = RecordingSurface::new(Bounds::new(600.0, 600.0));
            planet.render(&mut surface, sun, &mut r);
            let ellipses = surface
                .commands()
                .iter()
                .filter(|c| matches!(c, DrawCommand::StrokeEllipse { .. }))
                .count();
            assert_eq!(ellipses, usize::from(planet.features.rings), "{}", planet.name);
        }
    }

    #[test]
    fn texture_spots_are_lighter_and_near_planet() {
        let sun = Vec2::new(300.0, 300.0);
        let mut r = rng();
        let jupiter = planets(&mut r).into_iter().find(|p| p.name == "Jupiter").unwrap();
        let mut surface = RecordingSurface::new(Bounds::new(600.0, 600.0));
        jupiter.render(&mut surface, sun, &mut r);
        let center = jupiter.position(sun);
        let spots: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { center: c, color, .. } if color.a < 1.0 => {
                    Some((*c, *color))
                }
                _ => None,
            })
            .collect();
        assert_eq!(spots.len(), TEXTURE_BLEMISHES);
        for (c, color) in spots {
            assert!(c.distance(center) <= jupiter.size * 0.6 * std::f32::consts::SQRT_2 + 1e-3);
            let brightness = |c: Rgba| c.r as u16 + c.g as u16 + c.b as u16;
            assert!(brightness(color) > brightness(jupiter.color));
        }
    }
}
