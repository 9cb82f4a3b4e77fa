//! Configuration for the orrery animations.
//!
//! Settings live in `config.toml` under the platform config directory. A
//! missing file means defaults; missing keys inside a file also fall back
//! to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, eyre};
use directories::ProjectDirs;
use orrery_core::{AnimationSpeed, ParticleSettings, SceneKind, SolarSettings};
use serde::{Deserialize, Serialize};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Lowest and highest accepted frame rate.
const FPS_RANGE: (u32, u32) = (1, 120);
/// Link drawing checks every pair, so the particle count stays small.
const MAX_PARTICLES: usize = 500;
/// Upper bound for each solar backdrop collection.
const MAX_BACKDROP_OBJECTS: usize = 2000;

/// Fallback logical units per terminal pixel.
const DEFAULT_CELL_SCALE: f32 = 6.0;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scene shown at startup.
    pub scene: SceneKind,
    /// Animation speed at startup.
    pub speed: AnimationSpeed,
    /// Random seed; `None` seeds from the clock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Target frames per second.
    pub fps: u32,
    /// Logical canvas units per terminal pixel.
    pub cell_scale: f32,
    /// Show the login panel at startup.
    pub show_login: bool,
    pub particles: ParticleSettings,
    pub solar: SolarSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: SceneKind::default(),
            speed: AnimationSpeed::default(),
            seed: None,
            fps: 30,
            cell_scale: DEFAULT_CELL_SCALE,
            show_login: true,
            particles: ParticleSettings::default(),
            solar: SolarSettings::default(),
        }
    }
}

impl Config {
    /// Platform directories for orrery, if a home directory is known.
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "orrery")
    }

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or_else(|| eyre!("could not determine the home directory"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, returning defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).wrap_err_with(|| format!("invalid config file {}", path.display()))
    }

    /// Parse TOML text and clamp out-of-range values.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        Ok(config.validated())
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self).wrap_err("failed to serialize config")?;
        fs::write(path, text).wrap_err_with(|| format!("failed to write {}", path.display()))
    }

    /// Clamp values the animations cannot work with.
    pub fn validated(mut self) -> Self {
        self.fps = self.fps.clamp(FPS_RANGE.0, FPS_RANGE.1);
        if !(self.cell_scale.is_finite() && self.cell_scale > 0.0) {
            self.cell_scale = DEFAULT_CELL_SCALE;
        }
        if !(self.particles.pointer_radius.is_finite() && self.particles.pointer_radius >= 0.0) {
            self.particles.pointer_radius = ParticleSettings::default().pointer_radius;
        }
        if !(self.particles.link_distance.is_finite() && self.particles.link_distance > 0.0) {
            self.particles.link_distance = ParticleSettings::default().link_distance;
        }
        self.particles.count = self.particles.count.min(MAX_PARTICLES);
        self.solar.stars = self.solar.stars.min(MAX_BACKDROP_OBJECTS);
        self.solar.dust = self.solar.dust.min(MAX_BACKDROP_OBJECTS);
        self.solar.nebulas = self.solar.nebulas.min(MAX_BACKDROP_OBJECTS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("orrery-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            scene = "solar-system"
            seed = 42

            [particles]
            count = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.scene, SceneKind::SolarSystem);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.particles.count, 10);
        assert_eq!(config.particles.pointer_radius, 100.0);
        assert_eq!(config.solar, SolarSettings::default());
        assert_eq!(config.speed, AnimationSpeed::Medium);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::parse(
            r#"
            fps = 0
            cell_scale = -2.0

            [particles]
            link_distance = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.fps, 1);
        assert_eq!(config.cell_scale, DEFAULT_CELL_SCALE);
        assert_eq!(config.particles.link_distance, 100.0);

        let config = Config::parse("fps = 1000").unwrap();
        assert_eq!(config.fps, 120);
    }

    #[test]
    fn huge_counts_are_capped() {
        let config = Config::parse(
            r#"
            [particles]
            count = 50000

            [solar]
            stars = 1000000
            dust = 30
            nebulas = 99999
            "#,
        )
        .unwrap();
        assert_eq!(config.particles.count, MAX_PARTICLES);
        assert_eq!(config.solar.stars, MAX_BACKDROP_OBJECTS);
        assert_eq!(config.solar.dust, 30);
        assert_eq!(config.solar.nebulas, MAX_BACKDROP_OBJECTS);
    }

    #[test]
    fn unknown_scene_is_an_error() {
        assert!(Config::parse(r#"scene = "fireworks""#).is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = temp_path("does-not-exist.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("nested/config.toml");
        let config = Config {
            scene: SceneKind::SolarSystem,
            speed: AnimationSpeed::Fast,
            seed: Some(7),
            show_login: false,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_dir_all(path.parent().and_then(Path::parent).unwrap());
    }
}
