//! Core types shared by the orrery crates.
//!
//! Geometry and colour value types, the scene/speed enums with their
//! settings, and the [`Surface`] drawing abstraction the animations paint on.

mod geometry;
mod rgba;
mod scene;
mod surface;

pub use geometry::{Bounds, Vec2};
pub use rgba::Rgba;
pub use scene::{AnimationSpeed, ParticleSettings, Pointer, SceneKind, SolarSettings};
pub use surface::{DrawCommand, RecordingSurface, Surface};
