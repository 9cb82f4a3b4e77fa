//! Animation engines for orrery.
//!
//! Two stateful scenes, a drifting particle field and a solar system, share
//! one pattern: objects are generated once (and again on resize where the
//! scene asks for it), advanced every tick, and painted back to front onto a
//! [`Surface`](orrery_core::Surface). [`SceneState`] owns both scenes,
//! [`driver`] runs the frame loop, and [`PixelCanvas`] puts the result on a
//! terminal.

pub mod animations;
mod canvas;
mod color;
pub mod driver;
mod state;

pub use canvas::PixelCanvas;
pub use color::{darken, hsl_to_rgb, lighten, rgb_to_hsl};
pub use state::{SceneOptions, SceneState};
