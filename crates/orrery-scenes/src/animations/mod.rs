//! The animation engines.

pub mod particles;
pub mod solar;
