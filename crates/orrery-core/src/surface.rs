//! Drawing surface abstraction.
//!
//! Animations only ever paint through [`Surface`], so the same scene code
//! renders into the terminal canvas or into a [`RecordingSurface`] in tests.

use crate::{Bounds, Rgba, Vec2};

/// A 2D surface in logical canvas units.
pub trait Surface {
    /// Current drawable size.
    fn bounds(&self) -> Bounds;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Filled disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Circle outline.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba);

    /// Straight line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    /// Ellipse outline with semi-axes `radii`, rotated by `rotation` radians.
    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, width: f32, color: Rgba);

    /// Disc shaded by colour stops along the radius.
    ///
    /// `stops` are `(offset, color)` pairs with offsets ascending in
    /// `0.0..=1.0`; offset 0 is the center, 1 is the rim.
    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, stops: &[(f32, Rgba)]);

    /// Disc with a soft halo of `blur` units around it.
    fn fill_glow_circle(&mut self, center: Vec2, radius: f32, blur: f32, color: Rgba) {
        let outer = radius + blur;
        let inner = radius / outer;
        self.fill_radial_gradient(
            center,
            outer,
            &[
                (inner, color.fade(0.5)),
                (1.0, color.with_alpha(0.0)),
            ],
        );
        self.fill_circle(center, radius, color);
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgba,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
    StrokeEllipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        width: f32,
        color: Rgba,
    },
    RadialGradient {
        center: Vec2,
        radius: f32,
        stops: Vec<(f32, Rgba)>,
    },
}

/// Surface that stores every call instead of drawing it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    bounds: Bounds,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Commands since the last clear (including the clear itself).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded line segments as `(from, to, color)`.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Rgba)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::StrokeLine { from, to, color, .. } => Some((*from, *to, *color)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeEllipse {
            center,
            radii,
            rotation,
            width,
            color,
        });
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, stops: &[(f32, Rgba)]) {
        self.commands.push(DrawCommand::RadialGradient {
            center,
            radius,
            stops: stops.to_vec(),
        });
    }
}
