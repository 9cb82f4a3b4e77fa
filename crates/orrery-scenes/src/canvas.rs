//! Terminal pixel canvas.
//!
//! Each terminal cell shows two vertically stacked pixels using the upper
//! half block: the foreground colours the top pixel, the background the
//! bottom one. Drawing happens in logical units; `scale` logical units map
//! to one pixel.

use std::f32::consts::TAU;

use orrery_core::{Bounds, Rgba, Surface, Vec2};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

const HALF_BLOCK: char = '▀';
const BACKGROUND: [f32; 3] = [0.0, 0.0, 0.0];
/// Thinnest strokes still leave a visible trace.
const MIN_STROKE_COVERAGE: f32 = 0.35;

/// An RGB pixel buffer sized to the terminal.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    columns: u16,
    rows: u16,
    scale: f32,
    pixels: Vec<[f32; 3]>,
}

impl PixelCanvas {
    /// Canvas covering `columns` x `rows` terminal cells.
    pub fn new(columns: u16, rows: u16, scale: f32) -> Self {
        let mut canvas = Self {
            columns: 0,
            rows: 0,
            scale,
            pixels: Vec::new(),
        };
        canvas.resize(columns, rows);
        canvas
    }

    /// Match a new terminal size; contents are cleared when it changes.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        if columns == self.columns && rows == self.rows && !self.pixels.is_empty() {
            return;
        }
        self.columns = columns;
        self.rows = rows;
        self.pixels = vec![BACKGROUND; self.width() * self.height()];
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.columns as usize
    }

    /// Height in pixels, two per terminal row.
    pub fn height(&self) -> usize {
        self.rows as usize * 2
    }

    /// Logical position at the middle of a terminal cell.
    pub fn cell_center(&self, column: u16, row: u16) -> Vec2 {
        Vec2::new(
            (column as f32 + 0.5) * self.scale,
            (row as f32 * 2.0 + 1.0) * self.scale,
        )
    }

    /// Colour of a pixel, if inside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let [r, g, b] = self.pixels[y * self.width() + x];
        Some(Rgba::opaque(to_channel(r), to_channel(g), to_channel(b)))
    }

    fn to_pixels(&self, point: Vec2) -> (f32, f32) {
        (point.x / self.scale, point.y / self.scale)
    }

    /// Inclusive pixel range covering `center ± reach`, clipped to `limit`.
    fn span(center: f32, reach: f32, limit: usize) -> std::ops::RangeInclusive<i64> {
        let lo = ((center - reach).floor() as i64).max(0);
        let hi = ((center + reach).ceil() as i64).min(limit as i64 - 1);
        lo..=hi
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let index = y as usize * self.width() + x as usize;
        let source = [color.r as f32, color.g as f32, color.b as f32];
        for (dst, src) in self.pixels[index].iter_mut().zip(source) {
            *dst = *dst * (1.0 - alpha) + src * alpha;
        }
    }

    /// Plot a polyline through pixel-space points, touching each pixel
    /// at most once per run.
    fn plot_polyline(&mut self, points: &[(f32, f32)], color: Rgba, coverage: f32) {
        let mut last: Option<(i64, i64)> = None;
        for pair in points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            let (dx, dy) = (x1 - x0, y1 - y0);
            let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                let pixel = ((x0 + dx * t).floor() as i64, (y0 + dy * t).floor() as i64);
                if last != Some(pixel) {
                    self.blend(pixel.0, pixel.1, color, coverage);
                    last = Some(pixel);
                }
            }
        }
    }

    fn stroke_coverage(&self, width: f32) -> f32 {
        (width / self.scale).clamp(MIN_STROKE_COVERAGE, 1.0)
    }
}

/// Colour at offset `t` along sorted gradient stops.
fn sample_stops(stops: &[(f32, Rgba)], t: f32) -> Rgba {
    let Some(&(first_offset, first)) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first_offset {
        return first;
    }
    for pair in stops.windows(2) {
        let ((a_offset, a), (b_offset, b)) = (pair[0], pair[1]);
        if t <= b_offset {
            let span = b_offset - a_offset;
            let local = if span > 0.0 { (t - a_offset) / span } else { 1.0 };
            return a.lerp(b, local);
        }
    }
    stops[stops.len() - 1].1
}

fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl Surface for PixelCanvas {
    fn bounds(&self) -> Bounds {
        Bounds::new(
            self.width() as f32 * self.scale,
            self.height() as f32 * self.scale,
        )
    }

    fn clear(&mut self) {
        self.pixels.fill(BACKGROUND);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let (cx, cy) = self.to_pixels(center);
        let r = radius / self.scale;
        if r <= 0.0 {
            return;
        }
        // Sub-pixel discs still light their pixel, only fainter.
        let (r, faintness) = if r < 0.5 {
            (0.5, (r / 0.5).max(0.5))
        } else {
            (r, 1.0)
        };
        let reach = r + 1.0;
        for y in Self::span(cy, reach, self.height()) {
            for x in Self::span(cx, reach, self.width()) {
                let d = (x as f32 + 0.5 - cx).hypot(y as f32 + 0.5 - cy);
                let coverage = (r + 0.5 - d).clamp(0.0, 1.0) * faintness;
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        self.stroke_ellipse(center, Vec2::new(radius, radius), 0.0, width, color);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let coverage = self.stroke_coverage(width);
        let points = [self.to_pixels(from), self.to_pixels(to)];
        self.plot_polyline(&points, color, coverage);
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, width: f32, color: Rgba) {
        let longest = radii.x.max(radii.y) / self.scale;
        if longest <= 0.0 {
            return;
        }
        let segments = (TAU * longest).ceil().clamp(8.0, 2048.0) as usize;
        let points: Vec<(f32, f32)> = (0..=segments)
            .map(|i| {
                let theta = TAU * i as f32 / segments as f32;
                let (sin, cos) = theta.sin_cos();
                let offset = Vec2::new(cos * radii.x, sin * radii.y).rotate(rotation);
                self.to_pixels(center + offset)
            })
            .collect();
        let coverage = self.stroke_coverage(width);
        self.plot_polyline(&points, color, coverage);
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, stops: &[(f32, Rgba)]) {
        let (cx, cy) = self.to_pixels(center);
        let r = radius / self.scale;
        if r <= 0.0 || stops.is_empty() {
            return;
        }
        for y in Self::span(cy, r, self.height()) {
            for x in Self::span(cx, r, self.width()) {
                let t = (x as f32 + 0.5 - cx).hypot(y as f32 + 0.5 - cy) / r;
                if t <= 1.0 {
                    self.blend(x, y, sample_stops(stops, t), 1.0);
                }
            }
        }
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self.width();
        for row in 0..area.height.min(self.rows) {
            for column in 0..area.width.min(self.columns) {
                let top = self.pixels[row as usize * 2 * width + column as usize];
                let bottom = self.pixels[(row as usize * 2 + 1) * width + column as usize];
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}

fn to_color([r, g, b]: [f32; 3]) -> Color {
    Color::Rgb(to_channel(r), to_channel(g), to_channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Position;

    const RED: Rgba = Rgba::opaque(255, 0, 0);

    #[test]
    fn bounds_follow_cells_and_scale() {
        let canvas = PixelCanvas::new(10, 5, 6.0);
        assert_eq!(canvas.width(), 10);
        assert_eq!(canvas.height(), 10);
        assert_eq!(canvas.bounds(), Bounds::new(60.0, 60.0));
    }

    #[test]
    fn cell_center_maps_to_logical_units() {
        let canvas = PixelCanvas::new(10, 5, 4.0);
        assert_eq!(canvas.cell_center(0, 0), Vec2::new(2.0, 4.0));
        assert_eq!(canvas.cell_center(3, 2), Vec2::new(14.0, 20.0));
    }

    #[test]
    fn filled_circle_colours_center_only() {
        let mut canvas = PixelCanvas::new(20, 10, 1.0);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 3.0, RED);
        assert_eq!(canvas.pixel(10, 10), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::BLACK));
        assert_eq!(canvas.pixel(19, 19), Some(Rgba::BLACK));
    }

    #[test]
    fn clear_resets_pixels() {
        let mut canvas = PixelCanvas::new(4, 2, 1.0);
        canvas.fill_circle(Vec2::new(2.0, 2.0), 2.0, RED);
        canvas.clear();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                assert_eq!(canvas.pixel(x, y), Some(Rgba::BLACK));
            }
        }
    }

    #[test]
    fn horizontal_line_covers_its_row() {
        let mut canvas = PixelCanvas::new(10, 3, 1.0);
        canvas.stroke_line(Vec2::new(1.0, 2.5), Vec2::new(8.0, 2.5), 1.0, RED);
        for x in 1..=8 {
            assert_eq!(canvas.pixel(x, 2), Some(RED), "pixel {x}");
        }
        assert_eq!(canvas.pixel(5, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn translucent_blend_mixes_with_background() {
        let mut canvas = PixelCanvas::new(4, 2, 1.0);
        canvas.fill_circle(Vec2::new(2.0, 2.0), 2.0, RED.with_alpha(0.5));
        let mixed = canvas.pixel(2, 2).unwrap();
        assert!((126..=129).contains(&mixed.r), "{mixed:?}");
        assert_eq!((mixed.g, mixed.b), (0, 0));
    }

    #[test]
    fn gradient_fades_outwards() {
        let mut canvas = PixelCanvas::new(40, 20, 1.0);
        canvas.fill_radial_gradient(
            Vec2::new(20.0, 20.0),
            15.0,
            &[(0.0, Rgba::WHITE), (1.0, Rgba::WHITE.with_alpha(0.0))],
        );
        let center = canvas.pixel(20, 20).unwrap();
        let edge = canvas.pixel(32, 20).unwrap();
        assert!(center.r > edge.r);
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn sample_stops_interpolates() {
        let stops = [(0.0, Rgba::BLACK), (0.5, Rgba::WHITE), (1.0, Rgba::BLACK)];
        assert_eq!(sample_stops(&stops, 0.5), Rgba::WHITE);
        assert_eq!(sample_stops(&stops, 0.25).r, 128);
        assert_eq!(sample_stops(&stops, 2.0), Rgba::BLACK);
        assert_eq!(sample_stops(&[], 0.5), Rgba::TRANSPARENT);
    }

    #[test]
    fn drawing_outside_is_ignored() {
        let mut canvas = PixelCanvas::new(4, 2, 1.0);
        canvas.fill_circle(Vec2::new(-50.0, -50.0), 3.0, RED);
        canvas.stroke_circle(Vec2::new(500.0, 500.0), 10.0, 1.0, RED);
        canvas.fill_radial_gradient(Vec2::new(2.0, 2.0), 0.0, &[(0.0, RED)]);
        assert!((0..4).all(|x| canvas.pixel(x, 0) == Some(Rgba::BLACK)));
    }

    #[test]
    fn empty_canvas_draws_nothing() {
        let mut canvas = PixelCanvas::new(0, 0, 6.0);
        assert!(canvas.bounds().is_empty());
        canvas.fill_circle(Vec2::ZERO, 10.0, RED);
        canvas.stroke_ellipse(Vec2::ZERO, Vec2::new(5.0, 2.0), 0.3, 1.0, RED);
        assert_eq!(canvas.pixel(0, 0), None);
    }

    #[test]
    fn widget_writes_half_blocks() {
        let mut canvas = PixelCanvas::new(2, 1, 1.0);
        canvas.fill_circle(Vec2::new(0.5, 0.5), 0.5, RED);
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);
        let cell = &buf[Position::new(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
    }
}
