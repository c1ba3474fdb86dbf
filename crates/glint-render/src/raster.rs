//! CPU rasterizer implementing `Canvas` over an `image::RgbaImage`
//!
//! Used for headless renders and golden-image style checks. Edges are
//! anti-aliased from a signed distance per pixel center; `Paint::blur` widens
//! the falloff band. Path fills use the even-odd rule without anti-aliasing.

use crate::canvas::{Canvas, GradientStop};
use crate::paint::{BlendMode, Paint, PaintStyle};
use crate::path::{Path, PathVerb};
use glam::Vec2;
use glint_core::{Color, GlintError, Rect, Result};
use image::{Rgba, RgbaImage};

/// Segments per quadratic curve when flattening paths
const QUAD_STEPS: usize = 8;

pub struct ImageCanvas {
    image: RgbaImage,
    /// Flattened path points, reused across `draw_path` calls
    points: Vec<Vec2>,
    /// (start, end, closed) ranges into `points`
    contours: Vec<(usize, usize, bool)>,
}

impl ImageCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            points: Vec::with_capacity(256),
            contours: Vec::with_capacity(16),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Overwrite every pixel with `color`
    pub fn fill(&mut self, color: Color) {
        let px = Rgba(color.to_rgba8());
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        self.image
            .save(path)
            .map_err(|e| GlintError::RenderError(e.to_string()))
    }

    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32, mode: BlendMode) {
        let a = color.a * coverage;
        if a <= 0.0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }
        let px = self.image.get_pixel_mut(x, y);
        let d = px.0.map(|c| c as f32 / 255.0);
        let out = match mode {
            BlendMode::SrcOver => [
                color.r * a + d[0] * (1.0 - a),
                color.g * a + d[1] * (1.0 - a),
                color.b * a + d[2] * (1.0 - a),
                a + d[3] * (1.0 - a),
            ],
            BlendMode::Additive => [
                d[0] + color.r * a,
                d[1] + color.g * a,
                d[2] + color.b * a,
                d[3].max(a),
            ],
        };
        *px = Rgba(out.map(|c| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8));
    }

    /// Pixel bounds covering [min, max], clipped to the image
    fn pixel_bounds(&self, min: Vec2, max: Vec2) -> Option<(i32, i32, i32, i32)> {
        let x0 = (min.x.floor() as i32).max(0);
        let y0 = (min.y.floor() as i32).max(0);
        let x1 = (max.x.ceil() as i32).min(self.image.width() as i32 - 1);
        let y1 = (max.y.ceil() as i32).min(self.image.height() as i32 - 1);
        (x0 <= x1 && y0 <= y1).then_some((x0, y0, x1, y1))
    }

    /// Shade every pixel near a shape given its signed distance (positive inside)
    fn shade<F>(&mut self, min: Vec2, max: Vec2, paint: &Paint, sdf: F)
    where
        F: Fn(Vec2) -> f32,
    {
        let soft = 1.0 + paint.blur * 2.0;
        let half_stroke = paint.stroke_width * 0.5;
        let pad = Vec2::splat(soft + half_stroke + 1.0);
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(min - pad, max + pad) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = sdf(p);
                let inside = match paint.style {
                    PaintStyle::Fill => d,
                    PaintStyle::Stroke => half_stroke - d.abs(),
                };
                let coverage = (inside / soft + 0.5).clamp(0.0, 1.0);
                self.blend(x, y, paint.color, coverage, paint.blend);
            }
        }
    }

    fn flatten(&mut self, path: &Path) {
        self.points.clear();
        self.contours.clear();
        let mut start = 0;
        let mut cursor = Vec2::ZERO;
        for verb in path.verbs() {
            match *verb {
                PathVerb::MoveTo(p) => {
                    if self.points.len() > start {
                        self.contours.push((start, self.points.len(), false));
                    }
                    start = self.points.len();
                    self.points.push(p);
                    cursor = p;
                }
                PathVerb::LineTo(p) => {
                    if self.points.len() == start {
                        self.points.push(cursor);
                    }
                    self.points.push(p);
                    cursor = p;
                }
                PathVerb::QuadTo(c, p) => {
                    if self.points.len() == start {
                        self.points.push(cursor);
                    }
                    for i in 1..=QUAD_STEPS {
                        let t = i as f32 / QUAD_STEPS as f32;
                        let u = 1.0 - t;
                        self.points.push(cursor * (u * u) + c * (2.0 * u * t) + p * (t * t));
                    }
                    cursor = p;
                }
                PathVerb::Close => {
                    if self.points.len() > start {
                        self.contours.push((start, self.points.len(), true));
                        cursor = self.points[start];
                    }
                    start = self.points.len();
                }
            }
        }
        if self.points.len() > start {
            self.contours.push((start, self.points.len(), false));
        }
    }
}

fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn even_odd_inside(p: Vec2, points: &[Vec2]) -> bool {
    let mut inside = false;
    let n = points.len();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

fn sample_stops(stops: &[GradientStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    stops[stops.len() - 1].color
}

impl Canvas for ImageCanvas {
    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        let r = Vec2::splat(radius);
        self.shade(center - r, center + r, paint, |p| radius - p.distance(center));
    }

    fn draw_oval(&mut self, rect: Rect, paint: &Paint) {
        let rx = rect.w * 0.5;
        let ry = rect.h * 0.5;
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let center = rect.center();
        let scale = rx.min(ry);
        self.shade(
            Vec2::new(rect.x, rect.y),
            Vec2::new(rect.right(), rect.bottom()),
            paint,
            |p| {
                let q = (p - center) / Vec2::new(rx, ry);
                (1.0 - q.length()) * scale
            },
        );
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        self.shade(
            Vec2::new(rect.x, rect.y),
            Vec2::new(rect.right(), rect.bottom()),
            paint,
            |p| {
                (p.x - rect.x)
                    .min(rect.right() - p.x)
                    .min(p.y - rect.y)
                    .min(rect.bottom() - p.y)
            },
        );
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: &Paint) {
        let half = paint.stroke_width * 0.5;
        let line_paint = Paint {
            style: PaintStyle::Fill,
            ..*paint
        };
        self.shade(from.min(to), from.max(to), &line_paint, |p| {
            half - segment_distance(p, from, to)
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.flatten(path);
        let points = std::mem::take(&mut self.points);
        let contours = std::mem::take(&mut self.contours);

        match paint.style {
            PaintStyle::Fill => {
                let mut min = Vec2::splat(f32::MAX);
                let mut max = Vec2::splat(f32::MIN);
                for p in &points {
                    min = min.min(*p);
                    max = max.max(*p);
                }
                if let Some((x0, y0, x1, y1)) = self.pixel_bounds(min, max) {
                    for y in y0..=y1 {
                        for x in x0..=x1 {
                            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                            let inside = contours
                                .iter()
                                .filter(|(s, e, _)| e - s >= 3)
                                .filter(|(s, e, _)| even_odd_inside(p, &points[*s..*e]))
                                .count()
                                % 2
                                == 1;
                            if inside {
                                self.blend(x, y, paint.color, 1.0, paint.blend);
                            }
                        }
                    }
                }
            }
            PaintStyle::Stroke => {
                for &(s, e, closed) in &contours {
                    let pts = &points[s..e];
                    for pair in pts.windows(2) {
                        self.draw_line(pair[0], pair[1], paint);
                    }
                    if closed && pts.len() > 2 {
                        self.draw_line(pts[pts.len() - 1], pts[0], paint);
                    }
                }
            }
        }

        self.points = points;
        self.contours = contours;
    }

    fn draw_radial_gradient(
        &mut self,
        center: Vec2,
        radius: f32,
        stops: &[GradientStop],
        blend: BlendMode,
    ) {
        if radius <= 0.0 || stops.is_empty() {
            return;
        }
        let r = Vec2::splat(radius);
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(center - r, center + r) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = p.distance(center) / radius;
                if t >= 1.0 {
                    continue;
                }
                let color = sample_stops(stops, t);
                self.blend(x, y, color, 1.0, blend);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_fill_covers_center_only() {
        let mut canvas = ImageCanvas::new(32, 32);
        let mut paint = Paint::default();
        paint.fill(Color::rgb(1.0, 0.0, 0.0));
        canvas.draw_circle(Vec2::new(16.0, 16.0), 5.0, &paint);
        assert_eq!(canvas.pixel(16, 16), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn stroke_circle_leaves_center_empty() {
        let mut canvas = ImageCanvas::new(32, 32);
        let mut paint = Paint::default();
        paint.stroke(Color::WHITE, 2.0);
        canvas.draw_circle(Vec2::new(16.0, 16.0), 10.0, &paint);
        assert_eq!(canvas.pixel(16, 16)[3], 0);
        assert!(canvas.pixel(26, 16)[3] > 200);
    }

    #[test]
    fn additive_gradient_is_brightest_at_center() {
        let mut canvas = ImageCanvas::new(64, 64);
        canvas.fill(Color::BLACK);
        let stops = [
            GradientStop::new(0.0, Color::new(1.0, 0.5, 0.0, 1.0)),
            GradientStop::new(1.0, Color::new(1.0, 0.5, 0.0, 0.0)),
        ];
        canvas.draw_radial_gradient(Vec2::new(32.0, 32.0), 20.0, &stops, BlendMode::Additive);
        let center = canvas.pixel(32, 32);
        let edge = canvas.pixel(32, 48);
        assert!(center[0] > edge[0]);
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn path_fill_uses_even_odd() {
        let mut canvas = ImageCanvas::new(40, 40);
        let mut path = Path::new();
        path.move_to(Vec2::new(5.0, 5.0))
            .line_to(Vec2::new(35.0, 5.0))
            .line_to(Vec2::new(35.0, 35.0))
            .line_to(Vec2::new(5.0, 35.0))
            .close()
            .move_to(Vec2::new(15.0, 15.0))
            .line_to(Vec2::new(25.0, 15.0))
            .line_to(Vec2::new(25.0, 25.0))
            .line_to(Vec2::new(15.0, 25.0))
            .close();
        canvas.draw_path(&path, &Paint::default());
        assert_eq!(canvas.pixel(8, 8)[3], 255);
        assert_eq!(canvas.pixel(20, 20)[3], 0);
    }

    #[test]
    fn line_draws_between_endpoints() {
        let mut canvas = ImageCanvas::new(20, 20);
        let mut paint = Paint::default();
        paint.stroke(Color::WHITE, 2.0);
        canvas.draw_line(Vec2::new(2.0, 10.0), Vec2::new(18.0, 10.0), &paint);
        assert!(canvas.pixel(10, 9)[3] > 0);
        assert_eq!(canvas.pixel(10, 2)[3], 0);
    }

    #[test]
    fn saves_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("frame.png");
        let mut canvas = ImageCanvas::new(8, 8);
        canvas.fill(Color::from_hex(0x336699));
        canvas.save(&out).unwrap();
        let reloaded = image::open(&out).unwrap().to_rgba8();
        assert_eq!(reloaded.get_pixel(3, 3).0, [0x33, 0x66, 0x99, 255]);
    }
}
