//! The drawing surface contract

use crate::paint::{BlendMode, Paint};
use crate::path::Path;
use glam::Vec2;
use glint_core::{Color, Rect};

/// One color stop of a radial gradient; `offset` is in [0, 1] from center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Opaque 2D drawing sink supplied by the host.
///
/// The core only writes; implementations must not require reads.
pub trait Canvas {
    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);

    fn draw_oval(&mut self, rect: Rect, paint: &Paint);

    fn draw_rect(&mut self, rect: Rect, paint: &Paint);

    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: &Paint);

    fn draw_path(&mut self, path: &Path, paint: &Paint);

    /// Circle filled with a radial gradient, transparent beyond `radius`
    fn draw_radial_gradient(
        &mut self,
        center: Vec2,
        radius: f32,
        stops: &[GradientStop],
        blend: BlendMode,
    );
}

/// Pooled drawing state owned by a component (one paint, one path)
#[derive(Debug, Default)]
pub struct DrawState {
    paint: Paint,
    path: Path,
}

impl DrawState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the pooled state to a canvas for one render entry point
    pub fn ctx<'a>(&'a mut self, canvas: &'a mut dyn Canvas) -> DrawCtx<'a> {
        DrawCtx {
            canvas,
            paint: &mut self.paint,
            path: &mut self.path,
        }
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// True when paint and path are back at their defaults
    pub fn is_default(&self) -> bool {
        self.paint.is_default() && self.path.is_empty()
    }
}

/// Everything a draw routine may touch.
///
/// Routines take `paint.scope()` / `path.scope()` before mutating, so the
/// pooled state is back at defaults when they return.
pub struct DrawCtx<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub paint: &'a mut Paint,
    pub path: &'a mut Path,
}
