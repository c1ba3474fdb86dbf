//! Canvas that records draw calls instead of rasterizing

use crate::canvas::{Canvas, GradientStop};
use crate::paint::{BlendMode, Paint};
use crate::path::{Path, PathVerb};
use glam::Vec2;
use glint_core::Rect;

/// One primitive as issued to the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Circle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
    Oval {
        rect: Rect,
        paint: Paint,
    },
    Rect {
        rect: Rect,
        paint: Paint,
    },
    Line {
        from: Vec2,
        to: Vec2,
        paint: Paint,
    },
    Path {
        verbs: Vec<PathVerb>,
        paint: Paint,
    },
    RadialGradient {
        center: Vec2,
        radius: f32,
        stops: Vec<GradientStop>,
        blend: BlendMode,
    },
}

impl DrawCall {
    /// The paint the call was issued with (gradients carry none)
    pub fn paint(&self) -> Option<&Paint> {
        match self {
            DrawCall::Circle { paint, .. }
            | DrawCall::Oval { paint, .. }
            | DrawCall::Rect { paint, .. }
            | DrawCall::Line { paint, .. }
            | DrawCall::Path { paint, .. } => Some(paint),
            DrawCall::RadialGradient { .. } => None,
        }
    }
}

/// Test and golden-comparison canvas.
///
/// Allocates per call, so it is not meant for the steady-state frame path.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Remove and return everything recorded so far
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn draw_oval(&mut self, rect: Rect, paint: &Paint) {
        self.calls.push(DrawCall::Oval {
            rect,
            paint: *paint,
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.calls.push(DrawCall::Rect {
            rect,
            paint: *paint,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: &Paint) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            paint: *paint,
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.calls.push(DrawCall::Path {
            verbs: path.verbs().to_vec(),
            paint: *paint,
        });
    }

    fn draw_radial_gradient(
        &mut self,
        center: Vec2,
        radius: f32,
        stops: &[GradientStop],
        blend: BlendMode,
    ) {
        self.calls.push(DrawCall::RadialGradient {
            center,
            radius,
            stops: stops.to_vec(),
            blend,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Color;

    #[test]
    fn records_calls_in_order() {
        let mut canvas = RecordingCanvas::new();
        let paint = Paint::default();
        canvas.draw_circle(Vec2::ZERO, 2.0, &paint);
        canvas.draw_rect(Rect::from_size(1.0, 1.0), &paint);
        canvas.draw_radial_gradient(
            Vec2::ONE,
            10.0,
            &[GradientStop::new(0.0, Color::WHITE)],
            BlendMode::Additive,
        );
        assert_eq!(canvas.len(), 3);
        assert!(matches!(canvas.calls()[0], DrawCall::Circle { .. }));
        assert!(canvas.calls()[2].paint().is_none());

        let taken = canvas.take();
        assert_eq!(taken.len(), 3);
        assert!(canvas.is_empty());
    }
}
