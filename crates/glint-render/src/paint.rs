//! Paint state and its scope guard

use glint_core::Color;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Fill,
    Stroke,
}

/// How a primitive combines with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    SrcOver,
    Additive,
}

/// Brush state passed with every primitive.
///
/// Components keep one pooled `Paint` and only mutate it through
/// [`Paint::scope`], which resets it to the default when the scope ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
    /// Edge softening radius in pixels (0 = crisp)
    pub blur: f32,
    pub blend: BlendMode,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            style: PaintStyle::Fill,
            stroke_width: 1.0,
            blur: 0.0,
            blend: BlendMode::SrcOver,
        }
    }
}

impl Paint {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Borrow the paint for one draw routine; defaults are restored on drop
    pub fn scope(&mut self) -> PaintScope<'_> {
        PaintScope { paint: self }
    }

    /// Switch to fill with `color`
    pub fn fill(&mut self, color: Color) -> &mut Self {
        self.style = PaintStyle::Fill;
        self.color = color;
        self
    }

    /// Switch to stroke with `color` and `width`
    pub fn stroke(&mut self, color: Color, width: f32) -> &mut Self {
        self.style = PaintStyle::Stroke;
        self.color = color;
        self.stroke_width = width;
        self
    }

    pub fn blur(&mut self, radius: f32) -> &mut Self {
        self.blur = radius.max(0.0);
        self
    }

    pub fn additive(&mut self) -> &mut Self {
        self.blend = BlendMode::Additive;
        self
    }
}

/// Exclusive borrow of a pooled [`Paint`] that resets it on drop, including
/// during unwinding.
pub struct PaintScope<'a> {
    paint: &'a mut Paint,
}

impl Deref for PaintScope<'_> {
    type Target = Paint;

    fn deref(&self) -> &Paint {
        self.paint
    }
}

impl DerefMut for PaintScope<'_> {
    fn deref_mut(&mut self) -> &mut Paint {
        self.paint
    }
}

impl Drop for PaintScope<'_> {
    fn drop(&mut self) {
        *self.paint = Paint::default();
    }
}
