//! Light source buffer and the CPU gradient pass

use glam::Vec2;
use glint_core::Color;
use glint_render::{BlendMode, Canvas, GradientStop};

/// Fixed light buffer capacity
pub const MAX_LIGHTS: usize = 40;

/// Lights at or below this intensity are skipped at render time
pub const INTENSITY_EPSILON: f32 = 0.01;

/// One light for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub position: Vec2,
    pub radius: f32,
    /// RGB; alpha is ignored
    pub color: Color,
    /// Clamped to [0, 1] on insertion
    pub intensity: f32,
}

impl LightSource {
    const UNUSED: Self = Self {
        position: Vec2::ZERO,
        radius: 0.0,
        color: Color::BLACK,
        intensity: 0.0,
    };

    pub fn is_visible(&self) -> bool {
        self.intensity > INTENSITY_EPSILON && self.radius > 0.0
    }
}

/// Fixed-capacity per-frame light collection.
///
/// Additions beyond [`MAX_LIGHTS`] are dropped (the earliest adds win).
/// Lighting is best-effort, so overflow is counted, never reported as an
/// error.
pub struct LightAggregator {
    lights: [LightSource; MAX_LIGHTS],
    count: usize,
    dropped: usize,
    /// Gradient stops rewritten per light instead of allocated
    stops: [GradientStop; 3],
}

impl Default for LightAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl LightAggregator {
    pub fn new() -> Self {
        Self {
            lights: [LightSource::UNUSED; MAX_LIGHTS],
            count: 0,
            dropped: 0,
            stops: [GradientStop::new(0.0, Color::TRANSPARENT); 3],
        }
    }

    /// Forget every light from the previous frame
    pub fn clear(&mut self) {
        self.count = 0;
        self.dropped = 0;
    }

    /// Append a light. Returns false (and drops it) when the buffer is full.
    pub fn add_light(&mut self, position: Vec2, radius: f32, color: Color, intensity: f32) -> bool {
        if self.count >= MAX_LIGHTS {
            self.dropped += 1;
            return false;
        }
        let intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        self.lights[self.count] = LightSource {
            position,
            radius: radius.max(0.0),
            color: color.with_alpha(1.0),
            intensity,
        };
        self.count += 1;
        true
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights[..self.count]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Adds rejected since the last `clear()`
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Draw every visible light as an additive radial gradient
    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        for i in 0..self.count {
            let light = self.lights[i];
            if !light.is_visible() {
                continue;
            }
            let c = light.color;
            self.stops[0] = GradientStop::new(0.0, c.with_alpha(light.intensity));
            self.stops[1] = GradientStop::new(0.45, c.with_alpha(light.intensity * 0.35));
            self.stops[2] = GradientStop::new(1.0, c.with_alpha(0.0));
            canvas.draw_radial_gradient(light.position, light.radius, &self.stops, BlendMode::Additive);
        }
    }
}
