//! The grid cell a decal is painted onto, and its keyed randomness

use glam::Vec2;
use glint_core::{noise, Color, Rect};
use glint_render::DrawCtx;

/// Paints one decal into one cell
pub type DecalFn = fn(&mut DrawCtx<'_>, &DecalCell);

/// Spacing between per-item keys derived from one salt. Salts themselves are
/// spaced 1000 apart, so up to 32 items never reach the next feature's salt.
const ITEM_STRIDE: i32 = 31;

/// One grid cell to decorate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecalCell {
    /// Pixel area of the cell
    pub rect: Rect,
    pub gx: i32,
    pub gy: i32,
    /// Base tint the decal derives its shades from
    pub color: Color,
    /// Global time, for the few decals that animate
    pub time: f32,
}

impl DecalCell {
    pub fn new(rect: Rect, gx: i32, gy: i32, color: Color) -> Self {
        Self {
            rect,
            gx,
            gy,
            color,
            time: 0.0,
        }
    }

    pub fn at_time(mut self, time: f32) -> Self {
        self.time = time;
        self
    }

    /// Stable random in [0, 1) for one feature of this cell
    pub fn random(&self, salt: i32) -> f32 {
        noise::cell_random(self.gx, self.gy, salt)
    }

    /// Stable random for the `i`-th item of a repeated feature
    pub fn item(&self, salt: i32, i: usize) -> f32 {
        let key = salt.wrapping_add((i as i32).wrapping_mul(ITEM_STRIDE));
        noise::cell_random(self.gx, self.gy, key)
    }

    pub fn item_range(&self, salt: i32, i: usize, min: f32, max: f32) -> f32 {
        min + self.item(salt, i) * (max - min)
    }

    /// Item count in `min..=max`
    pub fn count(&self, salt: i32, min: usize, max: usize) -> usize {
        let span = (max - min + 1) as f32;
        (min + (self.random(salt) * span) as usize).min(max)
    }

    /// Point inside the rect, `inset` (fraction of the size) away from the edges
    pub fn point(&self, salt_u: i32, salt_v: i32, i: usize, inset: f32) -> Vec2 {
        let span = 1.0 - 2.0 * inset;
        let u = inset + self.item(salt_u, i) * span;
        let v = inset + self.item(salt_v, i) * span;
        self.rect.at(u, v)
    }

    /// Pull `p` back inside the rect
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.rect.x, self.rect.right()),
            p.y.clamp(self.rect.y, self.rect.bottom()),
        )
    }

    /// Shorter side of the cell
    pub fn extent(&self) -> f32 {
        self.rect.w.min(self.rect.h)
    }
}
