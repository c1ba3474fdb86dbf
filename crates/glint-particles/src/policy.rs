//! Spawn policies: where and how a world's particles are born

use crate::particle::Particle;
use glint_core::{noise, Rect};

/// Closed-open value range sampled from the keyed hash
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Symmetric range around zero
    pub const fn around_zero(extent: f32) -> Self {
        Self::new(-extent, extent)
    }

    pub fn sample(&self, seed: i32, key: i32) -> f32 {
        noise::hash_range(seed, key, self.min, self.max)
    }
}

/// Edge of the bounds new particles enter from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSite {
    Top,
    Bottom,
    Left,
    Right,
    Anywhere,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    /// Seconds between spawns
    pub interval: f32,
    pub site: SpawnSite,
    pub vx: Span,
    pub vy: Span,
    pub size: Span,
    pub life: Span,
    /// Number of visual variants (1..=3); `type_tag` is drawn below this
    pub variants: u8,
}

// Hash keys for the independent spawn decisions
const KEY_ALONG: i32 = 0;
const KEY_VX: i32 = 1;
const KEY_VY: i32 = 2;
const KEY_SIZE: i32 = 3;
const KEY_LIFE: i32 = 4;
const KEY_VARIANT: i32 = 5;
const KEY_ACROSS: i32 = 6;

/// Per-spawn seed mixing the spawn counter with the frame of the global clock
pub fn spawn_seed(spawn_counter: u32, global_time: f32) -> i32 {
    let frame = (global_time * 60.0) as i32;
    (spawn_counter as i32)
        .wrapping_mul(0x2C1B_3C6D)
        .wrapping_add(frame.wrapping_mul(0x297A_2D39))
}

impl SpawnPolicy {
    /// Build a fresh particle inside (or just outside the spawn edge of) `bounds`
    pub fn sample(&self, seed: i32, bounds: Rect, phase: f32) -> Particle {
        let size = self.size.sample(seed, KEY_SIZE);
        let life = self.life.sample(seed, KEY_LIFE).max(f32::EPSILON);
        let along = noise::hash(seed, KEY_ALONG);
        let across = noise::hash(seed, KEY_ACROSS);

        let (x, y) = match self.site {
            SpawnSite::Top => (bounds.x + along * bounds.w, bounds.y - size),
            SpawnSite::Bottom => (bounds.x + along * bounds.w, bounds.bottom() + size),
            SpawnSite::Left => (bounds.x - size, bounds.y + along * bounds.h),
            SpawnSite::Right => (bounds.right() + size, bounds.y + along * bounds.h),
            SpawnSite::Anywhere => (bounds.x + along * bounds.w, bounds.y + across * bounds.h),
        };

        let variants = self.variants.clamp(1, 3);
        let type_tag = ((noise::hash(seed, KEY_VARIANT) * variants as f32) as u8).min(variants - 1);

        Particle {
            x,
            y,
            vx: self.vx.sample(seed, KEY_VX),
            vy: self.vy.sample(seed, KEY_VY),
            life,
            max_life: life,
            size,
            phase,
            type_tag,
        }
    }
}
