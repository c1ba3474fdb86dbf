//! Particle state and the fixed-capacity swap-remove pool

use glam::Vec2;

/// One live particle. Plain data; slots are overwritten wholesale on spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Seconds left; the particle is removed once this reaches zero
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    /// Animation phase offset fixed at spawn
    pub phase: f32,
    /// Visual variant (0..=2) within the world's effect
    pub type_tag: u8,
}

impl Particle {
    pub const DEAD: Self = Self {
        x: 0.0,
        y: 0.0,
        vx: 0.0,
        vy: 0.0,
        life: 0.0,
        max_life: 0.0,
        size: 0.0,
        phase: 0.0,
        type_tag: 0,
    };

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }

    /// Remaining life in [0, 1]: 1 = just spawned, 0 = expiring
    pub fn life_ratio(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }

    /// Opacity envelope: quick fade-in after spawn, fade-out near expiry
    pub fn envelope(&self) -> f32 {
        let r = self.life_ratio();
        let fade_in = ((1.0 - r) / 0.15).min(1.0);
        let fade_out = (r / 0.25).min(1.0);
        fade_in.min(fade_out)
    }
}

/// Swap-remove pool over a fixed array for O(1) kill and contiguous alive
/// iteration. Slots `[0, active_count)` are live.
pub struct ParticlePool<const N: usize> {
    particles: [Particle; N],
    active_count: usize,
}

impl<const N: usize> Default for ParticlePool<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ParticlePool<N> {
    pub fn new() -> Self {
        Self {
            particles: [Particle::DEAD; N],
            active_count: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn is_empty(&self) -> bool {
        self.active_count == 0
    }

    pub fn is_full(&self) -> bool {
        self.active_count >= N
    }

    pub fn clear(&mut self) {
        self.active_count = 0;
    }

    /// Claim the next free slot, reset to a dead particle for the caller to
    /// initialize. Returns None if the pool is full.
    pub fn spawn(&mut self) -> Option<&mut Particle> {
        if self.is_full() {
            return None;
        }
        let idx = self.active_count;
        self.active_count += 1;
        let slot = &mut self.particles[idx];
        *slot = Particle::DEAD;
        Some(slot)
    }

    /// Visit every live particle; those for which `keep` returns false are
    /// killed via swap-with-last-active.
    pub fn update_and_compact<F: FnMut(&mut Particle) -> bool>(&mut self, mut keep: F) {
        let mut i = 0;
        while i < self.active_count {
            if keep(&mut self.particles[i]) {
                i += 1;
            } else {
                self.active_count -= 1;
                if i < self.active_count {
                    self.particles.swap(i, self.active_count);
                }
                // Don't increment i: the swapped-in particle still needs its visit
            }
        }
    }

    pub fn alive_slice(&self) -> &[Particle] {
        &self.particles[..self.active_count]
    }

    pub fn alive_slice_mut(&mut self) -> &mut [Particle] {
        &mut self.particles[..self.active_count]
    }
}
