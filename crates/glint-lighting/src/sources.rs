//! Specialized light constructors for gameplay entities and terrain
//!
//! Each one derives a time-varying intensity and radius from domain state and
//! forwards to [`LightAggregator::add_light`]. Pulses are phase-shifted by
//! position so identical objects never breathe in sync.

use crate::light::LightAggregator;
use glam::Vec2;
use glint_core::{noise, Color};

/// Explosion lights dimmer than this are not emitted at all
pub const EXPLOSION_VISIBILITY: f32 = 0.05;

const EXPLOSION_PEAK: f32 = 0.9;

const EXPLOSION_COLOR: Color = Color::rgb(1.0, 0.72, 0.32);
const BOMB_CALM: Color = Color::rgb(1.0, 0.55, 0.15);
const BOMB_URGENT: Color = Color::rgb(1.0, 0.15, 0.08);
const LAVA_COLOR: Color = Color::rgb(1.0, 0.35, 0.12);
const ICE_COLOR: Color = Color::rgb(0.56, 0.83, 1.0);
const EXIT_OPEN: Color = Color::rgb(0.42, 1.0, 0.69);
const EXIT_SEALED: Color = Color::rgb(0.55, 0.45, 0.85);
const ENRAGE_COLOR: Color = Color::rgb(1.0, 0.12, 0.12);
const TORCH_COLOR: Color = Color::rgb(1.0, 0.69, 0.29);
const SHIELD_COLOR: Color = Color::rgb(0.36, 0.88, 1.0);

/// Pickup categories, each with its own glow color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    ExtraBomb,
    FireRange,
    Speed,
    Shield,
    Pierce,
}

impl PowerUpKind {
    pub fn color(self) -> Color {
        match self {
            PowerUpKind::ExtraBomb => Color::rgb(1.0, 0.85, 0.3),
            PowerUpKind::FireRange => Color::rgb(1.0, 0.4, 0.2),
            PowerUpKind::Speed => Color::rgb(0.4, 1.0, 0.5),
            PowerUpKind::Shield => SHIELD_COLOR,
            PowerUpKind::Pierce => Color::rgb(0.85, 0.5, 1.0),
        }
    }
}

/// Pulse offset derived from position
fn position_phase(p: Vec2) -> f32 {
    p.x * 0.137 + p.y * 0.291
}

fn pulse(time: f32, speed: f32, position: Vec2) -> f32 {
    (time * speed + position_phase(position)).sin()
}

impl LightAggregator {
    /// `progress` runs 0 (detonation) to 1 (gone); intensity decays linearly
    pub fn add_explosion_light(&mut self, position: Vec2, progress: f32, cell_size: f32) {
        let progress = progress.clamp(0.0, 1.0);
        let intensity = EXPLOSION_PEAK * (1.0 - progress);
        if intensity < EXPLOSION_VISIBILITY {
            return;
        }
        let radius = cell_size * (2.0 + progress * 1.5);
        self.add_light(position, radius, EXPLOSION_COLOR, intensity);
    }

    /// `fuse_ratio` is remaining fuse over total fuse: 1 = just placed, 0 = about to blow
    pub fn add_bomb_light(&mut self, position: Vec2, fuse_ratio: f32, time: f32, cell_size: f32) {
        let urgency = 1.0 - fuse_ratio.clamp(0.0, 1.0);
        let speed = 4.0 + urgency * 14.0;
        let beat = 0.5 + 0.5 * pulse(time, speed, position);
        let intensity = 0.25 + urgency * 0.35 + beat * 0.15;
        let radius = cell_size * (1.0 + urgency * 0.6);
        self.add_light(position, radius, BOMB_CALM.lerp(BOMB_URGENT, urgency), intensity);
    }

    pub fn add_lava_light(&mut self, position: Vec2, time: f32, cell_size: f32) {
        let intensity = 0.35 + 0.12 * pulse(time, 1.7, position);
        self.add_light(position, cell_size * 1.6, LAVA_COLOR, intensity);
    }

    pub fn add_ice_light(&mut self, position: Vec2, time: f32, cell_size: f32) {
        let intensity = 0.18 + 0.06 * pulse(time, 2.3, position);
        self.add_light(position, cell_size * 1.2, ICE_COLOR, intensity);
    }

    pub fn add_power_up_light(
        &mut self,
        position: Vec2,
        kind: PowerUpKind,
        time: f32,
        cell_size: f32,
    ) {
        let intensity = 0.35 + 0.15 * pulse(time, 3.0, position);
        self.add_light(position, cell_size * 1.1, kind.color(), intensity);
    }

    /// Portal light; an open exit breathes brightly, a sealed one glows faintly
    pub fn add_exit_light(&mut self, position: Vec2, open: bool, time: f32, cell_size: f32) {
        if open {
            let intensity = 0.55 + 0.2 * pulse(time, 2.5, position);
            self.add_light(position, cell_size * 2.2, EXIT_OPEN, intensity);
        } else {
            self.add_light(position, cell_size * 1.2, EXIT_SEALED, 0.2);
        }
    }

    pub fn add_boss_enrage_light(&mut self, position: Vec2, time: f32, cell_size: f32) {
        let throb = pulse(time, 6.0, position).abs();
        let intensity = 0.5 + 0.3 * throb;
        self.add_light(position, cell_size * (2.6 + throb * 0.6), ENRAGE_COLOR, intensity);
    }

    /// Flicker comes from coherent noise so torches waver rather than strobe
    pub fn add_torch_light(&mut self, position: Vec2, time: f32, cell_size: f32) {
        let phase = position_phase(position);
        let flicker = noise::noise2d(time * 6.0 + phase, phase) - 0.5;
        let intensity = 0.45 + flicker * 0.3;
        let radius = cell_size * (2.4 + flicker * 0.4);
        self.add_light(position, radius, TORCH_COLOR, intensity);
    }

    pub fn add_shield_light(&mut self, position: Vec2, time: f32, cell_size: f32) {
        let intensity = 0.4 + 0.1 * (time * 4.0).sin();
        self.add_light(position, cell_size * 1.5, SHIELD_COLOR, intensity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: f32 = 32.0;

    #[test]
    fn explosion_decays_linearly() {
        let mut lights = LightAggregator::new();
        lights.add_explosion_light(Vec2::ZERO, 0.0, CELL);
        lights.add_explosion_light(Vec2::ZERO, 0.5, CELL);
        let l = lights.lights();
        assert!((l[0].intensity - EXPLOSION_PEAK).abs() < 1e-6);
        assert!((l[1].intensity - EXPLOSION_PEAK * 0.5).abs() < 1e-6);
        assert!(l[1].radius > l[0].radius);
    }

    #[test]
    fn faded_explosion_emits_nothing() {
        let mut lights = LightAggregator::new();
        lights.add_explosion_light(Vec2::ZERO, 0.97, CELL);
        lights.add_explosion_light(Vec2::ZERO, 1.0, CELL);
        assert!(lights.is_empty());
    }

    #[test]
    fn bomb_grows_brighter_as_fuse_runs_out() {
        let mut lights = LightAggregator::new();
        // Average over many samples so the beat term mostly cancels out
        let mean = |lights: &mut LightAggregator, fuse: f32| {
            let mut sum = 0.0;
            for i in 0..200 {
                lights.clear();
                lights.add_bomb_light(Vec2::new(64.0, 64.0), fuse, i as f32 * 0.01, CELL);
                sum += lights.lights()[0].intensity;
            }
            sum / 200.0
        };
        let fresh = mean(&mut lights, 1.0);
        let urgent = mean(&mut lights, 0.05);
        assert!(urgent > fresh + 0.1);
    }

    #[test]
    fn identical_lava_cells_do_not_pulse_in_sync() {
        let mut lights = LightAggregator::new();
        lights.add_lava_light(Vec2::new(16.0, 16.0), 1.0, CELL);
        lights.add_lava_light(Vec2::new(48.0, 16.0), 1.0, CELL);
        let l = lights.lights();
        assert!((l[0].intensity - l[1].intensity).abs() > 1e-3);
    }

    #[test]
    fn torch_flicker_stays_in_range_and_is_deterministic() {
        let mut a = LightAggregator::new();
        let mut b = LightAggregator::new();
        for i in 0..64 {
            a.clear();
            b.clear();
            let t = i as f32 * 0.1;
            a.add_torch_light(Vec2::new(80.0, 40.0), t, CELL);
            b.add_torch_light(Vec2::new(80.0, 40.0), t, CELL);
            assert_eq!(a.lights(), b.lights());
            let l = a.lights()[0];
            assert!((0.3..=0.6).contains(&l.intensity));
        }
    }

    #[test]
    fn sealed_exit_is_dim() {
        let mut lights = LightAggregator::new();
        lights.add_exit_light(Vec2::ZERO, false, 0.0, CELL);
        lights.add_exit_light(Vec2::ZERO, true, 0.0, CELL);
        let l = lights.lights();
        assert!(l[0].intensity < l[1].intensity);
        assert!(l[0].radius < l[1].radius);
    }

    #[test]
    fn every_constructor_emits_one_light() {
        let mut lights = LightAggregator::new();
        let p = Vec2::new(10.0, 20.0);
        lights.add_bomb_light(p, 0.5, 1.0, CELL);
        lights.add_lava_light(p, 1.0, CELL);
        lights.add_ice_light(p, 1.0, CELL);
        lights.add_power_up_light(p, PowerUpKind::Speed, 1.0, CELL);
        lights.add_exit_light(p, true, 1.0, CELL);
        lights.add_boss_enrage_light(p, 1.0, CELL);
        lights.add_torch_light(p, 1.0, CELL);
        lights.add_shield_light(p, 1.0, CELL);
        lights.add_explosion_light(p, 0.2, CELL);
        assert_eq!(lights.len(), 9);
        assert!(lights.lights().iter().all(|l| l.is_visible()));
    }
}
