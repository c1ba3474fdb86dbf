//! Frame clock: wall-clock ticking for live hosts, fixed stepping for headless runs

use std::time::Instant;

/// Longest frame the clock will report; longer stalls are clamped
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Tracks effect time in seconds
pub struct FrameClock {
    /// Total elapsed effect time in seconds
    pub total_time: f32,
    /// Time since last frame in seconds
    pub delta_time: f32,
    /// Step used by [`step`](Self::step) (default: 1/60 second)
    pub fixed_timestep: f32,
    frames: u64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            frames: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    /// Create a new frame clock with default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame clock stepping at `hz` frames per second
    pub fn with_fps(hz: f32) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Advance by wall-clock time. Call once per frame; the first call
    /// reports a zero delta.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            return self.advance(0.0);
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance by exactly one fixed timestep
    pub fn step(&mut self) -> f32 {
        self.advance(self.fixed_timestep)
    }

    /// Advance by `dt`, clamped to [0, MAX_FRAME_TIME]. Returns the applied delta.
    pub fn advance(&mut self, dt: f32) -> f32 {
        // Clamp to avoid a burst after a stall (max 250ms frame time)
        let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, MAX_FRAME_TIME) };
        self.delta_time = dt;
        self.total_time += dt;
        self.frames += 1;
        dt
    }

    /// Frames advanced so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert!((clock.fixed_timestep - 1.0 / 60.0).abs() < 1e-7);
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame_count(), 0);
    }

    #[test]
    fn test_custom_fps() {
        let clock = FrameClock::with_fps(30.0);
        assert!((clock.fixed_timestep - 1.0 / 30.0).abs() < 1e-7);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.delta_time, 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_fixed_steps_accumulate() {
        let mut clock = FrameClock::new();
        for _ in 0..60 {
            clock.step();
        }
        assert!((clock.total_time - 1.0).abs() < 1e-4);
        assert_eq!(clock.frame_count(), 60);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(3.0), MAX_FRAME_TIME);
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.total_time, MAX_FRAME_TIME);
    }
}
