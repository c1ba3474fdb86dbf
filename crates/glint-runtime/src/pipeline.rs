//! Per-frame effects pipeline
//!
//! Owns both particle layers, the light buffer and the lighting backend, and
//! runs them in the only order that produces a correct frame:
//!
//! 1. update ambient and weather particles
//! 2. collect this frame's lights (entities, terrain, glowing particles)
//! 3. draw ambient particles, the host backdrop, weather particles, lighting

use glint_core::{FxConfig, Rect, World};
use glint_lighting::{
    FrameSnapshot, LightAggregator, LightEmitter, LightingBackend, LightingRenderer,
};
use glint_particles::{AmbientParticles, WeatherParticles};
use glint_render::Canvas;

/// Which layers a pipeline draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layers {
    pub ambient: bool,
    pub weather: bool,
    pub lighting: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            ambient: true,
            weather: true,
            lighting: true,
        }
    }
}

impl From<&FxConfig> for Layers {
    fn from(config: &FxConfig) -> Self {
        Self {
            ambient: config.ambient,
            weather: config.weather,
            lighting: config.lighting,
        }
    }
}

/// Counts observed at the end of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub time: f32,
    pub ambient_particles: usize,
    pub weather_particles: usize,
    pub lights: usize,
    /// Light adds rejected because the buffer was full
    pub dropped_lights: usize,
    pub backend: LightingBackend,
}

pub struct FramePipeline {
    ambient: AmbientParticles,
    weather: WeatherParticles,
    lights: LightAggregator,
    lighting: LightingRenderer,
    layers: Layers,
    world: Option<World>,
    bounds: Rect,
    time: f32,
}

impl FramePipeline {
    pub fn new(layers: Layers) -> Self {
        Self::with_renderer(layers, LightingRenderer::cpu())
    }

    /// Pipeline using a host-supplied lighting backend
    pub fn with_renderer(layers: Layers, lighting: LightingRenderer) -> Self {
        log::info!(
            "effects pipeline: ambient={} weather={} lighting={} ({:?})",
            layers.ambient,
            layers.weather,
            layers.lighting,
            lighting.backend()
        );
        Self {
            ambient: AmbientParticles::ambient(),
            weather: WeatherParticles::weather(),
            lights: LightAggregator::new(),
            lighting,
            layers,
            world: None,
            bounds: Rect::default(),
            time: 0.0,
        }
    }

    /// Build a pipeline and select the configured world
    pub fn from_config(config: &FxConfig) -> Self {
        let mut pipeline = Self::new(Layers::from(config));
        pipeline.set_world(config.world, config.bounds());
        pipeline
    }

    /// Hard reset for a new level
    pub fn set_world(&mut self, world_index: i32, bounds: Rect) {
        self.world = World::from_index(world_index);
        self.bounds = bounds;
        self.ambient.set_world(world_index, bounds);
        self.weather.set_world(world_index, bounds);
        self.lights.clear();
    }

    /// Advance particles without drawing, e.g. to pre-fill the layers
    pub fn simulate(&mut self, dt: f32) {
        let dt = if dt.is_nan() { 0.0 } else { dt.max(0.0) };
        self.time += dt;
        if self.layers.ambient {
            self.ambient.update(dt, self.time);
        }
        if self.layers.weather {
            self.weather.update(dt, self.time);
        }
    }

    /// Run one full frame. `backdrop` draws the host's grid and terrain
    /// between the ambient and weather layers.
    pub fn frame<B>(
        &mut self,
        dt: f32,
        snapshot: &FrameSnapshot<'_>,
        canvas: &mut dyn Canvas,
        backdrop: B,
    ) -> FrameStats
    where
        B: FnOnce(&mut dyn Canvas),
    {
        self.simulate(dt);

        if self.layers.lighting {
            // Disabled layers never update, so they contribute no glow
            let emitters: [&dyn LightEmitter; 2] = [&self.ambient, &self.weather];
            self.lights.collect_light_sources(snapshot, &emitters, self.time);
        } else {
            self.lights.clear();
        }

        if self.layers.ambient {
            self.ambient.render(canvas, self.time);
        }
        backdrop(&mut *canvas);
        if self.layers.weather {
            self.weather.render(canvas, self.time);
        }
        if self.layers.lighting {
            self.lighting.render(&mut self.lights, canvas);
        }

        self.stats()
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            time: self.time,
            ambient_particles: self.ambient.active_count(),
            weather_particles: self.weather.active_count(),
            lights: self.lights.len(),
            dropped_lights: self.lights.dropped(),
            backend: self.lighting.backend(),
        }
    }

    pub fn world(&self) -> Option<World> {
        self.world
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn layers(&self) -> Layers {
        self.layers
    }

    pub fn ambient(&self) -> &AmbientParticles {
        &self.ambient
    }

    pub fn weather(&self) -> &WeatherParticles {
        &self.weather
    }

    pub fn lights(&self) -> &LightAggregator {
        &self.lights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Vec2;
    use glint_lighting::{BombSnapshot, LightingShader, LightInstance};
    use glint_render::{DrawCall, Paint, RecordingCanvas};

    const STEP: f32 = 1.0 / 60.0;

    fn marker() -> Rect {
        Rect::new(-7.0, -7.0, 1.0, 1.0)
    }

    fn draw_marker(canvas: &mut dyn Canvas) {
        canvas.draw_rect(marker(), &Paint::default());
    }

    fn is_marker(call: &DrawCall) -> bool {
        matches!(call, DrawCall::Rect { rect, .. } if *rect == marker())
    }

    fn warmed(world: World, layers: Layers) -> FramePipeline {
        let mut pipeline = FramePipeline::new(layers);
        pipeline.set_world(world.index() as i32, Rect::from_size(640.0, 480.0));
        for _ in 0..180 {
            pipeline.simulate(STEP);
        }
        pipeline
    }

    #[test]
    fn layers_are_drawn_back_to_front() {
        let mut pipeline = warmed(World::Volcano, Layers::default());
        let bombs = [BombSnapshot {
            position: Vec2::new(100.0, 100.0),
            fuse_ratio: 0.5,
        }];
        let snapshot = FrameSnapshot {
            bombs: &bombs,
            ..FrameSnapshot::empty(Some(World::Volcano), 32.0)
        };
        let mut canvas = RecordingCanvas::new();
        let stats = pipeline.frame(STEP, &snapshot, &mut canvas, draw_marker);

        let calls = canvas.calls();
        let marker_at = calls.iter().position(is_marker).unwrap();
        let first_gradient = calls
            .iter()
            .position(|c| matches!(c, DrawCall::RadialGradient { .. }))
            .unwrap();
        // Ambient embers before the backdrop, weather ash between it and the lights
        assert!(marker_at > 0);
        assert!(first_gradient > marker_at + 1);
        assert!(calls[..marker_at]
            .iter()
            .all(|c| !matches!(c, DrawCall::RadialGradient { .. })));
        assert!(calls[first_gradient..]
            .iter()
            .all(|c| matches!(c, DrawCall::RadialGradient { .. })));

        assert_eq!(stats.ambient_particles, pipeline.ambient().active_count());
        assert_eq!(stats.weather_particles, pipeline.weather().active_count());
        assert!(stats.lights >= 1);
        assert_eq!(pipeline.lights().lights()[0].position, Vec2::new(100.0, 100.0));
        assert_eq!(stats.backend, LightingBackend::Cpu);
    }

    #[test]
    fn unknown_world_draws_only_the_backdrop() {
        let mut pipeline = warmed(World::Meadow, Layers::default());
        pipeline.set_world(42, Rect::from_size(320.0, 240.0));
        assert_eq!(pipeline.world(), None);

        let mut canvas = RecordingCanvas::new();
        let stats = pipeline.frame(STEP, &FrameSnapshot::empty(None, 32.0), &mut canvas, draw_marker);
        assert_eq!(canvas.len(), 1);
        assert!(is_marker(&canvas.calls()[0]));
        assert_eq!(stats.ambient_particles + stats.weather_particles + stats.lights, 0);
    }

    #[test]
    fn disabled_layers_are_skipped() {
        let layers = Layers {
            ambient: false,
            weather: true,
            lighting: false,
        };
        let mut pipeline = warmed(World::Volcano, layers);
        let mut canvas = RecordingCanvas::new();
        let stats = pipeline.frame(
            STEP,
            &FrameSnapshot::empty(Some(World::Volcano), 32.0),
            &mut canvas,
            draw_marker,
        );
        assert_eq!(stats.ambient_particles, 0);
        assert!(stats.weather_particles > 0);
        assert_eq!(stats.lights, 0);
        assert!(is_marker(&canvas.calls()[0]));
        assert!(canvas
            .calls()
            .iter()
            .all(|c| !matches!(c, DrawCall::RadialGradient { .. })));
    }

    #[test]
    fn frames_rebuild_lights_instead_of_accumulating() {
        let mut pipeline = warmed(World::Meadow, Layers::default());
        let bombs = [BombSnapshot {
            position: Vec2::ZERO,
            fuse_ratio: 1.0,
        }];
        let snapshot = FrameSnapshot {
            bombs: &bombs,
            ..FrameSnapshot::empty(Some(World::Meadow), 32.0)
        };
        let mut canvas = RecordingCanvas::new();
        for _ in 0..10 {
            canvas.clear();
            let stats = pipeline.frame(STEP, &snapshot, &mut canvas, |_| {});
            assert!(stats.lights <= glint_lighting::MAX_LIGHTS);
            assert_eq!(pipeline.lights().lights()[0].position, Vec2::ZERO);
        }
    }

    #[test]
    fn shader_backend_replaces_gradients() {
        struct NullShader;
        impl LightingShader for NullShader {
            fn initialize(&mut self) -> glint_core::Result<()> {
                Ok(())
            }
            fn draw(&mut self, _instances: &[LightInstance]) -> glint_core::Result<()> {
                Ok(())
            }
        }

        let mut pipeline =
            FramePipeline::with_renderer(Layers::default(), LightingRenderer::with_shader(Box::new(NullShader)));
        pipeline.set_world(World::Temple.index() as i32, Rect::from_size(640.0, 480.0));
        let bombs = [BombSnapshot {
            position: Vec2::ONE,
            fuse_ratio: 0.2,
        }];
        let snapshot = FrameSnapshot {
            bombs: &bombs,
            ..FrameSnapshot::empty(Some(World::Temple), 32.0)
        };
        let mut canvas = RecordingCanvas::new();
        let stats = pipeline.frame(STEP, &snapshot, &mut canvas, |_| {});
        assert_eq!(stats.backend, LightingBackend::Shader);
        assert_eq!(stats.lights, 1);
        assert!(canvas
            .calls()
            .iter()
            .all(|c| !matches!(c, DrawCall::RadialGradient { .. })));
    }

    #[test]
    fn from_config_selects_world_and_layers() {
        let config = FxConfig {
            world: 3,
            width: 200,
            height: 100,
            weather: false,
            ..FxConfig::default()
        };
        let pipeline = FramePipeline::from_config(&config);
        assert_eq!(pipeline.world(), Some(World::Glacier));
        assert_eq!(pipeline.bounds(), Rect::from_size(200.0, 100.0));
        assert!(!pipeline.layers().weather);
    }
}
