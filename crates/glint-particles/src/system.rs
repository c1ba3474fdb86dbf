//! Per-world particle system: table lookup, simulation tick and draw dispatch

use crate::ambient::{AMBIENT_CAPACITY, AMBIENT_FX};
use crate::particle::{Particle, ParticlePool};
use crate::policy::{spawn_seed, SpawnPolicy};
use crate::weather::{WEATHER_CAPACITY, WEATHER_FX};
use glam::Vec2;
use glint_core::{Color, Rect, World};
use glint_lighting::{LightAggregator, LightEmitter, LightSource};
use glint_render::{Canvas, DrawCtx, DrawState};

/// Weather particles further than this outside the bounds are culled
pub const CULL_MARGIN: f32 = 48.0;

/// Phase offset between consecutive pool slots, so same-tick spawns never
/// animate in lockstep
pub const PHASE_STRIDE: f32 = 1.618;

/// Particle glows dimmer than this are not worth a light slot
const GLOW_THRESHOLD: f32 = 0.05;

/// Draws one particle. The last argument is the global time in seconds.
pub type DrawFn = fn(&mut DrawCtx<'_>, &Particle, f32);

/// Light contributed by one particle, if any
pub type GlowFn = fn(&Particle, f32) -> Option<LightSource>;

/// Everything one world's particle layer needs
pub struct WorldFx {
    pub spawn: SpawnPolicy,
    pub draw: DrawFn,
    pub glow: Option<GlowFn>,
}

/// One row per world; `None` means the layer is empty for that world
pub type FxTable = [Option<WorldFx>; World::COUNT];

pub(crate) fn glow_at(
    position: Vec2,
    radius: f32,
    color: Color,
    intensity: f32,
) -> Option<LightSource> {
    (intensity > GLOW_THRESHOLD).then_some(LightSource {
        position,
        radius,
        color,
        intensity,
    })
}

/// Fixed-capacity particle layer driven by a per-world behavior table.
///
/// The host calls [`set_world`](Self::set_world) on level load, then
/// [`update`](Self::update) and [`render`](Self::render) once per frame.
pub struct ParticleSystem<const N: usize> {
    label: &'static str,
    table: &'static FxTable,
    cull: bool,
    pool: ParticlePool<N>,
    world: Option<World>,
    fx: Option<&'static WorldFx>,
    bounds: Rect,
    spawn_timer: f32,
    spawn_counter: u32,
    draw: DrawState,
}

pub type AmbientParticles = ParticleSystem<AMBIENT_CAPACITY>;
pub type WeatherParticles = ParticleSystem<WEATHER_CAPACITY>;

impl AmbientParticles {
    pub fn ambient() -> Self {
        Self::new("ambient", &AMBIENT_FX, false)
    }
}

impl WeatherParticles {
    pub fn weather() -> Self {
        Self::new("weather", &WEATHER_FX, true)
    }
}

impl<const N: usize> ParticleSystem<N> {
    /// A layer over `table`; `cull` removes particles that leave the bounds
    pub fn new(label: &'static str, table: &'static FxTable, cull: bool) -> Self {
        Self {
            label,
            table,
            cull,
            pool: ParticlePool::new(),
            world: None,
            fx: None,
            bounds: Rect::default(),
            spawn_timer: 0.0,
            spawn_counter: 0,
            draw: DrawState::new(),
        }
    }

    /// Hard reset for a new level. Unknown indices select the empty layer.
    pub fn set_world(&mut self, world_index: i32, bounds: Rect) {
        let table = self.table;
        self.world = World::from_index(world_index);
        self.fx = self.world.and_then(|w| table[w.index()].as_ref());
        self.bounds = bounds;
        self.pool.clear();
        self.spawn_timer = 0.0;
        self.spawn_counter = 0;
        match self.world {
            Some(world) => log::debug!(
                "{} particles: world {world} ({})",
                self.label,
                if self.fx.is_some() { "active" } else { "empty" }
            ),
            None => log::debug!("{} particles: unknown world {world_index}, disabled", self.label),
        }
    }

    /// Advance by `dt` seconds (negative or NaN counts as zero)
    pub fn update(&mut self, dt: f32, global_time: f32) {
        let dt = if dt.is_nan() { 0.0 } else { dt.max(0.0) };
        let Some(fx) = self.fx else {
            return;
        };

        let cull = self.cull.then(|| self.bounds.expand(CULL_MARGIN));
        self.pool.update_and_compact(|p| {
            p.life -= dt;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            if p.life <= 0.0 {
                return false;
            }
            cull.map_or(true, |area| area.contains(p.position()))
        });

        let interval = fx.spawn.interval;
        if interval <= 0.0 {
            return;
        }
        self.spawn_timer += dt;
        while self.spawn_timer >= interval {
            if self.pool.is_full() {
                // Retry next tick instead of building a backlog
                self.spawn_timer = interval;
                break;
            }
            self.spawn_timer -= interval;
            self.spawn_one(&fx.spawn, global_time);
        }
    }

    fn spawn_one(&mut self, policy: &SpawnPolicy, global_time: f32) {
        let slot = self.pool.active_count();
        let seed = spawn_seed(self.spawn_counter, global_time);
        self.spawn_counter = self.spawn_counter.wrapping_add(1);
        let phase = global_time + slot as f32 * PHASE_STRIDE;
        let bounds = self.bounds;
        if let Some(p) = self.pool.spawn() {
            *p = policy.sample(seed, bounds, phase);
        }
    }

    /// Draw every live particle with the world's routine
    pub fn render(&mut self, canvas: &mut dyn Canvas, global_time: f32) {
        let Some(fx) = self.fx else {
            return;
        };
        if self.pool.is_empty() {
            return;
        }
        let mut ctx = self.draw.ctx(canvas);
        for p in self.pool.alive_slice() {
            (fx.draw)(&mut ctx, p, global_time);
        }
    }

    pub fn world(&self) -> Option<World> {
        self.world
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.alive_slice()
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    pub fn spawn_counter(&self) -> u32 {
        self.spawn_counter
    }

    /// True when the pooled paint and path hold no leftover state
    pub fn draw_state_is_default(&self) -> bool {
        self.draw.is_default()
    }
}

impl<const N: usize> LightEmitter for ParticleSystem<N> {
    fn emit_lights(&self, lights: &mut LightAggregator, time: f32) {
        let Some(glow) = self.fx.and_then(|fx| fx.glow) else {
            return;
        };
        for p in self.pool.alive_slice() {
            if let Some(light) = glow(p, time) {
                if !lights.add_light(light.position, light.radius, light.color, light.intensity) {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_render::RecordingCanvas;
    use proptest::prelude::*;

    const STEP: f32 = 1.0 / 60.0;

    fn bounds() -> Rect {
        Rect::from_size(640.0, 480.0)
    }

    fn run<const N: usize>(system: &mut ParticleSystem<N>, seconds: f32) -> f32 {
        let mut time = 0.0;
        while time < seconds {
            time += STEP;
            system.update(STEP, time);
        }
        time
    }

    #[test]
    fn cavern_spawn_timer_carries_remainder() {
        let mut spores = AmbientParticles::ambient();
        spores.set_world(World::Cavern.index() as i32, bounds());

        spores.update(0.5, 0.5);
        assert_eq!(spores.active_count(), 1);
        assert!(spores.spawn_timer().abs() < 1e-6);

        spores.update(1.2, 1.7);
        assert_eq!(spores.active_count(), 3);
        assert!((spores.spawn_timer() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn particle_expires_exactly_at_max_life() {
        let mut system = AmbientParticles::ambient();
        system.set_world(0, bounds());
        {
            let p = system.pool.spawn().unwrap();
            p.life = 4.0;
            p.max_life = 4.0;
            p.size = 999.0;
        }
        system.update(4.0, 4.0);
        assert!(system.particles().iter().all(|p| p.size != 999.0));
    }

    #[test]
    fn unknown_world_is_inert() {
        let mut system = WeatherParticles::weather();
        for index in [99, -1, 10, i32::MIN] {
            system.set_world(index, bounds());
            assert_eq!(system.world(), None);
            system.update(10.0, 10.0);
            assert_eq!(system.active_count(), 0);
            let mut canvas = RecordingCanvas::new();
            system.render(&mut canvas, 10.0);
            assert!(canvas.is_empty());
        }
    }

    #[test]
    fn reef_has_no_weather() {
        let mut system = WeatherParticles::weather();
        system.set_world(World::Reef.index() as i32, bounds());
        assert_eq!(system.world(), Some(World::Reef));
        run(&mut system, 3.0);
        assert_eq!(system.active_count(), 0);
    }

    #[test]
    fn reused_slot_gets_fresh_state() {
        let mut spores = AmbientParticles::ambient();
        spores.set_world(World::Cavern.index() as i32, bounds());
        spores.update(0.5, 0.5);
        assert_eq!(spores.particles()[0].phase, 0.5);

        spores.pool.alive_slice_mut()[0].life = 0.01;
        spores.update(0.5, 1.0);
        assert_eq!(spores.active_count(), 1);
        let p = spores.particles()[0];
        assert_eq!(p.phase, 1.0);
        assert_eq!(p.life, p.max_life);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut system = WeatherParticles::weather();
        system.set_world(World::Glacier.index() as i32, bounds());
        let time = run(&mut system, 2.0);
        let before: Vec<Particle> = system.particles().to_vec();
        let timer = system.spawn_timer();

        system.update(0.0, time);
        system.update(-1.0, time);
        system.update(f32::NAN, time);
        assert_eq!(system.particles(), &before[..]);
        assert_eq!(system.spawn_timer(), timer);
    }

    #[test]
    fn full_pool_skips_spawns_without_backlog() {
        let mut system = WeatherParticles::weather();
        // Rain spawns every 0.03 s, far faster than it can drain
        system.set_world(World::Swamp.index() as i32, Rect::from_size(4000.0, 4000.0));
        system.update(100.0, 100.0);
        assert_eq!(system.active_count(), system.capacity());
        assert_eq!(system.spawn_timer(), 0.03);
        assert_eq!(system.spawn_counter() as usize, system.capacity());
    }

    #[test]
    fn weather_leaving_bounds_is_culled() {
        let mut system = WeatherParticles::weather();
        let area = Rect::from_size(100.0, 100.0);
        system.set_world(World::Desert.index() as i32, area);
        system.update(0.05, 0.05);
        assert_eq!(system.active_count(), 1);

        // Streaks cross 180+ px per second, so the first one is long gone
        system.update(1.0, 1.05);
        let culled = area.expand(CULL_MARGIN);
        assert!(system.particles().iter().all(|p| culled.contains(p.position())));
        assert!(system.particles().iter().all(|p| p.max_life - p.life < 0.5));
    }

    #[test]
    fn set_world_resets_everything() {
        let mut system = AmbientParticles::ambient();
        system.set_world(World::Volcano.index() as i32, bounds());
        run(&mut system, 2.0);
        assert!(system.active_count() > 0);

        system.set_world(World::Void.index() as i32, bounds());
        assert_eq!(system.active_count(), 0);
        assert_eq!(system.spawn_timer(), 0.0);
        assert_eq!(system.spawn_counter(), 0);
    }

    #[test]
    fn render_restores_pooled_state_for_every_world() {
        let mut total = 0;
        for world in World::ALL {
            let mut ambient = AmbientParticles::ambient();
            let mut weather = WeatherParticles::weather();
            ambient.set_world(world.index() as i32, bounds());
            weather.set_world(world.index() as i32, bounds());
            let time = run(&mut ambient, 3.0);
            run(&mut weather, 3.0);

            let mut canvas = RecordingCanvas::new();
            ambient.render(&mut canvas, time);
            weather.render(&mut canvas, time);
            assert!(ambient.draw_state_is_default(), "{world} ambient");
            assert!(weather.draw_state_is_default(), "{world} weather");
            total += canvas.len();
        }
        assert!(total > 0);
    }

    #[test]
    fn render_is_deterministic() {
        let mut a = AmbientParticles::ambient();
        let mut b = AmbientParticles::ambient();
        a.set_world(World::Meadow.index() as i32, bounds());
        b.set_world(World::Meadow.index() as i32, bounds());
        let time = run(&mut a, 2.0);
        run(&mut b, 2.0);

        let mut first = RecordingCanvas::new();
        let mut second = RecordingCanvas::new();
        a.render(&mut first, time);
        b.render(&mut second, time);
        assert_eq!(first.calls(), second.calls());
    }

    #[test]
    fn glowing_worlds_emit_lights() {
        let mut embers = AmbientParticles::ambient();
        embers.set_world(World::Volcano.index() as i32, bounds());
        let time = run(&mut embers, 2.0);
        let mut lights = LightAggregator::new();
        embers.emit_lights(&mut lights, time);
        assert!(!lights.is_empty());

        let mut dust = AmbientParticles::ambient();
        dust.set_world(World::Desert.index() as i32, bounds());
        run(&mut dust, 2.0);
        lights.clear();
        dust.emit_lights(&mut lights, time);
        assert!(lights.is_empty());
    }

    proptest! {
        #[test]
        fn pool_respects_capacity_and_life_only_falls(
            world in -2i32..12,
            steps in prop::collection::vec(0.0f32..1.5, 1..40),
        ) {
            let mut system = WeatherParticles::weather();
            system.set_world(world, bounds());
            let mut time = 0.0;
            for dt in steps {
                let before: Vec<Particle> = system.particles().to_vec();
                time += dt;
                system.update(dt, time);
                prop_assert!(system.active_count() <= system.capacity());
                for p in system.particles() {
                    prop_assert!(p.life > 0.0 && p.life <= p.max_life);
                    let prior = before.iter().find(|q| {
                        q.max_life == p.max_life && q.size == p.size && q.phase == p.phase
                    });
                    if let Some(q) = prior {
                        prop_assert!(p.life <= q.life);
                    }
                }
            }
        }
    }
}
