//! Weather layer: faster precipitation-style particles drawn over the terrain
//!
//! Weather particles enter from outside the play area, so the system culls
//! anything that drifts past the bounds plus [`CULL_MARGIN`](crate::CULL_MARGIN).

use crate::particle::Particle;
use crate::policy::{SpawnPolicy, SpawnSite, Span};
use crate::system::{glow_at, FxTable, WorldFx};
use glam::Vec2;
use glint_core::{Color, Rect};
use glint_lighting::LightSource;
use glint_render::DrawCtx;

pub const WEATHER_CAPACITY: usize = 80;

const PETALS: [Color; 2] = [Color::rgb(1.0, 0.72, 0.82), Color::rgb(1.0, 0.9, 0.94)];
const SAND: Color = Color::rgb(0.9, 0.76, 0.5);
const DRIP: Color = Color::rgb(0.6, 0.8, 0.95);
const SNOW: Color = Color::rgb(0.97, 0.98, 1.0);
const RAIN: Color = Color::rgb(0.6, 0.7, 0.8);
const ASH: Color = Color::rgb(0.42, 0.4, 0.4);
const SMOKE: Color = Color::rgb(0.22, 0.21, 0.22);
const LEAVES: [Color; 2] = [Color::rgb(0.9, 0.5, 0.18), Color::rgb(0.55, 0.62, 0.2)];
const METEOR: Color = Color::rgb(0.85, 0.9, 1.0);

/// Weather behavior per world, indexed by `World::index()`. Reef has none.
pub static WEATHER_FX: FxTable = [
    // Meadow
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.3,
            site: SpawnSite::Top,
            vx: Span::new(10.0, 30.0),
            vy: Span::new(20.0, 40.0),
            size: Span::new(3.0, 5.0),
            life: Span::new(8.0, 14.0),
            variants: 2,
        },
        draw: petals,
        glow: None,
    }),
    // Desert
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.05,
            site: SpawnSite::Left,
            vx: Span::new(180.0, 260.0),
            vy: Span::new(5.0, 20.0),
            size: Span::new(1.0, 2.0),
            life: Span::new(3.0, 5.0),
            variants: 1,
        },
        draw: sandstorm,
        glow: None,
    }),
    // Cavern
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.6,
            site: SpawnSite::Top,
            vx: Span::fixed(0.0),
            vy: Span::new(90.0, 140.0),
            size: Span::new(1.5, 2.5),
            life: Span::new(4.0, 7.0),
            variants: 1,
        },
        draw: drips,
        glow: None,
    }),
    // Glacier
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.08,
            site: SpawnSite::Top,
            vx: Span::around_zero(8.0),
            vy: Span::new(25.0, 45.0),
            size: Span::new(1.5, 3.5),
            life: Span::new(12.0, 20.0),
            variants: 1,
        },
        draw: snow,
        glow: None,
    }),
    // Swamp
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.03,
            site: SpawnSite::Top,
            vx: Span::new(-20.0, -10.0),
            vy: Span::new(320.0, 420.0),
            size: Span::new(1.0, 1.5),
            life: Span::new(2.0, 3.0),
            variants: 1,
        },
        draw: rain,
        glow: None,
    }),
    // Volcano
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.1,
            site: SpawnSite::Top,
            vx: Span::around_zero(10.0),
            vy: Span::new(15.0, 30.0),
            size: Span::new(1.5, 3.0),
            life: Span::new(10.0, 16.0),
            variants: 1,
        },
        draw: ash,
        glow: None,
    }),
    // Reef
    None,
    // Foundry
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.5,
            site: SpawnSite::Bottom,
            vx: Span::around_zero(6.0),
            vy: Span::new(-25.0, -12.0),
            size: Span::new(8.0, 16.0),
            life: Span::new(5.0, 9.0),
            variants: 1,
        },
        draw: smoke,
        glow: None,
    }),
    // Temple
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.45,
            site: SpawnSite::Top,
            vx: Span::new(8.0, 24.0),
            vy: Span::new(20.0, 35.0),
            size: Span::new(3.0, 5.0),
            life: Span::new(10.0, 16.0),
            variants: 2,
        },
        draw: leaves,
        glow: None,
    }),
    // Void
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 1.5,
            site: SpawnSite::Top,
            vx: Span::new(140.0, 220.0),
            vy: Span::new(90.0, 140.0),
            size: Span::new(1.5, 2.5),
            life: Span::new(2.0, 4.0),
            variants: 1,
        },
        draw: meteors,
        glow: Some(meteor_glow),
    }),
];

fn sway(p: &Particle, time: f32, speed: f32, amount: f32) -> Vec2 {
    p.position() + Vec2::new((time * speed + p.phase).sin() * amount, 0.0)
}

fn petals(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let flutter = 0.4 + 0.6 * (time * 3.0 + p.phase).sin().abs();
    let c = sway(p, time, 1.2, 5.0);
    let w = p.size * 2.0 * flutter;
    let color = PETALS[usize::from(p.type_tag) % PETALS.len()];
    let mut paint = ctx.paint.scope();
    paint.fill(color.with_alpha(0.85 * p.envelope()));
    ctx.canvas.draw_oval(Rect::new(c.x - w * 0.5, c.y - p.size * 0.5, w, p.size), &paint);
}

fn sandstorm(ctx: &mut DrawCtx<'_>, p: &Particle, _time: f32) {
    let head = p.position();
    let mut paint = ctx.paint.scope();
    paint.stroke(SAND.with_alpha(0.5 * p.envelope()), p.size);
    ctx.canvas.draw_line(head - p.velocity() * 0.05, head, &paint);
}

fn drips(ctx: &mut DrawCtx<'_>, p: &Particle, _time: f32) {
    let (x, y, s) = (p.x, p.y, p.size);
    let mut paint = ctx.paint.scope();
    paint.fill(DRIP.with_alpha(0.8 * p.envelope()));
    let mut path = ctx.path.scope();
    path.move_to(Vec2::new(x, y - s * 3.0))
        .line_to(Vec2::new(x + s, y))
        .quad_to(Vec2::new(x, y + s * 1.6), Vec2::new(x - s, y))
        .close();
    ctx.canvas.draw_path(&path, &paint);
}

fn snow(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let mut paint = ctx.paint.scope();
    paint.fill(SNOW.with_alpha(0.8 * p.envelope())).blur(0.5);
    ctx.canvas.draw_circle(sway(p, time, 1.5, 6.0), p.size, &paint);
}

fn rain(ctx: &mut DrawCtx<'_>, p: &Particle, _time: f32) {
    let head = p.position();
    let mut paint = ctx.paint.scope();
    paint.stroke(RAIN.with_alpha(0.45 * p.envelope()), p.size);
    ctx.canvas.draw_line(head - p.velocity() * 0.03, head, &paint);
}

fn ash(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let mut paint = ctx.paint.scope();
    paint.fill(ASH.with_alpha(0.5 * p.envelope())).blur(p.size * 0.5);
    ctx.canvas.draw_circle(sway(p, time, 0.9, 8.0), p.size, &paint);
}

fn smoke(ctx: &mut DrawCtx<'_>, p: &Particle, _time: f32) {
    // Puffs swell as they age
    let radius = p.size * (1.0 + (1.0 - p.life_ratio()) * 1.5);
    let mut paint = ctx.paint.scope();
    paint.fill(SMOKE.with_alpha(0.18 * p.envelope())).blur(radius * 0.5);
    ctx.canvas.draw_circle(p.position(), radius, &paint);
}

fn leaves(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let c = sway(p, time, 1.1, 7.0);
    let along = Vec2::from_angle((time * 2.0 + p.phase).sin() * 0.8) * p.size;
    let side = along.perp() * 0.8;
    let color = LEAVES[usize::from(p.type_tag) % LEAVES.len()];
    let mut paint = ctx.paint.scope();
    paint.fill(color.with_alpha(0.9 * p.envelope()));
    let mut path = ctx.path.scope();
    path.move_to(c - along)
        .quad_to(c + side, c + along)
        .quad_to(c - side, c - along)
        .close();
    ctx.canvas.draw_path(&path, &paint);
}

fn meteors(ctx: &mut DrawCtx<'_>, p: &Particle, _time: f32) {
    let head = p.position();
    let alpha = p.envelope();
    let mut paint = ctx.paint.scope();
    paint.stroke(METEOR.with_alpha(alpha * 0.6), p.size).additive();
    ctx.canvas.draw_line(head - p.velocity() * 0.12, head, &paint);
    paint.fill(METEOR.with_alpha(alpha)).blur(1.0);
    ctx.canvas.draw_circle(head, p.size * 1.4, &paint);
}

fn meteor_glow(p: &Particle, _time: f32) -> Option<LightSource> {
    glow_at(p.position(), p.size * 14.0, METEOR, 0.3 * p.envelope())
}
