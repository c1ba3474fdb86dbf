//! Ambient layer: slow atmospheric particles drawn behind the terrain

use crate::particle::Particle;
use crate::policy::{SpawnPolicy, SpawnSite, Span};
use crate::system::{glow_at, FxTable, WorldFx};
use glam::Vec2;
use glint_core::Color;
use glint_lighting::LightSource;
use glint_render::DrawCtx;

pub const AMBIENT_CAPACITY: usize = 60;

const FIREFLY: Color = Color::rgb(0.85, 1.0, 0.35);
const FIREFLY_CORE: Color = Color::rgb(1.0, 1.0, 0.8);
const DUST: Color = Color::rgb(0.86, 0.74, 0.52);
const SPORE_TEAL: Color = Color::rgb(0.3, 0.95, 0.85);
const SPORE_PALE: Color = Color::rgb(0.7, 0.95, 0.6);
const FROST: Color = Color::rgb(0.85, 0.95, 1.0);
const BUBBLE_MURK: Color = Color::rgb(0.55, 0.7, 0.45);
const WISP: Color = Color::rgb(0.6, 1.0, 0.7);
const EMBER_HOT: Color = Color::rgb(1.0, 0.9, 0.4);
const EMBER_COOL: Color = Color::rgb(0.9, 0.2, 0.05);
const REEF_BUBBLE: Color = Color::rgb(0.7, 0.95, 1.0);
const SPARK: Color = Color::rgb(1.0, 0.7, 0.25);
const MOTE: Color = Color::rgb(1.0, 0.88, 0.55);
const STARS: [Color; 3] = [
    Color::rgb(1.0, 1.0, 1.0),
    Color::rgb(0.7, 0.82, 1.0),
    Color::rgb(0.82, 0.65, 1.0),
];

/// Ambient behavior per world, indexed by `World::index()`
pub static AMBIENT_FX: FxTable = [
    // Meadow
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.35,
            site: SpawnSite::Anywhere,
            vx: Span::around_zero(12.0),
            vy: Span::around_zero(8.0),
            size: Span::new(1.5, 3.0),
            life: Span::new(4.0, 7.0),
            variants: 1,
        },
        draw: fireflies,
        glow: Some(firefly_glow),
    }),
    // Desert
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.2,
            site: SpawnSite::Left,
            vx: Span::new(20.0, 45.0),
            vy: Span::around_zero(4.0),
            size: Span::new(1.0, 2.5),
            life: Span::new(5.0, 9.0),
            variants: 1,
        },
        draw: dust_motes,
        glow: None,
    }),
    // Cavern
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.5,
            site: SpawnSite::Anywhere,
            vx: Span::around_zero(3.0),
            vy: Span::new(-10.0, -4.0),
            size: Span::new(1.5, 3.0),
            life: Span::new(6.0, 10.0),
            variants: 2,
        },
        draw: spores,
        glow: Some(spore_glow),
    }),
    // Glacier
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.25,
            site: SpawnSite::Anywhere,
            vx: Span::around_zero(2.0),
            vy: Span::around_zero(2.0),
            size: Span::new(1.0, 2.5),
            life: Span::new(1.5, 3.0),
            variants: 1,
        },
        draw: frost_sparkles,
        glow: None,
    }),
    // Swamp
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.4,
            site: SpawnSite::Anywhere,
            vx: Span::around_zero(6.0),
            vy: Span::new(-12.0, -4.0),
            size: Span::new(1.5, 3.5),
            life: Span::new(3.0, 6.0),
            variants: 2,
        },
        draw: marsh,
        glow: Some(wisp_glow),
    }),
    // Volcano
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.12,
            site: SpawnSite::Bottom,
            vx: Span::around_zero(10.0),
            vy: Span::new(-60.0, -30.0),
            size: Span::new(1.0, 2.5),
            life: Span::new(2.0, 4.0),
            variants: 1,
        },
        draw: embers,
        glow: Some(ember_glow),
    }),
    // Reef
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.3,
            site: SpawnSite::Bottom,
            vx: Span::around_zero(4.0),
            vy: Span::new(-40.0, -20.0),
            size: Span::new(2.0, 5.0),
            life: Span::new(4.0, 8.0),
            variants: 1,
        },
        draw: reef_bubbles,
        glow: None,
    }),
    // Foundry
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.15,
            site: SpawnSite::Top,
            vx: Span::around_zero(30.0),
            vy: Span::new(60.0, 120.0),
            size: Span::new(1.0, 2.0),
            life: Span::new(1.0, 2.0),
            variants: 1,
        },
        draw: sparks,
        glow: Some(spark_glow),
    }),
    // Temple
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.4,
            site: SpawnSite::Anywhere,
            vx: Span::around_zero(5.0),
            vy: Span::new(-8.0, -2.0),
            size: Span::new(1.5, 3.0),
            life: Span::new(4.0, 8.0),
            variants: 1,
        },
        draw: light_motes,
        glow: Some(mote_glow),
    }),
    // Void
    Some(WorldFx {
        spawn: SpawnPolicy {
            interval: 0.3,
            site: SpawnSite::Anywhere,
            vx: Span::fixed(0.0),
            vy: Span::fixed(0.0),
            size: Span::new(0.8, 2.0),
            life: Span::new(3.0, 6.0),
            variants: 3,
        },
        draw: stars,
        glow: None,
    }),
];

fn blink(p: &Particle, time: f32, speed: f32) -> f32 {
    0.5 + 0.5 * (time * speed + p.phase).sin()
}

fn firefly_center(p: &Particle, time: f32) -> Vec2 {
    p.position() + Vec2::new((time * 1.3 + p.phase).sin() * 3.0, 0.0)
}

fn fireflies(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let alpha = p.envelope() * blink(p, time, 3.0);
    if alpha <= 0.01 {
        return;
    }
    let center = firefly_center(p, time);
    let mut paint = ctx.paint.scope();
    paint.fill(FIREFLY.with_alpha(alpha * 0.35)).blur(p.size * 2.0).additive();
    ctx.canvas.draw_circle(center, p.size * 3.0, &paint);
    paint.fill(FIREFLY_CORE.with_alpha(alpha)).blur(0.0);
    ctx.canvas.draw_circle(center, p.size, &paint);
}

fn firefly_glow(p: &Particle, time: f32) -> Option<LightSource> {
    let intensity = 0.3 * p.envelope() * blink(p, time, 3.0);
    glow_at(firefly_center(p, time), p.size * 10.0, FIREFLY, intensity)
}

fn dust_motes(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let bob = (time * 2.0 + p.phase).sin() * 2.0;
    let mut paint = ctx.paint.scope();
    paint.fill(DUST.with_alpha(0.45 * p.envelope()));
    ctx.canvas.draw_circle(p.position() + Vec2::new(0.0, bob), p.size, &paint);
}

fn spores(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let color = if p.type_tag == 0 { SPORE_TEAL } else { SPORE_PALE };
    let alpha = p.envelope() * (0.6 + 0.4 * blink(p, time, 1.5));
    let center = p.position() + Vec2::new((time * 0.8 + p.phase).sin() * 4.0, 0.0);
    let mut paint = ctx.paint.scope();
    paint.fill(color.with_alpha(alpha * 0.25)).blur(p.size).additive();
    ctx.canvas.draw_circle(center, p.size * 2.5, &paint);
    paint.fill(color.with_alpha(alpha * 0.8)).blur(0.0);
    ctx.canvas.draw_circle(center, p.size * 0.7, &paint);
}

fn spore_glow(p: &Particle, time: f32) -> Option<LightSource> {
    if p.type_tag != 0 {
        return None;
    }
    glow_at(p.position(), p.size * 8.0, SPORE_TEAL, 0.15 * p.envelope() * blink(p, time, 1.5))
}

fn frost_sparkles(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let twinkle = (time * 5.0 + p.phase).sin().max(0.0);
    let alpha = p.envelope() * twinkle;
    if alpha <= 0.01 {
        return;
    }
    let c = p.position();
    let arm = p.size * 2.5 * (0.6 + 0.4 * twinkle);
    let mut paint = ctx.paint.scope();
    paint.stroke(FROST.with_alpha(alpha), 1.0).additive();
    ctx.canvas.draw_line(c - Vec2::X * arm, c + Vec2::X * arm, &paint);
    ctx.canvas.draw_line(c - Vec2::Y * arm, c + Vec2::Y * arm, &paint);
    paint.fill(FROST.with_alpha(alpha));
    ctx.canvas.draw_circle(c, p.size * 0.6, &paint);
}

fn marsh(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let mut paint = ctx.paint.scope();
    if p.type_tag == 0 {
        let wobble = 1.0 + 0.12 * (time * 4.0 + p.phase).sin();
        paint.stroke(BUBBLE_MURK.with_alpha(0.5 * p.envelope()), 1.0);
        ctx.canvas.draw_circle(p.position(), p.size * wobble, &paint);
    } else {
        let alpha = p.envelope() * blink(p, time, 2.0);
        paint.fill(WISP.with_alpha(alpha * 0.4)).blur(p.size * 1.5).additive();
        ctx.canvas.draw_circle(p.position(), p.size * 2.0, &paint);
    }
}

fn wisp_glow(p: &Particle, time: f32) -> Option<LightSource> {
    if p.type_tag != 1 {
        return None;
    }
    glow_at(p.position(), p.size * 9.0, WISP, 0.2 * p.envelope() * blink(p, time, 2.0))
}

fn ember_color(p: &Particle) -> Color {
    EMBER_HOT.lerp(EMBER_COOL, 1.0 - p.life_ratio())
}

fn embers(ctx: &mut DrawCtx<'_>, p: &Particle, _time: f32) {
    let mut paint = ctx.paint.scope();
    paint.fill(ember_color(p).with_alpha(p.envelope())).blur(1.5).additive();
    ctx.canvas.draw_circle(p.position(), p.size, &paint);
}

fn ember_glow(p: &Particle, _time: f32) -> Option<LightSource> {
    glow_at(p.position(), p.size * 8.0, ember_color(p), 0.25 * p.envelope())
}

fn reef_bubbles(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let radius = p.size * (1.0 + 0.1 * (time * 4.0 + p.phase).sin());
    let alpha = p.envelope();
    let mut paint = ctx.paint.scope();
    paint.stroke(REEF_BUBBLE.with_alpha(0.6 * alpha), 1.0);
    ctx.canvas.draw_circle(p.position(), radius, &paint);
    paint.fill(Color::WHITE.with_alpha(0.7 * alpha));
    ctx.canvas.draw_circle(p.position() - Vec2::splat(radius * 0.35), radius * 0.25, &paint);
}

fn sparks(ctx: &mut DrawCtx<'_>, p: &Particle, _time: f32) {
    let head = p.position();
    let tail = head - p.velocity() * 0.04;
    let mut paint = ctx.paint.scope();
    paint.stroke(SPARK.with_alpha(p.envelope()), p.size).additive();
    ctx.canvas.draw_line(tail, head, &paint);
}

fn spark_glow(p: &Particle, _time: f32) -> Option<LightSource> {
    glow_at(p.position(), p.size * 6.0, SPARK, 0.2 * p.envelope())
}

fn light_motes(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let radius = p.size * (1.0 + 0.3 * (time * 2.0 + p.phase).sin());
    let mut paint = ctx.paint.scope();
    paint.fill(MOTE.with_alpha(0.7 * p.envelope())).blur(p.size).additive();
    ctx.canvas.draw_circle(p.position(), radius, &paint);
}

fn mote_glow(p: &Particle, _time: f32) -> Option<LightSource> {
    glow_at(p.position(), p.size * 9.0, MOTE, 0.2 * p.envelope())
}

fn stars(ctx: &mut DrawCtx<'_>, p: &Particle, time: f32) {
    let color = STARS[usize::from(p.type_tag).min(STARS.len() - 1)];
    let alpha = p.envelope() * (0.6 + 0.4 * (time * 4.0 + p.phase).sin());
    let mut paint = ctx.paint.scope();
    paint.fill(color.with_alpha(alpha * 0.3)).blur(p.size);
    ctx.canvas.draw_circle(p.position(), p.size * 2.0, &paint);
    paint.fill(color.with_alpha(alpha)).blur(0.0);
    ctx.canvas.draw_circle(p.position(), p.size * 0.6, &paint);
}
