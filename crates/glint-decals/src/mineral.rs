//! Stone, sand and ice decals

use crate::cell::DecalCell;
use glam::Vec2;
use glint_core::Color;
use glint_render::{BlendMode, DrawCtx, Path};

const CRACK_PRESENT: i32 = 21_000;
const CRACK_COUNT: i32 = 22_000;
const CRACK_START_U: i32 = 23_000;
const CRACK_START_V: i32 = 24_000;
const CRACK_HEADING: i32 = 25_000;
const CRACK_TURN: i32 = 26_000;
const CRACK_STEP: i32 = 27_000;

const EMBER_COUNT: i32 = 28_000;
const EMBER_PULSE: i32 = 29_000;

const SAND_COUNT: i32 = 30_000;
const SAND_U: i32 = 31_000;
const SAND_V: i32 = 32_000;
const SAND_SIZE: i32 = 33_000;
const SAND_TONE: i32 = 34_000;
const SAND_RIPPLE: i32 = 35_000;
const SAND_RIPPLE_Y: i32 = 36_000;

const ICE_COUNT: i32 = 37_000;
const ICE_U: i32 = 38_000;
const ICE_V: i32 = 39_000;
const ICE_SIZE: i32 = 40_000;
const ICE_TWIST: i32 = 41_000;

const VEIN_COUNT: i32 = 42_000;
const VEIN_START: i32 = 43_000;
const VEIN_END: i32 = 44_000;
const VEIN_BEND: i32 = 45_000;
const VEIN_WIDTH: i32 = 46_000;

const CRACK_SEGMENTS: usize = 4;

const EMBER_GLOW: Color = Color::rgb(1.0, 0.45, 0.1);
const EMBER_CORE: Color = Color::rgb(1.0, 0.85, 0.4);

/// Jagged polyline random walk for crack `i`, kept inside the cell
fn build_crack(path: &mut Path, cell: &DecalCell, i: usize) {
    let start = cell.point(CRACK_START_U, CRACK_START_V, i, 0.2);
    let mut heading = cell.item(CRACK_HEADING, i) * std::f32::consts::TAU;
    let mut at = start;
    path.clear();
    path.move_to(at);
    for s in 0..CRACK_SEGMENTS {
        let k = i * CRACK_SEGMENTS + s;
        heading += cell.item_range(CRACK_TURN, k, -0.6, 0.6);
        let step = cell.extent() * cell.item_range(CRACK_STEP, k, 0.12, 0.25);
        at = cell.clamp(at + Vec2::from_angle(heading) * step);
        path.line_to(at);
    }
}

/// Thin dark fractures; roughly half the cells stay intact
pub fn cracks(ctx: &mut DrawCtx<'_>, cell: &DecalCell) {
    if cell.random(CRACK_PRESENT) > 0.55 {
        return;
    }
    let count = cell.count(CRACK_COUNT, 1, 3);
    let mut paint = ctx.paint.scope();
    let mut path = ctx.path.scope();
    paint.stroke(cell.color.scale_rgb(0.45).with_alpha(0.7), 1.0);
    for i in 0..count {
        build_crack(&mut path, cell, i);
        ctx.canvas.draw_path(&path, &paint);
    }
}

/// Fractures with molten light pulsing inside them
pub fn ember_cracks(ctx: &mut DrawCtx<'_>, cell: &DecalCell) {
    let count = cell.count(EMBER_COUNT, 1, 2);
    let pulse = 0.4 + 0.3 * (cell.time * 3.0 + cell.random(EMBER_PULSE) * 6.0).sin();
    let mut paint = ctx.paint.scope();
    let mut path = ctx.path.scope();
    for i in 0..count {
        build_crack(&mut path, cell, i);
        paint.stroke(cell.color.scale_rgb(0.3).with_alpha(0.8), 2.0).blur(0.0);
        paint.blend = BlendMode::SrcOver;
        ctx.canvas.draw_path(&path, &paint);
        paint.stroke(EMBER_GLOW.with_alpha(pulse), 2.0).blur(1.5).additive();
        ctx.canvas.draw_path(&path, &paint);
        paint.stroke(EMBER_CORE.with_alpha(pulse + 0.2), 0.8).blur(0.0);
        ctx.canvas.draw_path(&path, &paint);
    }
}

/// Scattered light and dark grains with an occasional wind ripple
pub fn sand_grain(ctx: &mut DrawCtx<'_>, cell: &DecalCell) {
    let grains = cell.count(SAND_COUNT, 6, 12);
    let mut paint = ctx.paint.scope();
    for i in 0..grains {
        let p = cell.point(SAND_U, SAND_V, i, 0.05);
        let radius = cell.item_range(SAND_SIZE, i, 0.6, 1.4);
        let tone = if cell.item(SAND_TONE, i) < 0.5 { 1.15 } else { 0.8 };
        paint.fill(cell.color.scale_rgb(tone).with_alpha(0.6));
        ctx.canvas.draw_circle(p, radius, &paint);
    }

    if cell.random(SAND_RIPPLE) < 0.4 {
        let r = cell.rect;
        let y = r.y + r.h * (0.3 + 0.4 * cell.random(SAND_RIPPLE_Y));
        let mut path = ctx.path.scope();
        path.move_to(Vec2::new(r.x, y))
            .quad_to(Vec2::new(r.x + r.w * 0.25, y - r.h * 0.08), Vec2::new(r.x + r.w * 0.5, y))
            .quad_to(Vec2::new(r.x + r.w * 0.75, y + r.h * 0.08), Vec2::new(r.right(), y));
        paint.stroke(cell.color.scale_rgb(0.85).with_alpha(0.4), 1.0);
        ctx.canvas.draw_path(&path, &paint);
    }
}

/// Six-armed frost stars that shimmer slowly
pub fn ice_crystals(ctx: &mut DrawCtx<'_>, cell: &DecalCell) {
    let crystals = cell.count(ICE_COUNT, 1, 3);
    let shimmer = 0.5 + 0.3 * (cell.time * 2.0 + cell.gx.wrapping_add(cell.gy) as f32).sin();
    let tint = cell.color.lerp(Color::WHITE, 0.6).with_alpha(shimmer);
    let mut paint = ctx.paint.scope();
    paint.stroke(tint, 1.0);
    for i in 0..crystals {
        let center = cell.point(ICE_U, ICE_V, i, 0.25);
        let arm = cell.extent() * cell.item_range(ICE_SIZE, i, 0.08, 0.18);
        let twist = cell.item(ICE_TWIST, i) * std::f32::consts::PI;
        for k in 0..3 {
            let d = Vec2::from_angle(twist + k as f32 * std::f32::consts::FRAC_PI_3) * arm;
            ctx.canvas.draw_line(center - d, center + d, &paint);
        }
    }
    let r = cell.rect;
    paint.stroke(Color::WHITE.with_alpha(shimmer * 0.3), 1.0);
    ctx.canvas.draw_line(r.at(0.15, 0.85), r.at(0.45, 0.55), &paint);
}

/// Soft curving veins running edge to edge
pub fn marble_veins(ctx: &mut DrawCtx<'_>, cell: &DecalCell) {
    let r = cell.rect;
    let veins = cell.count(VEIN_COUNT, 1, 2);
    let light = cell.color.lerp(Color::WHITE, 0.5);
    let mut paint = ctx.paint.scope();
    let mut path = ctx.path.scope();
    for i in 0..veins {
        let from = r.at(0.0, cell.item_range(VEIN_START, i, 0.1, 0.9));
        let to = r.at(1.0, cell.item_range(VEIN_END, i, 0.1, 0.9));
        let mid = (from + to) * 0.5;
        let bend = Vec2::new(0.0, r.h * cell.item_range(VEIN_BEND, i, -0.25, 0.25));
        path.clear();
        path.move_to(from)
            .quad_to(cell.clamp((from + mid) * 0.5 + bend), mid)
            .quad_to(cell.clamp((mid + to) * 0.5 - bend), to);

        let width = cell.item_range(VEIN_WIDTH, i, 0.8, 1.6);
        paint.stroke(light.with_alpha(0.5), width).blur(0.5);
        ctx.canvas.draw_path(&path, &paint);
        paint.stroke(cell.color.scale_rgb(0.6).with_alpha(0.35), 0.5).blur(0.0);
        ctx.canvas.draw_path(&path, &paint);
    }
}
