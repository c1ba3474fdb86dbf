//! Living-surface decals: grass, moss, coral and wood grain

use crate::cell::DecalCell;
use glam::Vec2;
use glint_core::{Color, Rect};
use glint_render::DrawCtx;

const GRASS_COUNT: i32 = 1_000;
const GRASS_X: i32 = 2_000;
const GRASS_HEIGHT: i32 = 3_000;
const GRASS_SHADE: i32 = 4_000;

const MOSS_COUNT: i32 = 5_000;
const MOSS_U: i32 = 6_000;
const MOSS_V: i32 = 7_000;
const MOSS_SIZE: i32 = 8_000;
const MOSS_SPECKS: i32 = 9_000;
const MOSS_SPECKS_V: i32 = 9_500;

const CORAL_COUNT: i32 = 10_000;
const CORAL_BASE: i32 = 11_000;
const CORAL_LEAN: i32 = 12_000;
const CORAL_HEIGHT: i32 = 13_000;
const CORAL_FORK: i32 = 14_000;

const WOOD_LINES: i32 = 15_000;
const WOOD_JITTER: i32 = 16_000;
const WOOD_BEND: i32 = 17_000;
const WOOD_KNOT: i32 = 18_000;
const WOOD_KNOT_U: i32 = 19_000;
const WOOD_KNOT_V: i32 = 20_000;

const MOSS_GREEN: Color = Color::rgb(0.32, 0.52, 0.2);
const CORAL_PINK: Color = Color::rgb(1.0, 0.45, 0.5);

/// A few curved blades rising from the bottom edge, swaying with time
pub fn grass(ctx: &mut DrawCtx<'_>, cell: &DecalCell) {
    let r = cell.rect;
    let blades = cell.count(GRASS_COUNT, 3, 6);
    let half = (cell.extent() * 0.04).max(0.75);
    let mut paint = ctx.paint.scope();
    let mut path = ctx.path.scope();
    for i in 0..blades {
        let base = Vec2::new(
            r.x + r.w * cell.item_range(GRASS_X, i, 0.1, 0.9),
            r.bottom() - r.h * 0.05,
        );
        let height = r.h * cell.item_range(GRASS_HEIGHT, i, 0.2, 0.45);
        let sway = (cell.time * 2.0 + base.x * 0.05).sin() * r.w * 0.06;
        let tip = base + Vec2::new(sway, -height);

        path.clear();
        path.move_to(base - Vec2::X * half)
            .quad_to(base + Vec2::new(sway * 0.5, -height * 0.6), tip)
            .quad_to(base + Vec2::new(sway * 0.5 + half, -height * 0.5), base + Vec2::X * half)
            .close();
        let shade = cell.item_range(GRASS_SHADE, i, 0.8, 1.2);
        paint.fill(cell.color.scale_rgb(shade).with_alpha(0.8));
        ctx.canvas.draw_path(&path, &paint);
    }
}

/// Soft clumps hugging the cell edges
pub fn moss(ctx: &mut DrawCtx<'_>, cell: &DecalCell) {
    let tint = cell.color.lerp(MOSS_GREEN, 0.6);
    let clumps = cell.count(MOSS_COUNT, 2, 5);
    let mut paint = ctx.paint.scope();
    paint.fill(tint.with_alpha(0.55)).blur(1.0);
    for i in 0..clumps {
        // Bias toward the edges: square the distance from the center line
        let u = cell.item(MOSS_U, i);
        let u = if u < 0.5 { 2.0 * u * u } else { 1.0 - 2.0 * (1.0 - u) * (1.0 - u) };
        let v = 0.55 + 0.4 * cell.item(MOSS_V, i);
        let radius = cell.extent() * cell.item_range(MOSS_SIZE, i, 0.06, 0.14);
        ctx.canvas.draw_circle(cell.rect.at(u, v), radius, &paint);
    }
    paint.fill(tint.scale_rgb(1.3).with_alpha(0.6)).blur(0.0);
    for i in 0..3 {
        let p = cell.point(MOSS_SPECKS, MOSS_SPECKS_V, i, 0.15);
        ctx.canvas.draw_circle(p, cell.extent() * 0.025, &paint);
    }
}

/// Branching stalks growing up from the bottom edge
pub fn coral(ctx: &mut DrawCtx<'_>, cell: &DecalCell) {
    let r = cell.rect;
    let tint = cell.color.lerp(CORAL_PINK, 0.7);
    let stalks = cell.count(CORAL_COUNT, 1, 2);
    let mut paint = ctx.paint.scope();
    for i in 0..stalks {
        let base = Vec2::new(r.x + r.w * cell.item_range(CORAL_BASE, i, 0.25, 0.75), r.bottom());
        let lean = cell.item_range(CORAL_LEAN, i, -0.4, 0.4);
        let height = r.h * cell.item_range(CORAL_HEIGHT, i, 0.3, 0.45);
        let fork = cell.clamp(base + Vec2::new(lean.sin(), -lean.cos()) * height);

        paint.stroke(tint.with_alpha(0.85), 2.0);
        ctx.canvas.draw_line(base, fork, &paint);

        let spread = cell.item_range(CORAL_FORK, i, 0.35, 0.6);
        let mut tips = [Vec2::ZERO; 2];
        for (tip, side) in tips.iter_mut().zip([-1.0f32, 1.0]) {
            let angle = lean + side * spread;
            *tip = cell.clamp(fork + Vec2::new(angle.sin(), -angle.cos()) * height * 0.55);
        }
        paint.stroke(tint.with_alpha(0.85), 1.2);
        for tip in tips {
            ctx.canvas.draw_line(fork, tip, &paint);
        }
        paint.fill(tint.scale_rgb(1.15));
        for tip in tips {
            ctx.canvas.draw_circle(tip, 1.2, &paint);
        }
    }
}

/// Wavy horizontal grain, occasionally with a knot. Not tied to a world;
/// hosts use it for crates and bridges.
pub fn wood_grain(ctx: &mut DrawCtx<'_>, cell: &DecalCell) {
    let r = cell.rect;
    let lines = cell.count(WOOD_LINES, 3, 5);
    let mut paint = ctx.paint.scope();
    let mut path = ctx.path.scope();
    paint.stroke(cell.color.scale_rgb(0.7).with_alpha(0.45), 1.0);
    for i in 0..lines {
        let y = r.y + r.h * (i as f32 + 0.5) / lines as f32
            + r.h * cell.item_range(WOOD_JITTER, i, -0.04, 0.04);
        let bend = r.h * cell.item_range(WOOD_BEND, i, -0.08, 0.08);
        path.clear();
        path.move_to(cell.clamp(Vec2::new(r.x, y)))
            .quad_to(
                Vec2::new(r.x + r.w * 0.5, y + bend),
                cell.clamp(Vec2::new(r.right(), y)),
            );
        ctx.canvas.draw_path(&path, &paint);
    }

    if cell.random(WOOD_KNOT) < 0.2 {
        let u = 0.25 + 0.5 * cell.random(WOOD_KNOT_U);
        let v = 0.25 + 0.5 * cell.random(WOOD_KNOT_V);
        let center = r.at(u, v);
        let (w, h) = (r.w * 0.18, r.h * 0.1);
        paint.stroke(cell.color.scale_rgb(0.55).with_alpha(0.6), 1.0);
        ctx.canvas.draw_oval(Rect::new(center.x - w * 0.5, center.y - h * 0.5, w, h), &paint);
    }
}
