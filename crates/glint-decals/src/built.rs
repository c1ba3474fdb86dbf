//! Man-made surfaces: brick courses and rivet plates

use crate::cell::DecalCell;
use glam::Vec2;
use glint_core::Rect;
use glint_render::DrawCtx;

const BRICK_TINT: i32 = 47_000;
const RIVET_MISSING: i32 = 48_000;

/// Two brick courses per cell, running bond across rows
pub fn brick(ctx: &mut DrawCtx<'_>, cell: &DecalCell) {
    let r = cell.rect;
    let course_h = r.h * 0.5;
    let mut paint = ctx.paint.scope();

    let mut tint = 0;
    for course in 0..2 {
        let y = r.y + course_h * course as f32;
        // An even course count per cell keeps the bond continuous between rows
        let joints: &[f32] = if course == 1 { &[0.0, 1.0] } else { &[0.0, 0.5, 1.0] };
        for pair in joints.windows(2) {
            let shade = 0.85 + 0.25 * cell.item(BRICK_TINT, tint);
            tint += 1;
            paint.fill(cell.color.scale_rgb(shade).with_alpha(0.35));
            let brick = Rect::new(r.x + r.w * pair[0], y, r.w * (pair[1] - pair[0]), course_h);
            ctx.canvas.draw_rect(brick, &paint);
        }
        paint.stroke(cell.color.scale_rgb(0.5).with_alpha(0.6), 1.0);
        for &j in joints.iter().filter(|&&j| j > 0.0 && j < 1.0) {
            let x = r.x + r.w * j;
            ctx.canvas.draw_line(Vec2::new(x, y), Vec2::new(x, y + course_h), &paint);
        }
    }
    paint.stroke(cell.color.scale_rgb(0.5).with_alpha(0.6), 1.0);
    ctx.canvas.draw_line(r.at(0.0, 0.5), r.at(1.0, 0.5), &paint);
}

/// Rivet heads near each corner; now and then one is missing
pub fn rivets(ctx: &mut DrawCtx<'_>, cell: &DecalCell) {
    const CORNERS: [(f32, f32); 4] = [(0.15, 0.15), (0.85, 0.15), (0.15, 0.85), (0.85, 0.85)];
    let radius = cell.extent() * 0.06;
    let mut paint = ctx.paint.scope();
    for (i, &(u, v)) in CORNERS.iter().enumerate() {
        if cell.item(RIVET_MISSING, i) < 0.15 {
            continue;
        }
        let center = cell.rect.at(u, v);
        paint.fill(cell.color.scale_rgb(1.2));
        ctx.canvas.draw_circle(center, radius, &paint);
        paint.stroke(cell.color.scale_rgb(0.45).with_alpha(0.8), 0.75);
        ctx.canvas.draw_circle(center, radius, &paint);
        paint.fill(cell.color.scale_rgb(1.5).with_alpha(0.7));
        ctx.canvas.draw_circle(center - Vec2::splat(radius * 0.3), radius * 0.35, &paint);
    }
}
