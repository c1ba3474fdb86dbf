//! Per-world backdrop gradients

use crate::canvas::Canvas;
use crate::paint::Paint;
use glint_core::{Color, Rect, World};

/// Horizontal bands used to approximate the vertical gradient
const BANDS: usize = 24;

/// (top, bottom) colors per world
const PALETTE: [(u32, u32); World::COUNT] = [
    (0x2F5D3A, 0x14301C), // meadow
    (0xC9A35E, 0x7A5A2C), // desert
    (0x1E1B24, 0x0B0A0F), // cavern
    (0xA8C8E0, 0x4E7391), // glacier
    (0x2C3B26, 0x121A10), // swamp
    (0x3A1410, 0x120505), // volcano
    (0x0F4C6B, 0x04192A), // reef
    (0x3B3B40, 0x1A1A1E), // foundry
    (0xD8D0BE, 0x8E8574), // temple
    (0x0A0818, 0x000000), // void
];

/// Neutral gradient for unrecognized worlds
const FALLBACK: (u32, u32) = (0x303038, 0x18181C);

/// Top and bottom backdrop colors for a world (neutral when `None`)
pub fn backdrop_colors(world: Option<World>) -> (Color, Color) {
    let (top, bottom) = world.map_or(FALLBACK, |w| PALETTE[w.index()]);
    (Color::from_hex(top), Color::from_hex(bottom))
}

/// Fill `rect` with the world's vertical gradient
pub fn fill_world_backdrop(canvas: &mut dyn Canvas, world: Option<World>, rect: Rect) {
    let (top, bottom) = backdrop_colors(world);
    let band_h = rect.h / BANDS as f32;
    let mut paint = Paint::default();
    for i in 0..BANDS {
        let t = i as f32 / (BANDS - 1) as f32;
        paint.fill(top.lerp(bottom, t));
        // Overlap by a pixel so bands never leave seams
        let band = Rect::new(rect.x, rect.y + band_h * i as f32, rect.w, band_h + 1.0);
        canvas.draw_rect(band, &paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCall, RecordingCanvas};

    #[test]
    fn backdrop_draws_fixed_band_count() {
        let mut canvas = RecordingCanvas::new();
        fill_world_backdrop(&mut canvas, World::from_index(3), Rect::from_size(100.0, 240.0));
        assert_eq!(canvas.len(), BANDS);
        let DrawCall::Rect { paint, .. } = &canvas.calls()[0] else {
            panic!("expected rect");
        };
        assert_eq!(paint.color, Color::from_hex(0xA8C8E0));
    }

    #[test]
    fn unknown_world_uses_fallback() {
        let (top, bottom) = backdrop_colors(World::from_index(99));
        assert_eq!(top, Color::from_hex(FALLBACK.0));
        assert_eq!(bottom, Color::from_hex(FALLBACK.1));
    }
}
