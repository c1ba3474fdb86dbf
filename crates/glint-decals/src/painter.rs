//! World-to-decal mapping and the pooled painter

use crate::built::{brick, rivets};
use crate::cell::{DecalCell, DecalFn};
use crate::mineral::{cracks, ember_cracks, ice_crystals, marble_veins, sand_grain};
use crate::organic::{coral, grass, moss};
use glint_core::World;
use glint_render::{Canvas, DrawState};

const WORLD_DECALS: [DecalFn; World::COUNT] = [
    grass,
    sand_grain,
    cracks,
    ice_crystals,
    moss,
    ember_cracks,
    coral,
    rivets,
    marble_veins,
    brick,
];

/// The default tile decal of a world
pub fn decal_for_world(world: World) -> DecalFn {
    WORLD_DECALS[world.index()]
}

/// Owns the pooled paint and path that decal routines draw with
#[derive(Debug, Default)]
pub struct DecalPainter {
    draw: DrawState,
}

impl DecalPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint the world's decal into `cell`; unknown worlds paint nothing
    pub fn paint_cell(&mut self, canvas: &mut dyn Canvas, world_index: i32, cell: &DecalCell) {
        if let Some(world) = World::from_index(world_index) {
            self.paint_with(canvas, decal_for_world(world), cell);
        }
    }

    /// Paint an explicit decal, e.g. [`wood_grain`](crate::wood_grain) on a crate
    pub fn paint_with(&mut self, canvas: &mut dyn Canvas, decal: DecalFn, cell: &DecalCell) {
        let mut ctx = self.draw.ctx(canvas);
        decal(&mut ctx, cell);
    }

    pub fn draw_state_is_default(&self) -> bool {
        self.draw.is_default()
    }
}
