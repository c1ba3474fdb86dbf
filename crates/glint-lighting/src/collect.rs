//! Rebuilding the light buffer from a read-only snapshot of game state

use crate::light::LightAggregator;
use crate::sources::PowerUpKind;
use bitflags::bitflags;
use glam::Vec2;
use glint_core::{noise, World};

/// Salt for the per-cell torch placement roll
pub const TORCH_SALT: i32 = 7_331;

bitflags! {
    /// Terrain flags of one grid cell
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellFlags: u8 {
        const WALL = 1 << 0;
        const LAVA = 1 << 1;
        const ICE = 1 << 2;
        const EXIT = 1 << 3;
        const EXIT_OPEN = 1 << 4;
    }
}

/// Row-major terrain grid view
#[derive(Debug, Clone, Copy)]
pub struct GridSnapshot<'a> {
    /// Top-left corner of cell (0, 0) in pixels
    pub origin: Vec2,
    pub cell_size: f32,
    pub columns: usize,
    pub rows: usize,
    pub cells: &'a [CellFlags],
}

impl<'a> GridSnapshot<'a> {
    pub const fn empty(cell_size: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            cell_size,
            columns: 0,
            rows: 0,
            cells: &[],
        }
    }

    pub fn cell_center(&self, gx: usize, gy: usize) -> Vec2 {
        self.origin + Vec2::new(gx as f32 + 0.5, gy as f32 + 0.5) * self.cell_size
    }

    /// Flags of cell (gx, gy); out-of-range cells read as empty
    pub fn flags(&self, gx: usize, gy: usize) -> CellFlags {
        if gx >= self.columns || gy >= self.rows {
            return CellFlags::empty();
        }
        self.cells
            .get(gy * self.columns + gx)
            .copied()
            .unwrap_or_default()
    }

    /// Visit every cell containing any of `mask`, row-major
    fn for_each_with<F: FnMut(usize, usize, CellFlags)>(&self, mask: CellFlags, mut f: F) {
        for gy in 0..self.rows {
            for gx in 0..self.columns {
                let flags = self.flags(gx, gy);
                if flags.intersects(mask) {
                    f(gx, gy, flags);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BombSnapshot {
    pub position: Vec2,
    /// Remaining fuse over total fuse, 1 = just placed
    pub fuse_ratio: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionSnapshot {
    pub position: Vec2,
    /// 0 = detonation, 1 = finished
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossSnapshot {
    pub position: Vec2,
    pub enraged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpSnapshot {
    pub position: Vec2,
    pub kind: PowerUpKind,
}

/// Everything the lighting pass reads from the host for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub world: Option<World>,
    pub grid: GridSnapshot<'a>,
    pub bombs: &'a [BombSnapshot],
    pub explosions: &'a [ExplosionSnapshot],
    pub bosses: &'a [BossSnapshot],
    pub power_ups: &'a [PowerUpSnapshot],
    /// Player position while the shield is up
    pub shield: Option<Vec2>,
}

impl<'a> FrameSnapshot<'a> {
    /// A snapshot with no entities and no terrain
    pub const fn empty(world: Option<World>, cell_size: f32) -> Self {
        Self {
            world,
            grid: GridSnapshot::empty(cell_size),
            bombs: &[],
            explosions: &[],
            bosses: &[],
            power_ups: &[],
            shield: None,
        }
    }
}

/// Anything besides entities and terrain that contributes lights (glowing particles)
pub trait LightEmitter {
    fn emit_lights(&self, lights: &mut LightAggregator, time: f32);
}

/// Fraction of wall cells carrying a torch in this world
pub fn torch_chance(world: Option<World>) -> f32 {
    match world {
        Some(World::Cavern) => 0.12,
        Some(World::Temple) => 0.08,
        Some(World::Foundry) => 0.05,
        Some(World::Volcano) => 0.04,
        _ => 0.0,
    }
}

/// Stable per-cell torch placement; never flickers between frames
pub fn has_torch(world: Option<World>, gx: i32, gy: i32) -> bool {
    let chance = torch_chance(world);
    chance > 0.0 && noise::cell_random(gx, gy, TORCH_SALT) < chance
}

impl LightAggregator {
    /// Clear and rebuild the buffer for this frame.
    ///
    /// Bombs and explosions go in first and particle emitters last, so under
    /// saturation the decorative lights are the ones dropped.
    pub fn collect_light_sources(
        &mut self,
        snapshot: &FrameSnapshot<'_>,
        emitters: &[&dyn LightEmitter],
        time: f32,
    ) {
        self.clear();
        let grid = &snapshot.grid;
        let cell = grid.cell_size;

        for bomb in snapshot.bombs {
            self.add_bomb_light(bomb.position, bomb.fuse_ratio, time, cell);
        }
        for explosion in snapshot.explosions {
            self.add_explosion_light(explosion.position, explosion.progress, cell);
        }
        grid.for_each_with(CellFlags::LAVA, |gx, gy, _| {
            self.add_lava_light(grid.cell_center(gx, gy), time, cell);
        });
        grid.for_each_with(CellFlags::ICE, |gx, gy, _| {
            self.add_ice_light(grid.cell_center(gx, gy), time, cell);
        });
        grid.for_each_with(CellFlags::EXIT, |gx, gy, flags| {
            let open = flags.contains(CellFlags::EXIT_OPEN);
            self.add_exit_light(grid.cell_center(gx, gy), open, time, cell);
        });
        if let Some(position) = snapshot.shield {
            self.add_shield_light(position, time, cell);
        }
        for boss in snapshot.bosses.iter().filter(|b| b.enraged) {
            self.add_boss_enrage_light(boss.position, time, cell);
        }
        for power_up in snapshot.power_ups {
            self.add_power_up_light(power_up.position, power_up.kind, time, cell);
        }
        if torch_chance(snapshot.world) > 0.0 {
            grid.for_each_with(CellFlags::WALL, |gx, gy, _| {
                if has_torch(snapshot.world, gx as i32, gy as i32) {
                    self.add_torch_light(grid.cell_center(gx, gy), time, cell);
                }
            });
        }
        for emitter in emitters {
            emitter.emit_lights(self, time);
        }
    }
}
