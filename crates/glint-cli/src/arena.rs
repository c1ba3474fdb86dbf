//! Stand-in level used by the headless commands
//!
//! A bordered grid with pillars, some world terrain (lava, ice), an open exit
//! and a couple of ticking bombs, so every lighting source has something to
//! respond to.

use glint_core::{noise, Color, FxConfig, Rect, Vec2, World};
use glint_decals::{DecalCell, DecalPainter};
use glint_lighting::{BombSnapshot, CellFlags, FrameSnapshot, GridSnapshot};
use glint_render::{backdrop, Canvas, Paint};

const TERRAIN_SALT: i32 = 9_101;
const TERRAIN_CHANCE: f32 = 0.08;
/// Seconds from placement to detonation; bombs are re-armed each cycle
const FUSE_TIME: f32 = 3.0;

pub struct Arena {
    world_index: i32,
    world: Option<World>,
    bounds: Rect,
    cell_size: f32,
    columns: usize,
    rows: usize,
    cells: Vec<CellFlags>,
    bombs: Vec<BombSnapshot>,
    decals: bool,
}

impl Arena {
    pub fn new(config: &FxConfig) -> Self {
        let world = World::from_index(config.world);
        let columns = (config.width as f32 / config.cell_size) as usize;
        let rows = (config.height as f32 / config.cell_size) as usize;

        let terrain = match world {
            Some(World::Volcano) => CellFlags::LAVA,
            Some(World::Glacier) => CellFlags::ICE,
            _ => CellFlags::empty(),
        };

        let mut cells = Vec::with_capacity(columns * rows);
        for gy in 0..rows {
            for gx in 0..columns {
                let border = gx == 0 || gy == 0 || gx + 1 == columns || gy + 1 == rows;
                let pillar = gx % 2 == 0 && gy % 2 == 0;
                let flags = if border || pillar {
                    CellFlags::WALL
                } else if noise::cell_random(gx as i32, gy as i32, TERRAIN_SALT) < TERRAIN_CHANCE {
                    terrain
                } else {
                    CellFlags::empty()
                };
                cells.push(flags);
            }
        }

        let mut bombs = Vec::new();
        if columns >= 3 && rows >= 3 {
            let exit = (rows - 2) * columns + (columns - 2);
            cells[exit] = CellFlags::EXIT | CellFlags::EXIT_OPEN;

            let center = |gx: usize, gy: usize| {
                Vec2::new(gx as f32 + 0.5, gy as f32 + 0.5) * config.cell_size
            };
            bombs.push(BombSnapshot {
                position: center(1, 1),
                fuse_ratio: 1.0,
            });
            bombs.push(BombSnapshot {
                position: center(columns - 2, 1),
                fuse_ratio: 1.0,
            });
        }

        log::debug!(
            "arena {}x{} cells for {}",
            columns,
            rows,
            world.map_or("unknown world", World::name)
        );

        Self {
            world_index: config.world,
            world,
            bounds: config.bounds(),
            cell_size: config.cell_size,
            columns,
            rows,
            cells,
            bombs,
            decals: config.decals,
        }
    }

    /// Burn the bomb fuses down to `time`, staggered by half a cycle
    pub fn update(&mut self, time: f32) {
        for (i, bomb) in self.bombs.iter_mut().enumerate() {
            let cycle = (time / FUSE_TIME + i as f32 * 0.5).fract();
            bomb.fuse_ratio = 1.0 - cycle;
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            grid: GridSnapshot {
                origin: Vec2::ZERO,
                cell_size: self.cell_size,
                columns: self.columns,
                rows: self.rows,
                cells: &self.cells,
            },
            bombs: &self.bombs,
            ..FrameSnapshot::empty(self.world, self.cell_size)
        }
    }

    /// Backdrop gradient, terrain tiles and floor decals
    pub fn draw(&self, canvas: &mut dyn Canvas, painter: &mut DecalPainter, time: f32) {
        backdrop::fill_world_backdrop(canvas, self.world, self.bounds);

        let (top, bottom) = backdrop::backdrop_colors(self.world);
        let wall = top.lerp(bottom, 0.5).scale_rgb(0.6);
        let floor = top.lerp(bottom, 0.5).scale_rgb(1.4);
        let mut paint = Paint::default();

        for gy in 0..self.rows {
            for gx in 0..self.columns {
                let flags = self.cells[gy * self.columns + gx];
                let rect = Rect::new(
                    gx as f32 * self.cell_size,
                    gy as f32 * self.cell_size,
                    self.cell_size,
                    self.cell_size,
                );

                if flags.contains(CellFlags::WALL) {
                    paint.fill(wall);
                    canvas.draw_rect(rect, &paint);
                } else if flags.contains(CellFlags::LAVA) {
                    paint.fill(Color::from_hex(0xD9480F));
                    canvas.draw_rect(rect, &paint);
                } else if flags.contains(CellFlags::ICE) {
                    paint.fill(Color::from_hex(0xCFEAF7).with_alpha(0.7));
                    canvas.draw_rect(rect, &paint);
                } else if flags.contains(CellFlags::EXIT) {
                    paint.stroke(Color::from_hex(0xF2C94C), 2.0);
                    canvas.draw_rect(rect.expand(-3.0), &paint);
                } else if self.decals {
                    let cell = DecalCell::new(rect, gx as i32, gy as i32, floor).at_time(time);
                    painter.paint_cell(canvas, self.world_index, &cell);
                }
            }
        }
    }

    pub fn world(&self) -> Option<World> {
        self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_render::{DrawCall, RecordingCanvas};

    fn config(world: i32) -> FxConfig {
        FxConfig {
            world,
            width: 320,
            height: 224,
            cell_size: 32.0,
            ..FxConfig::default()
        }
    }

    #[test]
    fn grid_is_bordered_with_an_open_exit() {
        let arena = Arena::new(&config(0));
        let snapshot = arena.snapshot();
        let grid = snapshot.grid;
        assert_eq!((grid.columns, grid.rows), (10, 7));
        for gx in 0..grid.columns {
            assert!(grid.flags(gx, 0).contains(CellFlags::WALL));
            assert!(grid.flags(gx, grid.rows - 1).contains(CellFlags::WALL));
        }
        assert!(grid.flags(8, 5).contains(CellFlags::EXIT | CellFlags::EXIT_OPEN));
        assert_eq!(snapshot.bombs.len(), 2);
        assert_eq!(snapshot.world, Some(World::Meadow));
    }

    #[test]
    fn terrain_follows_the_world() {
        let lava = |world: i32| {
            let arena = Arena::new(&FxConfig {
                width: 960,
                height: 640,
                ..config(world)
            });
            arena.cells.iter().filter(|c| c.contains(CellFlags::LAVA)).count()
        };
        assert!(lava(World::Volcano.index() as i32) > 0);
        assert_eq!(lava(World::Meadow.index() as i32), 0);
    }

    #[test]
    fn fuses_cycle_and_stay_in_range() {
        let mut arena = Arena::new(&config(5));
        for step in 0..400 {
            arena.update(step as f32 * 0.05);
            for bomb in &arena.bombs {
                assert!((0.0..=1.0).contains(&bomb.fuse_ratio));
            }
        }
        arena.update(0.0);
        assert_eq!(arena.bombs[0].fuse_ratio, 1.0);
        assert!((arena.bombs[1].fuse_ratio - 0.5).abs() < 1e-6);
    }

    #[test]
    fn unknown_world_skips_decals() {
        let arena = Arena::new(&config(42));
        assert_eq!(arena.world(), None);
        let mut canvas = RecordingCanvas::new();
        arena.draw(&mut canvas, &mut DecalPainter::new(), 0.0);
        assert!(canvas
            .calls()
            .iter()
            .all(|c| matches!(c, DrawCall::Rect { .. })));
    }

    #[test]
    fn tiny_field_has_no_grid() {
        let arena = Arena::new(&FxConfig {
            width: 16,
            height: 16,
            ..config(0)
        });
        assert_eq!(arena.snapshot().grid.columns, 0);
        assert!(arena.bombs.is_empty());
    }
}
