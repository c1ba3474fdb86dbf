//! Decal contact sheet command

use super::load_config;
use anyhow::{bail, Context, Result};
use glint_core::{Rect, World};
use glint_decals::{decal_for_world, DecalCell, DecalFn, DecalPainter, ALL_DECALS};
use glint_render::{backdrop, Canvas, ImageCanvas, Paint};
use std::path::PathBuf;

/// Decal blocks per sheet row
const BLOCKS_PER_ROW: usize = 4;

pub struct DecalArgs {
    pub config: Option<PathBuf>,
    pub world: Option<i32>,
    pub all: bool,
    pub tiles: u32,
    pub output: PathBuf,
}

/// Pixel layout of a sheet: square blocks of `tiles` x `tiles` cells,
/// separated by half a cell
#[derive(Debug, Clone, Copy, PartialEq)]
struct SheetLayout {
    cell_size: f32,
    tiles: u32,
    columns: usize,
    rows: usize,
}

impl SheetLayout {
    fn new(blocks: usize, tiles: u32, cell_size: f32) -> Self {
        let columns = blocks.clamp(1, BLOCKS_PER_ROW);
        Self {
            cell_size,
            tiles,
            columns,
            rows: blocks.div_ceil(columns).max(1),
        }
    }

    fn gap(&self) -> f32 {
        self.cell_size * 0.5
    }

    fn block_size(&self) -> f32 {
        self.tiles as f32 * self.cell_size
    }

    fn image_size(&self) -> (u32, u32) {
        let span = |n: usize| n as f32 * (self.block_size() + self.gap()) + self.gap();
        (span(self.columns).ceil() as u32, span(self.rows).ceil() as u32)
    }

    /// Top-left corner of block `index`
    fn block_origin(&self, index: usize) -> (f32, f32) {
        let stride = self.block_size() + self.gap();
        let col = index % self.columns;
        let row = index / self.columns;
        (
            self.gap() + col as f32 * stride,
            self.gap() + row as f32 * stride,
        )
    }
}

pub fn run(args: DecalArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(world) = args.world {
        config.world = world;
    }
    if args.tiles == 0 {
        bail!("--tiles must be at least 1");
    }

    let world = World::from_index(config.world);
    let decals: Vec<(&str, DecalFn)> = if args.all {
        ALL_DECALS.to_vec()
    } else {
        match world {
            Some(world) => vec![(world.name(), decal_for_world(world))],
            None => bail!("World {} has no decals; pass --all or a world in 0-9", config.world),
        }
    };

    let layout = SheetLayout::new(decals.len(), args.tiles, config.cell_size);
    let (width, height) = layout.image_size();
    let mut canvas = ImageCanvas::new(width, height);
    let mut painter = DecalPainter::new();

    let (top, bottom) = backdrop::backdrop_colors(world);
    canvas.fill(bottom.scale_rgb(0.5));
    let floor = top.lerp(bottom, 0.5).scale_rgb(1.4);
    let mut paint = Paint::default();
    paint.fill(top.lerp(bottom, 0.5));

    for (index, (name, decal)) in decals.iter().enumerate() {
        let (x0, y0) = layout.block_origin(index);
        for gy in 0..args.tiles as i32 {
            for gx in 0..args.tiles as i32 {
                let rect = Rect::new(
                    x0 + gx as f32 * config.cell_size,
                    y0 + gy as f32 * config.cell_size,
                    config.cell_size,
                    config.cell_size,
                );
                canvas.draw_rect(rect, &paint);
                painter.paint_with(&mut canvas, *decal, &DecalCell::new(rect, gx, gy, floor));
            }
        }
        log::debug!("decal block {} at ({}, {})", name, x0, y0);
    }

    canvas
        .save(&args.output)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;

    let names: Vec<&str> = decals.iter().map(|(name, _)| *name).collect();
    println!("Wrote {} ({}x{}): {}", args.output.display(), width, height, names.join(", "));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_sheet() {
        let layout = SheetLayout::new(1, 4, 32.0);
        assert_eq!((layout.columns, layout.rows), (1, 1));
        assert_eq!(layout.image_size(), (160, 160));
        assert_eq!(layout.block_origin(0), (16.0, 16.0));
    }

    #[test]
    fn blocks_wrap_after_a_full_row() {
        let layout = SheetLayout::new(ALL_DECALS.len(), 2, 10.0);
        assert_eq!((layout.columns, layout.rows), (4, 3));
        assert_eq!(layout.block_origin(4), (5.0, 30.0));
        assert_eq!(layout.image_size(), (105, 80));
    }
}
