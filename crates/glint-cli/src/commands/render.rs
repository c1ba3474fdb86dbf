//! Headless world-to-PNG render command

use super::{frame_count, load_config};
use crate::arena::Arena;
use anyhow::{Context, Result};
use glint_decals::DecalPainter;
use glint_render::ImageCanvas;
use glint_runtime::{FrameClock, FramePipeline};
use std::path::PathBuf;

pub struct RenderArgs {
    pub config: Option<PathBuf>,
    pub world: Option<i32>,
    pub seconds: f32,
    pub output: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(world) = args.world {
        config.world = world;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    config.validate().context("Invalid render settings")?;

    let mut arena = Arena::new(&config);
    let mut pipeline = FramePipeline::from_config(&config);
    let mut clock = FrameClock::with_fps(config.fps);

    // Warm the particle layers; only the last frame is drawn
    let frames = frame_count(args.seconds, config.fps);
    for _ in 1..frames {
        pipeline.simulate(clock.step());
    }
    let dt = clock.step();
    let time = clock.total_time;
    arena.update(time);

    let mut canvas = ImageCanvas::new(config.width, config.height);
    let mut painter = DecalPainter::new();
    let snapshot = arena.snapshot();
    let stats = pipeline.frame(dt, &snapshot, &mut canvas, |canvas| {
        arena.draw(canvas, &mut painter, time)
    });

    canvas
        .save(&args.output)
        .with_context(|| format!("Failed to write '{}'", args.output.display()))?;

    let world = arena.world().map_or("unknown world", |w| w.name());
    println!(
        "Rendered {} at t={:.2}s ({}x{}, {} frames)",
        world, stats.time, config.width, config.height, frames
    );
    println!(
        "  ambient: {}  weather: {}  lights: {} ({} dropped, {:?})",
        stats.ambient_particles,
        stats.weather_particles,
        stats.lights,
        stats.dropped_lights,
        stats.backend
    );
    println!("  wrote {}", args.output.display());

    Ok(())
}
