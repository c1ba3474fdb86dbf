//! Print particle and light counts over time

use super::{frame_count, load_config};
use crate::arena::Arena;
use anyhow::{Context, Result};
use glint_decals::DecalPainter;
use glint_render::RecordingCanvas;
use glint_runtime::{FrameClock, FramePipeline};
use std::path::PathBuf;

pub struct SimulateArgs {
    pub config: Option<PathBuf>,
    pub world: Option<i32>,
    pub seconds: f32,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(world) = args.world {
        config.world = world;
    }
    config.validate().context("Invalid simulation settings")?;

    let mut arena = Arena::new(&config);
    let mut pipeline = FramePipeline::from_config(&config);
    let mut clock = FrameClock::with_fps(config.fps);
    let mut painter = DecalPainter::new();
    let mut canvas = RecordingCanvas::new();

    let frames = frame_count(args.seconds, config.fps);
    let per_second = frame_count(1.0, config.fps);

    println!(
        "{} ({}x{} @ {} fps)",
        arena.world().map_or("unknown world", |w| w.name()),
        config.width,
        config.height,
        config.fps
    );
    println!(
        "{:>8} {:>8} {:>8} {:>7} {:>8} {:>11}",
        "time", "ambient", "weather", "lights", "dropped", "draw calls"
    );

    for frame in 1..=frames {
        let dt = clock.step();
        let time = clock.total_time;
        arena.update(time);
        canvas.clear();

        let snapshot = arena.snapshot();
        let stats = pipeline.frame(dt, &snapshot, &mut canvas, |canvas| {
            arena.draw(canvas, &mut painter, time)
        });

        if frame % per_second == 0 || frame == frames {
            println!(
                "{:>7.2}s {:>8} {:>8} {:>7} {:>8} {:>11}",
                stats.time,
                stats.ambient_particles,
                stats.weather_particles,
                stats.lights,
                stats.dropped_lights,
                canvas.len()
            );
        }
    }

    Ok(())
}
