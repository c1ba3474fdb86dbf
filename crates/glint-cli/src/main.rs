//! Glint CLI - headless front end for the Glint effects core

mod arena;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{decals, render, simulate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Render and inspect per-world 2D effects without a game host", long_about = None)]
#[command(version)]
struct Cli {
    /// Effects configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a world for a while and write the final frame to a PNG
    Render {
        /// World index (0-9); overrides the config
        #[arg(long)]
        world: Option<i32>,

        /// Seconds of effect time to simulate before the captured frame
        #[arg(long, default_value = "3.0")]
        seconds: f32,

        /// Output image path
        #[arg(short, long, default_value = "glint.png")]
        output: PathBuf,

        /// Image width in pixels; overrides the config
        #[arg(long)]
        width: Option<u32>,

        /// Image height in pixels; overrides the config
        #[arg(long)]
        height: Option<u32>,
    },

    /// Print per-second particle and light counts for a world
    Simulate {
        /// World index (0-9); overrides the config
        #[arg(long)]
        world: Option<i32>,

        /// Seconds of effect time to simulate
        #[arg(long, default_value = "10.0")]
        seconds: f32,
    },

    /// Write a contact sheet of decal tiles to a PNG
    Decals {
        /// World index (0-9); overrides the config
        #[arg(long)]
        world: Option<i32>,

        /// Show every decal routine instead of the world's own
        #[arg(long)]
        all: bool,

        /// Tiles per row and column for each decal
        #[arg(long, default_value = "6")]
        tiles: u32,

        /// Output image path
        #[arg(short, long, default_value = "decals.png")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            world,
            seconds,
            output,
            width,
            height,
        } => render::run(render::RenderArgs {
            config: cli.config,
            world,
            seconds,
            output,
            width,
            height,
        }),
        Commands::Simulate { world, seconds } => simulate::run(simulate::SimulateArgs {
            config: cli.config,
            world,
            seconds,
        }),
        Commands::Decals {
            world,
            all,
            tiles,
            output,
        } => decals::run(decals::DecalArgs {
            config: cli.config,
            world,
            all,
            tiles,
            output,
        }),
    }
}
