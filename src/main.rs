//! Cubemaze - headless runner
//!
//! Loads a [`GameConfig`], then lets the autopilot play a number of rounds against the
//! monster with logging collaborators standing in for the renderer. Every scene and HUD
//! call is visible with `RUST_LOG=debug`; per-frame transforms with `RUST_LOG=trace`.
//!
//! # Usage
//! ```text
//! cubemaze --seed 42 --dimension 15 --rounds 3
//! cubemaze --config game.json
//! ```

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use cubemaze::app::{App, AppOptions, LogHud, LogScene, RoundEnd};
use cubemaze::benchmarks;
use cubemaze::config::GameConfig;
use cubemaze::game::Game;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Command line options.
#[derive(Parser, Debug)]
#[command(name = "cubemaze", version, about = "Headless 3D maze-chase runner")]
struct Args {
    /// JSON file overriding any part of the default configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for maze generation and spawn placement
    #[arg(long)]
    seed: Option<u64>,

    /// Maze side length in cells (bumped to the next odd number, minimum 3)
    #[arg(long)]
    dimension: Option<usize>,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Frames per game before giving up
    #[arg(long, default_value_t = 7200)]
    max_frames: u32,
}

/// Defaults, then the config file, then command line overrides.
fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::new(),
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(dimension) = args.dimension {
        config.maze.dimension = dimension;
    }
    config
        .validated()
        .context("invalid configuration after command line overrides")
}

fn main() -> Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    log::info!(
        "Starting cubemaze: {}x{} maze, seed {:?}, {} round(s)",
        config.maze.dimension,
        config.maze.dimension,
        config.seed,
        args.rounds
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        log::info!("Interrupted, finishing the current frame");
        flag.store(true, Ordering::Relaxed);
    })
    .context("failed to install Ctrl-C handler")?;

    let options = AppOptions {
        rounds: args.rounds,
        max_frames: args.max_frames,
        ..AppOptions::default()
    };
    let game = Game::new(config, LogScene::new(), LogHud::new());
    let mut app = App::new(game, options, shutdown);
    let reports = app.run();

    let won = reports.iter().filter(|r| r.end == RoundEnd::Won).count();
    let lost = reports.iter().filter(|r| r.end == RoundEnd::Lost).count();
    log::info!(
        "Played {} round(s): {} won, {} lost, {} unfinished",
        reports.len(),
        won,
        lost,
        reports.len() - won - lost
    );
    let leaked = app.game().scene().live_entities();
    if leaked > 0 {
        log::warn!("{} entities still alive at exit", leaked);
    }

    benchmarks::log_summary();
    Ok(())
}
