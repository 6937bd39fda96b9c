mod demo;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glam::IVec2;
use tessera_kernel::{World, WorldConfig};
use tessera_render::{DebugTextRenderer, Renderer};
use tessera_tools::WorldInspector;
use tracing_subscriber::EnvFilter;

use crate::demo::{Mover, SplitMix64};

#[derive(Parser)]
#[command(name = "tessera-cli", about = "CLI tool for tessera worlds")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Run a headless simulation of moving boxes
    Simulate {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// Number of boxes to spawn
        #[arg(short, long, default_value = "32")]
        entities: usize,
        /// RNG seed for box placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// JSON world configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Commands::Info => {
            println!("tessera-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", tessera_common::crate_info());
            println!("spatial: {}", tessera_spatial::crate_info());
            println!("kernel: {}", tessera_kernel::crate_info());
            println!("render: {}", tessera_render::crate_info());
            println!("tools: {}", tessera_tools::crate_info());
        }
        Commands::Simulate {
            ticks,
            entities,
            seed,
            config,
        } => {
            let config = match config {
                Some(path) => WorldConfig::load(&path)?,
                None => WorldConfig::default(),
            };
            simulate(&config, ticks, entities, seed);
        }
    }

    Ok(())
}

fn simulate(config: &WorldConfig, ticks: u64, entities: usize, seed: u64) {
    println!(
        "Simulating {entities} boxes in {}x{} for {ticks} ticks (seed={seed})",
        config.world_size.x, config.world_size.y
    );

    let mut world = World::from_config(config);
    let mut rng = SplitMix64::new(seed);
    for _ in 0..entities {
        world.create_object(Mover::random(&mut rng, config.world_size));
    }
    let camera = world.create_camera(IVec2::ZERO, config.world_size);

    let mut total_pairs = 0;
    for _ in 0..ticks {
        let report = world.tick_with(config.tick_millis, |w, pairs| w.dispatch_collisions(pairs));
        total_pairs += report.collisions.len();
        tracing::info!(
            tick = report.tick,
            pairs = report.collisions.len(),
            admitted = report.admitted,
            evicted = report.evicted,
            "tick"
        );
        for (a, b) in &report.collisions {
            tracing::debug!(%a, %b, "collision");
        }
    }

    let hits: u32 = world
        .objects()
        .ids()
        .filter_map(|id| world.get_as::<Mover>(id))
        .map(Mover::hits)
        .sum();
    println!("Pairs reported: {total_pairs}, hits delivered to survivors: {hits}");
    println!("{}", WorldInspector::summary(&world));
    if let Some(camera) = world.camera(camera) {
        print!("{}", DebugTextRenderer::new().render(&world, camera));
    }
}
