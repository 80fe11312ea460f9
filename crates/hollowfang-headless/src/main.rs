use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use hollowfang_core::constants::DT;
use hollowfang_core::events::GameEvent;
use hollowfang_sim::SimConfig;

mod encounter;
mod logging;

use encounter::Encounter;

/// Run the HOLLOWFANG simulation without a renderer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Number of spiders to spawn around the player
    #[arg(short, long, default_value_t = 4)]
    enemies: usize,

    /// RNG seed; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file with tuning overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    info!("Seed {}, {} frames, {} spiders", config.seed, args.frames, args.enemies);

    let mut encounter = Encounter::new(config, args.enemies)?;
    for frame in 0..args.frames {
        let snapshot = encounter.step(DT)?;
        let player_died = snapshot
            .events
            .iter()
            .any(|event| matches!(event, GameEvent::PlayerDied { .. }));
        if player_died {
            info!("Player fell on frame {frame}");
            break;
        }
    }

    let engine = encounter.engine();
    let snapshot = serde_json::to_string_pretty(encounter.last())
        .context("serializing final snapshot")?;
    println!("{snapshot}");
    info!("Finished at t={:.2}s", engine.time().elapsed_secs);
    Ok(())
}
