/*******************************************************************************************
*
*   rebound - headless runner
*
*   Runs a built-in scenario for a number of ticks without a window, logging what happens,
*   and optionally saves the final scene.
*
*   Copyright (c) 2025 rebound contributors
*
********************************************************************************************/

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use rebound::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "rebound", version, about = "Run a rebound scenario headless")]
struct Opts {
    /// Scenario to start from: ships, collide or blocks
    #[arg(default_value = "ships")]
    scenario: String,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Simulated milliseconds per tick
    #[arg(long, default_value_t = rebound::DEFAULT_MS_PER_STEP)]
    ms_per_step: u32,

    /// Force gravity on, whatever the scenario prefers
    #[arg(long)]
    gravity: bool,

    /// Write the final scene here as JSON Lines
    #[arg(long)]
    save: Option<PathBuf>,

    /// Load this scene instead of the scenario
    #[arg(long)]
    load: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    let scenario: Scenario = opts.scenario.parse()?;

    let config = SimulationConfig::default()
        .with_gravity(opts.gravity || scenario.wants_gravity())
        .with_ms_per_step(opts.ms_per_step);
    let sim = Simulation::new(World::<{ rebound::DEFAULT_MAX_OBJECTS }>::default(), config);

    let start = match &opts.load {
        Some(path) => Command::Load(path.clone()),
        None => Command::Reset(scenario),
    };
    sim.execute(start.clone()).with_context(|| format!("could not {start}"))?;

    let mut collisions = 0;
    let mut bounces = 0;
    for tick in 0..opts.ticks {
        let report = sim.run_tick(None);
        debug!("tick {tick}: {} passes, {} events", report.passes, report.events.len());

        collisions += report.collisions();
        bounces += report.events.iter()
            .filter(|event| matches!(event, WorldEvent::BoundaryBounce { .. }))
            .count();

        if report.is_game_over() {
            info!("game over after {} ticks", tick + 1);
            break;
        }
    }

    info!("{collisions} collisions and {bounces} wall bounces");
    sim.borrowed(|world, _| {
        for body in world.iter() {
            info!("{body}");
        }
    });

    if let Some(path) = opts.save {
        sim.execute(Command::Save(path.clone()))
            .with_context(|| format!("could not save to {}", path.display()))?;
    }

    Ok(())
}
