//! Headless tycoon runner.
//!
//! Reads one JSON `PlayerCommand` per line from stdin, e.g.
//! `{"type":"PlaceBuilding","kind":"solar_panel","position":{"x":10,"y":0,"z":10}}`.
//! Lines starting with `:` are host commands: `:view`, `:save`, `:saves`, `:quit`.
//! On EOF the game is saved and the loop shuts down.

use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing::{error, info, warn};

use tycoon_app::config::AppConfig;
use tycoon_app::game_loop::{spawn_game_loop, LoopSettings};
use tycoon_app::persistence;
use tycoon_app::state::{AppState, GameLoopCommand};
use tycoon_core::commands::PlayerCommand;
use tycoon_sim::SimulationEngine;

/// Headless tycoon simulation driven by JSON commands on stdin
#[derive(Parser, Debug)]
#[command(name = "tycoon")]
#[command(about = "Run the tycoon simulation headless, driven by JSON commands on stdin")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Game loop interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Directory holding save slots
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Save slot to load from and autosave into
    #[arg(long)]
    slot: Option<String>,

    /// Fire a random event every N seconds
    #[arg(long)]
    event_interval: Option<f64>,

    /// Start a new game even when the slot has a save
    #[arg(long)]
    new_game: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "tycoon failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<AppConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.sim.seed = seed;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.tick_ms = tick_ms;
    }
    if let Some(dir) = &args.save_dir {
        config.save_dir = dir.clone();
    }
    if let Some(slot) = &args.slot {
        config.slot = slot.clone();
    }
    if args.event_interval.is_some() {
        config.event_interval_secs = args.event_interval;
    }
    Ok(config)
}

fn prepare_engine(config: &AppConfig, new_game: bool) -> Result<SimulationEngine, Box<dyn Error>> {
    let mut engine = SimulationEngine::new(config.sim.clone());
    if !new_game && persistence::save_exists(&config.save_dir, &config.slot) {
        match persistence::load_from_file(&config.save_dir, &config.slot) {
            Ok(data) => {
                engine.restore(data.snapshot);
                info!(slot = %config.slot, "resumed saved game");
                return Ok(engine);
            }
            Err(err) => warn!(slot = %config.slot, error = %err, "save unreadable, starting fresh"),
        }
    }
    engine.start_game()?;
    Ok(engine)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args)?;
    let engine = prepare_engine(&config, args.new_game)?;

    let latest_view = Arc::new(Mutex::new(None));
    let (tx, handle) = spawn_game_loop(
        engine,
        LoopSettings::from_config(&config),
        latest_view.clone(),
    )?;
    let state = AppState {
        command_tx: Mutex::new(Some(tx)),
        latest_view,
    };

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        match line {
            "" => continue,
            ":quit" => break,
            ":save" => {
                state.send(GameLoopCommand::Save);
            }
            ":view" => {
                if let Some(view) = state.view() {
                    println!("{}", serde_json::to_string(&view)?);
                }
            }
            ":saves" => {
                let saves = persistence::list_saves(&config.save_dir);
                println!("{}", serde_json::to_string(&saves)?);
            }
            _ => match serde_json::from_str::<PlayerCommand>(line) {
                Ok(command) => {
                    if !state.send(GameLoopCommand::Player(command)) {
                        warn!(target: "app.input", "game loop is gone");
                        break;
                    }
                }
                Err(err) => warn!(target: "app.input", error = %err, "unrecognized input line"),
            },
        }
    }

    state.send(GameLoopCommand::Shutdown);
    handle.join().map_err(|_| "game loop thread panicked")?;
    if let Some(view) = state.view() {
        println!("{}", serde_json::to_string(&view)?);
    }
    Ok(())
}
