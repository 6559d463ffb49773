//! Game loop thread: ticks the simulation engine on a fixed interval.
//!
//! The engine is moved into this thread and owned there exclusively.
//! Commands arrive via an `mpsc` channel and are applied between ticks, so
//! no caller ever observes a half-applied command. The latest view is
//! stored in shared state for polling.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use tycoon_core::enums::GamePhase;
use tycoon_core::state::GameView;
use tycoon_sim::SimulationEngine;

use crate::config::AppConfig;
use crate::persistence::{self, SaveData};
use crate::state::GameLoopCommand;

/// Loop timing and save destination.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSettings {
    pub tick: Duration,
    pub save_dir: PathBuf,
    pub slot: String,
    pub event_interval: Option<Duration>,
}

impl LoopSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            tick: Duration::from_millis(config.tick_ms.max(1)),
            save_dir: config.save_dir.clone(),
            slot: config.slot.clone(),
            event_interval: config
                .event_interval_secs
                .filter(|secs| secs.is_finite() && *secs > 0.0)
                .map(Duration::from_secs_f64),
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle. The thread exits after
/// a `Shutdown` message or when every sender is dropped.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    settings: LoopSettings,
    latest_view: Arc<Mutex<Option<GameView>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("tycoon-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, &settings, cmd_rx, &latest_view);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    settings: &LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_view: &Mutex<Option<GameView>>,
) {
    let started = Instant::now();
    let mut next_tick_time = started;
    let mut next_event = settings.event_interval.map(|interval| started + interval);
    info!(target: "app.loop", tick_ms = settings.tick.as_millis() as u64, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(command)) => {
                    let _ = engine.execute(command);
                }
                Ok(GameLoopCommand::Save) => {
                    save_now(&engine, settings);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    save_now(&engine, settings);
                    publish(&mut engine, latest_view);
                    info!(target: "app.loop", "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Scheduled random events
        if let (Some(due), Some(interval)) = (next_event, settings.event_interval) {
            if Instant::now() >= due {
                if engine.phase() == GamePhase::Playing {
                    let _ = engine.trigger_random_event();
                }
                next_event = Some(due + interval);
            }
        }

        // 3. Advance the economy on the loop's monotonic clock
        let report = engine.tick(started.elapsed().as_secs_f64());
        if report.save_due {
            save_now(&engine, settings);
        }

        // 4. Surface notifications and store the latest view
        publish(&mut engine, latest_view);

        // 5. Sleep until the next tick
        next_tick_time += settings.tick;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > settings.tick * 2 {
            // Too far behind, reset rather than spin
            next_tick_time = now;
        }
    }
}

fn publish(engine: &mut SimulationEngine, latest_view: &Mutex<Option<GameView>>) {
    for notification in engine.drain_notifications() {
        info!(target: "app.notify", "{}", notification.message());
    }
    if let Ok(mut lock) = latest_view.lock() {
        *lock = Some(engine.view());
    }
}

/// Write the current snapshot. Failures are logged, never fatal.
fn save_now(engine: &SimulationEngine, settings: &LoopSettings) {
    if engine.phase() == GamePhase::Menu {
        debug!(target: "app.save", "nothing to save from the menu");
        return;
    }
    let data = SaveData::new(&settings.slot, engine.config().seed, engine.extract_snapshot());
    match persistence::save_to_file(&settings.save_dir, &settings.slot, &data) {
        Ok(()) => info!(target: "app.save", slot = %settings.slot, "game saved"),
        Err(err) => warn!(target: "app.save", slot = %settings.slot, error = %err, "save failed"),
    }
}
