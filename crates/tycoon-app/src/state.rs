//! Shared state between the input thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use tycoon_core::commands::PlayerCommand;
use tycoon_core::state::GameView;

/// Messages sent to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Write the current snapshot to the save slot now.
    Save,
    /// Save, then stop the game loop thread.
    Shutdown,
}

/// Handle held by the input side.
///
/// `Sender` is `Send` but not `Sync`, so it is wrapped in a `Mutex` to let
/// the handle be shared across threads.
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest view, replaced by the game loop after every iteration.
    pub latest_view: Arc<Mutex<Option<GameView>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_view: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a message. Returns false when the loop is not running.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        match self.command_tx.lock() {
            Ok(tx) => tx.as_ref().is_some_and(|tx| tx.send(command).is_ok()),
            Err(_) => false,
        }
    }

    /// Copy of the latest view, if the loop has produced one.
    pub fn view(&self) -> Option<GameView> {
        self.latest_view.lock().ok().and_then(|view| view.clone())
    }
}
