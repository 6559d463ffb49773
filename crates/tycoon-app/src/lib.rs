//! Headless host for the tycoon simulation.
//!
//! Runs the engine on a fixed-interval game loop thread, forwards commands
//! to it over a channel, and persists snapshots to save slots on disk.

pub mod config;
pub mod game_loop;
pub mod persistence;
pub mod state;

pub use tycoon_core as core;
