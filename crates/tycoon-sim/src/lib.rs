//! Simulation engine for the tycoon game.
//!
//! Owns the hecs ECS world of buildings and employees, advances the economy
//! on wall-clock ticks, resolves combat, drives AI rivals, and produces
//! `GameView`s and `SaveSnapshot`s for the host.

pub mod actions;
pub mod combat;
pub mod config;
pub mod engine;
pub mod placement;
pub mod systems;
pub mod world_setup;

pub use config::SimConfig;
pub use engine::{SimulationEngine, TickReport};
pub use tycoon_core as core;

#[cfg(test)]
mod tests;
