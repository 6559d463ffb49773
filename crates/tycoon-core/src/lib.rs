//! Core types and definitions for the tycoon simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! identifiers, commands, snapshots, notifications, constants, and the
//! static catalog of buildings, technologies, events, and achievements.
//! It has no dependency on any runtime or host framework.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod rival;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
