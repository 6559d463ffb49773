//! Systems that advance the simulation each tick.
//!
//! Systems are pure functions over the ECS world or plain data.
//! They do not own state.

pub mod achievements;
pub mod daynight;
pub mod production;
pub mod research;
pub mod rivals;
pub mod snapshot;
pub mod timed_events;
