//! AI rivals for the tycoon simulation.
//!
//! Each rival re-scores a fixed action set every rival tick and applies the
//! winner. Scoring and application are pure functions over plain data.

pub mod error;
pub mod profiles;
pub mod utility;

pub use tycoon_core as core;

pub use error::RivalError;
pub use profiles::default_rivals;
pub use utility::{choose_action, score_actions, tick_rival, MarketSignal};
