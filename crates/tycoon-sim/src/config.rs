//! Engine configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

use tycoon_core::constants::*;

/// Configuration for a simulation instance. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Ticks closer together than this are ignored without losing time.
    pub min_tick_secs: f64,
    /// Wall-clock seconds per full day/night cycle.
    pub day_length_secs: f64,
    pub min_spacing: f64,
    /// Edge length of the square indexed by the quadtree.
    pub map_size: f64,
    /// Half-width of the buildable square.
    pub placement_bounds: f64,
    pub autosave_interval_secs: f64,
    pub quadtree_capacity: usize,
    pub quadtree_max_depth: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            min_tick_secs: MIN_TICK_SECS,
            day_length_secs: DAY_LENGTH_SECS,
            min_spacing: MIN_SPACING,
            map_size: MAP_SIZE,
            placement_bounds: PLACEMENT_BOUNDS,
            autosave_interval_secs: AUTOSAVE_INTERVAL_SECS,
            quadtree_capacity: QUADTREE_CAPACITY,
            quadtree_max_depth: QUADTREE_MAX_DEPTH,
        }
    }
}

impl SimConfig {
    /// Pull out-of-range values back to something the engine can honor.
    ///
    /// The buildable square never extends past the indexed map, so every
    /// placed building is visible to the spacing check.
    pub fn sanitized(mut self) -> Self {
        if !(self.map_size.is_finite() && self.map_size > 0.0) {
            warn!(target: "sim.config", map_size = self.map_size, "invalid map size, using default");
            self.map_size = MAP_SIZE;
        }
        let half = self.map_size / 2.0;
        if !(self.placement_bounds.is_finite() && self.placement_bounds <= half) {
            warn!(
                target: "sim.config",
                placement_bounds = self.placement_bounds,
                limit = half,
                "placement bounds exceed the map, clamping"
            );
            self.placement_bounds = half;
        }
        self.placement_bounds = self.placement_bounds.max(0.0);
        if !(self.min_spacing.is_finite() && self.min_spacing >= 0.0) {
            self.min_spacing = 0.0;
        }
        if !self.min_tick_secs.is_finite() || self.min_tick_secs < 0.0 {
            self.min_tick_secs = MIN_TICK_SECS;
        }
        self
    }
}
