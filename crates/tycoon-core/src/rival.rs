//! AI rival company data.

use serde::{Deserialize, Serialize};

use crate::enums::RivalAction;

/// Personality weights, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub aggression: f64,
    pub expansion: f64,
    pub research: f64,
    pub efficiency: f64,
}

/// A competing company that acts once per rival tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rival {
    pub id: String,
    pub name: String,
    pub personality: Personality,
    /// Never negative.
    pub gold: f64,
    pub energy: f64,
    pub building_count: u32,
    pub tech_level: u32,
    /// Clamped to `[0, 0.4]`.
    pub market_share: f64,
    pub energy_price: f64,
    /// Clamped to `[0, 100]`.
    pub reputation: f64,
    pub last_action: Option<RivalAction>,
}

impl Rival {
    /// Status line for the most recent action.
    pub fn status(&self) -> String {
        match self.last_action {
            Some(action) => action.describe(&self.name),
            None => format!("{} is getting started", self.name),
        }
    }

    pub fn is_finite(&self) -> bool {
        [
            self.gold,
            self.energy,
            self.market_share,
            self.energy_price,
            self.reputation,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
