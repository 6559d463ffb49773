//! Timed event bookkeeping: expiry and multiplier folding.

use std::collections::HashMap;

use tycoon_core::catalog::market::{MarketItemId, MARKET_ITEMS};
use tycoon_core::enums::BuildingKind;
use tycoon_core::state::{ActiveEvent, EventSource, MultiplierKey};

/// Drop events whose `ends_at` has passed. Returns how many were removed.
pub fn expire(events: &mut Vec<ActiveEvent>, now: f64) -> usize {
    let before = events.len();
    events.retain(|e| e.ends_at > now);
    before - events.len()
}

/// Product of every active multiplier, grouped by key.
#[derive(Debug, Clone, PartialEq)]
pub struct EventMultipliers {
    pub by_kind: HashMap<BuildingKind, f64>,
    pub employees: f64,
    /// The global multiplier.
    pub all: f64,
    pub gold: f64,
}

impl Default for EventMultipliers {
    fn default() -> Self {
        Self {
            by_kind: HashMap::new(),
            employees: 1.0,
            all: 1.0,
            gold: 1.0,
        }
    }
}

impl EventMultipliers {
    pub fn fold(events: &[ActiveEvent]) -> Self {
        let mut folded = Self::default();
        for m in events.iter().flat_map(|e| e.multipliers.iter()) {
            match m.key {
                MultiplierKey::Building(kind) => {
                    *folded.by_kind.entry(kind).or_insert(1.0) *= m.factor;
                }
                MultiplierKey::Employees => folded.employees *= m.factor,
                MultiplierKey::All => folded.all *= m.factor,
                MultiplierKey::Gold => folded.gold *= m.factor,
            }
        }
        folded
    }

    pub fn building(&self, kind: BuildingKind) -> f64 {
        self.by_kind.get(&kind).copied().unwrap_or(1.0)
    }
}

/// Whether a purchased buff of this kind is still running.
pub fn buff_active(events: &[ActiveEvent], item: MarketItemId) -> bool {
    events
        .iter()
        .any(|e| e.source == EventSource::Market(item))
}

/// Whether any running buff absorbs negative random events.
pub fn shield_active(events: &[ActiveEvent]) -> bool {
    MARKET_ITEMS
        .iter()
        .filter(|item| item.blocks_negative_events)
        .any(|item| buff_active(events, item.id))
}
