//! Random event catalog.
//!
//! Each event resolves to an [`EventDelta`] computed purely from the inputs
//! it is given. The engine applies the delta; nothing here mutates state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{BuildingKind, Sentiment};
use crate::state::{Multiplier, MultiplierKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomEventId {
    SolarFlare,
    GoldRush,
    Storm,
    Earthquake,
    TaxBreak,
    PowerOutage,
    Investor,
    MarketCrash,
    TechBreakthrough,
    EmployeeBonus,
}

impl RandomEventId {
    pub fn as_str(self) -> &'static str {
        match self {
            RandomEventId::SolarFlare => "solar_flare",
            RandomEventId::GoldRush => "gold_rush",
            RandomEventId::Storm => "storm",
            RandomEventId::Earthquake => "earthquake",
            RandomEventId::TaxBreak => "tax_break",
            RandomEventId::PowerOutage => "power_outage",
            RandomEventId::Investor => "investor",
            RandomEventId::MarketCrash => "market_crash",
            RandomEventId::TechBreakthrough => "tech_breakthrough",
            RandomEventId::EmployeeBonus => "employee_bonus",
        }
    }
}

impl fmt::Display for RandomEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an event does when it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventEffect {
    GrantGold(f64),
    ScaleGold(f64),
    DrainEnergy,
    /// One randomly chosen building loses a level, never dropping below 1.
    DowngradeRandomBuilding,
    /// Registers a timed multiplier.
    Boost(Multiplier),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomEventDef {
    pub id: RandomEventId,
    pub title: &'static str,
    pub icon: &'static str,
    pub sentiment: Sentiment,
    /// Present exactly for [`EventEffect::Boost`] events.
    pub duration_secs: Option<f64>,
    pub effect: EventEffect,
}

/// The slice of state an event reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventInputs {
    pub gold: f64,
    pub building_count: usize,
}

/// Partial state change produced by an event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EventDelta {
    pub gold: Option<f64>,
    pub energy: Option<f64>,
    /// Index into the id-ordered building list.
    pub downgrade: Option<usize>,
    pub boost: Option<(Multiplier, f64)>,
}

impl RandomEventDef {
    /// Compute the delta. `roll` in `[0, 1)` picks the building for downgrades.
    pub fn resolve(&self, inputs: &EventInputs, roll: f64) -> EventDelta {
        match self.effect {
            EventEffect::GrantGold(amount) => EventDelta {
                gold: Some(inputs.gold + amount),
                ..Default::default()
            },
            EventEffect::ScaleGold(factor) => EventDelta {
                gold: Some(inputs.gold * factor),
                ..Default::default()
            },
            EventEffect::DrainEnergy => EventDelta {
                energy: Some(0.0),
                ..Default::default()
            },
            EventEffect::DowngradeRandomBuilding => {
                if inputs.building_count == 0 {
                    return EventDelta::default();
                }
                let idx = (roll.clamp(0.0, 1.0) * inputs.building_count as f64) as usize;
                EventDelta {
                    downgrade: Some(idx.min(inputs.building_count - 1)),
                    ..Default::default()
                }
            }
            EventEffect::Boost(multiplier) => EventDelta {
                boost: Some((multiplier, self.duration_secs.unwrap_or_default())),
                ..Default::default()
            },
        }
    }
}

const fn boost(key: MultiplierKey, factor: f64) -> EventEffect {
    EventEffect::Boost(Multiplier { key, factor })
}

pub const RANDOM_EVENTS: &[RandomEventDef] = &[
    RandomEventDef {
        id: RandomEventId::SolarFlare,
        title: "Solar Flare!",
        icon: "🌞",
        sentiment: Sentiment::Positive,
        duration_secs: Some(30.0),
        effect: boost(MultiplierKey::Building(BuildingKind::SolarPanel), 3.0),
    },
    RandomEventDef {
        id: RandomEventId::GoldRush,
        title: "Gold Rush!",
        icon: "💎",
        sentiment: Sentiment::Positive,
        duration_secs: None,
        effect: EventEffect::GrantGold(500.0),
    },
    RandomEventDef {
        id: RandomEventId::Storm,
        title: "Storm!",
        icon: "⛈️",
        sentiment: Sentiment::Positive,
        duration_secs: Some(20.0),
        effect: boost(MultiplierKey::Building(BuildingKind::WindTurbine), 4.0),
    },
    RandomEventDef {
        id: RandomEventId::Earthquake,
        title: "Earthquake!",
        icon: "🌍",
        sentiment: Sentiment::Negative,
        duration_secs: None,
        effect: EventEffect::DowngradeRandomBuilding,
    },
    RandomEventDef {
        id: RandomEventId::TaxBreak,
        title: "Tax Break!",
        icon: "🏛️",
        sentiment: Sentiment::Positive,
        duration_secs: None,
        effect: EventEffect::GrantGold(300.0),
    },
    RandomEventDef {
        id: RandomEventId::PowerOutage,
        title: "Power Outage!",
        icon: "🔌",
        sentiment: Sentiment::Negative,
        duration_secs: None,
        effect: EventEffect::DrainEnergy,
    },
    RandomEventDef {
        id: RandomEventId::Investor,
        title: "Investor Interest!",
        icon: "🤝",
        sentiment: Sentiment::Positive,
        duration_secs: None,
        effect: EventEffect::GrantGold(1000.0),
    },
    RandomEventDef {
        id: RandomEventId::MarketCrash,
        title: "Market Crash!",
        icon: "📉",
        sentiment: Sentiment::Negative,
        duration_secs: None,
        effect: EventEffect::ScaleGold(0.8),
    },
    RandomEventDef {
        id: RandomEventId::TechBreakthrough,
        title: "Tech Breakthrough!",
        icon: "🧪",
        sentiment: Sentiment::Positive,
        duration_secs: Some(60.0),
        effect: boost(MultiplierKey::All, 1.5),
    },
    RandomEventDef {
        id: RandomEventId::EmployeeBonus,
        title: "Morale Boost!",
        icon: "🎉",
        sentiment: Sentiment::Positive,
        duration_secs: Some(45.0),
        effect: boost(MultiplierKey::Employees, 2.0),
    },
];

/// Look up an event definition. Declaration order matches [`RANDOM_EVENTS`].
pub fn random_event(id: RandomEventId) -> &'static RandomEventDef {
    &RANDOM_EVENTS[id as usize]
}
