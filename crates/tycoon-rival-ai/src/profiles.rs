//! Starting roster of rival companies.
//!
//! Personalities are tuned so each rival favors a different action:
//! VoltEx undercuts on price, GreenWave researches, TitanPower expands.

use tycoon_core::rival::{Personality, Rival};

struct RivalProfile {
    id: &'static str,
    name: &'static str,
    personality: Personality,
    gold: f64,
    energy: f64,
    building_count: u32,
    tech_level: u32,
    market_share: f64,
    energy_price: f64,
    reputation: f64,
}

const PROFILES: [RivalProfile; 3] = [
    RivalProfile {
        id: "rival_voltex",
        name: "VoltEx Energy",
        personality: Personality {
            aggression: 0.8,
            expansion: 0.7,
            research: 0.3,
            efficiency: 0.4,
        },
        gold: 150.0,
        energy: 50.0,
        building_count: 2,
        tech_level: 0,
        market_share: 0.2,
        energy_price: 12.0,
        reputation: 50.0,
    },
    RivalProfile {
        id: "rival_greenwave",
        name: "GreenWave Corp",
        personality: Personality {
            aggression: 0.3,
            expansion: 0.5,
            research: 0.8,
            efficiency: 0.7,
        },
        gold: 180.0,
        energy: 30.0,
        building_count: 1,
        tech_level: 1,
        market_share: 0.15,
        energy_price: 14.0,
        reputation: 65.0,
    },
    RivalProfile {
        id: "rival_titanpower",
        name: "TitanPower Inc",
        personality: Personality {
            aggression: 0.5,
            expansion: 0.9,
            research: 0.4,
            efficiency: 0.5,
        },
        gold: 200.0,
        energy: 70.0,
        building_count: 3,
        tech_level: 0,
        market_share: 0.25,
        energy_price: 11.0,
        reputation: 45.0,
    },
];

/// Fresh rivals for a new game.
pub fn default_rivals() -> Vec<Rival> {
    PROFILES
        .iter()
        .map(|p| Rival {
            id: p.id.to_string(),
            name: p.name.to_string(),
            personality: p.personality,
            gold: p.gold,
            energy: p.energy,
            building_count: p.building_count,
            tech_level: p.tech_level,
            market_share: p.market_share,
            energy_price: p.energy_price,
            reputation: p.reputation,
            last_action: None,
        })
        .collect()
}
