//! Energy trading prices, bank interest, and purchasable buffs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BANK_INTEREST_PER_SEC, ENERGY_BASE_PRICE, ENERGY_PRICE_SWING, ENERGY_PRICE_WAVE_RATE,
};
use crate::state::{Multiplier, MultiplierKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketItemId {
    SpeedBoost,
    GoldMagnet,
    Shield,
}

impl fmt::Display for MarketItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MarketItemId::SpeedBoost => "speed_boost",
            MarketItemId::GoldMagnet => "gold_magnet",
            MarketItemId::Shield => "shield",
        })
    }
}

/// A timed buff bought with gold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketItem {
    pub id: MarketItemId,
    pub name: &'static str,
    pub icon: &'static str,
    pub cost: u32,
    pub duration_secs: f64,
    pub boost: Option<Multiplier>,
    /// Negative random events are absorbed while active.
    pub blocks_negative_events: bool,
}

pub const MARKET_ITEMS: &[MarketItem] = &[
    MarketItem {
        id: MarketItemId::SpeedBoost,
        name: "Speed Boost",
        icon: "⚡",
        cost: 500,
        duration_secs: 30.0,
        boost: Some(Multiplier {
            key: MultiplierKey::All,
            factor: 2.0,
        }),
        blocks_negative_events: false,
    },
    MarketItem {
        id: MarketItemId::GoldMagnet,
        name: "Gold Magnet",
        icon: "🧲",
        cost: 800,
        duration_secs: 60.0,
        boost: Some(Multiplier {
            key: MultiplierKey::Gold,
            factor: 3.0,
        }),
        blocks_negative_events: false,
    },
    MarketItem {
        id: MarketItemId::Shield,
        name: "Protective Shield",
        icon: "🛡️",
        cost: 1000,
        duration_secs: 120.0,
        boost: None,
        blocks_negative_events: true,
    },
];

/// Look up a market item. Declaration order matches [`MARKET_ITEMS`].
pub fn market_item(id: MarketItemId) -> &'static MarketItem {
    &MARKET_ITEMS[id as usize]
}

/// Gold paid per unit of energy after `total_play_time` seconds of play.
pub fn energy_price(total_play_time: f64) -> f64 {
    ENERGY_BASE_PRICE + ENERGY_PRICE_SWING * (total_play_time * ENERGY_PRICE_WAVE_RATE).sin()
}

/// Gold received for selling `amount` energy.
pub fn sale_proceeds(amount: f64, total_play_time: f64) -> f64 {
    (amount * energy_price(total_play_time)).floor()
}

/// Bank balance after `dt` seconds of compounding.
pub fn bank_growth(balance: f64, dt: f64) -> f64 {
    balance * (1.0 + BANK_INTEREST_PER_SEC).powf(dt)
}
