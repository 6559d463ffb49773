//! Utility scoring and action application.
//!
//! No ECS dependency. A rival goes in, an updated rival comes out, and a
//! failed tick hands back an error instead of a half-updated rival.

use tracing::debug;
use tycoon_core::enums::RivalAction;
use tycoon_core::rival::Rival;

use crate::error::RivalError;

/// Baseline utility of doing nothing. Always positive so some action wins.
pub const IDLE_UTILITY: f64 = 0.1;

pub const BUILD_GOLD_FLOOR: f64 = 80.0;
pub const RESEARCH_GOLD_FLOOR: f64 = 120.0;
pub const MAX_TECH_LEVEL: u32 = 5;
pub const PRICE_CUT_FLOOR: f64 = 8.0;
pub const MIN_ENERGY_PRICE: f64 = 6.0;
pub const PRICE_HIKE_SHARE: f64 = 0.3;
pub const UPGRADE_GOLD_FLOOR: f64 = 60.0;
pub const MAX_MARKET_SHARE: f64 = 0.4;

/// Gold per building earned every tick regardless of action.
pub const PASSIVE_GOLD_PER_BUILDING: f64 = 2.0;

/// What a rival can see of the player.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketSignal {
    pub player_gold: f64,
    pub player_building_count: usize,
}

/// Score every action in [`RivalAction::ALL`] order. Gated actions score 0.
pub fn score_actions(rival: &Rival, signal: &MarketSignal) -> [(RivalAction, f64); 6] {
    let p = &rival.personality;
    RivalAction::ALL.map(|action| {
        let score = match action {
            RivalAction::Build if rival.gold > BUILD_GOLD_FLOOR => {
                let room = if rival.building_count < 5 { 0.3 } else { 0.1 };
                // Falling behind the player pushes expansion.
                let pressure = if signal.player_building_count > rival.building_count as usize {
                    0.1
                } else {
                    0.0
                };
                p.expansion * 0.6 + room + pressure
            }
            RivalAction::Research
                if rival.gold > RESEARCH_GOLD_FLOOR && rival.tech_level < MAX_TECH_LEVEL =>
            {
                p.research * 0.7 + (1.0 - f64::from(rival.tech_level) / 5.0) * 0.2
            }
            RivalAction::PriceCut if rival.energy_price > PRICE_CUT_FLOOR => {
                p.aggression * 0.5 + if rival.market_share < 0.2 { 0.3 } else { 0.0 }
            }
            RivalAction::PriceHike if rival.market_share > PRICE_HIKE_SHARE => {
                p.efficiency * 0.4 + if rival.gold < 50.0 { 0.3 } else { 0.0 }
            }
            RivalAction::Upgrade if rival.building_count > 2 && rival.gold > UPGRADE_GOLD_FLOOR => {
                p.efficiency * 0.5 + if rival.tech_level > 1 { 0.2 } else { 0.0 }
            }
            RivalAction::Idle => IDLE_UTILITY,
            _ => 0.0,
        };
        (action, score)
    })
}

/// Highest-scoring action. Ties go to the earlier action in enumeration order.
pub fn choose_action(rival: &Rival, signal: &MarketSignal) -> RivalAction {
    let mut best = RivalAction::Idle;
    let mut best_score = f64::NEG_INFINITY;
    for (action, score) in score_actions(rival, signal) {
        if score > best_score {
            best = action;
            best_score = score;
        }
    }
    best
}

/// Apply `action` plus the passive trickle, then clamp to valid ranges.
pub fn apply_action(rival: &Rival, action: RivalAction) -> Rival {
    let mut next = rival.clone();
    match action {
        RivalAction::Build => {
            next.gold -= 50.0;
            next.building_count = next.building_count.saturating_add(1);
            next.energy += 15.0;
            next.market_share = (next.market_share + 0.02).min(MAX_MARKET_SHARE);
        }
        RivalAction::Research => {
            next.gold -= 80.0;
            next.tech_level = next.tech_level.saturating_add(1);
            next.reputation += 5.0;
        }
        RivalAction::PriceCut => {
            next.energy_price = (next.energy_price - 1.5).max(MIN_ENERGY_PRICE);
            next.market_share = (next.market_share + 0.03).min(MAX_MARKET_SHARE);
            next.reputation -= 2.0;
        }
        RivalAction::PriceHike => {
            next.energy_price += 1.0;
            next.gold += 20.0;
            next.reputation += 1.0;
        }
        RivalAction::Upgrade => {
            next.gold -= 40.0;
            next.energy += 10.0;
            next.reputation += 2.0;
        }
        RivalAction::Idle => {
            next.gold += f64::from(next.building_count) * 3.0;
        }
    }

    next.gold += f64::from(next.building_count) * PASSIVE_GOLD_PER_BUILDING;
    next.gold = next.gold.max(0.0);
    next.reputation = next.reputation.clamp(0.0, 100.0);
    next.market_share = next.market_share.clamp(0.0, MAX_MARKET_SHARE);
    next.last_action = Some(action);
    next
}

/// Run one decision cycle. On error the caller keeps the old rival.
pub fn tick_rival(rival: &Rival, signal: &MarketSignal) -> Result<Rival, RivalError> {
    if !rival.is_finite() {
        return Err(RivalError::CorruptInput {
            rival: rival.id.clone(),
        });
    }

    let action = choose_action(rival, signal);
    let next = apply_action(rival, action);
    if !next.is_finite() {
        return Err(RivalError::NonFinite {
            rival: rival.id.clone(),
            action: action_name(action),
        });
    }

    debug!(
        target: "rival",
        rival = %rival.id,
        action = action_name(action),
        gold = next.gold,
        share = next.market_share,
        "rival acted"
    );
    Ok(next)
}

fn action_name(action: RivalAction) -> &'static str {
    match action {
        RivalAction::Build => "build",
        RivalAction::Research => "research",
        RivalAction::PriceCut => "price_cut",
        RivalAction::PriceHike => "price_hike",
        RivalAction::Upgrade => "upgrade",
        RivalAction::Idle => "idle",
    }
}
