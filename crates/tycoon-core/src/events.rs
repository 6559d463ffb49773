//! Notifications emitted by the simulation for the UI toast queue.

use serde::{Deserialize, Serialize};

use crate::catalog::achievements::AchievementId;
use crate::catalog::market::MarketItemId;
use crate::catalog::random_events::RandomEventId;
use crate::catalog::techs::TechId;
use crate::enums::*;
use crate::types::MineId;

/// Something the player should be told about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    AchievementUnlocked { achievement: AchievementId },
    ResearchComplete { tech: TechId },
    /// A random event fired and its effect was applied.
    RandomEvent {
        event: RandomEventId,
        sentiment: Sentiment,
    },
    /// A negative random event was absorbed by an active shield.
    EventBlocked { event: RandomEventId },
    BattleEnded {
        mine: MineId,
        outcome: BattleOutcome,
        bounty: f64,
    },
    BuffPurchased { item: MarketItemId },
    EnergySold { amount: f64, gold: f64 },
}

impl Notification {
    /// One-line message for text frontends and logs.
    pub fn message(&self) -> String {
        match self {
            Notification::AchievementUnlocked { achievement } => {
                let def = crate::catalog::achievements::achievement(*achievement);
                format!("Achievement unlocked: {} ({})", def.title, def.description)
            }
            Notification::ResearchComplete { tech } => {
                format!("Research complete: {}", crate::catalog::techs::tech_node(*tech).name)
            }
            Notification::RandomEvent { event, .. } => {
                crate::catalog::random_events::random_event(*event).title.to_string()
            }
            Notification::EventBlocked { event } => format!(
                "Shield blocked: {}",
                crate::catalog::random_events::random_event(*event).title
            ),
            Notification::BattleEnded {
                mine,
                outcome,
                bounty,
            } => match outcome {
                BattleOutcome::Won => format!("Victory! {mine} conquered, +{bounty:.0} gold"),
                BattleOutcome::Lost => format!("Defeat at {mine}"),
                BattleOutcome::Fled => format!("Retreated from {mine}"),
            },
            Notification::BuffPurchased { item } => {
                format!("{} activated", crate::catalog::market::market_item(*item).name)
            }
            Notification::EnergySold { amount, gold } => {
                format!("Sold {amount:.0} energy for {gold:.0} gold")
            }
        }
    }
}
