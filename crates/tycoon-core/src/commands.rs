//! Player commands sent from the host to the simulation.
//!
//! Every command is applied immediately. A command that fails validation
//! is rejected with a [`crate::error::CommandError`] and changes nothing.

use serde::{Deserialize, Serialize};

use crate::catalog::market::MarketItemId;
use crate::catalog::techs::TechId;
use crate::enums::*;
use crate::types::{BuildingId, EmployeeId, MineId, Position};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Game flow ---
    StartGame,
    Pause,
    Resume,

    // --- Construction ---
    PlaceBuilding { kind: BuildingKind, position: Position },
    UpgradeBuilding { id: BuildingId },
    /// Demolish a building for a partial refund.
    RemoveBuilding { id: BuildingId },

    // --- Company ---
    HireEmployee { role: EmployeeRole },
    FireEmployee { id: EmployeeId },
    UpgradeCompany,

    // --- Combat ---
    StartBattle { mine: MineId },
    Attack,
    /// Close the encounter with a driver-decided result.
    EndBattle { won: bool },
    /// Abandon the encounter. Counts as a loss.
    Flee,

    // --- Research ---
    StartResearch { tech: TechId },
    CancelResearch,

    // --- Economy ---
    TriggerRandomEvent,
    SellEnergy { amount: f64 },
    Deposit { amount: f64 },
    /// Move the whole floored bank balance back to gold.
    Withdraw,
    BuyMarketItem { item: MarketItemId },

    // --- Tutorial and progress ---
    NextTutorialStep,
    SkipTutorial,
    CheckAchievements,
}
