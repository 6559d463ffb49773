//! Error types for rejected commands and snapshot restore.

use thiserror::Error;

use crate::catalog::market::MarketItemId;
use crate::catalog::techs::TechId;
use crate::enums::{BuildingKind, GamePhase};
use crate::types::{BuildingId, EmployeeId, MineId};

/// Why a player command was rejected. A rejected command leaves state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("not enough gold: need {needed:.0}, have {available:.0}")]
    InsufficientGold { needed: f64, available: f64 },

    #[error("not enough energy: need {needed:.0}, have {available:.0}")]
    InsufficientEnergy { needed: f64, available: f64 },

    #[error("{kind} requires {tech} to be researched")]
    BuildingLocked { kind: BuildingKind, tech: TechId },

    #[error("position ({x:.1}, {z:.1}) is outside the buildable area")]
    OutOfBounds { x: f64, z: f64 },

    #[error("too close to {neighbor} (minimum spacing {min_spacing})")]
    SpacingViolation { neighbor: BuildingId, min_spacing: f64 },

    #[error("unknown building: {0}")]
    UnknownBuilding(BuildingId),

    #[error("unknown employee: {0}")]
    UnknownEmployee(EmployeeId),

    #[error("unknown mine: {0}")]
    UnknownMine(MineId),

    #[error("{0} is already conquered")]
    MineAlreadyConquered(MineId),

    #[error("{0} is already researched")]
    AlreadyResearched(TechId),

    #[error("{tech} is missing prerequisites: {missing:?}")]
    PrerequisitesMissing { tech: TechId, missing: Vec<TechId> },

    #[error("already researching {0}")]
    ResearchInProgress(TechId),

    #[error("no research in progress")]
    NoActiveResearch,

    #[error("a battle is already in progress")]
    BattleInProgress,

    #[error("no battle in progress")]
    NoActiveBattle,

    #[error("{0} is already active")]
    BuffAlreadyActive(MarketItemId),

    #[error("invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("command not allowed in {actual:?} (requires {expected:?})")]
    WrongPhase { expected: GamePhase, actual: GamePhase },

    #[error("tutorial is not running")]
    TutorialInactive,

    #[error("{0} cannot go any higher")]
    LimitReached(&'static str),
}

/// Why a persisted snapshot could not be restored at all.
///
/// Individual bad fields never produce an error; they fall back to defaults.
#[derive(Error, Debug)]
pub enum RestoreError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot root must be a JSON object")]
    NotAnObject,
}
