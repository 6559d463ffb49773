//! Game state surfaces: the persisted snapshot and the per-tick view.

use std::collections::HashSet;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::achievements::AchievementId;
use crate::catalog::market::MarketItemId;
use crate::catalog::random_events::RandomEventId;
use crate::catalog::techs::TechId;
use crate::components::Employee;
use crate::constants::*;
use crate::enums::*;
use crate::error::RestoreError;
use crate::rival::Rival;
use crate::types::{BuildingId, MineId, Position};

/// What a timed multiplier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierKey {
    Building(BuildingKind),
    /// Company revenue from employee productivity.
    Employees,
    /// Every production term.
    All,
    /// Gold-side production only.
    Gold,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multiplier {
    pub key: MultiplierKey,
    pub factor: f64,
}

/// Where an active timed event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EventSource {
    Random(RandomEventId),
    Market(MarketItemId),
}

/// A timed event currently folded into production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEvent {
    /// Unique per activation, e.g. `solar_flare_3`.
    pub id: String,
    pub source: EventSource,
    pub title: String,
    pub icon: String,
    /// Absolute wall-clock second at which the event expires.
    pub ends_at: f64,
    pub multipliers: Vec<Multiplier>,
}

/// A placed building as persisted and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub id: BuildingId,
    #[serde(rename = "type")]
    pub kind: BuildingKind,
    pub position: Position,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_multiplier")]
    pub production_multiplier: f64,
}

fn default_level() -> u32 {
    1
}

fn default_multiplier() -> f64 {
    1.0
}

/// An in-progress combat encounter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub mine: MineId,
    pub player_health: f64,
    pub enemy_health: f64,
    pub player_attack: f64,
    pub enemy_attack: f64,
}

/// The persisted subset of game state.
///
/// Derived rates, the battle, rivals, and active events are not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveSnapshot {
    pub gold: f64,
    pub energy: f64,
    pub energy_capacity: f64,
    pub buildings: Vec<BuildingRecord>,
    pub employees: Vec<Employee>,
    pub company_level: u32,
    pub unlocked_mines: Vec<MineId>,
    pub unlocked_techs: Vec<TechId>,
    pub current_research: Option<TechId>,
    pub research_progress: f64,
    pub unlocked_achievements: Vec<AchievementId>,
    pub battles_won: u32,
    pub total_play_time: f64,
    pub day_time: f64,
    pub tutorial_completed: bool,
    pub bank_balance: f64,
}

impl Default for SaveSnapshot {
    fn default() -> Self {
        Self {
            gold: STARTING_GOLD,
            energy: STARTING_ENERGY,
            energy_capacity: BASE_ENERGY_CAPACITY,
            buildings: Vec::new(),
            employees: Vec::new(),
            company_level: STARTING_COMPANY_LEVEL,
            unlocked_mines: Vec::new(),
            unlocked_techs: Vec::new(),
            current_research: None,
            research_progress: 0.0,
            unlocked_achievements: Vec::new(),
            battles_won: 0,
            total_play_time: 0.0,
            day_time: STARTING_DAY_TIME,
            tutorial_completed: false,
            bank_balance: 0.0,
        }
    }
}

impl SaveSnapshot {
    /// Parse a snapshot, defaulting every missing or malformed field.
    ///
    /// Only input that is not a JSON object at all is rejected.
    pub fn from_json_lenient(json: &str) -> Result<Self, RestoreError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value_lenient(value)
    }

    pub fn from_value_lenient(value: Value) -> Result<Self, RestoreError> {
        let Value::Object(mut obj) = value else {
            return Err(RestoreError::NotAnObject);
        };
        let d = Self::default();

        let energy_capacity = non_negative(&mut obj, "energy_capacity", d.energy_capacity)
            .max(BASE_ENERGY_CAPACITY);
        let mut snapshot = Self {
            gold: non_negative(&mut obj, "gold", d.gold),
            energy: non_negative(&mut obj, "energy", d.energy).min(energy_capacity),
            energy_capacity,
            buildings: list(&mut obj, "buildings"),
            employees: list(&mut obj, "employees"),
            company_level: field(&mut obj, "company_level", d.company_level),
            unlocked_mines: list(&mut obj, "unlocked_mines"),
            unlocked_techs: list(&mut obj, "unlocked_techs"),
            current_research: field(&mut obj, "current_research", d.current_research),
            research_progress: non_negative(&mut obj, "research_progress", 0.0).min(1.0),
            unlocked_achievements: list(&mut obj, "unlocked_achievements"),
            battles_won: field(&mut obj, "battles_won", d.battles_won),
            total_play_time: non_negative(&mut obj, "total_play_time", d.total_play_time),
            day_time: non_negative(&mut obj, "day_time", d.day_time).fract(),
            tutorial_completed: field(&mut obj, "tutorial_completed", d.tutorial_completed),
            bank_balance: non_negative(&mut obj, "bank_balance", d.bank_balance),
        };

        snapshot
            .buildings
            .retain(|b| b.position.is_finite() && b.production_multiplier.is_finite());
        for b in &mut snapshot.buildings {
            b.level = b.level.max(1);
        }
        dedup(&mut snapshot.unlocked_mines);
        dedup(&mut snapshot.unlocked_techs);
        dedup(&mut snapshot.unlocked_achievements);
        if snapshot.current_research.is_none() {
            snapshot.research_progress = 0.0;
        }
        Ok(snapshot)
    }
}

fn field<T: DeserializeOwned>(obj: &mut Map<String, Value>, key: &str, default: T) -> T {
    obj.remove(key)
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or(default)
}

fn non_negative(obj: &mut Map<String, Value>, key: &str, default: f64) -> f64 {
    let v: f64 = field(obj, key, default);
    if v.is_finite() && v >= 0.0 {
        v
    } else {
        default
    }
}

/// Drop repeated ids, keeping first occurrences in order.
fn dedup<T: Copy + Eq + Hash>(ids: &mut Vec<T>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(*id));
}

/// Decode an array element by element, dropping the elements that fail.
fn list<T: DeserializeOwned>(obj: &mut Map<String, Value>, key: &str) -> Vec<T> {
    match obj.remove(key) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Research slot for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResearchView {
    pub tech: TechId,
    /// Normalized `[0, 1)`.
    pub progress: f64,
}

/// A rival as shown to the player, with a status line for its last move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalView {
    #[serde(flatten)]
    pub rival: Rival,
    pub status: String,
}

impl From<&Rival> for RivalView {
    fn from(rival: &Rival) -> Self {
        Self {
            status: rival.status(),
            rival: rival.clone(),
        }
    }
}

/// Complete visible game state, rebuilt after every command and tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub phase: GamePhase,
    pub gold: f64,
    pub energy: f64,
    pub energy_capacity: f64,
    pub gold_per_second: f64,
    pub energy_per_second: f64,
    pub buildings: Vec<BuildingRecord>,
    pub employees: Vec<Employee>,
    pub company_level: u32,
    pub unlocked_mines: Vec<MineId>,
    pub unlocked_techs: Vec<TechId>,
    pub research: Option<ResearchView>,
    pub unlocked_achievements: Vec<AchievementId>,
    pub active_events: Vec<ActiveEvent>,
    pub battle: Option<BattleState>,
    pub battles_won: u32,
    pub rivals: Vec<RivalView>,
    pub day_time: f64,
    pub day_phase: DayPhase,
    pub total_play_time: f64,
    /// 0 when the tutorial is not running.
    pub tutorial_step: u8,
    pub tutorial_completed: bool,
    pub bank_balance: f64,
    pub energy_price: f64,
}
