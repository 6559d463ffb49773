//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{NIGHT_END, NIGHT_START};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    /// Economy is suspended while a combat encounter runs.
    Battle,
    Paused,
}

/// Every kind of building the player can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    SolarPanel,
    WindTurbine,
    PowerStation,
    GoldMine,
    GamingOffice,
    BatteryStorage,
    ResearchLab,
    NuclearPlant,
    SolarFarm,
    EnergyTrader,
    TrainingCenter,
    Hydroelectric,
    Geothermal,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 13] = [
        BuildingKind::SolarPanel,
        BuildingKind::WindTurbine,
        BuildingKind::PowerStation,
        BuildingKind::GoldMine,
        BuildingKind::GamingOffice,
        BuildingKind::BatteryStorage,
        BuildingKind::ResearchLab,
        BuildingKind::NuclearPlant,
        BuildingKind::SolarFarm,
        BuildingKind::EnergyTrader,
        BuildingKind::TrainingCenter,
        BuildingKind::Hydroelectric,
        BuildingKind::Geothermal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildingKind::SolarPanel => "solar_panel",
            BuildingKind::WindTurbine => "wind_turbine",
            BuildingKind::PowerStation => "power_station",
            BuildingKind::GoldMine => "gold_mine",
            BuildingKind::GamingOffice => "gaming_office",
            BuildingKind::BatteryStorage => "battery_storage",
            BuildingKind::ResearchLab => "research_lab",
            BuildingKind::NuclearPlant => "nuclear_plant",
            BuildingKind::SolarFarm => "solar_farm",
            BuildingKind::EnergyTrader => "energy_trader",
            BuildingKind::TrainingCenter => "training_center",
            BuildingKind::Hydroelectric => "hydroelectric",
            BuildingKind::Geothermal => "geothermal",
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad grouping of building kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingCategory {
    Energy,
    Economy,
    Special,
}

/// Company employee role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Developer,
    Designer,
    Manager,
    Marketer,
}

impl EmployeeRole {
    pub const ALL: [EmployeeRole; 4] = [
        EmployeeRole::Developer,
        EmployeeRole::Designer,
        EmployeeRole::Manager,
        EmployeeRole::Marketer,
    ];

    /// Flat per-second salary drain.
    pub fn salary(self) -> f64 {
        match self {
            EmployeeRole::Developer => 20.0,
            EmployeeRole::Designer => 15.0,
            EmployeeRole::Manager => 25.0,
            EmployeeRole::Marketer => 18.0,
        }
    }
}

/// Coarse time-of-day band derived from the day/night cycle value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPhase {
    Dawn,
    #[default]
    Day,
    Dusk,
    Night,
}

impl DayPhase {
    /// Classify a cycle value in `[0, 1)` (0 = midnight, 0.5 = noon).
    pub fn from_day_time(t: f64) -> Self {
        if !(NIGHT_END..=NIGHT_START).contains(&t) {
            DayPhase::Night
        } else if t < 0.3 {
            DayPhase::Dawn
        } else if t < 0.7 {
            DayPhase::Day
        } else {
            DayPhase::Dusk
        }
    }

    pub fn is_night(self) -> bool {
        self == DayPhase::Night
    }
}

/// Whether a random event helps or hurts the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
}

/// Actions available to an AI rival, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RivalAction {
    Build,
    Research,
    PriceCut,
    PriceHike,
    Upgrade,
    Idle,
}

impl RivalAction {
    /// Fixed enumeration order. Earlier actions win score ties.
    pub const ALL: [RivalAction; 6] = [
        RivalAction::Build,
        RivalAction::Research,
        RivalAction::PriceCut,
        RivalAction::PriceHike,
        RivalAction::Upgrade,
        RivalAction::Idle,
    ];

    /// Human-readable status line for a rival that just took this action.
    pub fn describe(self, rival_name: &str) -> String {
        match self {
            RivalAction::Build => format!("{rival_name} is building a new plant"),
            RivalAction::Research => format!("{rival_name} is investing in R&D"),
            RivalAction::PriceCut => format!("{rival_name} cut prices!"),
            RivalAction::PriceHike => format!("{rival_name} raised prices"),
            RivalAction::Upgrade => format!("{rival_name} is upgrading facilities"),
            RivalAction::Idle => format!("{rival_name} is planning strategy"),
        }
    }
}

/// How a combat encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Won,
    Lost,
    Fled,
}
