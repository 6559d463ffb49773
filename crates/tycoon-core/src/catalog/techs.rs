//! Technology tree and the pure multiplier functions derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::BuildingKind;

use super::buildings::building_spec;

/// Identifier of a technology. Declaration order matches [`TECH_TREE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechId {
    SolarEfficiency,
    WindPower,
    BatteryTech,
    MiningDrill,
    ResearchFacility,
    SmartGrid,
    AiGaming,
    MilitaryTraining,
    CostOptimization,
    FusionReactor,
    Supercapacitors,
}

impl TechId {
    pub fn as_str(self) -> &'static str {
        match self {
            TechId::SolarEfficiency => "solar_efficiency",
            TechId::WindPower => "wind_power",
            TechId::BatteryTech => "battery_tech",
            TechId::MiningDrill => "mining_drill",
            TechId::ResearchFacility => "research_facility",
            TechId::SmartGrid => "smart_grid",
            TechId::AiGaming => "ai_gaming",
            TechId::MilitaryTraining => "military_training",
            TechId::CostOptimization => "cost_optimization",
            TechId::FusionReactor => "fusion_reactor",
            TechId::Supercapacitors => "supercapacitors",
        }
    }
}

impl fmt::Display for TechId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a production boost applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechTarget {
    Building(BuildingKind),
    /// Every energy-category kind with a positive energy rate.
    AllEnergy,
    /// Every building kind.
    All,
}

impl TechTarget {
    pub fn covers(self, kind: BuildingKind) -> bool {
        match self {
            TechTarget::Building(target) => target == kind,
            TechTarget::AllEnergy => building_spec(kind).produces_energy(),
            TechTarget::All => true,
        }
    }
}

/// What unlocking a technology changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TechEffect {
    ProductionBoost { target: TechTarget, factor: f64 },
    /// Multiplies every construction cost.
    CostReduction { factor: f64 },
    /// Adds storage once, when research completes.
    CapacityBoost { amount: f64 },
    UnlockBuilding(BuildingKind),
    /// Multiplies the player's attack in combat.
    CombatBoost { factor: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechNode {
    pub id: TechId,
    pub name: &'static str,
    pub cost: u32,
    pub research_secs: f64,
    pub requires: &'static [TechId],
    pub effect: TechEffect,
}

pub const TECH_TREE: &[TechNode] = &[
    TechNode {
        id: TechId::SolarEfficiency,
        name: "Advanced Solar Panels",
        cost: 200,
        research_secs: 30.0,
        requires: &[],
        effect: TechEffect::ProductionBoost {
            target: TechTarget::Building(BuildingKind::SolarPanel),
            factor: 1.5,
        },
    },
    TechNode {
        id: TechId::WindPower,
        name: "Mega Wind Turbines",
        cost: 300,
        research_secs: 45.0,
        requires: &[],
        effect: TechEffect::ProductionBoost {
            target: TechTarget::Building(BuildingKind::WindTurbine),
            factor: 1.5,
        },
    },
    TechNode {
        id: TechId::BatteryTech,
        name: "Battery Technology",
        cost: 400,
        research_secs: 60.0,
        requires: &[TechId::SolarEfficiency],
        effect: TechEffect::UnlockBuilding(BuildingKind::BatteryStorage),
    },
    TechNode {
        id: TechId::MiningDrill,
        name: "Advanced Mining Drill",
        cost: 500,
        research_secs: 60.0,
        requires: &[],
        effect: TechEffect::ProductionBoost {
            target: TechTarget::Building(BuildingKind::GoldMine),
            factor: 2.0,
        },
    },
    TechNode {
        id: TechId::ResearchFacility,
        name: "Research Facility",
        cost: 600,
        research_secs: 90.0,
        requires: &[TechId::SolarEfficiency, TechId::WindPower],
        effect: TechEffect::UnlockBuilding(BuildingKind::ResearchLab),
    },
    TechNode {
        id: TechId::SmartGrid,
        name: "Smart Grid",
        cost: 800,
        research_secs: 120.0,
        requires: &[TechId::BatteryTech],
        effect: TechEffect::ProductionBoost {
            target: TechTarget::AllEnergy,
            factor: 1.3,
        },
    },
    TechNode {
        id: TechId::AiGaming,
        name: "AI Game Engine",
        cost: 1000,
        research_secs: 120.0,
        requires: &[TechId::ResearchFacility],
        effect: TechEffect::ProductionBoost {
            target: TechTarget::Building(BuildingKind::GamingOffice),
            factor: 2.0,
        },
    },
    TechNode {
        id: TechId::MilitaryTraining,
        name: "Military Training",
        cost: 400,
        research_secs: 60.0,
        requires: &[TechId::MiningDrill],
        effect: TechEffect::CombatBoost { factor: 1.5 },
    },
    TechNode {
        id: TechId::CostOptimization,
        name: "Cost Optimization",
        cost: 700,
        research_secs: 90.0,
        requires: &[TechId::MiningDrill, TechId::SmartGrid],
        effect: TechEffect::CostReduction { factor: 0.8 },
    },
    TechNode {
        id: TechId::FusionReactor,
        name: "Fusion Reactor",
        cost: 2000,
        research_secs: 180.0,
        requires: &[TechId::SmartGrid, TechId::ResearchFacility],
        effect: TechEffect::ProductionBoost {
            target: TechTarget::Building(BuildingKind::PowerStation),
            factor: 3.0,
        },
    },
    TechNode {
        id: TechId::Supercapacitors,
        name: "Supercapacitors",
        cost: 900,
        research_secs: 90.0,
        requires: &[TechId::BatteryTech],
        effect: TechEffect::CapacityBoost { amount: 200.0 },
    },
];

/// Look up a technology node.
pub fn tech_node(id: TechId) -> &'static TechNode {
    &TECH_TREE[id as usize]
}

/// Production multiplier for `kind` from the unlocked techs of [`TECH_TREE`].
pub fn tech_boost(kind: BuildingKind, unlocked: &[TechId]) -> f64 {
    tech_boost_in(TECH_TREE, kind, unlocked)
}

/// Production multiplier for `kind` from the unlocked techs of `tree`.
///
/// Boosts compose multiplicatively. Unlocked ids missing from `tree` are ignored.
pub fn tech_boost_in(tree: &[TechNode], kind: BuildingKind, unlocked: &[TechId]) -> f64 {
    tree.iter()
        .filter(|node| unlocked.contains(&node.id))
        .filter_map(|node| match node.effect {
            TechEffect::ProductionBoost { target, factor } if target.covers(kind) => Some(factor),
            _ => None,
        })
        .product()
}

/// Combined construction cost factor (1.0 when nothing applies).
pub fn cost_multiplier(unlocked: &[TechId]) -> f64 {
    unlocked
        .iter()
        .filter_map(|id| match tech_node(*id).effect {
            TechEffect::CostReduction { factor } => Some(factor),
            _ => None,
        })
        .product()
}

/// Combined player attack factor (1.0 when nothing applies).
pub fn combat_multiplier(unlocked: &[TechId]) -> f64 {
    unlocked
        .iter()
        .filter_map(|id| match tech_node(*id).effect {
            TechEffect::CombatBoost { factor } => Some(factor),
            _ => None,
        })
        .product()
}

/// Prerequisites of `id` not yet in `unlocked`.
pub fn missing_prerequisites(id: TechId, unlocked: &[TechId]) -> Vec<TechId> {
    tech_node(id)
        .requires
        .iter()
        .copied()
        .filter(|req| !unlocked.contains(req))
        .collect()
}
