//! Achievement predicates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::mines::MINES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstBuilding,
    #[serde(rename = "builder_5")]
    Builder5,
    #[serde(rename = "builder_15")]
    Builder15,
    #[serde(rename = "gold_1000")]
    Gold1000,
    #[serde(rename = "gold_10000")]
    Gold10000,
    #[serde(rename = "mine_1")]
    Mine1,
    MineAll,
    FirstEmployee,
    #[serde(rename = "company_5")]
    Company5,
    FirstTech,
    BattleWin,
    #[serde(rename = "energy_500")]
    Energy500,
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(achievement(*self).title)
    }
}

/// Counters an achievement predicate may read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Progress {
    pub building_count: usize,
    pub gold: f64,
    pub mines_unlocked: usize,
    pub employee_count: usize,
    pub company_level: u32,
    pub techs_unlocked: usize,
    pub battles_won: u32,
    pub energy_capacity: f64,
}

pub struct AchievementDef {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub condition: fn(&Progress) -> bool,
}

fn first_building(p: &Progress) -> bool {
    p.building_count >= 1
}

fn builder_5(p: &Progress) -> bool {
    p.building_count >= 5
}

fn builder_15(p: &Progress) -> bool {
    p.building_count >= 15
}

fn gold_1000(p: &Progress) -> bool {
    p.gold >= 1000.0
}

fn gold_10000(p: &Progress) -> bool {
    p.gold >= 10_000.0
}

fn mine_1(p: &Progress) -> bool {
    p.mines_unlocked >= 1
}

fn mine_all(p: &Progress) -> bool {
    p.mines_unlocked >= MINES.len()
}

fn first_employee(p: &Progress) -> bool {
    p.employee_count >= 1
}

fn company_5(p: &Progress) -> bool {
    p.company_level >= 5
}

fn first_tech(p: &Progress) -> bool {
    p.techs_unlocked >= 1
}

fn battle_win(p: &Progress) -> bool {
    p.battles_won >= 1
}

fn energy_500(p: &Progress) -> bool {
    p.energy_capacity >= 500.0
}

/// Declaration order matches [`AchievementId`].
pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstBuilding,
        title: "First Step",
        description: "Build your first building",
        icon: "🏗️",
        condition: first_building,
    },
    AchievementDef {
        id: AchievementId::Builder5,
        title: "Builder",
        description: "Build 5 buildings",
        icon: "🏢",
        condition: builder_5,
    },
    AchievementDef {
        id: AchievementId::Builder15,
        title: "Master Builder",
        description: "Build 15 buildings",
        icon: "🏙️",
        condition: builder_15,
    },
    AchievementDef {
        id: AchievementId::Gold1000,
        title: "Getting Rich",
        description: "Hold 1000 gold",
        icon: "💰",
        condition: gold_1000,
    },
    AchievementDef {
        id: AchievementId::Gold10000,
        title: "Millionaire",
        description: "Hold 10000 gold",
        icon: "💎",
        condition: gold_10000,
    },
    AchievementDef {
        id: AchievementId::Mine1,
        title: "Explorer",
        description: "Conquer your first mine",
        icon: "⛏️",
        condition: mine_1,
    },
    AchievementDef {
        id: AchievementId::MineAll,
        title: "Conqueror",
        description: "Conquer every mine",
        icon: "👑",
        condition: mine_all,
    },
    AchievementDef {
        id: AchievementId::FirstEmployee,
        title: "Boss",
        description: "Hire your first employee",
        icon: "👔",
        condition: first_employee,
    },
    AchievementDef {
        id: AchievementId::Company5,
        title: "Big Company",
        description: "Reach company level 5",
        icon: "🎮",
        condition: company_5,
    },
    AchievementDef {
        id: AchievementId::FirstTech,
        title: "Researcher",
        description: "Research your first technology",
        icon: "🔬",
        condition: first_tech,
    },
    AchievementDef {
        id: AchievementId::BattleWin,
        title: "Warrior",
        description: "Win your first battle",
        icon: "⚔️",
        condition: battle_win,
    },
    AchievementDef {
        id: AchievementId::Energy500,
        title: "Energy Baron",
        description: "Reach 500 energy capacity",
        icon: "⚡",
        condition: energy_500,
    },
];

pub fn achievement(id: AchievementId) -> &'static AchievementDef {
    &ACHIEVEMENTS[id as usize]
}

/// Achievements whose predicate now holds and that are not yet unlocked.
pub fn newly_satisfied(progress: &Progress, unlocked: &[AchievementId]) -> Vec<AchievementId> {
    ACHIEVEMENTS
        .iter()
        .filter(|def| !unlocked.contains(&def.id))
        .filter(|def| (def.condition)(progress))
        .map(|def| def.id)
        .collect()
}
