//! Conquerable mine sites.

use crate::constants::DIFFICULTY_STEP;
use crate::types::{MineId, Position};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MineSite {
    pub id: MineId,
    pub name: &'static str,
    pub position: Position,
    /// Tier 1 (easiest) through 8.
    pub difficulty: u8,
}

pub const MINES: [MineSite; 8] = [
    MineSite {
        id: MineId(1),
        name: "Gold Mountain",
        position: Position::ground(25.0, -20.0),
        difficulty: 1,
    },
    MineSite {
        id: MineId(2),
        name: "Hidden Shaft",
        position: Position::ground(-35.0, 15.0),
        difficulty: 2,
    },
    MineSite {
        id: MineId(3),
        name: "Ancient Quarry",
        position: Position::ground(40.0, 35.0),
        difficulty: 3,
    },
    MineSite {
        id: MineId(4),
        name: "Dragon Mine",
        position: Position::ground(-25.0, -40.0),
        difficulty: 4,
    },
    MineSite {
        id: MineId(5),
        name: "Crystal Cave",
        position: Position::ground(60.0, -50.0),
        difficulty: 5,
    },
    MineSite {
        id: MineId(6),
        name: "Dark Well",
        position: Position::ground(-55.0, 55.0),
        difficulty: 6,
    },
    MineSite {
        id: MineId(7),
        name: "Volcano Mine",
        position: Position::ground(70.0, 60.0),
        difficulty: 7,
    },
    MineSite {
        id: MineId(8),
        name: "Diamond Cliff",
        position: Position::ground(-70.0, -65.0),
        difficulty: 8,
    },
];

pub fn mine_site(id: MineId) -> Option<&'static MineSite> {
    MINES.iter().find(|m| m.id == id)
}

/// Enemy stat multiplier for a difficulty tier: `1 + 0.25 * (tier - 1)`.
pub fn difficulty_scale(tier: u8) -> f64 {
    1.0 + DIFFICULTY_STEP * f64::from(tier.max(1) - 1)
}
