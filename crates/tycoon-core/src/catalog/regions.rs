//! Map regions with placement-based bonuses.

use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionId {
    City,
    Farm,
    Forest,
    Factory,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionBonus {
    GoldBoost(f64),
    /// Applies to the whole salary bill while a gaming office stands in the region.
    SalaryReduction(f64),
    EnergyBoost(f64),
    /// Fixed into a building's production multiplier at placement.
    ProductionBoost(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub name: &'static str,
    /// Center on the ground plane (x, z).
    pub center: (f64, f64),
    pub radius: f64,
    pub bonus: RegionBonus,
}

impl Region {
    pub fn contains(&self, pos: &Position) -> bool {
        let dx = pos.x - self.center.0;
        let dz = pos.z - self.center.1;
        dx * dx + dz * dz <= self.radius * self.radius
    }
}

pub const REGIONS: &[Region] = &[
    Region {
        id: RegionId::City,
        name: "Trade City",
        center: (80.0, -70.0),
        radius: 35.0,
        bonus: RegionBonus::GoldBoost(1.3),
    },
    Region {
        id: RegionId::Farm,
        name: "Farm Town",
        center: (-75.0, 65.0),
        radius: 30.0,
        bonus: RegionBonus::SalaryReduction(0.8),
    },
    Region {
        id: RegionId::Forest,
        name: "Deep Forest",
        center: (-60.0, -60.0),
        radius: 40.0,
        bonus: RegionBonus::EnergyBoost(1.2),
    },
    Region {
        id: RegionId::Factory,
        name: "Industrial Zone",
        center: (70.0, 70.0),
        radius: 25.0,
        bonus: RegionBonus::ProductionBoost(1.5),
    },
];

/// First region containing `pos`, in declaration order.
pub fn region_at(pos: &Position) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.contains(pos))
}

/// Per-building factors from the region a position falls in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionModifiers {
    pub gold: f64,
    pub energy: f64,
    pub salary: f64,
    pub production: f64,
}

impl Default for RegionModifiers {
    fn default() -> Self {
        Self {
            gold: 1.0,
            energy: 1.0,
            salary: 1.0,
            production: 1.0,
        }
    }
}

pub fn region_modifiers(pos: &Position) -> RegionModifiers {
    let mut mods = RegionModifiers::default();
    match region_at(pos).map(|r| r.bonus) {
        Some(RegionBonus::GoldBoost(v)) => mods.gold = v,
        Some(RegionBonus::EnergyBoost(v)) => mods.energy = v,
        Some(RegionBonus::SalaryReduction(v)) => mods.salary = v,
        Some(RegionBonus::ProductionBoost(v)) => mods.production = v,
        None => {}
    }
    mods
}
