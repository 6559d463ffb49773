//! Building catalog and cost rules.

use crate::catalog::techs::{self, TechId};
use crate::constants::DEMOLITION_REFUND_RATIO;
use crate::enums::{BuildingCategory, BuildingKind};

/// Static definition of a building kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingSpec {
    pub kind: BuildingKind,
    pub name: &'static str,
    /// Base placement cost in gold.
    pub cost: u32,
    /// Gold per second at level 1.
    pub gold_rate: f64,
    /// Energy per second at level 1.
    pub energy_rate: f64,
    /// Storage added to the energy ceiling while the building stands.
    pub capacity_bonus: f64,
    pub category: BuildingCategory,
    /// Technology that must be unlocked before placement.
    pub required_tech: Option<TechId>,
    /// Output is cut at night.
    pub solar: bool,
}

impl BuildingSpec {
    /// Counts toward the energy rate.
    pub fn produces_energy(&self) -> bool {
        self.category == BuildingCategory::Energy && self.energy_rate > 0.0
    }
}

/// Look up the definition of a building kind.
pub fn building_spec(kind: BuildingKind) -> BuildingSpec {
    use BuildingCategory::*;
    use BuildingKind::*;

    let (name, cost, gold_rate, energy_rate, capacity_bonus, category, required_tech) = match kind
    {
        SolarPanel => ("Solar Panel", 50, 0.0, 5.0, 0.0, Energy, None),
        WindTurbine => ("Wind Turbine", 100, 0.0, 10.0, 0.0, Energy, None),
        PowerStation => ("Power Station", 300, 0.0, 25.0, 50.0, Energy, None),
        GoldMine => ("Gold Mine", 500, 10.0, -5.0, 0.0, Economy, None),
        GamingOffice => ("Gaming Office", 1000, 15.0, -10.0, 0.0, Economy, None),
        BatteryStorage => (
            "Battery Storage",
            400,
            0.0,
            0.0,
            100.0,
            Energy,
            Some(TechId::BatteryTech),
        ),
        ResearchLab => (
            "Research Lab",
            800,
            -5.0,
            -8.0,
            0.0,
            Special,
            Some(TechId::ResearchFacility),
        ),
        NuclearPlant => (
            "Nuclear Plant",
            5000,
            0.0,
            100.0,
            0.0,
            Energy,
            Some(TechId::FusionReactor),
        ),
        SolarFarm => (
            "Solar Farm",
            2000,
            0.0,
            30.0,
            0.0,
            Energy,
            Some(TechId::SolarEfficiency),
        ),
        EnergyTrader => (
            "Energy Trader",
            1500,
            25.0,
            -20.0,
            0.0,
            Economy,
            Some(TechId::SmartGrid),
        ),
        TrainingCenter => (
            "Training Center",
            2500,
            -10.0,
            -5.0,
            0.0,
            Special,
            Some(TechId::AiGaming),
        ),
        Hydroelectric => (
            "Hydroelectric Dam",
            3000,
            0.0,
            50.0,
            0.0,
            Energy,
            Some(TechId::BatteryTech),
        ),
        Geothermal => (
            "Geothermal Plant",
            4000,
            5.0,
            40.0,
            0.0,
            Energy,
            Some(TechId::MiningDrill),
        ),
    };

    BuildingSpec {
        kind,
        name,
        cost,
        gold_rate,
        energy_rate,
        capacity_bonus,
        category,
        required_tech,
        solar: matches!(kind, SolarPanel | SolarFarm),
    }
}

/// The tech still blocking placement of `kind`, if any.
pub fn missing_unlock(kind: BuildingKind, unlocked: &[TechId]) -> Option<TechId> {
    building_spec(kind)
        .required_tech
        .filter(|tech| !unlocked.contains(tech))
}

/// Placement cost after cost-reduction technologies.
pub fn effective_cost(kind: BuildingKind, unlocked: &[TechId]) -> f64 {
    let base = f64::from(building_spec(kind).cost);
    (base * techs::cost_multiplier(unlocked)).floor()
}

/// Cost to raise a building from `level` to `level + 1`.
pub fn upgrade_cost(kind: BuildingKind, level: u32) -> f64 {
    f64::from(building_spec(kind).cost) * f64::from(level)
}

/// Gold returned when a building is demolished.
pub fn demolition_refund(kind: BuildingKind) -> f64 {
    (f64::from(building_spec(kind).cost) * DEMOLITION_REFUND_RATIO).floor()
}
