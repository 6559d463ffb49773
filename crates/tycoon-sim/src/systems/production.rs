//! Production system: sums per-second gold and energy rates.
//!
//! Read-only over the world. The engine integrates the rates over `dt`.

use hecs::World;

use tycoon_core::catalog::buildings::building_spec;
use tycoon_core::catalog::regions::region_modifiers;
use tycoon_core::catalog::techs::{tech_boost, TechId};
use tycoon_core::components::{Employee, Structure};
use tycoon_core::constants::*;
use tycoon_core::enums::BuildingKind;
use tycoon_core::types::Position;

use super::timed_events::EventMultipliers;

/// Everything the rates depend on besides the world.
pub struct ProductionContext<'a> {
    pub unlocked_techs: &'a [TechId],
    pub mines_unlocked: usize,
    pub company_level: u32,
    pub night: bool,
    pub events: &'a EventMultipliers,
}

/// Net per-second rates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rates {
    pub gold_per_sec: f64,
    pub energy_per_sec: f64,
    /// Gross company income before salaries.
    pub company_revenue: f64,
    pub salaries: f64,
}

impl Rates {
    pub fn is_finite(&self) -> bool {
        self.gold_per_sec.is_finite()
            && self.energy_per_sec.is_finite()
            && self.company_revenue.is_finite()
            && self.salaries.is_finite()
    }
}

/// Regional and buff bonuses only amplify output, never upkeep.
fn amplify(rate: f64, factor: f64) -> f64 {
    if rate > 0.0 {
        rate * factor
    } else {
        rate
    }
}

pub fn compute_rates(world: &World, ctx: &ProductionContext) -> Rates {
    let events = ctx.events;
    let mut gold = 0.0;
    let mut energy = 0.0;
    let mut training_centers = 0usize;
    let mut salary_factor: f64 = 1.0;

    for (_entity, (structure, pos)) in world.query::<(&Structure, &Position)>().iter() {
        let spec = building_spec(structure.kind);
        let region = region_modifiers(pos);
        let scale = f64::from(structure.level)
            * structure.production_multiplier
            * tech_boost(structure.kind, ctx.unlocked_techs)
            * events.building(structure.kind)
            * events.all;
        let daylight = if spec.solar && ctx.night {
            SOLAR_NIGHT_FACTOR
        } else {
            1.0
        };

        gold += amplify(spec.gold_rate * scale, region.gold * events.gold);
        energy += amplify(spec.energy_rate * scale * daylight, region.energy);

        match structure.kind {
            BuildingKind::TrainingCenter => training_centers += 1,
            BuildingKind::GamingOffice => salary_factor = salary_factor.min(region.salary),
            _ => {}
        }
    }

    gold += ctx.mines_unlocked as f64 * MINE_GOLD_PER_SEC * events.all * events.gold;

    let mut productivity = 0.0;
    let mut salaries = 0.0;
    for (_entity, employee) in world.query::<&Employee>().iter() {
        productivity += employee.productivity;
        salaries += employee.salary;
    }
    let training = 1.0 + TRAINING_CENTER_BONUS * training_centers as f64;
    let company_revenue = f64::from(ctx.company_level)
        * productivity
        * events.employees
        * training
        * REVENUE_PER_PRODUCTIVITY
        * events.all
        * events.gold;
    let salaries = salaries * salary_factor;

    Rates {
        gold_per_sec: gold + company_revenue - salaries,
        energy_per_sec: energy,
        company_revenue,
        salaries,
    }
}

/// Number of buildings of one kind.
pub fn count_kind(world: &World, kind: BuildingKind) -> usize {
    world
        .query::<&Structure>()
        .iter()
        .filter(|(_, s)| s.kind == kind)
        .count()
}
