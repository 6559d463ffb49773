//! Snapshot system: queries the ECS world and builds `GameView`s and
//! `SaveSnapshot`s.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use tycoon_core::catalog::market::energy_price;
use tycoon_core::components::{Employee, Structure};
use tycoon_core::enums::DayPhase;
use tycoon_core::state::{BuildingRecord, GameView, ResearchView, RivalView, SaveSnapshot};
use tycoon_core::types::Position;

use crate::engine::SimulationEngine;

/// Build a complete GameView from the current engine state.
pub fn build_view(engine: &SimulationEngine) -> GameView {
    let rates = engine.rates();
    GameView {
        phase: engine.phase,
        gold: engine.gold,
        energy: engine.energy,
        energy_capacity: engine.energy_capacity,
        gold_per_second: rates.gold_per_sec,
        energy_per_second: rates.energy_per_sec,
        buildings: build_buildings(&engine.world),
        employees: build_employees(&engine.world),
        company_level: engine.company_level,
        unlocked_mines: engine.unlocked_mines.clone(),
        unlocked_techs: engine.unlocked_techs.clone(),
        research: engine.research.map(|slot| ResearchView {
            tech: slot.tech,
            progress: slot.progress,
        }),
        unlocked_achievements: engine.unlocked_achievements.clone(),
        active_events: engine.active_events.clone(),
        battle: engine.battle,
        battles_won: engine.battles_won,
        rivals: engine.rivals.iter().map(RivalView::from).collect(),
        day_time: engine.day_time,
        day_phase: DayPhase::from_day_time(engine.day_time),
        total_play_time: engine.total_play_time,
        tutorial_step: engine.tutorial_step,
        tutorial_completed: engine.tutorial_completed,
        bank_balance: engine.bank_balance,
        energy_price: energy_price(engine.total_play_time),
    }
}

/// Build the persisted subset.
pub fn extract_snapshot(engine: &SimulationEngine) -> SaveSnapshot {
    SaveSnapshot {
        gold: engine.gold,
        energy: engine.energy,
        energy_capacity: engine.energy_capacity,
        buildings: build_buildings(&engine.world),
        employees: build_employees(&engine.world),
        company_level: engine.company_level,
        unlocked_mines: engine.unlocked_mines.clone(),
        unlocked_techs: engine.unlocked_techs.clone(),
        current_research: engine.research.map(|slot| slot.tech),
        research_progress: engine.research.map_or(0.0, |slot| slot.progress),
        unlocked_achievements: engine.unlocked_achievements.clone(),
        battles_won: engine.battles_won,
        total_play_time: engine.total_play_time,
        day_time: engine.day_time,
        tutorial_completed: engine.tutorial_completed,
        bank_balance: engine.bank_balance,
    }
}

/// Every building, ordered by id.
pub fn build_buildings(world: &World) -> Vec<BuildingRecord> {
    let mut buildings: Vec<BuildingRecord> = world
        .query::<(&Structure, &Position)>()
        .iter()
        .map(|(_, (structure, pos))| BuildingRecord {
            id: structure.id,
            kind: structure.kind,
            position: *pos,
            level: structure.level,
            production_multiplier: structure.production_multiplier,
        })
        .collect();
    buildings.sort_by_key(|b| b.id);
    buildings
}

/// Every employee, ordered by id.
pub fn build_employees(world: &World) -> Vec<Employee> {
    let mut employees: Vec<Employee> = world
        .query::<&Employee>()
        .iter()
        .map(|(_, employee)| employee.clone())
        .collect();
    employees.sort_by_key(|e| e.id);
    employees
}
