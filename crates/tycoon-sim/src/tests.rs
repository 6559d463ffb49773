//! Tests for the simulation engine, commands, and the economic tick.

use tycoon_core::catalog::achievements::AchievementId;
use tycoon_core::catalog::market::MarketItemId;
use tycoon_core::catalog::random_events::RandomEventId;
use tycoon_core::catalog::techs::TechId;
use tycoon_core::commands::PlayerCommand;
use tycoon_core::components::Employee;
use tycoon_core::enums::*;
use tycoon_core::error::{CommandError, RestoreError};
use tycoon_core::events::Notification;
use tycoon_core::state::{BuildingRecord, SaveSnapshot};
use tycoon_core::types::{BuildingId, EmployeeId, MineId, Position};

use crate::combat::AttackOutcome;
use crate::config::SimConfig;
use crate::engine::SimulationEngine;

fn playing(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.start_game().unwrap();
    engine
}

fn view_json(engine: &SimulationEngine) -> String {
    serde_json::to_string(&engine.view()).unwrap()
}

// ---- Economy ----

#[test]
fn test_first_solar_panel_scenario() {
    let mut engine = playing(42);
    assert_eq!(engine.gold(), 200.0);
    assert_eq!(engine.energy(), 0.0);

    engine
        .place_building(BuildingKind::SolarPanel, Position::new(10.0, 0.0, 10.0))
        .unwrap();
    assert_eq!(engine.gold(), 150.0);
    assert_eq!(engine.building_count(), 1);
    assert_eq!(engine.rates().energy_per_sec, 5.0);

    assert!(!engine.tick(0.0).advanced, "First tick only anchors the clock");
    let report = engine.tick(1.0);
    assert!(report.advanced);
    assert_eq!(report.dt, 1.0);
    assert_eq!(engine.energy(), 5.0);
    assert_eq!(engine.gold(), 150.0);
}

#[test]
fn test_energy_clamped_to_capacity() {
    let mut engine = playing(42);
    engine
        .place_building(BuildingKind::SolarPanel, Position::ground(0.0, 0.0))
        .unwrap();
    engine.tick(0.0);
    engine.tick(30.0);
    assert_eq!(engine.energy(), engine.energy_capacity());
    assert_eq!(engine.energy_capacity(), 100.0);
}

#[test]
fn test_consumers_never_drive_resources_negative() {
    let mut engine = playing(42);
    engine.gold = 500.0;
    engine
        .place_building(BuildingKind::GoldMine, Position::ground(0.0, 0.0))
        .unwrap();
    engine.hire_employee(EmployeeRole::Manager).unwrap_err();
    engine.tick(0.0);
    engine.tick(5.0);
    assert_eq!(engine.energy(), 0.0, "Energy floors at zero");
    assert!(engine.gold() >= 0.0);
}

#[test]
fn test_salaries_floor_gold_at_zero() {
    let mut engine = playing(42);
    engine.hire_employee(EmployeeRole::Developer).unwrap();
    assert_eq!(engine.gold(), 100.0);
    engine.tick(0.0);
    engine.tick(60.0);
    assert_eq!(engine.gold(), 0.0, "20 gold/s salary over 60 s drains 100 gold");
}

#[test]
fn test_solar_penalized_at_night() {
    let mut engine = playing(42);
    engine
        .place_building(BuildingKind::SolarPanel, Position::ground(0.0, 0.0))
        .unwrap();
    engine.day_time = 0.9;
    assert_eq!(engine.rates().energy_per_sec, 1.0);
    assert_eq!(engine.view().day_phase, DayPhase::Night);
}

// ---- Placement ----

#[test]
fn test_insufficient_gold_is_a_no_op() {
    let mut engine = playing(42);
    engine.tick(0.0);
    let before = view_json(&engine);
    let snapshot = engine.extract_snapshot();

    let err = engine
        .place_building(BuildingKind::GamingOffice, Position::ground(0.0, 0.0))
        .unwrap_err();
    assert_eq!(
        err,
        CommandError::InsufficientGold {
            needed: 1000.0,
            available: 200.0
        }
    );
    assert_eq!(view_json(&engine), before, "Rejected placement changed state");
    assert_eq!(engine.extract_snapshot(), snapshot);
}

#[test]
fn test_spacing_enforced() {
    let mut engine = playing(42);
    engine
        .place_building(BuildingKind::SolarPanel, Position::ground(0.0, 0.0))
        .unwrap();

    let err = engine
        .place_building(BuildingKind::WindTurbine, Position::ground(2.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, CommandError::SpacingViolation { neighbor, .. } if neighbor == BuildingId(1)));
    assert_eq!(engine.gold(), 150.0);

    engine
        .place_building(BuildingKind::WindTurbine, Position::ground(3.0, 0.0))
        .unwrap();
    assert_eq!(engine.gold(), 50.0);
    assert_eq!(engine.building_count(), 2);
}

#[test]
fn test_placement_gates() {
    let mut engine = playing(42);
    assert!(matches!(
        engine.place_building(BuildingKind::SolarPanel, Position::ground(191.0, 0.0)),
        Err(CommandError::OutOfBounds { .. })
    ));
    assert_eq!(
        engine.place_building(BuildingKind::BatteryStorage, Position::ground(0.0, 0.0)),
        Err(CommandError::BuildingLocked {
            kind: BuildingKind::BatteryStorage,
            tech: TechId::BatteryTech
        })
    );
    assert_eq!(engine.building_count(), 0);
}

#[test]
fn test_commands_rejected_outside_playing() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert_eq!(engine.phase(), GamePhase::Menu);
    assert_eq!(
        engine.place_building(BuildingKind::SolarPanel, Position::ground(0.0, 0.0)),
        Err(CommandError::WrongPhase {
            expected: GamePhase::Playing,
            actual: GamePhase::Menu
        })
    );
    assert!(!engine.tick(0.0).advanced);
    assert!(!engine.tick(10.0).advanced);
}

#[test]
fn test_upgrade_and_remove() {
    let mut engine = playing(42);
    engine.gold = 1000.0;
    let solar = engine
        .place_building(BuildingKind::SolarPanel, Position::ground(0.0, 0.0))
        .unwrap();
    engine.upgrade_building(solar).unwrap();
    assert_eq!(engine.gold(), 900.0);
    assert_eq!(engine.view().buildings[0].level, 2);
    assert_eq!(engine.rates().energy_per_sec, 10.0);

    let station = engine
        .place_building(BuildingKind::PowerStation, Position::ground(20.0, 20.0))
        .unwrap();
    assert_eq!(engine.energy_capacity(), 150.0);
    assert_eq!(engine.gold(), 600.0);

    engine.remove_building(station).unwrap();
    assert_eq!(engine.gold(), 750.0, "Refund is half the base cost");
    assert_eq!(engine.energy_capacity(), 100.0);
    assert_eq!(
        engine.remove_building(station),
        Err(CommandError::UnknownBuilding(station))
    );

    // The freed spot can be reused.
    engine
        .place_building(BuildingKind::WindTurbine, Position::ground(20.0, 21.0))
        .unwrap();
}

#[test]
fn test_json_command_dispatch() {
    let mut engine = playing(42);
    let command: PlayerCommand = serde_json::from_str(
        r#"{"type":"PlaceBuilding","kind":"solar_panel","position":{"x":5.0,"y":0.0,"z":5.0}}"#,
    )
    .unwrap();
    engine.execute(command).unwrap();
    assert_eq!(engine.building_count(), 1);
    assert!(engine.execute(PlayerCommand::CancelResearch).is_err());
}

// ---- Company ----

#[test]
fn test_hire_fire_and_company_upgrade() {
    let mut engine = playing(42);
    engine.gold = 2000.0;
    let id = engine.hire_employee(EmployeeRole::Designer).unwrap();
    assert_eq!(engine.gold(), 1925.0);
    let view = engine.view();
    let employee = &view.employees[0];
    assert!((0.8..1.2).contains(&employee.productivity));
    assert_eq!(employee.salary, 15.0);

    engine.upgrade_company().unwrap();
    engine.upgrade_company().unwrap();
    assert_eq!(engine.gold(), 1925.0 - 500.0 - 1000.0);
    assert_eq!(engine.view().company_level, 2);

    engine.fire_employee(id).unwrap();
    assert_eq!(engine.employee_count(), 0);
    assert_eq!(engine.fire_employee(id), Err(CommandError::UnknownEmployee(id)));
}

// ---- Research ----

#[test]
fn test_research_progress_is_monotonic_and_completes() {
    let mut engine = playing(42);
    engine.start_research(TechId::SolarEfficiency).unwrap();
    assert_eq!(engine.gold(), 0.0);

    engine.tick(0.0);
    let mut last = 0.0;
    let mut completed_at = None;
    for second in 1..=40 {
        let report = engine.tick(f64::from(second));
        match engine.research() {
            Some(slot) => {
                assert!(slot.progress >= last, "Progress went backwards");
                last = slot.progress;
            }
            None => {
                assert_eq!(report.completed_research, Some(TechId::SolarEfficiency));
                completed_at = Some(second);
                break;
            }
        }
    }
    let completed_at = completed_at.expect("research should complete");
    assert!((30..=31).contains(&completed_at));
    assert_eq!(engine.unlocked_techs(), &[TechId::SolarEfficiency]);
    assert!(engine.view().research.is_none());
    assert!(engine
        .drain_notifications()
        .contains(&Notification::ResearchComplete {
            tech: TechId::SolarEfficiency
        }));
}

#[test]
fn test_research_preconditions() {
    let mut engine = playing(42);
    engine.gold = 5000.0;
    assert_eq!(
        engine.start_research(TechId::BatteryTech),
        Err(CommandError::PrerequisitesMissing {
            tech: TechId::BatteryTech,
            missing: vec![TechId::SolarEfficiency]
        })
    );
    engine.start_research(TechId::SolarEfficiency).unwrap();
    assert_eq!(
        engine.start_research(TechId::WindPower),
        Err(CommandError::ResearchInProgress(TechId::SolarEfficiency))
    );

    engine.unlocked_techs.push(TechId::WindPower);
    engine.cancel_research().unwrap();
    assert_eq!(
        engine.start_research(TechId::WindPower),
        Err(CommandError::AlreadyResearched(TechId::WindPower))
    );
}

#[test]
fn test_cancel_research_refunds_half() {
    let mut engine = playing(42);
    engine.gold = 1000.0;
    engine.start_research(TechId::WindPower).unwrap();
    assert_eq!(engine.gold(), 700.0);
    engine.tick(0.0);
    engine.tick(10.0);
    assert!(engine.research().map_or(false, |s| s.progress > 0.0));

    engine.cancel_research().unwrap();
    assert_eq!(engine.gold(), 850.0);
    assert!(engine.research().is_none());
    assert_eq!(engine.cancel_research(), Err(CommandError::NoActiveResearch));
}

#[test]
fn test_capacity_tech_applies_on_completion() {
    let mut engine = playing(42);
    engine.gold = 900.0;
    engine.unlocked_techs = vec![TechId::SolarEfficiency, TechId::BatteryTech];
    engine.start_research(TechId::Supercapacitors).unwrap();
    engine.tick(0.0);
    engine.tick(60.0);
    assert_eq!(engine.energy_capacity(), 100.0);
    engine.tick(120.0);
    assert_eq!(engine.energy_capacity(), 300.0);
    assert!(engine.unlocked_techs().contains(&TechId::Supercapacitors));
}

#[test]
fn test_research_labs_speed_up_research() {
    let mut engine = playing(42);
    engine.gold = 5000.0;
    engine.unlocked_techs = vec![TechId::SolarEfficiency, TechId::WindPower, TechId::ResearchFacility];
    engine
        .place_building(BuildingKind::ResearchLab, Position::ground(0.0, 0.0))
        .unwrap();
    engine
        .place_building(BuildingKind::ResearchLab, Position::ground(10.0, 0.0))
        .unwrap();
    engine.start_research(TechId::MiningDrill).unwrap(); // 60 s
    engine.tick(0.0);
    engine.tick(15.0);
    let progress = engine.research().unwrap().progress;
    assert!((progress - 0.5).abs() < 1e-9, "Two labs double the speed");
}

// ---- Combat ----

#[test]
fn test_battle_terminates_and_unlocks_on_win() {
    for seed in 0..20 {
        let mut engine = playing(seed);
        engine.start_battle(MineId(1)).unwrap();
        assert_eq!(engine.phase(), GamePhase::Battle);

        let mut outcome = AttackOutcome::Ongoing {
            player_damage: 0.0,
            enemy_damage: 0.0,
        };
        for _ in 0..1000 {
            outcome = engine.attack().unwrap();
            if !matches!(outcome, AttackOutcome::Ongoing { .. }) {
                break;
            }
        }

        assert_eq!(engine.phase(), GamePhase::Playing);
        assert!(engine.battle().is_none());
        match outcome {
            AttackOutcome::Won => {
                assert_eq!(engine.unlocked_mines(), &[MineId(1)]);
                assert_eq!(engine.gold(), 400.0);
            }
            AttackOutcome::Lost => {
                assert!(engine.unlocked_mines().is_empty());
                assert_eq!(engine.gold(), 200.0);
            }
            AttackOutcome::Ongoing { .. } => panic!("battle did not terminate (seed {seed})"),
        }
    }
}

#[test]
fn test_battle_is_not_reentrant_and_freezes_economy() {
    let mut engine = playing(42);
    engine
        .place_building(BuildingKind::SolarPanel, Position::ground(0.0, 0.0))
        .unwrap();
    engine.tick(0.0);
    engine.start_battle(MineId(2)).unwrap();
    let battle = *engine.battle().unwrap();

    assert_eq!(
        engine.start_battle(MineId(3)),
        Err(CommandError::BattleInProgress)
    );
    assert_eq!(engine.battle(), Some(&battle));
    assert!(!engine.tick(50.0).advanced);
    assert_eq!(engine.energy(), 0.0);

    engine.flee().unwrap();
    assert_eq!(engine.phase(), GamePhase::Playing);
    assert!(engine.unlocked_mines().is_empty());
    assert!(!engine.tick(60.0).advanced, "Leaving battle re-anchors the clock");
    engine.tick(61.0);
    assert_eq!(engine.energy(), 5.0);
}

#[test]
fn test_end_battle_and_mine_checks() {
    let mut engine = playing(42);
    assert_eq!(
        engine.start_battle(MineId(99)),
        Err(CommandError::UnknownMine(MineId(99)))
    );
    assert_eq!(engine.end_battle(true), Err(CommandError::NoActiveBattle));

    engine.start_battle(MineId(4)).unwrap();
    engine.end_battle(true).unwrap();
    assert_eq!(engine.unlocked_mines(), &[MineId(4)]);
    assert_eq!(engine.view().battles_won, 1);
    assert_eq!(
        engine.start_battle(MineId(4)),
        Err(CommandError::MineAlreadyConquered(MineId(4)))
    );
    // One mine yields 5 gold/s.
    assert_eq!(engine.rates().gold_per_sec, 5.0);
}

// ---- Events, market, bank ----

#[test]
fn test_random_events_apply() {
    let mut engine = playing(42);
    engine.trigger_event(RandomEventId::GoldRush).unwrap();
    assert_eq!(engine.gold(), 700.0);
    engine.trigger_event(RandomEventId::MarketCrash).unwrap();
    assert_eq!(engine.gold(), 560.0);

    let id = engine
        .place_building(BuildingKind::SolarPanel, Position::ground(0.0, 0.0))
        .unwrap();
    engine.upgrade_building(id).unwrap();
    engine.trigger_event(RandomEventId::Earthquake).unwrap();
    assert_eq!(engine.view().buildings[0].level, 1);
    engine.trigger_event(RandomEventId::Earthquake).unwrap();
    assert_eq!(engine.view().buildings[0].level, 1, "Level never drops below 1");
}

#[test]
fn test_timed_event_expires() {
    let mut engine = playing(42);
    engine
        .place_building(BuildingKind::WindTurbine, Position::ground(0.0, 0.0))
        .unwrap();
    engine.tick(0.0);
    engine.trigger_event(RandomEventId::Storm).unwrap();
    assert_eq!(engine.rates().energy_per_sec, 40.0);
    assert_eq!(engine.view().active_events.len(), 1);

    engine.tick(10.0);
    assert_eq!(engine.view().active_events.len(), 1);
    engine.tick(25.0);
    assert!(engine.view().active_events.is_empty());
    assert_eq!(engine.rates().energy_per_sec, 10.0);
}

#[test]
fn test_shield_blocks_negative_events() {
    let mut engine = playing(42);
    engine.gold = 1500.0;
    engine.buy_market_item(MarketItemId::Shield).unwrap();
    assert_eq!(engine.gold(), 500.0);
    assert_eq!(
        engine.buy_market_item(MarketItemId::Shield),
        Err(CommandError::BuffAlreadyActive(MarketItemId::Shield))
    );

    engine.trigger_event(RandomEventId::MarketCrash).unwrap();
    assert_eq!(engine.gold(), 500.0);
    engine.trigger_event(RandomEventId::TaxBreak).unwrap();
    assert_eq!(engine.gold(), 800.0);

    let notifications = engine.drain_notifications();
    assert!(notifications.contains(&Notification::EventBlocked {
        event: RandomEventId::MarketCrash
    }));
    assert!(engine.drain_notifications().is_empty());
}

#[test]
fn test_sell_energy() {
    let mut engine = playing(42);
    engine
        .place_building(BuildingKind::SolarPanel, Position::ground(0.0, 0.0))
        .unwrap();
    engine.tick(0.0);
    engine.tick(4.0);
    assert_eq!(engine.energy(), 20.0);

    engine.sell_energy(10.0).unwrap();
    assert_eq!(engine.energy(), 10.0);
    // price = 2 + 0.5 sin(0.04)
    assert_eq!(engine.gold(), 170.0);
    assert!(matches!(
        engine.sell_energy(100.0),
        Err(CommandError::InsufficientEnergy { .. })
    ));
    assert_eq!(engine.sell_energy(-1.0), Err(CommandError::InvalidAmount(-1.0)));
}

#[test]
fn test_bank_deposit_and_withdraw() {
    let mut engine = playing(42);
    engine.deposit(100.0).unwrap();
    assert_eq!(engine.gold(), 100.0);
    assert!(matches!(
        engine.deposit(500.0),
        Err(CommandError::InsufficientGold { .. })
    ));

    engine.tick(0.0);
    engine.tick(10.0);
    let balance = engine.view().bank_balance;
    assert!((balance - 101.0045).abs() < 1e-3, "balance {balance}");

    engine.withdraw().unwrap();
    assert_eq!(engine.gold(), 201.0);
    assert!(engine.view().bank_balance < 1.0);
    assert!(matches!(engine.withdraw(), Err(CommandError::InvalidAmount(_))));
}

// ---- Tick timing ----

#[test]
fn test_sub_minimum_ticks_lose_no_time() {
    let mut engine = playing(42);
    engine.tick(0.0);
    assert!(!engine.tick(0.3).advanced);
    let report = engine.tick(0.6);
    assert!(report.advanced);
    assert_eq!(report.dt, 0.6);
}

#[test]
fn test_pause_does_not_integrate_suspended_time() {
    let mut engine = playing(42);
    engine.tick(0.0);
    engine.tick(1.0);
    engine.pause().unwrap();
    assert!(!engine.tick(100.0).advanced);
    engine.resume().unwrap();
    assert!(!engine.tick(200.0).advanced);
    engine.tick(201.0);
    assert_eq!(engine.view().total_play_time, 2.0);
    assert_eq!(
        engine.resume(),
        Err(CommandError::WrongPhase {
            expected: GamePhase::Paused,
            actual: GamePhase::Playing
        })
    );
}

#[test]
fn test_autosave_due_once_per_interval() {
    let mut engine = playing(42);
    engine.tick(0.0);
    let due: Vec<u32> = (1..=125)
        .filter(|&second| engine.tick(f64::from(second)).save_due)
        .collect();
    assert_eq!(due, vec![60, 120]);
}

#[test]
fn test_non_finite_tick_ignored() {
    let mut engine = playing(42);
    engine.tick(0.0);
    let before = view_json(&engine);
    assert!(!engine.tick(f64::NAN).advanced);
    assert!(!engine.tick(f64::INFINITY).advanced);
    assert_eq!(view_json(&engine), before);
}

// ---- Determinism ----

fn scripted_run(seed: u64) -> Vec<String> {
    let mut engine = playing(seed);
    engine
        .place_building(BuildingKind::SolarPanel, Position::ground(12.0, -4.0))
        .unwrap();
    engine.hire_employee(EmployeeRole::Developer).unwrap();
    engine.tick(0.0);

    let mut views = Vec::new();
    for second in 1..=90 {
        if second % 15 == 0 {
            engine.trigger_random_event().unwrap();
        }
        engine.tick(f64::from(second));
        views.push(view_json(&engine));
    }
    views
}

#[test]
fn test_determinism_same_seed() {
    assert_eq!(scripted_run(12345), scripted_run(12345), "Views diverged with same seed");
}

#[test]
fn test_determinism_different_seeds() {
    assert_ne!(
        scripted_run(111),
        scripted_run(222),
        "Different seeds should produce divergent output"
    );
}

// ---- Tutorial and achievements ----

#[test]
fn test_tutorial_steps() {
    let mut engine = playing(42);
    assert_eq!(engine.view().tutorial_step, 1);
    for _ in 0..5 {
        engine.next_tutorial_step().unwrap();
    }
    assert_eq!(engine.view().tutorial_step, 6);
    engine.next_tutorial_step().unwrap();
    let view = engine.view();
    assert_eq!(view.tutorial_step, 0);
    assert!(view.tutorial_completed);
    assert_eq!(engine.next_tutorial_step(), Err(CommandError::TutorialInactive));
}

#[test]
fn test_achievements_unlock_on_tick() {
    let mut engine = playing(42);
    engine
        .place_building(BuildingKind::SolarPanel, Position::ground(0.0, 0.0))
        .unwrap();
    engine.tick(0.0);
    let report = engine.tick(1.0);
    assert_eq!(report.achievements, vec![AchievementId::FirstBuilding]);
    assert!(engine.check_achievements().is_empty());
    assert!(engine
        .drain_notifications()
        .contains(&Notification::AchievementUnlocked {
            achievement: AchievementId::FirstBuilding
        }));
}

#[test]
fn test_rivals_act_each_tick() {
    let mut engine = playing(42);
    let before = engine.rivals().to_vec();
    engine.tick(0.0);
    engine.tick(1.0);
    assert_eq!(engine.rivals().len(), before.len());
    assert!(engine.rivals().iter().all(|r| r.last_action.is_some()));

    let view = engine.view();
    for (entry, rival) in view.rivals.iter().zip(engine.rivals()) {
        assert_eq!(entry.status, rival.status());
        assert!(entry.status.starts_with(&rival.name));
    }
}

// ---- Persistence ----

#[test]
fn test_snapshot_round_trip() {
    let mut engine = playing(42);
    engine.gold = 3000.0;
    engine
        .place_building(BuildingKind::SolarPanel, Position::ground(5.0, 5.0))
        .unwrap();
    engine
        .place_building(BuildingKind::PowerStation, Position::ground(70.0, 70.0))
        .unwrap();
    engine.hire_employee(EmployeeRole::Marketer).unwrap();
    engine.start_research(TechId::WindPower).unwrap();
    engine.tick(0.0);
    engine.tick(9.0);

    let snapshot = engine.extract_snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();

    let mut restored = SimulationEngine::new(SimConfig::default());
    restored.restore_json(&json).unwrap();
    assert_eq!(restored.phase(), GamePhase::Playing);
    assert_eq!(restored.extract_snapshot(), snapshot);
    assert_eq!(restored.view().buildings[1].production_multiplier, 1.5);

    // New ids continue after the restored ones.
    let id = restored
        .place_building(BuildingKind::SolarPanel, Position::ground(-20.0, 5.0))
        .unwrap();
    assert_eq!(id, BuildingId(3));
}

#[test]
fn test_restore_defaults_missing_fields() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.restore_json("{}").unwrap();
    assert_eq!(engine.extract_snapshot(), SaveSnapshot::default());
    assert_eq!(engine.view().tutorial_step, 1);

    engine
        .restore_json(r#"{"gold": 42, "tutorial_completed": true, "buildings": "oops"}"#)
        .unwrap();
    assert_eq!(engine.gold(), 42.0);
    assert_eq!(engine.building_count(), 0);
    assert_eq!(engine.view().tutorial_step, 0);

    assert!(matches!(
        engine.restore_json("[1, 2]"),
        Err(RestoreError::NotAnObject)
    ));
    assert!(matches!(engine.restore_json("{"), Err(RestoreError::Json(_))));
    assert_eq!(engine.gold(), 42.0, "Failed restore leaves state alone");
}

#[test]
fn test_restore_extreme_counters_never_overflow() {
    let record = |id: u32, x: f64| BuildingRecord {
        id: BuildingId(id),
        kind: BuildingKind::SolarPanel,
        position: Position::ground(x, 0.0),
        level: u32::MAX,
        production_multiplier: 1.0,
    };
    let employee = |id: u32| Employee {
        id: EmployeeId(id),
        name: "Sam".to_string(),
        role: EmployeeRole::Developer,
        salary: 10.0,
        productivity: 1.0,
    };
    let snapshot = SaveSnapshot {
        gold: 1e15,
        buildings: vec![record(u32::MAX - 1, 0.0), record(u32::MAX, 20.0)],
        employees: vec![employee(u32::MAX - 1), employee(u32::MAX)],
        company_level: u32::MAX,
        battles_won: u32::MAX,
        ..Default::default()
    };
    let json = serde_json::to_string(&snapshot).unwrap();

    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.restore_json(&json).unwrap();
    assert_eq!(engine.building_count(), 1, "record with the largest id is dropped");
    assert_eq!(engine.employee_count(), 1);

    let before = view_json(&engine);
    assert!(matches!(
        engine.place_building(BuildingKind::SolarPanel, Position::ground(50.0, 50.0)),
        Err(CommandError::LimitReached(_))
    ));
    assert!(matches!(
        engine.hire_employee(EmployeeRole::Developer),
        Err(CommandError::LimitReached(_))
    ));
    assert!(matches!(
        engine.upgrade_company(),
        Err(CommandError::LimitReached(_))
    ));
    assert!(matches!(
        engine.upgrade_building(BuildingId(u32::MAX - 1)),
        Err(CommandError::LimitReached(_))
    ));
    assert_eq!(view_json(&engine), before, "rejected commands change nothing");

    engine.start_battle(MineId(1)).unwrap();
    engine.end_battle(true).unwrap();
    assert_eq!(engine.view().battles_won, u32::MAX);
    engine.tick(0.0);
    engine.tick(1.0);
}

#[test]
fn test_placement_bounds_clamped_to_indexed_map() {
    let mut engine = SimulationEngine::new(SimConfig {
        placement_bounds: 300.0,
        ..Default::default()
    });
    engine.start_game().unwrap();
    assert_eq!(engine.config().placement_bounds, 200.0);

    assert!(matches!(
        engine.place_building(BuildingKind::SolarPanel, Position::ground(250.0, 250.0)),
        Err(CommandError::OutOfBounds { .. })
    ));
    engine
        .place_building(BuildingKind::SolarPanel, Position::ground(199.0, 199.0))
        .unwrap();
    assert!(matches!(
        engine.place_building(BuildingKind::SolarPanel, Position::ground(199.5, 199.0)),
        Err(CommandError::SpacingViolation { .. })
    ));
    assert_eq!(engine.building_count(), 1);
}
