#[cfg(test)]
mod tests {
    use crate::catalog::achievements::{self, AchievementId, Progress, ACHIEVEMENTS};
    use crate::catalog::buildings::{self, building_spec};
    use crate::catalog::market::{self, MarketItemId, MARKET_ITEMS};
    use crate::catalog::mines::{self, MINES};
    use crate::catalog::random_events::{
        random_event, EventInputs, RandomEventId, RANDOM_EVENTS,
    };
    use crate::catalog::regions::{self, RegionId};
    use crate::catalog::techs::{self, TechEffect, TechId, TechNode, TechTarget, TECH_TREE};
    use crate::commands::PlayerCommand;
    use crate::enums::*;
    use crate::error::RestoreError;
    use crate::state::{MultiplierKey, SaveSnapshot};
    use crate::types::{BuildingId, MineId, Position};

    #[test]
    fn test_building_kind_serde() {
        for kind in BuildingKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: BuildingKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, back);
        }
    }

    #[test]
    fn test_player_command_wire_format() {
        let json = r#"{"type":"PlaceBuilding","kind":"solar_panel","position":{"x":10.0,"y":0.0,"z":10.0}}"#;
        let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            PlayerCommand::PlaceBuilding {
                kind: BuildingKind::SolarPanel,
                position: Position::new(10.0, 0.0, 10.0),
            }
        );

        let cmd: PlayerCommand =
            serde_json::from_str(r#"{"type":"StartResearch","tech":"smart_grid"}"#).unwrap();
        assert_eq!(
            cmd,
            PlayerCommand::StartResearch {
                tech: TechId::SmartGrid
            }
        );

        let cmd: PlayerCommand = serde_json::from_str(r#"{"type":"StartBattle","mine":3}"#).unwrap();
        assert_eq!(cmd, PlayerCommand::StartBattle { mine: MineId(3) });
    }

    #[test]
    fn test_tables_indexed_by_declaration_order() {
        for (i, node) in TECH_TREE.iter().enumerate() {
            assert_eq!(node.id as usize, i, "tech {} out of order", node.id);
        }
        for (i, def) in RANDOM_EVENTS.iter().enumerate() {
            assert_eq!(def.id as usize, i, "event {} out of order", def.id);
        }
        for (i, item) in MARKET_ITEMS.iter().enumerate() {
            assert_eq!(item.id as usize, i, "market item {} out of order", item.id);
        }
        for (i, def) in ACHIEVEMENTS.iter().enumerate() {
            assert_eq!(def.id as usize, i, "achievement {:?} out of order", def.id);
        }
    }

    #[test]
    fn test_unlock_effects_match_building_gates() {
        for node in TECH_TREE {
            if let TechEffect::UnlockBuilding(kind) = node.effect {
                assert_eq!(
                    building_spec(kind).required_tech,
                    Some(node.id),
                    "{kind} should be gated by {}",
                    node.id
                );
            }
        }
    }

    #[test]
    fn test_prerequisites_reference_earlier_techs() {
        for node in TECH_TREE {
            for req in node.requires {
                assert!(
                    (*req as usize) < (node.id as usize),
                    "{} requires later tech {}",
                    node.id,
                    req
                );
            }
        }
    }

    #[test]
    fn test_tech_boost_composes_multiplicatively() {
        let tree = [
            TechNode {
                id: TechId::SolarEfficiency,
                name: "A",
                cost: 1,
                research_secs: 1.0,
                requires: &[],
                effect: TechEffect::ProductionBoost {
                    target: TechTarget::Building(BuildingKind::SolarPanel),
                    factor: 1.5,
                },
            },
            TechNode {
                id: TechId::WindPower,
                name: "B",
                cost: 1,
                research_secs: 1.0,
                requires: &[],
                effect: TechEffect::ProductionBoost {
                    target: TechTarget::Building(BuildingKind::SolarPanel),
                    factor: 1.5,
                },
            },
        ];
        let unlocked = [TechId::SolarEfficiency, TechId::WindPower];
        let boost = techs::tech_boost_in(&tree, BuildingKind::SolarPanel, &unlocked);
        assert!((boost - 2.25).abs() < 1e-12, "expected 2.25, got {boost}");
        assert_eq!(
            techs::tech_boost_in(&tree, BuildingKind::WindTurbine, &unlocked),
            1.0
        );
    }

    #[test]
    fn test_tech_boost_all_energy_bucket() {
        let unlocked = [TechId::SolarEfficiency, TechId::SmartGrid];
        let solar = techs::tech_boost(BuildingKind::SolarPanel, &unlocked);
        assert!((solar - 1.5 * 1.3).abs() < 1e-12);
        assert!((techs::tech_boost(BuildingKind::Geothermal, &unlocked) - 1.3).abs() < 1e-12);
        // Consumers and storage are outside the energy bucket.
        assert_eq!(techs::tech_boost(BuildingKind::GoldMine, &unlocked), 1.0);
        assert_eq!(techs::tech_boost(BuildingKind::BatteryStorage, &unlocked), 1.0);
        assert_eq!(techs::tech_boost(BuildingKind::SolarPanel, &[]), 1.0);

        for kind in BuildingKind::ALL {
            assert_eq!(
                TechTarget::AllEnergy.covers(kind),
                building_spec(kind).produces_energy(),
                "{kind}"
            );
        }
    }

    #[test]
    fn test_effective_cost_with_cost_reduction() {
        assert_eq!(buildings::effective_cost(BuildingKind::WindTurbine, &[]), 100.0);
        let unlocked = [TechId::CostOptimization];
        assert_eq!(buildings::effective_cost(BuildingKind::WindTurbine, &unlocked), 80.0);
        // 50 * 0.8 = 40, 1500 * 0.8 = 1200
        assert_eq!(buildings::effective_cost(BuildingKind::SolarPanel, &unlocked), 40.0);
        assert_eq!(buildings::effective_cost(BuildingKind::EnergyTrader, &unlocked), 1200.0);
    }

    #[test]
    fn test_upgrade_and_refund_costs() {
        assert_eq!(buildings::upgrade_cost(BuildingKind::SolarPanel, 1), 50.0);
        assert_eq!(buildings::upgrade_cost(BuildingKind::SolarPanel, 3), 150.0);
        assert_eq!(buildings::demolition_refund(BuildingKind::SolarPanel), 25.0);
        assert_eq!(buildings::demolition_refund(BuildingKind::WindTurbine), 50.0);
    }

    #[test]
    fn test_missing_unlock() {
        assert_eq!(buildings::missing_unlock(BuildingKind::SolarPanel, &[]), None);
        assert_eq!(
            buildings::missing_unlock(BuildingKind::BatteryStorage, &[]),
            Some(TechId::BatteryTech)
        );
        assert_eq!(
            buildings::missing_unlock(BuildingKind::BatteryStorage, &[TechId::BatteryTech]),
            None
        );
    }

    #[test]
    fn test_missing_prerequisites() {
        assert_eq!(
            techs::missing_prerequisites(TechId::ResearchFacility, &[TechId::WindPower]),
            vec![TechId::SolarEfficiency]
        );
        assert!(techs::missing_prerequisites(TechId::SolarEfficiency, &[]).is_empty());
    }

    #[test]
    fn test_combat_multiplier() {
        assert_eq!(techs::combat_multiplier(&[]), 1.0);
        assert_eq!(techs::combat_multiplier(&[TechId::MilitaryTraining]), 1.5);
    }

    #[test]
    fn test_day_phase_bands() {
        assert_eq!(DayPhase::from_day_time(0.0), DayPhase::Night);
        assert_eq!(DayPhase::from_day_time(0.19), DayPhase::Night);
        assert_eq!(DayPhase::from_day_time(0.25), DayPhase::Dawn);
        assert_eq!(DayPhase::from_day_time(0.35), DayPhase::Day);
        assert_eq!(DayPhase::from_day_time(0.75), DayPhase::Dusk);
        assert_eq!(DayPhase::from_day_time(0.81), DayPhase::Night);
        assert!(!DayPhase::from_day_time(0.8).is_night());
    }

    #[test]
    fn test_region_modifiers() {
        let city = regions::region_modifiers(&Position::ground(80.0, -70.0));
        assert_eq!(city.gold, 1.3);
        assert_eq!(city.energy, 1.0);

        let edge = Position::ground(70.0 + 25.0, 70.0);
        assert_eq!(
            regions::region_at(&edge).map(|r| r.id),
            Some(RegionId::Factory),
            "region boundary is inclusive"
        );

        let nowhere = regions::region_modifiers(&Position::ground(0.0, 0.0));
        assert_eq!(nowhere, regions::RegionModifiers::default());
    }

    #[test]
    fn test_mine_difficulty_scale() {
        assert_eq!(mines::difficulty_scale(1), 1.0);
        assert_eq!(mines::difficulty_scale(5), 2.0);
        assert_eq!(mines::difficulty_scale(0), 1.0);
        assert_eq!(MINES.len(), 8);
        assert!(mines::mine_site(MineId(9)).is_none());
        assert_eq!(mines::mine_site(MineId(4)).map(|m| m.difficulty), Some(4));
    }

    #[test]
    fn test_achievement_predicates() {
        let progress = Progress {
            building_count: 5,
            gold: 1200.0,
            ..Default::default()
        };
        let fresh = achievements::newly_satisfied(&progress, &[]);
        assert_eq!(
            fresh,
            vec![
                AchievementId::FirstBuilding,
                AchievementId::Builder5,
                AchievementId::Gold1000
            ]
        );

        let again = achievements::newly_satisfied(&progress, &fresh);
        assert!(again.is_empty(), "unlocked ids are never reported twice");

        let seven = Progress {
            mines_unlocked: 7,
            ..Default::default()
        };
        assert!(!achievements::newly_satisfied(&seven, &[]).contains(&AchievementId::MineAll));
    }

    #[test]
    fn test_achievement_id_serde_names() {
        let json = serde_json::to_string(&AchievementId::Builder15).unwrap();
        assert_eq!(json, "\"builder_15\"");
        let back: AchievementId = serde_json::from_str("\"mine_all\"").unwrap();
        assert_eq!(back, AchievementId::MineAll);
    }

    #[test]
    fn test_random_event_resolution() {
        let inputs = EventInputs {
            gold: 1000.0,
            building_count: 4,
        };
        let crash = random_event(RandomEventId::MarketCrash).resolve(&inputs, 0.0);
        assert_eq!(crash.gold, Some(800.0));

        let rush = random_event(RandomEventId::GoldRush).resolve(&inputs, 0.0);
        assert_eq!(rush.gold, Some(1500.0));

        let quake = random_event(RandomEventId::Earthquake).resolve(&inputs, 0.99);
        assert_eq!(quake.downgrade, Some(3));

        let empty = EventInputs {
            gold: 0.0,
            building_count: 0,
        };
        let quake = random_event(RandomEventId::Earthquake).resolve(&empty, 0.5);
        assert_eq!(quake.downgrade, None);

        let flare = random_event(RandomEventId::SolarFlare).resolve(&inputs, 0.0);
        let (mult, secs) = flare.boost.unwrap();
        assert_eq!(mult.key, MultiplierKey::Building(BuildingKind::SolarPanel));
        assert_eq!(mult.factor, 3.0);
        assert_eq!(secs, 30.0);
    }

    #[test]
    fn test_timed_events_carry_durations() {
        for def in RANDOM_EVENTS {
            let timed = matches!(
                def.effect,
                crate::catalog::random_events::EventEffect::Boost(_)
            );
            assert_eq!(timed, def.duration_secs.is_some(), "{}", def.id);
        }
    }

    #[test]
    fn test_market_price_and_bank() {
        assert_eq!(market::energy_price(0.0), 2.0);
        let peak = market::energy_price(std::f64::consts::FRAC_PI_2 / 0.01);
        assert!((peak - 2.5).abs() < 1e-9);
        assert_eq!(market::sale_proceeds(10.0, 0.0), 20.0);

        let grown = market::bank_growth(1000.0, 1.0);
        assert!((grown - 1001.0).abs() < 1e-9);
        assert!(market::market_item(MarketItemId::Shield).blocks_negative_events);
    }

    #[test]
    fn test_snapshot_defaults_for_missing_fields() {
        let snap = SaveSnapshot::from_json_lenient(r#"{"gold": 999}"#).unwrap();
        assert_eq!(snap.gold, 999.0);
        assert_eq!(snap.energy_capacity, 100.0);
        assert_eq!(snap.company_level, 0);
        assert_eq!(snap.day_time, 0.35);
        assert!(snap.buildings.is_empty());
    }

    #[test]
    fn test_snapshot_malformed_fields_default() {
        let json = r#"{
            "gold": "lots",
            "energy": 500,
            "energy_capacity": 200,
            "unlocked_techs": ["solar_efficiency", "warp_drive", "solar_efficiency"],
            "buildings": [
                {"id": 1, "type": "solar_panel", "position": {"x": 1, "y": 0, "z": 2}, "level": 0},
                {"id": 2, "type": "moon_base", "position": {"x": 5, "y": 0, "z": 5}}
            ],
            "research_progress": -3
        }"#;
        let snap = SaveSnapshot::from_json_lenient(json).unwrap();
        assert_eq!(snap.gold, 200.0);
        assert_eq!(snap.energy, 200.0, "energy clamps to capacity");
        assert_eq!(snap.unlocked_techs, vec![TechId::SolarEfficiency]);
        assert_eq!(snap.buildings.len(), 1);
        assert_eq!(snap.buildings[0].id, BuildingId(1));
        assert_eq!(snap.buildings[0].level, 1);
        assert_eq!(snap.research_progress, 0.0);
    }

    #[test]
    fn test_snapshot_rejects_non_objects() {
        assert!(matches!(
            SaveSnapshot::from_json_lenient("[1, 2, 3]"),
            Err(RestoreError::NotAnObject)
        ));
        assert!(matches!(
            SaveSnapshot::from_json_lenient("not json"),
            Err(RestoreError::Json(_))
        ));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut snap = SaveSnapshot::default();
        snap.gold = 1234.0;
        snap.unlocked_mines = vec![MineId(1), MineId(2)];
        snap.current_research = Some(TechId::WindPower);
        snap.research_progress = 0.4;
        let json = serde_json::to_string(&snap).unwrap();
        let back = SaveSnapshot::from_json_lenient(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn test_rival_action_order() {
        assert_eq!(RivalAction::ALL[0], RivalAction::Build);
        assert_eq!(RivalAction::ALL[5], RivalAction::Idle);
        assert_eq!(
            RivalAction::PriceCut.describe("VoltEx"),
            "VoltEx cut prices!"
        );
    }

    #[test]
    fn test_hire_and_company_costs() {
        assert_eq!(crate::catalog::hire_cost(EmployeeRole::Developer), 100.0);
        assert_eq!(crate::catalog::company_upgrade_cost(1), Some(1000.0));
        assert_eq!(crate::catalog::company_upgrade_cost(u32::MAX), None);
    }
}
