//! Player commands as engine methods.
//!
//! Every command validates all of its preconditions before mutating
//! anything, so a rejected command leaves the engine exactly as it was.

use hecs::Entity;
use rand::Rng;
use tracing::{debug, info, warn};

use tycoon_core::catalog::achievements::AchievementId;
use tycoon_core::catalog::buildings::{
    building_spec, demolition_refund, effective_cost, missing_unlock, upgrade_cost,
};
use tycoon_core::catalog::market::{market_item, sale_proceeds, MarketItemId};
use tycoon_core::catalog::mines::mine_site;
use tycoon_core::catalog::random_events::{random_event, EventInputs, RandomEventId, RANDOM_EVENTS};
use tycoon_core::catalog::techs::{combat_multiplier, missing_prerequisites, tech_node, TechId};
use tycoon_core::catalog::{company_upgrade_cost, hire_cost};
use tycoon_core::commands::PlayerCommand;
use tycoon_core::components::{Employee, Structure};
use tycoon_core::constants::*;
use tycoon_core::enums::*;
use tycoon_core::error::{CommandError, RestoreError};
use tycoon_core::events::Notification;
use tycoon_core::state::{ActiveEvent, EventSource, SaveSnapshot};
use tycoon_core::types::{BuildingId, EmployeeId, MineId, Position};
use tycoon_spatial::QPoint;

use crate::combat::{self, AttackOutcome};
use crate::engine::SimulationEngine;
use crate::placement;
use crate::systems::research::ResearchSlot;
use crate::systems::snapshot::build_buildings;
use crate::systems::timed_events::{buff_active, shield_active};
use crate::world_setup;

impl SimulationEngine {
    /// Apply one command. A rejection is logged at debug and changes nothing.
    pub fn execute(&mut self, command: PlayerCommand) -> Result<(), CommandError> {
        let result = self.dispatch(&command);
        if let Err(err) = &result {
            debug!(target: "sim.command", ?command, error = %err, "command rejected");
        }
        result
    }

    fn dispatch(&mut self, command: &PlayerCommand) -> Result<(), CommandError> {
        match *command {
            PlayerCommand::StartGame => self.start_game(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Resume => self.resume(),
            PlayerCommand::PlaceBuilding { kind, position } => {
                self.place_building(kind, position).map(drop)
            }
            PlayerCommand::UpgradeBuilding { id } => self.upgrade_building(id),
            PlayerCommand::RemoveBuilding { id } => self.remove_building(id),
            PlayerCommand::HireEmployee { role } => self.hire_employee(role).map(drop),
            PlayerCommand::FireEmployee { id } => self.fire_employee(id),
            PlayerCommand::UpgradeCompany => self.upgrade_company(),
            PlayerCommand::StartBattle { mine } => self.start_battle(mine),
            PlayerCommand::Attack => self.attack().map(drop),
            PlayerCommand::EndBattle { won } => self.end_battle(won),
            PlayerCommand::Flee => self.flee(),
            PlayerCommand::StartResearch { tech } => self.start_research(tech),
            PlayerCommand::CancelResearch => self.cancel_research(),
            PlayerCommand::TriggerRandomEvent => self.trigger_random_event().map(drop),
            PlayerCommand::SellEnergy { amount } => self.sell_energy(amount),
            PlayerCommand::Deposit { amount } => self.deposit(amount),
            PlayerCommand::Withdraw => self.withdraw(),
            PlayerCommand::BuyMarketItem { item } => self.buy_market_item(item),
            PlayerCommand::NextTutorialStep => self.next_tutorial_step(),
            PlayerCommand::SkipTutorial => self.skip_tutorial(),
            PlayerCommand::CheckAchievements => {
                self.check_achievements();
                Ok(())
            }
        }
    }

    // --- Game flow ---

    /// Begin a new game from the menu.
    pub fn start_game(&mut self) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Menu)?;
        self.reset();
        self.phase = GamePhase::Playing;
        self.tutorial_step = 1;
        info!(target: "sim.command", seed = self.config.seed, "game started");
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        self.phase = GamePhase::Paused;
        Ok(())
    }

    /// Resume play. Time spent paused is not integrated.
    pub fn resume(&mut self) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Paused)?;
        self.phase = GamePhase::Playing;
        self.last_tick = None;
        Ok(())
    }

    // --- Construction ---

    pub fn place_building(
        &mut self,
        kind: BuildingKind,
        position: Position,
    ) -> Result<BuildingId, CommandError> {
        self.require_phase(GamePhase::Playing)?;
        placement::check_bounds(&position, self.config.placement_bounds)?;
        if let Some(tech) = missing_unlock(kind, &self.unlocked_techs) {
            return Err(CommandError::BuildingLocked { kind, tech });
        }
        let cost = effective_cost(kind, &self.unlocked_techs);
        self.require_gold(cost)?;
        placement::check_spacing(&self.spatial, &self.world, &position, self.config.min_spacing)?;
        let next = self
            .next_building_id
            .checked_add(1)
            .ok_or(CommandError::LimitReached("building id"))?;

        let id = BuildingId(self.next_building_id);
        self.next_building_id = next;
        self.gold -= cost;
        self.energy_capacity += building_spec(kind).capacity_bonus;
        world_setup::spawn_building(&mut self.world, id, kind, position);
        if !self.spatial.insert(QPoint::at(id, &position)) {
            warn!(target: "sim.spatial", building = %id, "insert rejected, rebuilding index");
            placement::rebuild(&mut self.spatial, &self.world);
        }

        debug!(target: "sim.command", building = %id, %kind, cost, "building placed");
        Ok(id)
    }

    /// Raise a building one level for `base_cost × level` gold.
    pub fn upgrade_building(&mut self, id: BuildingId) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        let (entity, structure) = self
            .find_building(id)
            .ok_or(CommandError::UnknownBuilding(id))?;
        let level = structure
            .level
            .checked_add(1)
            .ok_or(CommandError::LimitReached("building level"))?;
        let cost = upgrade_cost(structure.kind, structure.level);
        self.require_gold(cost)?;

        let structure = self
            .world
            .query_one_mut::<&mut Structure>(entity)
            .map_err(|_| CommandError::UnknownBuilding(id))?;
        structure.level = level;
        self.gold -= cost;
        Ok(())
    }

    /// Demolish a building for half its base cost and withdraw its capacity.
    pub fn remove_building(&mut self, id: BuildingId) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        let (entity, structure) = self
            .find_building(id)
            .ok_or(CommandError::UnknownBuilding(id))?;
        self.world
            .despawn(entity)
            .map_err(|_| CommandError::UnknownBuilding(id))?;

        self.gold += demolition_refund(structure.kind);
        self.energy_capacity = (self.energy_capacity - building_spec(structure.kind).capacity_bonus)
            .max(BASE_ENERGY_CAPACITY);
        self.energy = self.energy.min(self.energy_capacity);
        if !self.spatial.remove(id) {
            placement::rebuild(&mut self.spatial, &self.world);
        }
        Ok(())
    }

    // --- Company ---

    pub fn hire_employee(&mut self, role: EmployeeRole) -> Result<EmployeeId, CommandError> {
        self.require_phase(GamePhase::Playing)?;
        let cost = hire_cost(role);
        self.require_gold(cost)?;
        let next = self
            .next_employee_id
            .checked_add(1)
            .ok_or(CommandError::LimitReached("employee id"))?;

        let id = EmployeeId(self.next_employee_id);
        self.next_employee_id = next;
        let employee = world_setup::roll_employee(&mut self.rng, id, role);
        debug!(target: "sim.command", employee = %id, name = %employee.name, "employee hired");
        self.world.spawn((employee,));
        self.gold -= cost;
        Ok(id)
    }

    /// Let an employee go. There is no refund.
    pub fn fire_employee(&mut self, id: EmployeeId) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        let entity = self
            .world
            .query::<&Employee>()
            .iter()
            .find(|(_, e)| e.id == id)
            .map(|(entity, _)| entity)
            .ok_or(CommandError::UnknownEmployee(id))?;
        self.world
            .despawn(entity)
            .map_err(|_| CommandError::UnknownEmployee(id))
    }

    pub fn upgrade_company(&mut self) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        let cost = company_upgrade_cost(self.company_level)
            .ok_or(CommandError::LimitReached("company level"))?;
        self.require_gold(cost)?;
        self.gold -= cost;
        self.company_level += 1;
        Ok(())
    }

    // --- Combat ---

    /// Open an encounter at `mine`. The economy stops until it ends.
    pub fn start_battle(&mut self, mine: MineId) -> Result<(), CommandError> {
        if self.phase == GamePhase::Battle {
            return Err(CommandError::BattleInProgress);
        }
        self.require_phase(GamePhase::Playing)?;
        let site = mine_site(mine).ok_or(CommandError::UnknownMine(mine))?;
        if self.unlocked_mines.contains(&mine) {
            return Err(CommandError::MineAlreadyConquered(mine));
        }

        let stats = combat::player_stats(
            self.building_count(),
            self.employee_count(),
            combat_multiplier(&self.unlocked_techs),
        );
        let battle = combat::open_battle(site, stats, &mut self.rng);
        info!(
            target: "sim.combat",
            %mine,
            enemy_health = battle.enemy_health,
            enemy_attack = battle.enemy_attack,
            "battle started"
        );
        self.battle = Some(battle);
        self.phase = GamePhase::Battle;
        Ok(())
    }

    /// One simultaneous exchange. Ends the battle when either side falls.
    pub fn attack(&mut self) -> Result<AttackOutcome, CommandError> {
        let battle = self.battle.ok_or(CommandError::NoActiveBattle)?;
        let (next, outcome) = combat::exchange(&battle, &mut self.rng);
        self.battle = Some(next);
        match outcome {
            AttackOutcome::Won => self.finish_battle(BattleOutcome::Won),
            AttackOutcome::Lost => self.finish_battle(BattleOutcome::Lost),
            AttackOutcome::Ongoing { .. } => {}
        }
        Ok(outcome)
    }

    /// Close the encounter with a result decided by the driver.
    pub fn end_battle(&mut self, won: bool) -> Result<(), CommandError> {
        if self.battle.is_none() {
            return Err(CommandError::NoActiveBattle);
        }
        self.finish_battle(if won {
            BattleOutcome::Won
        } else {
            BattleOutcome::Lost
        });
        Ok(())
    }

    pub fn flee(&mut self) -> Result<(), CommandError> {
        if self.battle.is_none() {
            return Err(CommandError::NoActiveBattle);
        }
        self.finish_battle(BattleOutcome::Fled);
        Ok(())
    }

    fn finish_battle(&mut self, outcome: BattleOutcome) {
        let Some(battle) = self.battle.take() else {
            return;
        };
        self.phase = GamePhase::Playing;
        self.last_tick = None;

        let bounty = if outcome == BattleOutcome::Won {
            if !self.unlocked_mines.contains(&battle.mine) {
                self.unlocked_mines.push(battle.mine);
            }
            self.battles_won = self.battles_won.saturating_add(1);
            self.gold += BATTLE_BOUNTY;
            BATTLE_BOUNTY
        } else {
            0.0
        };
        info!(target: "sim.combat", mine = %battle.mine, ?outcome, "battle ended");
        self.notify(Notification::BattleEnded {
            mine: battle.mine,
            outcome,
            bounty,
        });
    }

    // --- Research ---

    pub fn start_research(&mut self, tech: TechId) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        if self.unlocked_techs.contains(&tech) {
            return Err(CommandError::AlreadyResearched(tech));
        }
        if let Some(slot) = self.research {
            return Err(CommandError::ResearchInProgress(slot.tech));
        }
        let missing = missing_prerequisites(tech, &self.unlocked_techs);
        if !missing.is_empty() {
            return Err(CommandError::PrerequisitesMissing { tech, missing });
        }
        let cost = f64::from(tech_node(tech).cost);
        self.require_gold(cost)?;

        self.gold -= cost;
        self.research = Some(ResearchSlot::new(tech));
        info!(target: "sim.research", %tech, "research started");
        Ok(())
    }

    /// Abandon the active research for half its cost back.
    pub fn cancel_research(&mut self) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        let slot = self.research.take().ok_or(CommandError::NoActiveResearch)?;
        let refund = (f64::from(tech_node(slot.tech).cost) * RESEARCH_REFUND_RATIO).floor();
        self.gold += refund;
        info!(target: "sim.research", tech = %slot.tech, refund, "research cancelled");
        Ok(())
    }

    // --- Events and market ---

    /// Fire a uniformly chosen random event.
    pub fn trigger_random_event(&mut self) -> Result<RandomEventId, CommandError> {
        self.require_phase(GamePhase::Playing)?;
        let id = RANDOM_EVENTS[self.rng.gen_range(0..RANDOM_EVENTS.len())].id;
        self.trigger_event(id)?;
        Ok(id)
    }

    /// Fire a specific event. Negative events are absorbed while a shield runs.
    pub fn trigger_event(&mut self, id: RandomEventId) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        let def = random_event(id);
        if def.sentiment == Sentiment::Negative && shield_active(&self.active_events) {
            info!(target: "sim.events", event = %id, "event blocked by shield");
            self.notify(Notification::EventBlocked { event: id });
            return Ok(());
        }

        let roll: f64 = self.rng.gen();
        let delta = def.resolve(
            &EventInputs {
                gold: self.gold,
                building_count: self.building_count(),
            },
            roll,
        );
        if let Some(gold) = delta.gold {
            self.gold = gold.max(0.0);
        }
        if let Some(energy) = delta.energy {
            self.energy = energy.clamp(0.0, self.energy_capacity);
        }
        if let Some(index) = delta.downgrade {
            if let Some(record) = build_buildings(&self.world).get(index) {
                if let Some((entity, _)) = self.find_building(record.id) {
                    if let Ok(structure) = self.world.query_one_mut::<&mut Structure>(entity) {
                        structure.level = structure.level.saturating_sub(1).max(1);
                    }
                }
            }
        }
        if let Some((multiplier, duration)) = delta.boost {
            let event = ActiveEvent {
                id: self.next_event_id(id.as_str()),
                source: EventSource::Random(id),
                title: def.title.to_string(),
                icon: def.icon.to_string(),
                ends_at: self.clock + duration,
                multipliers: vec![multiplier],
            };
            self.active_events.push(event);
        }

        info!(target: "sim.events", event = %id, sentiment = ?def.sentiment, "random event");
        self.notify(Notification::RandomEvent {
            event: id,
            sentiment: def.sentiment,
        });
        Ok(())
    }

    /// Buy a timed buff. A buff that is still running cannot be stacked.
    pub fn buy_market_item(&mut self, item: MarketItemId) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        if buff_active(&self.active_events, item) {
            return Err(CommandError::BuffAlreadyActive(item));
        }
        let def = market_item(item);
        let cost = f64::from(def.cost);
        self.require_gold(cost)?;

        self.gold -= cost;
        let event = ActiveEvent {
            id: self.next_event_id(&item.to_string()),
            source: EventSource::Market(item),
            title: def.name.to_string(),
            icon: def.icon.to_string(),
            ends_at: self.clock + def.duration_secs,
            multipliers: def.boost.into_iter().collect(),
        };
        self.active_events.push(event);
        self.notify(Notification::BuffPurchased { item });
        Ok(())
    }

    fn next_event_id(&mut self, prefix: &str) -> String {
        let seq = self.next_event_seq;
        self.next_event_seq = self.next_event_seq.wrapping_add(1);
        format!("{prefix}_{seq}")
    }

    // --- Trade and bank ---

    /// Sell `amount` energy at the current market price.
    pub fn sell_energy(&mut self, amount: f64) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        if !(amount.is_finite() && amount > 0.0) {
            return Err(CommandError::InvalidAmount(amount));
        }
        if self.energy < amount {
            return Err(CommandError::InsufficientEnergy {
                needed: amount,
                available: self.energy,
            });
        }
        let gold = sale_proceeds(amount, self.total_play_time);
        self.energy -= amount;
        self.gold += gold;
        self.notify(Notification::EnergySold { amount, gold });
        Ok(())
    }

    pub fn deposit(&mut self, amount: f64) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        if !(amount.is_finite() && amount > 0.0) {
            return Err(CommandError::InvalidAmount(amount));
        }
        self.require_gold(amount)?;
        self.gold -= amount;
        self.bank_balance += amount;
        Ok(())
    }

    /// Move the floored bank balance back into gold. Fractions stay banked.
    pub fn withdraw(&mut self) -> Result<(), CommandError> {
        self.require_phase(GamePhase::Playing)?;
        let amount = self.bank_balance.floor();
        if amount < 1.0 {
            return Err(CommandError::InvalidAmount(self.bank_balance));
        }
        self.bank_balance -= amount;
        self.gold += amount;
        Ok(())
    }

    // --- Tutorial and progress ---

    pub fn next_tutorial_step(&mut self) -> Result<(), CommandError> {
        if self.tutorial_completed || self.tutorial_step == 0 {
            return Err(CommandError::TutorialInactive);
        }
        self.tutorial_step += 1;
        if self.tutorial_step > TUTORIAL_STEPS {
            self.tutorial_step = 0;
            self.tutorial_completed = true;
        }
        Ok(())
    }

    pub fn skip_tutorial(&mut self) -> Result<(), CommandError> {
        self.tutorial_step = 0;
        self.tutorial_completed = true;
        Ok(())
    }

    /// Evaluate achievements outside the tick.
    pub fn check_achievements(&mut self) -> Vec<AchievementId> {
        self.evaluate_achievements()
    }

    // --- Persistence ---

    /// Replace all state with a persisted snapshot and enter the playing phase.
    ///
    /// Battles, active events, and rivals are not persisted and start fresh.
    pub fn restore(&mut self, snapshot: SaveSnapshot) {
        self.reset();
        self.energy_capacity = snapshot.energy_capacity.max(BASE_ENERGY_CAPACITY);
        self.gold = snapshot.gold.max(0.0);
        self.energy = snapshot.energy.clamp(0.0, self.energy_capacity);
        self.bank_balance = snapshot.bank_balance.max(0.0);
        self.company_level = snapshot.company_level;
        self.unlocked_mines = snapshot.unlocked_mines;
        self.unlocked_techs = snapshot.unlocked_techs;
        self.research = snapshot
            .current_research
            .filter(|tech| !self.unlocked_techs.contains(tech))
            .map(|tech| ResearchSlot {
                tech,
                progress: snapshot.research_progress.clamp(0.0, 1.0),
            });
        self.unlocked_achievements = snapshot.unlocked_achievements;
        self.battles_won = snapshot.battles_won;
        self.total_play_time = snapshot.total_play_time.max(0.0);
        self.day_time = snapshot.day_time.rem_euclid(1.0);
        self.tutorial_completed = snapshot.tutorial_completed;
        self.tutorial_step = if snapshot.tutorial_completed { 0 } else { 1 };

        let (next_building, next_employee) =
            world_setup::populate(&mut self.world, &snapshot.buildings, &snapshot.employees);
        self.next_building_id = next_building;
        self.next_employee_id = next_employee;
        placement::rebuild(&mut self.spatial, &self.world);

        self.phase = GamePhase::Playing;
        info!(
            target: "sim.persist",
            buildings = self.building_count(),
            employees = self.employee_count(),
            "snapshot restored"
        );
    }

    /// Restore from JSON, defaulting any missing or malformed field.
    pub fn restore_json(&mut self, json: &str) -> Result<(), RestoreError> {
        let snapshot = SaveSnapshot::from_json_lenient(json)?;
        self.restore(snapshot);
        Ok(())
    }

    // --- Helpers ---

    fn require_phase(&self, expected: GamePhase) -> Result<(), CommandError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(CommandError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn require_gold(&self, needed: f64) -> Result<(), CommandError> {
        if self.gold >= needed {
            Ok(())
        } else {
            Err(CommandError::InsufficientGold {
                needed,
                available: self.gold,
            })
        }
    }

    fn find_building(&self, id: BuildingId) -> Option<(Entity, Structure)> {
        self.world
            .query::<&Structure>()
            .iter()
            .find(|(_, s)| s.id == id)
            .map(|(entity, s)| (entity, *s))
    }
}
