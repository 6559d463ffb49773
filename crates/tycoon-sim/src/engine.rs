//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, applies player commands,
//! runs the economic tick, and produces `GameView`s and `SaveSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, warn};

use tycoon_core::catalog::achievements::{AchievementId, Progress};
use tycoon_core::catalog::market::bank_growth;
use tycoon_core::catalog::techs::{tech_node, TechEffect, TechId};
use tycoon_core::components::{Employee, Structure};
use tycoon_core::constants::*;
use tycoon_core::enums::{BuildingKind, GamePhase};
use tycoon_core::events::Notification;
use tycoon_core::rival::Rival;
use tycoon_core::state::{ActiveEvent, BattleState, GameView, SaveSnapshot};
use tycoon_core::types::{BuildingId, MineId};
use tycoon_rival_ai::{default_rivals, MarketSignal};
use tycoon_spatial::Quadtree;

use crate::config::SimConfig;
use crate::placement;
use crate::systems;
use crate::systems::production::{ProductionContext, Rates};
use crate::systems::research::{ResearchSlot, ResearchStep};
use crate::systems::timed_events::EventMultipliers;

/// What one call to [`SimulationEngine::tick`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// False when the call was a no-op (not playing, anchoring, below the
    /// minimum interval, or discarded).
    pub advanced: bool,
    pub dt: f64,
    /// Total play time crossed an autosave boundary. The host decides how to save.
    pub save_due: bool,
    pub completed_research: Option<TechId>,
    pub achievements: Vec<AchievementId>,
}

/// Everything a tick changes, computed before anything is committed.
#[derive(Debug, Clone)]
struct TickPlan {
    dt: f64,
    day_time: f64,
    active_events: Vec<ActiveEvent>,
    gold: f64,
    energy: f64,
    energy_capacity: f64,
    bank_balance: f64,
    research: Option<ResearchSlot>,
    completed: Option<TechId>,
    total_play_time: f64,
}

impl TickPlan {
    fn is_finite(&self) -> bool {
        [
            self.day_time,
            self.gold,
            self.energy,
            self.energy_capacity,
            self.bank_balance,
            self.total_play_time,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.research.map_or(true, |slot| slot.progress.is_finite())
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    pub(crate) config: SimConfig,
    pub(crate) world: World,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) phase: GamePhase,

    // --- Resources ---
    pub(crate) gold: f64,
    pub(crate) energy: f64,
    pub(crate) energy_capacity: f64,
    pub(crate) bank_balance: f64,
    pub(crate) company_level: u32,

    // --- Progression ---
    pub(crate) unlocked_mines: Vec<MineId>,
    pub(crate) unlocked_techs: Vec<TechId>,
    pub(crate) research: Option<ResearchSlot>,
    pub(crate) unlocked_achievements: Vec<AchievementId>,
    pub(crate) battles_won: u32,
    pub(crate) tutorial_step: u8,
    pub(crate) tutorial_completed: bool,

    // --- Transient ---
    pub(crate) active_events: Vec<ActiveEvent>,
    pub(crate) battle: Option<BattleState>,
    pub(crate) rivals: Vec<Rival>,
    pub(crate) day_time: f64,
    pub(crate) total_play_time: f64,
    pub(crate) spatial: Quadtree<BuildingId>,
    pub(crate) next_building_id: u32,
    pub(crate) next_employee_id: u32,
    pub(crate) next_event_seq: u32,
    /// Wall-clock second of the last executed tick. `None` until anchored.
    pub(crate) last_tick: Option<f64>,
    /// Latest wall-clock second seen by `tick`.
    pub(crate) clock: f64,
    pub(crate) notifications: VecDeque<Notification>,
}

impl SimulationEngine {
    /// Create a new simulation engine in the menu phase.
    pub fn new(config: SimConfig) -> Self {
        let config = config.sanitized();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let spatial = placement::new_index(&config);
        Self {
            config,
            world: World::new(),
            rng,
            phase: GamePhase::default(),
            gold: STARTING_GOLD,
            energy: STARTING_ENERGY,
            energy_capacity: BASE_ENERGY_CAPACITY,
            bank_balance: 0.0,
            company_level: STARTING_COMPANY_LEVEL,
            unlocked_mines: Vec::new(),
            unlocked_techs: Vec::new(),
            research: None,
            unlocked_achievements: Vec::new(),
            battles_won: 0,
            tutorial_step: 0,
            tutorial_completed: false,
            active_events: Vec::new(),
            battle: None,
            rivals: default_rivals(),
            day_time: STARTING_DAY_TIME,
            total_play_time: 0.0,
            spatial,
            next_building_id: 1,
            next_employee_id: 1,
            next_event_seq: 1,
            last_tick: None,
            clock: 0.0,
            notifications: VecDeque::new(),
        }
    }

    /// Put every piece of game state back to its starting value.
    ///
    /// The RNG, configuration, and wall clock are kept.
    pub(crate) fn reset(&mut self) {
        let snapshot = SaveSnapshot::default();
        self.world.clear();
        self.spatial.clear();
        self.gold = snapshot.gold;
        self.energy = snapshot.energy;
        self.energy_capacity = snapshot.energy_capacity;
        self.bank_balance = snapshot.bank_balance;
        self.company_level = snapshot.company_level;
        self.unlocked_mines.clear();
        self.unlocked_techs.clear();
        self.research = None;
        self.unlocked_achievements.clear();
        self.battles_won = 0;
        self.tutorial_step = 0;
        self.tutorial_completed = false;
        self.active_events.clear();
        self.battle = None;
        self.rivals = default_rivals();
        self.day_time = snapshot.day_time;
        self.total_play_time = 0.0;
        self.next_building_id = 1;
        self.next_employee_id = 1;
        self.next_event_seq = 1;
        self.last_tick = None;
        self.notifications.clear();
    }

    /// Advance the economy to wall-clock second `now`.
    ///
    /// Only the playing phase advances. The first call after starting,
    /// resuming, leaving a battle, or restoring only anchors the clock. Calls
    /// closer than `min_tick_secs` to the last executed tick do nothing and
    /// lose no time.
    pub fn tick(&mut self, now: f64) -> TickReport {
        if !now.is_finite() {
            warn!(target: "sim.tick", now, "ignoring non-finite tick time");
            return TickReport::default();
        }
        self.clock = now;
        if self.phase != GamePhase::Playing {
            return TickReport::default();
        }

        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return TickReport::default();
        };
        let dt = now - last;
        if dt < 0.0 {
            debug!(target: "sim.tick", dt, "clock went backwards, re-anchoring");
            self.last_tick = Some(now);
            return TickReport::default();
        }
        if dt < self.config.min_tick_secs {
            return TickReport::default();
        }

        let plan = self.plan_tick(now, dt);
        if !plan.is_finite() {
            error!(target: "sim.tick", dt, "tick produced a non-finite value, discarded");
            return TickReport::default();
        }
        self.last_tick = Some(now);
        self.commit(plan)
    }

    /// Compute the next economic state without touching `self`.
    fn plan_tick(&self, now: f64, dt: f64) -> TickPlan {
        let day_time = systems::daynight::advance(self.day_time, dt, self.config.day_length_secs);

        let mut active_events = self.active_events.clone();
        let expired = systems::timed_events::expire(&mut active_events, now);
        if expired > 0 {
            debug!(target: "sim.events", expired, "timed events expired");
        }
        let multipliers = EventMultipliers::fold(&active_events);
        let rates = self.rates_with(&multipliers, systems::daynight::is_night(day_time));

        let gold = (self.gold + rates.gold_per_sec * dt).max(0.0);
        let mut energy_capacity = self.energy_capacity;
        let energy = (self.energy + rates.energy_per_sec * dt).clamp(0.0, energy_capacity);
        let bank_balance = bank_growth(self.bank_balance, dt);

        let mut research = self.research;
        let mut completed = None;
        if let Some(slot) = self.research {
            let labs = systems::production::count_kind(&self.world, BuildingKind::ResearchLab);
            match systems::research::advance(&slot, dt, labs) {
                ResearchStep::Progress(progress) => {
                    research = Some(ResearchSlot { progress, ..slot });
                }
                ResearchStep::Complete(tech) => {
                    research = None;
                    completed = Some(tech);
                    if let TechEffect::CapacityBoost { amount } = tech_node(tech).effect {
                        energy_capacity += amount;
                    }
                }
            }
        }

        TickPlan {
            dt,
            day_time,
            active_events,
            gold,
            energy,
            energy_capacity,
            bank_balance,
            research,
            completed,
            total_play_time: self.total_play_time + dt,
        }
    }

    fn commit(&mut self, plan: TickPlan) -> TickReport {
        let interval = self.config.autosave_interval_secs;
        let save_due = interval > 0.0
            && (plan.total_play_time / interval).floor() > (self.total_play_time / interval).floor();

        self.day_time = plan.day_time;
        self.active_events = plan.active_events;
        self.gold = plan.gold;
        self.energy = plan.energy;
        self.energy_capacity = plan.energy_capacity;
        self.bank_balance = plan.bank_balance;
        self.research = plan.research;
        self.total_play_time = plan.total_play_time;

        if let Some(tech) = plan.completed {
            if !self.unlocked_techs.contains(&tech) {
                self.unlocked_techs.push(tech);
            }
            info!(target: "sim.research", tech = %tech, "research complete");
            self.notify(Notification::ResearchComplete { tech });
        }

        let signal = MarketSignal {
            player_gold: self.gold,
            player_building_count: self.building_count(),
        };
        systems::rivals::run(&mut self.rivals, &signal);

        let achievements = self.evaluate_achievements();

        TickReport {
            advanced: true,
            dt: plan.dt,
            save_due,
            completed_research: plan.completed,
            achievements,
        }
    }

    /// Unlock newly satisfied achievements and queue a notification for each.
    pub(crate) fn evaluate_achievements(&mut self) -> Vec<AchievementId> {
        let progress = self.progress();
        let fresh = systems::achievements::run(&progress, &mut self.unlocked_achievements);
        for &achievement in &fresh {
            self.notify(Notification::AchievementUnlocked { achievement });
        }
        fresh
    }

    pub(crate) fn progress(&self) -> Progress {
        Progress {
            building_count: self.building_count(),
            gold: self.gold,
            mines_unlocked: self.unlocked_mines.len(),
            employee_count: self.employee_count(),
            company_level: self.company_level,
            techs_unlocked: self.unlocked_techs.len(),
            battles_won: self.battles_won,
            energy_capacity: self.energy_capacity,
        }
    }

    fn rates_with(&self, multipliers: &EventMultipliers, night: bool) -> Rates {
        systems::production::compute_rates(
            &self.world,
            &ProductionContext {
                unlocked_techs: &self.unlocked_techs,
                mines_unlocked: self.unlocked_mines.len(),
                company_level: self.company_level,
                night,
                events: multipliers,
            },
        )
    }

    /// Current per-second rates with every active event applied.
    pub fn rates(&self) -> Rates {
        let multipliers = EventMultipliers::fold(&self.active_events);
        self.rates_with(&multipliers, systems::daynight::is_night(self.day_time))
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(notification);
    }

    /// Take every queued notification, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Complete visible state.
    pub fn view(&self) -> GameView {
        systems::snapshot::build_view(self)
    }

    /// The persisted subset of state.
    pub fn extract_snapshot(&self) -> SaveSnapshot {
        systems::snapshot::extract_snapshot(self)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn gold(&self) -> f64 {
        self.gold
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn energy_capacity(&self) -> f64 {
        self.energy_capacity
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn battle(&self) -> Option<&BattleState> {
        self.battle.as_ref()
    }

    pub fn research(&self) -> Option<ResearchSlot> {
        self.research
    }

    pub fn unlocked_mines(&self) -> &[MineId] {
        &self.unlocked_mines
    }

    pub fn unlocked_techs(&self) -> &[TechId] {
        &self.unlocked_techs
    }

    pub fn rivals(&self) -> &[Rival] {
        &self.rivals
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn building_count(&self) -> usize {
        self.world.query::<&Structure>().iter().count()
    }

    pub fn employee_count(&self) -> usize {
        self.world.query::<&Employee>().iter().count()
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
