//! Simulation constants and tuning parameters.

/// Smallest wall-clock gap (seconds) a tick will integrate.
pub const MIN_TICK_SECS: f64 = 0.5;

// --- Starting resources ---

pub const STARTING_GOLD: f64 = 200.0;

pub const STARTING_ENERGY: f64 = 0.0;

/// Storage ceiling before any battery is built. Never drops below this.
pub const BASE_ENERGY_CAPACITY: f64 = 100.0;

/// Revenue is proportional to level. A fresh company earns nothing.
pub const STARTING_COMPANY_LEVEL: u32 = 0;

// --- Day/night cycle ---

/// Real seconds for one full day.
pub const DAY_LENGTH_SECS: f64 = 300.0;

/// Cycle value a new game starts at (mid-morning).
pub const STARTING_DAY_TIME: f64 = 0.35;

/// Night runs from `NIGHT_START` through midnight to `NIGHT_END`.
pub const NIGHT_START: f64 = 0.8;

pub const NIGHT_END: f64 = 0.2;

/// Fraction of solar output kept at night.
pub const SOLAR_NIGHT_FACTOR: f64 = 0.2;

// --- Placement ---

/// Minimum ground distance between two building centers.
pub const MIN_SPACING: f64 = 3.0;

/// Full map edge length. The spatial index covers `[-MAP_SIZE/2, MAP_SIZE/2]` on both axes.
pub const MAP_SIZE: f64 = 400.0;

/// Buildings may be placed with `|x| <= PLACEMENT_BOUNDS` and `|z| <= PLACEMENT_BOUNDS`.
pub const PLACEMENT_BOUNDS: f64 = 190.0;

/// Points per quadtree node before it splits.
pub const QUADTREE_CAPACITY: usize = 8;

/// Deepest quadtree level. Nodes at this depth never split.
pub const QUADTREE_MAX_DEPTH: u32 = 6;

/// Share of a building's base cost returned on demolition.
pub const DEMOLITION_REFUND_RATIO: f64 = 0.5;

// --- Company ---

/// Hiring costs this many seconds of the role's salary.
pub const HIRE_COST_SALARY_MULTIPLE: f64 = 5.0;

/// Company upgrade costs `(level + 1) * COMPANY_UPGRADE_COST_STEP`.
pub const COMPANY_UPGRADE_COST_STEP: f64 = 500.0;

/// Revenue per unit of summed employee productivity per company level.
pub const REVENUE_PER_PRODUCTIVITY: f64 = 2.0;

/// Productivity is drawn uniformly from `[PRODUCTIVITY_MIN, PRODUCTIVITY_MIN + PRODUCTIVITY_SPREAD)`.
pub const PRODUCTIVITY_MIN: f64 = 0.8;

pub const PRODUCTIVITY_SPREAD: f64 = 0.4;

/// Added to the employee multiplier per training center.
pub const TRAINING_CENTER_BONUS: f64 = 0.25;

// --- Mines and combat ---

/// Gold per second granted by each conquered mine.
pub const MINE_GOLD_PER_SEC: f64 = 5.0;

/// Per-tier increase of the enemy difficulty scale.
pub const DIFFICULTY_STEP: f64 = 0.25;

pub const PLAYER_BASE_HEALTH: f64 = 100.0;

pub const PLAYER_BASE_ATTACK: f64 = 10.0;

/// Player attack gained per point of power.
pub const ATTACK_PER_POWER: f64 = 0.5;

pub const POWER_PER_BUILDING: f64 = 5.0;

pub const POWER_PER_EMPLOYEE: f64 = 3.0;

pub const ENEMY_HEALTH_MIN: f64 = 80.0;

pub const ENEMY_HEALTH_MAX: f64 = 140.0;

pub const ENEMY_ATTACK_MIN: f64 = 8.0;

pub const ENEMY_ATTACK_MAX: f64 = 20.0;

/// Every exchange scales damage by a roll in `[DAMAGE_ROLL_MIN, DAMAGE_ROLL_MAX)`.
pub const DAMAGE_ROLL_MIN: f64 = 0.8;

pub const DAMAGE_ROLL_MAX: f64 = 1.2;

/// Gold awarded for a won encounter.
pub const BATTLE_BOUNTY: f64 = 200.0;

// --- Research ---

/// Share of a technology's cost returned when research is cancelled.
pub const RESEARCH_REFUND_RATIO: f64 = 0.5;

// --- Market and bank ---

pub const ENERGY_BASE_PRICE: f64 = 2.0;

pub const ENERGY_PRICE_SWING: f64 = 0.5;

/// Angular rate of the price wave per second of play.
pub const ENERGY_PRICE_WAVE_RATE: f64 = 0.01;

/// Compound interest per second on the bank balance.
pub const BANK_INTEREST_PER_SEC: f64 = 0.001;

// --- Persistence and UI ---

/// Seconds of play between autosave requests.
pub const AUTOSAVE_INTERVAL_SECS: f64 = 60.0;

/// Pending notifications kept before the oldest are dropped.
pub const MAX_NOTIFICATIONS: usize = 10;

pub const TUTORIAL_STEPS: u8 = 6;
