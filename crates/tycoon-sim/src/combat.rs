//! Combat resolver: one-on-one encounters for mine conquest.
//!
//! Each attack is a simultaneous exchange. The player hits the enemy and the
//! enemy hits back within the same call.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use tycoon_core::catalog::mines::{difficulty_scale, MineSite};
use tycoon_core::constants::*;
use tycoon_core::state::BattleState;

/// Player combat stats derived from the size of the operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    pub health: f64,
    pub attack: f64,
}

/// `power = 5 * buildings + 3 * employees`. Health is `100 + power`,
/// attack is `(10 + 0.5 * power) * combat_multiplier`.
pub fn player_stats(buildings: usize, employees: usize, combat_multiplier: f64) -> PlayerStats {
    let power = POWER_PER_BUILDING * buildings as f64 + POWER_PER_EMPLOYEE * employees as f64;
    PlayerStats {
        health: PLAYER_BASE_HEALTH + power,
        attack: (PLAYER_BASE_ATTACK + ATTACK_PER_POWER * power) * combat_multiplier,
    }
}

/// Open an encounter at `mine` with enemy stats rolled for its difficulty tier.
pub fn open_battle(mine: &MineSite, player: PlayerStats, rng: &mut ChaCha8Rng) -> BattleState {
    let scale = difficulty_scale(mine.difficulty);
    BattleState {
        mine: mine.id,
        player_health: player.health,
        enemy_health: rng.gen_range(ENEMY_HEALTH_MIN..ENEMY_HEALTH_MAX) * scale,
        player_attack: player.attack,
        enemy_attack: rng.gen_range(ENEMY_ATTACK_MIN..ENEMY_ATTACK_MAX) * scale,
    }
}

/// Result of one attack exchange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    Ongoing {
        player_damage: f64,
        enemy_damage: f64,
    },
    /// Enemy health reached zero. Checked before the player's.
    Won,
    Lost,
}

/// Resolve one exchange. Health never drops below zero.
pub fn exchange(battle: &BattleState, rng: &mut ChaCha8Rng) -> (BattleState, AttackOutcome) {
    let player_damage = battle.player_attack * rng.gen_range(DAMAGE_ROLL_MIN..DAMAGE_ROLL_MAX);
    let enemy_damage = battle.enemy_attack * rng.gen_range(DAMAGE_ROLL_MIN..DAMAGE_ROLL_MAX);

    let next = BattleState {
        enemy_health: (battle.enemy_health - player_damage).max(0.0),
        player_health: (battle.player_health - enemy_damage).max(0.0),
        ..*battle
    };

    let outcome = if next.enemy_health <= 0.0 {
        AttackOutcome::Won
    } else if next.player_health <= 0.0 {
        AttackOutcome::Lost
    } else {
        AttackOutcome::Ongoing {
            player_damage,
            enemy_damage,
        }
    };
    (next, outcome)
}
