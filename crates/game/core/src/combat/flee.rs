//! Escape attempts.

use crate::config::CombatRules;
use crate::rng::RollSource;

/// Chance to escape.
///
/// # Formula
///
/// ```text
/// chance = flee_base_chance                  if opponent_health <= player_health
///        = flee_base_chance - flee_penalty   otherwise
/// ```
pub fn flee_chance(player_health: u32, opponent_health: u32, rules: &CombatRules) -> f64 {
    let chance = if opponent_health > player_health {
        rules.flee_base_chance - rules.flee_penalty
    } else {
        rules.flee_base_chance
    };
    chance.clamp(0.0, 1.0)
}

/// Roll an escape attempt.
pub fn attempt_flee(
    player_health: u32,
    opponent_health: u32,
    rules: &CombatRules,
    rolls: &mut (impl RollSource + ?Sized),
) -> bool {
    rolls.chance(flee_chance(player_health, opponent_health, rules))
}
