//! Dodge chance from the level gap.

use crate::config::CombatRules;
use crate::rng::RollSource;

/// Calculate the defender's chance to dodge.
///
/// # Formula
///
/// ```text
/// gap = defender_level - attacker_level
/// dodge = 0                                 if gap <= 0
///       = min(dodge_cap, dodge_per_level * gap) otherwise
/// ```
pub fn dodge_chance(attacker_level: u32, defender_level: u32, rules: &CombatRules) -> f64 {
    if defender_level <= attacker_level {
        return 0.0;
    }
    let gap = (defender_level - attacker_level) as f64;
    (rules.dodge_per_level * gap).min(rules.dodge_cap)
}

/// Roll a dodge. No roll is drawn when the chance is zero.
pub fn check_dodge(
    attacker_level: u32,
    defender_level: u32,
    rules: &CombatRules,
    rolls: &mut (impl RollSource + ?Sized),
) -> bool {
    let chance = dodge_chance(attacker_level, defender_level, rules);
    chance > 0.0 && rolls.chance(chance)
}
