//! Spell attack.
//!
//! Magic skips the physical pipeline entirely: no variance, no critical hit,
//! no dodge and no mitigation.

use crate::config::CombatRules;

/// Spell damage: `truncate(attack_power * magic_multiplier)`, computed from the
/// caster's base attack power.
pub fn magic_damage(attack_power: u32, rules: &CombatRules) -> u32 {
    (attack_power as f64 * rules.magic_multiplier) as u32
}
