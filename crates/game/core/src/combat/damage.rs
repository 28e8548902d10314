//! Damage calculation and mitigation.

use crate::actor::CombatRole;
use crate::config::{CombatRules, VarianceBand};
use crate::rng::RollSource;

// ============================================================================
// Base Damage
// ============================================================================

/// Calculate the unrandomized damage of an attack.
///
/// # Formula
///
/// ```text
/// player:  attack * (1 + player_level_scaling * (level - 1))
/// monster: attack + monster_damage_per_level * level
/// ```
pub fn base_damage(role: CombatRole, attack_power: u32, level: u32, rules: &CombatRules) -> f64 {
    let attack = attack_power as f64;
    match role {
        CombatRole::Player => {
            attack * (1.0 + rules.player_level_scaling * level.saturating_sub(1) as f64)
        }
        CombatRole::Monster => attack + (rules.monster_damage_per_level * level) as f64,
    }
}

/// Variance band used for a role.
pub fn variance_for(role: CombatRole, rules: &CombatRules) -> VarianceBand {
    match role {
        CombatRole::Player => rules.player_variance,
        CombatRole::Monster => rules.monster_variance,
    }
}

// ============================================================================
// Randomization
// ============================================================================

/// Scale `base` by a uniform factor from `band`, floor it, and keep it at least 1.
pub fn roll_variance(base: f64, band: VarianceBand, rolls: &mut (impl RollSource + ?Sized)) -> u32 {
    let factor = rolls.between(band.min, band.max);
    ((base * factor).floor() as u32).max(1)
}

/// Roll for a critical hit; returns the (possibly multiplied) damage and whether it crit.
pub fn roll_critical(
    damage: u32,
    rules: &CombatRules,
    rolls: &mut (impl RollSource + ?Sized),
) -> (u32, bool) {
    if rolls.chance(rules.crit_chance) {
        (damage.saturating_mul(rules.crit_multiplier), true)
    } else {
        (damage, false)
    }
}

// ============================================================================
// Mitigation
// ============================================================================

/// Reduce damage by defense.
///
/// # Formula
///
/// ```text
/// final = max(1, round(damage * 100 / (100 + defense)))
/// ```
///
/// Zero defense leaves the damage unchanged; zero damage stays zero.
pub fn mitigate(damage: u32, defense: u32) -> u32 {
    if damage == 0 || defense == 0 {
        return damage;
    }
    let reduced = (damage as f64 * 100.0 / (100.0 + defense as f64)).round() as u32;
    reduced.max(1)
}

/// Apply a defend stance to an incoming hit. A hit that connects still deals at least 1.
pub fn guard(damage: u32, reduction: f64) -> u32 {
    if damage == 0 {
        return 0;
    }
    let reduced = (damage as f64 * (1.0 - reduction.clamp(0.0, 1.0))).round() as u32;
    reduced.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRolls;
    use proptest::prelude::*;

    #[test]
    fn player_scales_by_level() {
        let rules = CombatRules::default();
        assert_eq!(base_damage(CombatRole::Player, 15, 1, &rules), 15.0);
        assert!((base_damage(CombatRole::Player, 10, 3, &rules) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn monster_adds_flat_bonus_per_level() {
        let rules = CombatRules::default();
        assert_eq!(base_damage(CombatRole::Monster, 12, 2, &rules), 16.0);
    }

    #[test]
    fn variance_floors_and_never_hits_zero() {
        let mut rolls = ScriptedRolls::constant(0.0);
        assert_eq!(roll_variance(10.0, VarianceBand::new(0.9, 1.1), &mut rolls), 9);
        assert_eq!(roll_variance(0.4, VarianceBand::fixed(), &mut rolls), 1);
    }

    #[test]
    fn critical_doubles() {
        let rules = CombatRules::default();
        let mut rolls = ScriptedRolls::new([0.05, 0.5]);
        assert_eq!(roll_critical(7, &rules, &mut rolls), (14, true));
        assert_eq!(roll_critical(7, &rules, &mut rolls), (7, false));
    }

    #[test]
    fn mitigation_examples() {
        assert_eq!(mitigate(20, 0), 20);
        assert_eq!(mitigate(20, 25), 16);
        assert_eq!(mitigate(1, 500), 1);
        assert_eq!(mitigate(0, 10), 0);
    }

    #[test]
    fn guard_halves_with_floor_of_one() {
        assert_eq!(guard(10, 0.5), 5);
        assert_eq!(guard(1, 0.5), 1);
        assert_eq!(guard(0, 0.5), 0);
    }

    proptest! {
        #[test]
        fn mitigation_matches_formula_and_never_increases(raw in 1u32..100_000, defense in 0u32..10_000) {
            let mitigated = mitigate(raw, defense);
            let expected = ((raw as f64 * 100.0 / (100.0 + defense as f64)).round() as u32).max(1);
            prop_assert_eq!(mitigated, expected);
            prop_assert!(mitigated <= raw);
            prop_assert!(mitigated >= 1);
        }
    }
}
