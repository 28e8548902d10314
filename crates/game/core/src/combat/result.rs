//! Combat result types and attack resolution.

use crate::actor::Combatant;
use crate::config::CombatRules;
use crate::rng::RollSource;

use super::damage::{base_damage, guard, mitigate, roll_critical, roll_variance, variance_for};
use super::hit::check_dodge;

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Defender dodged; no damage.
    Dodged,
    /// Attack hit the target.
    Hit,
    /// Critical hit.
    Critical,
}

/// Result of a combat resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,

    /// Damage dealt after mitigation (0 if dodged).
    pub damage: u32,

    /// Damage absorbed by a defend stance.
    pub blocked: u32,
}

impl AttackResult {
    pub const fn dodged() -> Self {
        Self {
            outcome: AttackOutcome::Dodged,
            damage: 0,
            blocked: 0,
        }
    }

    pub fn connected(&self) -> bool {
        !matches!(self.outcome, AttackOutcome::Dodged)
    }

    /// Apply a defend stance with the given reduction.
    pub fn guarded(self, reduction: f64) -> Self {
        if !self.connected() {
            return self;
        }
        let damage = guard(self.damage, reduction);
        Self {
            damage,
            blocked: self.damage - damage,
            ..self
        }
    }
}

/// Resolve an attack without applying it.
///
/// # Sequence
///
/// 1. Base damage from the attacker's role, effective attack and level
/// 2. Variance roll, floored, minimum 1
/// 3. Critical roll
/// 4. Dodge roll (only when the defender out-levels the attacker)
/// 5. Defense mitigation
pub fn resolve_attack(
    attacker: &(impl Combatant + ?Sized),
    defender: &(impl Combatant + ?Sized),
    rules: &CombatRules,
    rolls: &mut (impl RollSource + ?Sized),
) -> AttackResult {
    let role = attacker.role();
    let base = base_damage(role, attacker.effective_attack(), attacker.level(), rules);
    let rolled = roll_variance(base, variance_for(role, rules), rolls);
    let (damage, critical) = roll_critical(rolled, rules, rolls);

    if check_dodge(attacker.level(), defender.level(), rules, rolls) {
        tracing::debug!(attacker = attacker.name(), defender = defender.name(), "attack dodged");
        return AttackResult::dodged();
    }

    let damage = mitigate(damage, defender.effective_defense());
    tracing::debug!(
        attacker = attacker.name(),
        defender = defender.name(),
        base,
        rolled,
        critical,
        damage,
        "attack resolved"
    );

    AttackResult {
        outcome: if critical {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        },
        damage,
        blocked: 0,
    }
}

/// Apply a resolved attack to the defender. Returns the health actually lost.
pub fn apply_attack(defender: &mut (impl Combatant + ?Sized), result: &AttackResult) -> u32 {
    defender.stats_mut().take_damage(result.damage)
}
