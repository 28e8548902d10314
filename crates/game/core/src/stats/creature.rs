//! Base attributes and clamped mutation rules.

/// Attributes every creature carries.
///
/// Fields are private so that the health invariant cannot be bypassed; use the
/// accessors and the clamping mutators instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatureStats {
    name: String,
    health: u32,
    max_health: u32,
    attack_power: u32,
    defense: u32,
    level: u32,
}

impl CreatureStats {
    /// Creates stats at full health. `max_health` and `level` are raised to 1.
    pub fn new(name: impl Into<String>, max_health: u32, attack_power: u32) -> Self {
        let max_health = max_health.max(1);
        Self {
            name: name.into(),
            health: max_health,
            max_health,
            attack_power,
            defense: 0,
            level: 1,
        }
    }

    pub fn with_defense(mut self, defense: u32) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    /// Sets current health, clamped to `[0, max_health]`.
    pub fn with_health(mut self, health: u32) -> Self {
        self.set_health(health);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn attack_power(&self) -> u32 {
        self.attack_power
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Health as a percentage of max health (0-100).
    pub fn health_percent(&self) -> u32 {
        (u64::from(self.health) * 100 / u64::from(self.max_health)) as u32
    }

    /// Subtracts `amount` from health, stopping at zero.
    ///
    /// Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        before - self.health
    }

    /// Adds `amount` to health, stopping at max health.
    ///
    /// Returns the health actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Restores health to max.
    pub fn restore(&mut self) {
        self.health = self.max_health;
    }

    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    /// Sets max health (at least 1) and re-clamps current health downward.
    pub fn set_max_health(&mut self, max_health: u32) {
        self.max_health = max_health.max(1);
        self.health = self.health.min(self.max_health);
    }

    pub fn set_attack_power(&mut self, attack_power: u32) {
        self.attack_power = attack_power;
    }

    pub fn set_defense(&mut self, defense: u32) {
        self.defense = defense;
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_clamps_floor_values() {
        let stats = CreatureStats::new("Wisp", 0, 0).with_level(0);
        assert_eq!(stats.max_health(), 1);
        assert_eq!(stats.health(), 1);
        assert_eq!(stats.level(), 1);
    }

    #[test]
    fn health_percent_rounds_down() {
        let mut stats = CreatureStats::new("Rat", 30, 1);
        assert_eq!(stats.health_percent(), 100);
        stats.take_damage(11);
        assert_eq!(stats.health_percent(), 63);
        stats.take_damage(30);
        assert_eq!(stats.health_percent(), 0);
    }

    #[test]
    fn damage_stops_at_zero() {
        let mut stats = CreatureStats::new("Rat", 10, 1);
        assert_eq!(stats.take_damage(25), 10);
        assert_eq!(stats.health(), 0);
        assert!(!stats.is_alive());
    }

    #[test]
    fn zero_damage_and_heal_are_no_ops() {
        let mut stats = CreatureStats::new("Rat", 10, 1).with_health(4);
        assert_eq!(stats.take_damage(0), 0);
        assert_eq!(stats.heal(0), 0);
        assert_eq!(stats.health(), 4);
    }

    #[test]
    fn heal_stops_at_max() {
        let mut stats = CreatureStats::new("Knight", 100, 5).with_health(90);
        assert_eq!(stats.heal(30), 10);
        assert_eq!(stats.health(), 100);
    }

    #[test]
    fn lowering_max_health_reclamps_current() {
        let mut stats = CreatureStats::new("Knight", 100, 5);
        stats.set_max_health(40);
        assert_eq!(stats.health(), 40);
        stats.set_max_health(0);
        assert_eq!(stats.max_health(), 1);
        assert_eq!(stats.health(), 1);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Damage(u32),
        Heal(u32),
        SetMax(u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u32..500).prop_map(Op::Damage),
            (0u32..500).prop_map(Op::Heal),
            (0u32..500).prop_map(Op::SetMax),
        ]
    }

    proptest! {
        #[test]
        fn health_stays_within_bounds(max in 1u32..500, ops in prop::collection::vec(op(), 0..64)) {
            let mut stats = CreatureStats::new("Subject", max, 1);
            for op in ops {
                match op {
                    Op::Damage(amount) => { stats.take_damage(amount); }
                    Op::Heal(amount) => { stats.heal(amount); }
                    Op::SetMax(amount) => stats.set_max_health(amount),
                }
                prop_assert!(stats.health() <= stats.max_health());
                prop_assert!(stats.max_health() >= 1);
            }
        }
    }
}
