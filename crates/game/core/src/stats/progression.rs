//! Experience accumulation and the level-up curve.

use crate::config::ProgressionRules;

/// Experience toward the next level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progression {
    experience: u32,
    to_next_level: u32,
}

/// Stat gains granted when a creature reaches `level`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub health_gain: u32,
    pub attack_gain: u32,
    /// Present only for creatures with a mana pool.
    pub mana_gain: Option<u32>,
}

impl LevelUp {
    /// Gains for reaching `level`:
    /// - max health `10 + 2 × level`
    /// - attack `3 + level`
    /// - max mana `10 + 3 × level` (casters only)
    pub fn for_level(level: u32, has_mana: bool) -> Self {
        Self {
            level,
            health_gain: 10 + 2 * level,
            attack_gain: 3 + level,
            mana_gain: has_mana.then_some(10 + 3 * level),
        }
    }
}

impl Progression {
    pub fn new(rules: &ProgressionRules) -> Self {
        Self::from_parts(0, rules.starting_threshold)
    }

    /// Rebuilds progression from persisted values. The threshold is at least 1.
    pub fn from_parts(experience: u32, to_next_level: u32) -> Self {
        Self {
            experience,
            to_next_level: to_next_level.max(1),
        }
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn to_next_level(&self) -> u32 {
        self.to_next_level
    }

    pub fn add(&mut self, xp: u32) {
        self.experience = self.experience.saturating_add(xp);
    }

    /// Consumes one threshold's worth of experience if available.
    ///
    /// On success the threshold is rescaled by `threshold_growth` (rounded
    /// down, never below 1) and `true` is returned; the caller applies the
    /// stat gains for the new level.
    pub fn take_level(&mut self, rules: &ProgressionRules) -> bool {
        if self.experience < self.to_next_level {
            return false;
        }
        self.experience -= self.to_next_level;
        self.to_next_level = ((self.to_next_level as f64 * rules.threshold_growth) as u32).max(1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_gains_follow_curve() {
        let gains = LevelUp::for_level(2, true);
        assert_eq!(gains.health_gain, 14);
        assert_eq!(gains.attack_gain, 5);
        assert_eq!(gains.mana_gain, Some(16));
        assert_eq!(LevelUp::for_level(3, false).mana_gain, None);
    }

    #[test]
    fn take_level_scales_threshold() {
        let rules = ProgressionRules::default();
        let mut progression = Progression::new(&rules);
        progression.add(30);
        assert!(progression.take_level(&rules));
        assert_eq!(progression.experience(), 5);
        assert_eq!(progression.to_next_level(), 37);
        assert!(!progression.take_level(&rules));
    }

    #[test]
    fn zero_threshold_is_raised() {
        assert_eq!(Progression::from_parts(0, 0).to_next_level(), 1);
    }
}
