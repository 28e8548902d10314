//! Mana pool with passive growth-by-usage.

use crate::config::ProgressionRules;

/// Spell resource. Only creatures that cast (mage players) own one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManaPool {
    current: u32,
    max: u32,
    usage_count: u32,
}

/// Result of a successful [`ManaPool::spend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManaSpent {
    pub amount: u32,
    /// Max-mana increase earned by this spend, if it completed a usage cycle.
    pub growth: Option<u32>,
}

impl ManaPool {
    /// A full pool.
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            usage_count: 0,
        }
    }

    /// Rebuilds a pool from persisted values; `current` is clamped to `max`.
    pub fn from_parts(current: u32, max: u32, usage_count: u32) -> Self {
        Self {
            current: current.min(max),
            max,
            usage_count,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn usage_count(&self) -> u32 {
        self.usage_count
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.current >= amount
    }

    /// Spends `amount` if available and counts the use toward passive growth.
    ///
    /// Every `rules.mana_growth_uses` successful spends raise max mana by
    /// `max(1, round(max * mana_growth_ratio))` and reset the counter. Returns
    /// `None` without touching the pool when the balance is too low.
    pub fn spend(&mut self, amount: u32, rules: &ProgressionRules) -> Option<ManaSpent> {
        if !self.can_afford(amount) {
            return None;
        }

        self.current -= amount;
        self.usage_count += 1;

        let growth = if self.usage_count >= rules.mana_growth_uses.max(1) {
            let increase = ((self.max as f64 * rules.mana_growth_ratio).round() as u32).max(1);
            self.max += increase;
            self.usage_count = 0;
            tracing::info!(max = self.max, increase, "max mana grew through practice");
            Some(increase)
        } else {
            None
        };

        Some(ManaSpent { amount, growth })
    }

    /// Adds mana up to max. Returns the amount actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Raises max mana and refills the pool (level-up).
    pub fn grow(&mut self, increase: u32) {
        self.max += increase;
        self.current = self.max;
    }
}
