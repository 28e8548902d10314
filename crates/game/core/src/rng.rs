//! Random number sources for combat and loot rolls.
//!
//! The rules never call a global RNG. Every probabilistic decision draws from a
//! [`RollSource`], which is either a deterministic PCG stream seeded at game
//! start ([`SeededRolls`]) or a scripted sequence used to pin outcomes in tests
//! ([`ScriptedRolls`]).
//!
//! # Determinism
//!
//! Given the same seed, [`SeededRolls`] produces the same sequence of rolls,
//! which makes whole sessions replayable.

use std::collections::VecDeque;

/// Seed-indexed random oracle.
///
/// Implementations must be deterministic and produce the same value for the
/// same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a uniform float in `[0, 1)` from a seed.
    fn unit(&self, seed: u64) -> f64 {
        self.next_u32(seed) as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 32-bit output from 64-bit state, a single
/// multiply + xorshift + rotate per draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed for one roll.
///
/// * `game_seed` - Base seed set at game start
/// * `nonce` - Sequence number of the roll within the session
/// * `context` - Discriminates independent roll streams sharing a nonce
pub fn compute_seed(game_seed: u64, nonce: u64, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Stream of uniform rolls consumed by the rules.
pub trait RollSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Bernoulli trial: true with probability `p`.
    ///
    /// `p <= 0` never succeeds and `p >= 1` always succeeds.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }

    /// Uniform value in `[min, max]`; returns `min` when the band is empty.
    fn between(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        min + self.next_unit() * (max - min)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

impl<R: RollSource + ?Sized> RollSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<R: RollSource + ?Sized> RollSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Deterministic roll stream backed by an [`RngOracle`].
#[derive(Clone, Debug)]
pub struct SeededRolls<O = PcgRng> {
    oracle: O,
    seed: u64,
    nonce: u64,
}

impl SeededRolls<PcgRng> {
    pub fn new(seed: u64) -> Self {
        Self::with_oracle(PcgRng, seed)
    }
}

impl<O: RngOracle> SeededRolls<O> {
    pub fn with_oracle(oracle: O, seed: u64) -> Self {
        Self {
            oracle,
            seed,
            nonce: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of rolls drawn so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}

impl<O: RngOracle> RollSource for SeededRolls<O> {
    fn next_unit(&mut self) -> f64 {
        let seed = compute_seed(self.seed, self.nonce, 0);
        self.nonce += 1;
        self.oracle.unit(seed)
    }
}

/// Replays a fixed sequence of rolls, then repeats a fallback value.
#[derive(Clone, Debug)]
pub struct ScriptedRolls {
    queue: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
            fallback: 0.5,
        }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl RollSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}
