//! Stat model shared by every creature.
//!
//! # Layers
//!
//! ```text
//! [ CreatureStats ]   health / max health / attack / defense / level (all creatures)
//!      ↓
//! [ ManaPool ]        optional spell resource with passive growth (players)
//!      ↓
//! [ Progression ]     experience and the level-up curve (players)
//! ```
//!
//! ## Invariants
//!
//! 1. `0 <= health <= max_health` after every mutation
//! 2. `max_health >= 1`, `level >= 1`
//! 3. Mutations only touch the receiver; nothing here performs I/O or randomness

pub mod creature;
pub mod mana;
pub mod progression;

pub use creature::CreatureStats;
pub use mana::ManaPool;
pub use progression::{LevelUp, Progression};
