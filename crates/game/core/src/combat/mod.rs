//! Combat resolution system.
//!
//! # Architecture
//!
//! - **Pure functions**: damage, dodge, magic and flee math take explicit
//!   rules and a [`RollSource`](crate::rng::RollSource); nothing reads global state
//! - **State machine**: [`Encounter`] sequences player and enemy turns on top of
//!   those functions
//!
//! # Core Functions
//!
//! - `resolve_attack`: variance, critical, dodge and mitigation for one swing
//! - `dodge_chance`: level-gap dodge probability
//! - `mitigate`: defense reduction
//! - `magic_damage`: the spell path, which bypasses the physical pipeline
//! - `flee_chance`: escape probability

pub mod damage;
pub mod encounter;
pub mod error;
pub mod flee;
pub mod hit;
pub mod magic;
pub mod result;

pub use damage::{base_damage, guard, mitigate};
pub use encounter::{Encounter, EncounterState, PlayerAction, TurnReport};
pub use error::CombatError;
pub use flee::{attempt_flee, flee_chance};
pub use hit::{check_dodge, dodge_chance};
pub use magic::magic_damage;
pub use result::{AttackOutcome, AttackResult, apply_attack, resolve_attack};
