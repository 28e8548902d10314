//! Combat and progression rules of the dungeon crawler.
//!
//! `game-core` defines the canonical rules (stats, damage, loot, levelling,
//! rooms, encounters) and exposes pure APIs with no I/O. Randomness enters
//! only through [`RollSource`], so every rule is reproducible from a seed or a
//! scripted roll sequence. All gameplay flows through [`GameSession`], and
//! supporting crates depend on the types re-exported here.
pub mod actor;
pub mod combat;
pub mod config;
pub mod error;
pub mod event;
pub mod factory;
pub mod inventory;
pub mod item;
pub mod loot;
pub mod rng;
pub mod room;
#[cfg(feature = "serde")]
pub mod save;
pub mod session;
pub mod stats;

pub use actor::{Archetype, CombatRole, Combatant, ItemUse, Monster, MonsterTier, Player};
pub use combat::{
    AttackOutcome, AttackResult, CombatError, Encounter, EncounterState, PlayerAction, TurnReport,
};
pub use config::{CombatRules, GameConfig, ProgressionRules, RestRules, VarianceBand};
pub use error::{ErrorSeverity, GameError};
pub use event::{EnemyStatus, GameEvent, RoomView, StatusView};
pub use factory::{CreatureFactory, CreatureRegistry, FactoryError};
pub use inventory::{Inventory, InventoryError};
pub use item::{Armor, Item, ItemKind, Material, Potion, Weapon};
pub use loot::{LootEntry, LootProfile, LootTable, generate_loot};
pub use rng::{PcgRng, RngOracle, RollSource, ScriptedRolls, SeededRolls};
pub use room::{Direction, Dungeon, Room, RoomError, RoomFlags, RoomId, RoomKind};
#[cfg(feature = "serde")]
pub use save::{DocumentError, PlayerDocument};
pub use session::{GameSession, LootSelection, SessionError, SessionStatus};
pub use stats::{CreatureStats, LevelUp, ManaPool, Progression};
