//! Data-driven content definitions and loaders.
//!
//! This crate houses the static game content:
//! - the built-in bestiary and its creature registry
//! - dungeon blueprints (data-driven via RON)
//! - game configuration (data-driven via TOML)
//!
//! Loaders are gated behind the default `loaders` feature.

pub mod bestiary;
pub mod blueprint;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use bestiary::default_registry;
pub use blueprint::{BlueprintError, DungeonBlueprint, ItemSpec, Passage, RoomBlueprint, RoomSpec};

#[cfg(feature = "loaders")]
pub use loaders::{BlueprintLoader, ConfigLoader, ContentFactory, LoadResult};
