//! Content loaders for reading game data from files.
//!
//! Balance numbers come from TOML, dungeon layouts from RON.

pub mod blueprint;
pub mod config;
pub mod factory;

pub use blueprint::BlueprintLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
