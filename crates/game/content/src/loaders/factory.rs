//! Content factory for loading everything a session needs from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::{CreatureFactory, Dungeon, GameConfig};

use crate::blueprint::DungeonBlueprint;
use crate::loaders::{BlueprintLoader, ConfigLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── dungeon.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const BLUEPRINT_FILE: &'static str = "dungeon.ron";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Load the dungeon layout from `dungeon.ron`.
    pub fn load_blueprint(&self) -> LoadResult<DungeonBlueprint> {
        BlueprintLoader::load(&self.data_dir.join(Self::BLUEPRINT_FILE))
    }

    /// Load the layout and populate it through `factory`.
    pub fn build_dungeon(
        &self,
        factory: &(impl CreatureFactory + ?Sized),
        config: &GameConfig,
    ) -> LoadResult<Dungeon> {
        let blueprint = self.load_blueprint()?;
        blueprint
            .build(factory, &config.rest)
            .with_context(|| format!("cannot build dungeon from {}", self.data_dir.display()))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
