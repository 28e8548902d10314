//! Dungeon blueprint loader.

use std::path::Path;

use anyhow::Context;

use crate::blueprint::DungeonBlueprint;
use crate::loaders::{LoadResult, read_file};

/// Loader for dungeon layouts from RON files.
pub struct BlueprintLoader;

impl BlueprintLoader {
    pub fn load(path: &Path) -> LoadResult<DungeonBlueprint> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid blueprint {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<DungeonBlueprint> {
        let blueprint: DungeonBlueprint = ron::from_str(content)?;
        Ok(blueprint)
    }
}
