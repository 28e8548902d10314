//! Creature construction by type identifier.
//!
//! Rooms are populated from type identifiers (`"goblin"`, `"dragon"`). A
//! [`CreatureRegistry`] maps a finite set of identifiers to constructor
//! closures registered at startup; unknown identifiers are a typed failure.

use std::collections::BTreeMap;

use crate::actor::Monster;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    #[error("unknown creature type: {0}")]
    UnknownCreatureType(String),
}

impl GameError for FactoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "FACTORY_UNKNOWN_CREATURE_TYPE"
    }
}

/// Produces default-initialized creatures of a named type.
pub trait CreatureFactory {
    fn create(&self, type_id: &str) -> Result<Monster, FactoryError>;
}

pub type CreatureConstructor = Box<dyn Fn() -> Monster + Send + Sync>;

/// Case-insensitive identifier → constructor table.
#[derive(Default)]
pub struct CreatureRegistry {
    constructors: BTreeMap<String, CreatureConstructor>,
}

impl CreatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `constructor` under `type_id`, replacing any previous entry.
    pub fn register(
        &mut self,
        type_id: &str,
        constructor: impl Fn() -> Monster + Send + Sync + 'static,
    ) -> &mut Self {
        let key = type_id.to_ascii_lowercase();
        if self
            .constructors
            .insert(key, Box::new(constructor))
            .is_some()
        {
            tracing::debug!(type_id, "creature constructor replaced");
        }
        self
    }

    pub fn with(
        mut self,
        type_id: &str,
        constructor: impl Fn() -> Monster + Send + Sync + 'static,
    ) -> Self {
        self.register(type_id, constructor);
        self
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.constructors
            .contains_key(&type_id.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl CreatureFactory for CreatureRegistry {
    fn create(&self, type_id: &str) -> Result<Monster, FactoryError> {
        self.constructors
            .get(&type_id.to_ascii_lowercase())
            .map(|constructor| constructor())
            .ok_or_else(|| FactoryError::UnknownCreatureType(type_id.to_owned()))
    }
}

impl core::fmt::Debug for CreatureRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CreatureRegistry")
            .field("types", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}
