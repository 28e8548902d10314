//! Repository layer for dynamic runtime data.
//!
//! Repositories hold data that CHANGES during play, i.e. the player's save
//! slots. Static content (bestiary, layouts, balance) lives in `game-content`.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::{AUTOSAVE_SLOT, PLAYER_SLOT, SaveRepository};
