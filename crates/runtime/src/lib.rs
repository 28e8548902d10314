//! Runtime services around the pure rules crate.
//!
//! `game-core` performs no I/O; this crate owns everything that touches the
//! outside world on its behalf. Today that is persistence:
//! - [`SaveRepository`] is the contract for named player save slots
//! - [`FileSaveRepository`] stores slots as JSON files with atomic writes
//! - [`InMemorySaveRepository`] backs tests and ephemeral sessions
pub mod repository;

pub use repository::{
    AUTOSAVE_SLOT, FileSaveRepository, InMemorySaveRepository, PLAYER_SLOT, RepositoryError,
    Result, SaveRepository,
};
