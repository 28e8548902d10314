//! Console client for the dungeon game.
//!
//! ```text
//! main
//!   ├─→ config   (environment)
//!   ├─→ logging  (file subscriber)
//!   └─→ App      (menu and game loop)
//!         ├─→ command (text → Command)
//!         ├─→ GameSession
//!         ├─→ render  (GameEvent → text)
//!         └─→ SaveRepository
//! ```

pub mod app;
pub mod command;
pub mod config;
pub mod logging;
pub mod render;

pub use app::{App, Content};
pub use command::{Command, CommandError, HELP, ItemRef};
pub use config::ClientConfig;
pub use logging::setup_logging;
