//! Dungeon game client binary.
//!
//! ```bash
//! DUNGEON_DATA_DIR=crates/game/content/data cargo run -p dungeon-client
//! ```

use std::io;

use anyhow::Result;
use dungeon_client::config::log_dir;
use dungeon_client::{App, ClientConfig, Content, setup_logging};
use runtime::FileSaveRepository;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let session_id = config.session_id();
    let _guard = setup_logging(&log_dir(), &session_id)?;

    let content = Content::load_or_builtin(config.data_dir.as_deref())?;
    let saves = FileSaveRepository::new(config.save_dir())?;
    let seed = config.seed();
    tracing::info!(seed, save_dir = %config.save_dir().display(), "client configured");

    let stdin = io::stdin();
    let status = App::new(stdin.lock(), io::stdout(), content, Box::new(saves), seed)
        .with_pacing(config.pacing)
        .run()?;
    tracing::info!(%status, "client exiting");
    Ok(())
}
