//! Client configuration structures and loaders.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use directories::ProjectDirs;

/// Configuration required to start the console client.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `dungeon.ron`.
    pub data_dir: Option<PathBuf>,
    pub save_dir: Option<PathBuf>,
    pub session_id: Option<String>,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
    /// Delay before each printed enemy action.
    pub pacing: Duration,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_DATA_DIR` - Content directory (default: built-in content)
    /// - `DUNGEON_SAVE_DIR` - Directory for save slots (default: platform data dir)
    /// - `GAME_SESSION_ID` - Session identifier for log files (default: timestamp)
    /// - `DUNGEON_SEED` - Random seed (default: random)
    /// - `DUNGEON_PACING_MS` - Enemy action delay in milliseconds (default: 0)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var_os("DUNGEON_DATA_DIR").map(PathBuf::from),
            save_dir: env::var_os("DUNGEON_SAVE_DIR").map(PathBuf::from),
            session_id: env::var("GAME_SESSION_ID").ok(),
            seed: read_env::<u64>("DUNGEON_SEED"),
            pacing: read_env::<u64>("DUNGEON_PACING_MS")
                .map(Duration::from_millis)
                .unwrap_or_default(),
        }
    }

    pub fn session_id(&self) -> String {
        self.session_id.clone().unwrap_or_else(|| {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            format!("session_{timestamp}")
        })
    }

    pub fn save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_dir().join("saves"))
                .unwrap_or_else(|| PathBuf::from("/tmp/dungeon/saves"))
        })
    }

    /// The configured seed, or a fresh random one.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Platform-specific log directory.
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/dungeon/logs"))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "dungeon")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let config = ClientConfig {
            save_dir: Some(PathBuf::from("/srv/saves")),
            session_id: Some("abc".into()),
            seed: Some(7),
            ..ClientConfig::default()
        };
        assert_eq!(config.save_dir(), PathBuf::from("/srv/saves"));
        assert_eq!(config.session_id(), "abc");
        assert_eq!(config.seed(), 7);
    }

    #[test]
    fn generated_session_id_is_prefixed() {
        assert!(ClientConfig::default().session_id().starts_with("session_"));
    }
}
