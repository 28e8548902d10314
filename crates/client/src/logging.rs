//! File logging. The console is reserved for game text.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a subscriber writing to `<log_dir>/<session_id>/client.log`.
///
/// The returned guard flushes the writer on drop; keep it alive for the
/// lifetime of the process.
pub fn setup_logging(log_dir: &Path, session_id: &str) -> Result<WorkerGuard> {
    let session_log_dir = log_dir.join(session_id);
    std::fs::create_dir_all(&session_log_dir)
        .with_context(|| format!("cannot create {}", session_log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("a global subscriber is already installed")?;

    tracing::info!(session = session_id, "logging initialized");
    tracing::info!("log file: {}/client.log", session_log_dir.display());
    Ok(guard)
}
