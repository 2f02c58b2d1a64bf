//! Error types for the log watcher.

use std::path::PathBuf;

/// Errors produced while setting up the watcher.
///
/// Failures while tailing are transient and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("failed to install client config at {path}: {source}")]
    ClientConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("watcher already running")]
    AlreadyRunning,
}
