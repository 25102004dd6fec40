//! Error types for the planner.

use std::path::PathBuf;

/// All errors that can occur during a planner run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("failed to read snapshot file {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse snapshot JSON: {0}")]
    SnapshotParse(#[from] serde_json::Error),

    #[error("engine error: {0}")]
    Engine(#[from] gridfolio::Error),

    #[error("audit log error: {0}")]
    Audit(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
