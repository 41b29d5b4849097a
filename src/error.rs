//! Crate error type.
//!
//! The simulation itself never fails; these errors only come out of the
//! infrastructure around it (storage, settings files, the scheduler thread).

use std::io;

/// Errors produced outside the per-tick simulation.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Reading or writing a backing file failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A stored document could not be parsed or written as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored field holds a value outside the range the game accepts.
    #[error("stored field '{key}' has invalid value {value}")]
    InvalidValue { key: String, value: i64 },

    /// A settings document holds a value the game cannot run with.
    #[error("setting '{key}' has invalid value {value}")]
    InvalidSetting { key: String, value: f32 },

    /// The storage backend is not reachable (e.g. LocalStorage disabled).
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The scheduler thread could not be started or panicked.
    #[error("scheduler error: {0}")]
    Scheduler(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
