//! Save/load of session progress
//!
//! Features:
//! - Three integers (`score`, `coins`, `level`) under the `GameState` namespace
//! - Pluggable key-value backends (memory, JSON file, browser LocalStorage)
//! - Corruption and outage recovery: loads fall back to fresh-save defaults,
//!   saves are best-effort

pub mod file;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COINS, DEFAULT_LEVEL, DEFAULT_SCORE};
use crate::error::{GameError, Result};

pub use file::JsonFileStore;

/// Namespace all progress fields live under
pub const NAMESPACE: &str = "GameState";
pub const KEY_SCORE: &str = "score";
pub const KEY_COINS: &str = "coins";
pub const KEY_LEVEL: &str = "level";

/// Durable string-keyed integer storage, grouped by namespace
pub trait KeyValueStore: Send {
    /// Read one field; `Ok(None)` when it was never written
    fn get_int(&self, namespace: &str, key: &str) -> Result<Option<i64>>;

    /// Write several fields of one namespace together
    fn set_ints(&mut self, namespace: &str, entries: &[(&str, i64)]) -> Result<()>;
}

/// Volatile store for tests and headless hosts
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<(String, String), i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, namespace: &str, key: &str) -> Result<Option<i64>> {
        Ok(self
            .entries
            .get(&(namespace.to_string(), key.to_string()))
            .copied())
    }

    fn set_ints(&mut self, namespace: &str, entries: &[(&str, i64)]) -> Result<()> {
        for &(key, value) in entries {
            self.entries
                .insert((namespace.to_string(), key.to_string()), value);
        }
        Ok(())
    }
}

/// Persisted progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub score: u64,
    pub coins: u64,
    pub level: u32,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            score: DEFAULT_SCORE,
            coins: DEFAULT_COINS,
            level: DEFAULT_LEVEL,
        }
    }
}

/// Reads and writes [`SaveData`] through a [`KeyValueStore`]
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Persistence backed by a [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Load progress, substituting defaults for anything unreadable
    pub fn load(&self) -> SaveData {
        match self.try_load() {
            Ok(data) => {
                log::info!(
                    "Loaded progress: score {}, coins {}, level {}",
                    data.score,
                    data.coins,
                    data.level
                );
                data
            }
            Err(e) => {
                log::warn!("Could not load progress ({}), starting fresh", e);
                SaveData::default()
            }
        }
    }

    /// Save progress; failures are logged and otherwise ignored
    pub fn save(&mut self, score: u64, coins: u64, level: u32) {
        let data = SaveData {
            score,
            coins,
            level,
        };
        match self.try_save(&data) {
            Ok(()) => log::info!("Progress saved (level {})", level),
            Err(e) => log::warn!("Could not save progress: {}", e),
        }
    }

    pub fn try_load(&self) -> Result<SaveData> {
        let defaults = SaveData::default();
        let score = self.read_field(KEY_SCORE)?.unwrap_or(defaults.score);
        let coins = self.read_field(KEY_COINS)?.unwrap_or(defaults.coins);
        let level = self
            .read_field(KEY_LEVEL)?
            .map(|level| {
                u32::try_from(level)
                    .ok()
                    .filter(|&l| l >= 1)
                    .ok_or(GameError::InvalidValue {
                        key: KEY_LEVEL.to_string(),
                        value: level as i64,
                    })
            })
            .transpose()?
            .unwrap_or(defaults.level);
        Ok(SaveData {
            score,
            coins,
            level,
        })
    }

    pub fn try_save(&mut self, data: &SaveData) -> Result<()> {
        let score = to_stored(KEY_SCORE, data.score)?;
        let coins = to_stored(KEY_COINS, data.coins)?;
        self.store.set_ints(
            NAMESPACE,
            &[
                (KEY_SCORE, score),
                (KEY_COINS, coins),
                (KEY_LEVEL, i64::from(data.level)),
            ],
        )
    }

    /// Fetch a non-negative field
    fn read_field(&self, key: &str) -> Result<Option<u64>> {
        match self.store.get_int(NAMESPACE, key)? {
            Some(value) => u64::try_from(value)
                .map(Some)
                .map_err(|_| GameError::InvalidValue {
                    key: key.to_string(),
                    value,
                }),
            None => Ok(None),
        }
    }
}

fn to_stored(key: &str, value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| GameError::InvalidValue {
        key: key.to_string(),
        value: i64::MAX,
    })
}
