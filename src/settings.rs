//! Runtime settings
//!
//! Persisted separately from progress as a small JSON document. Any field
//! missing from the document keeps its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{CRAFT_RADIUS, FIELD_HEIGHT, FIELD_WIDTH, TICKS_PER_SECOND};
use crate::error::{GameError, Result};
use crate::sim::Field;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Scheduler ===
    /// Simulation rate in ticks per second
    pub tick_rate: u32,

    // === Session ===
    /// Fixed spawner seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
    /// Directory for the JSON progress store (native builds)
    pub save_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            tick_rate: TICKS_PER_SECOND,
            seed: None,
            save_dir: PathBuf::from("save"),
        }
    }
}

impl Settings {
    pub fn field(&self) -> Field {
        Field {
            width: self.field_width,
            height: self.field_height,
        }
    }

    /// Wall-clock budget of one tick
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    /// Seed for a new session
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(time_seed)
    }

    /// Parse and validate a settings document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Each field dimension must be finite and fit the craft
    pub fn validate(&self) -> Result<()> {
        let min_extent = CRAFT_RADIUS * 2.0;
        for (key, value) in [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
        ] {
            if !value.is_finite() || value < min_extent {
                return Err(GameError::InvalidSetting {
                    key: key.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(GameError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(GameError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn time_seed() -> u64 {
    rand::random()
}
