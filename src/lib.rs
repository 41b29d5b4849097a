//! Star Harvest - collect-and-evade arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, tick)
//! - `game`: Session shell (restore on start, checkpoint on pause/destroy)
//! - `platform`: Fixed-tick scheduler, joystick geometry, browser storage
//! - `persistence`: Save/load of score, coins and level
//! - `settings`: Field geometry and runtime configuration

pub mod error;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use game::{Game, Session};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate of the scheduler
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Reference play field
    pub const FIELD_WIDTH: f32 = 1920.0;
    pub const FIELD_HEIGHT: f32 = 1080.0;

    /// Craft defaults
    pub const CRAFT_START_X: f32 = 500.0;
    pub const CRAFT_START_Y: f32 = 500.0;
    pub const CRAFT_SPEED: f32 = 8.0;
    pub const CRAFT_RADIUS: f32 = 40.0;
    /// Joystick strength at or below this leaves the craft idle
    pub const STEER_DEADZONE: f32 = 0.1;

    /// Pursuer defaults
    pub const PURSUER_RADIUS: f32 = 35.0;
    pub const PURSUER_BASE_SPEED: f32 = 2.0;
    pub const PURSUER_SPEED_PER_LEVEL: f32 = 0.5;
    pub const PURSUER_MAX_SPEED: f32 = 8.0;
    pub const PURSUER_DAMAGE_PER_LEVEL: u32 = 10;

    /// Spawn counts per level
    pub const BODIES_PER_LEVEL: usize = 20;
    pub const PURSUERS_PER_LEVEL: usize = 10;

    /// Burst effect
    pub const BURST_RADIUS: f32 = 50.0;
    pub const BURST_DECAY: f32 = 0.05;
    pub const BURST_GROWTH: f32 = 2.0;

    /// Coins awarded per level reached (multiplied by the new level)
    pub const LEVEL_BONUS: u64 = 1_000_000;

    /// Fresh-save defaults
    pub const DEFAULT_SCORE: u64 = 0;
    pub const DEFAULT_COINS: u64 = 1_000_000;
    pub const DEFAULT_LEVEL: u32 = 1;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
