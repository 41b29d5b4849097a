//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. Presentation-only fields (body
//! color) ride along but never influence simulation outcomes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawn::Spawner;
use crate::consts::*;
use crate::polar_to_cartesian;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Craft destroyed; terminal
    GameOver,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The craft swept up a body worth `value`
    BodyCollected { value: u64, pos: Vec2 },
    /// A pursuer reached the craft
    CraftDestroyed { pos: Vec2 },
    /// Every body was collected; `level` is the level just entered
    LevelCleared { level: u32, bonus: u64 },
}

/// Rectangular play field with the origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    /// Clamp a circle's center so the circle stays inside the field.
    /// On an axis too short for the circle, the center pins to the middle.
    pub fn clamp(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(pos.x, radius, self.width),
            clamp_axis(pos.y, radius, self.height),
        )
    }
}

fn clamp_axis(value: f32, radius: f32, extent: f32) -> f32 {
    if extent < radius * 2.0 {
        return extent / 2.0;
    }
    // max/min rather than f32::clamp: a NaN extent must not panic
    value.max(radius).min(extent - radius)
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub moving: bool,
}

impl Default for Craft {
    fn default() -> Self {
        Self {
            pos: Vec2::new(CRAFT_START_X, CRAFT_START_Y),
            vel: Vec2::ZERO,
            speed: CRAFT_SPEED,
            radius: CRAFT_RADIUS,
            moving: false,
        }
    }
}

impl Craft {
    /// Apply a joystick directive (angle in radians, strength in [0, 1])
    pub fn steer(&mut self, angle: f32, strength: f32) {
        self.moving = strength > STEER_DEADZONE;
        self.vel = if self.moving {
            polar_to_cartesian(strength * self.speed, angle)
        } else {
            Vec2::ZERO
        };
    }

    /// Move by one tick of velocity, then keep the hull inside the field
    pub fn advance(&mut self, field: &Field) {
        if self.moving {
            self.pos = field.clamp(self.pos + self.vel, self.radius);
        }
    }
}

/// A collectible body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub radius: f32,
    pub value: u64,
    /// RGB tint for the renderer
    pub color: [u8; 3],
}

/// A hostile that homes toward the craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Scales with level but nothing reads it yet: any contact is fatal.
    pub damage: u32,
}

impl Pursuer {
    pub fn new(pos: Vec2, speed: f32, damage: u32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            speed,
            radius: PURSUER_RADIUS,
            damage,
        }
    }

    /// Head straight for `target` at full speed. No field clamp.
    pub fn home_toward(&mut self, target: Vec2) {
        let to_target = target - self.pos;
        let heading = to_target.y.atan2(to_target.x);
        self.vel = polar_to_cartesian(self.speed, heading);
        self.pos += self.vel;
    }
}

/// Transient explosion effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Burst {
    pub pos: Vec2,
    pub radius: f32,
    /// 0-1, decreases every tick
    pub life: f32,
}

impl Burst {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: BURST_RADIUS,
            life: 1.0,
        }
    }

    /// Age by one tick. Returns false once the burst has burnt out.
    pub fn decay(&mut self) -> bool {
        self.life -= BURST_DECAY;
        self.radius += BURST_GROWTH;
        self.life > 0.0
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the spawner was built from
    pub seed: u64,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Currency; persisted as `coins`
    pub coins: u64,
    pub phase: GamePhase,
    /// Ticks processed while running
    pub time_ticks: u64,
    pub field: Field,
    pub craft: Craft,
    pub bodies: Vec<Body>,
    pub pursuers: Vec<Pursuer>,
    pub bursts: Vec<Burst>,
    pub(crate) spawner: Spawner,
}

impl GameState {
    /// Create a level-1 session on the reference field
    pub fn new(seed: u64) -> Self {
        Self::with_field(seed, Field::default())
    }

    /// Create a level-1 session on a custom field
    pub fn with_field(seed: u64, field: Field) -> Self {
        Self::with_spawner(Spawner::new(seed), field)
    }

    /// Create a level-1 session around an existing spawner
    pub fn with_spawner(spawner: Spawner, field: Field) -> Self {
        let mut state = Self {
            seed: spawner.seed(),
            level: DEFAULT_LEVEL,
            score: DEFAULT_SCORE,
            coins: DEFAULT_COINS,
            phase: GamePhase::Running,
            time_ticks: 0,
            field,
            craft: Craft::default(),
            bodies: Vec::new(),
            pursuers: Vec::new(),
            bursts: Vec::new(),
            spawner,
        };
        state.populate_level();
        state
    }

    /// An empty running session with no bodies or pursuers.
    ///
    /// Useful for hosts that script their own layouts (and for tests).
    pub fn empty(seed: u64) -> Self {
        let mut state = Self::new(seed);
        state.bodies.clear();
        state.pursuers.clear();
        state
    }

    /// Replace bodies and pursuers with a fresh spawn for the current level
    pub fn populate_level(&mut self) {
        self.bodies = self.spawner.generate_bodies(self.level);
        self.pursuers = self.spawner.generate_pursuers(self.level);
    }

    /// Overwrite progress with restored values and respawn for that level
    pub fn restore_progress(&mut self, score: u64, coins: u64, level: u32) {
        self.score = score;
        self.coins = coins;
        self.level = level.max(1);
        self.populate_level();
        log::info!(
            "Restored progress: level {}, score {}, coins {}",
            self.level,
            self.score,
            self.coins
        );
    }

    /// Input adapter: forward a joystick reading to the craft
    pub fn set_directive(&mut self, angle: f32, strength: f32) {
        self.craft.steer(angle, strength);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
