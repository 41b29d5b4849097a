//! Per-level procedural placement of bodies and pursuers
//!
//! All randomness comes from the spawner's own seeded PCG stream, so the
//! same seed always yields the same sequence of levels.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Body, Pursuer};
use crate::consts::*;

/// Area bodies are scattered over (inclusive, integer coordinates)
const BODY_X_RANGE: (i32, i32) = (100, 1800);
const BODY_Y_RANGE: (i32, i32) = (100, 800);
const BODY_RADIUS_RANGE: (i32, i32) = (30, 60);
const BODY_COLOR_MIN: u8 = 100;

/// Pursuer spawn sentinels just outside the reference field
const PURSUER_LEFT_X: f32 = -100.0;
const PURSUER_RIGHT_X: f32 = 2000.0;
const PURSUER_TOP_Y: f32 = -100.0;
const PURSUER_BOTTOM_Y: f32 = 1100.0;
const PURSUER_SPAN_X: i32 = 2000;
const PURSUER_SPAN_Y: i32 = 1000;

/// Value range for bodies at a given level
pub fn body_value_range(level: u32) -> (u64, u64) {
    match level {
        0..=3 => (1_000, 5_000),
        4..=6 => (5_000, 20_000),
        _ => (20_000, 100_000),
    }
}

/// Pursuer speed at a given level (capped)
pub fn pursuer_speed(level: u32) -> f32 {
    (PURSUER_BASE_SPEED + level as f32 * PURSUER_SPEED_PER_LEVEL).min(PURSUER_MAX_SPEED)
}

/// Seeded generator for level contents
#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this spawner was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Scatter a fresh set of bodies for `level`
    pub fn generate_bodies(&mut self, level: u32) -> Vec<Body> {
        let (min_value, max_value) = body_value_range(level);
        (0..BODIES_PER_LEVEL)
            .map(|_| {
                let x = self.rng.random_range(BODY_X_RANGE.0..=BODY_X_RANGE.1) as f32;
                let y = self.rng.random_range(BODY_Y_RANGE.0..=BODY_Y_RANGE.1) as f32;
                let value = self.rng.random_range(min_value..=max_value);
                let radius =
                    self.rng.random_range(BODY_RADIUS_RANGE.0..=BODY_RADIUS_RANGE.1) as f32;
                let color = [
                    self.rng.random_range(BODY_COLOR_MIN..=u8::MAX),
                    self.rng.random_range(BODY_COLOR_MIN..=u8::MAX),
                    self.rng.random_range(BODY_COLOR_MIN..=u8::MAX),
                ];
                Body {
                    pos: Vec2::new(x, y),
                    radius,
                    value,
                    color,
                }
            })
            .collect()
    }

    /// Place a fresh set of pursuers for `level` around the field edges
    pub fn generate_pursuers(&mut self, level: u32) -> Vec<Pursuer> {
        let speed = pursuer_speed(level);
        let damage = level.saturating_mul(PURSUER_DAMAGE_PER_LEVEL);
        (0..PURSUERS_PER_LEVEL)
            .map(|_| {
                let pos = self.pursuer_origin();
                Pursuer::new(pos, speed, damage)
            })
            .collect()
    }

    /// The x and y channels are drawn independently, so a pursuer can land
    /// on a "top" x with a "left band" y. Kept that way on purpose.
    fn pursuer_origin(&mut self) -> Vec2 {
        let x = match self.rng.random_range(0..4) {
            0 => PURSUER_LEFT_X,
            1 => PURSUER_RIGHT_X,
            // top
            2 => self.rng.random_range(0..=PURSUER_SPAN_X) as f32,
            // bottom
            _ => self.rng.random_range(0..=PURSUER_SPAN_X) as f32,
        };
        let y = match self.rng.random_range(0..4) {
            0 => self.rng.random_range(0..=PURSUER_SPAN_Y) as f32,
            1 => self.rng.random_range(0..=PURSUER_SPAN_Y) as f32,
            2 => PURSUER_TOP_Y,
            _ => PURSUER_BOTTOM_Y,
        };
        Vec2::new(x, y)
    }
}
