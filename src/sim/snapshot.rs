//! Read-only per-tick view of a session for renderers and other observers.

use serde::{Deserialize, Serialize};

use super::state::{Body, Burst, Craft, GameState, Pursuer};

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Ticks processed when this frame was taken
    pub tick: u64,
    pub craft: Craft,
    pub bodies: Vec<Body>,
    pub pursuers: Vec<Pursuer>,
    pub bursts: Vec<Burst>,
    pub score: u64,
    pub coins: u64,
    pub level: u32,
    pub game_over: bool,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            craft: state.craft.clone(),
            bodies: state.bodies.clone(),
            pursuers: state.pursuers.clone(),
            bursts: state.bursts.clone(),
            score: state.score,
            coins: state.coins,
            level: state.level,
            game_over: state.is_game_over(),
        }
    }
}
