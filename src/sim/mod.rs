//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, compacted after each pass)
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::circles_overlap;
pub use snapshot::FrameSnapshot;
pub use spawn::Spawner;
pub use state::{Body, Burst, Craft, Field, GameEvent, GamePhase, GameState, Pursuer};
pub use tick::{Directive, TickInput, tick};
