//! Session shell
//!
//! Wraps the simulation with the lifecycle a host drives: start (restoring
//! saved progress), tick, steer, pause and shutdown (checkpointing progress).
//! Every entry point is a safe no-op before a session has been started.

use crate::persistence::{Persistence, SaveData};
use crate::settings::Settings;
use crate::sim::{FrameSnapshot, GameEvent, GameState, TickInput, tick};

/// Lifecycle of the simulation owned by a [`Game`]
#[derive(Debug, Clone, Default)]
pub enum Session {
    /// No craft exists yet
    #[default]
    Uninitialized,
    /// A craft exists; the state may be running or game over
    Active(GameState),
}

/// One game host: settings, persistence and the current session
#[derive(Debug)]
pub struct Game {
    settings: Settings,
    persistence: Persistence,
    session: Session,
}

impl Game {
    pub fn new(settings: Settings, persistence: Persistence) -> Self {
        Self {
            settings,
            persistence,
            session: Session::Uninitialized,
        }
    }

    /// Host an already-built state, skipping the restore on start
    pub fn with_state(settings: Settings, persistence: Persistence, state: GameState) -> Self {
        Self {
            settings,
            persistence,
            session: Session::Active(state),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The running state, if a session has been started
    pub fn state(&self) -> Option<&GameState> {
        match &self.session {
            Session::Active(state) => Some(state),
            Session::Uninitialized => None,
        }
    }

    /// Start a session with the configured seed
    pub fn start(&mut self) {
        let seed = self.settings.session_seed();
        self.start_with_seed(seed);
    }

    /// Start (or restart) a session and restore saved progress into it
    pub fn start_with_seed(&mut self, seed: u64) {
        let mut state = GameState::with_field(seed, self.settings.field());
        let saved = self.persistence.load();
        if saved != SaveData::default() {
            state.restore_progress(saved.score, saved.coins, saved.level);
        }
        log::info!("Session started with seed {} on level {}", seed, state.level);
        self.session = Session::Active(state);
    }

    /// Advance one tick; returns no events when there is no session
    pub fn tick(&mut self) -> Vec<GameEvent> {
        match &mut self.session {
            Session::Active(state) => tick(state, &TickInput::default()),
            Session::Uninitialized => Vec::new(),
        }
    }

    /// Input adapter entry point
    pub fn set_directive(&mut self, angle: f32, strength: f32) {
        if let Session::Active(state) = &mut self.session {
            state.set_directive(angle, strength);
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.state().is_some_and(GameState::is_game_over)
    }

    pub fn snapshot(&self) -> Option<FrameSnapshot> {
        self.state().map(FrameSnapshot::capture)
    }

    /// Write current progress to storage (best-effort)
    pub fn checkpoint(&mut self) {
        if let Session::Active(state) = &self.session {
            self.persistence
                .save(state.score, state.coins, state.level);
        }
    }

    /// Host is going to the background
    pub fn pause(&mut self) {
        log::info!("Pausing");
        self.checkpoint();
    }

    /// Host is being torn down
    pub fn shutdown(&mut self) {
        log::info!("Shutting down");
        self.checkpoint();
    }
}
