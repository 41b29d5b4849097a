//! Platform abstraction layer
//!
//! Handles host-facing concerns around the simulation:
//! - Time/ticks (fixed-rate scheduler thread)
//! - Input (virtual joystick geometry)
//! - Storage (LocalStorage on web)

pub mod input;
pub mod scheduler;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use input::Joystick;
pub use scheduler::{Command, TickHandle};

/// Initialize logging for the current target
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Initialize logging for the current target
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Progress store appropriate for the current target
#[cfg(not(target_arch = "wasm32"))]
pub fn default_persistence(settings: &crate::Settings) -> crate::persistence::Persistence {
    crate::persistence::Persistence::new(crate::persistence::JsonFileStore::new(
        settings.save_dir.clone(),
    ))
}

/// Progress store appropriate for the current target
#[cfg(target_arch = "wasm32")]
pub fn default_persistence(_settings: &crate::Settings) -> crate::persistence::Persistence {
    crate::persistence::Persistence::new(storage::LocalStorageStore)
}
