//! Star Harvest entry point
//!
//! Headless demo host: runs the scheduler with an autopilot on the stick and
//! logs progress until the craft is destroyed or the time limit runs out.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::thread;
    use std::time::{Duration, Instant};

    use star_harvest::platform::{self, Joystick, TickHandle};
    use star_harvest::{Game, Settings};

    platform::init_logging();
    log::info!("Star Harvest (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));
    let settings = Settings::load(&settings_path);
    let persistence = platform::default_persistence(&settings);

    let mut game = Game::new(settings, persistence);
    game.start();

    let handle = match TickHandle::spawn(game) {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("Could not start scheduler: {}", e);
            std::process::exit(1);
        }
    };

    // Virtual stick the autopilot "holds", as a touch host would
    let stick = Joystick::for_widget(200.0, 200.0);
    let started = Instant::now();
    let limit = Duration::from_secs(30);
    let mut last_level = 0;
    while started.elapsed() < limit {
        thread::sleep(Duration::from_millis(50));
        let Some(frame) = handle.latest() else {
            continue;
        };
        if frame.level != last_level {
            last_level = frame.level;
            log::info!("Level {} (score {}, coins {})", frame.level, frame.score, frame.coins);
        }
        if frame.game_over {
            break;
        }
        let reading = autopilot(&frame, &stick);
        handle.set_directive(reading.angle, reading.strength);
    }

    match handle.shutdown() {
        Ok(game) => {
            if let Some(frame) = game.snapshot() {
                println!(
                    "Final: level {}, score {}, coins {}{}",
                    frame.level,
                    frame.score,
                    frame.coins,
                    if frame.game_over { " (destroyed)" } else { "" }
                );
            }
        }
        Err(e) => log::error!("Scheduler did not stop cleanly: {}", e),
    }
}

/// Head for the nearest body, veering away from any pursuer that gets close.
/// The chosen heading is pushed fully onto the stick and read back from it.
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(
    frame: &star_harvest::sim::FrameSnapshot,
    stick: &star_harvest::platform::Joystick,
) -> star_harvest::sim::Directive {
    let craft = frame.craft.pos;

    let threat = frame
        .pursuers
        .iter()
        .map(|p| p.pos)
        .filter(|p| p.distance(craft) < 250.0)
        .min_by(|a, b| a.distance(craft).total_cmp(&b.distance(craft)));
    let heading = match threat {
        Some(threat) => craft - threat,
        None => {
            let target = frame
                .bodies
                .iter()
                .map(|b| b.pos)
                .min_by(|a, b| a.distance(craft).total_cmp(&b.distance(craft)));
            match target {
                Some(target) => target - craft,
                None => return stick.release(),
            }
        }
    };

    let pointer = stick.center + heading.normalize_or_zero() * stick.outer_radius;
    stick.directive(pointer)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host links the library directly; nothing to run here
}
