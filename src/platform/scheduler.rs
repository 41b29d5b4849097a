//! Fixed-rate tick scheduler
//!
//! A dedicated thread owns the [`Game`] outright. Hosts talk to it through a
//! command channel and observe it through immutable per-tick snapshots, so
//! rendering never contends with the update for a lock.
//!
//! Ticks that overrun their period simply run late; the schedule restarts
//! from the late tick instead of bursting to catch up.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::error::{GameError, Result};
use crate::game::Game;
use crate::sim::{Directive, FrameSnapshot, GameEvent};

/// Messages from the host to the scheduler thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Steer(Directive),
    /// Stop ticking and checkpoint progress
    Pause,
    Resume,
    /// Checkpoint and hand the game back
    Shutdown,
}

type SharedFrame = Arc<Mutex<Option<Arc<FrameSnapshot>>>>;

/// Host-side handle to a running scheduler
#[derive(Debug)]
pub struct TickHandle {
    commands: Sender<Command>,
    latest: SharedFrame,
    steps: Arc<AtomicU64>,
    worker: Option<JoinHandle<Game>>,
}

impl TickHandle {
    /// Move `game` onto a new scheduler thread and start ticking
    pub fn spawn(game: Game) -> Result<Self> {
        let (commands, inbox) = mpsc::channel();
        let latest: SharedFrame = Arc::new(Mutex::new(game.snapshot().map(Arc::new)));
        let steps = Arc::new(AtomicU64::new(0));

        let worker = {
            let latest = Arc::clone(&latest);
            let steps = Arc::clone(&steps);
            thread::Builder::new()
                .name("star-harvest-tick".into())
                .spawn(move || run(game, inbox, latest, steps))
                .map_err(|e| GameError::Scheduler(e.to_string()))?
        };

        Ok(Self {
            commands,
            latest,
            steps,
            worker: Some(worker),
        })
    }

    pub fn set_directive(&self, angle: f32, strength: f32) {
        self.send(Command::Steer(Directive { angle, strength }));
    }

    pub fn pause(&self) {
        self.send(Command::Pause);
    }

    pub fn resume(&self) {
        self.send(Command::Resume);
    }

    /// Most recently published frame
    pub fn latest(&self) -> Option<Arc<FrameSnapshot>> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Scheduler iterations completed, ticking or paused
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::Acquire)
    }

    /// Stop the thread, checkpoint, and take the game back
    pub fn shutdown(mut self) -> Result<Game> {
        self.send(Command::Shutdown);
        let worker = self
            .worker
            .take()
            .ok_or_else(|| GameError::Scheduler("scheduler already stopped".into()))?;
        worker
            .join()
            .map_err(|_| GameError::Scheduler("scheduler thread panicked".into()))
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            log::warn!("Scheduler is gone; dropped {:?}", command);
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.commands.send(Command::Shutdown);
            let _ = worker.join();
        }
    }
}

fn publish(latest: &SharedFrame, game: &Game) {
    if let Some(frame) = game.snapshot() {
        *latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(frame));
    }
}

fn run(
    mut game: Game,
    inbox: Receiver<Command>,
    latest: SharedFrame,
    steps: Arc<AtomicU64>,
) -> Game {
    let period = game.settings().tick_period();
    let mut paused = false;
    let mut next = Instant::now();
    log::info!("Scheduler running at {:?} per tick", period);

    loop {
        loop {
            match inbox.try_recv() {
                Ok(Command::Steer(d)) => game.set_directive(d.angle, d.strength),
                Ok(Command::Pause) => {
                    if !paused {
                        paused = true;
                        game.pause();
                    }
                }
                Ok(Command::Resume) => {
                    paused = false;
                    next = Instant::now();
                }
                Ok(Command::Shutdown) | Err(TryRecvError::Disconnected) => {
                    game.shutdown();
                    publish(&latest, &game);
                    return game;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        // A finished game's last frame stays published as-is
        if !paused && !game.is_game_over() {
            let events = game.tick();
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::CraftDestroyed { .. }))
            {
                log::info!("Game over; scheduler idling until shutdown");
            }
            publish(&latest, &game);
        }
        steps.fetch_add(1, Ordering::Release);

        next += period;
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        } else {
            next = now;
        }
    }
}
