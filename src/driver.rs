//! Frame driver
//!
//! Owns the session state and runs one frame per scheduler callback:
//! move, draw, resolve, then either re-schedule or stop for good. Scheduling
//! goes through [`FrameScheduler`] so the browser can back it with
//! `requestAnimationFrame` and tests can fire frames by hand.

use glam::Vec2;

use crate::render::{Surface, draw_world};
use crate::settings::Settings;
use crate::sim::{Bounds, EntityRef, GameEvent, GameOverReason, GamePhase, GameState, TickInput, advance, settle};

/// Identifies one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// A cancelable source of frame callbacks
pub trait FrameScheduler {
    /// Ask for one more frame callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    /// Withdraw a frame that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Result of running one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStatus {
    /// Next frame is scheduled
    Continue,
    /// The session ended on this frame
    GameOver { reason: GameOverReason, score: f32 },
    /// The driver was already stopped; nothing ran
    Halted,
}

pub struct FrameDriver<S: FrameScheduler> {
    state: GameState,
    settings: Settings,
    input: TickInput,
    scheduler: S,
    pending: Option<FrameHandle>,
    halted: bool,
}

impl<S: FrameScheduler> FrameDriver<S> {
    /// Fresh session sized to `bounds`, pointer resting at the center
    pub fn new(settings: Settings, bounds: Bounds, seed: u64, scheduler: S) -> Self {
        let state = GameState::new(seed, bounds, &settings.player_name);
        log::info!(
            "New session: seed {}, world {}x{}, player {:?}",
            seed,
            bounds.width,
            bounds.height,
            settings.player_name
        );
        Self {
            state,
            settings,
            input: TickInput {
                pointer: bounds.center(),
            },
            scheduler,
            pending: None,
            halted: false,
        }
    }

    /// Schedule the first frame
    pub fn start(&mut self) {
        if !self.halted && self.pending.is_none() {
            self.schedule();
        }
    }

    /// Latest pointer position (last write wins)
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.input.pointer = Vec2::new(x, y);
    }

    /// Surface was resized; takes effect on the next frame
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.bounds = Bounds::new(width, height);
        log::debug!("World resized to {}x{}", width, height);
    }

    /// Run one frame. Called from the scheduler's callback.
    pub fn on_frame(&mut self, surface: &mut impl Surface) -> FrameStatus {
        if self.halted {
            log::warn!("Frame fired after the session ended; ignoring");
            return FrameStatus::Halted;
        }
        // The callback that brought us here has fired
        self.pending = None;

        advance(&mut self.state, &self.input);
        draw_world(&self.state, &self.settings, surface);
        settle(&mut self.state);
        self.log_events();

        match self.state.phase {
            GamePhase::Running => {
                self.schedule();
                FrameStatus::Continue
            }
            GamePhase::GameOver(reason) => {
                self.halt();
                log::info!(
                    "Game over after {} frames: {:?}, score {:.0}",
                    self.state.time_ticks,
                    reason,
                    self.state.player.score
                );
                FrameStatus::GameOver {
                    reason,
                    score: self.state.player.score,
                }
            }
        }
    }

    /// Stop for good, canceling the outstanding frame if there is one.
    /// Safe to call repeatedly; the frame is only canceled once.
    pub fn halt(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.halted = true;
    }

    fn schedule(&mut self) {
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Scheduler refused a frame; the game loop has stopped");
        }
    }

    fn log_events(&self) {
        for event in &self.state.events {
            if let GameEvent::Consumed { eater, eaten, radius } = event {
                match eaten {
                    EntityRef::Food(_) => log::trace!("{:?} ate food", eater),
                    _ => log::debug!("{:?} ate {:?} (radius {:.1})", eater, eaten, radius),
                }
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn score(&self) -> f32 {
        self.state.player.score
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }
}

/// Scheduler driven by hand: frames fire only when [`FrameDriver::pump`]
/// is called. Used by tests and the headless runner.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    /// Requested frames that have not fired or been canceled
    pub pending: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
    /// Total frames ever requested
    pub requested: u64,
}

impl ManualScheduler {
    /// Take the oldest outstanding frame, as if the host fired it
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

impl FrameDriver<ManualScheduler> {
    /// Fire the next outstanding frame, if any
    pub fn pump(&mut self, surface: &mut impl Surface) -> Option<FrameStatus> {
        self.scheduler.take_due()?;
        Some(self.on_frame(surface))
    }
}
