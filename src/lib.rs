//! Blob Arena - a 2D arena game of circles eating circles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, bot strategy, consumption, game state)
//! - `render`: Drawing surface abstraction and world drawing
//! - `driver`: Frame driver and cancelable frame scheduling
//! - `platform`: Browser glue (canvas surface, animation frames)
//! - `settings`: Session configuration

pub mod driver;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use driver::{FrameDriver, FrameHandle, FrameScheduler, FrameStatus, ManualScheduler};
pub use render::Surface;
pub use sim::Color;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Player defaults
    pub const PLAYER_START_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_NAME_FONT_PX: f32 = 20.0;

    /// Bot defaults
    pub const BOT_SPEED: f32 = 2.5;
    pub const BOT_RADIUS_MIN: f32 = 15.0;
    pub const BOT_RADIUS_SPREAD: f32 = 10.0;
    /// Re-think countdown range in frames (inclusive)
    pub const BOT_THINK_MIN_TICKS: u32 = 60;
    pub const BOT_THINK_MAX_TICKS: u32 = 120;
    /// Enemies bigger than this fraction of a bot are threats
    pub const BOT_THREAT_RATIO: f32 = 0.8;
    /// Bots ignore threats further away than this
    pub const BOT_FLEE_DISTANCE: f32 = 400.0;
    /// Bots hunt the player once bigger than this fraction of it
    pub const BOT_HUNT_RATIO: f32 = 0.8;

    /// Enemy defaults
    pub const ENEMY_RADIUS_MIN: f32 = 15.0;
    pub const ENEMY_RADIUS_SPREAD: f32 = 20.0;
    pub const ENEMY_SPEED_MIN: f32 = 1.0;
    pub const ENEMY_SPEED_SPREAD: f32 = 2.0;

    pub const FOOD_RADIUS: f32 = 5.0;

    /// Population floors, restored every frame
    pub const FOOD_FLOOR: usize = 100;
    pub const BOT_FLOOR: usize = 5;
    pub const ENEMY_FLOOR: usize = 15;

    /// An eater must be strictly bigger than this multiple of its prey
    pub const EAT_RATIO: f32 = 1.2;
    pub const PLAYER_FOOD_GROWTH: f32 = 0.3;
    pub const PLAYER_FOOD_SCORE: f32 = 10.0;
    pub const BOT_FOOD_GROWTH: f32 = 0.2;
    /// Growth per unit of prey radius
    pub const PLAYER_PREY_GROWTH: f32 = 0.3;
    pub const BOT_PREY_GROWTH: f32 = 0.2;
    /// Score per unit of prey radius
    pub const PREY_SCORE_PER_RADIUS: f32 = 10.0;

    /// Reaching this score ends the session
    pub const WIN_SCORE: f32 = 50_000.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
