//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (insertion order, removal never reorders)
//! - No rendering or platform dependencies

pub mod bot;
pub mod collision;
pub mod entity;
pub mod geometry;
pub mod state;
pub mod tick;

pub use bot::{Bot, BotTarget, Strategy, Surroundings};
pub use collision::resolve_collisions;
pub use entity::{Body, Circle, Color, Enemy, Food, Player};
pub use geometry::{Bounds, distance_to};
pub use state::{EntityRef, GameEvent, GameOverReason, GamePhase, GameState};
pub use tick::{TickInput, advance, settle, tick};
