//! One simulation frame
//!
//! A frame is split in two so the driver can draw in between:
//! [`advance`] moves everything, [`settle`] resolves consumption, checks for
//! the end of the session and restores the population floors.

use glam::Vec2;

use super::bot::Surroundings;
use super::collision::resolve_collisions;
use super::state::{GameOverReason, GameState};
use crate::consts::*;

/// Input sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in world coordinates (last write wins)
    pub pointer: Vec2,
}

/// Move the player, then bots, then enemies. Food never moves.
pub fn advance(state: &mut GameState, input: &TickInput) {
    if !state.is_running() {
        return;
    }
    state.events.clear();
    state.time_ticks += 1;

    state.player.update(input.pointer, &state.bounds);

    let world = Surroundings {
        player: &state.player,
        foods: &state.foods,
        enemies: &state.enemies,
        bounds: &state.bounds,
    };
    for bot in &mut state.bots {
        bot.update(&world, &mut state.rng);
    }

    for enemy in &mut state.enemies {
        enemy.update(&state.bounds);
    }
}

/// Resolve consumption, end the session if it is over, otherwise replenish.
pub fn settle(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    resolve_collisions(state);

    if state.is_running() && state.player.score >= WIN_SCORE {
        state.end(GameOverReason::ScoreLimit);
    }

    if state.is_running() {
        state.replenish();
    }
}

/// Advance the game state by one full frame (no drawing)
pub fn tick(state: &mut GameState, input: &TickInput) {
    advance(state, input);
    settle(state);
}
