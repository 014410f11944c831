//! Game state and core simulation types
//!
//! Everything a session needs lives in [`GameState`]; a fresh session is a
//! fresh `GameState`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bot::Bot;
use super::entity::{Enemy, Food, Player};
use super::geometry::Bounds;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Session ended; nothing ticks any more
    GameOver(GameOverReason),
}

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The player touched something it could not out-size
    Consumed { by: EntityRef },
    /// The player reached the winning score
    ScoreLimit,
}

/// Reference to a live entity in events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityRef {
    Player,
    Bot(u32),
    Enemy(u32),
    Food(u32),
}

/// Something that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// `eater` swallowed `eaten`, whose radius was `radius`
    Consumed {
        eater: EntityRef,
        eaten: EntityRef,
        radius: f32,
    },
    GameOver {
        reason: GameOverReason,
    },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// World size, follows the drawing surface
    pub bounds: Bounds,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub bots: Vec<Bot>,
    pub enemies: Vec<Enemy>,
    pub foods: Vec<Food>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with every population at its floor
    pub fn new(seed: u64, bounds: Bounds, player_name: &str) -> Self {
        let mut state = Self::empty(seed, bounds, player_name);
        state.replenish();
        state
    }

    /// A session with only the player in it
    pub fn empty(seed: u64, bounds: Bounds, player_name: &str) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            phase: GamePhase::Running,
            time_ticks: 0,
            player: Player::new(&bounds, player_name),
            bots: Vec::with_capacity(BOT_FLOOR),
            enemies: Vec::with_capacity(ENEMY_FLOOR),
            foods: Vec::with_capacity(FOOD_FLOOR),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn end(&mut self, reason: GameOverReason) {
        if self.is_running() {
            self.phase = GamePhase::GameOver(reason);
            self.events.push(GameEvent::GameOver { reason });
        }
    }

    pub fn spawn_food(&mut self) {
        let id = self.next_entity_id();
        let food = Food::spawn(id, &self.bounds, &mut self.rng);
        self.foods.push(food);
    }

    pub fn spawn_bot(&mut self) {
        let id = self.next_entity_id();
        let bot = Bot::spawn(id, &self.bounds, &mut self.rng);
        self.bots.push(bot);
    }

    pub fn spawn_enemy(&mut self) {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, &self.bounds, &mut self.rng);
        self.enemies.push(enemy);
    }

    /// Top every population back up to its floor
    pub fn replenish(&mut self) {
        let (foods, bots, enemies) = (self.foods.len(), self.bots.len(), self.enemies.len());

        while self.foods.len() < FOOD_FLOOR {
            self.spawn_food();
        }
        while self.bots.len() < BOT_FLOOR {
            self.spawn_bot();
        }
        while self.enemies.len() < ENEMY_FLOOR {
            self.spawn_enemy();
        }

        let spawned = (FOOD_FLOOR.saturating_sub(foods), BOT_FLOOR.saturating_sub(bots), ENEMY_FLOOR.saturating_sub(enemies));
        if spawned != (0, 0, 0) {
            log::debug!(
                "Replenished {} food, {} bots, {} enemies",
                spawned.0,
                spawned.1,
                spawned.2
            );
        }
    }
}
