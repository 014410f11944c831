//! Computer-controlled bots and their strategy selection
//!
//! A bot periodically picks a goal: flee the nearest threatening enemy,
//! hunt the player, or forage for the nearest food. Between re-thinks it
//! steers straight at whatever it picked.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Circle, Color, Enemy, Food, Player};
use super::geometry::{Bounds, distance_to};
use crate::consts::*;

/// What a bot is currently steering toward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BotTarget {
    /// Track the player's live position
    Player,
    /// A food pellet, by id. Invalid once that pellet is eaten.
    Food(u32),
    /// A fixed point (flee point or random wander point)
    Point(Vec2),
}

/// The goal chosen at the last re-think
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strategy {
    #[default]
    Idle,
    Flee,
    Hunt,
    Forage,
}

/// Read-only view of the world a bot decides from
pub struct Surroundings<'a> {
    pub player: &'a Player,
    pub foods: &'a [Food],
    pub enemies: &'a [Enemy],
    pub bounds: &'a Bounds,
}

impl Surroundings<'_> {
    /// Position of a target, or `None` if it no longer refers to anything live
    pub fn locate(&self, target: &BotTarget) -> Option<Vec2> {
        match target {
            BotTarget::Player => (self.player.radius() > 0.0).then(|| self.player.pos()),
            BotTarget::Food(id) => self
                .foods
                .iter()
                .find(|f| f.id == *id && f.radius() > 0.0)
                .map(|f| f.pos()),
            BotTarget::Point(p) => Some(*p),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    pub id: u32,
    pub body: Body,
    pub speed: f32,
    pub target: Option<BotTarget>,
    pub strategy: Strategy,
    /// Frames left until the next re-think
    pub think_ticks: u32,
}

impl Bot {
    pub fn spawn(id: u32, bounds: &Bounds, rng: &mut Pcg32) -> Self {
        let pos = Body::random_pos(bounds, rng);
        let radius = BOT_RADIUS_MIN + rng.random::<f32>() * BOT_RADIUS_SPREAD;
        let color = Color::random_hue(rng);
        Self {
            id,
            body: Body::new(pos, radius, color),
            speed: BOT_SPEED,
            target: None,
            strategy: Strategy::Idle,
            think_ticks: 0,
        }
    }

    /// Re-think if due (or if the target vanished), then steer toward the target.
    pub fn update(&mut self, world: &Surroundings, rng: &mut Pcg32) {
        self.think_ticks = self.think_ticks.saturating_sub(1);

        let mut goal = self.target.as_ref().and_then(|t| world.locate(t));
        if self.think_ticks == 0 || goal.is_none() {
            self.choose_strategy(world, rng);
            self.think_ticks = rng.random_range(BOT_THINK_MIN_TICKS..=BOT_THINK_MAX_TICKS);
            goal = self.target.as_ref().and_then(|t| world.locate(t));
        }

        match goal {
            Some(goal) => self.body.seek(goal, self.speed, world.bounds),
            None => self.body.integrate_contained(world.bounds),
        }
    }

    /// Pick a new target: flee > hunt > forage > wander.
    pub fn choose_strategy(&mut self, world: &Surroundings, rng: &mut Pcg32) {
        let previous = self.strategy;

        let threat = world
            .enemies
            .iter()
            .map(|e| (e, distance_to(&*self, e)))
            .filter(|(e, d)| e.radius() > self.radius() * BOT_THREAT_RATIO && *d < BOT_FLEE_DISTANCE)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(e, _)| e);

        if let Some(enemy) = threat {
            // Mirror our position through the enemy: run directly away
            let away = self.pos() + (self.pos() - enemy.pos());
            self.target = Some(BotTarget::Point(away));
            self.strategy = Strategy::Flee;
        } else if self.radius() > world.player.radius() * BOT_HUNT_RATIO {
            self.target = Some(BotTarget::Player);
            self.strategy = Strategy::Hunt;
        } else {
            let nearest_food = world
                .foods
                .iter()
                .map(|f| (f, distance_to(&*self, f)))
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(f, _)| f.id);

            self.target = Some(match nearest_food {
                Some(id) => BotTarget::Food(id),
                None => BotTarget::Point(Body::random_pos(world.bounds, rng)),
            });
            self.strategy = Strategy::Forage;
        }

        if previous != self.strategy {
            log::trace!("Bot {} strategy {:?} -> {:?}", self.id, previous, self.strategy);
        }
    }

    pub fn eat_prey(&mut self, prey_radius: f32) {
        self.body.radius += prey_radius * BOT_PREY_GROWTH;
    }

    pub fn eat_food(&mut self) {
        self.body.radius += BOT_FOOD_GROWTH;
    }
}

impl Circle for Bot {
    fn body(&self) -> &Body {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn bot_at(pos: Vec2, radius: f32) -> Bot {
        Bot {
            id: 1,
            body: Body::new(pos, radius, Color::Hue(0.0)),
            speed: BOT_SPEED,
            target: None,
            strategy: Strategy::Idle,
            think_ticks: 0,
        }
    }

    fn enemy_at(id: u32, pos: Vec2, radius: f32) -> Enemy {
        Enemy {
            id,
            body: Body::new(pos, radius, Color::Hue(0.0)),
            speed: 1.0,
            heading: 0.0,
        }
    }

    fn food_at(id: u32, pos: Vec2) -> Food {
        Food {
            id,
            body: Body::new(pos, FOOD_RADIUS, Color::FOOD),
        }
    }

    #[test]
    fn test_flee_from_threatening_enemy() {
        let bounds = Bounds::new(1000.0, 1000.0);
        let player = Player::new(&bounds, "You");
        let enemies = vec![enemy_at(1, Vec2::new(550.0, 500.0), 20.0)];
        let foods = vec![food_at(2, Vec2::new(510.0, 500.0))];
        let world = Surroundings { player: &player, foods: &foods, enemies: &enemies, bounds: &bounds };
        let mut rng = Pcg32::seed_from_u64(1);

        let mut bot = bot_at(Vec2::new(500.0, 500.0), 18.0);
        bot.choose_strategy(&world, &mut rng);

        assert_eq!(bot.strategy, Strategy::Flee);
        assert_eq!(bot.target, Some(BotTarget::Point(Vec2::new(450.0, 500.0))));
    }

    #[test]
    fn test_flee_picks_nearest_threat() {
        let bounds = Bounds::new(1000.0, 1000.0);
        let player = Player::new(&bounds, "You");
        let enemies = vec![
            enemy_at(1, Vec2::new(500.0, 800.0), 30.0),
            enemy_at(2, Vec2::new(500.0, 600.0), 30.0),
        ];
        let world = Surroundings { player: &player, foods: &[], enemies: &enemies, bounds: &bounds };
        let mut rng = Pcg32::seed_from_u64(1);

        let mut bot = bot_at(Vec2::new(500.0, 500.0), 18.0);
        bot.choose_strategy(&world, &mut rng);

        assert_eq!(bot.target, Some(BotTarget::Point(Vec2::new(500.0, 400.0))));
    }

    #[test]
    fn test_small_or_distant_enemies_are_ignored() {
        let bounds = Bounds::new(2000.0, 2000.0);
        let mut player = Player::new(&bounds, "You");
        player.body.radius = 100.0;
        let enemies = vec![
            // Too small: 14 < 0.8 * 18
            enemy_at(1, Vec2::new(520.0, 500.0), 14.0),
            // Too far
            enemy_at(2, Vec2::new(950.0, 500.0), 40.0),
        ];
        let foods = vec![food_at(7, Vec2::new(480.0, 500.0))];
        let world = Surroundings { player: &player, foods: &foods, enemies: &enemies, bounds: &bounds };
        let mut rng = Pcg32::seed_from_u64(1);

        let mut bot = bot_at(Vec2::new(500.0, 500.0), 18.0);
        bot.choose_strategy(&world, &mut rng);

        assert_eq!(bot.strategy, Strategy::Forage);
        assert_eq!(bot.target, Some(BotTarget::Food(7)));
    }

    #[test]
    fn test_hunt_smaller_player() {
        let bounds = Bounds::new(1000.0, 1000.0);
        let player = Player::new(&bounds, "You");
        let world = Surroundings { player: &player, foods: &[], enemies: &[], bounds: &bounds };
        let mut rng = Pcg32::seed_from_u64(1);

        // 17 > 0.8 * 20
        let mut bot = bot_at(Vec2::new(100.0, 100.0), 17.0);
        bot.choose_strategy(&world, &mut rng);

        assert_eq!(bot.strategy, Strategy::Hunt);
        assert_eq!(bot.target, Some(BotTarget::Player));
    }

    #[test]
    fn test_forage_without_food_wanders_in_bounds() {
        let bounds = Bounds::new(640.0, 480.0);
        let mut player = Player::new(&bounds, "You");
        player.body.radius = 100.0;
        let world = Surroundings { player: &player, foods: &[], enemies: &[], bounds: &bounds };
        let mut rng = Pcg32::seed_from_u64(3);

        let mut bot = bot_at(Vec2::new(100.0, 100.0), 15.0);
        bot.choose_strategy(&world, &mut rng);

        match bot.target {
            Some(BotTarget::Point(p)) => {
                assert!(p.x >= 0.0 && p.x <= 640.0);
                assert!(p.y >= 0.0 && p.y <= 480.0);
            }
            other => panic!("expected a wander point, got {:?}", other),
        }
    }

    #[test]
    fn test_vanished_food_target_forces_rethink() {
        let bounds = Bounds::new(1000.0, 1000.0);
        let mut player = Player::new(&bounds, "You");
        player.body.radius = 100.0;
        let foods = vec![food_at(9, Vec2::new(300.0, 100.0))];
        let world = Surroundings { player: &player, foods: &foods, enemies: &[], bounds: &bounds };
        let mut rng = Pcg32::seed_from_u64(5);

        let mut bot = bot_at(Vec2::new(100.0, 100.0), 15.0);
        bot.target = Some(BotTarget::Food(42));
        bot.think_ticks = 90;

        bot.update(&world, &mut rng);

        assert_eq!(bot.target, Some(BotTarget::Food(9)));
        assert!((BOT_THINK_MIN_TICKS..=BOT_THINK_MAX_TICKS).contains(&bot.think_ticks));
        assert!((bot.body.pos - Vec2::new(102.5, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_bot_clamped_at_wall() {
        let bounds = Bounds::new(1000.0, 1000.0);
        let player = Player::new(&bounds, "You");
        let world = Surroundings { player: &player, foods: &[], enemies: &[], bounds: &bounds };
        let mut rng = Pcg32::seed_from_u64(7);

        let mut bot = bot_at(Vec2::new(980.0, 500.0), 15.0);
        bot.target = Some(BotTarget::Point(Vec2::new(2000.0, 500.0)));
        bot.think_ticks = 100;

        for _ in 0..20 {
            bot.update(&world, &mut rng);
            let x = bot.body.pos.x;
            assert!(x >= 15.0 && x <= 985.0, "bot left the world at x = {}", x);
        }
        assert_eq!(bot.body.pos.x, 985.0);
    }

    #[test]
    fn test_valid_target_kept_until_countdown_expires() {
        let bounds = Bounds::new(1000.0, 1000.0);
        let player = Player::new(&bounds, "You");
        let world = Surroundings { player: &player, foods: &[], enemies: &[], bounds: &bounds };
        let mut rng = Pcg32::seed_from_u64(5);

        let mut bot = bot_at(Vec2::new(100.0, 100.0), 15.0);
        bot.target = Some(BotTarget::Point(Vec2::new(100.0, 300.0)));
        bot.think_ticks = 2;

        bot.update(&world, &mut rng);
        assert_eq!(bot.think_ticks, 1);
        assert_eq!(bot.target, Some(BotTarget::Point(Vec2::new(100.0, 300.0))));
        assert!((bot.body.vel - Vec2::new(0.0, 2.5)).length() < 1e-5);

        bot.update(&world, &mut rng);
        assert!(bot.think_ticks >= BOT_THINK_MIN_TICKS);
        assert_eq!(bot.strategy, Strategy::Forage);
    }
}
