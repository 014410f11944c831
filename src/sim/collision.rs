//! Collision and consumption resolution
//!
//! Runs once per tick after everything has moved. Categories are resolved in
//! a fixed order, each as an exhaustive pairwise scan. Removals never happen
//! mid-scan: food and bots are filtered with `retain`, enemies are flagged
//! and compacted once per category, so nothing is skipped or seen twice.

use super::entity::Circle;
use super::geometry::{distance_to, outsizes, overlaps};
use super::state::{EntityRef, GameEvent, GameOverReason, GameState};

/// Resolve every consumption for this tick.
///
/// Returns early once the player has been consumed; the session is over.
pub fn resolve_collisions(state: &mut GameState) {
    player_eats_food(state);
    bots_eat_food(state);
    if let Some(by) = player_vs_enemies(state).or_else(|| player_vs_bots(state)) {
        state.end(GameOverReason::Consumed { by });
        return;
    }
    bots_vs_enemies(state);
}

/// Food inside the player's radius is eaten (+0.3 radius, +10 score each)
fn player_eats_food(state: &mut GameState) {
    let player = &mut state.player;
    let events = &mut state.events;
    state.foods.retain(|food| {
        if distance_to(player, food) < player.radius() {
            player.eat_food();
            events.push(GameEvent::Consumed {
                eater: EntityRef::Player,
                eaten: EntityRef::Food(food.id),
                radius: food.radius(),
            });
            false
        } else {
            true
        }
    });
}

/// Food inside a bot's radius is eaten (+0.2 radius each)
fn bots_eat_food(state: &mut GameState) {
    let foods = &mut state.foods;
    let events = &mut state.events;
    for bot in &mut state.bots {
        foods.retain(|food| {
            if distance_to(bot, food) < bot.radius() {
                bot.eat_food();
                events.push(GameEvent::Consumed {
                    eater: EntityRef::Bot(bot.id),
                    eaten: EntityRef::Food(food.id),
                    radius: food.radius(),
                });
                false
            } else {
                true
            }
        });
    }
}

/// The player eats any overlapping enemy it out-sizes. Touching one it does
/// not out-size ends the session; that enemy is returned.
fn player_vs_enemies(state: &mut GameState) -> Option<EntityRef> {
    let player = &mut state.player;
    let events = &mut state.events;
    let mut killer = None;
    state.enemies.retain(|enemy| {
        if killer.is_some() || !overlaps(player, enemy) {
            return true;
        }
        if outsizes(player.radius(), enemy.radius()) {
            player.eat_prey(enemy.radius());
            events.push(GameEvent::Consumed {
                eater: EntityRef::Player,
                eaten: EntityRef::Enemy(enemy.id),
                radius: enemy.radius(),
            });
            false
        } else {
            killer = Some(EntityRef::Enemy(enemy.id));
            true
        }
    });
    killer
}

/// Eat-or-be-eaten between the player and bots. Near-equal sizes pass
/// through each other untouched.
fn player_vs_bots(state: &mut GameState) -> Option<EntityRef> {
    let player = &mut state.player;
    let events = &mut state.events;
    let mut killer = None;
    state.bots.retain(|bot| {
        if killer.is_some() || !overlaps(player, bot) {
            return true;
        }
        if outsizes(player.radius(), bot.radius()) {
            player.eat_prey(bot.radius());
            events.push(GameEvent::Consumed {
                eater: EntityRef::Player,
                eaten: EntityRef::Bot(bot.id),
                radius: bot.radius(),
            });
            false
        } else {
            if outsizes(bot.radius(), player.radius()) {
                killer = Some(EntityRef::Bot(bot.id));
            }
            true
        }
    });
    killer
}

/// Bots and enemies eat each other by the same 1.2x rule. A bot grows when
/// it wins; an enemy that wins does not.
fn bots_vs_enemies(state: &mut GameState) {
    let enemies = &state.enemies;
    let events = &mut state.events;
    let mut eaten = vec![false; enemies.len()];

    state.bots.retain_mut(|bot| {
        for (i, enemy) in enemies.iter().enumerate() {
            if eaten[i] || !overlaps(&*bot, enemy) {
                continue;
            }
            if outsizes(bot.radius(), enemy.radius()) {
                bot.eat_prey(enemy.radius());
                eaten[i] = true;
                events.push(GameEvent::Consumed {
                    eater: EntityRef::Bot(bot.id),
                    eaten: EntityRef::Enemy(enemy.id),
                    radius: enemy.radius(),
                });
            } else if outsizes(enemy.radius(), bot.radius()) {
                events.push(GameEvent::Consumed {
                    eater: EntityRef::Enemy(enemy.id),
                    eaten: EntityRef::Bot(bot.id),
                    radius: bot.radius(),
                });
                return false;
            }
        }
        true
    });

    let mut flags = eaten.into_iter();
    state.enemies.retain(|_| !flags.next().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::bot::{Bot, Strategy};
    use crate::sim::entity::{Body, Color, Enemy, Food};
    use crate::sim::geometry::Bounds;
    use crate::sim::state::GamePhase;
    use glam::Vec2;

    fn state() -> GameState {
        let mut state = GameState::empty(1, Bounds::new(1000.0, 1000.0), "You");
        state.player.body.pos = Vec2::new(500.0, 500.0);
        state
    }

    fn add_food(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.foods.push(Food {
            id,
            body: Body::new(pos, FOOD_RADIUS, Color::FOOD),
        });
        id
    }

    fn add_enemy(state: &mut GameState, pos: Vec2, radius: f32) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            body: Body::new(pos, radius, Color::Hue(10.0)),
            speed: 1.0,
            heading: 0.0,
        });
        id
    }

    fn add_bot(state: &mut GameState, pos: Vec2, radius: f32) -> u32 {
        let id = state.next_entity_id();
        state.bots.push(Bot {
            id,
            body: Body::new(pos, radius, Color::Hue(200.0)),
            speed: BOT_SPEED,
            target: None,
            strategy: Strategy::Idle,
            think_ticks: 0,
        });
        id
    }

    #[test]
    fn test_player_eats_food_within_radius() {
        let mut state = state();
        add_food(&mut state, Vec2::new(510.0, 500.0));
        add_food(&mut state, Vec2::new(505.0, 505.0));
        add_food(&mut state, Vec2::new(600.0, 500.0));

        resolve_collisions(&mut state);

        assert_eq!(state.foods.len(), 1);
        assert!((state.player.body.radius - 20.6).abs() < 1e-4);
        assert!((state.player.score - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_adjacent_food_all_eaten() {
        // Consecutive removals must not skip the next pellet
        let mut state = state();
        for i in 0..5 {
            add_food(&mut state, Vec2::new(500.0 + i as f32, 500.0));
        }
        resolve_collisions(&mut state);
        assert!(state.foods.is_empty());
        assert!((state.player.score - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_bot_eats_food_without_score() {
        let mut state = state();
        add_bot(&mut state, Vec2::new(100.0, 100.0), 15.0);
        add_food(&mut state, Vec2::new(105.0, 100.0));

        resolve_collisions(&mut state);

        assert!(state.foods.is_empty());
        assert!((state.bots[0].body.radius - 15.2).abs() < 1e-4);
        assert_eq!(state.player.score, 0.0);
    }

    #[test]
    fn test_player_eats_smaller_enemy() {
        let mut state = state();
        state.player.body.radius = 30.0;
        let id = add_enemy(&mut state, Vec2::new(540.0, 500.0), 20.0);

        resolve_collisions(&mut state);

        assert!(state.enemies.is_empty());
        assert!((state.player.body.radius - 36.0).abs() < 1e-4);
        assert!((state.player.score - 200.0).abs() < 1e-3);
        assert!(state.is_running());
        assert!(state.events.contains(&GameEvent::Consumed {
            eater: EntityRef::Player,
            eaten: EntityRef::Enemy(id),
            radius: 20.0,
        }));
    }

    #[test]
    fn test_player_eats_every_overlapping_enemy() {
        let mut state = state();
        state.player.body.radius = 60.0;
        add_enemy(&mut state, Vec2::new(520.0, 500.0), 15.0);
        add_enemy(&mut state, Vec2::new(480.0, 500.0), 15.0);
        add_enemy(&mut state, Vec2::new(500.0, 520.0), 15.0);

        resolve_collisions(&mut state);

        assert!(state.enemies.is_empty());
        assert!((state.player.score - 450.0).abs() < 1e-3);
    }

    #[test]
    fn test_touching_bigger_enemy_ends_game() {
        let mut state = state();
        let id = add_enemy(&mut state, Vec2::new(530.0, 500.0), 20.0);

        resolve_collisions(&mut state);

        assert_eq!(
            state.phase,
            GamePhase::GameOver(GameOverReason::Consumed { by: EntityRef::Enemy(id) })
        );
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_non_overlapping_enemy_ignored() {
        let mut state = state();
        add_enemy(&mut state, Vec2::new(545.0, 500.0), 20.0);
        resolve_collisions(&mut state);
        assert!(state.is_running());
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_player_eats_smaller_bot() {
        let mut state = state();
        state.player.body.radius = 40.0;
        add_bot(&mut state, Vec2::new(520.0, 500.0), 15.0);

        resolve_collisions(&mut state);

        assert!(state.bots.is_empty());
        assert!((state.player.body.radius - 44.5).abs() < 1e-4);
        assert!((state.player.score - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_bigger_bot_ends_game() {
        let mut state = state();
        let id = add_bot(&mut state, Vec2::new(520.0, 500.0), 30.0);

        resolve_collisions(&mut state);

        assert_eq!(
            state.phase,
            GamePhase::GameOver(GameOverReason::Consumed { by: EntityRef::Bot(id) })
        );
    }

    #[test]
    fn test_near_equal_bot_is_a_no_op() {
        let mut state = state();
        add_bot(&mut state, Vec2::new(510.0, 500.0), 22.0);

        resolve_collisions(&mut state);

        assert!(state.is_running());
        assert_eq!(state.bots.len(), 1);
        assert_eq!(state.player.body.radius, PLAYER_START_RADIUS);
    }

    #[test]
    fn test_bot_eats_smaller_enemy() {
        let mut state = state();
        add_bot(&mut state, Vec2::new(100.0, 100.0), 30.0);
        add_enemy(&mut state, Vec2::new(120.0, 100.0), 20.0);

        resolve_collisions(&mut state);

        assert!(state.enemies.is_empty());
        assert!((state.bots[0].body.radius - 34.0).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_eats_smaller_bot_without_growing() {
        let mut state = state();
        add_bot(&mut state, Vec2::new(100.0, 100.0), 15.0);
        add_enemy(&mut state, Vec2::new(120.0, 100.0), 20.0);

        resolve_collisions(&mut state);

        assert!(state.bots.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].body.radius, 20.0);
    }

    #[test]
    fn test_bot_enemy_equal_sizes_no_op() {
        let mut state = state();
        add_bot(&mut state, Vec2::new(100.0, 100.0), 20.0);
        add_enemy(&mut state, Vec2::new(110.0, 100.0), 20.0);

        resolve_collisions(&mut state);

        assert_eq!(state.bots.len(), 1);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_enemy_eaten_by_one_bot_is_not_seen_by_the_next() {
        let mut state = state();
        add_bot(&mut state, Vec2::new(100.0, 100.0), 30.0);
        add_bot(&mut state, Vec2::new(105.0, 100.0), 30.0);
        add_enemy(&mut state, Vec2::new(110.0, 100.0), 20.0);

        resolve_collisions(&mut state);

        assert!(state.enemies.is_empty());
        let grown = state.bots.iter().filter(|b| b.body.radius > 30.0).count();
        assert_eq!(grown, 1);
    }

    #[test]
    fn test_consumed_player_stops_resolution() {
        let mut state = state();
        add_enemy(&mut state, Vec2::new(530.0, 500.0), 20.0);
        add_bot(&mut state, Vec2::new(100.0, 100.0), 30.0);
        add_enemy(&mut state, Vec2::new(120.0, 100.0), 20.0);

        resolve_collisions(&mut state);

        assert!(!state.is_running());
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.bots[0].body.radius, 30.0);
    }
}
