//! Entity model: the player, enemies and food
//!
//! Every entity embeds a [`Body`]; kind-specific state lives beside it.
//! Bots are complex enough to get their own module (`bot`).

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use super::geometry::{Bounds, seek_velocity};
use crate::consts::*;
use crate::normalize_angle;

/// Display color of an entity. Has no effect on the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Rgb(u8, u8, u8),
    /// Hue in degrees at 50% saturation and 50% lightness
    Hue(f32),
}

impl Color {
    pub const PLAYER: Color = Color::Rgb(0x34, 0x98, 0xdb);
    pub const FOOD: Color = Color::Rgb(0x2e, 0xcc, 0x71);
    pub const TEXT: Color = Color::Rgb(0, 0, 0);

    pub fn random_hue(rng: &mut Pcg32) -> Self {
        Color::Hue(rng.random::<f32>() * 360.0)
    }

    /// CSS color string
    pub fn css(&self) -> String {
        match self {
            Color::Rgb(r, g, b) => format!("#{r:02x}{g:02x}{b:02x}"),
            Color::Hue(h) => format!("hsl({h:.1}, 50%, 50%)"),
        }
    }
}

/// State shared by all entity kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32, color: Color) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
        }
    }

    /// Uniformly random position inside the world
    pub fn random_pos(bounds: &Bounds, rng: &mut Pcg32) -> Vec2 {
        Vec2::new(
            rng.random::<f32>() * bounds.width,
            rng.random::<f32>() * bounds.height,
        )
    }

    /// Steer toward `target` at `speed`, integrate, then keep inside the world.
    /// Velocity is left alone when already on the target.
    pub fn seek(&mut self, target: Vec2, speed: f32, bounds: &Bounds) {
        if let Some(vel) = seek_velocity(self.pos, target, speed) {
            self.vel = vel;
        }
        self.integrate_contained(bounds);
    }

    pub fn integrate_contained(&mut self, bounds: &Bounds) {
        self.pos += self.vel;
        self.pos = bounds.contain(self.pos, self.radius);
    }
}

/// Anything with a position and a radius
pub trait Circle {
    fn body(&self) -> &Body;

    fn pos(&self) -> Vec2 {
        self.body().pos
    }

    fn radius(&self) -> f32 {
        self.body().radius
    }
}

impl Circle for Body {
    fn body(&self) -> &Body {
        self
    }
}

/// The player-controlled circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub speed: f32,
    /// Accumulated score (fractional: eating prey scores 10 per unit radius)
    pub score: f32,
    pub name: String,
}

impl Player {
    /// New player at the world center
    pub fn new(bounds: &Bounds, name: impl Into<String>) -> Self {
        Self {
            body: Body::new(bounds.center(), PLAYER_START_RADIUS, Color::PLAYER),
            speed: PLAYER_SPEED,
            score: 0.0,
            name: name.into(),
        }
    }

    /// Seek the pointer position
    pub fn update(&mut self, pointer: Vec2, bounds: &Bounds) {
        self.body.seek(pointer, self.speed, bounds);
    }

    /// Swallow prey of the given radius, growing and scoring by it
    pub fn eat_prey(&mut self, prey_radius: f32) {
        self.body.radius += prey_radius * PLAYER_PREY_GROWTH;
        self.score += prey_radius * PREY_SCORE_PER_RADIUS;
    }

    pub fn eat_food(&mut self) {
        self.body.radius += PLAYER_FOOD_GROWTH;
        self.score += PLAYER_FOOD_SCORE;
    }
}

impl Circle for Player {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// A wall-bouncing enemy with no targeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    pub speed: f32,
    /// Heading in radians
    pub heading: f32,
}

impl Enemy {
    pub fn spawn(id: u32, bounds: &Bounds, rng: &mut Pcg32) -> Self {
        let pos = Body::random_pos(bounds, rng);
        let radius = ENEMY_RADIUS_MIN + rng.random::<f32>() * ENEMY_RADIUS_SPREAD;
        let color = Color::random_hue(rng);
        Self {
            id,
            body: Body::new(pos, radius, color),
            speed: ENEMY_SPEED_MIN + rng.random::<f32>() * ENEMY_SPEED_SPREAD,
            heading: rng.random::<f32>() * TAU,
        }
    }

    /// Move along the heading; reflect it when past a wall.
    ///
    /// A reflection only happens while the heading still points out of the
    /// world, so an enemy lingering past an edge (after a resize or a long
    /// step) turns around once instead of flipping back and forth.
    pub fn update(&mut self, bounds: &Bounds) {
        let (sin, cos) = self.heading.sin_cos();
        self.body.vel = Vec2::new(cos, sin) * self.speed;
        self.body.pos += self.body.vel;

        let pos = self.body.pos;
        if (pos.x < 0.0 && cos < 0.0) || (pos.x > bounds.width && cos > 0.0) {
            self.heading = normalize_angle(PI - self.heading);
        }
        if (pos.y < 0.0 && sin < 0.0) || (pos.y > bounds.height && sin > 0.0) {
            self.heading = normalize_angle(-self.heading);
        }
    }
}

impl Circle for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }
}

/// Static food pellet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: u32,
    pub body: Body,
}

impl Food {
    pub fn spawn(id: u32, bounds: &Bounds, rng: &mut Pcg32) -> Self {
        let pos = Body::random_pos(bounds, rng);
        Self {
            id,
            body: Body::new(pos, FOOD_RADIUS, Color::FOOD),
        }
    }
}

impl Circle for Food {
    fn body(&self) -> &Body {
        &self.body
    }
}
