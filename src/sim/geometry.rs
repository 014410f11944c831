//! Circle geometry shared by every entity kind

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Circle;

/// World bounds (the visible surface, origin at top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a circle center so the whole circle stays inside.
    ///
    /// Written as max(min) rather than `f32::clamp` so a circle larger than
    /// the world pins to its radius instead of panicking.
    pub fn contain(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            (self.width - radius).min(pos.x).max(radius),
            (self.height - radius).min(pos.y).max(radius),
        )
    }
}

/// Euclidean distance between the centers of two circles
#[inline]
pub fn distance_to(a: &impl Circle, b: &impl Circle) -> f32 {
    a.pos().distance(b.pos())
}

/// Velocity of length `speed` pointing from `from` to `to`.
///
/// Returns `None` when the points coincide.
pub fn seek_velocity(from: Vec2, to: Vec2, speed: f32) -> Option<Vec2> {
    let delta = to - from;
    let distance = delta.length();
    if distance > 0.0 {
        Some(delta / distance * speed)
    } else {
        None
    }
}

/// True when `eater` is big enough to swallow `prey`
#[inline]
pub fn outsizes(eater_radius: f32, prey_radius: f32) -> bool {
    eater_radius > prey_radius * crate::consts::EAT_RATIO
}

/// True when two circles overlap
#[inline]
pub fn overlaps(a: &impl Circle, b: &impl Circle) -> bool {
    distance_to(a, b) < a.radius() + b.radius()
}
