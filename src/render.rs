//! Drawing surface abstraction
//!
//! The game only needs filled circles and centered text. The browser backs
//! [`Surface`] with a 2D canvas (`platform::web`); tests and the headless
//! runner use [`RecordingSurface`] or [`NullSurface`].

use glam::Vec2;

use crate::consts::PLAYER_NAME_FONT_PX;
use crate::settings::Settings;
use crate::sim::{Bounds, Circle, Color, GameState};

/// Minimal 2D drawing target
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self, bounds: &Bounds);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Text centered horizontally and vertically on `center`
    fn fill_text(&mut self, text: &str, center: Vec2, font_px: f32, color: Color);
}

fn draw_circle(surface: &mut impl Surface, entity: &impl Circle) {
    let body = entity.body();
    surface.fill_circle(body.pos, body.radius, body.color);
}

/// Draw one frame: player (with name), bots, enemies, then food
pub fn draw_world(state: &GameState, settings: &Settings, surface: &mut impl Surface) {
    surface.clear(&state.bounds);

    draw_circle(surface, &state.player);
    if settings.show_name {
        surface.fill_text(
            &state.player.name,
            state.player.pos(),
            PLAYER_NAME_FONT_PX,
            Color::TEXT,
        );
    }

    for bot in &state.bots {
        draw_circle(surface, bot);
    }
    for enemy in &state.enemies {
        draw_circle(surface, enemy);
    }
    for food in &state.foods {
        draw_circle(surface, food);
    }
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        center: Vec2,
        font_px: f32,
    },
}

/// Surface that remembers what was drawn since the last clear
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    /// Number of frames started (clears)
    pub frames: u64,
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _bounds: &Bounds) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
        self.frames += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ops.push(DrawOp::Circle { center, radius, color });
    }

    fn fill_text(&mut self, text: &str, center: Vec2, font_px: f32, _color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            center,
            font_px,
        });
    }
}

/// Surface that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self, _bounds: &Bounds) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    fn fill_text(&mut self, _text: &str, _center: Vec2, _font_px: f32, _color: Color) {}
}
