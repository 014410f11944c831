//! Platform abstraction layer
//!
//! Browser glue lives in `web` (wasm32 only):
//! - 2D canvas drawing surface
//! - `requestAnimationFrame` scheduling
//! - DOM score/restart controls
//!
//! Native builds have no window; `main` runs sessions headless instead.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Text shown on the restart control once the session is over
pub fn restart_label(score: f32) -> String {
    format!("RESTARTING...\n\nFinal score: {:.0}", score)
}

/// Live score text
pub fn score_label(score: f32) -> String {
    format!("Score: {:.0}", score)
}
