//! Scene building
//!
//! Converts world-space game state into a flat list of screen-space
//! rectangle fills. The presentation layer rasterizes the list however it
//! likes (the shipped front end maps it onto terminal cells); the
//! simulation itself never draws.

use crate::sim::{Aabb, GamePhase, GameState};
use crate::tuning::Tuning;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Screen clear color
pub const BACKGROUND: Rgb = Rgb(0, 0, 0);
/// The player square
pub const PLAYER: Rgb = Rgb(0, 0, 255);
/// Platform fills
pub const PLATFORM: Rgb = Rgb(255, 255, 255);
/// Terminal overlay text
pub const GAME_OVER: Rgb = Rgb(255, 0, 0);

/// One rectangular fill in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub rect: Aabb,
    pub color: Rgb,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Fills in paint order; the player comes last, on top
    pub rects: Vec<DrawRect>,
    /// Show the terminal overlay instead of gameplay chrome
    pub game_over: bool,
    /// Farthest progress of the run, for the HUD
    pub distance: f32,
}

/// Build the draw list for the current frame
///
/// Platforms are emitted at their cached screen positions; anything fully
/// outside the viewport is culled rather than handed to the rasterizer.
pub fn build_scene(state: &GameState, tuning: &Tuning) -> Scene {
    let viewport = Aabb::new(0.0, 0.0, tuning.screen_width, tuning.screen_height);

    let mut rects = Vec::with_capacity(state.platforms.len() + 1);
    for platform in &state.platforms {
        if platform.rect.overlaps(&viewport) {
            rects.push(DrawRect {
                rect: platform.rect,
                color: PLATFORM,
            });
        }
    }
    rects.push(DrawRect {
        rect: state.player.rect,
        color: PLAYER,
    });

    Scene {
        rects,
        game_over: state.phase == GamePhase::GameOver,
        distance: state.distance,
    }
}
