//! Scrolling-window camera
//!
//! The camera holds a single horizontal offset, recomputed every frame. It
//! only scrolls once the player's screen center leaves the middle band of
//! the viewport, so small movements don't shift the world at all.
//!
//! Note the deliberate asymmetry: the band test reads the player's
//! screen-space center (which raw input drives), but the offset is computed
//! from the world-space position. Screen position drifts while world
//! position stays the ground truth, and the difference is what makes the
//! scroll feel right.

use crate::tuning::Tuning;

use super::state::Player;

/// Horizontal scroll offset applied to every platform's screen position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    /// Added to `world_x` to get screen x; negative once scrolled right
    pub offset_x: f32,
}

impl Camera {
    /// Recompute the offset from the player position
    pub fn update(&mut self, player: &Player, tuning: &Tuning) {
        let high = tuning.screen_width * tuning.deadzone_high;
        let low = tuning.screen_width * tuning.deadzone_low;
        let center = player.rect.center_x();

        if center > high {
            self.offset_x = -(player.world_x - high);
        } else if center < low {
            self.offset_x = -(player.world_x - low);
        } else {
            self.offset_x = 0.0;
        }
    }

    /// Map a world x coordinate to screen space
    #[inline]
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        world_x + self.offset_x
    }
}
