//! Data-driven gameplay constants
//!
//! Everything tunable about a run lives in one struct so game feel can be
//! adjusted from a JSON file without recompiling. Defaults reproduce the
//! classic feel.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Gameplay tuning values
///
/// All distances are world pixels, all rates are per-frame (the simulation
/// runs at a fixed 60 Hz and integrates per frame).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Viewport width in world pixels
    pub screen_width: f32,
    /// Viewport height in world pixels; the floor sits at this y
    pub screen_height: f32,

    /// Player bounding box edge length (the player is a square)
    pub player_size: f32,
    /// Horizontal movement per frame while a direction key is held
    pub run_speed: f32,
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_velocity: f32,

    /// Horizontal gap between consecutive platforms, min/max
    pub gap_min: f32,
    pub gap_max: f32,
    /// Platform width, min/max
    pub platform_width_min: f32,
    pub platform_width_max: f32,
    /// Platform thickness
    pub platform_height: f32,
    /// Platform tops spawn between `screen_height - spawn_height_max` and
    /// `screen_height - spawn_height_min`
    pub spawn_height_min: f32,
    pub spawn_height_max: f32,

    /// Camera dead-zone thresholds as fractions of screen width; the camera
    /// scrolls only once the player's screen center leaves this band
    pub deadzone_low: f32,
    pub deadzone_high: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: 1920.0,
            screen_height: 1080.0,

            player_size: 50.0,
            run_speed: 5.0,
            gravity: 1.0,
            jump_velocity: -15.0,

            gap_min: 200.0,
            gap_max: 300.0,
            platform_width_min: 100.0,
            platform_width_max: 200.0,
            platform_height: 20.0,
            spawn_height_min: 100.0,
            spawn_height_max: 400.0,

            deadzone_low: 0.4,
            deadzone_high: 0.6,
        }
    }
}

impl Tuning {
    /// The y coordinate of the ground; touching it ends the run
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.screen_height
    }

    /// Load tuning from a JSON file, falling back to defaults if the file
    /// is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }
}
