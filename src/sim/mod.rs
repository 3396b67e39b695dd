//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame timestep only
//! - Seeded RNG only
//! - Stable platform order (spawn order == spatial order)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{Aabb, first_overlap, resolve_landing};
pub use state::{GameEvent, GamePhase, GameState, Platform, Player};
pub use tick::{TickInput, generate_platform, tick};
