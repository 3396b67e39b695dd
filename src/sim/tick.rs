//! Per-frame simulation tick
//!
//! Advances one frame of gameplay deterministically. The update order is
//! load-bearing and mirrors the classic loop: input moves the body, the
//! body resolves against last frame's platform positions, the camera
//! recomputes, and only then do platforms refresh, spawn and despawn.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision;
use super::state::{GameEvent, GamePhase, GameState, Platform};
use crate::tuning::Tuning;

/// Held-key snapshot for a single frame (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Idle/demo mode - the autopilot plays the run
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    // Terminal state: everything is suspended, only the overlay renders
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.events.clear();

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    if let Some(event) = state.player.update(input, tuning) {
        state.events.push(event);
    }

    // Platforms still carry last frame's camera offset here; the player
    // collides against what was last drawn
    collision::resolve_landing(&mut state.player, &state.platforms);

    state.camera.update(&state.player, tuning);

    // Reaching the floor means every platform was missed
    if state.player.rect.bottom() >= tuning.floor_y() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Died);
        log::info!(
            "Game over at tick {} after {:.0} px",
            state.time_ticks,
            state.distance
        );
    }

    // Refresh cached screen positions with the new offset
    for platform in &mut state.platforms {
        platform.apply_camera(&state.camera);
    }

    // Keep at least one screen of terrain ahead of the player
    while state.rightmost_platform_x() < state.player.world_x + tuning.screen_width {
        generate_platform(state, tuning);
    }

    // Sliding-window garbage collection: drop what scrolled off the left
    state.platforms.retain(|p| p.rect.right() >= 0.0);

    state.distance = state
        .distance
        .max(state.player.world_x - state.start_world_x);

    debug_assert!(
        state
            .platforms
            .windows(2)
            .all(|w| w[0].world_x <= w[1].world_x),
        "platform set must stay sorted by world_x"
    );
}

/// Append one platform to the right of the current rightmost
///
/// Randomness is derived per spawn from the run seed and the spawn
/// ordinal, so two runs with the same seed lay identical terrain.
pub fn generate_platform(state: &mut GameState, tuning: &Tuning) {
    let mut rng = Pcg32::seed_from_u64(spawn_seed(state.seed, state.spawn_count));
    state.spawn_count += 1;

    let width = rng.random_range(tuning.platform_width_min..=tuning.platform_width_max);
    let gap = rng.random_range(tuning.gap_min..=tuning.gap_max);
    let y = rng.random_range(
        tuning.screen_height - tuning.spawn_height_max
            ..=tuning.screen_height - tuning.spawn_height_min,
    );

    let world_x = state.rightmost_platform_x() + gap;
    state
        .platforms
        .push(Platform::new(world_x, y, width, tuning.platform_height));
}

/// Per-spawn seed: varies between runs, stable within one
fn spawn_seed(seed: u64, spawn_index: u32) -> u64 {
    (spawn_index as u64).wrapping_mul(2654435761).wrapping_add(seed)
}

/// Demo autopilot: hold right, leap just before the supporting platform
/// runs out underfoot
fn autopilot(state: &GameState, input: &mut TickInput) {
    input.left = false;
    input.right = true;
    input.jump = false;

    if state.player.airborne {
        return;
    }

    let rect = &state.player.rect;
    let support = state.platforms.iter().find(|p| {
        rect.right() > p.rect.left()
            && rect.left() < p.rect.right()
            && (p.rect.top() - rect.bottom()).abs() <= 2.0
    });

    match support {
        // Jump a little before the edge so the arc clears the gap
        Some(p) => {
            if rect.right() + 20.0 >= p.rect.right() {
                input.jump = true;
            }
        }
        // Slid off without jumping; spend the one mid-air jump we still
        // have before the fall gets serious
        None => {
            if state.player.vel_y > 3.0 {
                input.jump = true;
            }
        }
    }
}
