//! Game state and core simulation types

use super::camera::Camera;
use super::collision::Aabb;
use super::tick::{TickInput, generate_platform};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; terminal, there is no restart
    GameOver,
}

/// Side-effect cues emitted by the simulation and drained by the front end
///
/// The simulation never touches the audio device itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player left the ground under its own power
    Jumped,
    /// Player hit the floor; the run is over
    Died,
}

/// The player body
///
/// `rect` is the screen-space box that input moves directly; `world_x` is
/// the absolute horizontal position the spawn/despawn math trusts. The two
/// drift apart once the camera starts scrolling, and that drift is the
/// scrolling trick: the screen box stays inside the dead-zone band while
/// the world coordinate keeps running ahead.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Screen-space bounding box
    pub rect: Aabb,
    /// World-space horizontal position
    pub world_x: f32,
    /// Vertical velocity, positive is down
    pub vel_y: f32,
    /// Set on jump, cleared on landing. Walking off a ledge does NOT set
    /// it, so a player that slid off can still jump once mid-fall.
    pub airborne: bool,
}

impl Player {
    /// Create a player centered on (`center_x`, `center_y`)
    pub fn new(center_x: f32, center_y: f32, size: f32) -> Self {
        Self {
            rect: Aabb::new(center_x - size / 2.0, center_y - size / 2.0, size, size),
            world_x: center_x,
            vel_y: 0.0,
            airborne: false,
        }
    }

    /// Advance the body one frame from the held-key snapshot
    ///
    /// Order matters: horizontal step, jump trigger, then gravity and the
    /// vertical step, then the floor clamp. The jump impulse therefore has
    /// one frame of gravity applied before the first position change.
    pub fn update(&mut self, input: &TickInput, tuning: &Tuning) -> Option<GameEvent> {
        let mut event = None;

        if input.left {
            self.rect.pos.x -= tuning.run_speed;
            self.world_x -= tuning.run_speed;
        }
        if input.right {
            self.rect.pos.x += tuning.run_speed;
            self.world_x += tuning.run_speed;
        }

        if input.jump && !self.airborne {
            self.vel_y = tuning.jump_velocity;
            self.airborne = true;
            event = Some(GameEvent::Jumped);
        }

        self.vel_y += tuning.gravity;
        self.rect.pos.y += self.vel_y;

        // Floor clamp; the controller turns this into game over
        if self.rect.bottom() >= tuning.floor_y() {
            self.rect.set_bottom(tuning.floor_y());
            self.vel_y = 0.0;
            self.airborne = false;
        }

        event
    }
}

/// A traversable platform
///
/// Spawned ahead of the player, evicted once it scrolls off the left edge.
/// `rect.pos.x` is the cached screen-space position, refreshed from
/// `world_x` plus the camera offset once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    /// World-space position of the left edge
    pub world_x: f32,
    /// Screen-space bounding box
    pub rect: Aabb,
}

impl Platform {
    pub fn new(world_x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            world_x,
            // Screen position starts un-offset; the next camera pass fixes it
            rect: Aabb::new(world_x, y, width, height),
        }
    }

    /// Refresh the cached screen position from the camera offset
    #[inline]
    pub fn apply_camera(&mut self, camera: &Camera) {
        self.rect.pos.x = self.world_x + camera.offset_x;
    }
}

/// Complete game state (deterministic)
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Frame counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Player body
    pub player: Player,
    /// Scrolling camera
    pub camera: Camera,
    /// Active platforms, always non-empty, ascending `world_x`
    pub platforms: Vec<Platform>,
    /// How many platforms have ever been spawned; seeds the next spawn
    pub spawn_count: u32,
    /// World x the run started at, for distance scoring
    pub start_world_x: f32,
    /// Farthest horizontal progress of the run, in world pixels
    pub distance: f32,
    /// Cues emitted this frame, cleared at the start of every tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run: player centered on screen, one wide platform
    /// directly beneath it, and four generated ones trailing off to the
    /// right
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let player = Player::new(
            tuning.screen_width / 2.0,
            tuning.screen_height / 2.0,
            tuning.player_size,
        );

        let starting_platform = Platform::new(
            player.rect.center_x() - 100.0,
            player.rect.bottom() + 10.0,
            200.0,
            tuning.platform_height,
        );

        let start_world_x = player.world_x;
        let mut state = Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Running,
            player,
            camera: Camera::default(),
            platforms: vec![starting_platform],
            spawn_count: 0,
            start_world_x,
            distance: 0.0,
            events: Vec::new(),
        };

        for _ in 0..4 {
            generate_platform(&mut state, tuning);
        }

        state
    }

    /// World x of the rightmost active platform
    ///
    /// The active set is append-only to the right, so this is just the last
    /// element.
    pub fn rightmost_platform_x(&self) -> f32 {
        self.platforms
            .last()
            .map(|p| p.world_x)
            .unwrap_or(self.player.world_x)
    }
}
