//! Tile Hopper - an 8-bit side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, physics, game state machine)
//! - `assets`: Asset readiness tracking for the presentation layer
//! - `settings`: Player preferences
//!
//! The simulation never draws, plays sounds, or reads devices. A host feeds it
//! abstract input intents through [`sim::TickInput`], advances it with
//! [`sim::FixedTimestep`], reads the resulting [`sim::GameState`] to render,
//! and drains [`sim::GameEvent`]s for sound and visual effects.

pub mod assets;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Per-frame elapsed time cap; stalls longer than this do not catch up
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Tile edge length in world units
    pub const TILE_SIZE: f32 = 16.0;
    /// Viewport width in world units
    pub const VIEW_W: f32 = 320.0;
    /// Viewport height in world units
    pub const VIEW_H: f32 = 240.0;

    // Velocities are world units per tick, matching the 60 Hz step.
    /// Downward acceleration applied every tick
    pub const GRAVITY: f32 = 0.7;
    /// Terminal fall speed
    pub const TERMINAL_FALL_SPEED: f32 = 12.0;
    /// Upward (negative) velocity applied on jump
    pub const JUMP_VELOCITY: f32 = -10.5;
    /// Jump velocity multiplier when launching off a water surface
    pub const WATER_JUMP_BOOST: f32 = 1.4;
    /// Horizontal acceleration per tick of held input
    pub const MOVE_ACCEL: f32 = 0.7;
    /// Horizontal velocity retained each tick
    pub const MOVE_FRICTION: f32 = 0.85;
    /// Horizontal speed clamp
    pub const MAX_SPEED_X: f32 = 3.2;
    /// Landing at or above this fall speed hurts the player
    pub const HARD_LANDING_SPEED: f32 = 8.0;

    // Timers are in seconds and counted down by the tick dt.
    /// Grace window after walking off a ledge during which a jump still fires
    pub const COYOTE_TIME: f32 = 0.12;
    /// Grace window during which an early jump press is remembered
    pub const JUMP_BUFFER_TIME: f32 = 0.15;
    /// Post-damage invulnerability window
    pub const INVINCIBILITY_TIME: f32 = 1.2;

    /// Player bounding box
    pub const PLAYER_SIZE: Vec2 = Vec2::new(12.0, 14.0);
    /// Enemy bounding box
    pub const ENEMY_SIZE: Vec2 = Vec2::new(12.0, 12.0);
    /// Enemy patrol speed
    pub const ENEMY_PATROL_SPEED: f32 = 0.6;
    /// Horizontal offset applied when an enemy spawns from its marker tile
    pub const ENEMY_SPAWN_OFFSET_X: f32 = 2.0;

    /// Maximum top-penetration depth that still counts as a stomp
    pub const STOMP_DEPTH: f32 = 12.0;
    /// Fraction of jump velocity applied as the stomp bounce
    pub const STOMP_BOUNCE: f32 = 0.6;
    /// Score for collecting a coin
    pub const COIN_SCORE: u64 = 100;
    /// Score for stomping an enemy
    pub const STOMP_SCORE: u64 = 200;
    /// Lives at the start of a run
    pub const STARTING_LIVES: i32 = 3;

    /// Sampling stride along collision edges, in world units
    pub const COLLISION_STRIDE: f32 = 4.0;
    /// Horizontal inset of the feet/head sampling span
    pub const FOOT_INSET: f32 = 2.0;

    /// Fraction of the remaining distance the camera covers per tick
    pub const CAMERA_LERP: f32 = 0.1;
    /// Ticks the goal preview lingers before settling into level-complete
    pub const GOAL_PREVIEW_TICKS: u32 = 90;

    /// Levels in a default run (built-in catalog plus generated levels)
    pub const DEFAULT_LEVEL_COUNT: u32 = 8;
}
