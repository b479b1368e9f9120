//! Game state and core simulation types
//!
//! Everything the host reads between frames lives here. The state is owned
//! by the simulation: rendering only borrows it, and effect hooks come out
//! as drained [`GameEvent`]s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::{Level, LevelError, LevelSource};
use crate::consts::*;

/// Current mode of the game; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal gameplay
    Playing,
    /// Simulation frozen, state retained
    Paused,
    /// Goal reached; camera pans to the flag awaiting continue
    ShowingGoal,
    /// Level cleared, awaiting continue
    LevelComplete,
    /// Run ended in defeat
    GameOver,
    /// Run ended in victory
    Win,
}

/// Discrete gameplay moments for the host's sound and visual hooks
///
/// Fire-and-forget: the simulation never reads these back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    Land,
    Coin,
    Stomp,
    Hurt,
    Win,
}

/// Player kinematic and ability state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    /// -1 left, 1 right; holds its last value while standing still
    pub facing: i8,
    /// Seconds of post-ledge jump grace remaining
    pub coyote: f32,
    /// Seconds the last jump press stays buffered
    pub jump_buffer: f32,
    /// Seconds of damage immunity remaining
    pub invincibility: f32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: PLAYER_SIZE,
            on_ground: false,
            facing: 1,
            coyote: 0.0,
            jump_buffer: 0.0,
            invincibility: 0.0,
        }
    }

    /// Place the player at a spawn point with all transient state cleared
    pub fn respawn_at(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.coyote = 0.0;
        self.jump_buffer = 0.0;
        self.invincibility = 0.0;
    }

    /// Bounding-box center
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0.0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A patrolling enemy
///
/// Destroyed enemies stay in the collection with `alive = false`; they are
/// skipped everywhere but never removed, keeping indices stable for the run
/// of a level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    pub alive: bool,
}

impl Enemy {
    /// A live enemy at a spawn-marker position, patrolling right
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(ENEMY_PATROL_SPEED, 0.0),
            size: ENEMY_SIZE,
            on_ground: false,
            alive: true,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Viewport origin, following a focus point clamped to level bounds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    /// Viewport origin that centers `focus`, clamped so the visible window
    /// never leaves the level
    pub fn clamped_target(focus: Vec2, level_w: f32, level_h: f32) -> Vec2 {
        let max_x = (level_w - VIEW_W).max(0.0);
        let max_y = (level_h - VIEW_H).max(0.0);
        Vec2::new(
            (focus.x - VIEW_W / 2.0).clamp(0.0, max_x),
            (focus.y - VIEW_H / 2.0).clamp(0.0, max_y),
        )
    }

    /// Move toward `target`, either smoothly or by snapping
    pub fn approach(&mut self, target: Vec2, smooth: bool) {
        if smooth {
            self.pos += (target - self.pos) * CAMERA_LERP;
        } else {
            self.pos = target;
        }
    }
}

/// Complete game state
///
/// Score, coins, and lives persist across level loads within a run; every
/// other field resets when a level loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub level_index: u32,
    pub score: u64,
    pub coins: u32,
    /// May dip below zero for one tick before the game-over check latches
    pub lives: i32,
    pub phase: GamePhase,
    /// Ticks remaining in the goal preview
    pub preview_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub camera: Camera,
    /// The level currently being played; coin cells mutate on pickup
    pub level: Level,
    /// Smoothed camera motion; hosts disable for reduced motion
    pub smooth_camera: bool,
    /// Events emitted since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a fresh run on level 0
    pub fn new(source: &LevelSource) -> Result<Self, LevelError> {
        let mut level = source.level(0)?;
        let enemies = level
            .drain_enemy_spawns()
            .into_iter()
            .map(Enemy::at)
            .collect();
        let mut player = Player::new();
        player.respawn_at(level.spawn_px());
        Ok(Self {
            level_index: 0,
            score: 0,
            coins: 0,
            lives: STARTING_LIVES,
            phase: GamePhase::Playing,
            preview_ticks: 0,
            time_ticks: 0,
            player,
            enemies,
            camera: Camera::default(),
            level,
            smooth_camera: true,
            events: Vec::new(),
        })
    }

    /// Load a level, resetting everything but score/coins/lives
    pub fn load_level(&mut self, source: &LevelSource, index: u32) -> Result<(), LevelError> {
        let mut level = source.level(index)?;
        self.enemies = level
            .drain_enemy_spawns()
            .into_iter()
            .map(Enemy::at)
            .collect();
        self.player.respawn_at(level.spawn_px());
        self.camera = Camera::default();
        self.level_index = index;
        self.level = level;
        self.phase = GamePhase::Playing;
        self.preview_ticks = 0;
        Ok(())
    }

    /// Full run reset: scores cleared, back to level 0
    pub fn full_reset(&mut self, source: &LevelSource) -> Result<(), LevelError> {
        self.score = 0;
        self.coins = 0;
        self.lives = STARTING_LIVES;
        self.load_level(source, 0)
    }

    /// Spawn point of the current level in world units
    pub fn spawn_px(&self) -> Vec2 {
        self.level.spawn_px()
    }

    /// Lives as shown on the HUD; never negative
    pub fn display_lives(&self) -> i32 {
        self.lives.max(0)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain events collected since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_run_starts_on_level_zero_with_defaults() {
        let source = LevelSource::catalog_only();
        let state = GameState::new(&source).unwrap();
        assert_eq!(state.level_index, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, state.spawn_px());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn level_load_converts_markers_to_enemies() {
        let source = LevelSource::catalog_only();
        let mut state = GameState::new(&source).unwrap();
        state.load_level(&source, 2).unwrap();
        assert_eq!(state.enemies.len(), 4);
        assert!(state.enemies.iter().all(|e| e.alive));
    }

    #[test]
    fn scores_survive_level_loads_but_not_full_reset() {
        let source = LevelSource::catalog_only();
        let mut state = GameState::new(&source).unwrap();
        state.score = 700;
        state.coins = 7;
        state.lives = 1;
        state.load_level(&source, 1).unwrap();
        assert_eq!((state.score, state.coins, state.lives), (700, 7, 1));
        state.full_reset(&source).unwrap();
        assert_eq!((state.score, state.coins, state.lives), (0, 0, STARTING_LIVES));
        assert_eq!(state.level_index, 0);
    }

    #[test]
    fn displayed_lives_floor_at_zero() {
        let source = LevelSource::catalog_only();
        let mut state = GameState::new(&source).unwrap();
        state.lives = -1;
        assert_eq!(state.display_lives(), 0);
    }

    #[test]
    fn take_events_drains() {
        let source = LevelSource::catalog_only();
        let mut state = GameState::new(&source).unwrap();
        state.push_event(GameEvent::Coin);
        state.push_event(GameEvent::Jump);
        assert_eq!(state.take_events(), vec![GameEvent::Coin, GameEvent::Jump]);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn camera_clamps_to_level_bounds() {
        // 640x480 level, 320x240 view
        let target = Camera::clamped_target(Vec2::new(-50.0, -50.0), 640.0, 480.0);
        assert_eq!(target, Vec2::ZERO);
        let target = Camera::clamped_target(Vec2::new(1000.0, 1000.0), 640.0, 480.0);
        assert_eq!(target, Vec2::new(320.0, 240.0));
        // levels smaller than the viewport pin to the origin
        let target = Camera::clamped_target(Vec2::new(100.0, 100.0), 320.0, 128.0);
        assert_eq!(target.y, 0.0);
    }
}
