//! Fixed timestep game tick
//!
//! One call to [`tick`] advances the whole game by a single step: intent
//! handling by priority (reset, continue, frozen phases, pause), then the
//! normal gameplay tick in a fixed order that the rest of the crate's
//! contracts depend on: input integration, timers, gravity, collision,
//! jump, hazards, pickups, goal, enemies, interactions, camera.

use glam::Vec2;

use super::collision::{aabb_collide, try_move};
use super::level::{LevelError, LevelSource};
use super::state::{Camera, GameEvent, GamePhase, GameState};
use super::tile::TileKind;
use crate::consts::*;

/// Input intents for a single tick
///
/// `jump` and the direction intents are level-triggered snapshots of held
/// keys. `pause`, `reset`, and `advance` are edges: the driver clears them
/// once a tick has consumed them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    /// Toggle pause (edge)
    pub pause: bool,
    /// Reload the level, or restart the run from a terminal state (edge)
    pub reset: bool,
    /// Continue to the next level from the goal screens (edge)
    pub advance: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(
    state: &mut GameState,
    source: &LevelSource,
    input: &TickInput,
    dt: f32,
) -> Result<(), LevelError> {
    // Reset is honored in every phase.
    if input.reset {
        return reset(state, source);
    }

    // Continue applies to both goal screens.
    if input.advance
        && matches!(state.phase, GamePhase::ShowingGoal | GamePhase::LevelComplete)
    {
        return advance_level(state, source);
    }

    match state.phase {
        GamePhase::GameOver | GamePhase::Win | GamePhase::LevelComplete => return Ok(()),
        GamePhase::ShowingGoal => {
            update_goal_preview(state);
            return Ok(());
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            }
            return Ok(());
        }
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                return Ok(());
            }
        }
    }

    state.time_ticks += 1;

    // Horizontal input, friction, clamp, facing.
    let p = &mut state.player;
    if input.left {
        p.vel.x -= MOVE_ACCEL;
    }
    if input.right {
        p.vel.x += MOVE_ACCEL;
    }
    p.vel.x *= MOVE_FRICTION;
    p.vel.x = p.vel.x.clamp(-MAX_SPEED_X, MAX_SPEED_X);
    if p.vel.x > 0.0 {
        p.facing = 1;
    } else if p.vel.x < 0.0 {
        p.facing = -1;
    }

    // Jump grace timers.
    if p.coyote > 0.0 {
        p.coyote -= dt;
    }
    if p.jump_buffer > 0.0 {
        p.jump_buffer -= dt;
    }
    if input.jump {
        p.jump_buffer = JUMP_BUFFER_TIME;
    }

    // Gravity, clamped to terminal fall speed.
    p.vel.y = (p.vel.y + GRAVITY).min(TERMINAL_FALL_SPEED);

    let was_grounded = p.on_ground;
    let fall_speed = p.vel.y;
    p.on_ground = try_move(&mut p.pos, &mut p.vel, p.size, &state.level.grid);
    if p.on_ground {
        p.coyote = COYOTE_TIME;
    }
    if !was_grounded && p.on_ground {
        state.push_event(GameEvent::Land);
        if fall_speed >= HARD_LANDING_SPEED {
            hurt_player(state, false);
        }
    }

    // Jump fires while both grace windows are open and consumes them.
    let p = &mut state.player;
    if p.jump_buffer > 0.0 && p.coyote > 0.0 {
        let feet = p.pos + Vec2::new(p.size.x / 2.0, p.size.y);
        let boost = if state.level.grid.tile_at(feet.x, feet.y) == TileKind::Water {
            WATER_JUMP_BOOST
        } else {
            1.0
        };
        p.vel.y = JUMP_VELOCITY * boost;
        p.on_ground = false;
        p.coyote = 0.0;
        p.jump_buffer = 0.0;
        state.push_event(GameEvent::Jump);
    }

    check_hazards(state);
    let center = state.player.center();
    collect_at(state, center);
    check_flag(state, center);

    update_enemies(state);
    resolve_enemy_contacts(state);
    update_camera(state);

    let p = &mut state.player;
    if p.invincibility > 0.0 {
        p.invincibility -= dt;
    }

    Ok(())
}

fn reset(state: &mut GameState, source: &LevelSource) -> Result<(), LevelError> {
    match state.phase {
        GamePhase::GameOver | GamePhase::Win => {
            log::info!("run reset from {:?}", state.phase);
            state.full_reset(source)
        }
        _ => {
            log::info!("level {} reloaded", state.level_index);
            state.load_level(source, state.level_index)
        }
    }
}

fn advance_level(state: &mut GameState, source: &LevelSource) -> Result<(), LevelError> {
    if source.has_next(state.level_index) {
        state.load_level(source, state.level_index + 1)
    } else {
        log::info!("final level cleared, run won");
        state.phase = GamePhase::Win;
        Ok(())
    }
}

/// Goal preview: gameplay frozen, camera pans to the flag, then the phase
/// settles into level-complete
fn update_goal_preview(state: &mut GameState) {
    if let Some(flag) = state.level.flag_center_px() {
        let target = Camera::clamped_target(
            flag,
            state.level.grid.width_px(),
            state.level.grid.height_px(),
        );
        state.camera.approach(target, state.smooth_camera);
    }
    state.preview_ticks = state.preview_ticks.saturating_sub(1);
    if state.preview_ticks == 0 {
        state.phase = GamePhase::LevelComplete;
    }
}

/// Apply damage to the player
///
/// No-op while the invincibility window is open, unless the damage is
/// instant-kill. Fatal damage (instant, or lives exhausted) latches
/// game-over; otherwise the player respawns at the level spawn with a fresh
/// invincibility window. Score, coins, and defeated enemies are untouched
/// by a respawn.
pub fn hurt_player(state: &mut GameState, instant: bool) {
    if state.player.is_invincible() && !instant {
        return;
    }
    state.lives -= 1;
    if state.lives < 0 || instant {
        log::info!("game over on level {}", state.level_index);
        state.phase = GamePhase::GameOver;
        return;
    }
    state.push_event(GameEvent::Hurt);
    state.player.invincibility = INVINCIBILITY_TIME;
    let spawn = state.spawn_px();
    state.player.pos = spawn;
    state.player.vel = Vec2::ZERO;
}

/// Hazard contact: lava anywhere in the body is instant-kill; water deals
/// normal damage whether waded into or stood upon
fn check_hazards(state: &mut GameState) {
    let center_x = state.player.pos.x + state.player.size.x / 2.0;
    let feet_y = state.player.pos.y + state.player.size.y;
    let body = state.level.grid.tile_at(center_x, feet_y - 1.0);
    if body.is_hazard() {
        hurt_player(state, body == TileKind::Lava);
        return;
    }
    // Standing on a water surface still counts as contact.
    if state.level.grid.tile_at(center_x, feet_y) == TileKind::Water {
        hurt_player(state, false);
    }
}

/// Coin pickup at a world point; consumption makes re-sampling idempotent
fn collect_at(state: &mut GameState, point: Vec2) {
    let (col, row) = super::tile::TileGrid::cell_at(point.x, point.y);
    if state.level.grid.get(col, row) == TileKind::Coin {
        state.level.grid.set(col, row, TileKind::Empty);
        state.coins += 1;
        state.score += COIN_SCORE;
        state.push_event(GameEvent::Coin);
    }
}

/// Goal check at the player's center
///
/// The flag tile is never consumed; firing once per approach comes from the
/// phase gate, since only a `Playing` tick can reach this check.
fn check_flag(state: &mut GameState, point: Vec2) {
    if state.level.grid.tile_at(point.x, point.y) == TileKind::Flag {
        log::info!("flag reached on level {}", state.level_index);
        state.phase = GamePhase::ShowingGoal;
        state.preview_ticks = GOAL_PREVIEW_TICKS;
        state.push_event(GameEvent::Win);
    }
}

/// Enemy gravity, collision, and patrol reversal at cliffs and walls
fn update_enemies(state: &mut GameState) {
    let grid = &state.level.grid;
    for e in state.enemies.iter_mut() {
        if !e.alive {
            continue;
        }
        e.vel.y += GRAVITY;
        e.on_ground = try_move(&mut e.pos, &mut e.vel, e.size, grid);
        if e.on_ground {
            // Probe one unit ahead: reverse when the ground runs out or a
            // wall blocks the way.
            let ahead_x = if e.vel.x > 0.0 {
                e.pos.x + e.size.x + 1.0
            } else {
                e.pos.x - 1.0
            };
            let ground_ahead = grid.tile_at(ahead_x, e.pos.y + e.size.y + 1.0);
            let wall_ahead = grid.tile_at(ahead_x, e.pos.y + e.size.y / 2.0);
            if !ground_ahead.is_solid() || wall_ahead.is_solid() {
                e.vel.x = -e.vel.x;
            }
        }
    }
}

/// Player-enemy overlaps: a falling player shallowly overlapping an enemy's
/// top stomps it; any other overlap is contact damage
fn resolve_enemy_contacts(state: &mut GameState) {
    for i in 0..state.enemies.len() {
        if !state.enemies[i].alive {
            continue;
        }
        let p = &state.player;
        let e = &state.enemies[i];
        if !aabb_collide(p.pos, p.size, e.pos, e.size) {
            continue;
        }
        let penetration = p.pos.y + p.size.y - e.pos.y;
        if p.vel.y > 0.0 && penetration < STOMP_DEPTH {
            state.enemies[i].alive = false;
            state.score += STOMP_SCORE;
            state.player.vel.y = JUMP_VELOCITY * STOMP_BOUNCE;
            state.player.on_ground = false;
            state.push_event(GameEvent::Stomp);
        } else {
            hurt_player(state, false);
        }
    }
}

/// Camera follows the player, clamped to the level
fn update_camera(state: &mut GameState) {
    let target = Camera::clamped_target(
        state.player.center(),
        state.level.grid.width_px(),
        state.level.grid.height_px(),
    );
    state.camera.approach(target, state.smooth_camera);
}
