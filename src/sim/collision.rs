//! Axis-separated tile collision
//!
//! Movement resolves one axis at a time against the tile grid: apply the
//! velocity component, sample tiles along the leading edge at a fixed
//! stride, and on the first solid hit snap the edge flush to the tile
//! boundary and zero that velocity component.
//!
//! The sweep is discretized, not continuous: a velocity above one tile per
//! tick can step past a single-tile obstacle between samples. That is an
//! accepted limit of the design, not something to compensate for here.

use glam::Vec2;

use super::tile::TileGrid;
use crate::consts::{COLLISION_STRIDE, FOOT_INSET, TILE_SIZE};

/// Exact AABB intersection; touching edges do not collide
pub fn aabb_collide(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Advance an entity by its velocity, resolving collisions per axis
///
/// Returns whether the entity ended the tick standing on something. The
/// grounded result comes only from the feet-line sample; it is false while
/// rising or when nothing solid is underfoot after the vertical pass.
pub fn try_move(pos: &mut Vec2, vel: &mut Vec2, size: Vec2, grid: &TileGrid) -> bool {
    // Horizontal pass
    pos.x += vel.x;
    if vel.x != 0.0 {
        let dir = vel.x.signum();
        let ahead_x = if dir > 0.0 { pos.x + size.x } else { pos.x };
        let mut y = pos.y + 1.0;
        let bottom = pos.y + size.y - 1.0;
        while y <= bottom {
            if grid.tile_at(ahead_x, y).is_solid() {
                let tile_edge = (ahead_x / TILE_SIZE).floor() * TILE_SIZE;
                pos.x = if dir > 0.0 {
                    tile_edge - size.x
                } else {
                    tile_edge + TILE_SIZE
                };
                vel.x = 0.0;
                break;
            }
            y += COLLISION_STRIDE;
        }
    }

    // Vertical pass
    pos.y += vel.y;
    let mut on_ground = false;
    let left = pos.x + FOOT_INSET;
    let right = pos.x + size.x - FOOT_INSET;
    if vel.y >= 0.0 {
        let feet_y = pos.y + size.y;
        let mut x = left;
        while x <= right {
            if grid.tile_at(x, feet_y).is_solid() {
                pos.y = (feet_y / TILE_SIZE).floor() * TILE_SIZE - size.y;
                vel.y = 0.0;
                on_ground = true;
                break;
            }
            x += COLLISION_STRIDE;
        }
    } else {
        let head_y = pos.y;
        let mut x = left;
        while x <= right {
            if grid.tile_at(x, head_y).is_solid() {
                pos.y = ((head_y / TILE_SIZE).floor() + 1.0) * TILE_SIZE;
                vel.y = 0.0;
                break;
            }
            x += COLLISION_STRIDE;
        }
    }
    on_ground
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_SIZE;
    use proptest::prelude::*;

    // 8 rows x 8 cols: solid floor on row 7, a wall column at col 5 (rows 3..=6),
    // a one-tile ceiling block at (2, 2).
    fn arena() -> TileGrid {
        TileGrid::from_codes(&[
            &[0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 2, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 2, 0, 0],
            &[0, 0, 0, 0, 0, 2, 0, 0],
            &[0, 0, 0, 0, 0, 2, 0, 0],
            &[0, 0, 0, 0, 0, 2, 0, 0],
            &[1, 1, 1, 1, 1, 1, 1, 1],
        ])
        .unwrap()
    }

    #[test]
    fn zero_velocity_leaves_position_unchanged() {
        let grid = arena();
        // standing exactly on the floor: feet line touches row 7
        let mut pos = Vec2::new(16.0, 112.0 - PLAYER_SIZE.y);
        let mut vel = Vec2::ZERO;
        let start = pos;
        let grounded = try_move(&mut pos, &mut vel, PLAYER_SIZE, &grid);
        assert_eq!(pos, start);
        assert!(grounded);

        // floating in the air: same call reports airborne
        let mut pos = Vec2::new(16.0, 40.0);
        let grounded = try_move(&mut pos, &mut vel, PLAYER_SIZE, &grid);
        assert_eq!(pos, Vec2::new(16.0, 40.0));
        assert!(!grounded);
    }

    #[test]
    fn falling_feet_snap_to_tile_top() {
        let grid = arena();
        // 16-tall box resting above the floor at y=112, nudged downward
        let size = Vec2::new(12.0, 16.0);
        let mut pos = Vec2::new(16.0, 96.0);
        let mut vel = Vec2::new(0.0, 1.0);
        let grounded = try_move(&mut pos, &mut vel, size, &grid);
        assert!(grounded);
        assert_eq!(pos.y, 96.0);
        assert_eq!(vel.y, 0.0);

        // the player box snaps to floor-top minus its own height
        let mut pos = Vec2::new(16.0, 112.0 - PLAYER_SIZE.y);
        let mut vel = Vec2::new(0.0, 1.0);
        let grounded = try_move(&mut pos, &mut vel, PLAYER_SIZE, &grid);
        assert!(grounded);
        assert_eq!(pos.y, 112.0 - PLAYER_SIZE.y);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn rising_head_snaps_below_tile_bottom() {
        let grid = arena();
        // jumping into the block at (2, 2): its bottom edge is y=48
        let mut pos = Vec2::new(34.0, 50.0);
        let mut vel = Vec2::new(0.0, -4.0);
        let grounded = try_move(&mut pos, &mut vel, PLAYER_SIZE, &grid);
        assert!(!grounded);
        assert_eq!(pos.y, 48.0);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn horizontal_hit_snaps_leading_edge_to_wall() {
        let grid = arena();
        // wall column at x=80; approach from the left
        let mut pos = Vec2::new(60.0, 112.0 - PLAYER_SIZE.y);
        let mut vel = Vec2::new(10.0, 0.0);
        try_move(&mut pos, &mut vel, PLAYER_SIZE, &grid);
        assert_eq!(pos.x, 80.0 - PLAYER_SIZE.x);
        assert_eq!(vel.x, 0.0);

        // and from the right
        let mut pos = Vec2::new(100.0, 112.0 - PLAYER_SIZE.y);
        let mut vel = Vec2::new(-10.0, 0.0);
        try_move(&mut pos, &mut vel, PLAYER_SIZE, &grid);
        assert_eq!(pos.x, 96.0);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn horizontal_resolution_is_idempotent() {
        let grid = arena();
        let mut pos = Vec2::new(60.0, 112.0 - PLAYER_SIZE.y);
        let mut vel = Vec2::new(10.0, 0.0);
        try_move(&mut pos, &mut vel, PLAYER_SIZE, &grid);
        let snapped = pos.x;
        // re-applying the same push does not burrow into the wall
        vel.x = 10.0;
        try_move(&mut pos, &mut vel, PLAYER_SIZE, &grid);
        assert_eq!(pos.x, snapped);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let size = Vec2::new(10.0, 10.0);
        assert!(!aabb_collide(a, size, b, size));
        assert!(aabb_collide(a, size, Vec2::new(9.9, 0.0), size));
        assert!(!aabb_collide(a, size, Vec2::new(0.0, 10.0), size));
    }

    proptest! {
        #[test]
        fn walls_always_stop_moderate_approaches(start_x in 40.0f32..70.0, vx in 0.1f32..12.0) {
            // anything approaching the wall at x=80 from the left at under one
            // tile per tick ends flush with or short of the wall face
            let grid = arena();
            let mut pos = Vec2::new(start_x, 112.0 - PLAYER_SIZE.y);
            let mut vel = Vec2::new(vx, 0.0);
            try_move(&mut pos, &mut vel, PLAYER_SIZE, &grid);
            prop_assert!(pos.x + PLAYER_SIZE.x <= 80.0);
        }

        #[test]
        fn grounded_entities_never_sink(start_x in 0.0f32..100.0, vy in 0.0f32..12.0) {
            let grid = arena();
            let mut pos = Vec2::new(start_x, 112.0 - PLAYER_SIZE.y);
            let mut vel = Vec2::new(0.0, vy);
            let grounded = try_move(&mut pos, &mut vel, PLAYER_SIZE, &grid);
            prop_assert!(grounded);
            prop_assert_eq!(pos.y, 112.0 - PLAYER_SIZE.y);
        }
    }
}
