//! Tile grid and tile semantics
//!
//! A level is a dense row-major grid of [`TileKind`] cells. Dimensions are
//! fixed per level instance; cell values mutate at runtime only for coin
//! consumption. The grid is implicitly surrounded by void: any out-of-bounds
//! query answers [`TileKind::Empty`], never a wall.

use serde::{Deserialize, Serialize};

use super::level::LevelError;
use crate::consts::TILE_SIZE;

/// Semantic type of a single grid cell
///
/// The numeric codes (0..=9, declaration order) are the on-disk and
/// level-literal representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Void; entities pass through
    Empty,
    /// Solid terrain
    Ground,
    /// Solid masonry
    Brick,
    /// Collectible, consumed on pickup
    Coin,
    /// Marker only; stripped at load time and replaced by a live enemy
    EnemySpawn,
    /// Level goal; checked, never consumed
    Flag,
    /// Instant-kill hazard, not solid
    Lava,
    /// Solid surface that also deals contact damage
    Water,
    /// Decorative solid masonry (castle walls)
    Kingdom,
    /// Invisible solid used to border generated levels
    Boundary,
}

impl TileKind {
    /// Decode a numeric tile code from level data
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => TileKind::Empty,
            1 => TileKind::Ground,
            2 => TileKind::Brick,
            3 => TileKind::Coin,
            4 => TileKind::EnemySpawn,
            5 => TileKind::Flag,
            6 => TileKind::Lava,
            7 => TileKind::Water,
            8 => TileKind::Kingdom,
            9 => TileKind::Boundary,
            _ => return None,
        })
    }

    /// Numeric tile code for level data
    pub fn code(self) -> u8 {
        match self {
            TileKind::Empty => 0,
            TileKind::Ground => 1,
            TileKind::Brick => 2,
            TileKind::Coin => 3,
            TileKind::EnemySpawn => 4,
            TileKind::Flag => 5,
            TileKind::Lava => 6,
            TileKind::Water => 7,
            TileKind::Kingdom => 8,
            TileKind::Boundary => 9,
        }
    }

    /// Whether entities collide with this tile
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            TileKind::Ground
                | TileKind::Brick
                | TileKind::Water
                | TileKind::Kingdom
                | TileKind::Boundary
        )
    }

    /// Whether contact with this tile damages the player
    ///
    /// Water is both solid and a hazard: entities stand on it, and contact
    /// deals damage every tick it persists.
    pub fn is_hazard(self) -> bool {
        matches!(self, TileKind::Lava | TileKind::Water)
    }
}

/// A row-major grid of tiles with equal-length rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    cols: usize,
    rows: Vec<Vec<TileKind>>,
}

impl TileGrid {
    /// Build a grid from rows of tiles, enforcing the equal-length invariant
    pub fn from_rows(rows: Vec<Vec<TileKind>>) -> Result<Self, LevelError> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if cols == 0 {
            return Err(LevelError::EmptyGrid);
        }
        for (y, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(LevelError::RaggedRow {
                    row: y,
                    expected: cols,
                    got: row.len(),
                });
            }
        }
        Ok(Self { cols, rows })
    }

    /// Build a grid from numeric level-literal codes
    pub fn from_codes(codes: &[&[u8]]) -> Result<Self, LevelError> {
        let mut rows = Vec::with_capacity(codes.len());
        for (y, line) in codes.iter().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, &code) in line.iter().enumerate() {
                let kind = TileKind::from_code(code)
                    .ok_or(LevelError::UnknownTileCode { code, row: y, col: x })?;
                row.push(kind);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Level width in world units
    pub fn width_px(&self) -> f32 {
        self.cols as f32 * TILE_SIZE
    }

    /// Level height in world units
    pub fn height_px(&self) -> f32 {
        self.rows.len() as f32 * TILE_SIZE
    }

    /// Tile at a cell coordinate; `Empty` when out of bounds
    pub fn get(&self, col: i64, row: i64) -> TileKind {
        if row < 0 || col < 0 {
            return TileKind::Empty;
        }
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or(TileKind::Empty)
    }

    /// Overwrite a cell; out-of-bounds writes are ignored
    pub fn set(&mut self, col: i64, row: i64, kind: TileKind) {
        if row < 0 || col < 0 {
            return;
        }
        if let Some(cell) = self
            .rows
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            *cell = kind;
        }
    }

    /// Tile under a continuous world coordinate
    ///
    /// Cells are resolved by flooring `coord / TILE_SIZE`; anything outside
    /// the grid is void.
    pub fn tile_at(&self, x: f32, y: f32) -> TileKind {
        let col = (x / TILE_SIZE).floor() as i64;
        let row = (y / TILE_SIZE).floor() as i64;
        self.get(col, row)
    }

    /// Cell coordinate containing a continuous world coordinate
    pub fn cell_at(x: f32, y: f32) -> (i64, i64) {
        ((x / TILE_SIZE).floor() as i64, (y / TILE_SIZE).floor() as i64)
    }

    /// First cell holding the given tile kind, scanning row-major
    pub fn find(&self, kind: TileKind) -> Option<(usize, usize)> {
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == kind {
                    return Some((x, y));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small_grid() -> TileGrid {
        // 3 rows x 4 cols, ground along the bottom
        TileGrid::from_codes(&[&[0, 0, 0, 0], &[0, 3, 0, 5], &[1, 1, 1, 1]]).unwrap()
    }

    #[test]
    fn water_is_both_solid_and_hazard() {
        assert!(TileKind::Water.is_solid());
        assert!(TileKind::Water.is_hazard());
        assert!(TileKind::Lava.is_hazard());
        assert!(!TileKind::Lava.is_solid());
        assert!(TileKind::Boundary.is_solid());
        assert!(!TileKind::Flag.is_solid());
    }

    #[test]
    fn world_queries_floor_to_cells() {
        let grid = small_grid();
        assert_eq!(grid.tile_at(0.0, 32.0), TileKind::Ground);
        assert_eq!(grid.tile_at(15.9, 47.9), TileKind::Ground);
        assert_eq!(grid.tile_at(16.0, 16.0), TileKind::Coin);
        assert_eq!(grid.tile_at(48.0, 16.0), TileKind::Flag);
    }

    #[test]
    fn out_of_bounds_queries_are_empty() {
        let grid = small_grid();
        assert_eq!(grid.tile_at(-1.0, 32.0), TileKind::Empty);
        assert_eq!(grid.tile_at(64.0, 32.0), TileKind::Empty);
        assert_eq!(grid.tile_at(0.0, -0.1), TileKind::Empty);
        assert_eq!(grid.tile_at(0.0, 48.0), TileKind::Empty);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut grid = small_grid();
        grid.set(-1, 0, TileKind::Ground);
        grid.set(4, 0, TileKind::Ground);
        grid.set(0, 3, TileKind::Ground);
        assert_eq!(grid.get(0, 0), TileKind::Empty);
    }

    #[test]
    fn ragged_rows_fail_construction() {
        let err = TileGrid::from_codes(&[&[0, 0, 0], &[0, 0]]).unwrap_err();
        assert!(matches!(
            err,
            LevelError::RaggedRow {
                row: 1,
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn unknown_codes_fail_construction() {
        let err = TileGrid::from_codes(&[&[0, 12]]).unwrap_err();
        assert!(matches!(
            err,
            LevelError::UnknownTileCode {
                code: 12,
                row: 0,
                col: 1
            }
        ));
    }

    proptest! {
        #[test]
        fn any_world_query_is_safe(x in -1e6f32..1e6, y in -1e6f32..1e6) {
            let grid = small_grid();
            let kind = grid.tile_at(x, y);
            let inside = (0.0..64.0).contains(&x) && (0.0..48.0).contains(&y);
            if !inside {
                prop_assert_eq!(kind, TileKind::Empty);
            }
        }
    }
}
