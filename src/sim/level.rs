//! Level data and the level source
//!
//! A [`LevelSource`] supplies a fresh [`Level`] for every load, reset, or
//! advance: the first few indices come from the built-in catalog, anything
//! beyond that is generated deterministically from the run seed. Malformed
//! level data fails fast here with a descriptive [`LevelError`] rather than
//! corrupting the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::procgen;
use super::tile::{TileGrid, TileKind};
use crate::consts::{ENEMY_SPAWN_OFFSET_X, TILE_SIZE};

/// Level data precondition violations, reported at load time
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level grid has no rows")]
    EmptyGrid,
    #[error("row {row} has {got} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("unknown tile code {code} at row {row}, col {col}")]
    UnknownTileCode { code: u8, row: usize, col: usize },
    #[error("level '{name}': spawn ({x}, {y}) is outside the {cols}x{rows} grid")]
    SpawnOutOfBounds {
        name: String,
        x: u32,
        y: u32,
        cols: usize,
        rows: usize,
    },
    #[error("level index {index} out of range, run has {count} levels")]
    IndexOutOfRange { index: u32, count: u32 },
}

/// A playable level: name, spawn cell, and tile grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Player spawn, in cell coordinates
    pub spawn: (u32, u32),
    pub grid: TileGrid,
}

impl Level {
    /// Check load-time preconditions beyond the grid's own invariants
    pub fn validate(&self) -> Result<(), LevelError> {
        let (x, y) = self.spawn;
        if x as usize >= self.grid.cols() || y as usize >= self.grid.rows() {
            return Err(LevelError::SpawnOutOfBounds {
                name: self.name.clone(),
                x,
                y,
                cols: self.grid.cols(),
                rows: self.grid.rows(),
            });
        }
        Ok(())
    }

    /// Player spawn position in world units
    pub fn spawn_px(&self) -> Vec2 {
        Vec2::new(self.spawn.0 as f32 * TILE_SIZE, self.spawn.1 as f32 * TILE_SIZE)
    }

    /// Strip enemy-spawn markers from the grid, returning their world positions
    ///
    /// Markers exist only in level data; after this the grid holds `Empty`
    /// where each enemy starts patrolling.
    pub fn drain_enemy_spawns(&mut self) -> Vec<Vec2> {
        let mut spawns = Vec::new();
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                if self.grid.get(col as i64, row as i64) == TileKind::EnemySpawn {
                    spawns.push(Vec2::new(
                        col as f32 * TILE_SIZE + ENEMY_SPAWN_OFFSET_X,
                        row as f32 * TILE_SIZE,
                    ));
                    self.grid.set(col as i64, row as i64, TileKind::Empty);
                }
            }
        }
        spawns
    }

    /// Center of the goal flag cell, if the level has one
    pub fn flag_center_px(&self) -> Option<Vec2> {
        self.grid.find(TileKind::Flag).map(|(x, y)| {
            Vec2::new(
                x as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                y as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            )
        })
    }
}

struct CatalogEntry {
    name: &'static str,
    spawn: (u32, u32),
    rows: &'static [&'static [u8]],
}

// 0=empty 1=ground 2=brick 3=coin 4=enemy 5=flag 6=lava 7=water 8=kingdom 9=boundary
const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "Grassland",
        spawn: (2, 6),
        rows: &[
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5],
            &[1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 6, 6, 6],
            &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 6, 6, 6],
        ],
    },
    CatalogEntry {
        name: "Caves",
        spawn: (1, 2),
        rows: &[
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[1, 1, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0],
            &[1, 1, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0],
            &[0, 0, 0, 4, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0],
            &[0, 0, 0, 0, 0, 0, 2, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            &[6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6],
        ],
    },
    CatalogEntry {
        name: "Stomp Alley",
        spawn: (1, 6),
        rows: &[
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 4, 0, 0, 0, 4, 0, 0, 0, 4, 0, 0, 0, 4, 0, 0, 0, 0],
            &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            &[6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6],
        ],
    },
    CatalogEntry {
        name: "Kingdom Gate",
        spawn: (2, 4),
        rows: &[
            &[9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9],
            &[9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9],
            &[9, 0, 0, 0, 0, 0, 0, 0, 0, 3, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 9],
            &[9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8, 8, 8, 8, 9],
            &[9, 0, 0, 0, 0, 0, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 8, 0, 0, 8, 9],
            &[9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 8, 0, 0, 8, 9],
            &[9, 1, 1, 1, 1, 1, 1, 1, 7, 7, 7, 7, 1, 1, 1, 1, 1, 1, 1, 8, 8, 8, 8, 9],
            &[9, 1, 1, 1, 1, 1, 1, 1, 7, 7, 7, 7, 1, 1, 1, 1, 1, 1, 1, 8, 8, 8, 8, 9],
        ],
    },
];

/// Supplies levels for a run: catalog lookups, then deterministic generation
///
/// The source is a pure function of `(index, seed)`. Every call builds a
/// fresh level, so marker stripping and coin consumption never leak between
/// loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSource {
    seed: u64,
    level_count: u32,
}

impl LevelSource {
    pub fn new(seed: u64, level_count: u32) -> Self {
        Self {
            seed,
            level_count: level_count.max(1),
        }
    }

    /// A run restricted to the built-in catalog
    pub fn catalog_only() -> Self {
        Self::new(0, CATALOG.len() as u32)
    }

    /// Run seed for procedural levels
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of levels in the run
    pub fn level_count(&self) -> u32 {
        self.level_count
    }

    /// Whether another level exists after `index`
    pub fn has_next(&self, index: u32) -> bool {
        index + 1 < self.level_count
    }

    /// Build the level at `index`
    pub fn level(&self, index: u32) -> Result<Level, LevelError> {
        if index >= self.level_count {
            return Err(LevelError::IndexOutOfRange {
                index,
                count: self.level_count,
            });
        }
        let level = match CATALOG.get(index as usize) {
            Some(entry) => Level {
                name: entry.name.to_string(),
                spawn: entry.spawn,
                grid: TileGrid::from_codes(entry.rows)?,
            },
            None => procgen::generate(index, self.seed)?,
        };
        level.validate()?;
        log::info!(
            "level {} '{}': {}x{} tiles, spawn {:?}",
            index,
            level.name,
            level.grid.cols(),
            level.grid.rows(),
            level.spawn
        );
        Ok(level)
    }
}
