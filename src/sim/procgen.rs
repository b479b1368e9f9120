//! Deterministic level generation
//!
//! Levels past the built-in catalog are generated as a pure function of
//! `(index, seed)`: same inputs, same tiles, every time. Difficulty scales
//! with the level index (wider levels, more hazard gaps, more enemies).
//! Generated levels are bordered with invisible solid columns so entities
//! cannot run off into the void.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::level::{Level, LevelError};
use super::tile::{TileGrid, TileKind};

/// Rows in a generated level
const GEN_ROWS: usize = 12;
/// Columns kept hazard-free at each end (spawn and flag approaches)
const SAFE_PAD: usize = 6;

fn level_rng(index: u32, seed: u64) -> Pcg32 {
    // Golden-ratio mix keeps adjacent indices decorrelated under one seed.
    let stream = (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    Pcg32::seed_from_u64(seed ^ stream)
}

/// Generate the level at `index` for a run seeded with `seed`
pub fn generate(index: u32, seed: u64) -> Result<Level, LevelError> {
    let mut rng = level_rng(index, seed);

    let cols = (44 + index as usize * 6).min(90);
    let floor = GEN_ROWS - 2;
    let mut rows = vec![vec![TileKind::Empty; cols]; GEN_ROWS];

    // Continuous floor first; gaps are carved out of it below.
    for col in 0..cols {
        rows[floor][col] = TileKind::Ground;
        rows[floor + 1][col] = TileKind::Ground;
    }

    // Hazard gaps. Later levels trade some lava for water, which can be
    // crossed on foot at the cost of contact damage.
    let gap_chance = (0.10 + index as f64 * 0.02).min(0.28);
    let mut col = SAFE_PAD;
    let mut gaps = 0u32;
    while col < cols - SAFE_PAD {
        if rng.random_bool(gap_chance) {
            let width = rng.random_range(2..=3usize);
            let fill = if index >= 4 && rng.random_bool(0.35) {
                TileKind::Water
            } else {
                TileKind::Lava
            };
            for gx in col..(col + width).min(cols - SAFE_PAD) {
                rows[floor][gx] = fill;
                rows[floor + 1][gx] = fill;
            }
            gaps += 1;
            col += width + 2;
        } else {
            col += 1;
        }
    }

    // Floating brick platforms with coins. Rows 6..=8 stay reachable from
    // the floor with the standard jump.
    let mut col = SAFE_PAD;
    let mut platforms = 0u32;
    while col + 4 < cols - SAFE_PAD {
        if rng.random_bool(0.45) {
            let row = rng.random_range(6..=8usize);
            let len = rng.random_range(2..=4usize);
            for i in 0..len {
                rows[row][col + i] = TileKind::Brick;
                if rng.random_bool(0.5) {
                    rows[row - 1][col + i] = TileKind::Coin;
                }
            }
            platforms += 1;
            col += len + rng.random_range(2..=4usize);
        } else {
            col += 2;
        }
    }

    // Enemies patrol flat floor runs under open sky.
    let max_enemies = (2 + index / 2).min(8);
    let mut enemies = 0u32;
    for col in SAFE_PAD..cols - SAFE_PAD {
        if enemies >= max_enemies {
            break;
        }
        let open = rows[floor - 1][col] == TileKind::Empty
            && rows[floor - 2][col] == TileKind::Empty;
        if open && rows[floor][col] == TileKind::Ground && rng.random_bool(0.12) {
            rows[floor - 1][col] = TileKind::EnemySpawn;
            enemies += 1;
        }
    }

    // Flag near the right edge; later levels dress it with castle masonry.
    let flag_col = cols - 4;
    rows[floor - 1][flag_col] = TileKind::Flag;
    if index >= 6 {
        rows[floor - 1][flag_col + 1] = TileKind::Kingdom;
        rows[floor - 2][flag_col + 1] = TileKind::Kingdom;
    }

    // Invisible borders stop runoff at both ends.
    for row in rows.iter_mut() {
        row[0] = TileKind::Boundary;
        row[cols - 1] = TileKind::Boundary;
    }

    log::info!(
        "generated level {index}: {cols} cols, {gaps} gaps, {platforms} platforms, {enemies} enemies"
    );

    Ok(Level {
        name: format!("Wilds {}", index + 1),
        spawn: (2, (floor - 2) as u32),
        grid: TileGrid::from_rows(rows)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_generate_identical_levels() {
        let a = generate(5, 1234).unwrap();
        let b = generate(5, 1234).unwrap();
        assert_eq!(a.name, b.name);
        assert_eq!(a.spawn, b.spawn);
        for row in 0..a.grid.rows() {
            for col in 0..a.grid.cols() {
                assert_eq!(
                    a.grid.get(col as i64, row as i64),
                    b.grid.get(col as i64, row as i64),
                    "cell ({col}, {row}) differs between identical generations"
                );
            }
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a = generate(5, 1).unwrap();
        let b = generate(5, 2).unwrap();
        let mut differs = false;
        for row in 0..a.grid.rows() {
            for col in 0..a.grid.cols() {
                if a.grid.get(col as i64, row as i64) != b.grid.get(col as i64, row as i64) {
                    differs = true;
                }
            }
        }
        assert!(differs);
    }

    #[test]
    fn generated_levels_satisfy_the_load_contract() {
        for index in 4..12 {
            for seed in [0, 7, 99999] {
                let level = generate(index, seed).unwrap();
                level.validate().unwrap();
                assert!(level.grid.find(TileKind::Flag).is_some());
                // spawn column has solid footing
                let spawn_col = level.spawn.0 as i64;
                let floor_row = (GEN_ROWS - 2) as i64;
                assert!(level.grid.get(spawn_col, floor_row).is_solid());
                // bordered at both ends
                for row in 0..level.grid.rows() as i64 {
                    assert_eq!(level.grid.get(0, row), TileKind::Boundary);
                    assert_eq!(
                        level.grid.get(level.grid.cols() as i64 - 1, row),
                        TileKind::Boundary
                    );
                }
            }
        }
    }

    #[test]
    fn difficulty_scales_with_index() {
        let early = generate(4, 42).unwrap();
        let late = generate(11, 42).unwrap();
        assert!(late.grid.cols() > early.grid.cols());
    }
}
