//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (level generation)
//! - No rendering, audio, or platform dependencies
//!
//! Hosts render by reading [`GameState`] between frames and react to discrete
//! gameplay moments by draining [`GameEvent`]s. Nothing in here blocks.

pub mod collision;
pub mod level;
pub mod procgen;
pub mod runner;
pub mod state;
pub mod tick;
pub mod tile;

pub use collision::{aabb_collide, try_move};
pub use level::{Level, LevelError, LevelSource};
pub use runner::FixedTimestep;
pub use state::{Camera, Enemy, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, hurt_player, tick};
pub use tile::{TileGrid, TileKind};
