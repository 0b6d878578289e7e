//! World module
//!
//! Contains map data structures, tiles, and procedural generation.

pub mod map;
pub mod tile;
pub mod generation;

pub use map::Map;
pub use tile::TileType;
pub use generation::{generate_level, GridSize, LevelLayout, Room};
