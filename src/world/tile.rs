//! Tile definitions
//!
//! A level cell is either solid rock or open floor. Doors are tracked as
//! separate markers on top of floor tiles.

use serde::{Deserialize, Serialize};

/// Types of tiles in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Wall,
    Floor,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileType::Floor)
    }

    pub fn glyph(&self) -> char {
        match self {
            TileType::Floor => '.',
            TileType::Wall => '#',
        }
    }

    /// Parse a glyph back into a tile (used by hand-built arenas)
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(TileType::Floor),
            '#' => Some(TileType::Wall),
            _ => None,
        }
    }
}
