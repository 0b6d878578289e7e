//! Procedural map generation
//!
//! Normal levels are rooms and corridors; level 10 is the boss lair.

pub mod rooms;
pub mod boss;

pub use rooms::Room;
pub use boss::{is_boss_level, BOSS_LEVEL};

use rand::rngs::StdRng;
use super::Map;

/// Grid dimensions used for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub normal: (i32, i32),
    pub boss: (i32, i32),
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            normal: (40, 30),
            boss: (80, 60),
        }
    }
}

/// The carved terrain of a level plus the rooms used to populate it
///
/// Rooms are kept only until the level has been populated.
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub map: Map,
    pub rooms: Vec<Room>,
    pub is_boss: bool,
}

/// Generate the terrain for a dungeon level
pub fn generate_level(rng: &mut StdRng, level: u32, size: GridSize) -> LevelLayout {
    if is_boss_level(level) {
        let (width, height) = size.boss;
        let (map, lair) = boss::generate_lair(width, height);
        log::debug!("Carved boss lair {}x{}", width, height);
        LevelLayout { map, rooms: vec![lair], is_boss: true }
    } else {
        let (width, height) = size.normal;
        let (map, rooms) = rooms::generate_dungeon(rng, width, height, level);
        log::debug!("Carved level {} with {} rooms", level, rooms.len());
        LevelLayout { map, rooms, is_boss: false }
    }
}
