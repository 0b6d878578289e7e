//! Boss lair generator
//!
//! The final level is a single open hall with no door. The only way out is
//! through the Necromancer.

use crate::ecs::Position;
use crate::world::Map;
use super::rooms::{carve_room, Room};

/// Dungeon level that hosts the boss
pub const BOSS_LEVEL: u32 = 10;

/// The lair rectangle, fixed regardless of grid size
pub const LAIR: Room = Room { x: 10, y: 10, width: 60, height: 40 };

/// Player entry offset from the lair's top-left corner
const ENTRY_OFFSET: i32 = 5;

/// Margin kept clear of potions along every lair wall
pub const POTION_MARGIN: i32 = 5;

/// Check whether a dungeon level is the boss level
pub fn is_boss_level(level: u32) -> bool {
    level == BOSS_LEVEL
}

/// Carve the lair into a fresh wall-filled map
pub fn generate_lair(width: i32, height: i32) -> (Map, Room) {
    let mut map = Map::new(width, height, BOSS_LEVEL);
    carve_room(&mut map, &LAIR);
    map.start_pos = Position::new(LAIR.x + ENTRY_OFFSET, LAIR.y + ENTRY_OFFSET);
    map.door_pos = None;
    (map, LAIR)
}

/// Where the boss stands when the lair opens
pub fn boss_spawn(room: &Room) -> Position {
    room.center()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lair_layout() {
        let (map, room) = generate_lair(80, 60);
        assert_eq!(map.start_pos, Position::new(15, 15));
        assert_eq!(boss_spawn(&room), Position::new(40, 30));
        assert!(map.door_pos.is_none());
        assert_eq!(map.get_walkable_positions().len(), 60 * 40);
        assert!(map.is_fully_connected());
    }

    #[test]
    fn test_boss_level_check() {
        assert!(is_boss_level(10));
        assert!(!is_boss_level(9));
        assert!(!is_boss_level(11));
    }
}
