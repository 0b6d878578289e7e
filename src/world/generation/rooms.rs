//! Room and corridor dungeon generator
//!
//! Classic roguelike dungeon with rectangular rooms connected by L-shaped
//! corridors in the order the rooms were accepted.

use rand::Rng;
use rand::rngs::StdRng;
use crate::ecs::Position;
use crate::world::{Map, TileType};

/// Smallest room side
pub const MIN_ROOM_SIZE: i32 = 5;
/// Largest room side
pub const MAX_ROOM_SIZE: i32 = 12;

/// A rectangular room, carved as `[x, x + width) x [y, y + height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Overlap test with inclusive far edges, so touching rooms count as overlapping
    pub fn intersects(&self, other: &Room) -> bool {
        !(self.x + self.width < other.x
            || other.x + other.width < self.x
            || self.y + self.height < other.y
            || other.y + other.height < self.y)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x && pos.x < self.x + self.width && pos.y >= self.y && pos.y < self.y + self.height
    }

    /// Pick a random cell one tile in from the room's top-left edge
    pub fn random_interior(&self, rng: &mut impl Rng) -> Position {
        let x = self.x + 1 + rng.gen_range(0..(self.width - 2).max(1));
        let y = self.y + 1 + rng.gen_range(0..(self.height - 2).max(1));
        Position::new(x, y)
    }
}

/// Number of room candidates rolled for a level
pub fn room_attempts(level: u32, rng: &mut impl Rng) -> u32 {
    5 + (level as f64 * 1.5).floor() as u32 + rng.gen_range(0..5)
}

/// Generate a dungeon with rooms and corridors
///
/// Rejected candidates are discarded, not retried. The player starts at the
/// first room's center and the door sits at the last room's center.
pub fn generate_dungeon(rng: &mut StdRng, width: i32, height: i32, level: u32) -> (Map, Vec<Room>) {
    let mut map = Map::new(width, height, level);
    let attempts = room_attempts(level, rng);

    let mut rooms: Vec<Room> = Vec::new();

    for _ in 0..attempts {
        let w = rng.gen_range(MIN_ROOM_SIZE..=MAX_ROOM_SIZE);
        let h = rng.gen_range(MIN_ROOM_SIZE..=MAX_ROOM_SIZE);
        let x = 1 + rng.gen_range(0..(width - w - 2).max(1));
        let y = 1 + rng.gen_range(0..(height - h - 2).max(1));

        let new_room = Room::new(x, y, w, h);

        // Check for overlaps
        let overlaps = rooms.iter().any(|r| new_room.intersects(r));

        if !overlaps {
            carve_room(&mut map, &new_room);
            rooms.push(new_room);
        }
    }

    for pair in rooms.windows(2) {
        let from = pair[0].center();
        let to = pair[1].center();
        carve_h_corridor(&mut map, from.x, to.x, from.y);
        carve_v_corridor(&mut map, from.y, to.y, to.x);
    }

    if let Some(first) = rooms.first() {
        map.start_pos = first.center();
    }

    if let Some(last) = rooms.last() {
        map.door_pos = Some(last.center());
    }

    (map, rooms)
}

/// Carve out a room
pub fn carve_room(map: &mut Map, room: &Room) {
    for y in room.y..room.y + room.height {
        for x in room.x..room.x + room.width {
            map.set_tile(x, y, TileType::Floor);
        }
    }
}

/// Carve a horizontal corridor
fn carve_h_corridor(map: &mut Map, x1: i32, x2: i32, y: i32) {
    let (start, end) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    for x in start..=end {
        map.set_tile(x, y, TileType::Floor);
    }
}

/// Carve a vertical corridor
fn carve_v_corridor(map: &mut Map, y1: i32, y2: i32, x: i32) {
    let (start, end) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    for y in start..=end {
        map.set_tile(x, y, TileType::Floor);
    }
}
