//! Map data structure
//!
//! The 2D grid representing a single dungeon level.

use std::collections::VecDeque;

use super::tile::TileType;
use crate::ecs::Position;

/// A dungeon level map
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<TileType>,
    /// Dungeon level this map was generated for
    pub level: u32,
    /// Start position for player
    pub start_pos: Position,
    /// Door to the next level (boss levels have none)
    pub door_pos: Option<Position>,
}

impl Map {
    /// Create a new map filled with walls
    pub fn new(width: i32, height: i32, level: u32) -> Self {
        let tiles = vec![TileType::Wall; (width * height) as usize];
        Self {
            width,
            height,
            tiles,
            level,
            start_pos: Position::new(0, 0),
            door_pos: None,
        }
    }

    /// Build a map from glyph rows (`#` wall, `.` floor)
    ///
    /// Unknown glyphs are read as walls. Rows shorter than the widest row
    /// are padded with walls.
    pub fn from_rows(rows: &[&str], level: u32) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut map = Map::new(width, height, level);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let tile = TileType::from_glyph(glyph).unwrap_or(TileType::Wall);
                map.set_tile(x as i32, y as i32, tile);
            }
        }
        map
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    pub fn idx_to_xy(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get tile at position
    pub fn get_tile(&self, x: i32, y: i32) -> Option<TileType> {
        if self.in_bounds(x, y) {
            Some(self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Set tile type at position
    pub fn set_tile(&mut self, x: i32, y: i32, tile_type: TileType) {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.tiles[idx] = tile_type;
        }
    }

    /// Check if a position is walkable
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).is_some_and(|t| t.is_walkable())
    }

    /// Check if a position is a wall (out of bounds counts as wall)
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        !self.is_walkable(x, y)
    }

    /// Get all walkable positions
    pub fn get_walkable_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_walkable())
            .map(|(idx, _)| {
                let (x, y) = self.idx_to_xy(idx);
                Position::new(x, y)
            })
            .collect()
    }

    /// Render the grid as one string per row
    pub fn rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.tiles[self.xy_to_idx(x, y)].glyph())
                    .collect()
            })
            .collect()
    }

    /// Flood fill over floor tiles (4-way) from a start position
    ///
    /// Returns a visited mask indexed like `tiles`.
    pub fn reachable_from(&self, start: Position) -> Vec<bool> {
        let mut visited = vec![false; self.tiles.len()];
        if !self.is_walkable(start.x, start.y) {
            return visited;
        }

        let mut queue = VecDeque::new();
        visited[self.xy_to_idx(start.x, start.y)] = true;
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
                let next = pos.offset(dx, dy);
                if !self.is_walkable(next.x, next.y) {
                    continue;
                }
                let idx = self.xy_to_idx(next.x, next.y);
                if !visited[idx] {
                    visited[idx] = true;
                    queue.push_back(next);
                }
            }
        }

        visited
    }

    /// Check that every floor tile is reachable from the start position
    pub fn is_fully_connected(&self) -> bool {
        let visited = self.reachable_from(self.start_pos);
        self.tiles
            .iter()
            .zip(visited)
            .all(|(tile, seen)| !tile.is_walkable() || seen)
    }
}
