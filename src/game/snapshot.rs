//! Published game state
//!
//! A read-only, serializable copy of everything a renderer needs after a
//! command has been applied.

use serde::Serialize;

use crate::combat::Projectile;
use crate::ecs::{Facing, Position};
use crate::entities::{EnemyKind, Player};
use crate::items::GroundItem;
use crate::progression::MetaPowers;
use super::message::GameMessage;
use super::state::{GameState, RunStats};

/// Visible window onto the grid, clamped to the map edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Center the window on `focus` without leaving the map
    pub fn centered_on(focus: Position, width: i32, height: i32, map_width: i32, map_height: i32) -> Self {
        Self {
            x: clamp_axis(focus.x, width, map_width),
            y: clamp_axis(focus.y, height, map_height),
            width,
            height,
        }
    }
}

fn clamp_axis(focus: i32, view: i32, map: i32) -> i32 {
    (focus - view / 2).clamp(0, (map - view).max(0))
}

/// One enemy as seen from outside
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub level: u32,
    pub pos: Position,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub size: u8,
    pub facing: Facing,
    pub is_boss: bool,
}

/// Full published state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: GameState,
    pub turn: u64,
    pub level: u32,
    /// Grid rows, `#` for wall and `.` for floor
    pub map: Vec<String>,
    pub viewport: Viewport,
    pub player: Player,
    /// Enemies in acting order
    pub enemies: Vec<EnemyView>,
    pub items: Vec<GroundItem>,
    pub projectiles: Vec<Projectile>,
    pub door: Option<Position>,
    pub stats: RunStats,
    pub powers: MetaPowers,
    /// Most recent messages, newest first
    pub messages: Vec<GameMessage>,
    pub game_over: bool,
    pub victory: bool,
}
