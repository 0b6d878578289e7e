//! ECS Components
//!
//! All components attached to enemy entities, plus the shared position type.

use serde::{Deserialize, Serialize};

use crate::entities::EnemyKind;

// ============================================================================
// Position & Movement
// ============================================================================

/// Position in the game world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position
    pub fn distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Position shifted by a delta
    pub fn offset(&self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

/// Direction an entity faces, derived from its last move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Horizontal motion wins over vertical; no motion faces down
    pub fn from_delta(dx: i32, dy: i32) -> Self {
        if dx > 0 {
            Facing::Right
        } else if dx < 0 {
            Facing::Left
        } else if dy > 0 {
            Facing::Down
        } else if dy < 0 {
            Facing::Up
        } else {
            Facing::Down
        }
    }
}

// ============================================================================
// Identity
// ============================================================================

/// Marks an entity as an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Enemy level (1-3 for normal spawns, 10 for the boss)
    pub level: u32,
    /// Footprint class in tiles (1, 2 or 3), cosmetic for collisions
    pub size: u8,
}

impl Enemy {
    /// "goblin level 2" style label used in combat messages
    pub fn label(&self) -> String {
        format!("{} level {}", self.kind.tag(), self.level)
    }
}

// ============================================================================
// Combat Stats
// ============================================================================

/// Health pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage, clamping at zero. Returns the damage actually absorbed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.clamp(0, self.current.max(0));
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.min(self.max - self.current).max(0);
        self.current += actual;
        actual
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Flat attack and defense values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack: i32,
    pub defense: i32,
}

/// Ranged attack capability with its cooldown state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranged {
    /// Turns between shots
    pub cooldown: u64,
    /// Turn stamp of the last shot (0 before the first)
    pub last_shot: u64,
}

impl Ranged {
    pub fn new(cooldown: u64) -> Self {
        Self { cooldown, last_shot: 0 }
    }

    pub fn is_ready(&self, turn: u64) -> bool {
        turn.saturating_sub(self.last_shot) >= self.cooldown
    }
}

// ============================================================================
// AI
// ============================================================================

/// Movement strategy selected per enemy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementPattern {
    /// Pursue when close, otherwise wander
    Normal,
    /// Two-tile pursuit stride over a wider radius
    Fast,
    /// Only acts 30% of the time
    Slow,
    /// Blinks next to the player from mid range
    Teleport,
    /// Occasionally drifts through walls
    Float,
    /// Walks a fixed heading and reverses off obstacles
    Bounce,
    /// Lies in wait until the player comes close
    Ambush,
    /// Diagonal-capable pursuit and wandering
    Fly,
}

/// AI state for an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AI {
    pub pattern: MovementPattern,
    /// Probability weight for starting a move and for pursuing
    pub aggression: f64,
    /// Index into the bounce headings, chosen on first use
    pub heading: Option<usize>,
    pub facing: Facing,
}

impl AI {
    pub fn new(pattern: MovementPattern, aggression: f64) -> Self {
        Self {
            pattern,
            aggression,
            heading: None,
            facing: Facing::Down,
        }
    }
}

// ============================================================================
// Progression
// ============================================================================

/// XP awarded for killing this entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpReward(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances() {
        let a = Position::new(1, 1);
        let b = Position::new(4, 3);
        assert_eq!(a.distance(&b), 5);
        assert_eq!(a.offset(-1, 2), Position::new(0, 3));
    }

    #[test]
    fn test_facing_from_delta() {
        assert_eq!(Facing::from_delta(1, 1), Facing::Right);
        assert_eq!(Facing::from_delta(-2, 0), Facing::Left);
        assert_eq!(Facing::from_delta(0, -1), Facing::Up);
        assert_eq!(Facing::from_delta(0, 0), Facing::Down);
    }

    #[test]
    fn test_health_never_negative() {
        let mut health = Health::new(30);
        assert_eq!(health.take_damage(45), 30);
        assert_eq!(health.current, 0);
        assert!(health.is_dead());
        assert_eq!(health.take_damage(5), 0);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_health_heal_caps_at_max() {
        let mut health = Health::new(50);
        health.take_damage(20);
        assert_eq!(health.heal(100), 20);
        assert_eq!(health.current, 50);
    }

    #[test]
    fn test_ranged_cooldown() {
        let mut ranged = Ranged::new(3);
        assert!(!ranged.is_ready(2));
        assert!(ranged.is_ready(3));
        ranged.last_shot = 3;
        assert!(!ranged.is_ready(5));
        assert!(ranged.is_ready(6));
    }
}
