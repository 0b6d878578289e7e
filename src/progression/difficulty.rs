//! Depth-based scaling
//!
//! The only difficulty curve in the game: enemies grow gently through the
//! first five levels and steeply after that, with a per-enemy-level bonus
//! on top.

// =============================================================================
// Depth Scaling
// =============================================================================

/// Deepest level that still uses the gentle curve and the weak enemy pool
pub const EARLY_DEPTH_LIMIT: u32 = 5;

/// Growth rate per level in the early dungeon
const EARLY_GROWTH: f64 = 1.2;
/// Growth rate per level past the early dungeon
const LATE_GROWTH: f64 = 1.5;
/// Stat bonus per enemy level above 1
const ENEMY_LEVEL_GROWTH: f64 = 1.3;

/// Scaling for one spawned enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthScaling {
    /// Dungeon level (1-indexed)
    pub depth: u32,
    /// Enemy level (1-3)
    pub enemy_level: u32,
}

impl DepthScaling {
    pub fn new(depth: u32, enemy_level: u32) -> Self {
        Self { depth, enemy_level }
    }

    /// `1.2^(depth-1)` up to depth 5, `1.5^(depth-1)` beyond
    pub fn depth_factor(&self) -> f64 {
        let exponent = self.depth.saturating_sub(1) as i32;
        if self.depth <= EARLY_DEPTH_LIMIT {
            EARLY_GROWTH.powi(exponent)
        } else {
            LATE_GROWTH.powi(exponent)
        }
    }

    /// `1.3^(level-1)`
    pub fn level_factor(&self) -> f64 {
        ENEMY_LEVEL_GROWTH.powi(self.enemy_level.saturating_sub(1) as i32)
    }

    /// Combined multiplier applied to every stat
    pub fn multiplier(&self) -> f64 {
        self.depth_factor() * self.level_factor()
    }

    /// Scale a `base + depth * per_depth` stat formula and floor it
    pub fn scale(&self, base: i32, per_depth: i32) -> i32 {
        let raw = (base + self.depth as i32 * per_depth) as f64;
        (raw * self.multiplier()).floor() as i32
    }
}

/// Whether a depth still uses the weak enemy pool
pub fn is_early_depth(depth: u32) -> bool {
    depth <= EARLY_DEPTH_LIMIT
}
