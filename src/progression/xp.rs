//! Experience and leveling
//!
//! XP thresholds and the stat grants of a level-up.

/// XP needed to advance from `level` to the next level
///
/// XP is never spent, so the threshold compares against lifetime XP.
pub fn xp_threshold(level: u32) -> u32 {
    level * 50
}

/// Stats granted by a single level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpGrant {
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
}

/// Every level-up grants the same bonuses and a full heal
pub const LEVEL_UP_GRANT: LevelUpGrant = LevelUpGrant {
    max_health: 20,
    attack: 3,
    defense: 2,
};

/// Whether a character at `level` with `xp` has crossed the next threshold
pub fn ready_to_level(level: u32, xp: u32) -> bool {
    xp >= xp_threshold(level)
}
