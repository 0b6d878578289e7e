//! Boss entity creation and management
//!
//! The Necromancer waits at the heart of level 10. It taunts, shoots and
//! raises skeletons until it falls, and its death ends the run in victory.

use hecs::{Entity, World};
use rand::Rng;

use crate::ecs::{MovementPattern, Position};
use super::enemies::{spawn_enemy_with_stats, EnemyKind, EnemyStats};

/// Level shown for the boss
pub const BOSS_LEVEL_TAG: u32 = 10;
/// Turns between taunts
pub const TAUNT_COOLDOWN: u64 = 10;
/// Turns between summons
pub const SUMMON_COOLDOWN: u64 = 3;
/// Summons stop once this many enemies are alive
pub const MAX_ENEMIES_FOR_SUMMON: usize = 12;
/// Distance from the boss at which skeletons rise
const SUMMON_DISTANCE: i32 = 2;

/// Directions tried, in order, when placing a skeleton
pub const SUMMON_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

const TAUNTS: [&str; 5] = [
    "The Necromancer: 'Your weapons are nothing against my dark magic!'",
    "The Necromancer: 'Rise, my minions! Destroy this fool!'",
    "The Necromancer: 'You think you can defeat me? How amusing!'",
    "The Necromancer: 'Your soul will join my army of the dead!'",
    "The Necromancer: 'Feel the power of the void!'",
];

pub const ENTRY_WARNING: &str = "You enter the lair of the Necromancer! The final battle begins!";
pub const ENTRY_TAUNT: &str =
    "The Necromancer: 'Foolish mortal! You dare challenge me? My skeletons will tear you apart!'";
pub const SUMMON_MESSAGE: &str = "The Necromancer summons a skeleton!";

/// Boss-only cooldown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BossComponent {
    /// Turn of the last summon attempt
    pub summon_stamp: u64,
    /// Turn of the last taunt
    pub taunt_stamp: u64,
}

impl BossComponent {
    pub fn taunt_ready(&self, turn: u64) -> bool {
        turn.saturating_sub(self.taunt_stamp) >= TAUNT_COOLDOWN
    }

    pub fn summon_ready(&self, turn: u64, enemy_count: usize) -> bool {
        turn.saturating_sub(self.summon_stamp) >= SUMMON_COOLDOWN
            && enemy_count < MAX_ENEMIES_FOR_SUMMON
    }
}

/// Fixed stats of the Necromancer
pub fn necromancer_stats() -> EnemyStats {
    EnemyStats {
        health: 2000,
        attack: 80,
        defense: 40,
        xp: 1000,
        aggression: 0.9,
        size: 2,
        ranged_cooldown: Some(2),
        pattern: MovementPattern::Normal,
    }
}

/// Fixed stats of a summoned skeleton
pub fn summoned_skeleton_stats() -> EnemyStats {
    EnemyStats {
        health: 100,
        attack: 25,
        defense: 10,
        xp: 50,
        aggression: 0.7,
        size: 1,
        ranged_cooldown: None,
        pattern: MovementPattern::Normal,
    }
}

/// Spawn the boss entity
pub fn spawn_boss(world: &mut World, pos: Position) -> Entity {
    let entity = spawn_enemy_with_stats(
        world,
        EnemyKind::Necromancer,
        BOSS_LEVEL_TAG,
        &necromancer_stats(),
        pos,
    );
    let _ = world.insert_one(entity, BossComponent::default());
    entity
}

/// Spawn a level 3 skeleton raised by the boss
pub fn spawn_summoned_skeleton(world: &mut World, pos: Position) -> Entity {
    spawn_enemy_with_stats(world, EnemyKind::Skeleton, 3, &summoned_skeleton_stats(), pos)
}

/// Candidate cells for a summon, in the order they are tried
pub fn summon_candidates(boss_pos: Position) -> impl Iterator<Item = Position> {
    SUMMON_DIRECTIONS
        .into_iter()
        .map(move |(dx, dy)| boss_pos.offset(dx * SUMMON_DISTANCE, dy * SUMMON_DISTANCE))
}

/// Pick a taunt line at random
pub fn random_taunt(rng: &mut impl Rng) -> &'static str {
    TAUNTS[rng.gen_range(0..TAUNTS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{CombatStats, Enemy, Health, Ranged};

    #[test]
    fn test_spawn_boss() {
        let mut world = World::new();
        let boss = spawn_boss(&mut world, Position::new(40, 30));
        let enemy = *world.get::<&Enemy>(boss).unwrap();
        assert_eq!(enemy.kind, EnemyKind::Necromancer);
        assert_eq!(enemy.level, 10);
        assert_eq!(enemy.size, 2);
        assert_eq!(*world.get::<&Health>(boss).unwrap(), Health::new(2000));
        assert_eq!(
            *world.get::<&CombatStats>(boss).unwrap(),
            CombatStats { attack: 80, defense: 40 }
        );
        assert_eq!(world.get::<&Ranged>(boss).unwrap().cooldown, 2);
        assert!(world.get::<&BossComponent>(boss).is_ok());
    }

    #[test]
    fn test_cooldowns() {
        let boss = BossComponent::default();
        assert!(!boss.taunt_ready(9));
        assert!(boss.taunt_ready(10));
        assert!(boss.summon_ready(3, 11));
        assert!(!boss.summon_ready(3, 12));
        assert!(!boss.summon_ready(2, 1));
    }

    #[test]
    fn test_summon_candidates_order() {
        let cells: Vec<Position> = summon_candidates(Position::new(10, 10)).collect();
        assert_eq!(cells[0], Position::new(12, 10));
        assert_eq!(cells[3], Position::new(10, 8));
        assert_eq!(cells[7], Position::new(8, 8));
    }
}
