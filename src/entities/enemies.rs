//! Enemy entity creation
//!
//! Defines the enemy catalog and the factory that turns a type, an enemy
//! level and the current depth into a spawned entity.

use hecs::{Entity, World};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ecs::{CombatStats, Enemy, Health, MovementPattern, Position, Ranged, XpReward, AI};
use crate::progression::{is_early_depth, DepthScaling};

/// Every enemy type, including the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Goblin,
    Orc,
    Troll,
    Dragon,
    Skeleton,
    Zombie,
    Ghost,
    Demon,
    Vampire,
    Lich,
    Beholder,
    Golem,
    Hydra,
    Kraken,
    Mimic,
    Phoenix,
    Slime,
    Specter,
    Wraith,
    Wyvern,
    Necromancer,
}

impl EnemyKind {
    /// Lowercase type tag used in messages
    pub fn tag(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "goblin",
            EnemyKind::Orc => "orc",
            EnemyKind::Troll => "troll",
            EnemyKind::Dragon => "dragon",
            EnemyKind::Skeleton => "skeleton",
            EnemyKind::Zombie => "zombie",
            EnemyKind::Ghost => "ghost",
            EnemyKind::Demon => "demon",
            EnemyKind::Vampire => "vampire",
            EnemyKind::Lich => "lich",
            EnemyKind::Beholder => "beholder",
            EnemyKind::Golem => "golem",
            EnemyKind::Hydra => "hydra",
            EnemyKind::Kraken => "kraken",
            EnemyKind::Mimic => "mimic",
            EnemyKind::Phoenix => "phoenix",
            EnemyKind::Slime => "slime",
            EnemyKind::Specter => "specter",
            EnemyKind::Wraith => "wraith",
            EnemyKind::Wyvern => "wyvern",
            EnemyKind::Necromancer => "necromancer",
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, EnemyKind::Necromancer)
    }

    /// Catalog entry, `None` for the boss which has fixed stats
    pub fn def(&self) -> Option<&'static EnemyDef> {
        ENEMY_DEFS.iter().find(|d| d.kind == *self)
    }
}

/// A stat formula `base + depth * per_depth`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatFormula {
    pub base: i32,
    pub per_depth: i32,
}

const fn f(base: i32, per_depth: i32) -> StatFormula {
    StatFormula { base, per_depth }
}

/// Enemy definition with stat formulas and behavior
#[derive(Debug, Clone, Copy)]
pub struct EnemyDef {
    pub kind: EnemyKind,
    pub health: StatFormula,
    pub attack: StatFormula,
    pub defense: StatFormula,
    pub xp: StatFormula,
    pub aggression: f64,
    pub size: u8,
    /// Shot cooldown in turns for ranged types
    pub ranged_cooldown: Option<u64>,
    pub pattern: MovementPattern,
}

/// Concrete stats of one spawned enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub xp: u32,
    pub aggression: f64,
    pub size: u8,
    pub ranged_cooldown: Option<u64>,
    pub pattern: MovementPattern,
}

use MovementPattern as P;

// =============================================================================
// Enemy Catalog
// =============================================================================

pub static ENEMY_DEFS: [EnemyDef; 20] = [
    EnemyDef { kind: EnemyKind::Goblin, health: f(30, 15), attack: f(8, 4), defense: f(2, 2), xp: f(10, 10), aggression: 0.4, size: 1, ranged_cooldown: None, pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Orc, health: f(50, 20), attack: f(12, 6), defense: f(4, 3), xp: f(20, 15), aggression: 0.5, size: 1, ranged_cooldown: None, pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Troll, health: f(80, 25), attack: f(18, 8), defense: f(8, 4), xp: f(35, 20), aggression: 0.6, size: 1, ranged_cooldown: None, pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Dragon, health: f(150, 40), attack: f(25, 10), defense: f(15, 5), xp: f(100, 30), aggression: 0.7, size: 2, ranged_cooldown: None, pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Skeleton, health: f(40, 12), attack: f(10, 4), defense: f(3, 2), xp: f(15, 12), aggression: 0.5, size: 1, ranged_cooldown: None, pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Zombie, health: f(60, 18), attack: f(14, 5), defense: f(5, 3), xp: f(25, 15), aggression: 0.6, size: 1, ranged_cooldown: None, pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Ghost, health: f(45, 12), attack: f(16, 5), defense: f(2, 2), xp: f(30, 15), aggression: 0.7, size: 1, ranged_cooldown: None, pattern: P::Teleport },
    EnemyDef { kind: EnemyKind::Demon, health: f(120, 30), attack: f(22, 8), defense: f(12, 4), xp: f(80, 25), aggression: 0.8, size: 1, ranged_cooldown: Some(5), pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Vampire, health: f(90, 25), attack: f(20, 7), defense: f(8, 3), xp: f(60, 20), aggression: 0.7, size: 1, ranged_cooldown: None, pattern: P::Fast },
    EnemyDef { kind: EnemyKind::Lich, health: f(200, 50), attack: f(30, 12), defense: f(20, 6), xp: f(150, 40), aggression: 0.8, size: 2, ranged_cooldown: Some(3), pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Beholder, health: f(180, 35), attack: f(28, 10), defense: f(18, 5), xp: f(120, 35), aggression: 0.9, size: 2, ranged_cooldown: Some(2), pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Golem, health: f(300, 60), attack: f(35, 12), defense: f(25, 8), xp: f(200, 50), aggression: 0.6, size: 2, ranged_cooldown: None, pattern: P::Slow },
    EnemyDef { kind: EnemyKind::Hydra, health: f(400, 80), attack: f(40, 15), defense: f(30, 10), xp: f(300, 70), aggression: 0.7, size: 3, ranged_cooldown: None, pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Kraken, health: f(500, 100), attack: f(45, 18), defense: f(35, 12), xp: f(400, 90), aggression: 0.8, size: 3, ranged_cooldown: Some(4), pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Mimic, health: f(80, 20), attack: f(25, 8), defense: f(15, 5), xp: f(50, 25), aggression: 0.9, size: 1, ranged_cooldown: None, pattern: P::Ambush },
    EnemyDef { kind: EnemyKind::Phoenix, health: f(250, 45), attack: f(35, 12), defense: f(20, 6), xp: f(180, 45), aggression: 0.8, size: 2, ranged_cooldown: Some(3), pattern: P::Normal },
    EnemyDef { kind: EnemyKind::Slime, health: f(60, 15), attack: f(12, 4), defense: f(8, 3), xp: f(30, 15), aggression: 0.5, size: 1, ranged_cooldown: None, pattern: P::Bounce },
    EnemyDef { kind: EnemyKind::Specter, health: f(70, 18), attack: f(18, 6), defense: f(5, 2), xp: f(40, 15), aggression: 0.7, size: 1, ranged_cooldown: None, pattern: P::Float },
    EnemyDef { kind: EnemyKind::Wraith, health: f(90, 22), attack: f(22, 7), defense: f(8, 3), xp: f(60, 25), aggression: 0.8, size: 1, ranged_cooldown: Some(6), pattern: P::Teleport },
    EnemyDef { kind: EnemyKind::Wyvern, health: f(200, 40), attack: f(32, 10), defense: f(18, 5), xp: f(150, 40), aggression: 0.8, size: 2, ranged_cooldown: Some(4), pattern: P::Fly },
];

/// Types that spawn in the first five levels
pub const WEAK_POOL: [EnemyKind; 4] = [
    EnemyKind::Goblin,
    EnemyKind::Skeleton,
    EnemyKind::Zombie,
    EnemyKind::Slime,
];

impl EnemyDef {
    /// Stats for this type at a given depth and enemy level
    pub fn scaled(&self, scaling: &DepthScaling) -> EnemyStats {
        let scale = |formula: StatFormula| scaling.scale(formula.base, formula.per_depth);
        EnemyStats {
            health: scale(self.health),
            attack: scale(self.attack),
            defense: scale(self.defense),
            xp: scale(self.xp).max(0) as u32,
            aggression: self.aggression,
            size: self.size,
            ranged_cooldown: self.ranged_cooldown,
            pattern: self.pattern,
        }
    }
}

// =============================================================================
// Spawning Functions
// =============================================================================

/// Draw an enemy type for a depth
pub fn roll_enemy_kind(depth: u32, rng: &mut impl Rng) -> EnemyKind {
    if is_early_depth(depth) {
        WEAK_POOL[rng.gen_range(0..WEAK_POOL.len())]
    } else {
        ENEMY_DEFS[rng.gen_range(0..ENEMY_DEFS.len())].kind
    }
}

/// Draw an enemy level, uniform in 1..=3
pub fn roll_enemy_level(rng: &mut impl Rng) -> u32 {
    rng.gen_range(1..=3)
}

/// Spawn an enemy with explicit stats
pub fn spawn_enemy_with_stats(
    world: &mut World,
    kind: EnemyKind,
    level: u32,
    stats: &EnemyStats,
    pos: Position,
) -> Entity {
    let entity = world.spawn((
        pos,
        Enemy { kind, level, size: stats.size },
        Health::new(stats.health),
        CombatStats { attack: stats.attack, defense: stats.defense },
        AI::new(stats.pattern, stats.aggression),
        XpReward(stats.xp),
    ));

    if let Some(cooldown) = stats.ranged_cooldown {
        let _ = world.insert_one(entity, Ranged::new(cooldown));
    }

    entity
}

/// Spawn a regular enemy with depth scaling applied
///
/// Returns `None` for the boss, which is spawned through its own path.
pub fn spawn_enemy_scaled(
    world: &mut World,
    kind: EnemyKind,
    level: u32,
    depth: u32,
    pos: Position,
) -> Option<Entity> {
    let def = kind.def()?;
    let stats = def.scaled(&DepthScaling::new(depth, level));
    Some(spawn_enemy_with_stats(world, kind, level, &stats, pos))
}

/// Roll a type and level for the depth and spawn it
pub fn spawn_random_enemy(
    world: &mut World,
    depth: u32,
    pos: Position,
    rng: &mut impl Rng,
) -> Option<Entity> {
    let kind = roll_enemy_kind(depth, rng);
    let level = roll_enemy_level(rng);
    spawn_enemy_scaled(world, kind, level, depth, pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_goblin_depth_one_level_one() {
        let stats = EnemyKind::Goblin
            .def()
            .map(|d| d.scaled(&DepthScaling::new(1, 1)));
        let stats = stats.unwrap();
        assert_eq!((stats.health, stats.attack, stats.defense, stats.xp), (45, 12, 4, 20));
    }

    #[test]
    fn test_catalog_covers_every_regular_kind() {
        for def in ENEMY_DEFS.iter() {
            assert!(!def.kind.is_boss());
            assert_eq!(def.kind.def().map(|d| d.kind), Some(def.kind));
        }
        assert!(EnemyKind::Necromancer.def().is_none());
    }

    #[test]
    fn test_early_depth_uses_weak_pool() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..500 {
            assert!(WEAK_POOL.contains(&roll_enemy_kind(5, &mut rng)));
        }
    }

    #[test]
    fn test_late_depth_uses_full_pool() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2_000 {
            seen.insert(roll_enemy_kind(6, &mut rng));
        }
        assert_eq!(seen.len(), ENEMY_DEFS.len());
    }

    #[test]
    fn test_enemy_level_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..300 {
            let level = roll_enemy_level(&mut rng);
            assert!((1..=3).contains(&level));
        }
    }

    #[test]
    fn test_spawn_ranged_enemy() {
        let mut world = World::new();
        let entity = spawn_enemy_scaled(&mut world, EnemyKind::Demon, 2, 7, Position::new(3, 3)).unwrap();
        {
            let ranged = world.get::<&Ranged>(entity).unwrap();
            assert_eq!(ranged.cooldown, 5);
            assert_eq!(ranged.last_shot, 0);
        }

        let goblin = spawn_enemy_scaled(&mut world, EnemyKind::Goblin, 1, 1, Position::new(4, 4)).unwrap();
        assert!(world.get::<&Ranged>(goblin).is_err());
    }
}
