//! Entity creation and management

pub mod player;
pub mod enemies;
pub mod bosses;
pub mod spawner;

pub use player::{HitOutcome, Modifiers, Player};
pub use enemies::{
    roll_enemy_kind, roll_enemy_level, spawn_enemy_scaled, spawn_enemy_with_stats,
    spawn_random_enemy, EnemyDef, EnemyKind, EnemyStats, ENEMY_DEFS, WEAK_POOL,
};
pub use bosses::{spawn_boss, spawn_summoned_skeleton, BossComponent};
pub use spawner::{populate_level, ItemIdAllocator, Population};
