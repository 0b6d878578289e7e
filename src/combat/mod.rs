//! Combat system

pub mod damage;
pub mod projectiles;

pub use damage::{
    base_damage, chance, enemy_projectile_damage, enemy_retaliation, player_damage,
    scale_damage, AttackResult,
};
pub use projectiles::{
    is_auto_fire_turn, random_direction, Projectile, ProjectileOwner, DIRECTIONS,
};
