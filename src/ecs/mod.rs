//! Entity Component System module
//!
//! Defines the enemy components and the per-turn AI systems.

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::{can_move_to, enemy_at, run_enemy_turn, AiContext, EnemyTurn};
