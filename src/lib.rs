//! Blightdeep - A deterministic turn-based dungeon crawler engine
//!
//! Ten procedurally carved levels, a Necromancer waiting at the bottom,
//! and a headless core that publishes a snapshot after every command.

pub mod game;
pub mod ecs;
pub mod world;
pub mod entities;
pub mod combat;
pub mod items;
pub mod progression;
pub mod data;

// Re-export commonly used types
pub use data::EngineConfig;
pub use game::{Command, CommandOutcome, Game, GameState, Snapshot};
pub use ecs::components::*;
pub use world::map::Map;
