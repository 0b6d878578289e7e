//! Game module - Core game logic and state management

mod commands;
mod message;
mod snapshot;
mod state;
mod turn;

pub use commands::{parse_script_line, Command, CommandOutcome, CommandParseError, ScriptLine};
pub use message::{GameMessage, MessageCategory, MessageLog};
pub use snapshot::{EnemyView, Snapshot, Viewport};
pub use state::{Game, GameState, RunStats, ULTIMATE_COOLDOWN};
pub use turn::TurnOrder;
