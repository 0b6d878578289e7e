//! Player commands
//!
//! Discrete actions accepted by the engine, plus the line-oriented text
//! grammar used by scripts.

use std::str::FromStr;

use thiserror::Error;

use crate::items::ItemKind;

/// A discrete player action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Step one tile; moving into an enemy attacks it
    Move { dx: i32, dy: i32 },
    Wait,
    UseUltimate,
    /// Start, restart, or respawn depending on the game state
    Restart,
    /// Combine three copies of an item into super status
    Upgrade(ItemKind),
}

impl Command {
    pub const UP: Command = Command::Move { dx: 0, dy: -1 };
    pub const DOWN: Command = Command::Move { dx: 0, dy: 1 };
    pub const LEFT: Command = Command::Move { dx: -1, dy: 0 };
    pub const RIGHT: Command = Command::Move { dx: 1, dy: 0 };
}

/// What applying a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The turn counter advanced and the world reacted
    TurnAdvanced,
    /// The command took effect without advancing the turn
    Applied,
    /// The command was rejected or had nothing to do
    Ignored,
}

/// Errors from the command grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("bad direction '{0}', expected up, down, left or right")]
    BadDirection(String),

    #[error(transparent)]
    UnknownItem(#[from] crate::items::UnknownItemTag),
}

fn parse_direction(word: &str) -> Result<Command, CommandParseError> {
    match word {
        "up" | "w" => Ok(Command::UP),
        "down" | "s" => Ok(Command::DOWN),
        "left" | "a" => Ok(Command::LEFT),
        "right" | "d" => Ok(Command::RIGHT),
        other => Err(CommandParseError::BadDirection(other.to_string())),
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or_default().to_lowercase();
        let arg = words.next().map(str::to_lowercase);

        match (head.as_str(), arg) {
            ("move", Some(dir)) => parse_direction(&dir),
            ("move", None) => Err(CommandParseError::BadDirection(String::new())),
            ("w" | "a" | "s" | "d", None) => parse_direction(&head),
            ("wait", None) => Ok(Command::Wait),
            ("ult" | "ultimate", None) => Ok(Command::UseUltimate),
            ("restart", None) => Ok(Command::Restart),
            ("upgrade", Some(tag)) => Ok(Command::Upgrade(tag.parse()?)),
            _ => Err(CommandParseError::UnknownCommand(line.trim().to_string())),
        }
    }
}

/// One line of a command script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLine {
    Command(Command),
    /// Print the current snapshot
    Snapshot,
}

/// Parse a script line; blank lines and `#` comments yield `None`
pub fn parse_script_line(line: &str) -> Result<Option<ScriptLine>, CommandParseError> {
    let content = line.split('#').next().unwrap_or_default().trim();
    if content.is_empty() {
        return Ok(None);
    }
    if content.eq_ignore_ascii_case("snapshot") {
        return Ok(Some(ScriptLine::Snapshot));
    }
    content.parse().map(|cmd| Some(ScriptLine::Command(cmd)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!("move up".parse::<Command>(), Ok(Command::UP));
        assert_eq!("move  Left".parse::<Command>(), Ok(Command::LEFT));
        assert_eq!("d".parse::<Command>(), Ok(Command::RIGHT));
        assert_eq!("move s".parse::<Command>(), Ok(Command::DOWN));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("wait".parse::<Command>(), Ok(Command::Wait));
        assert_eq!("ult".parse::<Command>(), Ok(Command::UseUltimate));
        assert_eq!("restart".parse::<Command>(), Ok(Command::Restart));
        assert_eq!(
            "upgrade health_potion".parse::<Command>(),
            Ok(Command::Upgrade(ItemKind::HealthPotion))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("jump".parse::<Command>(), Err(CommandParseError::UnknownCommand(_))));
        assert!(matches!("move north".parse::<Command>(), Err(CommandParseError::BadDirection(_))));
        assert!(matches!("upgrade anvil".parse::<Command>(), Err(CommandParseError::UnknownItem(_))));
    }

    #[test]
    fn test_script_lines() {
        assert_eq!(parse_script_line("   "), Ok(None));
        assert_eq!(parse_script_line("# comment only"), Ok(None));
        assert_eq!(
            parse_script_line("wait # skip a turn"),
            Ok(Some(ScriptLine::Command(Command::Wait)))
        );
        assert_eq!(parse_script_line("snapshot"), Ok(Some(ScriptLine::Snapshot)));
    }
}
