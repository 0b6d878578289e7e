//! Data loading and external configuration
//!
//! Engine settings come from an optional RON file; all game content is
//! compiled in.

pub mod config;

pub use config::{ConfigError, EngineConfig};
