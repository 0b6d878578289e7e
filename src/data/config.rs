//! Engine configuration
//!
//! Grid sizes, viewport, message capacity and the RNG seed, loaded from a
//! RON file with fallback to defaults.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::generation::boss::LAIR;
use crate::world::GridSize;

/// Smallest normal grid that still fits a room and a corridor
const MIN_MAP_SIDE: i32 = 16;

/// Errors that can occur when loading an engine config
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },

    /// Values parsed but cannot run a game.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed seed; entropy when absent
    pub seed: Option<u64>,
    pub map_width: i32,
    pub map_height: i32,
    pub boss_map_width: i32,
    pub boss_map_height: i32,
    pub viewport_width: i32,
    pub viewport_height: i32,
    /// Messages retained in the log
    pub message_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            map_width: 40,
            map_height: 30,
            boss_map_width: 80,
            boss_map_height: 60,
            viewport_width: 40,
            viewport_height: 30,
            message_capacity: 10,
        }
    }
}

impl EngineConfig {
    /// Default config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Load and validate a RON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: EngineConfig = ron::from_str(&content).map_err(|e| ConfigError::Parse {
            path: display,
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{}. Using default config.", e);
            Self::default()
        })
    }

    /// Reject sizes the generators cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width < MIN_MAP_SIDE || self.map_height < MIN_MAP_SIDE {
            return Err(ConfigError::Invalid(format!(
                "map must be at least {}x{}, got {}x{}",
                MIN_MAP_SIDE, MIN_MAP_SIDE, self.map_width, self.map_height
            )));
        }

        let (lair_w, lair_h) = (LAIR.x + LAIR.width + 2, LAIR.y + LAIR.height + 2);
        if self.boss_map_width < lair_w || self.boss_map_height < lair_h {
            return Err(ConfigError::Invalid(format!(
                "boss map must be at least {}x{}, got {}x{}",
                lair_w, lair_h, self.boss_map_width, self.boss_map_height
            )));
        }

        if self.viewport_width <= 0 || self.viewport_height <= 0 {
            return Err(ConfigError::Invalid("viewport must not be empty".to_string()));
        }
        if self.message_capacity == 0 {
            return Err(ConfigError::Invalid("message capacity must be positive".to_string()));
        }
        Ok(())
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize {
            normal: (self.map_width, self.map_height),
            boss: (self.boss_map_width, self.boss_map_height),
        }
    }

    /// Build the game RNG from the configured seed
    pub fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
