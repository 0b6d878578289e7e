//! Progression systems

pub mod xp;
pub mod unlocks;
pub mod difficulty;

pub use difficulty::{DepthScaling, is_early_depth};
pub use unlocks::{LightningTick, MetaPowers, TrailCell};
pub use xp::{ready_to_level, xp_threshold, LEVEL_UP_GRANT};
