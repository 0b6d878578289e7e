//! Meta-progression unlocks
//!
//! Permanent powers earned by defeating the Necromancer. They survive every
//! restart; only the boss kill count drives them.

use serde::{Deserialize, Serialize};

use crate::ecs::Position;
use crate::game::MessageCategory;

/// Longest a slime trail can linger, in turns
pub const MAX_TRAIL_DURATION: u64 = 10;
/// Base trail duration before boss kills lengthen it
const BASE_TRAIL_DURATION: u64 = 3;
/// Damage dealt to an enemy that steps onto the trail
pub const TRAIL_DAMAGE: i32 = 100;
/// Charges needed for a lightning strike
pub const LIGHTNING_CHARGE: u32 = 100;
/// Manhattan radius of a lightning strike
pub const LIGHTNING_RADIUS: i32 = 5;
/// Charge interval between progress messages
const LIGHTNING_REPORT_INTERVAL: u32 = 20;

/// One slimed tile and the turn it was laid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrailCell {
    pub pos: Position,
    pub turn: u64,
}

/// The player's permanent powers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetaPowers {
    pub slime_trail: bool,
    pub lightning: bool,
    /// Turns a trail cell stays active
    pub trail_duration: u64,
    /// Currently active trail cells, oldest first
    pub trail: Vec<TrailCell>,
    /// Lightning charge counter
    pub lightning_charge: u32,
}

/// Outcome of charging the lightning power by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightningTick {
    /// Lightning is locked or still charging silently
    Idle,
    /// Charge reached a reporting milestone
    Charging(u32),
    /// Charge is full and lightning strikes now
    Strike,
}

impl MetaPowers {
    pub fn new() -> Self {
        Self {
            trail_duration: BASE_TRAIL_DURATION,
            ..Default::default()
        }
    }

    /// Grant the power for the Nth boss kill. Returns the messages to show.
    pub fn grant_for_kill(&mut self, boss_kills: u32) -> Vec<(String, MessageCategory)> {
        let mut messages = Vec::new();
        self.trail_duration = (BASE_TRAIL_DURATION + boss_kills as u64).min(MAX_TRAIL_DURATION);

        if boss_kills >= 1 && !self.slime_trail {
            self.slime_trail = true;
            log::debug!("Unlocked slime trail");
            messages.push((
                "You gain the Slime Trail! Enemies that step on your trail take heavy damage!".to_string(),
                MessageCategory::Success,
            ));
        } else if boss_kills >= 2 && !self.lightning {
            self.lightning = true;
            log::debug!("Unlocked lightning power");
            messages.push((
                "You gain the Lightning Power! Periodic lightning strikes kill nearby enemies!".to_string(),
                MessageCategory::Success,
            ));
        } else {
            messages.push((
                "Your slime trail grows stronger with each victory!".to_string(),
                MessageCategory::Info,
            ));
        }

        messages.insert(
            0,
            (
                format!("Slime trail duration increased to {} turns!", self.trail_duration),
                MessageCategory::Success,
            ),
        );
        messages
    }

    /// Record a tile the player just left behind and drop expired cells
    pub fn lay_trail(&mut self, pos: Position, turn: u64) {
        if !self.slime_trail {
            return;
        }
        self.trail.push(TrailCell { pos, turn });
        let duration = self.trail_duration;
        self.trail.retain(|cell| turn.saturating_sub(cell.turn) <= duration);
    }

    /// Whether a cell is currently slimed
    pub fn is_slimed(&self, pos: Position) -> bool {
        self.slime_trail && self.trail.iter().any(|cell| cell.pos == pos)
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Advance the lightning charge by one step
    pub fn charge_lightning(&mut self) -> LightningTick {
        if !self.lightning {
            return LightningTick::Idle;
        }

        self.lightning_charge += 1;
        if self.lightning_charge >= LIGHTNING_CHARGE {
            self.lightning_charge = 0;
            return LightningTick::Strike;
        }

        if self.lightning_charge % LIGHTNING_REPORT_INTERVAL == 0 {
            LightningTick::Charging(self.lightning_charge)
        } else {
            LightningTick::Idle
        }
    }
}
