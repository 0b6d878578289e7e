//! The player record
//!
//! There is exactly one player. It lives outside the ECS world as a plain
//! record on the game, re-created from base values on every restart.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ecs::{Facing, Health, Position};
use crate::items::{Item, ItemKind};
use crate::progression::{ready_to_level, LEVEL_UP_GRANT};

/// Base stats of a fresh character
pub const BASE_HEALTH: i32 = 100;
pub const BASE_ATTACK: i32 = 15;
pub const BASE_DEFENSE: i32 = 5;
pub const BASE_VIEW_RANGE: i32 = 8;

/// Copies of one item type consumed by the super status upgrade
pub const UPGRADE_COPIES: u32 = 3;

/// Accumulated item modifiers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Modifiers {
    pub damage_multiplier: f64,
    /// Tracked and published, but no formula reads it
    pub hp_multiplier: f64,
    /// Chance for an incoming hit to miss; may exceed 1.0
    pub miss_chance: f64,
    pub projectile_size: f64,
    /// Manhattan radius of the ultimate
    pub view_range: i32,
    /// Turns until the ultimate is ready again
    pub ultimate_cooldown: u32,
    /// Cancels the next lethal hit
    pub super_status: bool,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.0,
            hp_multiplier: 1.0,
            miss_chance: 0.0,
            projectile_size: 1.0,
            view_range: BASE_VIEW_RANGE,
            ultimate_cooldown: 0,
            super_status: false,
        }
    }
}

/// Result of applying damage to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Survived,
    /// The hit was lethal but super status cancelled it
    Saved,
    Killed,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub pos: Position,
    pub facing: Facing,
    pub health: Health,
    pub level: u32,
    pub xp: u32,
    pub attack: i32,
    pub defense: i32,
    pub modifiers: Modifiers,
    /// Items in pickup order
    pub inventory: Vec<Item>,
    /// Owned copies per item type
    pub item_counts: BTreeMap<ItemKind, u32>,
    /// The three-copy upgrade has been spent this life
    pub upgrade_used: bool,
}

impl Player {
    /// A fresh level 1 character
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            facing: Facing::Down,
            health: Health::new(BASE_HEALTH),
            level: 1,
            xp: 0,
            attack: BASE_ATTACK,
            defense: BASE_DEFENSE,
            modifiers: Modifiers::default(),
            inventory: Vec::new(),
            item_counts: BTreeMap::new(),
            upgrade_used: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Apply damage, letting super status cancel a lethal blow once
    pub fn take_hit(&mut self, damage: i32) -> HitOutcome {
        self.health.take_damage(damage);
        if !self.health.is_dead() {
            return HitOutcome::Survived;
        }
        if self.modifiers.super_status {
            self.modifiers.super_status = false;
            self.health.restore_full();
            HitOutcome::Saved
        } else {
            HitOutcome::Killed
        }
    }

    pub fn gain_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    /// Promote one level if the current threshold is crossed
    pub fn try_level_up(&mut self) -> bool {
        if !ready_to_level(self.level, self.xp) {
            return false;
        }
        self.level += 1;
        self.health.max += LEVEL_UP_GRANT.max_health;
        self.health.restore_full();
        self.attack += LEVEL_UP_GRANT.attack;
        self.defense += LEVEL_UP_GRANT.defense;
        true
    }

    /// Add a picked-up item to the inventory and bump its count
    pub fn add_item(&mut self, item: Item) {
        *self.item_counts.entry(item.kind).or_insert(0) += 1;
        self.inventory.push(item);
    }

    pub fn count_of(&self, kind: ItemKind) -> u32 {
        self.item_counts.get(&kind).copied().unwrap_or(0)
    }

    /// Whether the super status upgrade is available for `kind`
    pub fn can_upgrade(&self, kind: ItemKind) -> bool {
        !self.upgrade_used && !self.modifiers.super_status && self.count_of(kind) >= UPGRADE_COPIES
    }

    /// Consume three copies of `kind` for super status, double damage and a full heal
    ///
    /// Returns false when the upgrade is not available.
    pub fn upgrade(&mut self, kind: ItemKind) -> bool {
        if !self.can_upgrade(kind) {
            return false;
        }

        let mut removed = 0;
        self.inventory.retain(|item| {
            if item.kind == kind && removed < UPGRADE_COPIES {
                removed += 1;
                false
            } else {
                true
            }
        });
        if let Some(count) = self.item_counts.get_mut(&kind) {
            *count -= UPGRADE_COPIES;
            if *count == 0 {
                self.item_counts.remove(&kind);
            }
        }

        self.modifiers.super_status = true;
        self.modifiers.damage_multiplier *= 2.0;
        self.health.restore_full();
        self.upgrade_used = true;
        true
    }

    /// Move one step and face the direction of travel
    pub fn step_to(&mut self, pos: Position) {
        self.facing = Facing::from_delta(pos.x - self.pos.x, pos.y - self.pos.y);
        self.pos = pos;
    }
}
