//! Item effects
//!
//! Every item applies a fixed effect the moment it is picked up. Effects
//! stack: flat stats add, multipliers compound, and nothing is ever
//! recomputed from scratch except on respawn, where kept items are replayed.

use rand::Rng;

use crate::ecs::Position;
use crate::entities::Player;
use crate::world::Map;

/// Upper bound on random cells tried by a teleport before giving up
pub const TELEPORT_ATTEMPTS: u32 = 100;

/// Largest projectile size multiplier
pub const MAX_PROJECTILE_SIZE: f64 = 3.0;

/// Declarative description of what an item does on pickup
///
/// Application order: flat stats, max health (with a matching heal), heal,
/// full heal, then the multiplicative modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemEffect {
    pub attack: i32,
    pub defense: i32,
    /// Added to max health, then healed by the same amount
    pub max_health: i32,
    pub heal: i32,
    pub full_heal: bool,
    /// Compounds into the damage multiplier (1.0 = none)
    pub damage_mult: f64,
    /// Compounds into the HP multiplier (1.0 = none)
    pub hp_mult: f64,
    /// Compounds into the projectile size (1.0 = none)
    pub projectile_scale: f64,
    /// Added to the projectile size
    pub projectile_add: f64,
    pub miss_chance: f64,
    pub view_range: i32,
    /// Makes the ultimate ready immediately
    pub reset_ultimate: bool,
    /// Relocates the player to a random free cell
    pub teleport: bool,
}

impl ItemEffect {
    /// An effect that changes nothing
    pub const NONE: ItemEffect = ItemEffect {
        attack: 0,
        defense: 0,
        max_health: 0,
        heal: 0,
        full_heal: false,
        damage_mult: 1.0,
        hp_mult: 1.0,
        projectile_scale: 1.0,
        projectile_add: 0.0,
        miss_chance: 0.0,
        view_range: 0,
        reset_ultimate: false,
        teleport: false,
    };
}

/// Apply everything but the teleport to the player
pub fn apply_stat_effect(player: &mut Player, effect: &ItemEffect) {
    player.attack += effect.attack;
    player.defense += effect.defense;

    if effect.max_health != 0 {
        player.health.max += effect.max_health;
        player.health.heal(effect.max_health);
    }
    if effect.heal > 0 {
        player.health.heal(effect.heal);
    }
    if effect.full_heal {
        player.health.restore_full();
    }

    let mods = &mut player.modifiers;
    mods.damage_multiplier *= effect.damage_mult;
    mods.hp_multiplier *= effect.hp_mult;
    if effect.projectile_scale != 1.0 || effect.projectile_add != 0.0 {
        let size = mods.projectile_size * effect.projectile_scale + effect.projectile_add;
        mods.projectile_size = size.min(MAX_PROJECTILE_SIZE);
    }
    mods.miss_chance += effect.miss_chance;
    mods.view_range += effect.view_range;
    if effect.reset_ultimate {
        mods.ultimate_cooldown = 0;
    }
}

/// Pick a random floor cell for a teleport
///
/// Samples uniformly over the whole grid and accepts the first walkable cell
/// that is not the door and not `blocked`. Returns `None` once
/// [`TELEPORT_ATTEMPTS`] samples have all failed.
pub fn find_teleport_destination(
    map: &Map,
    rng: &mut impl Rng,
    blocked: impl Fn(Position) -> bool,
) -> Option<Position> {
    for _ in 0..TELEPORT_ATTEMPTS {
        let pos = Position::new(rng.gen_range(0..map.width), rng.gen_range(0..map.height));
        if map.is_walkable(pos.x, pos.y) && map.door_pos != Some(pos) && !blocked(pos) {
            return Some(pos);
        }
    }
    None
}
