//! Damage calculation
//!
//! Pure combat math for melee exchanges. Applying the results to the world
//! is left to the game loop.

use rand::Rng;

/// Roll a probability that may fall outside `[0, 1]`
///
/// Values at or above 1.0 always succeed, values at or below 0.0 never do.
pub fn chance(rng: &mut impl Rng, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}

/// Flat damage: attack minus defense, never below 1
pub fn base_damage(attack: i32, defense: i32) -> i32 {
    (attack - defense).max(1)
}

/// Player damage after the accumulated damage multiplier, floored
pub fn player_damage(attack: i32, defense: i32, damage_multiplier: f64) -> i32 {
    scale_damage(base_damage(attack, defense), damage_multiplier)
}

/// Apply a damage multiplier to a raw value and floor it
pub fn scale_damage(damage: i32, damage_multiplier: f64) -> i32 {
    (damage as f64 * damage_multiplier).floor() as i32
}

/// Damage of a projectile fired by an enemy
pub fn enemy_projectile_damage(attack: i32) -> i32 {
    (attack as f64 * 0.5).floor() as i32
}

/// Result of an enemy's retaliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackResult {
    /// The player's miss chance nullified the blow
    Missed,
    Hit { damage: i32 },
}

impl AttackResult {
    pub fn missed() -> Self {
        AttackResult::Missed
    }
}

/// Resolve an enemy's melee retaliation against the player
///
/// The miss roll happens before any damage is applied.
pub fn enemy_retaliation(
    enemy_attack: i32,
    player_defense: i32,
    miss_chance: f64,
    rng: &mut impl Rng,
) -> AttackResult {
    let damage = base_damage(enemy_attack, player_defense);
    if miss_chance > 0.0 && chance(rng, miss_chance) {
        return AttackResult::missed();
    }
    AttackResult::Hit { damage }
}
