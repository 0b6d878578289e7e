//! Loot generation
//!
//! Ground items draw their type uniformly from the catalog and their rarity
//! from a short chain of independent rolls.

use rand::Rng;

use super::item::{Item, ItemId, ItemKind, Rarity, ITEM_DEFS};

/// Roll a rarity tier
///
/// Each tier gets its own roll, so the odds are 5% legendary, then 10% of the
/// remainder epic, then 30% of what is left rare.
pub fn roll_rarity(rng: &mut impl Rng) -> Rarity {
    if rng.gen::<f64>() < 0.05 {
        Rarity::Legendary
    } else if rng.gen::<f64>() < 0.1 {
        Rarity::Epic
    } else if rng.gen::<f64>() < 0.3 {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

/// Pick an item type uniformly from the whole catalog
pub fn random_kind(rng: &mut impl Rng) -> ItemKind {
    ITEM_DEFS[rng.gen_range(0..ITEM_DEFS.len())].kind
}

/// Generate a random ground item
pub fn generate_item(id: ItemId, rng: &mut impl Rng) -> Item {
    let kind = random_kind(rng);
    let rarity = roll_rarity(rng);
    Item::new(id, kind, rarity)
}
