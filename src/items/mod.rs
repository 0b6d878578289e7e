//! Item system

pub mod item;
pub mod effects;
pub mod loot;

pub use item::{GroundItem, Item, ItemDef, ItemId, ItemKind, Rarity, UnknownItemTag, ITEM_DEFS};
pub use effects::{apply_stat_effect, find_teleport_destination, ItemEffect, TELEPORT_ATTEMPTS};
pub use loot::{generate_item, random_kind, roll_rarity};
