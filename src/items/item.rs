//! Item definitions
//!
//! The full item catalog lives in one static table, indexed by [`ItemKind`].
//! Each entry carries the item's tag, display name, pickup effect, pickup
//! message and the damage of the projectile it fires when it is ranged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ecs::Position;
use super::effects::ItemEffect;

/// Unique identifier for items
pub type ItemId = u64;

/// Item rarity tiers (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Get rarity name
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Every item type in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    HealthPotion,
    Sword,
    Shield,
    Scroll,
    MagicSword,
    DragonArmor,
    HealingScroll,
    StrengthPotion,
    DefensePotion,
    SpeedPotion,
    FireScroll,
    IceScroll,
    LightningScroll,
    PoisonDagger,
    LifeStealSword,
    TeleportScroll,
    InvisibilityPotion,
    RegenerationPotion,
    BerserkerPotion,
    DivineShield,
    VampireBlade,
    FrostSword,
    ThunderHammer,
    ShadowCloak,
    PhoenixFeather,
    FireballSpell,
    IceSpell,
    LightningSpell,
    PoisonSpell,
    DeathSpell,
    WoodenBow,
    IronBow,
    MagicBow,
    DragonBow,
    LegendaryBow,
    IronDagger,
    PoisonDaggerThrown,
    Excalibur,
    StormHammer,
    VoidBlade,
    ThunderStaff,
    FrostStaff,
    FireStaff,
    DragonScaleArmor,
    PhoenixArmor,
    VoidArmor,
    TitanArmor,
    CelestialArmor,
    DamageRing,
    PowerRing,
    GiantStaff,
    MegaBow,
    DeathBlade,
    MissChanceArmor,
    DodgeArmor,
    EvasionArmor,
    PhantomArmor,
    ShadowArmor,
    ViewRing,
    EagleEye,
    Telescope,
    CrystalBall,
    UltScroll,
    GodSword,
    ChaosBlade,
    InfinityStaff,
    CosmicBow,
    VoidHammer,
    CelestialArmorPlus,
    DragonGodArmor,
    PhoenixLegendArmor,
    VoidMasterArmor,
    TitanGodArmor,
    PowerRingPlus,
    DamageRingPlus,
    GiantStaffPlus,
    MegaBowPlus,
    DeathBladePlus,
    MissChanceArmorPlus,
    DodgeArmorPlus,
    EvasionArmorPlus,
    PhantomArmorPlus,
    ShadowArmorPlus,
}

/// Catalog entry for one item type
#[derive(Debug, Clone, Copy)]
pub struct ItemDef {
    pub kind: ItemKind,
    pub tag: &'static str,
    pub name: &'static str,
    pub effect: ItemEffect,
    /// Pickup message; ranged items without one announce themselves by name
    pub message: Option<&'static str>,
    /// Damage of the projectile this item fires
    pub projectile_damage: i32,
}

/// Projectile damage for items without a specific value
const DEFAULT_PROJECTILE_DAMAGE: i32 = 10;

const fn item(
    kind: ItemKind,
    tag: &'static str,
    name: &'static str,
    effect: ItemEffect,
    message: &'static str,
) -> ItemDef {
    ItemDef {
        kind,
        tag,
        name,
        effect,
        message: Some(message),
        projectile_damage: DEFAULT_PROJECTILE_DAMAGE,
    }
}

const fn ranged(kind: ItemKind, tag: &'static str, name: &'static str, damage: i32) -> ItemDef {
    ItemDef {
        kind,
        tag,
        name,
        effect: ItemEffect::NONE,
        message: None,
        projectile_damage: damage,
    }
}

const fn with_damage(def: ItemDef, damage: i32) -> ItemDef {
    ItemDef { projectile_damage: damage, ..def }
}

const NONE: ItemEffect = ItemEffect::NONE;

const fn atk(attack: i32) -> ItemEffect {
    ItemEffect { attack, ..NONE }
}

const fn def(defense: i32) -> ItemEffect {
    ItemEffect { defense, ..NONE }
}

const fn atk_mult(attack: i32, damage_mult: f64) -> ItemEffect {
    ItemEffect { attack, damage_mult, ..NONE }
}

const fn atk_scale(attack: i32, projectile_scale: f64) -> ItemEffect {
    ItemEffect { attack, projectile_scale, ..NONE }
}

const fn heavy_armor(defense: i32, max_health: i32) -> ItemEffect {
    ItemEffect { defense, max_health, hp_mult: 1.15, ..NONE }
}

const fn evasive_armor(defense: i32, max_health: i32, miss_chance: f64) -> ItemEffect {
    ItemEffect { defense, max_health, miss_chance, ..NONE }
}

const fn view(view_range: i32) -> ItemEffect {
    ItemEffect { view_range, ..NONE }
}

use ItemKind as K;

/// The item catalog, in [`ItemKind`] declaration order
pub static ITEM_DEFS: [ItemDef; 83] = [
    item(K::HealthPotion, "health_potion", "Health Potion", ItemEffect { heal: 100, ..NONE }, "You feel refreshed!"),
    item(K::Sword, "sword", "Iron Sword", atk(15), "Your attack power increased!"),
    item(K::Shield, "shield", "Wooden Shield", def(10), "Your defense increased!"),
    item(K::Scroll, "scroll", "Magic Scroll", ItemEffect { attack: 8, defense: 5, ..NONE }, "You read the scroll and feel empowered!"),
    item(K::MagicSword, "magic_sword", "Magic Sword", atk(20), "The magic sword enhances your attack!"),
    item(K::DragonArmor, "dragon_armor", "Dragon Armor", ItemEffect { defense: 15, max_health: 50, ..NONE }, "Dragon armor protects you!"),
    item(K::HealingScroll, "healing_scroll", "Healing Scroll", ItemEffect { full_heal: true, ..NONE }, "You are fully healed!"),
    item(K::StrengthPotion, "strength_potion", "Strength Potion", atk(25), "You feel much stronger!"),
    item(K::DefensePotion, "defense_potion", "Defense Potion", def(20), "Your skin feels tougher!"),
    item(K::SpeedPotion, "speed_potion", "Speed Potion", NONE, "You feel faster!"),
    item(K::FireScroll, "fire_scroll", "Fire Scroll", atk(30), "Fire magic courses through you!"),
    item(K::IceScroll, "ice_scroll", "Ice Scroll", def(25), "Ice magic protects you!"),
    item(K::LightningScroll, "lightning_scroll", "Lightning Scroll", atk(35), "Lightning enhances your speed!"),
    item(K::PoisonDagger, "poison_dagger", "Poison Dagger", atk(15), "The poison dagger is deadly!"),
    item(K::LifeStealSword, "life_steal_sword", "Life Steal Sword", ItemEffect { attack: 20, heal: 40, ..NONE }, "The sword steals life from enemies!"),
    item(K::TeleportScroll, "teleport_scroll", "Teleport Scroll", ItemEffect { teleport: true, ..NONE }, "You teleport to a random location!"),
    item(K::InvisibilityPotion, "invisibility_potion", "Invisibility Potion", NONE, "You become invisible!"),
    item(K::RegenerationPotion, "regeneration_potion", "Regeneration Potion", ItemEffect { heal: 200, ..NONE }, "Your wounds heal rapidly!"),
    item(K::BerserkerPotion, "berserker_potion", "Berserker Potion", ItemEffect { attack: 40, defense: -10, ..NONE }, "You enter a berserker rage!"),
    item(K::DivineShield, "divine_shield", "Divine Shield", ItemEffect { defense: 30, max_health: 100, ..NONE }, "Divine protection surrounds you!"),
    item(K::VampireBlade, "vampire_blade", "Vampire Blade", ItemEffect { attack: 25, heal: 60, ..NONE }, "The vampire blade drains life!"),
    item(K::FrostSword, "frost_sword", "Frost Sword", ItemEffect { attack: 20, defense: 15, ..NONE }, "The frost sword freezes your enemies!"),
    item(K::ThunderHammer, "thunder_hammer", "Thunder Hammer", atk(35), "The thunder hammer is devastating!"),
    item(K::ShadowCloak, "shadow_cloak", "Shadow Cloak", def(25), "The shadow cloak conceals you!"),
    item(
        K::PhoenixFeather,
        "phoenix_feather",
        "Phoenix Feather",
        ItemEffect { attack: 40, defense: 25, max_health: 200, full_heal: true, ..NONE },
        "The phoenix feather grants immortality!",
    ),
    // Ranged
    ranged(K::FireballSpell, "fireball_spell", "Fireball Spell", 25),
    ranged(K::IceSpell, "ice_spell", "Ice Spell", 20),
    ranged(K::LightningSpell, "lightning_spell", "Lightning Spell", 30),
    ranged(K::PoisonSpell, "poison_spell", "Poison Spell", 15),
    ranged(K::DeathSpell, "death_spell", "Death Spell", 50),
    ranged(K::WoodenBow, "wooden_bow", "Wooden Bow", 15),
    ranged(K::IronBow, "iron_bow", "Iron Bow", 20),
    ranged(K::MagicBow, "magic_bow", "Magic Bow", 25),
    ranged(K::DragonBow, "dragon_bow", "Dragon Bow", 35),
    ranged(K::LegendaryBow, "legendary_bow", "Legendary Bow", 45),
    ranged(K::IronDagger, "iron_dagger", "Iron Dagger", 10),
    ranged(K::PoisonDaggerThrown, "poison_dagger_thrown", "Poison Dagger (Thrown)", 12),
    // Legendary weapons and armor
    with_damage(item(K::Excalibur, "excalibur", "Excalibur", atk_mult(100, 1.5), "Excalibur grants legendary power! Damage multiplied!"), 80),
    with_damage(item(K::StormHammer, "storm_hammer", "Storm Hammer", atk_mult(80, 1.3), "Storm Hammer channels lightning power!"), 70),
    with_damage(item(K::VoidBlade, "void_blade", "Void Blade", atk_mult(90, 1.4), "Void Blade cuts through reality!"), 75),
    with_damage(item(K::ThunderStaff, "thunder_staff", "Thunder Staff", atk_scale(60, 1.1), "Thunder Staff amplifies your projectiles!"), 60),
    with_damage(item(K::FrostStaff, "frost_staff", "Frost Staff", atk_scale(50, 1.1), "Frost Staff creates massive ice projectiles!"), 55),
    with_damage(item(K::FireStaff, "fire_staff", "Fire Staff", atk_scale(70, 1.1), "Fire Staff creates massive fireballs!"), 65),
    item(K::DragonScaleArmor, "dragon_scale_armor", "Dragon Scale Armor", heavy_armor(40, 200), "Dragon Scale Armor provides legendary protection!"),
    item(K::PhoenixArmor, "phoenix_armor", "Phoenix Armor", heavy_armor(35, 150), "Phoenix Armor grants fiery protection!"),
    item(K::VoidArmor, "void_armor", "Void Armor", heavy_armor(45, 250), "Void Armor absorbs damage from the void!"),
    item(K::TitanArmor, "titan_armor", "Titan Armor", heavy_armor(50, 300), "Titan Armor makes you nearly invincible!"),
    item(K::CelestialArmor, "celestial_armor", "Celestial Armor", heavy_armor(60, 400), "Celestial Armor grants divine protection!"),
    item(K::DamageRing, "damage_ring", "Ring of Power", atk_mult(40, 1.1), "Ring of Power increases your damage by 10%!"),
    item(K::PowerRing, "power_ring", "Ring of Might", atk_mult(50, 1.15), "Ring of Might increases your damage by 15%!"),
    with_damage(item(K::GiantStaff, "giant_staff", "Giant Staff", atk_scale(60, 1.2), "Giant Staff creates massive projectiles!"), 90),
    with_damage(item(K::MegaBow, "mega_bow", "Mega Bow", atk_scale(70, 1.2), "Mega Bow fires giant arrows!"), 85),
    with_damage(item(K::DeathBlade, "death_blade", "Blade of Death", atk_mult(120, 2.0), "Blade of Death multiplies your damage!"), 100),
    item(K::MissChanceArmor, "miss_chance_armor", "Evasion Armor", evasive_armor(30, 100, 0.2), "Evasion Armor gives 20% chance to dodge attacks!"),
    item(K::DodgeArmor, "dodge_armor", "Dodge Armor", evasive_armor(25, 80, 0.15), "Dodge Armor gives 15% chance to dodge attacks!"),
    item(K::EvasionArmor, "evasion_armor", "Evasion Armor", evasive_armor(35, 120, 0.25), "Evasion Armor gives 25% chance to dodge attacks!"),
    item(K::PhantomArmor, "phantom_armor", "Phantom Armor", evasive_armor(40, 150, 0.3), "Phantom Armor gives 30% chance to dodge attacks!"),
    item(K::ShadowArmor, "shadow_armor", "Shadow Armor", evasive_armor(45, 180, 0.35), "Shadow Armor gives 35% chance to dodge attacks!"),
    item(K::ViewRing, "view_ring", "Ring of Vision", view(2), "Ring of Vision increases your view range!"),
    item(K::EagleEye, "eagle_eye", "Eagle Eye", view(3), "Eagle Eye grants exceptional vision!"),
    item(K::Telescope, "telescope", "Telescope", view(4), "Telescope reveals distant enemies!"),
    item(K::CrystalBall, "crystal_ball", "Crystal Ball", view(5), "Crystal Ball shows all secrets!"),
    item(K::UltScroll, "ult_scroll", "Ultimate Scroll", ItemEffect { reset_ultimate: true, ..NONE }, "Ultimate Scroll ready! Press U to unleash destruction!"),
    // Mythic tier
    item(K::GodSword, "god_sword", "Sword of the Gods", atk_mult(100, 1.5), "Sword of the Gods grants divine power!"),
    item(K::ChaosBlade, "chaos_blade", "Blade of Chaos", atk_mult(120, 1.8), "Blade of Chaos channels pure destruction!"),
    item(K::InfinityStaff, "infinity_staff", "Staff of Infinity", ItemEffect { attack: 80, projectile_add: 2.0, ..NONE }, "Staff of Infinity amplifies your magic!"),
    item(K::CosmicBow, "cosmic_bow", "Cosmic Bow", ItemEffect { attack: 90, view_range: 4, ..NONE }, "Cosmic Bow grants cosmic vision!"),
    item(K::VoidHammer, "void_hammer", "Hammer of the Void", atk_mult(150, 2.0), "Hammer of the Void crushes all resistance!"),
    item(K::CelestialArmorPlus, "celestial_armor_plus", "Celestial Armor+", evasive_armor(80, 300, 0.4), "Celestial Armor+ grants divine protection!"),
    item(K::DragonGodArmor, "dragon_god_armor", "Dragon God Armor", evasive_armor(100, 400, 0.45), "Dragon God Armor makes you invincible!"),
    item(K::PhoenixLegendArmor, "phoenix_legend_armor", "Phoenix Legend Armor", evasive_armor(90, 350, 0.42), "Phoenix Legend Armor grants rebirth!"),
    item(K::VoidMasterArmor, "void_master_armor", "Void Master Armor", evasive_armor(110, 450, 0.5), "Void Master Armor transcends reality!"),
    item(K::TitanGodArmor, "titan_god_armor", "Titan God Armor", evasive_armor(120, 500, 0.55), "Titan God Armor makes you a god!"),
    item(K::PowerRingPlus, "power_ring_plus", "Ring of Power+", atk_mult(60, 1.3), "Ring of Power+ amplifies your strength!"),
    item(K::DamageRingPlus, "damage_ring_plus", "Ring of Might+", atk_mult(70, 1.4), "Ring of Might+ grants supreme power!"),
    item(K::GiantStaffPlus, "giant_staff_plus", "Giant Staff+", ItemEffect { attack: 50, projectile_add: 3.0, ..NONE }, "Giant Staff+ creates massive projectiles!"),
    item(K::MegaBowPlus, "mega_bow_plus", "Mega Bow+", ItemEffect { attack: 80, view_range: 6, ..NONE }, "Mega Bow+ grants ultimate vision!"),
    item(K::DeathBladePlus, "death_blade_plus", "Blade of Death+", atk_mult(130, 1.9), "Blade of Death+ brings instant death!"),
    item(K::MissChanceArmorPlus, "miss_chance_armor_plus", "Evasion Armor+", evasive_armor(60, 250, 0.45), "Evasion Armor+ makes you untouchable!"),
    item(K::DodgeArmorPlus, "dodge_armor_plus", "Dodge Armor+", evasive_armor(70, 300, 0.5), "Dodge Armor+ grants perfect evasion!"),
    item(K::EvasionArmorPlus, "evasion_armor_plus", "Evasion Armor+", evasive_armor(80, 350, 0.55), "Evasion Armor+ transcends dodging!"),
    item(K::PhantomArmorPlus, "phantom_armor_plus", "Phantom Armor+", evasive_armor(90, 400, 0.6), "Phantom Armor+ makes you intangible!"),
    item(K::ShadowArmorPlus, "shadow_armor_plus", "Shadow Armor+", evasive_armor(100, 450, 0.65), "Shadow Armor+ grants shadow form!"),
];

impl ItemKind {
    /// Catalog entry for this type
    pub fn def(self) -> &'static ItemDef {
        &ITEM_DEFS[self as usize]
    }

    /// All item types in catalog order
    pub fn all() -> impl Iterator<Item = ItemKind> {
        ITEM_DEFS.iter().map(|d| d.kind)
    }

    pub fn tag(self) -> &'static str {
        self.def().tag
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn effect(self) -> &'static ItemEffect {
        &self.def().effect
    }

    pub fn projectile_damage(self) -> i32 {
        self.def().projectile_damage
    }

    /// Spells, bows and thrown daggers fire on their own every few turns
    pub fn auto_fires(self) -> bool {
        let tag = self.tag();
        tag.contains("spell") || tag.contains("bow") || tag.contains("dagger_thrown")
    }

    /// Message queued when the item is picked up
    pub fn pickup_message(self) -> String {
        let def = self.def();
        match def.message {
            Some(text) => text.to_string(),
            None => format!("{} is ready for ranged combat!", def.name),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error for an unrecognised item tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item type '{0}'")]
pub struct UnknownItemTag(pub String);

impl FromStr for ItemKind {
    type Err = UnknownItemTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ITEM_DEFS
            .iter()
            .find(|d| d.tag == s)
            .map(|d| d.kind)
            .ok_or_else(|| UnknownItemTag(s.to_string()))
    }
}

/// A concrete item, either lying in the dungeon or carried by the player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub rarity: Rarity,
}

impl Item {
    pub fn new(id: ItemId, kind: ItemKind, rarity: Rarity) -> Self {
        Self { id, kind, rarity }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// An item lying on a floor cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundItem {
    pub item: Item,
    pub pos: Position,
}
