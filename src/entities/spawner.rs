//! Level population
//!
//! Fills freshly carved terrain with enemies and items. Normal levels spawn
//! per room; the boss lair gets the Necromancer and a field of potions.

use hecs::{Entity, World};
use rand::Rng;

use crate::ecs::Position;
use crate::items::{generate_item, GroundItem, Item, ItemId, ItemKind, Rarity};
use crate::world::generation::boss::{boss_spawn, POTION_MARGIN};
use crate::world::LevelLayout;
use super::bosses::spawn_boss;
use super::enemies::spawn_random_enemy;

/// Health potions scattered through the boss lair
pub const BOSS_POTION_COUNT: usize = 20;
/// Samples tried per potion before that potion is skipped
const POTION_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Everything spawned into a level, in spawn order
#[derive(Debug, Default)]
pub struct Population {
    pub enemies: Vec<Entity>,
    pub items: Vec<GroundItem>,
}

/// Hands out item ids that stay unique for the whole game
#[derive(Debug, Clone, Default)]
pub struct ItemIdAllocator {
    next: ItemId,
}

impl ItemIdAllocator {
    pub fn next_id(&mut self) -> ItemId {
        self.next += 1;
        self.next
    }
}

/// Spawn the enemies and items for a carved level
pub fn populate_level(
    world: &mut World,
    layout: &LevelLayout,
    rng: &mut impl Rng,
    ids: &mut ItemIdAllocator,
) -> Population {
    if layout.is_boss {
        populate_lair(world, layout, rng, ids)
    } else {
        populate_rooms(world, layout, rng, ids)
    }
}

fn populate_rooms(
    world: &mut World,
    layout: &LevelLayout,
    rng: &mut impl Rng,
    ids: &mut ItemIdAllocator,
) -> Population {
    let depth = layout.map.level;
    let spread = 2 + depth;
    let mut population = Population::default();

    // The starting room stays clear of enemies
    for room in layout.rooms.iter().skip(1) {
        let count = 1 + rng.gen_range(0..spread);
        for _ in 0..count {
            let pos = room.random_interior(rng);
            if let Some(entity) = spawn_random_enemy(world, depth, pos, rng) {
                population.enemies.push(entity);
            }
        }
    }

    for room in &layout.rooms {
        let count = rng.gen_range(0..spread);
        for _ in 0..count {
            let pos = room.random_interior(rng);
            let item = generate_item(ids.next_id(), rng);
            population.items.push(GroundItem { item, pos });
        }
    }

    population
}

fn populate_lair(
    world: &mut World,
    layout: &LevelLayout,
    rng: &mut impl Rng,
    ids: &mut ItemIdAllocator,
) -> Population {
    let mut population = Population::default();
    let Some(lair) = layout.rooms.first() else {
        return population;
    };

    let boss_pos = boss_spawn(lair);
    population.enemies.push(spawn_boss(world, boss_pos));

    let start = layout.map.start_pos;
    let span_x = (lair.width - 2 * POTION_MARGIN).max(1);
    let span_y = (lair.height - 2 * POTION_MARGIN).max(1);

    for _ in 0..BOSS_POTION_COUNT {
        let mut placed = None;
        for _ in 0..POTION_PLACEMENT_ATTEMPTS {
            let pos = Position::new(
                lair.x + POTION_MARGIN + rng.gen_range(0..span_x),
                lair.y + POTION_MARGIN + rng.gen_range(0..span_y),
            );
            let taken = pos == start
                || pos == boss_pos
                || population.items.iter().any(|g| g.pos == pos);
            if !taken {
                placed = Some(pos);
                break;
            }
        }

        match placed {
            Some(pos) => {
                let item = Item::new(ids.next_id(), ItemKind::HealthPotion, Rarity::Common);
                population.items.push(GroundItem { item, pos });
            }
            None => log::warn!("No free cell left for a lair potion"),
        }
    }

    population
}
