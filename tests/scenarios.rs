//! Scenario tests for the turn pipeline.
//!
//! Each test builds a small hand-carved arena, places enemies and items
//! through the embedding hooks and drives the game with commands only.

use blightdeep::combat::{Projectile, ProjectileOwner};
use blightdeep::entities::EnemyKind;
use blightdeep::game::{Command, CommandOutcome, Game, GameState, MessageCategory};
use blightdeep::items::ItemKind;
use blightdeep::world::TileType;
use blightdeep::{EngineConfig, Map, Position};

fn arena(seed: u64, start: Position) -> Game {
    let mut game = Game::new(EngineConfig::seeded(seed));
    let mut map = Map::from_rows(
        &[
            "############",
            "#..........#",
            "#..........#",
            "#..........#",
            "#..........#",
            "############",
        ],
        1,
    );
    map.start_pos = start;
    game.load_arena(map);
    game
}

/// A walled square wide enough that shots leave their range before any wall
fn open_field(seed: u64, size: usize, start: Position) -> Game {
    let mut game = Game::new(EngineConfig::seeded(seed));
    let wall = "#".repeat(size);
    let inner = format!("#{}#", ".".repeat(size - 2));
    let mut rows = vec![wall.as_str()];
    rows.extend(std::iter::repeat(inner.as_str()).take(size - 2));
    rows.push(wall.as_str());
    let mut map = Map::from_rows(&rows, 1);
    map.start_pos = start;
    game.load_arena(map);
    game
}

fn demon_shot_at(game: &mut Game) {
    let pos = game.player().pos;
    game.launch_projectile(Projectile::enemy_shot(pos.offset(1, 0), (-1, 0), 10, "demon"));
}

fn enemy_health(game: &Game, index: usize) -> i32 {
    game.snapshot().enemies[index].health
}

// =============================================================================
// Melee
// =============================================================================

#[test]
fn goblin_exchange_uses_attack_minus_defense() {
    let mut game = arena(1, Position::new(2, 2));
    game.spawn_enemy_at(EnemyKind::Goblin, 1, Position::new(3, 2));
    assert_eq!(enemy_health(&game, 0), 45);

    assert_eq!(game.apply(Command::RIGHT), CommandOutcome::TurnAdvanced);

    // 15 attack against 4 defense, then 12 attack against 5 defense
    assert_eq!(enemy_health(&game, 0), 34);
    assert_eq!(game.player().health.current, 93);
    assert_eq!(game.player().pos, Position::new(2, 2));
    assert_eq!(game.stats().total_damage, 11);
    assert!(game.has_message("You hit the goblin level 1 for 11 damage!"));
    assert!(game.has_message("The goblin level 1 hits you for 7 damage!"));
    assert_eq!(game.turn(), 1);
}

#[test]
fn killing_blow_grants_xp_without_retaliation() {
    let mut game = arena(2, Position::new(2, 2));
    game.spawn_enemy_at(EnemyKind::Goblin, 1, Position::new(3, 2));
    game.player_mut().attack = 100;

    game.apply(Command::RIGHT);

    assert!(game.enemies().is_empty());
    assert_eq!(game.player().xp, 20);
    assert_eq!(game.player().health.current, 100);
    assert_eq!(game.stats().enemies_killed, 1);
    assert!(game.has_message("You defeated the goblin level 1! Gained 20 XP."));
}

#[test]
fn full_miss_chance_blocks_retaliation() {
    let mut game = arena(3, Position::new(2, 2));
    game.spawn_enemy_at(EnemyKind::Goblin, 1, Position::new(3, 2));
    game.player_mut().modifiers.miss_chance = 1.0;

    game.apply(Command::RIGHT);

    assert_eq!(game.player().health.current, 100);
    assert!(game.has_message("The goblin level 1 missed you!"));
}

#[test]
fn xp_threshold_triggers_level_up() {
    let mut game = arena(4, Position::new(2, 2));
    game.player_mut().xp = 50;

    game.apply(Command::Wait);

    let player = game.player();
    assert_eq!(player.level, 2);
    assert_eq!(player.health.current, 120);
    assert_eq!(player.health.max, 120);
    assert_eq!(player.attack, 18);
    assert_eq!(player.defense, 7);
    assert!(game.has_message("Level up! You are now level 2!"));
}

// =============================================================================
// Death, super status and restarts
// =============================================================================

#[test]
fn lethal_retaliation_ends_the_run() {
    let mut game = arena(5, Position::new(2, 2));
    game.spawn_enemy_at(EnemyKind::Goblin, 1, Position::new(3, 2));
    game.player_mut().health.current = 1;

    assert_eq!(game.apply(Command::RIGHT), CommandOutcome::TurnAdvanced);
    assert_eq!(game.state(), GameState::Dead);
    assert!(game.snapshot().game_over);
    assert!(game.has_message("You have been defeated!"));

    let turn = game.turn();
    assert_eq!(game.apply(Command::Wait), CommandOutcome::Ignored);
    assert_eq!(game.apply(Command::LEFT), CommandOutcome::Ignored);
    assert_eq!(game.turn(), turn);

    assert_eq!(game.apply(Command::Restart), CommandOutcome::Applied);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.turn(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.player().health.current, 100);
}

#[test]
fn super_status_cancels_a_lethal_hit_once() {
    let mut game = arena(6, Position::new(2, 2));
    game.spawn_enemy_at(EnemyKind::Goblin, 1, Position::new(3, 2));
    game.player_mut().health.current = 1;
    game.player_mut().modifiers.super_status = true;

    game.apply(Command::RIGHT);

    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.player().health.current, 100);
    assert!(!game.player().modifiers.super_status);
    assert!(game.has_message("SUPER STATUS SAVED YOU! You are revived with full health!"));
}

#[test]
fn restart_after_victory_keeps_powers_and_resets_the_player() {
    let mut game = arena(17, Position::new(2, 2));
    game.spawn_enemy_at(EnemyKind::Necromancer, 1, Position::new(3, 2));
    game.player_mut().attack = 10_000;
    game.apply(Command::RIGHT);
    assert_eq!(game.apply(Command::Restart), CommandOutcome::Applied);
    assert!(game.powers().slime_trail);

    // Grow the new life, then lose it
    let mut map = Map::from_rows(&["######", "#....#", "######"], 1);
    map.start_pos = Position::new(2, 1);
    game.load_arena(map);
    {
        let player = game.player_mut();
        player.level = 4;
        player.xp = 30;
        player.attack = 80;
        player.health.current = 5;
    }
    demon_shot_at(&mut game);
    game.apply(Command::Wait);
    assert_eq!(game.state(), GameState::Dead);

    assert_eq!(game.apply(Command::Restart), CommandOutcome::Applied);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.stats().boss_kills, 1);
    assert!(game.powers().slime_trail);
    assert!(!game.powers().lightning);
    let player = game.player();
    assert_eq!(player.level, 1);
    assert_eq!(player.xp, 0);
    assert_eq!(player.attack, 15);
    assert_eq!(player.health.current, 100);
    assert!(player.inventory.is_empty());
}

#[test]
fn restart_carries_half_the_inventory_rounded_up() {
    let mut game = arena(7, Position::new(1, 1));
    for x in 2..9 {
        game.place_item(ItemKind::Sword, Position::new(x, 1));
    }
    for _ in 0..7 {
        game.apply(Command::RIGHT);
    }
    assert_eq!(game.player().inventory.len(), 7);
    assert_eq!(game.stats().items_found, 7);

    game.apply(Command::Restart);

    assert_eq!(game.player().inventory.len(), 4);
    assert_eq!(game.player().count_of(ItemKind::Sword), 4);
    assert_eq!(game.player().attack, 15 + 4 * 15);
    assert_eq!(game.stats().items_found, 4);
    assert!(game.has_message("Respawned with 4 items from your previous life!"));
    assert!(game.has_message("New game started! Good luck!"));
    assert!(!game.has_message("You picked up Iron Sword!"));
}

// =============================================================================
// Items
// =============================================================================

#[test]
fn teleport_without_free_cell_leaves_player_in_place() {
    let mut game = Game::new(EngineConfig::seeded(8));
    // Two floor cells in a huge block of rock: the sampler almost never finds
    // the only legal destination, and the start cell is the door
    let mut map = Map::new(400, 400, 1);
    map.set_tile(1, 1, TileType::Floor);
    map.set_tile(2, 1, TileType::Floor);
    map.start_pos = Position::new(1, 1);
    map.door_pos = Some(Position::new(1, 1));
    game.load_arena(map);
    game.place_item(ItemKind::TeleportScroll, Position::new(2, 1));

    game.apply(Command::RIGHT);

    assert_eq!(game.player().pos, Position::new(2, 1));
    assert!(!game.has_message("You teleport to a random location!"));
    assert!(game.has_message("You picked up Teleport Scroll!"));
    assert_eq!(game.stats().items_found, 1);
}

#[test]
fn upgrade_message_names_the_item_tag() {
    let mut game = arena(9, Position::new(1, 1));
    for x in 2..5 {
        game.place_item(ItemKind::Shield, Position::new(x, 1));
    }
    for _ in 0..3 {
        game.apply(Command::RIGHT);
    }

    assert_eq!(game.apply(Command::Upgrade(ItemKind::Shield)), CommandOutcome::Applied);
    assert!(game.has_message("SUPER STATUS ACTIVATED! shield items combined into ultimate power!"));
    assert!(game.has_message("You are now invincible and deal double damage!"));

    // Only once per life
    assert_eq!(game.apply(Command::Upgrade(ItemKind::Shield)), CommandOutcome::Ignored);
}

#[test]
fn spells_fire_on_every_third_turn() {
    let mut game = arena(10, Position::new(2, 2));
    game.place_item(ItemKind::FireballSpell, Position::new(3, 2));

    game.apply(Command::RIGHT);
    game.apply(Command::Wait);
    assert!(game.projectiles().is_empty());

    game.apply(Command::Wait);
    assert_eq!(game.turn(), 3);
    assert_eq!(game.projectiles().len(), 1);
    let shot = &game.projectiles()[0];
    assert_eq!(shot.owner, ProjectileOwner::Player);
    assert_eq!(shot.damage, 25);
    assert_eq!(shot.name, "Fireball Spell");
}

#[test]
fn player_shots_are_dropped_past_twenty_tiles() {
    let start = Position::new(24, 24);
    let mut game = open_field(18, 50, start);
    game.place_item(ItemKind::FireballSpell, start.offset(1, 0));
    game.apply(Command::RIGHT);

    for _ in 0..90 {
        game.apply(Command::Wait);
        for shot in game.projectiles() {
            assert!((shot.x - shot.origin_x).abs() <= 20.0, "{:?}", shot);
            assert!((shot.y - shot.origin_y).abs() <= 20.0, "{:?}", shot);
        }
    }
    // 30 launches so far, but a shot lives for at most 41 turns
    assert_eq!(game.turn(), 91);
    assert!(!game.projectiles().is_empty());
    assert!(game.projectiles().len() <= 14);
}

#[test]
fn enemy_shots_ignore_miss_chance() {
    let mut game = arena(19, Position::new(2, 2));
    game.player_mut().modifiers.miss_chance = 1.0;
    demon_shot_at(&mut game);

    assert_eq!(game.apply(Command::Wait), CommandOutcome::TurnAdvanced);

    assert_eq!(game.player().health.current, 90);
    assert!(game.has_message("demon attack hits you for 10 damage!"));
    assert!(game.projectiles().is_empty());
}

#[test]
fn super_status_cancels_a_lethal_enemy_shot() {
    let mut game = arena(20, Position::new(2, 2));
    game.player_mut().health.current = 4;
    game.player_mut().modifiers.super_status = true;
    demon_shot_at(&mut game);

    game.apply(Command::Wait);

    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.player().health.current, 100);
    assert!(!game.player().modifiers.super_status);
    assert!(game.has_message("SUPER STATUS SAVED YOU! You are revived with full health!"));

    // Without the status the same shot is fatal
    game.player_mut().health.current = 4;
    demon_shot_at(&mut game);
    game.apply(Command::Wait);
    assert_eq!(game.state(), GameState::Dead);
}

// =============================================================================
// Ultimate and meta powers
// =============================================================================

#[test]
fn ultimate_clears_enemies_in_view_range() {
    let mut game = arena(11, Position::new(1, 1));
    game.spawn_enemy_at(EnemyKind::Goblin, 1, Position::new(4, 1));
    game.spawn_enemy_at(EnemyKind::Orc, 1, Position::new(5, 3));

    assert_eq!(game.apply(Command::UseUltimate), CommandOutcome::Applied);

    assert!(game.enemies().is_empty());
    assert_eq!(game.stats().enemies_killed, 2);
    assert!(game.has_message("ULTIMATE! Destroyed 2 enemies! Gained 55 XP!"));
    // 55 XP crosses the first threshold
    assert_eq!(game.player().level, 2);
}

#[test]
fn lightning_strikes_at_full_charge() {
    let mut game = arena(12, Position::new(2, 2));
    game.spawn_enemy_at(EnemyKind::Goblin, 1, Position::new(4, 2));
    game.powers_mut().lightning = true;
    game.powers_mut().lightning_charge = 99;

    game.apply(Command::Wait);

    assert!(game.enemies().is_empty());
    assert_eq!(game.powers().lightning_charge, 0);
    assert!(game.has_message("⚡ LIGHTNING STRIKE! ⚡"));
    assert!(game.has_message("Lightning destroyed goblin level 1!"));
}

#[test]
fn lightning_reports_charge_milestones() {
    let mut game = arena(13, Position::new(2, 2));
    game.powers_mut().lightning = true;
    game.powers_mut().lightning_charge = 19;

    game.apply(Command::Wait);

    let charging = game
        .messages()
        .find(|m| m.text == "Lightning power charging: 20/100")
        .map(|m| m.category);
    assert_eq!(charging, Some(MessageCategory::Info));
}

#[test]
fn boss_kill_wins_and_respawn_grants_slime_trail() {
    let mut game = arena(14, Position::new(2, 2));
    game.spawn_enemy_at(EnemyKind::Necromancer, 1, Position::new(3, 2));
    game.player_mut().attack = 10_000;

    game.apply(Command::RIGHT);

    assert_eq!(game.state(), GameState::Victory);
    assert!(game.snapshot().victory);
    assert_eq!(game.stats().boss_kills, 1);
    assert!(game.has_message("You have defeated the Necromancer! Victory #1!"));
    assert_eq!(game.apply(Command::Wait), CommandOutcome::Ignored);

    assert_eq!(game.apply(Command::Restart), CommandOutcome::Applied);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.level(), 1);
    assert_eq!(game.stats().boss_kills, 1);
    assert!(game.powers().slime_trail);
    assert!(!game.powers().lightning);
    assert!(game.has_message(
        "You gain the Slime Trail! Enemies that step on your trail take heavy damage!"
    ));
    assert!(game.has_message("New game started! Good luck!"));
}

// =============================================================================
// Doors
// =============================================================================

#[test]
fn door_loads_the_next_level_without_a_turn() {
    let mut game = arena(15, Position::new(2, 2));
    game.apply(Command::Wait);
    let mut map = game.map().clone();
    map.door_pos = Some(Position::new(3, 2));
    game.load_arena(map);

    assert_eq!(game.apply(Command::RIGHT), CommandOutcome::Applied);

    assert_eq!(game.level(), 2);
    assert_eq!(game.turn(), 1);
    assert_eq!(game.stats().levels_completed, 1);
    assert_eq!((game.map().width, game.map().height), (40, 30));
    assert!(game.has_message("Entering level 2!"));
    assert!(game.map().is_walkable(game.player().pos.x, game.player().pos.y));
}

#[test]
fn tenth_level_is_the_necromancer_lair() {
    let mut game = Game::new(EngineConfig::seeded(16));
    let mut map = Map::from_rows(&["#####", "#...#", "#####"], 9);
    map.start_pos = Position::new(1, 1);
    map.door_pos = Some(Position::new(2, 1));
    game.load_arena(map);

    game.apply(Command::RIGHT);

    assert_eq!(game.level(), 10);
    assert_eq!((game.map().width, game.map().height), (80, 60));
    let snapshot = game.snapshot();
    assert!(snapshot.door.is_none());
    assert_eq!(snapshot.enemies.iter().filter(|e| e.is_boss).count(), 1);
    assert!(game.has_message("You enter the lair of the Necromancer! The final battle begins!"));
}
