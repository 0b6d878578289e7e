//! Game state machine
//!
//! Owns every piece of simulation state and runs the turn pipeline:
//! player action, enemy pass, projectile pass, then the passive powers.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::combat::{
    enemy_retaliation, is_auto_fire_turn, player_damage, random_direction, scale_damage,
    AttackResult, Projectile, ProjectileOwner,
};
use crate::data::EngineConfig;
use crate::ecs::{
    enemy_at, run_enemy_turn, AiContext, CombatStats, Enemy, Health, Position, XpReward, AI,
};
use crate::entities::bosses::{ENTRY_TAUNT, ENTRY_WARNING, SUMMON_MESSAGE};
use crate::entities::{
    populate_level, spawn_boss, spawn_enemy_scaled, EnemyKind, HitOutcome, ItemIdAllocator,
    Player,
};
use crate::items::{
    apply_stat_effect, find_teleport_destination, GroundItem, Item, ItemId, ItemKind, Rarity,
};
use crate::progression::unlocks::{LIGHTNING_CHARGE, LIGHTNING_RADIUS, TRAIL_DAMAGE};
use crate::progression::{LightningTick, MetaPowers};
use crate::world::{generate_level, Map};
use super::commands::{Command, CommandOutcome};
use super::message::{GameMessage, MessageCategory, MessageLog};
use super::snapshot::{EnemyView, Snapshot, Viewport};
use super::turn::TurnOrder;

/// Turns the ultimate needs to recharge
pub const ULTIMATE_COOLDOWN: u32 = 50;

/// All possible game states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    /// No run started yet
    Home,
    Playing,
    /// Player died; only a restart is accepted
    Dead,
    /// The Necromancer fell; a restart respawns with a new power
    Victory,
}

/// Statistics for the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub total_damage: u64,
    pub enemies_killed: u32,
    pub items_found: u32,
    pub levels_completed: u32,
    /// Survives restarts
    pub boss_kills: u32,
}

/// The main game struct that holds all game data
pub struct Game {
    config: EngineConfig,
    state: GameState,
    /// ECS world containing the enemies
    world: World,
    /// Enemy acting order
    order: TurnOrder,
    map: Map,
    items: Vec<GroundItem>,
    projectiles: Vec<Projectile>,
    player: Player,
    /// Permanent powers earned from boss kills
    powers: MetaPowers,
    stats: RunStats,
    messages: MessageLog,
    /// Random number generator (seeded for reproducibility)
    rng: StdRng,
    item_ids: ItemIdAllocator,
    turn: u64,
    /// Current dungeon depth
    level: u32,
}

impl Game {
    /// Create a game waiting on the home screen
    ///
    /// A config that fails validation is replaced by the defaults, keeping
    /// only its seed.
    pub fn new(config: EngineConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{}. Using default config.", e);
                EngineConfig {
                    seed: config.seed,
                    ..EngineConfig::default()
                }
            }
        };
        let rng = config.make_rng();
        let messages = MessageLog::new(config.message_capacity);
        let map = Map::new(config.map_width, config.map_height, 1);
        Self {
            config,
            state: GameState::Home,
            world: World::new(),
            order: TurnOrder::new(),
            map,
            items: Vec::new(),
            projectiles: Vec::new(),
            player: Player::new(Position::default()),
            powers: MetaPowers::new(),
            stats: RunStats::default(),
            messages,
            rng,
            item_ids: ItemIdAllocator::default(),
            turn: 0,
            level: 1,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player access for embedding and tests
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Living enemies in acting order
    pub fn enemies(&self) -> &[Entity] {
        self.order.entities()
    }

    pub fn items(&self) -> &[GroundItem] {
        &self.items
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn powers(&self) -> &MetaPowers {
        &self.powers
    }

    /// Mutable power access for embedding and tests
    pub fn powers_mut(&mut self) -> &mut MetaPowers {
        &mut self.powers
    }

    /// Messages, newest first
    pub fn messages(&self) -> impl Iterator<Item = &GameMessage> {
        self.messages.iter()
    }

    /// Whether any retained message has exactly this text
    pub fn has_message(&self, text: &str) -> bool {
        self.messages.contains(text)
    }

    /// Change the game state
    pub fn set_state(&mut self, state: GameState) {
        log::debug!("State transition: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Add a message to the log
    pub fn add_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push(text, category, self.turn);
    }

    // ========================================================================
    // Test hooks
    // ========================================================================

    /// Spawn an enemy scaled to the current depth and append it to the order
    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, level: u32, pos: Position) -> Option<Entity> {
        let entity = if kind.is_boss() {
            Some(spawn_boss(&mut self.world, pos))
        } else {
            spawn_enemy_scaled(&mut self.world, kind, level, self.level, pos)
        }?;
        self.order.push(entity);
        Some(entity)
    }

    /// Drop a common item on the ground
    pub fn place_item(&mut self, kind: ItemKind, pos: Position) -> ItemId {
        let item = Item::new(self.item_ids.next_id(), kind, Rarity::Common);
        let id = item.id;
        self.items.push(GroundItem { item, pos });
        id
    }

    /// Put a projectile in flight; it moves on the next projectile pass
    pub fn launch_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    /// Replace the current level with a hand-built map and no entities
    ///
    /// The player moves to the map's start position and play begins.
    pub fn load_arena(&mut self, map: Map) {
        self.clear_level();
        self.level = map.level;
        self.player.pos = map.start_pos;
        self.map = map;
        if self.state != GameState::Playing {
            self.set_state(GameState::Playing);
        }
    }

    // ========================================================================
    // Runs
    // ========================================================================

    /// Start the first run from the home screen
    pub fn start_run(&mut self) {
        log::info!("Starting a new run");
        self.begin_run(Vec::new());
        self.add_message("Welcome to the dungeon!", MessageCategory::Info);
        self.set_state(GameState::Playing);
    }

    /// Restart after death, keeping half of the old inventory
    fn restart(&mut self) {
        let mut kept = std::mem::take(&mut self.player.inventory);
        kept.shuffle(&mut self.rng);
        kept.truncate(kept.len().div_ceil(2));
        let carried = kept.len();
        log::info!("Restarting with {} carried items", carried);

        self.begin_run(kept);
        if carried > 0 {
            self.add_message(
                format!("Respawned with {} items from your previous life!", carried),
                MessageCategory::Success,
            );
        }
        self.add_message("New game started! Good luck!", MessageCategory::Success);
        self.set_state(GameState::Playing);
    }

    /// Restart after a boss kill with the next permanent power
    fn respawn_with_new_power(&mut self) {
        let grants = self.powers.grant_for_kill(self.stats.boss_kills);
        log::info!("Respawning after victory #{}", self.stats.boss_kills);
        self.restart();
        for (text, category) in grants {
            self.add_message(text, category);
        }
    }

    /// Reset the run and regenerate level 1, replaying `carried` items
    fn begin_run(&mut self, carried: Vec<Item>) {
        self.stats = RunStats {
            boss_kills: self.stats.boss_kills,
            ..RunStats::default()
        };
        self.turn = 0;
        self.level = 1;
        self.player = Player::new(Position::default());
        self.powers.lightning_charge = 0;
        self.load_level();

        for item in carried {
            self.pick_up(item);
        }
        self.messages.clear();
    }

    fn clear_level(&mut self) {
        self.world = World::new();
        self.order.reset(Vec::new());
        self.items.clear();
        self.projectiles.clear();
        self.powers.clear_trail();
    }

    /// Generate and populate the current depth
    fn load_level(&mut self) {
        self.clear_level();

        let layout = generate_level(&mut self.rng, self.level, self.config.grid_size());
        let population = populate_level(&mut self.world, &layout, &mut self.rng, &mut self.item_ids);
        log::info!(
            "Generated level {} ({} rooms, {} enemies, {} items)",
            self.level,
            layout.rooms.len(),
            population.enemies.len(),
            population.items.len()
        );

        self.order.reset(population.enemies);
        self.items = population.items;
        self.player.pos = layout.map.start_pos;
        self.map = layout.map;

        if layout.is_boss {
            self.add_message(ENTRY_WARNING, MessageCategory::Warning);
            self.add_message(ENTRY_TAUNT, MessageCategory::Combat);
        }
    }

    fn enter_door(&mut self) {
        self.level += 1;
        self.stats.levels_completed += 1;
        self.add_message(format!("Entering level {}!", self.level), MessageCategory::Success);
        self.load_level();
        self.tick_lightning();
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Apply one player command
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        match (self.state, command) {
            (GameState::Home, Command::Restart) => {
                self.start_run();
                CommandOutcome::Applied
            }
            (GameState::Dead, Command::Restart) => {
                self.restart();
                CommandOutcome::Applied
            }
            (GameState::Victory, Command::Restart) => {
                self.respawn_with_new_power();
                CommandOutcome::Applied
            }
            (GameState::Playing, command) => self.apply_playing(command),
            _ => CommandOutcome::Ignored,
        }
    }

    fn apply_playing(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::Move { dx, dy } => self.move_player(dx, dy),
            Command::Wait => {
                let outcome = self.advance_turn();
                self.add_message("You wait...", MessageCategory::Info);
                outcome
            }
            Command::UseUltimate => self.use_ultimate(),
            Command::Restart => {
                self.restart();
                CommandOutcome::Applied
            }
            Command::Upgrade(kind) => self.upgrade(kind),
        }
    }

    fn move_player(&mut self, dx: i32, dy: i32) -> CommandOutcome {
        let unit_step = dx.abs() <= 1 && dy.abs() <= 1 && (dx == 0) != (dy == 0);
        if !unit_step {
            return CommandOutcome::Ignored;
        }

        let target = self.player.pos.offset(dx, dy);
        if !self.map.is_walkable(target.x, target.y) {
            return CommandOutcome::Ignored;
        }

        if self.map.door_pos == Some(target) {
            self.enter_door();
            return CommandOutcome::Applied;
        }

        if let Some(enemy) = enemy_at(&self.world, target) {
            self.melee(enemy);
            return self.advance_turn();
        }

        let stamp = self.turn;
        self.player.step_to(target);
        if let Some(index) = self.items.iter().position(|g| g.pos == target) {
            let ground = self.items.remove(index);
            self.pick_up(ground.item);
        }
        self.powers.lay_trail(target, stamp);
        self.advance_turn()
    }

    fn use_ultimate(&mut self) -> CommandOutcome {
        if self.player.modifiers.ultimate_cooldown > 0 {
            self.add_message("Ultimate not ready yet!", MessageCategory::Error);
            return CommandOutcome::Ignored;
        }

        let range = self.player.modifiers.view_range;
        let victims = self.enemies_within(range);
        if victims.is_empty() {
            self.add_message("No enemies in sight to destroy!", MessageCategory::Error);
            return CommandOutcome::Ignored;
        }

        let count = victims.len();
        let mut total_xp = 0;
        for entity in victims {
            if let Some((_, xp)) = self.kill_enemy(entity) {
                total_xp += xp;
            }
        }
        self.player.modifiers.ultimate_cooldown = ULTIMATE_COOLDOWN;
        self.add_message(
            format!("ULTIMATE! Destroyed {} enemies! Gained {} XP!", count, total_xp),
            MessageCategory::Success,
        );
        self.check_level_up();
        CommandOutcome::Applied
    }

    fn upgrade(&mut self, kind: ItemKind) -> CommandOutcome {
        if !self.player.upgrade(kind) {
            return CommandOutcome::Ignored;
        }
        log::debug!("Super status from {}", kind.tag());
        self.add_message(
            format!("SUPER STATUS ACTIVATED! {} items combined into ultimate power!", kind.tag()),
            MessageCategory::Success,
        );
        self.add_message("You are now invincible and deal double damage!", MessageCategory::Success);
        CommandOutcome::Applied
    }

    // ========================================================================
    // Turn pipeline
    // ========================================================================

    fn advance_turn(&mut self) -> CommandOutcome {
        self.turn += 1;
        let cooldown = &mut self.player.modifiers.ultimate_cooldown;
        *cooldown = cooldown.saturating_sub(1);

        if self.state != GameState::Playing {
            return CommandOutcome::TurnAdvanced;
        }
        self.run_enemy_pass();
        if self.state != GameState::Playing {
            return CommandOutcome::TurnAdvanced;
        }
        self.run_projectile_pass();
        if self.state != GameState::Playing {
            return CommandOutcome::TurnAdvanced;
        }
        self.tick_lightning();
        self.check_level_up();
        CommandOutcome::TurnAdvanced
    }

    fn run_enemy_pass(&mut self) {
        self.order.begin_pass();
        while let Some(entity) = self.order.next_actor() {
            let Some(label) = self.enemy_label(entity) else {
                continue;
            };
            let ctx = AiContext {
                map: &self.map,
                player_pos: self.player.pos,
                turn: self.turn,
                enemy_count: self.order.len(),
            };
            let acted = run_enemy_turn(&mut self.world, entity, &ctx, &mut self.rng);

            if let Some(taunt) = acted.taunt {
                self.add_message(taunt, MessageCategory::Combat);
            }
            if let Some(skeleton) = acted.summoned {
                self.order.push(skeleton);
                self.add_message(SUMMON_MESSAGE, MessageCategory::Combat);
            }
            if let Some(shot) = acted.shot {
                self.add_message(format!("{} shoots at you!", label), MessageCategory::Combat);
                self.projectiles.push(shot);
            }
            if let Some(to) = acted.moved_to {
                self.check_slime(entity, to, &label);
            }
        }
    }

    fn check_slime(&mut self, entity: Entity, pos: Position, label: &str) {
        if !self.powers.is_slimed(pos) {
            return;
        }
        let dead = self.damage_enemy(entity, TRAIL_DAMAGE);
        self.add_message(
            format!("{} stepped on slime trail and took {} damage!", label, TRAIL_DAMAGE),
            MessageCategory::Success,
        );
        if dead {
            self.kill_enemy(entity);
            self.add_message(format!("Slime trail destroyed {}!", label), MessageCategory::Success);
        }
    }

    fn run_projectile_pass(&mut self) {
        let in_flight = std::mem::take(&mut self.projectiles);
        let mut remaining = Vec::with_capacity(in_flight.len());

        // Newest first; survivors keep their stored order
        for mut projectile in in_flight.into_iter().rev() {
            if self.state != GameState::Playing {
                remaining.push(projectile);
                continue;
            }
            projectile.advance();

            let hit = match projectile.owner {
                ProjectileOwner::Enemy => self.projectile_hits_player(&projectile),
                ProjectileOwner::Player => self.projectile_hits_enemy(&projectile),
            };
            if hit || projectile.hit_wall(&self.map) || projectile.out_of_range() {
                continue;
            }
            remaining.push(projectile);
        }
        remaining.reverse();
        self.projectiles = remaining;

        if self.state == GameState::Playing && is_auto_fire_turn(self.turn) {
            self.auto_fire();
        }
    }

    fn projectile_hits_player(&mut self, projectile: &Projectile) -> bool {
        if projectile.distance_to(self.player.pos) >= 1.0 {
            return false;
        }
        self.add_message(
            format!("{} hits you for {} damage!", projectile.name, projectile.damage),
            MessageCategory::Combat,
        );
        self.hurt_player(projectile.damage);
        true
    }

    fn projectile_hits_enemy(&mut self, projectile: &Projectile) -> bool {
        let cell = projectile.cell();
        let target = self
            .order
            .entities()
            .iter()
            .copied()
            .find(|&e| self.world.get::<&Position>(e).map(|p| *p == cell).unwrap_or(false));
        let Some(entity) = target else {
            return false;
        };
        let Some(label) = self.enemy_label(entity) else {
            return false;
        };

        let damage = scale_damage(projectile.damage, self.player.modifiers.damage_multiplier);
        let dead = self.damage_enemy(entity, damage);
        self.stats.total_damage += damage.max(0) as u64;
        log::debug!("{} hit {} for {}", projectile.name, label, damage);
        self.add_message(
            format!("{} hits {} for {} damage!", projectile.name, label, damage),
            MessageCategory::Combat,
        );
        if dead {
            self.defeat(entity, &label);
        }
        true
    }

    fn auto_fire(&mut self) {
        let origin = self.player.pos;
        let launchers: Vec<ItemKind> = self
            .player
            .inventory
            .iter()
            .map(|item| item.kind)
            .filter(|kind| kind.auto_fires())
            .collect();
        for kind in launchers {
            let direction = random_direction(&mut self.rng);
            self.projectiles.push(Projectile::player_shot(origin, direction, kind));
        }
    }

    fn tick_lightning(&mut self) {
        match self.powers.charge_lightning() {
            LightningTick::Idle => {}
            LightningTick::Charging(charge) => self.add_message(
                format!("Lightning power charging: {}/{}", charge, LIGHTNING_CHARGE),
                MessageCategory::Info,
            ),
            LightningTick::Strike => self.strike_lightning(),
        }
    }

    fn strike_lightning(&mut self) {
        let victims = self.enemies_within(LIGHTNING_RADIUS);
        if victims.is_empty() {
            return;
        }
        self.add_message("⚡ LIGHTNING STRIKE! ⚡", MessageCategory::Success);
        for entity in victims {
            if let Some((label, _)) = self.kill_enemy(entity) {
                self.add_message(format!("Lightning destroyed {}!", label), MessageCategory::Success);
            }
        }
    }

    fn check_level_up(&mut self) {
        if self.player.try_level_up() {
            log::info!("Player reached level {}", self.player.level);
            self.add_message(
                format!("Level up! You are now level {}!", self.player.level),
                MessageCategory::Success,
            );
        }
    }

    // ========================================================================
    // Combat
    // ========================================================================

    fn melee(&mut self, entity: Entity) {
        let Some(label) = self.enemy_label(entity) else {
            return;
        };
        let Ok(stats) = self.world.get::<&CombatStats>(entity).map(|s| *s) else {
            return;
        };

        let damage = player_damage(
            self.player.attack,
            stats.defense,
            self.player.modifiers.damage_multiplier,
        );
        let dead = self.damage_enemy(entity, damage);
        self.stats.total_damage += damage.max(0) as u64;
        self.add_message(
            format!("You hit the {} for {} damage!", label, damage),
            MessageCategory::Combat,
        );

        if dead {
            self.defeat(entity, &label);
            return;
        }

        let miss_chance = self.player.modifiers.miss_chance;
        match enemy_retaliation(stats.attack, self.player.defense, miss_chance, &mut self.rng) {
            AttackResult::Missed => {
                self.add_message(format!("The {} missed you!", label), MessageCategory::Success);
            }
            AttackResult::Hit { damage } => {
                self.add_message(
                    format!("The {} hits you for {} damage!", label, damage),
                    MessageCategory::Combat,
                );
                self.hurt_player(damage);
            }
        }
    }

    /// Kill from a direct hit: reward message and level-up check
    fn defeat(&mut self, entity: Entity, label: &str) {
        if let Some((_, xp)) = self.kill_enemy(entity) {
            if self.state != GameState::Victory {
                self.add_message(
                    format!("You defeated the {}! Gained {} XP.", label, xp),
                    MessageCategory::Success,
                );
            }
            self.check_level_up();
        }
    }

    fn hurt_player(&mut self, damage: i32) {
        match self.player.take_hit(damage) {
            HitOutcome::Survived => {}
            HitOutcome::Saved => self.add_message(
                "SUPER STATUS SAVED YOU! You are revived with full health!",
                MessageCategory::Success,
            ),
            HitOutcome::Killed => {
                log::info!("Player died on level {} at turn {}", self.level, self.turn);
                self.add_message("You have been defeated!", MessageCategory::Error);
                self.set_state(GameState::Dead);
            }
        }
    }

    /// Damage an enemy, returning whether it died
    fn damage_enemy(&mut self, entity: Entity, amount: i32) -> bool {
        match self.world.get::<&mut Health>(entity) {
            Ok(mut health) => {
                health.take_damage(amount);
                health.is_dead()
            }
            Err(_) => false,
        }
    }

    /// Remove an enemy, grant its XP and count the kill
    ///
    /// A boss kill also records the victory. Returns the enemy's label and XP.
    fn kill_enemy(&mut self, entity: Entity) -> Option<(String, u32)> {
        let enemy = self.world.get::<&Enemy>(entity).map(|e| *e).ok()?;
        let xp = self.world.get::<&XpReward>(entity).map(|x| x.0).unwrap_or(0);
        let _ = self.world.despawn(entity);
        self.order.remove(entity);

        self.player.gain_xp(xp);
        self.stats.enemies_killed += 1;

        if enemy.kind.is_boss() {
            self.stats.boss_kills += 1;
            log::info!("Necromancer defeated, victory #{}", self.stats.boss_kills);
            self.add_message(
                format!("You have defeated the Necromancer! Victory #{}!", self.stats.boss_kills),
                MessageCategory::Success,
            );
            self.set_state(GameState::Victory);
        }
        Some((enemy.label(), xp))
    }

    fn enemy_label(&self, entity: Entity) -> Option<String> {
        self.world.get::<&Enemy>(entity).map(|e| e.label()).ok()
    }

    /// Enemies within a Manhattan radius of the player, in acting order
    fn enemies_within(&self, radius: i32) -> Vec<Entity> {
        let center = self.player.pos;
        self.order
            .entities()
            .iter()
            .copied()
            .filter(|&e| {
                self.world
                    .get::<&Position>(e)
                    .map(|p| p.distance(&center) <= radius)
                    .unwrap_or(false)
            })
            .collect()
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Take an item into the inventory and apply its effect
    fn pick_up(&mut self, item: Item) {
        let kind = item.kind;
        self.player.add_item(item);
        self.stats.items_found += 1;

        let effect = kind.effect();
        apply_stat_effect(&mut self.player, effect);
        if effect.teleport {
            let world = &self.world;
            let destination = find_teleport_destination(&self.map, &mut self.rng, |pos| {
                enemy_at(world, pos).is_some()
            });
            match destination {
                Some(pos) => {
                    self.player.pos = pos;
                    self.add_message(kind.pickup_message(), MessageCategory::Success);
                }
                None => log::debug!("Teleport found no free cell"),
            }
        } else {
            self.add_message(kind.pickup_message(), MessageCategory::Success);
        }

        self.add_message(format!("You picked up {}!", kind.name()), MessageCategory::Success);
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    /// Publish the current state
    pub fn snapshot(&self) -> Snapshot {
        let enemies = self
            .order
            .entities()
            .iter()
            .filter_map(|&entity| self.enemy_view(entity))
            .collect();

        Snapshot {
            state: self.state,
            turn: self.turn,
            level: self.level,
            map: self.map.rows(),
            viewport: Viewport::centered_on(
                self.player.pos,
                self.config.viewport_width,
                self.config.viewport_height,
                self.map.width,
                self.map.height,
            ),
            player: self.player.clone(),
            enemies,
            items: self.items.clone(),
            projectiles: self.projectiles.clone(),
            door: self.map.door_pos,
            stats: self.stats,
            powers: self.powers.clone(),
            messages: self.messages.iter().cloned().collect(),
            game_over: self.state == GameState::Dead,
            victory: self.state == GameState::Victory,
        }
    }

    fn enemy_view(&self, entity: Entity) -> Option<EnemyView> {
        let pos = *self.world.get::<&Position>(entity).ok()?;
        let enemy = *self.world.get::<&Enemy>(entity).ok()?;
        let health = *self.world.get::<&Health>(entity).ok()?;
        let stats = *self.world.get::<&CombatStats>(entity).ok()?;
        let facing = self.world.get::<&AI>(entity).ok()?.facing;
        Some(EnemyView {
            kind: enemy.kind,
            level: enemy.level,
            pos,
            health: health.current,
            max_health: health.max,
            attack: stats.attack,
            defense: stats.defense,
            size: enemy.size,
            facing,
            is_boss: enemy.kind.is_boss(),
        })
    }
}
