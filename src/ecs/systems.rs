//! ECS Systems
//!
//! Per-enemy AI: boss scripting, ranged shots and the movement patterns.
//! Each call resolves one enemy's whole turn and reports what happened so
//! the game loop can queue messages and run follow-up checks.

use hecs::{Entity, World};
use rand::Rng;

use crate::combat::{chance, enemy_projectile_damage, random_direction, Projectile};
use crate::ecs::{CombatStats, Enemy, Facing, MovementPattern, Position, Ranged, AI};
use crate::entities::bosses::{random_taunt, summon_candidates};
use crate::entities::{spawn_summoned_skeleton, BossComponent};
use crate::world::Map;

/// Base chance that an enemy considers moving at all, added to aggression
const MOVE_GATE_BASE: f64 = 0.4;
/// Manhattan range within which ranged enemies open fire
const SHOOT_RANGE: i32 = 10;
const PURSUIT_RANGE: i32 = 8;
const FAST_RANGE: i32 = 12;
const FLY_RANGE: i32 = 10;
const AMBUSH_RANGE: i32 = 6;
/// Teleporters blink only when the distance is strictly inside this band
const TELEPORT_BAND: (i32, i32) = (6, 15);
const TELEPORT_CHANCE: f64 = 0.3;
const TELEPORT_OFFSET: i32 = 2;
const SLOW_CHANCE: f64 = 0.3;
const FLOAT_CHANCE: f64 = 0.1;
const AMBUSH_WANDER_CHANCE: f64 = 0.2;

/// Bounce headings: right, left, down, up
const BOUNCE_HEADINGS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Read-only view of the level an enemy acts in
#[derive(Debug, Clone, Copy)]
pub struct AiContext<'a> {
    pub map: &'a Map,
    pub player_pos: Position,
    pub turn: u64,
    /// Living enemies, used to cap boss summons
    pub enemy_count: usize,
}

/// What one enemy did on its turn
#[derive(Debug, Default)]
pub struct EnemyTurn {
    /// Taunt line spoken by the boss
    pub taunt: Option<&'static str>,
    /// Skeleton raised by the boss
    pub summoned: Option<Entity>,
    /// Projectile fired at the player
    pub shot: Option<Projectile>,
    /// Cell the enemy moved to
    pub moved_to: Option<Position>,
}

// ============================================================================
// Occupancy
// ============================================================================

/// The enemy standing on `pos`, if any
pub fn enemy_at(world: &World, pos: Position) -> Option<Entity> {
    world
        .query::<(&Position, &Enemy)>()
        .iter()
        .find(|(_, (p, _))| **p == pos)
        .map(|(entity, _)| entity)
}

/// Whether an enemy may enter `pos`
///
/// The cell must be floor and free of the player and every enemy, the mover
/// included, so a zero-length step is never legal.
pub fn can_move_to(world: &World, map: &Map, player_pos: Position, pos: Position) -> bool {
    map.is_walkable(pos.x, pos.y) && pos != player_pos && enemy_at(world, pos).is_none()
}

/// Like [`can_move_to`] but ignores walls, for floating enemies
fn can_float_to(world: &World, map: &Map, player_pos: Position, pos: Position) -> bool {
    map.in_bounds(pos.x, pos.y) && pos != player_pos && enemy_at(world, pos).is_none()
}

// ============================================================================
// Enemy turn
// ============================================================================

/// Resolve one enemy's turn: boss script, ranged attack, then movement
pub fn run_enemy_turn(
    world: &mut World,
    entity: Entity,
    ctx: &AiContext,
    rng: &mut impl Rng,
) -> EnemyTurn {
    let mut outcome = EnemyTurn::default();
    let Ok(pos) = world.get::<&Position>(entity).map(|p| *p) else {
        return outcome;
    };

    if world.get::<&BossComponent>(entity).is_ok() {
        run_boss_script(world, entity, pos, ctx, rng, &mut outcome);
    }

    outcome.shot = try_shoot(world, entity, pos, ctx, rng);

    let Ok(mut ai) = world.get::<&AI>(entity).map(|ai| *ai) else {
        return outcome;
    };
    if chance(rng, MOVE_GATE_BASE + ai.aggression) {
        if let Some(to) = choose_move(world, pos, &mut ai, ctx, rng) {
            ai.facing = Facing::from_delta(to.x - pos.x, to.y - pos.y);
            if let Ok(mut p) = world.get::<&mut Position>(entity) {
                *p = to;
            }
            log::trace!("{:?} moved {:?} -> {:?}", entity, pos, to);
            outcome.moved_to = Some(to);
        }
        // Heading and facing may change even without a move
        if let Ok(mut stored) = world.get::<&mut AI>(entity) {
            *stored = ai;
        }
    }

    outcome
}

fn run_boss_script(
    world: &mut World,
    entity: Entity,
    pos: Position,
    ctx: &AiContext,
    rng: &mut impl Rng,
    outcome: &mut EnemyTurn,
) {
    let Ok(mut boss) = world.get::<&BossComponent>(entity).map(|b| *b) else {
        return;
    };

    if boss.taunt_ready(ctx.turn) {
        outcome.taunt = Some(random_taunt(rng));
        boss.taunt_stamp = ctx.turn;
    }

    if boss.summon_ready(ctx.turn, ctx.enemy_count) {
        let free = summon_candidates(pos).find(|&cell| can_move_to(world, ctx.map, ctx.player_pos, cell));
        match free {
            Some(cell) => {
                log::debug!("Necromancer summons a skeleton at {:?}", cell);
                outcome.summoned = Some(spawn_summoned_skeleton(world, cell));
            }
            None => log::trace!("Necromancer found no room to summon"),
        }
        // The stamp moves even when every cell was blocked
        boss.summon_stamp = ctx.turn;
    }

    if let Ok(mut stored) = world.get::<&mut BossComponent>(entity) {
        *stored = boss;
    }
}

fn try_shoot(
    world: &mut World,
    entity: Entity,
    pos: Position,
    ctx: &AiContext,
    rng: &mut impl Rng,
) -> Option<Projectile> {
    let ready = world
        .get::<&Ranged>(entity)
        .map(|r| r.is_ready(ctx.turn))
        .unwrap_or(false);
    if !ready || pos.distance(&ctx.player_pos) > SHOOT_RANGE {
        return None;
    }

    let attack = world.get::<&CombatStats>(entity).ok()?.attack;
    let kind = world.get::<&Enemy>(entity).ok()?.kind;
    let direction = random_direction(rng);
    if let Ok(mut ranged) = world.get::<&mut Ranged>(entity) {
        ranged.last_shot = ctx.turn;
    }
    Some(Projectile::enemy_shot(
        pos,
        direction,
        enemy_projectile_damage(attack),
        kind.tag(),
    ))
}

// ============================================================================
// Movement patterns
// ============================================================================

fn choose_move(
    world: &World,
    from: Position,
    ai: &mut AI,
    ctx: &AiContext,
    rng: &mut impl Rng,
) -> Option<Position> {
    let distance = from.distance(&ctx.player_pos);
    let legal = |pos: Position| can_move_to(world, ctx.map, ctx.player_pos, pos);

    match ai.pattern {
        MovementPattern::Normal => move_normal(from, distance, ai.aggression, ctx, &legal, rng),
        MovementPattern::Fast => {
            if distance < FAST_RANGE && chance(rng, ai.aggression) {
                let stride = pursuit_delta(from, ctx.player_pos);
                let to = from.offset(stride.0 * 2, stride.1 * 2);
                if legal(to) {
                    return Some(to);
                }
            }
            move_normal(from, distance, ai.aggression, ctx, &legal, rng)
        }
        MovementPattern::Slow => {
            if chance(rng, SLOW_CHANCE) {
                move_normal(from, distance, ai.aggression, ctx, &legal, rng)
            } else {
                None
            }
        }
        MovementPattern::Teleport => {
            let (near, far) = TELEPORT_BAND;
            if distance > near && distance < far && chance(rng, TELEPORT_CHANCE) {
                let ox = if chance(rng, 0.5) { TELEPORT_OFFSET } else { -TELEPORT_OFFSET };
                let oy = if chance(rng, 0.5) { TELEPORT_OFFSET } else { -TELEPORT_OFFSET };
                let to = ctx.player_pos.offset(ox, oy);
                if legal(to) {
                    return Some(to);
                }
            }
            move_normal(from, distance, ai.aggression, ctx, &legal, rng)
        }
        MovementPattern::Float => {
            if chance(rng, FLOAT_CHANCE) {
                let to = random_step(from, rng);
                if can_float_to(world, ctx.map, ctx.player_pos, to) {
                    return Some(to);
                }
            }
            move_normal(from, distance, ai.aggression, ctx, &legal, rng)
        }
        MovementPattern::Bounce => {
            let heading = *ai.heading.get_or_insert_with(|| rng.gen_range(0..BOUNCE_HEADINGS.len()));
            let (dx, dy) = BOUNCE_HEADINGS[heading];
            let to = from.offset(dx, dy);
            if legal(to) {
                Some(to)
            } else {
                ai.heading = Some((heading + 2) % BOUNCE_HEADINGS.len());
                None
            }
        }
        MovementPattern::Ambush => {
            if distance < AMBUSH_RANGE {
                let (dx, dy) = pursuit_delta(from, ctx.player_pos);
                let to = from.offset(dx, dy);
                legal(to).then_some(to)
            } else if chance(rng, AMBUSH_WANDER_CHANCE) {
                move_normal(from, distance, ai.aggression, ctx, &legal, rng)
            } else {
                None
            }
        }
        MovementPattern::Fly => {
            let to = if distance < FLY_RANGE && chance(rng, ai.aggression) {
                let (dx, dy) = pursuit_delta(from, ctx.player_pos);
                from.offset(dx, dy)
            } else {
                random_step(from, rng)
            };
            legal(to).then_some(to)
        }
    }
}

/// Pursue when close and the aggression roll passes, otherwise wander
fn move_normal(
    from: Position,
    distance: i32,
    aggression: f64,
    ctx: &AiContext,
    legal: &impl Fn(Position) -> bool,
    rng: &mut impl Rng,
) -> Option<Position> {
    if distance < PURSUIT_RANGE && chance(rng, aggression) {
        let (dx, dy) = pursuit_delta(from, ctx.player_pos);
        let to = from.offset(dx, dy);
        if legal(to) {
            return Some(to);
        }
    }

    let to = random_step(from, rng);
    legal(to).then_some(to)
}

fn pursuit_delta(from: Position, target: Position) -> (i32, i32) {
    ((target.x - from.x).signum(), (target.y - from.y).signum())
}

fn random_step(from: Position, rng: &mut impl Rng) -> Position {
    let dx = rng.gen_range(-1..=1);
    let dy = rng.gen_range(-1..=1);
    from.offset(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{spawn_boss, spawn_enemy_scaled, EnemyKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_room() -> Map {
        Map::from_rows(
            &[
                "##########",
                "#........#",
                "#........#",
                "#........#",
                "#........#",
                "#........#",
                "##########",
            ],
            1,
        )
    }

    fn spawn(world: &mut World, kind: EnemyKind, pos: Position) -> Entity {
        spawn_enemy_scaled(world, kind, 1, 1, pos).unwrap()
    }

    fn force_aggression(world: &mut World, entity: Entity, aggression: f64) {
        world.get::<&mut AI>(entity).unwrap().aggression = aggression;
    }

    #[test]
    fn test_can_move_to_rules() {
        let map = open_room();
        let mut world = World::new();
        let goblin = spawn(&mut world, EnemyKind::Goblin, Position::new(2, 2));
        let player = Position::new(4, 4);

        assert!(can_move_to(&world, &map, player, Position::new(3, 2)));
        // Walls, the player, and occupied cells are all blocked
        assert!(!can_move_to(&world, &map, player, Position::new(0, 2)));
        assert!(!can_move_to(&world, &map, player, player));
        assert!(!can_move_to(&world, &map, player, Position::new(2, 2)));
        assert!(!can_move_to(&world, &map, player, Position::new(-1, 2)));
        assert_eq!(enemy_at(&world, Position::new(2, 2)), Some(goblin));
    }

    #[test]
    fn test_aggressive_enemy_pursues() {
        let map = open_room();
        let mut world = World::new();
        let goblin = spawn(&mut world, EnemyKind::Goblin, Position::new(1, 1));
        force_aggression(&mut world, goblin, 2.0);
        let ctx = AiContext { map: &map, player_pos: Position::new(5, 4), turn: 1, enemy_count: 1 };
        let mut rng = StdRng::seed_from_u64(3);

        let turn = run_enemy_turn(&mut world, goblin, &ctx, &mut rng);
        assert_eq!(turn.moved_to, Some(Position::new(2, 2)));
        assert_eq!(world.get::<&AI>(goblin).unwrap().facing, Facing::Right);
    }

    #[test]
    fn test_bounce_reverses_off_walls() {
        let map = open_room();
        let mut world = World::new();
        let slime = spawn(&mut world, EnemyKind::Slime, Position::new(8, 3));
        force_aggression(&mut world, slime, 2.0);
        world.get::<&mut AI>(slime).unwrap().heading = Some(0);
        let ctx = AiContext { map: &map, player_pos: Position::new(1, 1), turn: 1, enemy_count: 1 };
        let mut rng = StdRng::seed_from_u64(9);

        // Heading right into the wall: no move, heading flips to left
        let turn = run_enemy_turn(&mut world, slime, &ctx, &mut rng);
        assert_eq!(turn.moved_to, None);
        assert_eq!(world.get::<&AI>(slime).unwrap().heading, Some(2));

        // Index 2 is down
        let turn = run_enemy_turn(&mut world, slime, &ctx, &mut rng);
        assert_eq!(turn.moved_to, Some(Position::new(8, 4)));
    }

    #[test]
    fn test_ranged_enemy_shoots_within_range() {
        let map = open_room();
        let mut world = World::new();
        let demon = spawn(&mut world, EnemyKind::Demon, Position::new(2, 2));
        let attack = world.get::<&CombatStats>(demon).unwrap().attack;
        let ctx = AiContext { map: &map, player_pos: Position::new(6, 4), turn: 5, enemy_count: 1 };
        let mut rng = StdRng::seed_from_u64(1);

        let turn = run_enemy_turn(&mut world, demon, &ctx, &mut rng);
        let shot = turn.shot.expect("demon should fire at turn 5");
        assert_eq!(shot.damage, attack / 2);
        assert_eq!(shot.name, "demon attack");
        assert_eq!(world.get::<&Ranged>(demon).unwrap().last_shot, 5);

        // Cooldown of 5 blocks the next turn
        let ctx = AiContext { turn: 6, ..ctx };
        assert!(run_enemy_turn(&mut world, demon, &ctx, &mut rng).shot.is_none());
    }

    #[test]
    fn test_ranged_enemy_holds_fire_out_of_range() {
        let map = Map::new(40, 30, 1);
        let mut world = World::new();
        let demon = spawn(&mut world, EnemyKind::Demon, Position::new(1, 1));
        let ctx = AiContext { map: &map, player_pos: Position::new(20, 20), turn: 10, enemy_count: 1 };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(run_enemy_turn(&mut world, demon, &ctx, &mut rng).shot.is_none());
    }

    #[test]
    fn test_boss_taunts_and_summons() {
        let map = Map::from_rows(
            &[
                "#########",
                "#.......#",
                "#.......#",
                "#.......#",
                "#.......#",
                "#.......#",
                "#.......#",
                "#########",
            ],
            10,
        );
        let mut world = World::new();
        let boss = spawn_boss(&mut world, Position::new(4, 3));
        let ctx = AiContext { map: &map, player_pos: Position::new(1, 1), turn: 10, enemy_count: 1 };
        let mut rng = StdRng::seed_from_u64(2);

        let turn = run_enemy_turn(&mut world, boss, &ctx, &mut rng);
        assert!(turn.taunt.is_some());
        let skeleton = turn.summoned.expect("boss should summon");
        // The first direction tried is two cells to the right
        assert_eq!(*world.get::<&Position>(skeleton).unwrap(), Position::new(6, 3));

        let stamps = *world.get::<&BossComponent>(boss).unwrap();
        assert_eq!(stamps.summon_stamp, 10);
        assert_eq!(stamps.taunt_stamp, 10);
    }

    #[test]
    fn test_boss_summon_stamp_moves_when_blocked() {
        // A one-cell pocket leaves no room at distance two
        let map = Map::from_rows(&["###", "#.#", "###"], 10);
        let mut world = World::new();
        let boss = spawn_boss(&mut world, Position::new(1, 1));
        let ctx = AiContext { map: &map, player_pos: Position::new(5, 5), turn: 4, enemy_count: 1 };
        let mut rng = StdRng::seed_from_u64(2);

        let turn = run_enemy_turn(&mut world, boss, &ctx, &mut rng);
        assert!(turn.summoned.is_none());
        assert_eq!(world.get::<&BossComponent>(boss).unwrap().summon_stamp, 4);
    }

    #[test]
    fn test_summon_capped_by_enemy_count() {
        let map = Map::new(20, 20, 10);
        let mut world = World::new();
        let boss = spawn_boss(&mut world, Position::new(10, 10));
        let ctx = AiContext { map: &map, player_pos: Position::new(1, 1), turn: 30, enemy_count: 12 };
        let mut rng = StdRng::seed_from_u64(2);
        assert!(run_enemy_turn(&mut world, boss, &ctx, &mut rng).summoned.is_none());
    }
}
