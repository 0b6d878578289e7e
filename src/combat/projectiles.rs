//! Projectile physics
//!
//! Projectiles move in continuous space by a fixed fractional velocity each
//! turn. Collisions are tested against the rounded grid cell.

use rand::Rng;
use serde::Serialize;

use crate::ecs::Position;
use crate::items::ItemKind;
use crate::world::Map;

/// Furthest a projectile may travel from its origin on either axis
pub const MAX_TRAVEL: f64 = 20.0;
/// Speed of enemy shots, in tiles per turn
pub const ENEMY_SPEED: f64 = 0.3;
/// Speed of player shots, in tiles per turn
pub const PLAYER_SPEED: f64 = 0.5;
/// Turns between player auto-fire volleys
pub const AUTO_FIRE_INTERVAL: u64 = 3;

/// The eight compass and diagonal firing directions
pub const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// A projectile in flight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub damage: i32,
    pub owner: ProjectileOwner,
    /// Display name used in hit messages
    pub name: String,
}

impl Projectile {
    fn launch(
        from: Position,
        direction: (i32, i32),
        speed: f64,
        damage: i32,
        owner: ProjectileOwner,
        name: String,
    ) -> Self {
        let (x, y) = (from.x as f64, from.y as f64);
        Self {
            x,
            y,
            dx: direction.0 as f64 * speed,
            dy: direction.1 as f64 * speed,
            origin_x: x,
            origin_y: y,
            damage,
            owner,
            name,
        }
    }

    /// A shot fired by an enemy of the given type tag
    pub fn enemy_shot(from: Position, direction: (i32, i32), damage: i32, enemy_tag: &str) -> Self {
        Self::launch(
            from,
            direction,
            ENEMY_SPEED,
            damage,
            ProjectileOwner::Enemy,
            format!("{} attack", enemy_tag),
        )
    }

    /// A shot auto-fired by one of the player's ranged items
    pub fn player_shot(from: Position, direction: (i32, i32), kind: ItemKind) -> Self {
        Self::launch(
            from,
            direction,
            PLAYER_SPEED,
            kind.projectile_damage(),
            ProjectileOwner::Player,
            kind.name().to_string(),
        )
    }

    /// Move one turn along the velocity
    pub fn advance(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }

    /// The grid cell the projectile currently occupies
    pub fn cell(&self) -> Position {
        // Halves round up, so -0.5 lands on 0 rather than -1
        Position::new((self.x + 0.5).floor() as i32, (self.y + 0.5).floor() as i32)
    }

    /// Manhattan distance in continuous space to a grid position
    pub fn distance_to(&self, pos: Position) -> f64 {
        (self.x - pos.x as f64).abs() + (self.y - pos.y as f64).abs()
    }

    /// Whether the projectile has flown past its range on either axis
    pub fn out_of_range(&self) -> bool {
        (self.x - self.origin_x).abs() > MAX_TRAVEL || (self.y - self.origin_y).abs() > MAX_TRAVEL
    }

    /// Whether the projectile's cell is solid (off-grid counts as solid)
    pub fn hit_wall(&self, map: &Map) -> bool {
        let cell = self.cell();
        map.is_wall(cell.x, cell.y)
    }
}

/// Pick one of the eight firing directions
pub fn random_direction(rng: &mut impl Rng) -> (i32, i32) {
    DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())]
}

/// Whether the player's ranged items fire on this turn
pub fn is_auto_fire_turn(turn: u64) -> bool {
    turn % AUTO_FIRE_INTERVAL == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_shot_velocity_and_name() {
        let shot = Projectile::enemy_shot(Position::new(5, 5), (1, -1), 12, "demon");
        assert_eq!((shot.dx, shot.dy), (0.3, -0.3));
        assert_eq!(shot.name, "demon attack");
        assert_eq!(shot.owner, ProjectileOwner::Enemy);
    }

    #[test]
    fn test_player_shot_uses_item_table() {
        let shot = Projectile::player_shot(Position::new(2, 2), (0, 1), ItemKind::DragonBow);
        assert_eq!(shot.damage, 35);
        assert_eq!(shot.dy, 0.5);
        assert_eq!(shot.name, "Dragon Bow");
    }

    #[test]
    fn test_cell_rounds_halves_up() {
        let mut shot = Projectile::player_shot(Position::new(0, 0), (-1, 0), ItemKind::IceSpell);
        shot.advance();
        assert_eq!(shot.x, -0.5);
        assert_eq!(shot.cell(), Position::new(0, 0));

        shot.x = 2.5;
        shot.y = -1.5;
        assert_eq!(shot.cell(), Position::new(3, -1));
        shot.y = 1.49;
        assert_eq!(shot.cell().y, 1);
    }

    #[test]
    fn test_range_cap() {
        let mut shot = Projectile::player_shot(Position::new(0, 0), (1, 0), ItemKind::IceSpell);
        let mut steps = 0;
        while !shot.out_of_range() {
            shot.advance();
            steps += 1;
        }
        // 0.5 per turn needs 41 steps to pass 20
        assert_eq!(steps, 41);
        assert!((shot.x - shot.origin_x).abs() <= MAX_TRAVEL + PLAYER_SPEED);
    }

    #[test]
    fn test_wall_collision_uses_rounded_cell() {
        let map = Map::from_rows(&["#####", "#...#", "#####"], 1);
        let mut shot = Projectile::player_shot(Position::new(3, 1), (1, 0), ItemKind::IceSpell);
        shot.advance();
        // x = 3.5 rounds to 4, which is a wall
        assert!(shot.hit_wall(&map));
    }

    #[test]
    fn test_auto_fire_turns() {
        assert!(is_auto_fire_turn(3));
        assert!(is_auto_fire_turn(9));
        assert!(!is_auto_fire_turn(4));
    }
}
