//! Enemy turn order
//!
//! Enemies act in the order they were spawned. Summons join the end of the
//! roster and act in the same pass; removals keep the pass cursor on the
//! next entity in line.

use hecs::Entity;

/// Ordered roster of living enemies with a cursor for the current pass
#[derive(Debug, Clone, Default)]
pub struct TurnOrder {
    /// Entities in acting order
    roster: Vec<Entity>,
    /// Index of the next entity to act in the current pass
    cursor: usize,
}

impl TurnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the roster, e.g. on level entry
    pub fn reset(&mut self, roster: Vec<Entity>) {
        self.roster = roster;
        self.cursor = 0;
    }

    /// Append an entity to the end of the order
    pub fn push(&mut self, entity: Entity) {
        self.roster.push(entity);
    }

    /// Start a new pass from the front of the roster
    pub fn begin_pass(&mut self) {
        self.cursor = 0;
    }

    /// The next entity to act in this pass, if any
    pub fn next_actor(&mut self) -> Option<Entity> {
        let entity = self.roster.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(entity)
    }

    /// Remove an entity (died, etc.)
    pub fn remove(&mut self, entity: Entity) {
        if let Some(pos) = self.roster.iter().position(|&e| e == entity) {
            self.roster.remove(pos);
            // Keep the cursor pointing at the same next actor
            if pos < self.cursor {
                self.cursor -= 1;
            }
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.roster.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Living enemies in acting order
    pub fn entities(&self) -> &[Entity] {
        &self.roster
    }
}
