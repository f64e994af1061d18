//! Creatures and their archetypes
//!
//! Creatures are owned by value inside their level's creature list and
//! addressed by a stable id; there are no back-references to the level.
//! Their AI is a directional walk: keep going the way you face, attack the
//! player if they stand in that cell, turn when blocked.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::grid::{Direction, Point, DIRECTIONS};

/// Stable creature identifier, unique for the creature's lifetime
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CreatureId(pub u32);

/// Creature archetypes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum CreatureKind {
    Rat,
    Bat,
    Goblin,
    Orc,
    Wraith,
}

impl CreatureKind {
    pub const fn base_hp(self) -> i32 {
        match self {
            CreatureKind::Rat => 4,
            CreatureKind::Bat => 3,
            CreatureKind::Goblin => 6,
            CreatureKind::Orc => 9,
            CreatureKind::Wraith => 12,
        }
    }

    pub const fn attack(self) -> i32 {
        match self {
            CreatureKind::Rat => 2,
            CreatureKind::Bat => 1,
            CreatureKind::Goblin => 3,
            CreatureKind::Orc => 4,
            CreatureKind::Wraith => 5,
        }
    }

    pub const fn defense(self) -> i32 {
        match self {
            CreatureKind::Rat => 0,
            CreatureKind::Bat => 0,
            CreatureKind::Goblin => 1,
            CreatureKind::Orc => 2,
            CreatureKind::Wraith => 2,
        }
    }

    /// Display glyph for the renderer layer
    pub const fn glyph(self) -> char {
        match self {
            CreatureKind::Rat => 'r',
            CreatureKind::Bat => 'b',
            CreatureKind::Goblin => 'g',
            CreatureKind::Orc => 'o',
            CreatureKind::Wraith => 'W',
        }
    }
}

/// Archetype selection: a deterministic function of (room index, depth).
///
/// Pluggable so callers can swap in a richer spawn table.
pub type ArchetypePicker = fn(room_index: usize, depth: usize) -> CreatureKind;

/// Default spawn table: cycles archetypes by room index, shifted by depth so
/// deeper levels lead with tougher kinds.
pub fn default_archetype(room_index: usize, depth: usize) -> CreatureKind {
    const TABLE: [CreatureKind; 5] = [
        CreatureKind::Rat,
        CreatureKind::Bat,
        CreatureKind::Goblin,
        CreatureKind::Orc,
        CreatureKind::Wraith,
    ];
    TABLE[(room_index + depth) % TABLE.len()]
}

/// A creature on a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub kind: CreatureKind,
    pub pos: Point,
    /// Current walk direction; rotates clockwise when the way is blocked
    pub facing: Direction,
    pub hp: i32,
    pub max_hp: i32,
}

impl Creature {
    /// Spawn a creature of the given kind, with hit points scaled by depth.
    /// The id is assigned when the creature is added to a level.
    pub fn spawn(kind: CreatureKind, pos: Point, room_index: usize, depth: usize) -> Self {
        let max_hp = kind.base_hp() + depth as i32;
        Self {
            id: CreatureId(0),
            kind,
            pos,
            facing: DIRECTIONS[(room_index + depth) % DIRECTIONS.len()],
            hp: max_hp,
            max_hp,
        }
    }

    pub const fn attack(&self) -> i32 {
        self.kind.attack()
    }

    pub const fn defense(&self) -> i32 {
        self.kind.defense()
    }

    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_archetype_is_deterministic() {
        assert_eq!(default_archetype(0, 0), default_archetype(0, 0));
        assert_eq!(default_archetype(0, 0), CreatureKind::Rat);
        assert_eq!(default_archetype(0, 1), default_archetype(1, 0));
    }

    #[test]
    fn test_spawn_scales_hp_with_depth() {
        let shallow = Creature::spawn(CreatureKind::Goblin, Point::new(1, 1), 0, 0);
        let deep = Creature::spawn(CreatureKind::Goblin, Point::new(1, 1), 0, 4);
        assert_eq!(deep.max_hp, shallow.max_hp + 4);
        assert_eq!(deep.hp, deep.max_hp);
    }

    #[test]
    fn test_spawn_facing_never_none() {
        for room in 0..10 {
            for depth in 0..5 {
                let c = Creature::spawn(CreatureKind::Rat, Point::new(0, 0), room, depth);
                assert_ne!(c.facing, Direction::None);
            }
        }
    }
}
