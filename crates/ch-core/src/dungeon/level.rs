//! Level structure
//!
//! Terrain is stored as point sets. A point belongs to at most one of
//! walls / floors / doors; the setters below maintain that exclusivity.
//! Coins overlay floor cells. The `viewed` set is memory: it only ever
//! grows, and survives the player leaving and returning.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::grid::Point;
use crate::monster::{Creature, CreatureId};
use crate::object::Item;

/// The sealed way out of the halls, on depth 0. Opens once the artifact is
/// taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrance {
    pub at: Point,
    pub opened: bool,
}

/// The artifact pedestal on the deepest level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pedestal {
    pub at: Point,
    pub taken: bool,
}

/// An item lying on a floor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorItem {
    pub pos: Point,
    pub item: Item,
}

/// A single dungeon level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    walls: HashSet<Point>,
    floors: HashSet<Point>,
    doors: HashSet<Point>,
    coins: HashSet<Point>,

    /// Creatures owned by value, addressed by stable id
    pub creatures: Vec<Creature>,

    /// Items on the floor
    pub items: Vec<FloorItem>,

    /// Every cell ever illuminated here; grows monotonically
    viewed: HashSet<Point>,

    /// Exactly one of {upstairs, entrance} and one of {downstairs,
    /// pedestal} is set, chosen by depth at generation time
    pub upstairs: Option<Point>,
    pub downstairs: Option<Point>,
    pub entrance: Option<Entrance>,
    pub pedestal: Option<Pedestal>,

    next_creature_id: u32,
}

impl Level {
    pub fn new() -> Self {
        Self {
            next_creature_id: 1,
            ..Self::default()
        }
    }

    // --- terrain ---

    /// Make `p` a wall, removing it from every other category
    pub fn set_wall(&mut self, p: Point) {
        self.floors.remove(&p);
        self.doors.remove(&p);
        self.coins.remove(&p);
        self.walls.insert(p);
    }

    /// Make `p` a floor cell, removing it from every other category
    pub fn set_floor(&mut self, p: Point) {
        self.walls.remove(&p);
        self.doors.remove(&p);
        self.floors.insert(p);
    }

    /// Make `p` a door, removing it from every other category
    pub fn set_door(&mut self, p: Point) {
        self.walls.remove(&p);
        self.floors.remove(&p);
        self.coins.remove(&p);
        self.doors.insert(p);
    }

    pub fn is_wall(&self, p: Point) -> bool {
        self.walls.contains(&p)
    }

    pub fn is_floor(&self, p: Point) -> bool {
        self.floors.contains(&p)
    }

    pub fn is_door(&self, p: Point) -> bool {
        self.doors.contains(&p)
    }

    /// Check if the cell can be walked on
    pub fn is_passable(&self, p: Point) -> bool {
        self.floors.contains(&p) || self.doors.contains(&p)
    }

    /// Check if the cell blocks line of sight. Creatures block sight too,
    /// so the visibility pass can't see through an occupied cell.
    pub fn blocks_sight(&self, p: Point) -> bool {
        self.walls.contains(&p) || self.doors.contains(&p) || self.creature_at(p).is_some()
    }

    /// Surround `p` with walls wherever no terrain has been carved yet
    pub fn fence_walls_around(&mut self, p: Point) {
        for n in p.neighbors() {
            if !self.is_passable(n) {
                self.set_wall(n);
            }
        }
    }

    pub fn walls(&self) -> &HashSet<Point> {
        &self.walls
    }

    pub fn floors(&self) -> &HashSet<Point> {
        &self.floors
    }

    pub fn doors(&self) -> &HashSet<Point> {
        &self.doors
    }

    // --- coins ---

    pub fn add_coin(&mut self, p: Point) {
        if self.floors.contains(&p) {
            self.coins.insert(p);
        }
    }

    pub fn has_coin(&self, p: Point) -> bool {
        self.coins.contains(&p)
    }

    /// Remove and report the coin at `p`
    pub fn take_coin(&mut self, p: Point) -> bool {
        self.coins.remove(&p)
    }

    pub fn coins(&self) -> &HashSet<Point> {
        &self.coins
    }

    // --- creatures ---

    /// Add a creature, assigning it the next stable id
    pub fn add_creature(&mut self, mut creature: Creature) -> CreatureId {
        let id = CreatureId(self.next_creature_id);
        self.next_creature_id += 1;
        creature.id = id;
        self.creatures.push(creature);
        id
    }

    pub fn creature_at(&self, p: Point) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.pos == p)
    }

    pub fn creature_at_mut(&mut self, p: Point) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.pos == p)
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    /// Remove every creature with hp <= 0, preserving the relative order of
    /// survivors. Returns the removed creatures in their original order.
    pub fn purge_dead(&mut self) -> Vec<Creature> {
        let mut removed = Vec::new();
        self.creatures.retain(|c| {
            if c.is_alive() {
                true
            } else {
                removed.push(*c);
                false
            }
        });
        removed
    }

    // --- items ---

    pub fn item_at(&self, p: Point) -> Option<&FloorItem> {
        self.items.iter().find(|i| i.pos == p)
    }

    pub fn add_item(&mut self, pos: Point, item: Item) {
        if self.floors.contains(&pos) {
            self.items.push(FloorItem { pos, item });
        }
    }

    /// Remove and return the item at `p`
    pub fn take_item(&mut self, p: Point) -> Option<Item> {
        let idx = self.items.iter().position(|i| i.pos == p)?;
        Some(self.items.remove(idx).item)
    }

    // --- memory ---

    /// Fold an illuminated set into the level's memory
    pub fn mark_viewed(&mut self, lit: &HashSet<Point>) {
        self.viewed.extend(lit);
    }

    pub fn is_viewed(&self, p: Point) -> bool {
        self.viewed.contains(&p)
    }

    pub fn viewed(&self) -> &HashSet<Point> {
        &self.viewed
    }

    // --- special points ---

    /// The level's "up" endpoint: upstairs, or the entrance on depth 0
    pub fn up_point(&self) -> Option<Point> {
        self.upstairs.or(self.entrance.map(|e| e.at))
    }

    /// The level's "down" endpoint: downstairs, or the pedestal on the
    /// deepest level
    pub fn down_point(&self) -> Option<Point> {
        self.downstairs.or(self.pedestal.map(|p| p.at))
    }

    /// First floor cell in (y, x) scan order; the documented fallback when
    /// a stairwell is unexpectedly missing
    pub fn fallback_floor(&self) -> Point {
        self.floors
            .iter()
            .min_by_key(|p| (p.y, p.x))
            .copied()
            .unwrap_or(Point::new(0, 0))
    }
}
