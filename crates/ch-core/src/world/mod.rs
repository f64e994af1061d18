//! Dungeon state and the turn protocol
//!
//! [`World`] owns the generated dungeon, the current depth and the player,
//! and resolves one discrete action at a time. Each action mutates the
//! world in a fixed order and returns the events it produced; given the
//! same seed and the same action sequence, states and events replay
//! identically.

pub mod config;
pub mod events;

pub use config::{ConfigError, GameConfig};
pub use events::Event;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::combat;
use crate::consts::PLAYER_MAX_HP;
use crate::dungeon::{Dungeon, Level};
use crate::grid::{Direction, Point};
use crate::monster::CreatureId;
use crate::object::Item;
use crate::path;
use crate::player::Warrior;
use crate::vision;

/// Discrete player actions fed in by the external driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Step, dig, or attack in a direction
    Move(Direction),
    /// Let the turn pass
    Wait,
    /// Equip the inventory item in the given slot
    UseItem(usize),
}

/// What occupies a cell, for the renderer's queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Player,
    Creature(CreatureId),
    Item(Item),
    Coin,
}

/// Top-level coordinator: dungeon, depth, player, turn resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    dungeon: Dungeon,
    depth: usize,
    pub player: Warrior,
    config: GameConfig,

    /// Total accepted actions; drives the evolve cadence
    age: u64,

    /// Cells lit this frame; recomputed after every action
    #[serde(skip)]
    illuminated: HashSet<Point>,

    game_over: bool,
    escaped: bool,
}

impl World {
    /// Generate a dungeon from the seed and drop the player at the sealed
    /// entrance of the topmost level
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let dungeon = Dungeon::generate(&config, seed);
        Self::from_parts(config, dungeon)
    }

    /// Assemble a world around a pre-built dungeon. Generation goes through
    /// this too; it is public for tooling and tests that lay levels out by
    /// hand.
    pub fn from_parts(config: GameConfig, dungeon: Dungeon) -> Result<Self, ConfigError> {
        config.validate()?;
        let first = dungeon.level(0);
        let start = first.up_point().unwrap_or_else(|| first.fallback_floor());
        let mut world = Self {
            dungeon,
            depth: 0,
            player: Warrior::new(start, PLAYER_MAX_HP),
            config,
            age: 0,
            illuminated: HashSet::new(),
            game_over: false,
            escaped: false,
        };
        world.refresh_visibility();
        Ok(world)
    }

    // --- accessors ---

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn current_level(&self) -> &Level {
        self.dungeon.level(self.depth)
    }

    fn current_level_mut(&mut self) -> &mut Level {
        self.dungeon.level_mut(self.depth)
    }

    /// The run has ended, by death or escape
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// The run ended in victory
    pub fn has_escaped(&self) -> bool {
        self.escaped
    }

    // --- turn resolution ---

    /// Resolve one player action and return the events it produced. After
    /// the run ends no further actions are accepted; the result is empty.
    pub fn apply_action(&mut self, action: Action) -> Vec<Event> {
        let mut events = Vec::new();
        if self.game_over {
            return events;
        }

        match action {
            Action::Move(dir) if dir != Direction::None => self.move_player(dir, &mut events),
            Action::Move(_) | Action::Wait => {}
            Action::UseItem(slot) => self.use_item(slot),
        }

        self.age += 1;
        if self.age % self.config.evolve_every == 0 {
            self.evolve();
        }

        if !self.game_over {
            self.creatures_act(&mut events);
            self.purge(&mut events);
            if !self.player.is_alive() {
                events.push(Event::PlayerDied);
                self.game_over = true;
            }
        }

        self.refresh_visibility();
        events
    }

    /// Steps 1-3 of the resolution order: dig, attack, or move
    fn move_player(&mut self, dir: Direction, events: &mut Vec<Event>) {
        let dest = self.player.pos.step(dir);

        // 1. Pick-class weapons tunnel through walls; the dig is the move.
        if self.current_level().is_wall(dest) && self.player.can_dig() {
            self.current_level_mut().set_floor(dest);
            self.player.pos = dest;
            self.player.steps += 1;
            return;
        }

        // 2. Anything standing in threat range turns the move into an
        // attack; the player stays put.
        let kind = self.player.weapon.map(|w| w.kind);
        let threat = combat::threat_cells(kind, self.player.pos, dir);
        let target_present = self.current_level().creature_at(dest).is_some()
            || threat
                .iter()
                .any(|&p| self.current_level().creature_at(p).is_some());
        if target_present {
            self.attack(&threat, events);
            return;
        }

        // 3. Plain move, then whatever the destination holds.
        if !self.current_level().is_passable(dest) {
            return;
        }
        self.player.pos = dest;
        self.player.steps += 1;
        self.resolve_tile(dest, events);
    }

    /// Strike every creature in the threatened cells, each resolved
    /// independently
    fn attack(&mut self, threat: &[Point], events: &mut Vec<Event>) {
        let weapon = self.player.weapon;
        let bonus = self.player.attack_bonus();
        let age = self.age;
        let level = self.current_level_mut();
        for &cell in threat {
            if let Some(creature) = level.creature_at_mut(cell) {
                let roll =
                    combat::rolled_damage(weapon.as_ref(), age, creature.id.0 as u64) + bonus;
                let damage = combat::dealt_damage(roll, creature.defense());
                creature.hp -= damage;
                events.push(Event::Attack {
                    target: creature.id,
                    damage,
                });
            }
        }
    }

    /// Transitions, coins and items on the cell the player just entered
    fn resolve_tile(&mut self, dest: Point, events: &mut Vec<Event>) {
        let level = self.current_level();
        if level.downstairs == Some(dest) {
            self.descend(events);
            return;
        }
        if level.upstairs == Some(dest) {
            self.ascend(events);
            return;
        }
        if let Some(pedestal) = level.pedestal {
            if pedestal.at == dest && !pedestal.taken {
                self.take_artifact(events);
            }
        }
        if let Some(entrance) = self.current_level().entrance {
            if entrance.at == dest && entrance.opened {
                events.push(Event::HallsEscaped);
                self.escaped = true;
                self.game_over = true;
                return;
            }
        }

        if self.current_level_mut().take_coin(dest) {
            self.player.gold += 1;
            events.push(Event::PickupCoin {
                total_gold: self.player.gold,
            });
        }

        if self.current_level().item_at(dest).is_some()
            && self.player.inventory.len() < self.config.inventory_capacity
        {
            if let Some(item) = self.current_level_mut().take_item(dest) {
                self.player.inventory.push(item);
                events.push(Event::PickupItem { item });
            }
        }
    }

    /// Move down one level, landing on the destination's up stairwell
    fn descend(&mut self, events: &mut Vec<Event>) {
        let next = self.depth + 1;
        if next >= self.dungeon.level_count() {
            return;
        }
        self.depth = next;
        let landing = {
            let level = self.current_level();
            level.up_point().unwrap_or_else(|| level.fallback_floor())
        };
        self.player.pos = landing;
        events.push(Event::Descended { depth: self.depth });
    }

    /// Move up one level, landing on the destination's down stairwell
    fn ascend(&mut self, events: &mut Vec<Event>) {
        let Some(prev) = self.depth.checked_sub(1) else {
            return;
        };
        self.depth = prev;
        let landing = {
            let level = self.current_level();
            level.down_point().unwrap_or_else(|| level.fallback_floor())
        };
        self.player.pos = landing;
        events.push(Event::Ascended { depth: self.depth });
    }

    /// Lift the crystal and unseal the entrance up on the surface level
    fn take_artifact(&mut self, events: &mut Vec<Event>) {
        if let Some(pedestal) = self.current_level_mut().pedestal.as_mut() {
            pedestal.taken = true;
        }
        if let Some(entrance) = self.dungeon.level_mut(0).entrance.as_mut() {
            entrance.opened = true;
        }
        events.push(Event::ArtifactTaken);
    }

    /// Equip an inventory item, swapping out whatever held the slot
    fn use_item(&mut self, slot: usize) {
        if slot >= self.player.inventory.len() {
            return;
        }
        let item = self.player.inventory.remove(slot);
        let replaced = match item {
            Item::Weapon(w) => self.player.weapon.replace(w).map(Item::Weapon),
            Item::Armor(a) => self.player.armor.replace(a).map(Item::Armor),
            Item::Helm(h) => self.player.helm.replace(h).map(Item::Helm),
            Item::Ring(r) => self.player.ring.replace(r).map(Item::Ring),
        };
        if let Some(previous) = replaced {
            self.player.inventory.insert(slot, previous);
        }
    }

    /// Step 4: every living creature on the current level walks its facing
    /// direction, attacks the player if they stand there, or turns when
    /// blocked
    fn creatures_act(&mut self, events: &mut Vec<Event>) {
        let player_pos = self.player.pos;
        let defense = self.player.defense();
        let mut hits: Vec<(CreatureId, i32)> = Vec::new();

        let level = self.current_level_mut();
        for i in 0..level.creatures.len() {
            let (pos, facing, id, attack) = {
                let c = &level.creatures[i];
                (c.pos, c.facing, c.id, c.attack())
            };
            if !level.creatures[i].is_alive() || facing == Direction::None {
                continue;
            }
            let dest = pos.step(facing);
            if dest == player_pos {
                hits.push((id, combat::dealt_damage(attack, defense)));
            } else if !level.is_passable(dest) || level.creature_at(dest).is_some() {
                // Blocked: hold position, turn to resume the walk next turn.
                level.creatures[i].facing = facing.clockwise();
            } else {
                level.creatures[i].pos = dest;
            }
        }

        for (attacker, damage) in hits {
            self.player.hp -= damage;
            events.push(Event::Defend { attacker, damage });
        }
    }

    /// Step 5: drop every creature with no hit points left, one kill event
    /// each, survivors keeping their order
    fn purge(&mut self, events: &mut Vec<Event>) {
        for creature in self.current_level_mut().purge_dead() {
            events.push(Event::Kill {
                creature: creature.id,
            });
        }
    }

    /// World-aging hook: wounded creatures everywhere knit back one hit
    /// point
    fn evolve(&mut self) {
        for level in self.dungeon.levels_mut() {
            for creature in &mut level.creatures {
                if creature.is_alive() && creature.hp < creature.max_hp {
                    creature.hp += 1;
                }
            }
        }
    }

    /// Recompute the illuminated set from the player's position and fold it
    /// into the level's memory
    fn refresh_visibility(&mut self) {
        let power = self.config.vision_radius + self.player.vision_bonus();
        let source = self.player.pos;
        let (view_w, view_h) = (self.config.view_width, self.config.view_height);
        let lit = {
            let level = self.current_level();
            vision::illuminated(source, power, view_w, view_h, |p| level.blocks_sight(p))
        };
        self.current_level_mut().mark_viewed(&lit);
        self.illuminated = lit;
    }

    // --- query surface ---

    /// What occupies the cell, if anything
    pub fn entity_at(&self, p: Point) -> Option<Occupant> {
        if self.player.pos == p {
            return Some(Occupant::Player);
        }
        let level = self.current_level();
        if let Some(creature) = level.creature_at(p) {
            return Some(Occupant::Creature(creature.id));
        }
        if let Some(floor_item) = level.item_at(p) {
            return Some(Occupant::Item(floor_item.item));
        }
        if level.has_coin(p) {
            return Some(Occupant::Coin);
        }
        None
    }

    /// Check if a cell cannot be walked onto this turn
    pub fn is_blocked(&self, p: Point) -> bool {
        let level = self.current_level();
        !level.is_passable(p) || level.creature_at(p).is_some()
    }

    /// Shortest walkable route on the current level, for click-to-move and
    /// auto-explore. Empty when no route exists; callers treat that as
    /// "nothing to do this turn".
    pub fn find_path(&self, src: Point, dst: Point) -> Vec<Point> {
        path::seek(dst, src, |p| {
            if p == dst {
                !self.current_level().is_passable(p)
            } else {
                self.is_blocked(p)
            }
        })
    }

    /// Cells lit this frame
    pub fn illuminated_set(&self) -> &HashSet<Point> {
        &self.illuminated
    }

    /// Every cell ever seen on the given level. The "reveal all explored"
    /// debug view reads this; nothing ever filters it down.
    pub fn viewed_set(&self, depth: usize) -> Option<&HashSet<Point>> {
        self.dungeon.get(depth).map(|level| level.viewed())
    }
}
