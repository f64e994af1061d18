//! Dungeon structure and procedural generation

pub mod corridor;
pub mod generation;
pub mod level;
pub mod room;

pub use corridor::ConnectivityTracker;
pub use level::{Entrance, FloorItem, Level, Pedestal};
pub use room::{accept_rooms, Room, ROOM_MARGIN};

use serde::{Deserialize, Serialize};

use crate::monster::{default_archetype, ArchetypePicker};
use crate::rng::GameRng;
use crate::world::GameConfig;

/// The full multi-level dungeon. The level list is fixed once generated;
/// levels themselves are mutated in place as play progresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    levels: Vec<Level>,
}

impl Dungeon {
    /// Generate the whole dungeon from a seed using the default archetype
    /// table
    pub fn generate(config: &GameConfig, seed: u64) -> Self {
        Self::generate_with(config, seed, default_archetype)
    }

    /// Generate with a caller-supplied archetype picker
    pub fn generate_with(config: &GameConfig, seed: u64, picker: ArchetypePicker) -> Self {
        let mut rng = GameRng::new(seed);
        let levels = (0..config.level_count)
            .map(|depth| generation::build_level(depth, config, &mut rng, picker))
            .collect();
        Self { levels }
    }

    /// Assemble a dungeon from pre-built levels, for tooling and tests
    /// that lay terrain out by hand
    pub fn from_levels(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// Level at the given depth; depths are kept in range by the world
    pub fn level(&self, depth: usize) -> &Level {
        &self.levels[depth]
    }

    pub fn level_mut(&mut self, depth: usize) -> &mut Level {
        &mut self.levels[depth]
    }

    pub fn get(&self, depth: usize) -> Option<&Level> {
        self.levels.get(depth)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn levels_mut(&mut self) -> impl Iterator<Item = &mut Level> {
        self.levels.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_requested_depths() {
        let config = GameConfig::default();
        let dungeon = Dungeon::generate(&config, 42);
        assert_eq!(dungeon.level_count(), config.level_count);

        // Topmost level has the entrance, deepest has the pedestal, middle
        // levels have both stairs.
        assert!(dungeon.level(0).entrance.is_some());
        assert!(dungeon.level(config.level_count - 1).pedestal.is_some());
        for depth in 1..config.level_count - 1 {
            assert!(dungeon.level(depth).upstairs.is_some());
            assert!(dungeon.level(depth).downstairs.is_some());
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = GameConfig::default();
        assert_eq!(
            Dungeon::generate(&config, 1234),
            Dungeon::generate(&config, 1234)
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let config = GameConfig::default();
        assert_ne!(
            Dungeon::generate(&config, 1),
            Dungeon::generate(&config, 2)
        );
    }
}
