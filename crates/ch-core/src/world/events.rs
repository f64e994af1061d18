//! Events emitted by turn resolution
//!
//! The ordered event list is the engine's only output channel besides the
//! mutated state; the excluded journal/log layer renders these however it
//! likes.

use serde::{Deserialize, Serialize};

use crate::monster::CreatureId;
use crate::object::Item;

/// One observable consequence of a player action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The player struck a creature
    Attack { target: CreatureId, damage: i32 },

    /// A creature struck the player
    Defend { attacker: CreatureId, damage: i32 },

    /// A coin was collected; carries the new total
    PickupCoin { total_gold: u32 },

    /// An item was collected into the inventory
    PickupItem { item: Item },

    /// A creature died and was purged
    Kill { creature: CreatureId },

    /// The player died; the run is over
    PlayerDied,

    /// The player climbed to a shallower level
    Ascended { depth: usize },

    /// The player descended to a deeper level
    Descended { depth: usize },

    /// The crystal was lifted from its pedestal
    ArtifactTaken,

    /// The player left the halls through the opened entrance; victory
    HallsEscaped,
}
