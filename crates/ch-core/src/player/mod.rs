//! The player character

use serde::{Deserialize, Serialize};

use crate::grid::Point;
use crate::object::{ArmorKind, HelmKind, Item, RingKind, Weapon};

/// The warrior exploring the halls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warrior {
    // Position
    pub pos: Point,

    // Health
    pub hp: i32,
    pub max_hp: i32,

    // Wealth
    pub gold: u32,

    // Equipment
    pub weapon: Option<Weapon>,
    pub armor: Option<ArmorKind>,
    pub helm: Option<HelmKind>,
    pub ring: Option<RingKind>,

    /// Carried items; capacity is enforced by the world, not here
    pub inventory: Vec<Item>,

    /// Cells moved over the whole run
    pub steps: u64,
}

impl Warrior {
    pub fn new(pos: Point, max_hp: i32) -> Self {
        Self {
            pos,
            hp: max_hp,
            max_hp,
            gold: 0,
            weapon: None,
            armor: None,
            helm: None,
            ring: None,
            inventory: Vec::new(),
            steps: 0,
        }
    }

    /// Total defense from equipment
    pub fn defense(&self) -> i32 {
        self.armor.map_or(0, ArmorKind::defense)
            + self.helm.map_or(0, HelmKind::defense)
            + self.ring.map_or(0, RingKind::defense_bonus)
    }

    /// Attack bonus from equipment, added on top of the weapon roll
    pub fn attack_bonus(&self) -> i32 {
        self.ring.map_or(0, RingKind::attack_bonus)
    }

    /// Vision radius bonus from equipment
    pub fn vision_bonus(&self) -> i32 {
        self.ring.map_or(0, RingKind::vision_bonus)
    }

    /// Whether the equipped weapon can break walls
    pub fn can_dig(&self) -> bool {
        self.weapon.is_some_and(|w| w.kind.digs_walls())
    }

    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
