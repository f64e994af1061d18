//! Items: weapons, armor, helms, rings
//!
//! Weapons carry their enchantment as a flat (kind, bonus) pair; enchanting
//! is additive and preserves the kind, so equality and serialization stay
//! structural.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Weapon kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum WeaponKind {
    Sword,
    Axe,
    Dagger,
    Whip,
    Pick,
}

impl WeaponKind {
    /// Inclusive base damage range before enchantment
    pub const fn base_range(self) -> (i32, i32) {
        match self {
            WeaponKind::Sword => (2, 8),
            WeaponKind::Axe => (3, 9),
            WeaponKind::Dagger => (1, 4),
            WeaponKind::Whip => (1, 6),
            WeaponKind::Pick => (2, 5),
        }
    }

    /// Pick-class weapons can break through walls
    pub const fn digs_walls(self) -> bool {
        matches!(self, WeaponKind::Pick)
    }
}

/// A weapon instance: base kind plus accumulated enchantment bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub enchant: u32,
}

impl Weapon {
    /// A plain, unenchanted weapon
    pub const fn new(kind: WeaponKind) -> Self {
        Self { kind, enchant: 0 }
    }

    /// A weapon with an existing bonus
    pub const fn enchanted(kind: WeaponKind, enchant: u32) -> Self {
        Self { kind, enchant }
    }

    /// Add one level of enchantment. Enchanting an already-enchanted weapon
    /// increments the bonus; the kind never changes.
    pub const fn enchant(self) -> Self {
        Self {
            kind: self.kind,
            enchant: self.enchant + 1,
        }
    }

    /// Inclusive damage range with the enchantment bonus applied
    pub const fn damage_range(&self) -> (i32, i32) {
        let (lo, hi) = self.kind.base_range();
        (lo + self.enchant as i32, hi + self.enchant as i32)
    }

    /// Midpoint of the damage range, used for display and estimation
    pub const fn average_damage(&self) -> i32 {
        let (lo, hi) = self.damage_range();
        (lo + hi) / 2
    }
}

/// Armor kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ArmorKind {
    Leather,
    Chain,
    Plate,
}

impl ArmorKind {
    pub const fn defense(self) -> i32 {
        match self {
            ArmorKind::Leather => 1,
            ArmorKind::Chain => 2,
            ArmorKind::Plate => 3,
        }
    }
}

/// Helm kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum HelmKind {
    Cap,
    GreatHelm,
}

impl HelmKind {
    pub const fn defense(self) -> i32 {
        match self {
            HelmKind::Cap => 1,
            HelmKind::GreatHelm => 2,
        }
    }
}

/// Ring kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RingKind {
    /// +1 defense
    Guard,
    /// +1 attack
    Might,
    /// +2 vision radius
    Sight,
}

impl RingKind {
    pub const fn defense_bonus(self) -> i32 {
        match self {
            RingKind::Guard => 1,
            _ => 0,
        }
    }

    pub const fn attack_bonus(self) -> i32 {
        match self {
            RingKind::Might => 1,
            _ => 0,
        }
    }

    pub const fn vision_bonus(self) -> i32 {
        match self {
            RingKind::Sight => 2,
            _ => 0,
        }
    }
}

/// Anything that can sit on the floor or in the player's inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    Weapon(Weapon),
    Armor(ArmorKind),
    Helm(HelmKind),
    Ring(RingKind),
}

impl Item {
    /// Display glyph for the renderer layer
    pub const fn glyph(&self) -> char {
        match self {
            Item::Weapon(_) => ')',
            Item::Armor(_) => '[',
            Item::Helm(_) => ']',
            Item::Ring(_) => '=',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_enchant_is_additive_and_kind_preserving() {
        let sword = Weapon::new(WeaponKind::Sword);
        let twice = sword.enchant().enchant();
        assert_eq!(twice.kind, WeaponKind::Sword);
        assert_eq!(twice.enchant, 2);

        let (base_lo, base_hi) = sword.damage_range();
        let (lo, hi) = twice.damage_range();
        assert_eq!((lo, hi), (base_lo + 2, base_hi + 2));
    }

    #[test]
    fn test_enchant_from_existing_bonus() {
        let w = Weapon::enchanted(WeaponKind::Whip, 3).enchant();
        assert_eq!(w.enchant, 4);
        assert_eq!(w.kind, WeaponKind::Whip);
    }

    #[test]
    fn test_average_damage_is_range_midpoint() {
        let sword = Weapon::new(WeaponKind::Sword);
        assert_eq!(sword.average_damage(), 5); // (2 + 8) / 2
        assert_eq!(sword.enchant().average_damage(), 6);
    }

    #[test]
    fn test_all_ranges_are_ordered() {
        for kind in WeaponKind::iter() {
            let (lo, hi) = kind.base_range();
            assert!(lo >= 1);
            assert!(hi >= lo);
        }
    }

    #[test]
    fn test_only_pick_digs() {
        for kind in WeaponKind::iter() {
            assert_eq!(kind.digs_walls(), kind == WeaponKind::Pick);
        }
    }
}
