//! Combat resolution: threat geometry and damage arithmetic
//!
//! Enchantment shifts damage, never geometry. Rolls go through the two-seed
//! deterministic sample so a replayed turn deals the same damage.

use crate::grid::{Direction, Point};
use crate::object::{Weapon, WeaponKind};
use crate::rng::sample_in_range;

/// Inclusive damage range for unarmed strikes
pub const UNARMED_RANGE: (i32, i32) = (1, 3);

/// How far a whip reaches along the facing line
const WHIP_REACH: i32 = 3;

/// The cells a weapon threatens from `origin` while facing `facing`.
///
/// Sword, dagger and pick strike the single cell directly ahead, as does an
/// empty hand. The axe sweeps all 8 adjacent cells regardless of facing.
/// The whip reaches 1, 2 and 3 cells directly ahead and can strike a
/// creature on each.
pub fn threat_cells(weapon: Option<WeaponKind>, origin: Point, facing: Direction) -> Vec<Point> {
    match weapon {
        Some(WeaponKind::Axe) => origin.neighbors().to_vec(),
        Some(WeaponKind::Whip) => {
            if facing == Direction::None {
                return Vec::new();
            }
            let mut cells = Vec::with_capacity(WHIP_REACH as usize);
            let mut p = origin;
            for _ in 0..WHIP_REACH {
                p = p.step(facing);
                cells.push(p);
            }
            cells
        }
        _ => {
            if facing == Direction::None {
                Vec::new()
            } else {
                vec![origin.step(facing)]
            }
        }
    }
}

/// Roll damage for the weapon (or bare hands) from two replay seeds
pub fn rolled_damage(weapon: Option<&Weapon>, seed_a: u64, seed_b: u64) -> i32 {
    let (lo, hi) = weapon.map_or(UNARMED_RANGE, Weapon::damage_range);
    sample_in_range(seed_a, seed_b, lo, hi)
}

/// Midpoint damage, for display and estimation rather than resolution
pub fn average_damage(weapon: Option<&Weapon>) -> i32 {
    match weapon {
        Some(w) => w.average_damage(),
        None => (UNARMED_RANGE.0 + UNARMED_RANGE.1) / 2,
    }
}

/// Damage actually dealt after the target's defense, never negative
pub const fn dealt_damage(roll: i32, defense: i32) -> i32 {
    let dealt = roll - defense;
    if dealt > 0 { dealt } else { 0 }
}
