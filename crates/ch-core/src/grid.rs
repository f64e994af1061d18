//! Grid primitives: points and 8-way directions
//!
//! Everything that walks the map agrees on one neighbor enumeration order
//! (`DIRECTIONS`), so searches and tie-breaks come out identical run to run.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A cell position on the level grid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point one step away in the given direction
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance: moves needed with 8-way steps
    pub const fn chebyshev(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dx > dy { dx } else { dy }
    }

    /// Check if another point is one of this point's 8 neighbors
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.chebyshev(other) == 1
    }

    /// The 8 neighbors, in `DIRECTIONS` order
    pub fn neighbors(self) -> [Point; 8] {
        let mut out = [self; 8];
        let mut i = 0;
        while i < 8 {
            out[i] = self.step(DIRECTIONS[i]);
            i += 1;
        }
        out
    }
}

/// Movement directions: 8 compass points plus "no direction"
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    #[default]
    None,
}

/// Neighbor enumeration order used by every grid walk in the crate:
/// clockwise starting at north. Changing this order changes which of two
/// equal-length paths a search returns.
pub const DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

impl Direction {
    /// Get the delta (dx, dy) for this direction
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
            Direction::None => (0, 0),
        }
    }

    /// Get direction from delta values
    ///
    /// Returns `None` (the variant) for (0, 0) and `Option::None` for deltas
    /// outside the unit square.
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (1, -1) => Some(Direction::NorthEast),
            (1, 0) => Some(Direction::East),
            (1, 1) => Some(Direction::SouthEast),
            (0, 1) => Some(Direction::South),
            (-1, 1) => Some(Direction::SouthWest),
            (-1, 0) => Some(Direction::West),
            (-1, -1) => Some(Direction::NorthWest),
            (0, 0) => Some(Direction::None),
            _ => None,
        }
    }

    /// The direction pointing from `from` towards `to`, by unit deltas
    pub const fn towards(from: Point, to: Point) -> Self {
        let dx = (to.x - from.x).signum();
        let dy = (to.y - from.y).signum();
        match Self::from_delta(dx, dy) {
            Some(d) => d,
            // signum() keeps deltas in the unit square
            None => Direction::None,
        }
    }

    /// Get the opposite direction
    pub const fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::None => Direction::None,
        }
    }

    /// Rotate one compass step clockwise
    pub const fn clockwise(&self) -> Self {
        match self {
            Direction::North => Direction::NorthEast,
            Direction::NorthEast => Direction::East,
            Direction::East => Direction::SouthEast,
            Direction::SouthEast => Direction::South,
            Direction::South => Direction::SouthWest,
            Direction::SouthWest => Direction::West,
            Direction::West => Direction::NorthWest,
            Direction::NorthWest => Direction::North,
            Direction::None => Direction::None,
        }
    }

    /// Check if this is a cardinal direction (N/S/E/W)
    pub const fn is_cardinal(&self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }
}
