//! Room rectangles and greedy layout
//!
//! Candidates arrive pre-sampled from the caller's seed stream; layout
//! accepts them greedily in input order and rejects anything that would
//! touch an accepted room, including a 1-cell margin. Acceptance order is
//! input order, never re-sorted.

use serde::{Deserialize, Serialize};

use crate::grid::Point;

/// Margin kept clear around every accepted room
pub const ROOM_MARGIN: i32 = 1;

/// An axis-aligned room: origin corner plus extent. The outermost cells are
/// the room's wall border; everything inside is floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    /// Rightmost column (inclusive)
    pub const fn right(&self) -> i32 {
        self.origin.x + self.width - 1
    }

    /// Bottommost row (inclusive)
    pub const fn bottom(&self) -> i32 {
        self.origin.y + self.height - 1
    }

    pub const fn center(&self) -> Point {
        Point::new(self.origin.x + self.width / 2, self.origin.y + self.height / 2)
    }

    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x && p.x <= self.right() && p.y >= self.origin.y && p.y <= self.bottom()
    }

    /// Check if this room's rectangle, grown by `margin` on every side,
    /// intersects another room
    pub const fn overlaps_with_margin(&self, other: &Room, margin: i32) -> bool {
        !(self.right() + margin < other.origin.x
            || other.right() + margin < self.origin.x
            || self.bottom() + margin < other.origin.y
            || other.bottom() + margin < self.origin.y)
    }

    /// All border (wall) cells of the rectangle
    pub fn border_cells(&self) -> Vec<Point> {
        let mut cells = Vec::new();
        for x in self.origin.x..=self.right() {
            cells.push(Point::new(x, self.origin.y));
            cells.push(Point::new(x, self.bottom()));
        }
        for y in (self.origin.y + 1)..self.bottom() {
            cells.push(Point::new(self.origin.x, y));
            cells.push(Point::new(self.right(), y));
        }
        cells
    }

    /// All interior (floor) cells of the rectangle
    pub fn interior_cells(&self) -> Vec<Point> {
        let mut cells = Vec::new();
        for x in (self.origin.x + 1)..self.right() {
            for y in (self.origin.y + 1)..self.bottom() {
                cells.push(Point::new(x, y));
            }
        }
        cells
    }
}

/// Greedily accept candidate rooms in input order, rejecting any whose
/// rectangle plus margin overlaps a previously accepted room.
pub fn accept_rooms(candidates: &[Room]) -> Vec<Room> {
    let mut accepted: Vec<Room> = Vec::new();
    for candidate in candidates {
        if accepted
            .iter()
            .all(|r| !candidate.overlaps_with_margin(r, ROOM_MARGIN))
        {
            accepted.push(*candidate);
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_bounds() {
        let r = Room::new(2, 3, 5, 4);
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 6);
        assert_eq!(r.center(), Point::new(4, 5));
        assert!(r.contains(Point::new(2, 3)));
        assert!(r.contains(Point::new(6, 6)));
        assert!(!r.contains(Point::new(7, 6)));
    }

    #[test]
    fn test_interior_excludes_border() {
        let r = Room::new(0, 0, 4, 4);
        let interior = r.interior_cells();
        assert_eq!(interior.len(), 4);
        let border = r.border_cells();
        assert_eq!(border.len(), 12);
        for p in &interior {
            assert!(!border.contains(p));
        }
    }

    #[test]
    fn test_overlap_with_margin() {
        let a = Room::new(0, 0, 5, 5);
        // Touching a's right edge with one empty column between violates
        // the margin; two empty columns is fine.
        let adjacent = Room::new(6, 0, 5, 5);
        let clear = Room::new(7, 0, 5, 5);
        assert!(a.overlaps_with_margin(&adjacent, ROOM_MARGIN));
        assert!(!a.overlaps_with_margin(&clear, ROOM_MARGIN));
    }

    #[test]
    fn test_accept_keeps_input_order() {
        let candidates = [
            Room::new(0, 0, 5, 5),
            Room::new(2, 2, 5, 5),  // overlaps the first
            Room::new(10, 0, 5, 5),
            Room::new(10, 2, 4, 4), // overlaps the third
            Room::new(0, 10, 6, 5),
        ];
        let accepted = accept_rooms(&candidates);
        assert_eq!(accepted.len(), 3);
        assert_eq!(accepted[0], candidates[0]);
        assert_eq!(accepted[1], candidates[2]);
        assert_eq!(accepted[2], candidates[4]);
    }

    #[test]
    fn test_accept_empty() {
        assert!(accept_rooms(&[]).is_empty());
    }
}
