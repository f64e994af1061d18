//! Corridor network
//!
//! Connects the accepted rooms into one walkable component. Adjacent room
//! pairs are joined first, then remaining pairs are swept until every
//! equivalence class merges. Each corridor is carved straight out of a room
//! edge; the exit coordinate is a pure function of both rooms' geometry, so
//! the same room list always produces the same corridors.

use crate::grid::{Direction, Point};
use crate::path;
use crate::rng::geometry_hash;

use super::level::Level;
use super::room::Room;

/// Step budget multiplier over the rooms' center distance
const BUDGET_FACTOR: i32 = 3;

/// Tracks room connectivity using equivalence classes
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    /// Each room's equivalence class; rooms in the same class are connected
    classes: Vec<usize>,
}

impl ConnectivityTracker {
    /// Create a new tracker with each room in its own class
    pub fn new(num_rooms: usize) -> Self {
        Self {
            classes: (0..num_rooms).collect(),
        }
    }

    /// Check if two rooms are in the same equivalence class
    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        if a >= self.classes.len() || b >= self.classes.len() {
            return false;
        }
        self.classes[a] == self.classes[b]
    }

    /// Merge equivalence classes when rooms are joined
    pub fn merge(&mut self, a: usize, b: usize) {
        if a >= self.classes.len() || b >= self.classes.len() {
            return;
        }
        let old_class = self.classes[b];
        let new_class = self.classes[a];
        for class in &mut self.classes {
            if *class == old_class {
                *class = new_class;
            }
        }
    }

    /// Check if all rooms share one class
    pub fn all_connected(&self) -> bool {
        self.classes.windows(2).all(|w| w[0] == w[1])
    }
}

/// Join every room into one component: adjacent pairs first, then sweep all
/// remaining pairs until the classes merge or no join makes progress.
pub fn connect_rooms(level: &mut Level, rooms: &[Room]) {
    let mut tracker = ConnectivityTracker::new(rooms.len());

    for i in 1..rooms.len() {
        if carve_corridor(level, &rooms[i - 1], &rooms[i]) {
            tracker.merge(i - 1, i);
        }
    }

    let mut progress = true;
    while !tracker.all_connected() && progress {
        progress = false;
        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                if !tracker.are_connected(i, j) && carve_corridor(level, &rooms[i], &rooms[j]) {
                    tracker.merge(i, j);
                    progress = true;
                }
            }
        }
    }

    ensure_connected(level, rooms);
}

/// Verify actual floor connectivity and force-carve a route for any room the
/// corridor sweep left stranded. Class merges are optimistic (a corridor may
/// land in a third room's floor), so this pass checks the terrain itself.
fn ensure_connected(level: &mut Level, rooms: &[Room]) {
    if rooms.len() < 2 {
        return;
    }
    let anchor = rooms[0].center();
    for _ in 0..rooms.len() {
        let stranded = rooms.iter().enumerate().skip(1).find(|(_, room)| {
            path::seek(room.center(), anchor, |p| !level.is_passable(p)).is_empty()
        });
        let Some((i, _)) = stranded else {
            return;
        };
        carve_route(level, &rooms[i], &rooms[0], false);
    }
}

/// Carve a corridor from `a` towards `b`. Returns true if the corridor
/// reached existing floor.
pub fn carve_corridor(level: &mut Level, a: &Room, b: &Room) -> bool {
    carve_route(level, a, b, true)
}

fn carve_route(level: &mut Level, a: &Room, b: &Room, stop_on_floor: bool) -> bool {
    let dir = cardinal_towards(a, b);
    if dir == Direction::None {
        return false;
    }
    let budget = a.center().chebyshev(b.center()) * BUDGET_FACTOR;

    let (start, legs) = if !stop_on_floor {
        // Repair mode: carve straight through everything, landing exactly
        // on b's center.
        let start = edge_cell(a, dir, perp_center(a, dir));
        let first_leg = leg_length(start, b, dir);
        let turn = turn_towards(start, b, dir);
        let second_leg = perp_distance(start, b, dir) + 1;
        (start, vec![(dir, first_leg), (turn, second_leg)])
    } else {
        match overlap_offset(a, b, dir) {
            // The rooms share a perpendicular span: one straight run.
            Some(offset) => (edge_cell(a, dir, offset), vec![(dir, budget)]),
            // No shared span: run out to b's center line, then turn.
            None => {
                let start = edge_cell(a, dir, perp_center(a, dir));
                let first_leg = leg_length(start, b, dir);
                let turn = turn_towards(start, b, dir);
                (start, vec![(dir, first_leg), (turn, budget)])
            }
        }
    };

    dig(level, start, &legs, stop_on_floor)
}

/// Carve floor cells along the legs, fencing walls around each new cell.
/// Stops when existing floor is reached (if `stop_on_floor`) or when the
/// legs are exhausted. The origin cell becomes a door.
fn dig(level: &mut Level, origin: Point, legs: &[(Direction, i32)], stop_on_floor: bool) -> bool {
    let mut current = origin;
    let mut connected = false;
    let mut first = true;

    'legs: for &(dir, steps) in legs {
        if dir == Direction::None {
            continue;
        }
        for _ in 0..steps {
            if !first && level.is_passable(current) {
                if stop_on_floor {
                    connected = true;
                    break 'legs;
                }
            } else {
                level.set_floor(current);
                level.fence_walls_around(current);
            }
            first = false;
            current = current.step(dir);
        }
    }
    if !connected && level.is_passable(current) {
        connected = true;
    }

    level.set_door(origin);
    connected
}

/// Dominant-axis cardinal direction from a's center towards b's center
fn cardinal_towards(a: &Room, b: &Room) -> Direction {
    let ac = a.center();
    let bc = b.center();
    let dx = bc.x - ac.x;
    let dy = bc.y - ac.y;
    if dx == 0 && dy == 0 {
        Direction::None
    } else if dx.abs() >= dy.abs() {
        if dx > 0 { Direction::East } else { Direction::West }
    } else if dy > 0 {
        Direction::South
    } else {
        Direction::North
    }
}

/// One coordinate in the perpendicular range both rooms' interiors share,
/// selected by hashing both rooms' geometry. None when the interiors have
/// no shared span on that axis.
fn overlap_offset(a: &Room, b: &Room, dir: Direction) -> Option<i32> {
    let (lo, hi) = if matches!(dir, Direction::East | Direction::West) {
        (
            (a.origin.y + 1).max(b.origin.y + 1),
            (a.bottom() - 1).min(b.bottom() - 1),
        )
    } else {
        (
            (a.origin.x + 1).max(b.origin.x + 1),
            (a.right() - 1).min(b.right() - 1),
        )
    };
    if lo > hi {
        return None;
    }
    let h = geometry_hash(&[
        a.origin.x, a.origin.y, a.width, a.height, b.origin.x, b.origin.y, b.width, b.height,
    ]);
    Some(lo + (h % (hi - lo + 1) as u64) as i32)
}

/// The cell on a's border where a corridor leaves in `dir` at the given
/// perpendicular coordinate
fn edge_cell(a: &Room, dir: Direction, perp: i32) -> Point {
    match dir {
        Direction::East => Point::new(a.right(), perp),
        Direction::West => Point::new(a.origin.x, perp),
        Direction::South => Point::new(perp, a.bottom()),
        _ => Point::new(perp, a.origin.y),
    }
}

/// a's own center coordinate on the axis perpendicular to `dir`
fn perp_center(a: &Room, dir: Direction) -> i32 {
    match dir {
        Direction::East | Direction::West => a.center().y,
        _ => a.center().x,
    }
}

/// Steps along `dir` from `start` to b's perpendicular center line
fn leg_length(start: Point, b: &Room, dir: Direction) -> i32 {
    let len = match dir {
        Direction::East | Direction::West => (b.center().x - start.x).abs(),
        _ => (b.center().y - start.y).abs(),
    };
    len.max(1)
}

/// Distance from `start` to b's center on the axis perpendicular to `dir`
fn perp_distance(start: Point, b: &Room, dir: Direction) -> i32 {
    match dir {
        Direction::East | Direction::West => (b.center().y - start.y).abs(),
        _ => (b.center().x - start.x).abs(),
    }
}

/// After the first leg, the cardinal direction that closes in on b
fn turn_towards(start: Point, b: &Room, dir: Direction) -> Direction {
    match dir {
        Direction::East | Direction::West => {
            if b.center().y > start.y {
                Direction::South
            } else {
                Direction::North
            }
        }
        _ => {
            if b.center().x > start.x {
                Direction::East
            } else {
                Direction::West
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extrude(level: &mut Level, room: &Room) {
        for p in room.border_cells() {
            level.set_wall(p);
        }
        for p in room.interior_cells() {
            level.set_floor(p);
        }
    }

    #[test]
    fn test_tracker_merge() {
        let mut tracker = ConnectivityTracker::new(4);
        assert!(!tracker.are_connected(0, 1));

        tracker.merge(0, 1);
        tracker.merge(2, 3);
        assert!(tracker.are_connected(0, 1));
        assert!(tracker.are_connected(2, 3));
        assert!(!tracker.are_connected(1, 2));
        assert!(!tracker.all_connected());

        tracker.merge(1, 2);
        assert!(tracker.all_connected());
    }

    #[test]
    fn test_tracker_empty_is_connected() {
        assert!(ConnectivityTracker::new(0).all_connected());
        assert!(ConnectivityTracker::new(1).all_connected());
    }

    #[test]
    fn test_straight_corridor_joins_two_rooms() {
        let mut level = Level::new();
        let a = Room::new(0, 0, 6, 6);
        let b = Room::new(12, 0, 6, 6);
        extrude(&mut level, &a);
        extrude(&mut level, &b);

        assert!(carve_corridor(&mut level, &a, &b));

        let route = path::seek(b.center(), a.center(), |p| !level.is_passable(p));
        assert!(!route.is_empty());
    }

    #[test]
    fn test_corridor_places_door_on_origin_edge() {
        let mut level = Level::new();
        let a = Room::new(0, 0, 6, 6);
        let b = Room::new(12, 0, 6, 6);
        extrude(&mut level, &a);
        extrude(&mut level, &b);
        carve_corridor(&mut level, &a, &b);

        // The door sits on a's right edge.
        let door = level
            .doors()
            .iter()
            .find(|p| p.x == a.right())
            .copied();
        assert!(door.is_some());
    }

    #[test]
    fn test_corridor_is_deterministic() {
        let a = Room::new(0, 0, 6, 6);
        let b = Room::new(12, 2, 7, 5);

        let mut level1 = Level::new();
        extrude(&mut level1, &a);
        extrude(&mut level1, &b);
        carve_corridor(&mut level1, &a, &b);

        let mut level2 = Level::new();
        extrude(&mut level2, &a);
        extrude(&mut level2, &b);
        carve_corridor(&mut level2, &a, &b);

        assert_eq!(level1.floors(), level2.floors());
        assert_eq!(level1.doors(), level2.doors());
    }

    #[test]
    fn test_dogleg_connects_diagonal_rooms() {
        let mut level = Level::new();
        // No shared interior span on either axis.
        let a = Room::new(0, 0, 5, 5);
        let b = Room::new(10, 12, 5, 5);
        extrude(&mut level, &a);
        extrude(&mut level, &b);

        connect_rooms(&mut level, &[a, b]);

        let route = path::seek(b.center(), a.center(), |p| !level.is_passable(p));
        assert!(!route.is_empty());
    }

    #[test]
    fn test_connect_rooms_links_every_room() {
        let mut level = Level::new();
        let rooms = [
            Room::new(0, 0, 6, 5),
            Room::new(14, 0, 5, 6),
            Room::new(0, 10, 5, 5),
            Room::new(13, 11, 6, 6),
        ];
        for room in &rooms {
            extrude(&mut level, room);
        }
        connect_rooms(&mut level, &rooms);

        let anchor = rooms[0].center();
        for room in &rooms[1..] {
            let route = path::seek(room.center(), anchor, |p| !level.is_passable(p));
            assert!(!route.is_empty(), "room at {:?} unreachable", room.origin);
        }
    }
}
