//! Level builder
//!
//! Composes a level in a fixed pipeline: extrude rooms, carve the corridor
//! network, spawn one creature per room, place the stairwells, drop coins
//! along the up-down route, and seed the occasional item. Every stage draws
//! only from the caller's seeded stream or from pure geometry, so a seed
//! reproduces the dungeon cell for cell.

use crate::consts::MIN_ROOM_SPAN;
use crate::grid::Point;
use crate::monster::{ArchetypePicker, Creature};
use crate::object::{ArmorKind, HelmKind, Item, RingKind, Weapon, WeaponKind};
use crate::path;
use crate::rng::GameRng;
use crate::world::GameConfig;

use super::corridor;
use super::level::{Entrance, Level, Pedestal};
use super::room::{accept_rooms, Room};

/// Build one level of the dungeon
pub fn build_level(
    depth: usize,
    config: &GameConfig,
    rng: &mut GameRng,
    picker: ArchetypePicker,
) -> Level {
    let candidates = sample_candidates(config, rng);
    let rooms = accept_rooms(&candidates);

    let mut level = Level::new();
    for room in &rooms {
        extrude_room(&mut level, room);
    }
    corridor::connect_rooms(&mut level, &rooms);
    spawn_creatures(&mut level, &rooms, depth, picker);
    place_stairwells(&mut level, depth, config.level_count);
    drop_coins(&mut level);
    seed_items(&mut level, &rooms, depth, rng);
    level
}

/// Sample room candidates from the seed stream. Greedy acceptance happens
/// afterwards; rejected candidates still consumed their draws, which keeps
/// the stream aligned across levels.
fn sample_candidates(config: &GameConfig, rng: &mut GameRng) -> Vec<Room> {
    let mut candidates = Vec::with_capacity(config.room_attempts);
    for _ in 0..config.room_attempts {
        let w = rng.range(MIN_ROOM_SPAN, config.max_room_width);
        let h = rng.range(MIN_ROOM_SPAN, config.max_room_height);
        let x = rng.range(1, (config.map_width - w - 1).max(1));
        let y = rng.range(1, (config.map_height - h - 1).max(1));
        candidates.push(Room::new(x, y, w, h));
    }
    candidates
}

/// Convert a room rectangle to terrain: border walls, interior floor
fn extrude_room(level: &mut Level, room: &Room) {
    for p in room.border_cells() {
        level.set_wall(p);
    }
    for p in room.interior_cells() {
        level.set_floor(p);
    }
}

/// One creature per room, archetype keyed by (room index, depth)
fn spawn_creatures(level: &mut Level, rooms: &[Room], depth: usize, picker: ArchetypePicker) {
    for (i, room) in rooms.iter().enumerate() {
        let pos = room.center();
        if level.is_floor(pos) && level.creature_at(pos).is_none() {
            let kind = picker(i, depth);
            level.add_creature(Creature::spawn(kind, pos, i, depth));
        }
    }
}

/// A wall cell qualifies as a stairwell candidate when exactly one of its 8
/// neighbors is floor and exactly one of the axis pairs {N,S} / {E,W}
/// holds a wall neighbor. That selects dead-end wall cells and rejects room
/// corners, which have walls on both pairs.
fn is_stair_candidate(level: &Level, p: Point) -> bool {
    let floor_neighbors = p.neighbors().iter().filter(|n| level.is_floor(**n)).count();
    if floor_neighbors != 1 {
        return false;
    }
    let [n, _, e, _, s, _, w, _] = p.neighbors();
    let north_south = level.is_wall(n) || level.is_wall(s);
    let east_west = level.is_wall(e) || level.is_wall(w);
    north_south != east_west
}

/// All stairwell candidates in (y, x) scan order
fn stair_candidates(level: &Level) -> Vec<Point> {
    let mut walls: Vec<Point> = level.walls().iter().copied().collect();
    walls.sort_by_key(|p| (p.y, p.x));
    walls
        .into_iter()
        .filter(|&p| is_stair_candidate(level, p))
        .collect()
}

/// The candidate pair with the greatest point-to-point distance. Candidates
/// are scanned in sorted order and ties keep the first pair found, so the
/// choice is stable. Falls back to the spread of the floor itself when
/// fewer than two candidates exist.
fn best_stair_pair(level: &Level) -> (Point, Point) {
    let candidates = stair_candidates(level);
    let mut best: Option<(Point, Point, i32)> = None;
    for (i, &a) in candidates.iter().enumerate() {
        for &b in &candidates[i + 1..] {
            let d = a.chebyshev(b);
            if best.map_or(true, |(_, _, bd)| d > bd) {
                best = Some((a, b, d));
            }
        }
    }
    if let Some((a, b, _)) = best {
        return order_pair(a, b);
    }

    // Degenerate level: spread over the floor instead.
    let anchor = level.fallback_floor();
    let far = level
        .floors()
        .iter()
        .max_by_key(|p| (anchor.chebyshev(**p), -p.y, -p.x))
        .copied()
        .unwrap_or(anchor);
    order_pair(anchor, far)
}

/// Consistent role assignment: the (y, x)-smaller member becomes upstairs
fn order_pair(a: Point, b: Point) -> (Point, Point) {
    if (a.y, a.x) <= (b.y, b.x) { (a, b) } else { (b, a) }
}

/// Place the level's two special points. Depth 0 gets an entrance instead
/// of upstairs; the deepest level gets the artifact pedestal instead of
/// downstairs. Both substitutions re-fence the surrounding walls.
fn place_stairwells(level: &mut Level, depth: usize, level_count: usize) {
    let (up, down) = best_stair_pair(level);

    level.set_floor(up);
    level.fence_walls_around(up);
    level.set_floor(down);
    level.fence_walls_around(down);

    if depth == 0 {
        level.entrance = Some(Entrance {
            at: up,
            opened: false,
        });
    } else {
        level.upstairs = Some(up);
    }

    if depth + 1 == level_count {
        level.pedestal = Some(Pedestal {
            at: down,
            taken: false,
        });
    } else {
        level.downstairs = Some(down);
    }
}

/// Drop a coin every ⌊pathLength/3⌋ cells along the route between the
/// level's up and down points, excluding both endpoints
fn drop_coins(level: &mut Level) {
    let (Some(up), Some(down)) = (level.up_point(), level.down_point()) else {
        return;
    };
    let route = path::seek(down, up, |p| !level.is_passable(p));
    let stride = route.len() / 3;
    if stride == 0 {
        return;
    }
    for (idx, &p) in route.iter().enumerate() {
        let step = idx + 1;
        if step % stride == 0 && step != route.len() {
            level.add_coin(p);
        }
    }
}

const WEAPON_TABLE: [WeaponKind; 5] = [
    WeaponKind::Sword,
    WeaponKind::Axe,
    WeaponKind::Dagger,
    WeaponKind::Whip,
    WeaponKind::Pick,
];
const ARMOR_TABLE: [ArmorKind; 3] = [ArmorKind::Leather, ArmorKind::Chain, ArmorKind::Plate];
const HELM_TABLE: [HelmKind; 2] = [HelmKind::Cap, HelmKind::GreatHelm];
const RING_TABLE: [RingKind; 3] = [RingKind::Guard, RingKind::Might, RingKind::Sight];

/// Seed an item into every third room, keyed by room index and depth
fn seed_items(level: &mut Level, rooms: &[Room], depth: usize, rng: &mut GameRng) {
    for (i, room) in rooms.iter().enumerate() {
        if (i + depth) % 3 != 0 {
            continue;
        }
        let interior = room.interior_cells();
        let Some(&pos) = rng.choose(&interior) else {
            continue;
        };
        let item = roll_item(rng);
        if level.is_floor(pos) && level.item_at(pos).is_none() {
            level.add_item(pos, item);
        }
    }
}

fn roll_item(rng: &mut GameRng) -> Item {
    match rng.rn2(4) {
        0 => {
            let kind = *rng.choose(&WEAPON_TABLE).unwrap_or(&WeaponKind::Sword);
            let weapon = if rng.one_in(4) {
                Weapon::new(kind).enchant()
            } else {
                Weapon::new(kind)
            };
            Item::Weapon(weapon)
        }
        1 => Item::Armor(*rng.choose(&ARMOR_TABLE).unwrap_or(&ArmorKind::Leather)),
        2 => Item::Helm(*rng.choose(&HELM_TABLE).unwrap_or(&HelmKind::Cap)),
        _ => Item::Ring(*rng.choose(&RING_TABLE).unwrap_or(&RingKind::Guard)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::room::ROOM_MARGIN;
    use crate::monster::default_archetype;
    use proptest::prelude::*;

    fn test_config() -> GameConfig {
        GameConfig::default()
    }

    fn build(seed: u64) -> Level {
        let config = test_config();
        let mut rng = GameRng::new(seed);
        build_level(1, &config, &mut rng, default_archetype)
    }

    #[test]
    fn test_level_has_special_points() {
        let level = build(7);
        assert!(level.upstairs.is_some());
        assert!(level.downstairs.is_some());
        assert!(level.entrance.is_none());
        assert!(level.pedestal.is_none());
    }

    #[test]
    fn test_depth_zero_gets_entrance() {
        let config = test_config();
        let mut rng = GameRng::new(7);
        let level = build_level(0, &config, &mut rng, default_archetype);
        assert!(level.entrance.is_some());
        assert!(level.upstairs.is_none());
        assert!(!level.entrance.unwrap().opened);
    }

    #[test]
    fn test_last_depth_gets_pedestal() {
        let config = test_config();
        let mut rng = GameRng::new(7);
        let level = build_level(
            config.level_count - 1,
            &config,
            &mut rng,
            default_archetype,
        );
        assert!(level.pedestal.is_some());
        assert!(level.downstairs.is_none());
        assert!(!level.pedestal.unwrap().taken);
    }

    #[test]
    fn test_special_points_are_passable_and_distinct() {
        let level = build(11);
        let up = level.up_point().unwrap();
        let down = level.down_point().unwrap();
        assert_ne!(up, down);
        assert!(level.is_passable(up));
        assert!(level.is_passable(down));
    }

    #[test]
    fn test_creatures_stand_on_floor() {
        let level = build(13);
        assert!(!level.creatures.is_empty());
        for c in &level.creatures {
            assert!(level.is_floor(c.pos), "{:?} not on floor", c.pos);
        }
    }

    #[test]
    fn test_items_lie_on_floor() {
        let level = build(13);
        for i in &level.items {
            assert!(level.is_floor(i.pos));
        }
    }

    #[test]
    fn test_coins_between_special_points() {
        // Coins lie on floor, never on the endpoints themselves.
        let level = build(17);
        let up = level.up_point().unwrap();
        let down = level.down_point().unwrap();
        for &c in level.coins() {
            assert!(level.is_floor(c));
            assert_ne!(c, up);
            assert_ne!(c, down);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build(99), build(99));
    }

    #[test]
    fn test_stair_candidate_rejects_corners() {
        let mut level = Level::new();
        let room = Room::new(0, 0, 5, 5);
        extrude_room(&mut level, &room);
        // A corner has wall neighbors on both axis pairs.
        assert!(!is_stair_candidate(&level, Point::new(0, 0)));
    }

    #[test]
    fn test_stair_candidate_accepts_dead_end() {
        // Horizontal corridor stub: floor at (1,1), walls all around the
        // dead end at (2,1).
        let mut level = Level::new();
        level.set_floor(Point::new(0, 1));
        level.set_floor(Point::new(1, 1));
        level.fence_walls_around(Point::new(0, 1));
        level.fence_walls_around(Point::new(1, 1));
        // (2,1) is the wall capping the corridor: one floor neighbor at
        // (1,1), wall neighbors north and south, none east or west beyond
        // the fence.
        assert!(is_stair_candidate(&level, Point::new(2, 1)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_accepted_rooms_never_overlap(seed in any::<u64>()) {
            let config = test_config();
            let mut rng = GameRng::new(seed);
            let rooms = accept_rooms(&sample_candidates(&config, &mut rng));
            for (i, a) in rooms.iter().enumerate() {
                for b in &rooms[i + 1..] {
                    prop_assert!(!a.overlaps_with_margin(b, ROOM_MARGIN));
                }
            }
        }

        #[test]
        fn prop_level_is_one_component(seed in any::<u64>()) {
            let config = test_config();
            let mut rng = GameRng::new(seed);
            let candidates = sample_candidates(&config, &mut rng);
            let rooms = accept_rooms(&candidates);

            let mut rng = GameRng::new(seed);
            let level = build_level(1, &config, &mut rng, default_archetype);

            // Every room interior and both special points reachable from
            // the up point.
            let up = level.up_point().unwrap();
            let down = level.down_point().unwrap();
            let reach = |goal: Point| {
                goal == up
                    || !path::seek(goal, up, |p| !level.is_passable(p)).is_empty()
            };
            prop_assert!(reach(down));
            for room in &rooms {
                prop_assert!(reach(room.center()), "room {:?} unreachable", room.origin);
            }
        }
    }
}
