//! Grid pathfinding
//!
//! Breadth-first search over 8-way moves with a caller-supplied blocked
//! predicate. Uniform per-step cost, so the first route found is shortest in
//! move count. Neighbors expand in [`DIRECTIONS`] order, which fixes every
//! tie-break; the same query always returns the same path.
//!
//! An unreachable goal is a normal outcome: `seek` returns an empty path and
//! `find` returns `None`.

use std::collections::{HashMap, VecDeque};

use crate::grid::{Point, DIRECTIONS};

/// Abandon a search after expanding this many cells. Callers pass closed
/// predicates (everything off the floor is blocked), so real queries finish
/// long before this; the cap keeps a degenerate predicate from walking an
/// unbounded grid forever.
const MAX_EXPANSIONS: usize = 16_384;

/// Shortest path from `start` (exclusive) to `goal` (inclusive), or an
/// empty vector when no route exists. `seek(a, a)` is the empty path.
pub fn seek<F>(goal: Point, start: Point, is_blocked: F) -> Vec<Point>
where
    F: Fn(Point) -> bool,
{
    if goal == start {
        return Vec::new();
    }
    if is_blocked(goal) {
        return Vec::new();
    }

    match bfs(start, &is_blocked, |p| p == goal) {
        Some((hit, parents)) => walk_back(hit, start, &parents),
        None => Vec::new(),
    }
}

/// The first point reached during breadth-first expansion from `start`
/// whose neighbor set includes `goal`. Answers adjacency/connectivity
/// questions ("which reachable cell touches this one?") without requiring
/// the goal itself to be passable.
pub fn find<F>(goal: Point, start: Point, is_blocked: F) -> Option<Point>
where
    F: Fn(Point) -> bool,
{
    if start.is_adjacent(goal) {
        return Some(start);
    }
    bfs(start, &is_blocked, |p| p.is_adjacent(goal)).map(|(hit, _)| hit)
}

/// Shared BFS core. Expands from `start` until `is_target` matches a
/// dequeued point, returning that point and the parent map.
fn bfs<F, T>(start: Point, is_blocked: &F, is_target: T) -> Option<(Point, HashMap<Point, Point>)>
where
    F: Fn(Point) -> bool,
    T: Fn(Point) -> bool,
{
    let mut parents: HashMap<Point, Point> = HashMap::new();
    let mut queue: VecDeque<Point> = VecDeque::new();
    parents.insert(start, start);
    queue.push_back(start);

    let mut expanded = 0;
    while let Some(current) = queue.pop_front() {
        if is_target(current) {
            return Some((current, parents));
        }
        expanded += 1;
        if expanded > MAX_EXPANSIONS {
            return None;
        }

        for dir in DIRECTIONS {
            let next = current.step(dir);
            if parents.contains_key(&next) || is_blocked(next) {
                continue;
            }
            parents.insert(next, current);
            queue.push_back(next);
        }
    }
    None
}

/// Trace parent pointers from `end` back to `start`, returned start-side
/// first with `start` itself omitted.
fn walk_back(end: Point, start: Point, parents: &HashMap<Point, Point>) -> Vec<Point> {
    let mut path = Vec::new();
    let mut current = end;
    while current != start {
        path.push(current);
        current = parents[&current];
    }
    path.reverse();
    path
}
