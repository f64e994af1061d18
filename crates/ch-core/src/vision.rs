//! Field-of-view computation
//!
//! Raycasts from the source to every cell on the viewport perimeter and
//! unions the lit cells. A ray stops at the first sight-blocking cell but
//! includes it, so the near face of a wall is visible while everything
//! behind it stays dark. This is an O(perimeter × ray length)
//! approximation, not true shadow-casting.

use std::collections::HashSet;

use crate::grid::Point;

/// Compute the illuminated set around `source`.
///
/// `power` is the effective vision radius (base + equipment bonuses); rays
/// are truncated past it. `view_width`/`view_height` bound the viewport
/// rectangle whose perimeter the rays target. `blocks` is the sight-blocker
/// predicate (walls, doors, creatures).
pub fn illuminated<F>(
    source: Point,
    power: i32,
    view_width: i32,
    view_height: i32,
    blocks: F,
) -> HashSet<Point>
where
    F: Fn(Point) -> bool,
{
    let mut lit = HashSet::new();
    lit.insert(source);

    for target in viewport_perimeter(source, view_width, view_height) {
        // Skip the source itself; each ray walks outward from it.
        for cell in line_between(source, target).into_iter().skip(1) {
            if source.chebyshev(cell) > power {
                break;
            }
            lit.insert(cell);
            if blocks(cell) {
                break;
            }
        }
    }
    lit
}

/// Every point on the perimeter of the view rectangle centered on `center`
fn viewport_perimeter(center: Point, view_width: i32, view_height: i32) -> Vec<Point> {
    let half_w = view_width / 2;
    let half_h = view_height / 2;
    let (lx, hx) = (center.x - half_w, center.x + half_w);
    let (ly, hy) = (center.y - half_h, center.y + half_h);

    let mut perimeter = Vec::with_capacity((2 * (hx - lx + hy - ly)) as usize);
    for x in lx..=hx {
        perimeter.push(Point::new(x, ly));
        perimeter.push(Point::new(x, hy));
    }
    for y in (ly + 1)..hy {
        perimeter.push(Point::new(lx, y));
        perimeter.push(Point::new(hx, y));
    }
    perimeter
}

/// Discrete line from `a` to `b` inclusive of both endpoints (Bresenham)
pub fn line_between(a: Point, b: Point) -> Vec<Point> {
    let mut points = Vec::new();
    let mut x = a.x;
    let mut y = a.y;

    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        points.push(Point::new(x, y));
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unblocked(_: Point) -> bool {
        false
    }

    #[test]
    fn test_line_endpoints_inclusive() {
        let a = Point::new(0, 0);
        let b = Point::new(5, 3);
        let line = line_between(a, b);
        assert_eq!(*line.first().unwrap(), a);
        assert_eq!(*line.last().unwrap(), b);
    }

    #[test]
    fn test_line_degenerate() {
        let p = Point::new(2, 2);
        assert_eq!(line_between(p, p), vec![p]);
    }

    #[test]
    fn test_line_steps_are_adjacent() {
        let line = line_between(Point::new(0, 0), Point::new(7, -4));
        for pair in line.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]));
        }
    }

    #[test]
    fn test_open_room_fully_lit_within_radius() {
        // 5x5 open area around the source; no blockers anywhere.
        let source = Point::new(10, 10);
        let lit = illuminated(source, 7, 21, 15, unblocked);
        for dx in -2..=2 {
            for dy in -2..=2 {
                let p = Point::new(source.x + dx, source.y + dy);
                assert!(lit.contains(&p), "{p:?} should be lit");
            }
        }
    }

    #[test]
    fn test_power_truncates_rays() {
        let source = Point::new(0, 0);
        let lit = illuminated(source, 3, 21, 21, unblocked);
        assert!(lit.iter().all(|p| source.chebyshev(*p) <= 3));
        assert!(lit.contains(&Point::new(3, 0)));
        assert!(!lit.contains(&Point::new(4, 0)));
    }

    #[test]
    fn test_blocker_is_lit_but_shadows_behind() {
        // Wall directly east of the source.
        let source = Point::new(0, 0);
        let wall = Point::new(1, 0);
        let lit = illuminated(source, 7, 21, 15, |p| p == wall);

        assert!(lit.contains(&wall));
        // Nothing due east past the wall.
        for x in 2..=7 {
            assert!(!lit.contains(&Point::new(x, 0)), "({x}, 0) should be dark");
        }
        // Other directions unaffected.
        assert!(lit.contains(&Point::new(0, 3)));
        assert!(lit.contains(&Point::new(-3, 0)));
    }

    #[test]
    fn test_source_always_lit() {
        let source = Point::new(5, 5);
        // Even fully walled in, the source cell itself is visible.
        let lit = illuminated(source, 7, 21, 15, |p| p != source);
        assert!(lit.contains(&source));
    }
}
