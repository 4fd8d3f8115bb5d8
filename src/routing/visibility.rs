//! Candidate turning points for the orthogonal search graph.
//!
//! The node set is the union of three stages:
//! 1. base points: entry, exit and the corners of every node rectangle and of
//!    the outer box;
//! 2. axis projections of each base point onto the edges it can see in the
//!    four compass directions;
//! 3. crossings between the vertical ray of one base point and the horizontal
//!    ray of another, both clipped to the outer box.

use crate::geometry::{Aabb, Direction, Point, Rect, Segment, dedup_points};

use super::spatial::SegmentIndex;

pub fn base_points(entry: Point, exit: Point, rects: &[Rect], outer: &Rect) -> Vec<Point> {
    let mut points = Vec::with_capacity(2 + (rects.len() + 1) * 4);
    points.push(entry);
    points.push(exit);
    for rect in rects {
        points.extend(rect.corners());
    }
    points.extend(outer.corners());
    points
}

/// Edge coordinates visible from `from` when looking in `direction`.
fn reachable_edges(from: Point, direction: Direction, rects: &[Rect], outer: &Rect) -> Vec<f64> {
    let mut coords = Vec::new();
    for rect in rects.iter().chain(std::iter::once(outer)) {
        let Aabb {
            min_x,
            max_x,
            min_y,
            max_y,
        } = rect.aabb();
        let in_rows = from.y >= min_y && from.y <= max_y;
        let in_cols = from.x >= min_x && from.x <= max_x;

        match direction {
            Direction::Left => {
                if in_rows && from.x > min_x {
                    coords.push(min_x);
                }
                if in_rows && from.x > max_x {
                    coords.push(max_x);
                }
            }
            Direction::Right => {
                if in_rows && from.x < min_x {
                    coords.push(min_x);
                }
                if in_rows && from.x < max_x {
                    coords.push(max_x);
                }
            }
            Direction::Top => {
                if in_cols && from.y > min_y {
                    coords.push(min_y);
                }
                if in_cols && from.y > max_y {
                    coords.push(max_y);
                }
            }
            Direction::Bottom => {
                if in_cols && from.y < max_y {
                    coords.push(max_y);
                }
                if in_cols && from.y < min_y {
                    coords.push(min_y);
                }
            }
        }
    }
    coords
}

/// Projects every point onto the rectangle and outer edges it can see along
/// both axes. Projections equal to their origin are dropped.
pub fn axis_projections(points: &[Point], rects: &[Rect], outer: &Rect) -> Vec<Point> {
    let mut projected = Vec::new();
    for &from in points {
        for direction in Direction::ALL {
            for coord in reachable_edges(from, direction, rects, outer) {
                let candidate = match direction {
                    Direction::Left | Direction::Right => Point::new(coord, from.y),
                    Direction::Top | Direction::Bottom => Point::new(from.x, coord),
                };
                if candidate != from {
                    projected.push(candidate);
                }
            }
        }
    }
    dedup_points(projected)
}

/// Crossings of vertical and horizontal rays through the points, excluding
/// crossings that coincide with one of the points themselves.
pub fn ray_crossings(points: &[Point], outer: &Rect) -> Vec<Point> {
    let bounds = outer.aabb();
    let horizontal = SegmentIndex::from_segments(points.iter().map(|p| {
        Segment::new(Point::new(bounds.min_x, p.y), Point::new(bounds.max_x, p.y))
    }));

    let mut crossings = Vec::new();
    for p in points {
        let x = p.x;
        let ray = Aabb {
            min_x: x,
            max_x: x,
            min_y: bounds.min_y,
            max_y: bounds.max_y,
        };
        // R-tree hits come back in tree order; sort them so node order only
        // depends on the input points.
        let mut hits: Vec<Point> = horizontal
            .candidates(&ray)
            .filter(|segment| {
                segment.start.y == segment.end.y && segment.start.x <= x && segment.end.x >= x
            })
            .map(|segment| Point::new(x, segment.start.y))
            .filter(|crossing| !points.iter().any(|base| base.same_as(*crossing)))
            .collect();
        hits.sort_by(|a, b| a.y.total_cmp(&b.y));
        crossings.extend(hits);
    }
    dedup_points(crossings)
}

/// Full deduplicated candidate set: base points, then projections, then ray crossings.
pub fn reachable_points(points: &[Point], rects: &[Rect], outer: &Rect) -> Vec<Point> {
    let projections = axis_projections(points, rects, outer);
    let crossings = ray_crossings(points, outer);
    dedup_points(
        points
            .iter()
            .chain(projections.iter())
            .chain(crossings.iter())
            .copied(),
    )
}
