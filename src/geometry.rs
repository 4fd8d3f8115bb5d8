//! Points, rectangles, segments and the predicates the router is built on.
//!
//! Coordinates use a y-down convention. Every derived coordinate is rounded
//! half-up to an integer, and two points denote the same node iff their
//! rounded coordinates match.

use std::collections::HashSet;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};

/// Rounds half-up (towards positive infinity), so `-0.5` becomes `0`.
pub fn round_coord(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Rounded identity of a point; the key of a visibility node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId {
    pub x: i64,
    pub y: i64,
}

impl PointId {
    /// Saturates instead of overflowing for points at the far ends of the range.
    pub fn manhattan(self, other: PointId) -> u64 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn rounded(self) -> Self {
        Self::new(round_coord(self.x), round_coord(self.y))
    }

    pub fn id(self) -> PointId {
        let rounded = self.rounded();
        PointId {
            x: rounded.x as i64,
            y: rounded.y as i64,
        }
    }

    /// Equality on rounded coordinates.
    pub fn same_as(self, other: Point) -> bool {
        self.id() == other.id()
    }

    pub fn manhattan(self, other: Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Offsets the point by `distance` along `angle` degrees and rounds the result.
    pub fn move_by_angle(self, angle: f64, distance: f64) -> Self {
        let rad = angle * PI / 180.0;
        Point::new(self.x + rad.cos() * distance, self.y + rad.sin() * distance).rounded()
    }
}

/// Order-preserving deduplication by rounded identity.
pub fn dedup_points<I>(points: I) -> Vec<Point>
where
    I: IntoIterator<Item = Point>,
{
    let mut seen = HashSet::new();
    points
        .into_iter()
        .filter(|point| seen.insert(point.id()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned bounds, always rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Aabb {
    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max_x <= other.min_x
            || self.min_x >= other.max_x
            || self.max_y <= other.min_y
            || self.min_y >= other.max_y)
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A rectangle stored as its centre and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Point::new(x, y),
            size: Size { width, height },
        }
    }

    pub fn from_aabb(aabb: &Aabb) -> Self {
        Rect::new(
            aabb.min_x + aabb.width() / 2.0,
            aabb.min_y + aabb.height() / 2.0,
            aabb.width(),
            aabb.height(),
        )
    }

    pub fn aabb(&self) -> Aabb {
        let half_w = self.size.width / 2.0;
        let half_h = self.size.height / 2.0;
        Aabb {
            min_x: round_coord(self.position.x - half_w),
            max_x: round_coord(self.position.x + half_w),
            min_y: round_coord(self.position.y - half_h),
            max_y: round_coord(self.position.y + half_h),
        }
    }

    /// Same centre, each side pushed out by `margin`.
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect {
            position: self.position,
            size: Size {
                width: self.size.width + margin * 2.0,
                height: self.size.height + margin * 2.0,
            },
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.aabb().intersects(&other.aabb())
    }

    pub fn corners(&self) -> [Point; 4] {
        let Aabb {
            min_x,
            max_x,
            min_y,
            max_y,
        } = self.aabb();
        [
            Point::new(min_x, min_y),
            Point::new(min_x, max_y),
            Point::new(max_x, min_y),
            Point::new(max_x, max_y),
        ]
    }

    /// Boundary segments in top, right, bottom, left order.
    pub fn edges(&self) -> [Segment; 4] {
        let Aabb {
            min_x,
            max_x,
            min_y,
            max_y,
        } = self.aabb();
        [
            Segment::new(Point::new(min_x, min_y), Point::new(max_x, min_y)),
            Segment::new(Point::new(max_x, min_y), Point::new(max_x, max_y)),
            Segment::new(Point::new(max_x, max_y), Point::new(min_x, max_y)),
            Segment::new(Point::new(min_x, max_y), Point::new(min_x, min_y)),
        ]
    }

    /// Inclusive containment against the rounded bounds.
    pub fn contains_point(&self, point: Point) -> bool {
        let aabb = self.aabb();
        point.x >= aabb.min_x && point.x <= aabb.max_x && point.y >= aabb.min_y && point.y <= aabb.max_y
    }

    /// Interval a connection point may slide along on the given axis.
    pub fn travel_range(&self, axis: Axis) -> (f64, f64) {
        let aabb = self.aabb();
        match axis {
            Axis::X => (aabb.min_x, aabb.max_x),
            Axis::Y => (aabb.min_y, aabb.max_y),
        }
    }
}

/// An ordered pair of points. Equality ignores orientation.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        (self.start.same_as(other.start) && self.end.same_as(other.end))
            || (self.start.same_as(other.end) && self.end.same_as(other.start))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

fn orientation(from: Point, to: Point, candidate: Point) -> Orientation {
    let cross = (to.y - from.y) * (candidate.x - to.x) - (to.x - from.x) * (candidate.y - to.y);
    if cross == 0.0 {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            min_x: self.start.x.min(self.end.x),
            max_x: self.start.x.max(self.end.x),
            min_y: self.start.y.min(self.end.y),
            max_y: self.start.y.max(self.end.y),
        }
    }

    fn bounds_contain(&self, point: Point) -> bool {
        let aabb = self.aabb();
        aabb.min_x <= point.x && point.x <= aabb.max_x && aabb.min_y <= point.y && point.y <= aabb.max_y
    }

    /// Orientation-based intersection test.
    ///
    /// Identical segments intersect. Segments sharing an endpoint do not, so
    /// consecutive path segments can chain through a node.
    pub fn intersects(&self, other: &Segment) -> bool {
        if self == other {
            return true;
        }
        if self.start.same_as(other.start)
            || self.start.same_as(other.end)
            || self.end.same_as(other.start)
            || self.end.same_as(other.end)
        {
            return false;
        }

        let o1 = orientation(self.start, self.end, other.start);
        let o2 = orientation(self.start, self.end, other.end);
        let o3 = orientation(other.start, other.end, self.start);
        let o4 = orientation(other.start, other.end, self.end);

        if o1 != o2 && o3 != o4 {
            return true;
        }
        (o1 == Orientation::Collinear && self.bounds_contain(other.start))
            || (o2 == Orientation::Collinear && self.bounds_contain(other.end))
            || (o3 == Orientation::Collinear && other.bounds_contain(self.start))
            || (o4 == Orientation::Collinear && other.bounds_contain(self.end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
    ];

    /// Direction of travel from `from` to `to`, or `None` unless the points
    /// differ along exactly one axis.
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        if from.x == to.x && from.y > to.y {
            Some(Direction::Top)
        } else if from.x == to.x && from.y < to.y {
            Some(Direction::Bottom)
        } else if from.y == to.y && from.x > to.x {
            Some(Direction::Left)
        } else if from.y == to.y && from.x < to.x {
            Some(Direction::Right)
        } else {
            None
        }
    }

    pub fn from_angle(angle: f64) -> Result<Direction> {
        let normalized = angle % 360.0;
        if normalized == 0.0 {
            Ok(Direction::Right)
        } else if normalized == 90.0 {
            Ok(Direction::Bottom)
        } else if normalized == 180.0 {
            Ok(Direction::Left)
        } else if normalized == 270.0 {
            Ok(Direction::Top)
        } else {
            Err(RouteError::UnsupportedAngle(angle))
        }
    }

    pub fn angle(self) -> f64 {
        match self {
            Direction::Right => 0.0,
            Direction::Bottom => 90.0,
            Direction::Left => 180.0,
            Direction::Top => 270.0,
        }
    }

    /// Axis the direction travels along.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::X,
            Direction::Top | Direction::Bottom => Axis::Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Axis a connection point with this exit angle slides along: a point on
    /// a left or right edge moves vertically, one on a top or bottom edge
    /// moves horizontally.
    pub fn for_angle(angle: f64) -> Result<Axis> {
        Ok(match Direction::from_angle(angle)?.axis() {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        })
    }
}

/// A point on a rectangle boundary plus the outward angle a connector leaves at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionPoint {
    pub point: Point,
    pub angle: f64,
}

impl ConnectionPoint {
    pub const fn new(x: f64, y: f64, angle: f64) -> Self {
        Self {
            point: Point::new(x, y),
            angle,
        }
    }

    /// The point must sit on the rectangle's rounded boundary and the angle must
    /// be the outward normal of that edge. Corners accept both adjacent normals.
    pub fn is_valid_for(&self, rect: &Rect) -> bool {
        let Aabb {
            min_x: left,
            max_x: right,
            min_y: top,
            max_y: bottom,
        } = rect.aabb();
        let Point { x, y } = self.point;

        let on_left = x == left && y >= top && y <= bottom;
        let on_right = x == right && y >= top && y <= bottom;
        let on_top = y == top && x >= left && x <= right;
        let on_bottom = y == bottom && x >= left && x <= right;

        (on_left && self.angle == 180.0)
            || (on_right && self.angle == 0.0)
            || (on_top && self.angle == 270.0)
            || (on_bottom && self.angle == 90.0)
    }
}
