use crate::error::{Endpoint, Result, RouteError};
use crate::geometry::{ConnectionPoint, Point, Rect};

use super::{COLLISION_MARGIN, NODE_MARGIN, OUTER_COLLISION_MARGIN};

/// Derived geometry of one routing request.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedObstacles {
    /// Rectangles inflated by the node margin; visibility nodes live on them.
    pub node_rects: [Rect; 2],
    /// Smallest box enclosing both node rectangles.
    pub outer: Rect,
    /// Search start: the source connection point pushed out by the node margin.
    pub entry: Point,
    /// Search goal, derived the same way from the target.
    pub exit: Point,
}

impl PreparedObstacles {
    /// Rejects overlapping or crowded rectangles and misplaced connection points,
    /// then derives inflated geometry and stand-off points.
    pub fn prepare(
        rect_a: &Rect,
        rect_b: &Rect,
        source: &ConnectionPoint,
        target: &ConnectionPoint,
    ) -> Result<Self> {
        let node_a = rect_a.inflate(NODE_MARGIN);
        let node_b = rect_b.inflate(NODE_MARGIN);

        if rect_a.intersects(rect_b) {
            return Err(RouteError::RectanglesIntersect);
        }
        if node_a.intersects(&node_b) {
            return Err(RouteError::RectanglesTooClose);
        }
        if !source.is_valid_for(rect_a) {
            return Err(RouteError::InvalidConnectionPoint(Endpoint::Source));
        }
        if !target.is_valid_for(rect_b) {
            return Err(RouteError::InvalidConnectionPoint(Endpoint::Target));
        }

        let outer = Rect::from_aabb(&node_a.aabb().union(&node_b.aabb()));
        Ok(Self {
            node_rects: [node_a, node_b],
            outer,
            entry: stand_off(source),
            exit: stand_off(target),
        })
    }

    /// Rectangles whose edges are hard obstacles: both inputs at the collision
    /// margin and the outer box pushed out by its own margin.
    pub fn collision_rects(&self, rect_a: &Rect, rect_b: &Rect) -> [Rect; 3] {
        [
            rect_a.inflate(COLLISION_MARGIN),
            rect_b.inflate(COLLISION_MARGIN),
            self.outer.inflate(OUTER_COLLISION_MARGIN),
        ]
    }
}

pub fn stand_off(connection: &ConnectionPoint) -> Point {
    connection.point.move_by_angle(connection.angle, NODE_MARGIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_are_rejected() {
        let err = PreparedObstacles::prepare(
            &Rect::new(100.0, 100.0, 100.0, 100.0),
            &Rect::new(150.0, 50.0, 50.0, 50.0),
            &ConnectionPoint::new(150.0, 120.0, 0.0),
            &ConnectionPoint::new(170.0, 75.0, 90.0),
        )
        .unwrap_err();
        assert_eq!(err, RouteError::RectanglesIntersect);
    }

    #[test]
    fn nested_rects_are_rejected() {
        let err = PreparedObstacles::prepare(
            &Rect::new(100.0, 100.0, 100.0, 100.0),
            &Rect::new(85.0, 85.0, 50.0, 50.0),
            &ConnectionPoint::new(150.0, 120.0, 0.0),
            &ConnectionPoint::new(80.0, 110.0, 90.0),
        )
        .unwrap_err();
        assert_eq!(err, RouteError::RectanglesIntersect);
    }

    #[test]
    fn crowded_rects_are_rejected() {
        let err = PreparedObstacles::prepare(
            &Rect::new(100.0, 100.0, 100.0, 100.0),
            &Rect::new(187.0, 75.0, 50.0, 50.0),
            &ConnectionPoint::new(150.0, 120.0, 0.0),
            &ConnectionPoint::new(180.0, 100.0, 90.0),
        )
        .unwrap_err();
        assert_eq!(err, RouteError::RectanglesTooClose);
    }

    #[test]
    fn misplaced_connection_points_are_rejected() {
        let rect_a = Rect::new(100.0, 100.0, 100.0, 100.0);
        let rect_b = Rect::new(225.0, 75.0, 50.0, 50.0);
        let source = ConnectionPoint::new(150.0, 120.0, 0.0);
        for target in [
            ConnectionPoint::new(220.0, 100.0, 270.0),
            ConnectionPoint::new(220.0, 100.0, 0.0),
            ConnectionPoint::new(220.0, 110.0, 90.0),
        ] {
            let err = PreparedObstacles::prepare(&rect_a, &rect_b, &source, &target).unwrap_err();
            assert_eq!(err, RouteError::InvalidConnectionPoint(Endpoint::Target));
        }
        let err = PreparedObstacles::prepare(
            &rect_a,
            &rect_b,
            &ConnectionPoint::new(150.0, 120.0, 180.0),
            &ConnectionPoint::new(220.0, 100.0, 90.0),
        )
        .unwrap_err();
        assert_eq!(err, RouteError::InvalidConnectionPoint(Endpoint::Source));
    }

    #[test]
    fn derives_stand_offs_and_outer_box() {
        let rect_a = Rect::new(100.0, 100.0, 100.0, 100.0);
        let rect_b = Rect::new(225.0, 75.0, 50.0, 50.0);
        let prepared = PreparedObstacles::prepare(
            &rect_a,
            &rect_b,
            &ConnectionPoint::new(150.0, 120.0, 0.0),
            &ConnectionPoint::new(220.0, 100.0, 90.0),
        )
        .unwrap();
        assert_eq!(prepared.entry, Point::new(160.0, 120.0));
        assert_eq!(prepared.exit, Point::new(220.0, 110.0));
        let outer = prepared.outer.aabb();
        assert_eq!((outer.min_x, outer.max_x), (40.0, 260.0));
        assert_eq!((outer.min_y, outer.max_y), (40.0, 160.0));

        let [a, b, frame] = prepared.collision_rects(&rect_a, &rect_b);
        assert_eq!(a.aabb().max_x, 159.0);
        assert_eq!(b.aabb().min_x, 191.0);
        assert_eq!(frame.aabb().min_x, 35.0);
        assert_eq!(frame.aabb().max_y, 165.0);
    }
}
