//! R-tree of obstacle edges used to reject illegal path segments.

use std::fmt;

use rstar::{AABB, RTree, RTreeObject};

use crate::geometry::{Aabb, Rect, Segment};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedSegment {
    pub segment: Segment,
}

impl RTreeObject for IndexedSegment {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let aabb = self.segment.aabb();
        AABB::from_corners([aabb.min_x, aabb.min_y], [aabb.max_x, aabb.max_y])
    }
}

/// Spatial index over segments. Cloning yields an independent copy, so a search
/// can grow its own working index without touching the shared one.
#[derive(Clone)]
pub struct SegmentIndex {
    tree: RTree<IndexedSegment>,
}

impl fmt::Debug for SegmentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentIndex").field("len", &self.len()).finish()
    }
}

impl Default for SegmentIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        let indexed = segments
            .into_iter()
            .map(|segment| IndexedSegment { segment })
            .collect();
        Self {
            tree: RTree::bulk_load(indexed),
        }
    }

    /// Indexes the four boundary edges of every rectangle.
    pub fn from_rect_edges(rects: &[Rect]) -> Self {
        Self::from_segments(rects.iter().flat_map(|rect| rect.edges()))
    }

    pub fn insert(&mut self, segment: Segment) {
        self.tree.insert(IndexedSegment { segment });
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Segments whose bounds touch `area` (inclusive).
    pub fn candidates<'a>(&'a self, area: &Aabb) -> impl Iterator<Item = &'a Segment> + 'a {
        let envelope = AABB::from_corners([area.min_x, area.min_y], [area.max_x, area.max_y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|item| &item.segment)
    }

    /// True if `segment` crosses none of the indexed segments.
    pub fn is_clear(&self, segment: &Segment) -> bool {
        !self
            .candidates(&segment.aabb())
            .any(|indexed| segment.intersects(indexed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn rect_edges_block_crossing_segments() {
        let index = SegmentIndex::from_rect_edges(&[Rect::new(100.0, 100.0, 100.0, 100.0)]);
        assert_eq!(index.len(), 4);
        assert!(!index.is_clear(&seg(0.0, 100.0, 200.0, 100.0)));
        assert!(!index.is_clear(&seg(100.0, 100.0, 100.0, 0.0)));
        assert!(index.is_clear(&seg(0.0, 40.0, 200.0, 40.0)));
    }

    #[test]
    fn touching_a_corner_is_allowed() {
        let index = SegmentIndex::from_rect_edges(&[Rect::new(100.0, 100.0, 100.0, 100.0)]);
        assert!(index.is_clear(&seg(0.0, 50.0, 50.0, 50.0)));
    }

    #[test]
    fn clone_is_independent() {
        let shared = SegmentIndex::from_rect_edges(&[Rect::new(0.0, 0.0, 10.0, 10.0)]);
        let mut working = shared.clone();
        working.insert(seg(20.0, 0.0, 20.0, 30.0));
        assert_eq!(shared.len(), 4);
        assert_eq!(working.len(), 5);
        assert!(shared.is_clear(&seg(10.0, 10.0, 30.0, 10.0)));
        assert!(!working.is_clear(&seg(10.0, 10.0, 30.0, 10.0)));
    }

    #[test]
    fn candidates_are_range_limited() {
        let index = SegmentIndex::from_segments([
            seg(0.0, 0.0, 10.0, 0.0),
            seg(100.0, 0.0, 110.0, 0.0),
        ]);
        let area = Aabb {
            min_x: 5.0,
            max_x: 20.0,
            min_y: -1.0,
            max_y: 1.0,
        };
        let found: Vec<_> = index.candidates(&area).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(*found[0], seg(0.0, 0.0, 10.0, 0.0));
    }
}
