//! Orthogonal connector routing between two rectangles.
//!
//! The pipeline runs once per call and owns everything it builds:
//! validate and inflate the rectangles, generate visibility points, connect
//! them into a row/column graph, index the obstacle edges, search, simplify.

pub mod graph;
pub mod obstacles;
pub mod search;
pub mod simplify;
pub mod spatial;
pub mod visibility;

use tracing::debug;

use crate::error::{Result, RouteError};
use crate::geometry::{ConnectionPoint, Direction, Point, Rect};

use graph::VisibilityGraph;
use obstacles::PreparedObstacles;
use search::find_path;
use simplify::simplify_path;
use spatial::SegmentIndex;
use visibility::{base_points, reachable_points};

// ── Margins ─────────────────────────────────────────────────────────
/// Clearance between a rectangle and the visibility nodes around it. Also the
/// distance from a connection point to its stand-off point.
pub const NODE_MARGIN: f64 = 10.0;
/// Inflation of the input rectangles whose edges the path may not cross.
/// Smaller than [`NODE_MARGIN`] so nodes sit just outside the blocked frame.
pub const COLLISION_MARGIN: f64 = 9.0;
/// Inflation of the outer box that fences the search area.
pub const OUTER_COLLISION_MARGIN: f64 = 5.0;

/// Everything the router derived while solving one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTrace {
    /// Simplified polyline from source to target connection point.
    pub path: Vec<Point>,
    pub entry: Point,
    pub exit: Point,
    /// Visibility nodes in graph order.
    pub candidates: Vec<Point>,
    pub graph_edges: usize,
    /// States finalized by the search.
    pub expanded: usize,
    pub turns: u32,
}

/// Routes an orthogonal connector from `source` on `rect_a` to `target` on
/// `rect_b`.
///
/// The result starts and ends at the exact connection points and contains
/// no collinear interior points.
pub fn route_connector(
    rect_a: &Rect,
    rect_b: &Rect,
    source: &ConnectionPoint,
    target: &ConnectionPoint,
) -> Result<Vec<Point>> {
    route_with_trace(rect_a, rect_b, source, target).map(|trace| trace.path)
}

/// Same as [`route_connector`], also returning the intermediate geometry.
pub fn route_with_trace(
    rect_a: &Rect,
    rect_b: &Rect,
    source: &ConnectionPoint,
    target: &ConnectionPoint,
) -> Result<RouteTrace> {
    let prepared = PreparedObstacles::prepare(rect_a, rect_b, source, target)?;

    let base = base_points(
        prepared.entry,
        prepared.exit,
        &prepared.node_rects,
        &prepared.outer,
    );
    let points = reachable_points(&base, &prepared.node_rects, &prepared.outer);
    let graph = VisibilityGraph::build(&points);
    let obstacles = SegmentIndex::from_rect_edges(&prepared.collision_rects(rect_a, rect_b));
    debug!(
        base = base.len(),
        nodes = graph.len(),
        edges = graph.edge_count(),
        obstacles = obstacles.len(),
        "built routing graph"
    );

    let entry_direction = Direction::from_angle(source.angle)?;
    let start = graph.find(prepared.entry).ok_or(RouteError::NoPathFound)?;
    let goal = graph.find(prepared.exit).ok_or(RouteError::NoPathFound)?;
    let outcome = find_path(&graph, start, goal, &obstacles, entry_direction)?;

    let mut full = Vec::with_capacity(outcome.points.len() + 2);
    full.push(source.point);
    full.extend_from_slice(&outcome.points);
    full.push(target.point);
    let path = simplify_path(&full);
    debug!(
        points = path.len(),
        turns = outcome.turns,
        cost = outcome.cost,
        "routed connector"
    );

    Ok(RouteTrace {
        path,
        entry: prepared.entry,
        exit: prepared.exit,
        candidates: graph.nodes().iter().map(|node| node.point).collect(),
        graph_edges: graph.edge_count(),
        expanded: outcome.expanded,
        turns: outcome.turns,
    })
}
