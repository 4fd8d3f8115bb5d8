use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{ConnectionPoint, Point, Rect};
use crate::routing::{RouteTrace, route_connector, route_with_trace};

/// One routing problem: a source rectangle with its connection point and a
/// target rectangle with its connection point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub rect_a: Rect,
    pub rect_b: Rect,
    pub con_point_a: ConnectionPoint,
    pub con_point_b: ConnectionPoint,
}

impl RouteRequest {
    pub fn new(
        rect_a: Rect,
        rect_b: Rect,
        con_point_a: ConnectionPoint,
        con_point_b: ConnectionPoint,
    ) -> Self {
        Self {
            rect_a,
            rect_b,
            con_point_a,
            con_point_b,
        }
    }

    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn route(&self) -> Result<Vec<Point>> {
        route_connector(&self.rect_a, &self.rect_b, &self.con_point_a, &self.con_point_b)
    }

    pub fn trace(&self) -> Result<RouteTrace> {
        route_with_trace(&self.rect_a, &self.rect_b, &self.con_point_a, &self.con_point_b)
    }
}
