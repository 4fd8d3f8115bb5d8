use std::fmt;

/// Which end of the connector a connection point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

/// Failures of a single routing attempt. None of them is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    #[error("rectangles intersect")]
    RectanglesIntersect,
    #[error("rectangles are too close to route between them")]
    RectanglesTooClose,
    #[error("{0} connection point is not on its rectangle boundary or does not face outward")]
    InvalidConnectionPoint(Endpoint),
    #[error("unsupported angle: {0} degrees")]
    UnsupportedAngle(f64),
    #[error("no path found")]
    NoPathFound,
}

pub type Result<T> = std::result::Result<T, RouteError>;
