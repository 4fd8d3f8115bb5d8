#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod request;
pub mod routing;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use error::{Endpoint, Result, RouteError};
pub use geometry::{ConnectionPoint, Point, Rect};
pub use request::RouteRequest;
pub use routing::{RouteTrace, route_connector, route_with_trace};
