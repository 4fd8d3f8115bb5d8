use crate::config::{Config, RenderConfig};
use crate::error::RouteError;
use crate::geometry::{Aabb, ConnectionPoint, Point, Rect};
use crate::request::RouteRequest;
use crate::routing::{NODE_MARGIN, RouteTrace};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Minimum viewport edge so tiny scenes stay legible.
const MIN_VIEW_SIZE: f64 = 200.0;
/// Side of the square drawn at each connection point.
const CONNECTION_MARK_SIZE: f64 = 6.0;

/// Draws both rectangles, their connection points and either the routed
/// connector or an error caption.
pub fn render_svg(
    request: &RouteRequest,
    outcome: std::result::Result<&RouteTrace, &RouteError>,
    config: &Config,
) -> String {
    let theme = &config.theme;
    let render = &config.render;
    let view = scene_bounds(request, outcome.ok(), render);
    let width = view.width().max(MIN_VIEW_SIZE);
    let height = view.height().max(MIN_VIEW_SIZE);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"{} {} {width} {height}\">",
        view.min_x, view.min_y
    ));
    svg.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        view.min_x, view.min_y, theme.background
    ));

    for rect in [&request.rect_a, &request.rect_b] {
        if render.show_margins {
            svg.push_str(&rect_svg(
                &rect.inflate(NODE_MARGIN),
                "none",
                &theme.margin_color,
                render.rect_stroke_width,
                " stroke-dasharray=\"4 3\"",
            ));
        }
        svg.push_str(&rect_svg(
            rect,
            &theme.rect_fill,
            &theme.rect_border,
            render.rect_stroke_width,
            "",
        ));
    }

    match outcome {
        Ok(trace) => {
            if trace.path.len() > 1 {
                svg.push_str(&format!(
                    "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                    points_to_path(&trace.path),
                    theme.path_color,
                    render.path_stroke_width
                ));
            }
            if render.show_nodes {
                for point in &trace.candidates {
                    svg.push_str(&format!(
                        "<circle class=\"node\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\"/>",
                        point.x, point.y, render.node_radius, theme.node_color
                    ));
                }
            }
        }
        Err(err) => {
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">error: {}</text>",
                view.min_x + render.padding / 2.0,
                view.min_y + render.padding / 2.0 + f64::from(theme.font_size),
                escape_xml(&theme.font_family),
                theme.font_size,
                theme.error_color,
                escape_xml(&err.to_string())
            ));
        }
    }

    for connection in [&request.con_point_a, &request.con_point_b] {
        svg.push_str(&connection_svg(connection, theme));
    }

    svg.push_str("</svg>");
    svg
}

fn scene_bounds(request: &RouteRequest, trace: Option<&RouteTrace>, render: &RenderConfig) -> Aabb {
    let mut bounds = request
        .rect_a
        .inflate(NODE_MARGIN)
        .aabb()
        .union(&request.rect_b.inflate(NODE_MARGIN).aabb());
    if let Some(trace) = trace {
        for point in trace.path.iter().chain(&trace.candidates) {
            bounds = bounds.union(&Aabb {
                min_x: point.x,
                max_x: point.x,
                min_y: point.y,
                max_y: point.y,
            });
        }
    }
    Aabb {
        min_x: bounds.min_x - render.padding,
        max_x: bounds.max_x + render.padding,
        min_y: bounds.min_y - render.padding,
        max_y: bounds.max_y + render.padding,
    }
}

fn rect_svg(rect: &Rect, fill: &str, stroke: &str, stroke_width: f64, extra: &str) -> String {
    let aabb = rect.aabb();
    format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
        aabb.min_x,
        aabb.min_y,
        aabb.width(),
        aabb.height(),
        fill,
        stroke,
        stroke_width,
        extra
    )
}

fn connection_svg(connection: &ConnectionPoint, theme: &Theme) -> String {
    let half = CONNECTION_MARK_SIZE / 2.0;
    format!(
        "<rect class=\"connection\" x=\"{:.2}\" y=\"{:.2}\" width=\"{size}\" height=\"{size}\" fill=\"{}\"/>",
        connection.point.x - half,
        connection.point.y - half,
        theme.connection_color,
        size = CONNECTION_MARK_SIZE
    )
}

fn points_to_path(points: &[Point]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    let mut d = format!("M {:.2} {:.2}", first.x, first.y);
    for point in rest {
        d.push_str(&format!(" L {:.2} {:.2}", point.x, point.y));
    }
    d
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_turn_request() -> RouteRequest {
        RouteRequest::new(
            Rect::new(100.0, 100.0, 100.0, 100.0),
            Rect::new(225.0, 75.0, 50.0, 50.0),
            ConnectionPoint::new(150.0, 120.0, 0.0),
            ConnectionPoint::new(220.0, 100.0, 90.0),
        )
    }

    #[test]
    fn render_routed_scene() {
        let request = single_turn_request();
        let trace = request.trace().unwrap();
        let svg = render_svg(&request, Ok(&trace), &Config::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("d=\"M 150.00 120.00 L 220.00 120.00 L 220.00 100.00\""));
        assert_eq!(svg.matches("class=\"connection\"").count(), 2);
        assert!(!svg.contains("class=\"node\""));
    }

    #[test]
    fn render_with_nodes_and_margins() {
        let request = single_turn_request();
        let trace = request.trace().unwrap();
        let mut config = Config::default();
        config.render.show_nodes = true;
        config.render.show_margins = true;
        let svg = render_svg(&request, Ok(&trace), &config);
        assert_eq!(svg.matches("class=\"node\"").count(), trace.candidates.len());
        assert_eq!(svg.matches("stroke-dasharray").count(), 2);
    }

    #[test]
    fn render_error_caption() {
        let mut request = single_turn_request();
        request.rect_b = Rect::new(150.0, 50.0, 50.0, 50.0);
        let err = request.trace().unwrap_err();
        let svg = render_svg(&request, Err(&err), &Config::default());
        assert!(svg.contains("error: rectangles intersect"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn path_data_from_points() {
        assert_eq!(points_to_path(&[]), "");
        assert_eq!(
            points_to_path(&[Point::new(0.0, 0.0), Point::new(10.5, 0.0)]),
            "M 0.00 0.00 L 10.50 0.00"
        );
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }
}
