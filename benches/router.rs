use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ortho_connector::RouteRequest;
use ortho_connector::config::Config;
use ortho_connector::render::render_svg;
use ortho_connector::routing::graph::VisibilityGraph;
use ortho_connector::routing::obstacles::PreparedObstacles;
use ortho_connector::routing::visibility::{base_points, reachable_points};
use std::hint::black_box;

fn fixture(name: &str) -> &'static str {
    match name {
        "single_turn" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/scene_single_turn.json"
        )),
        "wrap_around" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/scene_wrap_around.json"
        )),
        "stacked" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/scene_stacked.json"
        )),
        _ => panic!("unknown fixture {name}"),
    }
}

fn scenes() -> Vec<(&'static str, RouteRequest)> {
    ["single_turn", "wrap_around", "stacked"]
        .into_iter()
        .map(|name| {
            let value: serde_json::Value =
                serde_json::from_str(fixture(name)).expect("fixture parse failed");
            let request =
                serde_json::from_value(value["request"].clone()).expect("fixture request invalid");
            (name, request)
        })
        .collect()
}

fn bench_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("route");
    for (name, request) in scenes() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &request, |b, request| {
            b.iter(|| {
                let path = black_box(request).route().expect("route failed");
                black_box(path.len());
            });
        });
    }
    group.finish();
}

fn bench_visibility_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility_graph");
    for (name, request) in scenes() {
        let prepared = PreparedObstacles::prepare(
            &request.rect_a,
            &request.rect_b,
            &request.con_point_a,
            &request.con_point_b,
        )
        .expect("prepare failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &prepared, |b, prepared| {
            b.iter(|| {
                let base = base_points(
                    prepared.entry,
                    prepared.exit,
                    &prepared.node_rects,
                    &prepared.outer,
                );
                let points = reachable_points(&base, &prepared.node_rects, &prepared.outer);
                let graph = VisibilityGraph::build(black_box(&points));
                black_box(graph.edge_count());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let mut config = Config::default();
    config.render.show_nodes = true;
    for (name, request) in scenes() {
        let trace = request.trace().expect("route failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &trace, |b, trace| {
            b.iter(|| {
                let svg = render_svg(&request, Ok(black_box(trace)), &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_route, bench_visibility_graph, bench_render);
criterion_main!(benches);
