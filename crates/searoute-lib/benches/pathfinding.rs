use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use searoute_lib::{
    plan_route, Cell, EnvironmentField, Grid, Island, LandRegion, ObstacleSpec, RouteAlgorithm,
    RouteRequest, StormSpec, WeatherPattern,
};
use std::hint::black_box;

static GRID: Lazy<Grid> = Lazy::new(|| {
    // The demo ocean: four islands plus coastal strips on both edges.
    let obstacles = ObstacleSpec {
        islands: vec![
            Island {
                center: Cell::new(20, 20),
                radius: 5,
            },
            Island {
                center: Cell::new(60, 40),
                radius: 8,
            },
            Island {
                center: Cell::new(40, 70),
                radius: 6,
            },
            Island {
                center: Cell::new(80, 80),
                radius: 7,
            },
        ],
        land_regions: vec![
            LandRegion {
                x_start: 0,
                y_start: 0,
                x_end: 5,
                y_end: 99,
            },
            LandRegion {
                x_start: 94,
                y_start: 0,
                x_end: 99,
                y_end: 99,
            },
        ],
    };
    Grid::new(100, 100, &obstacles, &[]).expect("valid grid")
});

static FIELD: Lazy<EnvironmentField> = Lazy::new(|| {
    EnvironmentField::generate(
        &GRID,
        42,
        WeatherPattern::Moderate,
        &[StormSpec {
            center: Cell::new(50, 50),
            radius: 15,
            intensity: 1.5,
        }],
    )
});

static DIJKSTRA_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::new(Cell::new(10, 10), Cell::new(90, 90), RouteAlgorithm::Dijkstra)
});
static ASTAR_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::new(Cell::new(10, 10), Cell::new(90, 90), RouteAlgorithm::AStar));
static WEATHER_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::new(
        Cell::new(10, 10),
        Cell::new(90, 90),
        RouteAlgorithm::WeatherAware,
    )
});
static BIDIRECTIONAL_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::new(
        Cell::new(10, 10),
        Cell::new(90, 90),
        RouteAlgorithm::Bidirectional,
    )
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let grid = &*GRID;
    let field = &*FIELD;

    c.bench_function("dijkstra_100x100", |b| {
        let request = &*DIJKSTRA_REQUEST;
        b.iter(|| {
            let summary = plan_route(grid, field, request).expect("route exists");
            black_box(summary.hop_count())
        });
    });

    c.bench_function("a_star_100x100", |b| {
        let request = &*ASTAR_REQUEST;
        b.iter(|| {
            let summary = plan_route(grid, field, request).expect("route exists");
            black_box(summary.nodes_explored)
        });
    });

    c.bench_function("weather_aware_100x100", |b| {
        let request = &*WEATHER_REQUEST;
        b.iter(|| {
            let summary = plan_route(grid, field, request).expect("route exists");
            black_box(summary.fuel_tons)
        });
    });

    c.bench_function("bidirectional_100x100", |b| {
        let request = &*BIDIRECTIONAL_REQUEST;
        b.iter(|| {
            let summary = plan_route(grid, field, request).expect("route exists");
            black_box(summary.distance_km)
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
