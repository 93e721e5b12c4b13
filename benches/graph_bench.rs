use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use waypoint_pathfinding::{AStarSearch, NodeId, PathingGraph, Vec3};

fn grid_graph(n: usize, spacing: f32) -> (PathingGraph, Vec<NodeId>) {
    let mut graph = PathingGraph::new();
    let mut ids = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            let id = graph.add_node(Vec3::new(spacing * col as f32, 0.0, spacing * row as f32));
            if col > 0 {
                graph.link_nodes(ids[ids.len() - 1], id).unwrap();
            }
            if row > 0 {
                graph.link_nodes(ids[ids.len() - n], id).unwrap();
            }
            ids.push(id);
        }
    }
    graph.update();
    (graph, ids)
}

fn grid_bench(c: &mut Criterion) {
    for n in [9, 20, 40] {
        let (graph, ids) = grid_graph(n, 10.0);
        let mut rng = StdRng::seed_from_u64(0);
        let scenarios = (0..100)
            .map(|_| (ids[rng.gen_range(0..ids.len())], ids[rng.gen_range(0..ids.len())]))
            .collect::<Vec<_>>();

        c.bench_function(format!("{n}x{n} grid, random pairs").as_str(), |b| {
            b.iter(|| {
                for (start, goal) in &scenarios {
                    black_box(graph.find_path(*start, *goal).unwrap());
                }
            })
        });

        let mut search = AStarSearch::new();
        c.bench_function(format!("{n}x{n} grid, reused search").as_str(), |b| {
            b.iter(|| {
                for (start, goal) in &scenarios {
                    black_box(graph.find_path_with(&mut search, *start, *goal).unwrap());
                }
            })
        });
    }
}

fn nearest_bench(c: &mut Criterion) {
    let (graph, _) = grid_graph(40, 10.0);
    let mut rng = StdRng::seed_from_u64(0);
    let positions = (0..100)
        .map(|_| Vec3::new(rng.gen_range(0.0..400.0), 0.0, rng.gen_range(0.0..400.0)))
        .collect::<Vec<_>>();
    c.bench_function("closest node, 1600 nodes", |b| {
        b.iter(|| {
            for p in &positions {
                black_box(graph.find_closest_node(p).unwrap());
            }
        })
    });
}

criterion_group!(benches, grid_bench, nearest_bench);
criterion_main!(benches);
