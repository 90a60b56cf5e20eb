use criterion::{black_box, criterion_group, criterion_main, Criterion};
use steiner_sph::{shortest_path_heuristic, Graph, Options, TerminalSelection};

/// `side × side` grid with pseudo-random weights and every seventh node as terminal.
fn grid(side: usize) -> (Graph, Vec<usize>) {
    let mut graph = Graph::with_nodes(side * side);
    let mut seed = 17u32;
    let mut next_weight = || {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        1 + (seed >> 16) % 20
    };
    for row in 0..side {
        for col in 0..side {
            let node = row * side + col;
            if col + 1 < side {
                graph.add_edge(node, node + 1, next_weight()).unwrap();
            }
            if row + 1 < side {
                graph.add_edge(node, node + side, next_weight()).unwrap();
            }
        }
    }
    let terminals = (0..side * side).step_by(7).collect();
    (graph, terminals)
}

fn bench_heuristic(c: &mut Criterion) {
    let (graph, terminals) = grid(12);
    let mut group = c.benchmark_group("shortest_path_heuristic");
    for (name, parallel) in [("serial", false), ("parallel", true)] {
        let options = Options {
            selection: TerminalSelection::NearestToTree,
            parallel,
        };
        group.bench_function(name, |b| {
            b.iter(|| shortest_path_heuristic(black_box(&graph), black_box(&terminals), &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_heuristic);
criterion_main!(benches);
