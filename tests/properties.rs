use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::HashSet;
use steiner_sph::{
    dijkstra, shortest_path_heuristic, Error, Graph, NodeIndex, Options, TerminalSelection,
};

/// Random graph with `1..max_nodes` nodes; an entry of `0` in the upper triangle means no edge.
fn graphs(max_nodes: usize) -> impl Strategy<Value = Graph> {
    (1..max_nodes)
        .prop_flat_map(|n| (Just(n), vec(0u32..10, n * n)))
        .prop_map(|(n, weights)| build(n, &weights))
}

/// Like [graphs] but every node `i > 0` is joined to node `i - 1`.
fn connected_graphs(max_nodes: usize) -> impl Strategy<Value = Graph> {
    (1..max_nodes)
        .prop_flat_map(|n| (Just(n), vec(0u32..10, n * n), vec(1u32..10, n)))
        .prop_map(|(n, weights, spine)| {
            let mut graph = build(n, &weights);
            for i in 1..n {
                if graph.weight(i - 1, i).is_none() {
                    graph.add_edge(i - 1, i, spine[i]).unwrap();
                }
            }
            graph
        })
}

fn build(n: usize, weights: &[u32]) -> Graph {
    let mut graph = Graph::with_nodes(n);
    for from in 0..n {
        for to in from + 1..n {
            let weight = weights[from * n + to];
            if weight > 0 {
                graph.add_edge(from, to, weight).unwrap();
            }
        }
    }
    graph
}

fn graph_with_terminals(graph: impl Strategy<Value = Graph>) -> impl Strategy<Value = (Graph, Vec<NodeIndex>)> {
    graph.prop_flat_map(|graph| {
        let n = graph.num_nodes();
        (Just(graph), vec(0..n, 1..=n))
    })
}

proptest! {
    #[test]
    fn dijkstra_distances_are_consistent(graph in graphs(12), source in 0usize..12) {
        let source = source % graph.num_nodes();
        let sp = dijkstra(&graph, source).unwrap();
        prop_assert_eq!(sp.distance(source).as_finite(), Some(0));
        prop_assert_eq!(sp.predecessor(source), None);
        for v in graph.node_indices() {
            match sp.distance(v).as_finite() {
                Some(distance) => {
                    let shortest = sp.shortest_path(v);
                    let path = sp.path_to(v);
                    prop_assert_eq!(shortest.path(), &path[..]);
                    prop_assert!(shortest.path().len() < graph.num_nodes());
                    prop_assert_eq!(shortest.path().last().copied().unwrap_or(source), v);
                    let length = shortest
                        .edges_from(source)
                        .map(|(a, b)| u64::from(graph.weight(a, b).unwrap()))
                        .sum::<u64>();
                    prop_assert_eq!(shortest.distance().as_finite(), Some(length));
                    prop_assert_eq!(length, distance);
                    for (w, weight) in graph.neighbors(v) {
                        prop_assert!(sp.distance(w).finite_value() <= distance + u64::from(weight));
                    }
                }
                None => {
                    prop_assert_eq!(sp.predecessor(v), None);
                    prop_assert!(sp.path_to(v).is_empty());
                }
            }
        }
    }

    #[test]
    fn tree_spans_all_terminals((graph, terminals) in graph_with_terminals(connected_graphs(10))) {
        let tree = shortest_path_heuristic(&graph, &terminals, &Options::default()).unwrap();
        for t in &terminals {
            prop_assert!(tree.contains(*t));
        }
        prop_assert_eq!(tree.vertices()[0], terminals[0]);
        let distinct_vertices = tree.vertices().iter().collect::<HashSet<_>>();
        prop_assert_eq!(distinct_vertices.len(), tree.vertices().len());
        let distinct_edges = tree.edges().iter().collect::<HashSet<_>>();
        prop_assert_eq!(distinct_edges.len(), tree.edges().len());
        prop_assert_eq!(tree.weight_in(&graph), Some(tree.total_cost()));
        for &(a, b) in tree.edges() {
            prop_assert!(a < b && tree.contains(a) && tree.contains(b));
        }
    }

    #[test]
    fn serial_and_parallel_agree(
        (graph, terminals) in graph_with_terminals(connected_graphs(10)),
        last_source in any::<bool>(),
    ) {
        let selection = if last_source {
            TerminalSelection::LastSource
        } else {
            TerminalSelection::NearestToTree
        };
        let serial = Options { selection, parallel: false };
        let parallel = Options { selection, parallel: true };
        prop_assert_eq!(
            shortest_path_heuristic(&graph, &terminals, &serial),
            shortest_path_heuristic(&graph, &terminals, &parallel)
        );
    }

    #[test]
    fn unreachable_terminal_is_reported(
        (graph, terminals) in graph_with_terminals(graphs(10)),
    ) {
        let result = shortest_path_heuristic(&graph, &terminals, &Options::default());
        let root = dijkstra(&graph, terminals[0]).unwrap();
        match terminals.iter().find(|&&t| root.distance(t).is_infinite()) {
            Some(_) => prop_assert!(
                matches!(result, Err(Error::UnreachableTerminal { .. })),
                "{:?}",
                result
            ),
            None => prop_assert!(result.is_ok()),
        }
    }
}

#[test]
fn invalid_source_fails_fast() {
    let graph = Graph::with_nodes(3);
    assert_eq!(
        dijkstra(&graph, 3),
        Err(Error::InvalidSource {
            vertex: 3,
            num_nodes: 3
        })
    );
}
