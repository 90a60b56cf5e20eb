use crate::error::Error;
use crate::graph::NodeIndex;
use crate::shortest_paths::{dijkstra, ShortestPath, ShortestPaths};
use crate::steiner_tree::tree::{Cost, EdgeSet, SteinerTree};
use crate::util::NaturalOrInfinite;
use crate::Graph;
use rayon::prelude::*;
use tracing::debug;

/// How the next terminal to connect is chosen in every round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TerminalSelection {
    /// The unconnected terminal closest to any node of the current tree.
    #[default]
    NearestToTree,
    /// The unconnected terminal closest to the source of the previous round's connecting path
    /// (or the first terminal in the first round). This is how the classic formulation of the
    /// heuristic is usually implemented. It can pick a terminal that is not nearest to the tree.
    LastSource,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub selection: TerminalSelection,
    /// Run the per-node shortest path computations of a round on the rayon thread pool.
    pub parallel: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            selection: TerminalSelection::default(),
            parallel: true,
        }
    }
}

/// Shortest path heuristic (Takahashi & Matsuyama) for the Steiner tree problem.
///
/// Starting from the first terminal, repeatedly pick an unconnected terminal (see
/// [TerminalSelection]) and add the shortest path to it from the tree node whose path adds the
/// least weight, where edges already in the tree are free. Repeated terminals are ignored.
///
/// The result does not depend on `options.parallel`.
pub fn shortest_path_heuristic(
    graph: &Graph,
    terminals: &[NodeIndex],
    options: &Options,
) -> Result<SteinerTree, Error> {
    let terminals = distinct_terminals(graph, terminals)?;
    let root = terminals[0];
    let mut processed = vec![false; graph.num_nodes()];
    let mut included = EdgeSet::new(graph.num_nodes());
    let mut tree = SteinerTree::new(root);
    processed[root] = true;
    let mut last_source = dijkstra(graph, root)?;
    debug!(terminal = root, "seeded tree");

    while terminals.iter().any(|&t| !processed[t]) {
        let from_tree = shortest_paths_from(graph, tree.vertices(), options.parallel)?;
        let next = match options.selection {
            TerminalSelection::NearestToTree => closest_terminal(&terminals, &processed, &from_tree),
            TerminalSelection::LastSource => {
                closest_terminal(&terminals, &processed, std::slice::from_ref(&last_source))
            }
        }?;
        debug!(terminal = next, "next terminal");

        let (winner, marginal_cost) =
            cheapest_connection(graph, &from_tree, next, &included, options.parallel)
                .ok_or(Error::UnreachableTerminal { terminal: next })?;
        let sources = &from_tree[winner];
        debug!(
            source = sources.source(),
            terminal = next,
            marginal_cost,
            "connecting terminal"
        );
        commit_path(
            graph,
            sources.source(),
            &sources.shortest_path(next),
            &mut included,
            &mut processed,
            &mut tree,
        );
        last_source = from_tree.into_iter().nth(winner).unwrap_or(last_source);
    }

    debug!(
        nodes = tree.vertices().len(),
        cost = tree.total_cost(),
        "tree complete"
    );
    Ok(tree)
}

/// Range-checked terminals without repetitions, in the given order.
fn distinct_terminals(graph: &Graph, terminals: &[NodeIndex]) -> Result<Vec<NodeIndex>, Error> {
    let mut distinct = Vec::with_capacity(terminals.len());
    for &terminal in terminals {
        if !graph.contains_node(terminal) {
            return Err(Error::InvalidTerminal {
                terminal,
                num_nodes: graph.num_nodes(),
            });
        }
        if !distinct.contains(&terminal) {
            distinct.push(terminal);
        }
    }
    if distinct.is_empty() {
        return Err(Error::EmptyTerminalSet);
    }
    Ok(distinct)
}

fn shortest_paths_from(
    graph: &Graph,
    sources: &[NodeIndex],
    parallel: bool,
) -> Result<Vec<ShortestPaths>, Error> {
    if parallel {
        sources.par_iter().map(|&s| dijkstra(graph, s)).collect()
    } else {
        sources.iter().map(|&s| dijkstra(graph, s)).collect()
    }
}

/// The unprocessed terminal with the smallest distance to any of the given sources.
/// Ties go to the terminal listed first.
fn closest_terminal(
    terminals: &[NodeIndex],
    processed: &[bool],
    from: &[ShortestPaths],
) -> Result<NodeIndex, Error> {
    let mut best: Option<(NaturalOrInfinite, NodeIndex)> = None;
    for &terminal in terminals.iter().filter(|&&t| !processed[t]) {
        let distance = from
            .iter()
            .map(|sp| sp.distance(terminal))
            .min()
            .unwrap_or_else(NaturalOrInfinite::infinity);
        if distance.is_finite() && best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, terminal));
        }
    }
    match best {
        Some((_, terminal)) => Ok(terminal),
        None => {
            let terminal = terminals
                .iter()
                .copied()
                .find(|&t| !processed[t])
                .unwrap_or(terminals[0]);
            Err(Error::UnreachableTerminal { terminal })
        }
    }
}

/// Weight of the path from `sources.source()` to `target` that is not yet in `included`.
/// Each edge is charged once even if the path were to use it twice.
fn marginal_cost(
    graph: &Graph,
    sources: &ShortestPaths,
    target: NodeIndex,
    scratch: &mut EdgeSet,
) -> Cost {
    sources
        .shortest_path(target)
        .edges_from(sources.source())
        .filter(|&(a, b)| scratch.insert(a, b))
        .map(|(a, b)| graph.weight(a, b).map_or(0, Cost::from))
        .sum()
}

/// Index into `from_tree` of the source with the cheapest connection to `target`, and that
/// cost. Ties go to the source that joined the tree first. `None` if no source reaches `target`.
fn cheapest_connection(
    graph: &Graph,
    from_tree: &[ShortestPaths],
    target: NodeIndex,
    included: &EdgeSet,
    parallel: bool,
) -> Option<(usize, Cost)> {
    let reachable = |&(_, sp): &(usize, &ShortestPaths)| sp.distance(target).is_finite();
    let best = if parallel {
        from_tree
            .par_iter()
            .enumerate()
            .filter(reachable)
            .map_init(
                || included.clone(),
                |scratch, (i, sp)| {
                    scratch.reset_to(included);
                    let cost = marginal_cost(graph, sp, target, scratch);
                    debug!(source = sp.source(), cost, "candidate");
                    (cost, i)
                },
            )
            .min()
    } else {
        let mut scratch = included.clone();
        from_tree
            .iter()
            .enumerate()
            .filter(reachable)
            .map(|(i, sp)| {
                scratch.reset_to(included);
                let cost = marginal_cost(graph, sp, target, &mut scratch);
                debug!(source = sp.source(), cost, "candidate");
                (cost, i)
            })
            .min()
    };
    best.map(|(cost, i)| (i, cost))
}

/// Add the edges of `path` that are not yet part of the tree, together with their end points.
fn commit_path(
    graph: &Graph,
    source: NodeIndex,
    path: &ShortestPath,
    included: &mut EdgeSet,
    processed: &mut [bool],
    tree: &mut SteinerTree,
) {
    for (a, b) in path.edges_from(source) {
        if !included.insert(a, b) {
            continue;
        }
        let weight = graph.weight(a, b).unwrap_or(0);
        debug!(from = a, to = b, weight, "edge added");
        tree.push_edge(a, b, weight);
        for v in [a, b] {
            if !processed[v] {
                processed[v] = true;
                tree.push_vertex(v);
            }
        }
    }
}
