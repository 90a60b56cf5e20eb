use crate::error::Error;
use crate::graph::NodeIndex;
use crate::util::NaturalOrInfinite;
use crate::Graph;
use tracing::trace;

/// A path to some node together with its length. The start node is not part of `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPath {
    distance: NaturalOrInfinite,
    path: Vec<NodeIndex>,
}

impl ShortestPath {
    pub fn new(path: Vec<NodeIndex>, distance: NaturalOrInfinite) -> Self {
        Self { path, distance }
    }

    pub fn distance(&self) -> NaturalOrInfinite {
        self.distance
    }

    pub fn path(&self) -> &[NodeIndex] {
        &self.path
    }

    /// The edges of the path, in traversal order, starting at `start`.
    pub fn edges_from(&self, start: NodeIndex) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        std::iter::once(start)
            .chain(self.path.iter().copied())
            .zip(self.path.iter().copied())
    }
}

impl Default for ShortestPath {
    fn default() -> Self {
        Self {
            distance: NaturalOrInfinite::infinity(),
            path: vec![],
        }
    }
}

/// Single-source shortest path distances and predecessors, as computed by [dijkstra].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPaths {
    source: NodeIndex,
    distances: Vec<NaturalOrInfinite>,
    predecessors: Vec<Option<NodeIndex>>,
}

impl ShortestPaths {
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn distance(&self, node: NodeIndex) -> NaturalOrInfinite {
        self.distances[node]
    }

    pub fn distances(&self) -> &[NaturalOrInfinite] {
        &self.distances
    }

    /// `None` for the source and for unreachable nodes.
    pub fn predecessor(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.predecessors[node]
    }

    /// Nodes on the shortest path from the source to `target`, excluding the source.
    ///
    /// Empty if `target` is the source or unreachable.
    pub fn path_to(&self, target: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![];
        let mut current = target;
        while let Some(predecessor) = self.predecessors[current] {
            path.push(current);
            current = predecessor;
        }
        path.reverse();
        path
    }

    pub fn shortest_path(&self, target: NodeIndex) -> ShortestPath {
        ShortestPath::new(self.path_to(target), self.distance(target))
    }
}

/// Dijkstra's algorithm with a linear minimum search, which is optimal for dense graphs.
///
/// Among nodes with equal tentative distance the one with the smallest index is finalized
/// first. Relaxation only happens on strict improvement.
pub fn dijkstra(graph: &Graph, source: NodeIndex) -> Result<ShortestPaths, Error> {
    let n = graph.num_nodes();
    if source >= n {
        return Err(Error::InvalidSource {
            vertex: source,
            num_nodes: n,
        });
    }
    let mut distances = vec![NaturalOrInfinite::infinity(); n];
    let mut predecessors = vec![None; n];
    let mut finalized = vec![false; n];
    distances[source] = 0u32.into();

    while let Some(u) = closest_unfinalized(&distances, &finalized) {
        finalized[u] = true;
        for (v, weight) in graph.neighbors(u) {
            let candidate = distances[u] + NaturalOrInfinite::from(weight);
            if !finalized[v] && candidate < distances[v] {
                trace!(from = u, to = v, distance = ?candidate, "relaxed");
                distances[v] = candidate;
                predecessors[v] = Some(u);
            }
        }
    }

    Ok(ShortestPaths {
        source,
        distances,
        predecessors,
    })
}

/// Unfinalized node with the smallest finite distance, lowest index first.
/// `None` once every reachable node is finalized.
fn closest_unfinalized(distances: &[NaturalOrInfinite], finalized: &[bool]) -> Option<NodeIndex> {
    distances
        .iter()
        .enumerate()
        .filter(|&(v, d)| !finalized[v] && d.is_finite())
        .min_by_key(|&(_, &d)| d)
        .map(|(v, _)| v)
}
