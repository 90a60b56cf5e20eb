use crate::graph::{EdgeWeight, NodeIndex};
use crate::Graph;
use std::io::{self, Write};

pub type Cost = u64;

/// Normalised undirected edge, the smaller index first.
pub(crate) fn ordered(a: NodeIndex, b: NodeIndex) -> (NodeIndex, NodeIndex) {
    (a.min(b), a.max(b))
}

/// Set of undirected edges backed by a `V×V` boolean matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeSet {
    num_nodes: usize,
    contained: Vec<bool>,
}

impl EdgeSet {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            contained: vec![false; num_nodes * num_nodes],
        }
    }

    fn index(&self, a: NodeIndex, b: NodeIndex) -> usize {
        let (a, b) = ordered(a, b);
        a * self.num_nodes + b
    }

    pub fn contains(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.contained[self.index(a, b)]
    }

    /// Returns whether the edge was newly inserted, like `HashSet::insert`.
    pub fn insert(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        let index = self.index(a, b);
        !std::mem::replace(&mut self.contained[index], true)
    }

    /// Make `self` equal to `other` without reallocating.
    pub fn reset_to(&mut self, other: &Self) {
        self.contained.copy_from_slice(&other.contained);
    }
}

/// An approximate Steiner tree: its nodes in the order they joined the tree, its edges in the
/// order they were included and their total weight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SteinerTree {
    vertices: Vec<NodeIndex>,
    edges: Vec<(NodeIndex, NodeIndex)>,
    total_cost: Cost,
}

impl SteinerTree {
    pub(crate) fn new(root: NodeIndex) -> Self {
        Self {
            vertices: vec![root],
            edges: vec![],
            total_cost: 0,
        }
    }

    pub(crate) fn push_vertex(&mut self, vertex: NodeIndex) {
        self.vertices.push(vertex);
    }

    pub(crate) fn push_edge(&mut self, a: NodeIndex, b: NodeIndex, weight: EdgeWeight) {
        self.edges.push(ordered(a, b));
        self.total_cost += Cost::from(weight);
    }

    pub fn vertices(&self) -> &[NodeIndex] {
        &self.vertices
    }

    /// Edges as `(smaller, larger)` pairs.
    pub fn edges(&self) -> &[(NodeIndex, NodeIndex)] {
        &self.edges
    }

    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    pub fn contains(&self, vertex: NodeIndex) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Sum the edge weights again from the graph. `None` if an edge is missing in `graph`.
    pub fn weight_in(&self, graph: &Graph) -> Option<Cost> {
        self.edges
            .iter()
            .map(|&(a, b)| graph.weight(a, b).map(Cost::from))
            .sum()
    }

    /// Human readable report. Node labels are shifted by `label_offset`.
    pub fn write_report<W: Write>(&self, out: &mut W, label_offset: usize) -> io::Result<()> {
        for v in &self.vertices {
            writeln!(out, "Vertex {} is present in T", v + label_offset)?;
        }
        let mut edges = self.edges.clone();
        edges.sort_unstable();
        for (a, b) in edges {
            writeln!(out, "Edge {} <-> {} is in T", a + label_offset, b + label_offset)?;
        }
        writeln!(out, "Total Cost : {}", self.total_cost)
    }

    /// Solution in the PACE format: `VALUE <cost>` followed by one 1-based edge per line.
    pub fn write_ost<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "VALUE {}", self.total_cost)?;
        for &(a, b) in &self.edges {
            writeln!(out, "{} {}", a + 1, b + 1)?;
        }
        Ok(())
    }
}
