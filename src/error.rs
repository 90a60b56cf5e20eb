use crate::graph::NodeIndex;
use thiserror::Error;

/// Structural input errors. None of them is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("source vertex {vertex} is out of range (graph has {num_nodes} nodes)")]
    InvalidSource { vertex: NodeIndex, num_nodes: usize },

    #[error("terminal {terminal} is out of range (graph has {num_nodes} nodes)")]
    InvalidTerminal { terminal: NodeIndex, num_nodes: usize },

    #[error("terminal {terminal} cannot be connected to the tree")]
    UnreachableTerminal { terminal: NodeIndex },

    #[error("no terminals given")]
    EmptyTerminalSet,

    #[error("adjacency matrix is not square")]
    NotSquare,

    #[error("adjacency matrix is not symmetric at ({from}, {to})")]
    Asymmetric { from: NodeIndex, to: NodeIndex },

    #[error("self loop at node {node}")]
    SelfLoop { node: NodeIndex },

    #[error("edge ({from}, {to}) is out of range or has weight 0")]
    InvalidEdge { from: NodeIndex, to: NodeIndex },
}
