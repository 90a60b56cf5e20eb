//! Approximate Steiner trees in small, dense, weighted graphs with the shortest path
//! heuristic.

mod error;
mod graph;
mod shortest_paths;
mod steiner_tree;
mod util;

pub use error::Error;
pub use graph::{parse_instance, EdgeWeight, Graph, Instance, NodeIndex, ParseError};
pub use shortest_paths::{dijkstra, ShortestPath, ShortestPaths};
pub use steiner_tree::algorithms::{shortest_path_heuristic, Options, TerminalSelection};
pub use steiner_tree::tree::{Cost, EdgeSet, SteinerTree};
pub use util::NaturalOrInfinite;
use std::error::Error as StdError;

/// Result with boxed error as trait object.
pub type GenericResult<T> = Result<T, Box<dyn StdError + Send + Sync>>;
