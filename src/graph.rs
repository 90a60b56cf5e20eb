use crate::error::Error;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error as ThisError;

pub type NodeIndex = usize;
pub type EdgeWeight = u32;

/// Undirected weighted graph stored as a dense, row-major adjacency matrix.
///
/// A weight of `0` means "no edge", so zero-cost edges cannot be represented. Every way of
/// adding an edge rejects weight `0` instead of silently dropping it.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Graph {
    num_nodes: usize,
    weights: Vec<EdgeWeight>,
}

impl Graph {
    /// Graph with `num_nodes` nodes and no edges.
    pub fn with_nodes(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            weights: vec![0; num_nodes * num_nodes],
        }
    }

    /// Build a graph from the rows of a symmetric adjacency matrix.
    pub fn from_matrix<R: AsRef<[EdgeWeight]>>(rows: &[R]) -> Result<Self, Error> {
        let num_nodes = rows.len();
        if rows.iter().any(|row| row.as_ref().len() != num_nodes) {
            return Err(Error::NotSquare);
        }
        let weights = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect::<Vec<_>>();
        let graph = Self { num_nodes, weights };
        for from in graph.node_indices() {
            if graph.raw_weight(from, from) != 0 {
                return Err(Error::SelfLoop { node: from });
            }
            for to in from + 1..num_nodes {
                if graph.raw_weight(from, to) != graph.raw_weight(to, from) {
                    return Err(Error::Asymmetric { from, to });
                }
            }
        }
        Ok(graph)
    }

    /// Insert (or overwrite) the undirected edge `{from, to}`.
    pub fn add_edge(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        weight: EdgeWeight,
    ) -> Result<(), Error> {
        if !self.contains_node(from) || !self.contains_node(to) || weight == 0 {
            return Err(Error::InvalidEdge { from, to });
        }
        if from == to {
            return Err(Error::SelfLoop { node: from });
        }
        let n = self.num_nodes;
        self.weights[from * n + to] = weight;
        self.weights[to * n + from] = weight;
        Ok(())
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn contains_node(&self, node: NodeIndex) -> bool {
        node < self.num_nodes
    }

    /// Iterator over the node indices.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        0..self.num_nodes
    }

    /// Weight of the edge `{from, to}`, `None` if there is no such edge.
    ///
    /// # Panics
    /// If either index is out of range.
    pub fn weight(&self, from: NodeIndex, to: NodeIndex) -> Option<EdgeWeight> {
        NonZeroU32::new(self.raw_weight(from, to)).map(NonZeroU32::get)
    }

    fn raw_weight(&self, from: NodeIndex, to: NodeIndex) -> EdgeWeight {
        self.weights[from * self.num_nodes + to]
    }

    /// Neighbors of `node` together with the connecting edge weight, in index order.
    ///
    /// # Panics
    /// If `node` is out of range.
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, EdgeWeight)> + '_ {
        let row = &self.weights[node * self.num_nodes..(node + 1) * self.num_nodes];
        row.iter()
            .enumerate()
            .filter(|&(_, &weight)| weight != 0)
            .map(|(to, &weight)| (to, weight))
    }

    /// Return an iterator over all edges. Only edges `(a,b)` with `a < b` are returned since
    /// this is an undirected graph.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, EdgeWeight)> + '_ {
        self.node_indices().flat_map(move |from| {
            self.neighbors(from)
                .filter(move |&(to, _)| from < to)
                .map(move |(to, weight)| (from, to, weight))
        })
    }
}

/// A graph together with the ordered list of terminals that have to be connected.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Instance {
    pub graph: Graph,
    pub terminals: Vec<NodeIndex>,
}

impl Instance {
    /// The 7-node example graph (node `0` is isolated) with terminals `1, 6, 3`.
    pub fn reference() -> Self {
        let rows: [[EdgeWeight; 7]; 7] = [
            [0, 0, 0, 0, 0, 0, 0],
            [0, 0, 7, 0, 0, 0, 6],
            [0, 7, 0, 1, 0, 0, 5],
            [0, 0, 1, 0, 1, 3, 0],
            [0, 0, 0, 1, 0, 1, 4],
            [0, 0, 0, 3, 1, 0, 10],
            [0, 6, 5, 0, 4, 10, 0],
        ];
        let graph = Graph {
            num_nodes: rows.len(),
            weights: rows.iter().flatten().copied().collect(),
        };
        Self {
            graph,
            terminals: vec![1, 6, 3],
        }
    }
}

impl FromStr for Instance {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_instance(s)
    }
}

#[derive(Debug, PartialEq, Eq, ThisError)]
#[error("{message} ({}:{column})", .line + 1)]
pub struct ParseError {
    line: usize,
    column: usize,
    message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: String) -> Self {
        ParseError {
            line,
            column,
            message,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Position in the input: the remaining text plus line and column for error messages.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
struct Cursor<'a> {
    rest: &'a str,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            line: 0,
            column: 0,
        }
    }

    fn error<T>(&self, message: impl Into<String>) -> ParseResult<T> {
        Err(ParseError::new(self.line, self.column, message.into()))
    }

    fn advance(self, bytes: usize) -> Self {
        Self {
            rest: &self.rest[bytes..],
            column: self.column + bytes,
            ..self
        }
    }

    /// Skip whitespace, but never the end of the current line.
    fn skip_whitespace(self) -> Self {
        let trimmed = self
            .rest
            .trim_start_matches(|c: char| c.is_ascii_whitespace() && c != '\n');
        self.advance(self.rest.len() - trimmed.len())
    }

    /// Error if the rest of the input doesn't start with `expected`.
    fn expect(self, expected: &str) -> ParseResult<Self> {
        if self.rest.starts_with(expected) {
            Ok(self.advance(expected.len()))
        } else {
            self.error(format!(
                "expected '{}' but got {:?}",
                expected,
                self.rest.split_terminator('\n').next()
            ))
        }
    }

    /// Like `expect` but ignores leading whitespace.
    fn symbol(self, symbol: &str) -> ParseResult<Self> {
        self.skip_whitespace().expect(symbol)
    }

    /// Parse the next whitespace separated token of the current line.
    fn value<T: FromStr>(self) -> ParseResult<(T, Self)>
    where
        T::Err: std::fmt::Display,
    {
        let start = self.skip_whitespace();
        let token = start
            .rest
            .split(|c: char| c.is_ascii_whitespace())
            .next()
            .filter(|token| !token.is_empty());
        let Some(token) = token else {
            return start.error("unexpected end of line");
        };
        match token.parse() {
            Ok(value) => Ok((value, start.advance(token.len()))),
            Err(err) => start.error(format!("could not parse '{}': {}", token, err)),
        }
    }

    /// Parse a line of the form `NAME VALUE` and move to the next line.
    fn key_value<T: FromStr>(self, name: &str) -> ParseResult<(T, Self)>
    where
        T::Err: std::fmt::Display,
    {
        let (value, state) = self.symbol(name)?.value()?;
        Ok((value, state.end_of_line()?))
    }

    /// Expect only whitespace until the end of the line, then move to the next line.
    fn end_of_line(self) -> ParseResult<Self> {
        let state = self.skip_whitespace();
        if state.rest.is_empty() {
            return Ok(state);
        }
        let state = state.expect("\n")?;
        Ok(Self {
            line: state.line + 1,
            column: 0,
            ..state
        })
    }

    fn skip_empty_lines(mut self) -> Self {
        loop {
            let state = self.skip_whitespace();
            if !state.rest.starts_with('\n') {
                return self;
            }
            match state.end_of_line() {
                Ok(next) => self = next,
                Err(_) => return self,
            }
        }
    }

    /// Parse a 1-based node index and convert it to the 0-based index used internally.
    fn node(self, num_nodes: usize) -> ParseResult<(NodeIndex, Self)> {
        let start = self.skip_whitespace();
        let (raw, state): (usize, _) = start.value()?;
        if raw == 0 || raw > num_nodes {
            return start.error(format!(
                "node index {} is not between 1 and {}",
                raw, num_nodes
            ));
        }
        Ok((raw - 1, state))
    }
}

/// Parse an edge line `E u v w`.
fn parse_edge(
    state: Cursor<'_>,
    num_nodes: usize,
) -> ParseResult<((NodeIndex, NodeIndex, EdgeWeight), Cursor<'_>)> {
    let line_start = state.symbol("E")?;
    let (from, state) = line_start.node(num_nodes)?;
    let (to, state) = state.node(num_nodes)?;
    let weight_start = state.skip_whitespace();
    let (weight, state): (EdgeWeight, _) = weight_start.value()?;
    if weight == 0 {
        return weight_start.error("edge weight must be positive");
    }
    if from == to {
        return line_start.error(format!("self loop at node {}", from + 1));
    }
    Ok(((from, to, weight), state.end_of_line()?))
}

/// Parse an instance in the PACE 2018 Steiner tree format.
///
/// Node indices are 1-based in the file and 0-based in the result. The terminal order of the
/// file is kept; repeated terminals and repeated edges keep their first occurrence.
pub fn parse_instance(text: &str) -> ParseResult<Instance> {
    let mut state = Cursor::new(text).skip_empty_lines();
    state = state.symbol("SECTION")?.symbol("Graph")?.end_of_line()?;
    let (num_nodes, next) = state.key_value::<usize>("Nodes")?;
    let (num_edges, next) = next.key_value::<usize>("Edges")?;
    state = next;
    let mut graph = Graph::with_nodes(num_nodes);
    for _ in 0..num_edges {
        let ((from, to, weight), next) = parse_edge(state, num_nodes)?;
        if graph.weight(from, to).is_none() {
            graph
                .add_edge(from, to, weight)
                .or_else(|err| state.error(err.to_string()))?;
        }
        state = next;
    }
    state = state.symbol("END")?.end_of_line()?.skip_empty_lines();
    state = state.symbol("SECTION")?.symbol("Terminals")?.end_of_line()?;
    let (num_terminals, next) = state.key_value::<usize>("Terminals")?;
    state = next;
    let mut terminals = Vec::with_capacity(num_terminals);
    for _ in 0..num_terminals {
        let (terminal, next) = state.symbol("T")?.node(num_nodes)?;
        if !terminals.contains(&terminal) {
            terminals.push(terminal);
        }
        state = next.end_of_line()?;
    }
    state = state.symbol("END")?.end_of_line()?.skip_empty_lines();
    state.symbol("EOF")?;
    Ok(Instance { graph, terminals })
}
