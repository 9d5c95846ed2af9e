//! Adjacency-list graph
use super::Graph;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error building a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildGraphError {
    #[error("node {node} is out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange { node: usize, num_nodes: usize },
}

/// Undirected graph stored as adjacency lists.
///
/// Neighbours are listed in edge insertion order. Duplicate edges are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdjacencyGraph {
    adjacency: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    /// A graph with `num_nodes` nodes and no edges.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_nodes],
        }
    }

    /// A graph with `num_nodes` nodes and the given undirected edges.
    ///
    /// # Errors
    /// Returns an error if any edge refers to a node `>= num_nodes`.
    pub fn from_edges<I>(num_nodes: usize, edges: I) -> Result<Self, BuildGraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(num_nodes);
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Path graph `0 - 1 - ... - (n-1)`.
    pub fn path(num_nodes: usize) -> Self {
        let mut graph = Self::new(num_nodes);
        for i in 1..num_nodes {
            graph.insert_edge(i - 1, i);
        }
        graph
    }

    /// Cycle graph; a path with the last node joined to the first.
    pub fn cycle(num_nodes: usize) -> Self {
        let mut graph = Self::path(num_nodes);
        if num_nodes > 2 {
            graph.insert_edge(num_nodes - 1, 0);
        }
        graph
    }

    /// Complete graph; every pair of distinct nodes is joined.
    pub fn complete(num_nodes: usize) -> Self {
        let mut graph = Self::new(num_nodes);
        for i in 0..num_nodes {
            for j in (i + 1)..num_nodes {
                graph.insert_edge(i, j);
            }
        }
        graph
    }

    /// Add an undirected edge between `u` and `v`.
    ///
    /// # Errors
    /// Returns an error if either node is out of range.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), BuildGraphError> {
        let num_nodes = self.adjacency.len();
        for node in [u, v] {
            if node >= num_nodes {
                return Err(BuildGraphError::NodeOutOfRange { node, num_nodes });
            }
        }
        self.insert_edge(u, v);
        Ok(())
    }

    /// Number of undirected edges, counting a self loop once.
    pub fn num_edges(&self) -> usize {
        let self_loops = self
            .adjacency
            .iter()
            .enumerate()
            .filter(|(i, nbrs)| nbrs.contains(i))
            .count();
        let degree_sum: usize = self.adjacency.iter().map(Vec::len).sum();
        (degree_sum - self_loops) / 2 + self_loops
    }

    fn insert_edge(&mut self, u: usize, v: usize) {
        if self.adjacency[u].contains(&v) {
            return;
        }
        self.adjacency[u].push(v);
        if u != v {
            self.adjacency[v].push(u);
        }
    }
}

impl Graph for AdjacencyGraph {
    #[inline]
    fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }
}

impl fmt::Display for AdjacencyGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "AdjacencyGraph({} nodes, {} edges)",
            self.num_nodes(),
            self.num_edges()
        )
    }
}
