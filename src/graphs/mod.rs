//! Graph topology.
//!
//! Nodes are identified by contiguous indices `0 .. num_nodes`.
mod adjacency;

pub use adjacency::{AdjacencyGraph, BuildGraphError};

use ndarray::Array2;
use std::iter::{self, Chain, Copied, Once};
use std::slice;

/// Iterator over a node's neighbours followed by the node itself.
pub type ClosedNeighborhood<'a> = Chain<Copied<slice::Iter<'a, usize>>, Once<usize>>;

/// A graph whose nodes are indexed by `0 .. num_nodes()`.
///
/// Cloning must produce an independent (deep) copy.
pub trait Graph: Clone {
    /// Number of nodes in the graph.
    fn num_nodes(&self) -> usize;

    /// The neighbours of a node in a stable order.
    ///
    /// # Panics
    /// May panic if `node >= self.num_nodes()`.
    fn neighbors(&self, node: usize) -> &[usize];

    /// Iterator over all node identifiers.
    fn nodes(&self) -> std::ops::Range<usize> {
        0..self.num_nodes()
    }

    /// Number of neighbours of a node.
    fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    /// The neighbours of a node in order, then the node itself.
    ///
    /// These are the nodes an agent at `node` may move to, including staying put.
    fn closed_neighborhood(&self, node: usize) -> ClosedNeighborhood<'_> {
        self.neighbors(node)
            .iter()
            .copied()
            .chain(iter::once(node))
    }
}

/// Dense adjacency matrix of a graph with a self loop added to every node.
///
/// Entry `(i, j)` is `1.0` if `j` is a neighbour of `i` or `i == j`, otherwise `0.0`.
pub fn adjacency_with_self_loops<G: Graph>(graph: &G) -> Array2<f64> {
    let n = graph.num_nodes();
    let mut adjacency = Array2::eye(n);
    for i in graph.nodes() {
        for &j in graph.neighbors(i) {
            adjacency[(i, j)] = 1.0;
        }
    }
    adjacency
}
