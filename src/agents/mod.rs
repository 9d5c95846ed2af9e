//! Agents that explore a graph of bandit arms.
//!
//! An agent sits at one node of a graph.
//! Each step it proposes a node to move to with [`GraphAgent::next_s`]
//! and is then told the reward observed there with [`GraphAgent::update`].
pub mod bandits;
mod builder;
mod lookahead;
mod random;
mod state;
#[cfg(test)]
pub mod testing;

pub use bandits::{
    LocalThompsonSamplingAgent, LocalThompsonSamplingAgentConfig, LocalUCBAgent,
    LocalUCBAgentConfig,
};
pub use builder::{BuildAgentError, BuildGraphAgent};
pub use lookahead::{Merit, MultiStepLookaheadAgent, MultiStepLookaheadAgentConfig};
pub use random::{LocalRandomWalkAgent, LocalRandomWalkAgentConfig};
pub use state::{GraphState, NodeState};

use crate::graphs::Graph;
use crate::utils::iter::ArgMax;
use crate::Prng;

/// An agent that moves between the nodes of a graph and learns from the rewards it observes.
pub trait GraphAgent {
    /// The node the agent currently occupies.
    fn current_node(&self) -> usize;

    /// Propose the next node to visit.
    ///
    /// Does not modify the agent. Randomized agents draw from `rng`.
    fn next_s(&self, rng: &mut Prng) -> usize;

    /// Move the agent to node `s`, where reward `r` was observed.
    ///
    /// Whether `s` is reachable from the current node is not checked.
    ///
    /// # Panics
    /// If `s` is not a node of the graph.
    fn update(&mut self, s: usize, r: f64);
}

impl<T: GraphAgent + ?Sized> GraphAgent for Box<T> {
    fn current_node(&self) -> usize {
        T::current_node(self)
    }
    fn next_s(&self, rng: &mut Prng) -> usize {
        T::next_s(self, rng)
    }
    fn update(&mut self, s: usize, r: f64) {
        T::update(self, s, r)
    }
}

/// The node in the closed neighbourhood of `node` with the highest score.
///
/// Candidates are scored in [`Graph::closed_neighborhood`] order
/// and ties go to the first candidate.
pub fn argmax_neighborhood<G, F>(graph: &G, node: usize, score: F) -> usize
where
    G: Graph,
    F: FnMut(usize) -> f64,
{
    let candidates: Vec<usize> = graph.closed_neighborhood(node).collect();
    candidates
        .iter()
        .copied()
        .map(score)
        .argmax()
        .map_or(node, |i| candidates[i])
}

/// Check that a start node exists in a graph.
fn check_start_node<G: Graph>(graph: &G, start: usize) -> Result<(), BuildAgentError> {
    let num_nodes = graph.num_nodes();
    if num_nodes == 0 {
        return Err(BuildAgentError::EmptyGraph);
    }
    if start >= num_nodes {
        return Err(BuildAgentError::InvalidStartNode { start, num_nodes });
    }
    Ok(())
}

#[cfg(test)]
mod argmax_neighborhood {
    use super::*;
    use crate::graphs::AdjacencyGraph;

    #[test]
    fn picks_best_neighbor() {
        let graph = AdjacencyGraph::path(3);
        let scores = [0.0, 1.0, 5.0];
        assert_eq!(argmax_neighborhood(&graph, 1, |z| scores[z]), 2);
        assert_eq!(argmax_neighborhood(&graph, 0, |z| scores[z]), 1);
    }

    #[test]
    fn ties_go_to_first_candidate() {
        let graph = AdjacencyGraph::path(3);
        // Node 1 is enumerated as [0, 2, 1]
        assert_eq!(argmax_neighborhood(&graph, 1, |_| 1.0), 0);
    }

    #[test]
    fn isolated_node_stays() {
        let graph = AdjacencyGraph::new(2);
        assert_eq!(argmax_neighborhood(&graph, 1, |z| z as f64), 1);
    }
}
