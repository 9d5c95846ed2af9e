use super::{check_start_node, BuildAgentError, BuildGraphAgent, GraphAgent};
use crate::graphs::Graph;
use crate::Prng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for [`LocalRandomWalkAgent`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalRandomWalkAgentConfig {
    /// Node at which the agent starts.
    pub start: usize,
}

impl LocalRandomWalkAgentConfig {
    pub const fn new(start: usize) -> Self {
        Self { start }
    }
}

impl<G: Graph> BuildGraphAgent<G> for LocalRandomWalkAgentConfig {
    type Agent = LocalRandomWalkAgent<G>;

    fn build_agent(&self, graph: &G) -> Result<Self::Agent, BuildAgentError> {
        LocalRandomWalkAgent::new(graph, self.start)
    }
}

/// An agent that walks randomly and never learns.
///
/// Moves to a uniformly chosen neighbour of the current node, or stays put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRandomWalkAgent<G> {
    graph: G,
    curr_s: usize,
}

impl<G: Graph> LocalRandomWalkAgent<G> {
    /// Create a new agent.
    ///
    /// # Errors
    /// If the graph is empty or `start` is not a node.
    pub fn new(graph: &G, start: usize) -> Result<Self, BuildAgentError> {
        check_start_node(graph, start)?;
        Ok(Self {
            graph: graph.clone(),
            curr_s: start,
        })
    }
}

impl<G> fmt::Display for LocalRandomWalkAgent<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalRandomWalkAgent(s={})", self.curr_s)
    }
}

impl<G: Graph> GraphAgent for LocalRandomWalkAgent<G> {
    #[inline]
    fn current_node(&self) -> usize {
        self.curr_s
    }

    fn next_s(&self, rng: &mut Prng) -> usize {
        self.graph
            .closed_neighborhood(self.curr_s)
            .choose(rng)
            .unwrap_or(self.curr_s)
    }

    fn update(&mut self, s: usize, _r: f64) {
        self.curr_s = s;
    }
}
