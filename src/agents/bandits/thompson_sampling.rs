//! Thompson sampling graph agent
use super::super::{
    argmax_neighborhood, check_start_node, BuildAgentError, BuildGraphAgent, GraphAgent,
    GraphState,
};
use crate::estimators::NormalEstimatorConfig;
use crate::graphs::Graph;
use crate::Prng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for [`LocalThompsonSamplingAgent`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalThompsonSamplingAgentConfig {
    /// Prior and exploration decay of each node's reward estimator.
    pub estimator: NormalEstimatorConfig,
    /// Node at which the agent starts.
    pub start: usize,
}

impl LocalThompsonSamplingAgentConfig {
    pub const fn new(estimator: NormalEstimatorConfig, start: usize) -> Self {
        Self { estimator, start }
    }
}

impl<G: Graph> BuildGraphAgent<G> for LocalThompsonSamplingAgentConfig {
    type Agent = LocalThompsonSamplingAgent<G>;

    fn build_agent(&self, graph: &G) -> Result<Self::Agent, BuildAgentError> {
        LocalThompsonSamplingAgent::new(graph, &self.estimator, self.start)
    }
}

/// A Thompson sampling agent over the local neighbourhood.
///
/// Draws one posterior sample of the mean reward for each neighbour of the current node
/// and for the current node itself, and moves to the node with the largest sample.
/// Nodes with few observations have wide posteriors and so are explored more.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalThompsonSamplingAgent<G> {
    state: GraphState<G>,
    curr_s: usize,
}

impl<G: Graph> LocalThompsonSamplingAgent<G> {
    /// Create a new agent.
    ///
    /// # Errors
    /// If the graph is empty, `start` is not a node, or the estimator configuration is invalid.
    pub fn new(
        graph: &G,
        estimator: &NormalEstimatorConfig,
        start: usize,
    ) -> Result<Self, BuildAgentError> {
        check_start_node(graph, start)?;
        Ok(Self {
            state: GraphState::new(graph, estimator)?,
            curr_s: start,
        })
    }

    /// The agent's copy of the graph and its per-node learning state.
    #[inline]
    pub const fn state(&self) -> &GraphState<G> {
        &self.state
    }
}

impl<G> fmt::Display for LocalThompsonSamplingAgent<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalThompsonSamplingAgent(s={})", self.curr_s)
    }
}

impl<G: Graph> GraphAgent for LocalThompsonSamplingAgent<G> {
    #[inline]
    fn current_node(&self) -> usize {
        self.curr_s
    }

    fn next_s(&self, rng: &mut Prng) -> usize {
        argmax_neighborhood(self.state.graph(), self.curr_s, |z| {
            self.state.node(z).est.sample(&mut *rng)
        })
    }

    fn update(&mut self, s: usize, r: f64) {
        self.curr_s = s;
        self.state.observe(s, r);
    }
}
