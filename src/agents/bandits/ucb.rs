//! Upper confidence bound graph agent.
use super::super::{
    argmax_neighborhood, check_start_node, BuildAgentError, BuildGraphAgent, GraphAgent,
    GraphState,
};
use crate::estimators::NormalEstimatorConfig;
use crate::graphs::Graph;
use crate::Prng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a [`LocalUCBAgent`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalUCBAgentConfig {
    /// Scale factor on the posterior standard deviation; controls the exploration rate.
    pub beta: f64,
    /// Prior and exploration decay of each node's reward estimator.
    pub estimator: NormalEstimatorConfig,
    /// Node at which the agent starts.
    pub start: usize,
}

impl LocalUCBAgentConfig {
    pub const fn new(beta: f64, estimator: NormalEstimatorConfig, start: usize) -> Self {
        Self {
            beta,
            estimator,
            start,
        }
    }
}

impl Default for LocalUCBAgentConfig {
    fn default() -> Self {
        Self::new(0.1, NormalEstimatorConfig::default(), 0)
    }
}

impl<G: Graph> BuildGraphAgent<G> for LocalUCBAgentConfig {
    type Agent = LocalUCBAgent<G>;

    fn build_agent(&self, graph: &G) -> Result<Self::Agent, BuildAgentError> {
        LocalUCBAgent::new(graph, self.beta, &self.estimator, self.start)
    }
}

/// An upper confidence bound agent over the local neighbourhood.
///
/// Scores each neighbour of the current node, and the current node itself,
/// by `mu_1 + beta * sqrt(var_1)` of its posterior and moves to the best.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalUCBAgent<G> {
    /// Scale factor on the posterior standard deviation; controls the exploration rate.
    pub beta: f64,

    state: GraphState<G>,
    curr_s: usize,
}

impl<G: Graph> LocalUCBAgent<G> {
    /// Create a new agent.
    ///
    /// # Errors
    /// If the graph is empty, `start` is not a node, or the estimator configuration is invalid.
    pub fn new(
        graph: &G,
        beta: f64,
        estimator: &NormalEstimatorConfig,
        start: usize,
    ) -> Result<Self, BuildAgentError> {
        check_start_node(graph, start)?;
        Ok(Self {
            beta,
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

impl<G> fmt::Display for LocalUCBAgent<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalUCBAgent(β={}, s={})", self.beta, self.curr_s)
    }
}

impl<G: Graph> GraphAgent for LocalUCBAgent<G> {
    #[inline]
    fn current_node(&self) -> usize {
        self.curr_s
    }

    fn next_s(&self, _rng: &mut Prng) -> usize {
        argmax_neighborhood(self.state.graph(), self.curr_s, |z| {
            self.state.node(z).est.ucb(self.beta)
        })
    }

    fn update(&mut self, s: usize, r: f64) {
        self.curr_s = s;
        self.state.observe(s, r);
    }
}
