use super::GraphAgent;
use crate::estimators::BuildEstimatorError;
use thiserror::Error;

/// Build an agent instance.
pub trait BuildGraphAgent<G> {
    type Agent: GraphAgent;

    /// Build an agent that explores a copy of the given graph.
    ///
    /// # Args:
    /// `graph` - The graph in which the agent is to operate. The agent keeps its own copy.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or incompatible with the graph.
    fn build_agent(&self, graph: &G) -> Result<Self::Agent, BuildAgentError>;
}

/// Error building an agent
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildAgentError {
    #[error("invalid node estimator")]
    Estimator(#[from] BuildEstimatorError),
    #[error("merit {0:?} is not supported; expected \"UCB\" or \"TS\"")]
    UnsupportedMerit(String),
    #[error("lookahead horizon must be at least 1; a horizon of 0 would plan the same single step as a horizon of 1")]
    ZeroHorizon,
    #[error("graph must have at least one node")]
    EmptyGraph,
    #[error("start node {start} is out of range for a graph with {num_nodes} nodes")]
    InvalidStartNode { start: usize, num_nodes: usize },
}
