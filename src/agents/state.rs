//! Per-node learning state overlaid on a graph.
use super::BuildAgentError;
use crate::estimators::{NormalBayesianEstimator, NormalEstimatorConfig};
use crate::graphs::Graph;

/// Learning state of one graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeState {
    /// Posterior over the node's mean reward.
    pub est: NormalBayesianEstimator,
    /// Every reward observed at this node, in order.
    pub r_hist: Vec<f64>,
}

impl NodeState {
    pub const fn new(est: NormalBayesianEstimator) -> Self {
        Self {
            est,
            r_hist: Vec::new(),
        }
    }
}

/// A private copy of a graph with a [`NodeState`] for every node.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphState<G> {
    graph: G,
    nodes: Vec<NodeState>,
}

impl<G: Graph> GraphState<G> {
    /// Copy `graph` and give every node a fresh estimator and an empty history.
    ///
    /// # Errors
    /// If the estimator configuration is invalid.
    pub fn new(graph: &G, estimator: &NormalEstimatorConfig) -> Result<Self, BuildAgentError> {
        let prior = NodeState::new(estimator.build()?);
        Ok(Self {
            graph: graph.clone(),
            nodes: vec![prior; graph.num_nodes()],
        })
    }

    /// The graph topology.
    #[inline]
    pub const fn graph(&self) -> &G {
        &self.graph
    }

    /// Learning state of node `z`.
    #[inline]
    pub fn node(&self, z: usize) -> &NodeState {
        &self.nodes[z]
    }

    /// Learning state of every node, indexed by node.
    #[inline]
    pub fn nodes(&self) -> &[NodeState] {
        &self.nodes
    }

    /// Posterior mean and variance of the reward at node `z`.
    #[inline]
    pub fn posterior(&self, z: usize) -> (f64, f64) {
        self.nodes[z].est.get_param()
    }

    /// Record reward `r` observed at node `s`.
    pub fn observe(&mut self, s: usize, r: f64) {
        let node = &mut self.nodes[s];
        node.r_hist.push(r);
        node.est.update(r);
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod graph_state {
    use super::*;
    use crate::graphs::AdjacencyGraph;

    #[test]
    fn every_node_starts_at_prior() {
        let state = GraphState::new(&AdjacencyGraph::path(3), &NormalEstimatorConfig::default())
            .unwrap();
        assert_eq!(state.nodes().len(), 3);
        for node in state.nodes() {
            assert_eq!(node.est.get_param(), (0.0, 1.0));
            assert!(node.r_hist.is_empty());
        }
    }

    #[test]
    fn observe_updates_one_node() {
        let mut state =
            GraphState::new(&AdjacencyGraph::path(3), &NormalEstimatorConfig::default())
                .unwrap();
        state.observe(1, 2.0);
        state.observe(1, -1.0);
        assert_eq!(state.node(1).r_hist, vec![2.0, -1.0]);
        assert_eq!(state.node(1).est.num_observations(), 2);
        assert_eq!(state.node(0).est.num_observations(), 0);
        assert_eq!(state.posterior(2), (0.0, 1.0));
    }

    #[test]
    fn invalid_estimator() {
        let config = NormalEstimatorConfig::new((1.0, 1.0), 50, 0.01);
        assert!(matches!(
            GraphState::new(&AdjacencyGraph::path(2), &config),
            Err(BuildAgentError::Estimator(_))
        ));
    }
}
