//! Multi-step lookahead graph agent.
use super::{
    argmax_neighborhood, check_start_node, BuildAgentError, BuildGraphAgent, GraphAgent,
    GraphState,
};
use crate::estimators::NormalEstimatorConfig;
use crate::graphs::{adjacency_with_self_loops, Graph};
use crate::Prng;
use ndarray::{Array, Array1, Array2};
use ndarray_stats::QuantileExt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a [`MultiStepLookaheadAgent`] scores every node before planning.
///
/// Serialized as `"UCB"` or `"TS"`; parsed with [`FromStr`] in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Merit {
    /// Upper confidence bound `mu_1 + beta * sqrt(var_1)`.
    Ucb,
    /// One posterior sample per node.
    Thompson,
}

impl Default for Merit {
    fn default() -> Self {
        Self::Ucb
    }
}

impl FromStr for Merit {
    type Err = BuildAgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ucb" => Ok(Self::Ucb),
            "ts" | "thompson" => Ok(Self::Thompson),
            _ => Err(BuildAgentError::UnsupportedMerit(s.into())),
        }
    }
}

impl TryFrom<String> for Merit {
    type Error = BuildAgentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Merit> for String {
    fn from(merit: Merit) -> Self {
        merit.to_string()
    }
}

impl fmt::Display for Merit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ucb => write!(f, "UCB"),
            Self::Thompson => write!(f, "TS"),
        }
    }
}

/// Configuration for [`MultiStepLookaheadAgent`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiStepLookaheadAgentConfig {
    /// Number of future steps planned over (`T`).
    pub horizon: usize,
    /// Scale factor on the posterior standard deviation for [`Merit::Ucb`].
    pub beta: f64,
    /// Node scoring function.
    pub merit: Merit,
    /// Prior and exploration decay of each node's reward estimator.
    pub estimator: NormalEstimatorConfig,
    /// Node at which the agent starts.
    pub start: usize,
}

impl MultiStepLookaheadAgentConfig {
    pub const fn new(
        horizon: usize,
        beta: f64,
        merit: Merit,
        estimator: NormalEstimatorConfig,
        start: usize,
    ) -> Self {
        Self {
            horizon,
            beta,
            merit,
            estimator,
            start,
        }
    }
}

impl Default for MultiStepLookaheadAgentConfig {
    fn default() -> Self {
        Self::new(100, 0.1, Merit::Ucb, NormalEstimatorConfig::default(), 0)
    }
}

impl<G: Graph> BuildGraphAgent<G> for MultiStepLookaheadAgentConfig {
    type Agent = MultiStepLookaheadAgent<G>;

    fn build_agent(&self, graph: &G) -> Result<Self::Agent, BuildAgentError> {
        MultiStepLookaheadAgent::new(graph, self)
    }
}

/// An agent that plans a path over a time horizon by dynamic programming.
///
/// Every node of the graph gets a merit score (UCB or a Thompson sample).
/// A value table is then filled where `V[t, z]` is the best total merit of a `t + 1` node
/// walk ending at `z`, and the agent moves to the neighbour with the best `V[T-1, ·]`.
/// Only the first hop is taken; the plan is recomputed on every call to `next_s`.
///
/// Non-adjacent nodes are masked out of each maximization by multiplying with the 0/1
/// adjacency matrix. A masked entry therefore counts as value `0`, which beats any
/// all-negative neighbourhood.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStepLookaheadAgent<G> {
    /// Number of future steps planned over (`T`).
    pub horizon: usize,
    /// Scale factor on the posterior standard deviation for [`Merit::Ucb`].
    pub beta: f64,
    /// Node scoring function.
    pub merit: Merit,

    state: GraphState<G>,
    curr_s: usize,
    /// Dense adjacency matrix with self loops. Expensive to build so it is cached.
    adjacency: Array2<f64>,
}

impl<G: Graph> MultiStepLookaheadAgent<G> {
    /// Create a new agent.
    ///
    /// # Errors
    /// If the horizon is zero, the graph is empty, the start node is not in the graph,
    /// or the estimator configuration is invalid.
    pub fn new(graph: &G, config: &MultiStepLookaheadAgentConfig) -> Result<Self, BuildAgentError> {
        if config.horizon == 0 {
            return Err(BuildAgentError::ZeroHorizon);
        }
        check_start_node(graph, config.start)?;
        let state = GraphState::new(graph, &config.estimator)?;
        let adjacency = adjacency_with_self_loops(state.graph());
        Ok(Self {
            horizon: config.horizon,
            beta: config.beta,
            merit: config.merit,
            state,
            curr_s: config.start,
            adjacency,
        })
    }

    /// The agent's copy of the graph and its per-node learning state.
    #[inline]
    pub const fn state(&self) -> &GraphState<G> {
        &self.state
    }

    /// The cached adjacency matrix with self loops.
    #[inline]
    pub const fn adjacency(&self) -> &Array2<f64> {
        &self.adjacency
    }

    /// Merit score of every node, indexed by node.
    pub fn merits(&self, rng: &mut Prng) -> Array1<f64> {
        let nodes = self.state.nodes().iter();
        match self.merit {
            Merit::Ucb => nodes.map(|node| node.est.ucb(self.beta)).collect(),
            Merit::Thompson => nodes.map(|node| node.est.sample(&mut *rng)).collect(),
        }
    }

    /// Dynamic programming value table with shape `(T + 1, num_nodes)`.
    ///
    /// `V[0, z] = merits[z]` and
    /// `V[t, z] = max_j (A[z, j] * V[t - 1, j]) + merits[z]`.
    pub fn value_table(&self, merits: &Array1<f64>) -> Array2<f64> {
        let num_nodes = merits.len();
        let mut values = Array2::zeros((self.horizon + 1, num_nodes));
        values.row_mut(0).assign(merits);
        for t in 1..=self.horizon {
            let prev = values.row(t - 1).to_owned();
            let reachable = Array::from_iter(
                self.adjacency
                    .outer_iter()
                    .map(|a_z| *(&a_z * &prev).max_skipnan()),
            );
            values.row_mut(t).assign(&(reachable + merits));
        }
        values
    }

    /// The next node chosen for the given merits.
    pub fn path_search(&self, merits: &Array1<f64>) -> usize {
        let values = self.value_table(merits);
        self.next_hop(&values, self.curr_s, 1)
    }

    /// The full `T` step path through the value table, starting after the current node.
    ///
    /// The first element is the node returned by [`path_search`](Self::path_search).
    pub fn plan_path(&self, merits: &Array1<f64>) -> Vec<usize> {
        let values = self.value_table(merits);
        let mut path = Vec::with_capacity(self.horizon);
        let mut s = self.curr_s;
        for t in 1..=self.horizon {
            s = self.next_hop(&values, s, t);
            path.push(s);
        }
        path
    }

    /// Best neighbour of `s` by `V[T - t, ·]`.
    fn next_hop(&self, values: &Array2<f64>, s: usize, t: usize) -> usize {
        let row = values.row(self.horizon - t);
        argmax_neighborhood(self.state.graph(), s, |z| row[z])
    }
}

impl<G> fmt::Display for MultiStepLookaheadAgent<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "MultiStepLookaheadAgent(T={}, β={}, merit={}, s={})",
            self.horizon, self.beta, self.merit, self.curr_s
        )
    }
}

impl<G: Graph> GraphAgent for MultiStepLookaheadAgent<G> {
    #[inline]
    fn current_node(&self) -> usize {
        self.curr_s
    }

    fn next_s(&self, rng: &mut Prng) -> usize {
        let merits = self.merits(rng);
        self.path_search(&merits)
    }

    fn update(&mut self, s: usize, r: f64) {
        self.curr_s = s;
        self.state.observe(s, r);
    }
}
