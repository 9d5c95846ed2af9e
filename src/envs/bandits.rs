//! Normal-reward graph bandit
use super::GraphBandit;
use crate::graphs::Graph;
use crate::Prng;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error building an environment
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildEnvError {
    #[error("expected {expected} arm parameters; got {means} means and {stddevs} standard deviations")]
    LengthMismatch {
        expected: usize,
        means: usize,
        stddevs: usize,
    },
    #[error("node {node} has invalid reward standard deviation {stddev}")]
    InvalidStdDev { node: usize, stddev: f64 },
}

/// A graph bandit with Normal-distributed node rewards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalGraphBandit<G> {
    graph: G,
    means: Vec<f64>,
    stddevs: Vec<f64>,
}

impl<G: Graph> NormalGraphBandit<G> {
    /// Create a new graph bandit.
    ///
    /// # Args
    /// * `graph` - Graph topology.
    /// * `means` - Mean reward of each node.
    /// * `stddevs` - Reward standard deviation of each node. Zero gives deterministic rewards.
    ///
    /// # Errors
    /// If there is not exactly one mean and standard deviation per node
    /// or a standard deviation is negative or not finite.
    pub fn new(graph: G, means: Vec<f64>, stddevs: Vec<f64>) -> Result<Self, BuildEnvError> {
        let expected = graph.num_nodes();
        if means.len() != expected || stddevs.len() != expected {
            return Err(BuildEnvError::LengthMismatch {
                expected,
                means: means.len(),
                stddevs: stddevs.len(),
            });
        }
        if let Some((node, &stddev)) = stddevs
            .iter()
            .enumerate()
            .find(|(_, s)| !(s.is_finite() && **s >= 0.0))
        {
            return Err(BuildEnvError::InvalidStdDev { node, stddev });
        }
        Ok(Self {
            graph,
            means,
            stddevs,
        })
    }

    /// Graph bandit where every node has the same reward standard deviation.
    ///
    /// # Errors
    /// See [`NormalGraphBandit::new`].
    pub fn with_stddev(graph: G, means: Vec<f64>, stddev: f64) -> Result<Self, BuildEnvError> {
        let stddevs = vec![stddev; means.len()];
        Self::new(graph, means, stddevs)
    }
}

impl<G: fmt::Display> fmt::Display for NormalGraphBandit<G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NormalGraphBandit({}, {:?})", self.graph, self.means)
    }
}

impl<G: Graph> GraphBandit for NormalGraphBandit<G> {
    type Graph = G;

    #[inline]
    fn graph(&self) -> &G {
        &self.graph
    }

    fn reward(&self, node: usize, rng: &mut Prng) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        self.means[node] + self.stddevs[node] * z
    }

    #[inline]
    fn mean_reward(&self, node: usize) -> f64 {
        self.means[node]
    }
}
