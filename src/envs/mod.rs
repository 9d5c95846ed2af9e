//! Graph bandit environments
mod bandits;

pub use bandits::{BuildEnvError, NormalGraphBandit};

use crate::graphs::Graph;
use crate::Prng;

/// A graph whose nodes pay stochastic rewards when visited.
pub trait GraphBandit {
    type Graph: Graph;

    /// The graph topology.
    fn graph(&self) -> &Self::Graph;

    /// Sample the reward for visiting `node`.
    ///
    /// # Panics
    /// If `node` is not a node of the graph.
    fn reward(&self, node: usize, rng: &mut Prng) -> f64;

    /// The expected reward of `node`.
    fn mean_reward(&self, node: usize) -> f64;

    /// The node with the highest expected reward; the first on ties.
    fn best_node(&self) -> Option<usize> {
        use crate::utils::iter::ArgMax;
        self.graph()
            .nodes()
            .map(|z| self.mean_reward(z))
            .argmax()
    }
}
