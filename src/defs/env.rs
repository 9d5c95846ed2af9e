use super::GraphAgentDef;
use crate::envs::NormalGraphBandit;
use crate::error::GraphBanditError;
use crate::graphs::AdjacencyGraph;
use crate::logging::Logger;
use crate::simulation::{self, RunSummary};
use serde::{Deserialize, Serialize};

/// Graph topology definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GraphDef {
    Path { num_nodes: usize },
    Cycle { num_nodes: usize },
    Complete { num_nodes: usize },
    /// Undirected edge list
    Edges {
        num_nodes: usize,
        edges: Vec<(usize, usize)>,
    },
}

impl GraphDef {
    /// Construct the graph.
    ///
    /// # Errors
    /// If an edge refers to a node that does not exist.
    pub fn build_graph(&self) -> Result<AdjacencyGraph, GraphBanditError> {
        use GraphDef::*;
        Ok(match self {
            Path { num_nodes } => AdjacencyGraph::path(*num_nodes),
            Cycle { num_nodes } => AdjacencyGraph::cycle(*num_nodes),
            Complete { num_nodes } => AdjacencyGraph::complete(*num_nodes),
            Edges { num_nodes, edges } => {
                AdjacencyGraph::from_edges(*num_nodes, edges.iter().copied())?
            }
        })
    }
}

/// Environment definition: a graph bandit with Normal node rewards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphBanditDef {
    pub graph: GraphDef,
    /// Mean reward of each node.
    pub means: Vec<f64>,
    /// Reward standard deviation of each node.
    pub stddevs: Vec<f64>,
}

impl GraphBanditDef {
    /// Construct the environment.
    ///
    /// # Errors
    /// If the graph is invalid or the reward parameters do not fit it.
    pub fn build_env(&self) -> Result<NormalGraphBandit<AdjacencyGraph>, GraphBanditError> {
        let graph = self.graph.build_graph()?;
        Ok(NormalGraphBandit::new(
            graph,
            self.means.clone(),
            self.stddevs.clone(),
        )?)
    }

    /// Build this environment and an agent, then run the agent for `num_steps`.
    ///
    /// # Args
    /// * `agent_def` - Agent definition.
    /// * `num_steps` - Number of steps to run.
    /// * `seed` - Random seed shared by the agent and environment.
    /// * `logger` - Logger for the run statistics. Pass `&mut ()` for no logging.
    ///
    /// # Errors
    /// If the environment or agent cannot be built or the logger rejects a value.
    pub fn run_simulation<L: Logger + ?Sized>(
        &self,
        agent_def: &GraphAgentDef,
        num_steps: u64,
        seed: u64,
        logger: &mut L,
    ) -> Result<RunSummary, GraphBanditError> {
        let env = self.build_env()?;
        Ok(simulation::run_simulation(
            &env, agent_def, num_steps, seed, logger,
        )?)
    }
}
