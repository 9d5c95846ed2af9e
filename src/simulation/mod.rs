//! Simulating agent-environment interaction
use crate::agents::{BuildAgentError, GraphAgent};
use crate::defs::GraphAgentDef;
use crate::envs::GraphBandit;
use crate::graphs::Graph;
use crate::logging::{Event, LogError, Loggable, Logger};
use crate::utils::stats::OnlineMeanVariance;
use crate::Prng;
use rand::SeedableRng;
use thiserror::Error;

/// Error initializing or running a simulation.
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("error building agent")]
    BuildAgent(#[from] BuildAgentError),
    #[error("error logging simulation statistics")]
    Log(#[from] LogError),
}

/// Statistics of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Sum of all observed rewards.
    pub total_reward: f64,
    /// Mean and variance of the observed rewards.
    pub reward_stats: OnlineMeanVariance<f64>,
    /// Sum over steps of the gap between the best node mean and the visited node mean.
    pub regret: f64,
    /// Number of times each node was visited.
    pub visit_counts: Vec<u64>,
}

impl RunSummary {
    fn new(num_nodes: usize) -> Self {
        Self {
            total_reward: 0.0,
            reward_stats: OnlineMeanVariance::default(),
            regret: 0.0,
            visit_counts: vec![0; num_nodes],
        }
    }
}

/// Run an agent on a graph bandit for a fixed number of steps.
///
/// Each step the agent proposes a node with [`GraphAgent::next_s`],
/// a reward is sampled at that node, and the agent is updated with it.
///
/// # Args
/// * `env` - The graph bandit environment.
/// * `agent` - The agent. Should have been built on the same graph as `env`.
/// * `num_steps` - Number of steps to run.
/// * `rng` - Random source for both the agent and the environment.
/// * `logger` - Logs `reward`, `node` and `regret` on every step.
///
/// # Errors
/// If `logger` rejects one of the logged values.
pub fn run_agent<E, A, L>(
    env: &E,
    agent: &mut A,
    num_steps: u64,
    rng: &mut Prng,
    logger: &mut L,
) -> Result<RunSummary, LogError>
where
    E: GraphBandit + ?Sized,
    A: GraphAgent + ?Sized,
    L: Logger + ?Sized,
{
    let num_nodes = env.graph().num_nodes();
    let best_mean = env
        .best_node()
        .map_or(0.0, |best| env.mean_reward(best));
    let mut summary = RunSummary::new(num_nodes);

    for _ in 0..num_steps {
        let s = agent.next_s(rng);
        let r = env.reward(s, rng);
        agent.update(s, r);

        let regret = best_mean - env.mean_reward(s);
        summary.total_reward += r;
        summary.reward_stats.push(r);
        summary.regret += regret;
        summary.visit_counts[s] += 1;

        logger.log(Event::Step, "reward", r.into())?;
        logger.log(
            Event::Step,
            "node",
            Loggable::IndexSample {
                value: s,
                size: num_nodes,
            },
        )?;
        logger.log(Event::Step, "regret", regret.into())?;
        logger.done(Event::Step);
    }

    logger.log(Event::Run, "total_reward", summary.total_reward.into())?;
    logger.log(Event::Run, "total_regret", summary.regret.into())?;
    logger.done(Event::Run);
    Ok(summary)
}

/// Build an agent from its definition and run it on a graph bandit.
///
/// # Args
/// * `env` - The graph bandit environment. The agent explores a copy of its graph.
/// * `agent_def` - Agent definition.
/// * `num_steps` - Number of steps to run.
/// * `seed` - Seeds the random source shared by the agent and environment.
/// * `logger` - The logger to use.
///
/// # Errors
/// If the agent cannot be built or `logger` rejects a logged value.
pub fn run_simulation<E, L>(
    env: &E,
    agent_def: &GraphAgentDef,
    num_steps: u64,
    seed: u64,
    logger: &mut L,
) -> Result<RunSummary, SimulatorError>
where
    E: GraphBandit + ?Sized,
    E::Graph: 'static,
    L: Logger + ?Sized,
{
    let mut agent = agent_def.build(env.graph())?;
    let mut rng = Prng::seed_from_u64(seed);
    Ok(run_agent(env, &mut agent, num_steps, &mut rng, logger)?)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::agents::{LocalRandomWalkAgentConfig, LocalUCBAgentConfig};
    use crate::envs::NormalGraphBandit;
    use crate::graphs::AdjacencyGraph;
    use crate::logging::CLILogger;
    use std::time::Duration;

    fn env() -> NormalGraphBandit<AdjacencyGraph> {
        NormalGraphBandit::with_stddev(AdjacencyGraph::path(4), vec![0.0, 0.1, 0.2, 1.0], 0.0)
            .unwrap()
    }

    #[test]
    fn summary_counts_every_step() {
        let env = env();
        let def = GraphAgentDef::LocalRandomWalk(LocalRandomWalkAgentConfig::default());
        let summary = run_simulation(&env, &def, 100, 0, &mut ()).unwrap();
        assert_eq!(summary.visit_counts.iter().sum::<u64>(), 100);
        assert_eq!(summary.reward_stats.count(), 100);
        assert!(summary.regret >= 0.0);
    }

    #[test]
    fn deterministic_rewards_sum_to_visits() {
        let env = env();
        let def = GraphAgentDef::LocalUCB(LocalUCBAgentConfig::default());
        let summary = run_simulation(&env, &def, 50, 0, &mut ()).unwrap();
        let expected: f64 = summary
            .visit_counts
            .iter()
            .enumerate()
            .map(|(z, &n)| env.mean_reward(z) * n as f64)
            .sum();
        assert!((summary.total_reward - expected).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_run() {
        let env = NormalGraphBandit::with_stddev(AdjacencyGraph::cycle(5), vec![0.0; 5], 1.0)
            .unwrap();
        let def = GraphAgentDef::default();
        let a = run_simulation(&env, &def, 100, 7, &mut ()).unwrap();
        let b = run_simulation(&env, &def, 100, 7, &mut ()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn logs_to_cli_logger() {
        let env = env();
        let def = GraphAgentDef::LocalUCB(LocalUCBAgentConfig::default());
        let mut logger = CLILogger::new(Duration::from_secs(3600), true);
        assert!(run_simulation(&env, &def, 20, 0, &mut logger).is_ok());
    }

    #[test]
    fn conflicting_log_name() {
        let env = env();
        let def = GraphAgentDef::LocalUCB(LocalUCBAgentConfig::default());
        let mut logger = CLILogger::new(Duration::from_secs(3600), true);
        logger.log(Event::Step, "node", 1.0.into()).unwrap();
        assert!(matches!(
            run_simulation(&env, &def, 5, 0, &mut logger),
            Err(SimulatorError::Log(_))
        ));
    }

    #[test]
    fn bad_start_node() {
        let env = env();
        let def = GraphAgentDef::LocalRandomWalk(LocalRandomWalkAgentConfig::new(10));
        assert!(matches!(
            run_simulation(&env, &def, 5, 0, &mut ()),
            Err(SimulatorError::BuildAgent(
                BuildAgentError::InvalidStartNode { .. }
            ))
        ));
    }
}
