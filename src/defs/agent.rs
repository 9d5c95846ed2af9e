use crate::agents::{
    BuildAgentError, BuildGraphAgent, GraphAgent, LocalRandomWalkAgentConfig,
    LocalThompsonSamplingAgentConfig, LocalUCBAgentConfig, MultiStepLookaheadAgentConfig,
};
use crate::graphs::Graph;
use serde::{Deserialize, Serialize};

/// Agent definition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GraphAgentDef {
    /// Thompson sampling among the current node and its neighbours.
    LocalThompsonSampling(LocalThompsonSamplingAgentConfig),
    /// Upper confidence bound among the current node and its neighbours.
    LocalUCB(LocalUCBAgentConfig),
    /// Uniform random walk; does not learn.
    LocalRandomWalk(LocalRandomWalkAgentConfig),
    /// Dynamic programming over a time horizon with UCB or Thompson merits.
    MultiStepLookahead(MultiStepLookaheadAgentConfig),
}

impl Default for GraphAgentDef {
    fn default() -> Self {
        Self::LocalThompsonSampling(LocalThompsonSamplingAgentConfig::default())
    }
}

impl GraphAgentDef {
    /// Construct an agent that explores a copy of `graph`.
    ///
    /// # Errors
    /// If the agent configuration is invalid or incompatible with the graph.
    pub fn build<G>(&self, graph: &G) -> Result<Box<dyn GraphAgent>, BuildAgentError>
    where
        G: Graph + 'static,
    {
        use GraphAgentDef::*;
        match self {
            LocalThompsonSampling(config) => Ok(Box::new(config.build_agent(graph)?)),
            LocalUCB(config) => Ok(Box::new(config.build_agent(graph)?)),
            LocalRandomWalk(config) => Ok(Box::new(config.build_agent(graph)?)),
            MultiStepLookahead(config) => Ok(Box::new(config.build_agent(graph)?)),
        }
    }
}

#[cfg(test)]
mod graph_agent_def {
    use super::*;
    use crate::agents::Merit;
    use crate::graphs::AdjacencyGraph;
    use crate::Prng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[rstest]
    #[case(GraphAgentDef::default())]
    #[case(GraphAgentDef::LocalUCB(LocalUCBAgentConfig::default()))]
    #[case(GraphAgentDef::LocalRandomWalk(LocalRandomWalkAgentConfig::default()))]
    #[case(GraphAgentDef::MultiStepLookahead(MultiStepLookaheadAgentConfig::default()))]
    fn build_and_step(#[case] def: GraphAgentDef) {
        let graph = AdjacencyGraph::path(3);
        let mut agent = def.build(&graph).unwrap();
        let mut rng = Prng::seed_from_u64(0);
        let s = agent.next_s(&mut rng);
        assert!(s < 2);
        agent.update(s, 1.0);
        assert_eq!(agent.current_node(), s);
    }

    #[test]
    fn from_json() {
        let def: GraphAgentDef = serde_json::from_str(
            r#"{
                "type": "MultiStepLookahead",
                "horizon": 5,
                "beta": 0.2,
                "merit": "TS",
                "estimator": {"mu_lim": [0.0, 2.0], "m": 10, "epsilon": 0.1},
                "start": 2
            }"#,
        )
        .unwrap();
        match def {
            GraphAgentDef::MultiStepLookahead(config) => {
                assert_eq!(config.horizon, 5);
                assert_eq!(config.merit, Merit::Thompson);
                assert_eq!(config.start, 2);
            }
            _ => panic!("wrong agent type: {:?}", def),
        }
    }

    #[test]
    fn unknown_merit_rejected() {
        let result: Result<GraphAgentDef, _> = serde_json::from_str(
            r#"{"type": "MultiStepLookahead", "horizon": 5, "beta": 0.2, "merit": "EI",
                "estimator": {"mu_lim": [0.0, 2.0], "m": 10, "epsilon": 0.1}, "start": 0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_estimator_fails_build() {
        let mut config = LocalUCBAgentConfig::default();
        config.estimator.mu_lim = (1.0, 1.0);
        let graph = AdjacencyGraph::path(3);
        assert!(matches!(
            GraphAgentDef::LocalUCB(config).build(&graph),
            Err(BuildAgentError::Estimator(_))
        ));
    }
}
