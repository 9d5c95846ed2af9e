//! Agent testing utilities
use super::GraphAgent;
use crate::envs::{GraphBandit, NormalGraphBandit};
use crate::graphs::{AdjacencyGraph, Graph};
use crate::simulation;
use crate::Prng;
use rand::SeedableRng;

/// Check that every proposed node is the current node or one of its neighbours.
///
/// Runs the agent for `num_steps` on each of several graph shapes
/// (path, cycle, star, complete) with noisy rewards.
pub fn check_local_candidates<A, F>(make_agent: F, num_steps: u64)
where
    A: GraphAgent,
    F: Fn(&AdjacencyGraph) -> A,
{
    let star = AdjacencyGraph::from_edges(5, [(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap();
    let graphs = [
        AdjacencyGraph::path(5),
        AdjacencyGraph::cycle(6),
        star,
        AdjacencyGraph::complete(4),
    ];
    let mut rng = Prng::seed_from_u64(0);
    for graph in graphs {
        let means = graph.nodes().map(|z| z as f64 / 4.0 - 0.5).collect();
        let env = NormalGraphBandit::with_stddev(graph, means, 0.5).unwrap();
        let mut agent = make_agent(env.graph());
        for _ in 0..num_steps {
            let curr = agent.current_node();
            let s = agent.next_s(&mut rng);
            assert!(
                env.graph().closed_neighborhood(curr).any(|z| z == s),
                "moved from {} to non-neighbour {} in {}",
                curr,
                s,
                env.graph()
            );
            let r = env.reward(s, &mut rng);
            agent.update(s, r);
        }
    }
}

/// Check that the agent can be trained to settle on the best node of a small graph bandit.
///
/// The environment is a complete graph on 4 nodes with normal rewards
/// of means `[-0.5, -0.3, 0.8, -0.4]` and standard deviation 0.1.
/// The agent starts at node 0.
/// After training, at least `threshold` of 500 evaluation steps must visit node 2.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn train_normal_graph_bandit<A, F>(make_agent: F, num_train_steps: u64, threshold: f64)
where
    A: GraphAgent,
    F: FnOnce(&AdjacencyGraph) -> A,
{
    let env = NormalGraphBandit::with_stddev(
        AdjacencyGraph::complete(4),
        vec![-0.5, -0.3, 0.8, -0.4],
        0.1,
    )
    .unwrap();
    let mut agent = make_agent(env.graph());
    let mut rng = Prng::seed_from_u64(1);

    if num_train_steps > 0 {
        simulation::run_agent(&env, &mut agent, num_train_steps, &mut rng, &mut ()).unwrap();
    }

    let num_eval_steps = 500;
    let summary = simulation::run_agent(&env, &mut agent, num_eval_steps, &mut rng, &mut ()).unwrap();
    let best = env.best_node().unwrap();
    assert_eq!(best, 2);
    let best_count = summary.visit_counts[best];
    assert!(
        best_count >= ((num_eval_steps as f64) * threshold) as u64,
        "visited best node {} / {} times",
        best_count,
        num_eval_steps
    );
}
