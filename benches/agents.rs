//! Benchmark `GraphAgent::next_s` for each agent.
use criterion::{
    criterion_group, criterion_main, measurement::Measurement, BenchmarkGroup, Criterion,
};
use graph_bandits::agents::{
    BuildGraphAgent, GraphAgent, LocalRandomWalkAgentConfig, LocalThompsonSamplingAgentConfig,
    LocalUCBAgentConfig, Merit, MultiStepLookaheadAgentConfig,
};
use graph_bandits::envs::{GraphBandit, NormalGraphBandit};
use graph_bandits::graphs::AdjacencyGraph;
use graph_bandits::Prng;
use rand::SeedableRng;

const RING_SIZE: usize = 50;

/// Ring of nodes with a single reward peak opposite the start.
fn ring_env() -> NormalGraphBandit<AdjacencyGraph> {
    #[allow(clippy::cast_precision_loss)]
    let means = (0..RING_SIZE)
        .map(|z| -((z as f64) - (RING_SIZE / 2) as f64).abs() / RING_SIZE as f64)
        .collect();
    NormalGraphBandit::with_stddev(AdjacencyGraph::cycle(RING_SIZE), means, 0.1).unwrap()
}

/// Benchmark `next_s` of an agent walking a ring graph bandit.
fn benchmark_agent_next_s<M, TC>(group: &mut BenchmarkGroup<M>, name: &str, agent_config: &TC)
where
    M: Measurement,
    TC: BuildGraphAgent<AdjacencyGraph>,
{
    let mut rng = Prng::seed_from_u64(0);
    let env = ring_env();
    let mut agent = agent_config.build_agent(env.graph()).unwrap();
    group.bench_function(name, |b| {
        b.iter(|| {
            let s = agent.next_s(&mut rng);
            // Moving the agent gives it different inputs; the reward sample is cheap.
            let r = env.reward(s, &mut rng);
            agent.update(s, r);
        })
    });
}

fn bench_agents_next_s(c: &mut Criterion) {
    let mut group = c.benchmark_group("agents_next_s");
    benchmark_agent_next_s(&mut group, "random_walk", &LocalRandomWalkAgentConfig::default());
    benchmark_agent_next_s(
        &mut group,
        "local_thompson_sampling",
        &LocalThompsonSamplingAgentConfig::default(),
    );
    benchmark_agent_next_s(&mut group, "local_ucb", &LocalUCBAgentConfig::default());
    for horizon in [10, 100] {
        for merit in [Merit::Ucb, Merit::Thompson] {
            let config = MultiStepLookaheadAgentConfig {
                horizon,
                merit,
                ..MultiStepLookaheadAgentConfig::default()
            };
            benchmark_agent_next_s(&mut group, &format!("lookahead_{}_{}", merit, horizon), &config);
        }
    }
}

criterion_group!(benches, bench_agents_next_s);
criterion_main!(benches);
