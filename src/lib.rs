//! Bayesian exploration agents for graph-structured multi-armed bandits.
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::for_kv_map)] // part of warn(clippy::all), specifically style?
#![warn(clippy::missing_const_for_fn)] // has some false positives
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)] // also triggered by macro expansions
pub mod agents;
pub mod defs;
pub mod envs;
mod error;
pub mod estimators;
pub mod graphs;
pub mod logging;
pub mod simulation;
pub mod utils;

pub use agents::{GraphAgent, GraphState};
pub use defs::{GraphAgentDef, GraphBanditDef};
pub use envs::{GraphBandit, NormalGraphBandit};
pub use error::GraphBanditError;
pub use estimators::NormalBayesianEstimator;
pub use graphs::{AdjacencyGraph, Graph};
pub use simulation::run_agent;

/// Pseudo-random number generator threaded through every sampling operation.
pub type Prng = rand_chacha::ChaCha8Rng;
