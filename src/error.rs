//! Error type
use crate::agents::BuildAgentError;
use crate::envs::BuildEnvError;
use crate::estimators::BuildEstimatorError;
use crate::graphs::BuildGraphError;
use crate::logging::LogError;
use crate::simulation::SimulatorError;
use thiserror::Error;

/// Error from the graph bandits crate.
#[derive(Error, Debug)]
pub enum GraphBanditError {
    #[error("error building agent")]
    BuildAgent(#[from] BuildAgentError),
    #[error("error building environment")]
    BuildEnv(#[from] BuildEnvError),
    #[error("error building estimator")]
    BuildEstimator(#[from] BuildEstimatorError),
    #[error("error building graph")]
    BuildGraph(#[from] BuildGraphError),
    #[error("error running simulation")]
    Simulator(#[from] SimulatorError),
    #[error("error logging statistics")]
    Log(#[from] LogError),
}
