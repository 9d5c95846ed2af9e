//! Online Bayesian estimators of unknown arm rewards.
mod normal;

pub use normal::{BuildEstimatorError, NormalBayesianEstimator, NormalEstimatorConfig};
