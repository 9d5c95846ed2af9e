//! Conjugate Normal estimator of an unknown mean.
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Configuration for [`NormalBayesianEstimator`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalEstimatorConfig {
    /// Lower and upper bound on the unknown mean.
    ///
    /// The prior is centred between the bounds with a standard deviation of half the width.
    pub mu_lim: (f64, f64),
    /// Number of updates after which the posterior variance reaches `epsilon`.
    pub m: u64,
    /// Target posterior variance after `m` updates.
    pub epsilon: f64,
}

impl NormalEstimatorConfig {
    pub const fn new(mu_lim: (f64, f64), m: u64, epsilon: f64) -> Self {
        Self { mu_lim, m, epsilon }
    }

    /// Build an estimator with this configuration.
    ///
    /// # Errors
    /// Returns an error if the prior bounds have zero width,
    /// if `m` or `epsilon` are not positive,
    /// or if they imply a non-positive observation noise variance.
    pub fn build(&self) -> Result<NormalBayesianEstimator, BuildEstimatorError> {
        NormalBayesianEstimator::new(self.mu_lim, self.m, self.epsilon)
    }
}

impl Default for NormalEstimatorConfig {
    fn default() -> Self {
        Self::new((-1.0, 1.0), 50, 0.01)
    }
}

/// Error building a [`NormalBayesianEstimator`]
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BuildEstimatorError {
    #[error("prior bounds ({0}, {1}) must be finite and distinct")]
    ZeroWidthPrior(f64, f64),
    #[error("exploration decay m={m} and epsilon={epsilon} must both be positive")]
    NonPositiveDecay { m: u64, epsilon: f64 },
    #[error("observation noise variance {0} must be finite and positive; epsilon is too large")]
    InvalidNoiseVariance(f64),
}

/// Bayesian estimator of the mean of a Normal distribution with known variance.
///
/// Uses the conjugate Normal prior so the posterior over the mean is also Normal.
/// The observation noise variance is not a property of the data;
/// it is chosen so that the posterior variance shrinks to `epsilon` after `m` observations,
/// which sets how long the estimator keeps encouraging exploration.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalBayesianEstimator {
    /// Prior mean
    mu_0: f64,
    /// Prior variance
    var_0: f64,
    /// Observation noise variance
    var: f64,

    /// Sum of all observations
    xsum: f64,
    /// Number of observations
    n: u64,

    /// Posterior mean
    mu_1: f64,
    /// Posterior variance
    var_1: f64,
}

impl NormalBayesianEstimator {
    /// Create a new estimator.
    ///
    /// # Args
    /// * `mu_lim` - Lower and upper bounds of the unknown mean.
    /// * `m` - Number of updates after which the posterior variance drops to `epsilon`.
    /// * `epsilon` - Target posterior variance after `m` updates.
    ///
    /// # Errors
    /// See [`NormalEstimatorConfig::build`].
    pub fn new(mu_lim: (f64, f64), m: u64, epsilon: f64) -> Result<Self, BuildEstimatorError> {
        let (lo, hi) = mu_lim;
        if !(lo.is_finite() && hi.is_finite()) || lo == hi {
            return Err(BuildEstimatorError::ZeroWidthPrior(lo, hi));
        }
        if m == 0 || !(epsilon > 0.0) {
            return Err(BuildEstimatorError::NonPositiveDecay { m, epsilon });
        }

        let mu_0 = (lo + hi) / 2.0;
        let var_0 = (lo - hi).powi(2) / 4.0;
        #[allow(clippy::cast_precision_loss)]
        let var = (m as f64) * epsilon / (1.0 - epsilon * var_0);
        if !(var.is_finite() && var > 0.0) {
            return Err(BuildEstimatorError::InvalidNoiseVariance(var));
        }

        Ok(Self {
            mu_0,
            var_0,
            var,
            xsum: 0.0,
            n: 0,
            mu_1: mu_0,
            var_1: var_0,
        })
    }

    /// Posterior mean and variance `(mu_1, var_1)`.
    #[inline]
    pub const fn get_param(&self) -> (f64, f64) {
        (self.mu_1, self.var_1)
    }

    /// Prior mean and variance `(mu_0, var_0)`.
    #[inline]
    pub const fn prior(&self) -> (f64, f64) {
        (self.mu_0, self.var_0)
    }

    /// Effective observation noise variance.
    #[inline]
    pub const fn noise_variance(&self) -> f64 {
        self.var
    }

    /// Number of observations incorporated so far.
    #[inline]
    pub const fn num_observations(&self) -> u64 {
        self.n
    }

    /// Incorporate an observation.
    pub fn update(&mut self, x: f64) {
        self.xsum += x;
        self.n += 1;
        self.update_posterior();
    }

    /// Incorporate a sequence of observations in order.
    ///
    /// Equivalent to calling [`update`](Self::update) on each.
    pub fn update_batch(&mut self, xs: &[f64]) {
        if xs.is_empty() {
            return;
        }
        for x in xs {
            self.xsum += x;
        }
        self.n += xs.len() as u64;
        self.update_posterior();
    }

    /// Forget all observations and return to the prior.
    pub fn reset(&mut self) {
        self.xsum = 0.0;
        self.n = 0;
        self.mu_1 = self.mu_0;
        self.var_1 = self.var_0;
    }

    /// Draw a mean from the posterior distribution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        z * self.var_1.sqrt() + self.mu_1
    }

    /// Upper confidence bound on the mean: `mu_1 + beta * sqrt(var_1)`.
    #[inline]
    pub fn ucb(&self, beta: f64) -> f64 {
        self.mu_1 + beta * self.var_1.sqrt()
    }

    #[allow(clippy::cast_precision_loss)]
    fn update_posterior(&mut self) {
        self.var_1 = (self.var_0.recip() + (self.n as f64) / self.var).recip();
        self.mu_1 = self.var_1 * (self.mu_0 / self.var_0 + self.xsum / self.var);
    }
}

impl fmt::Display for NormalBayesianEstimator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "NormalBayesianEstimator(μ={:.4}, σ²={:.4}, n={})",
            self.mu_1, self.var_1, self.n
        )
    }
}
