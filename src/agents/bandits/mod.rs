//! Local bandit agents.
//!
//! These agents only consider the nodes adjacent to their current node (and staying put)
//! and pick among them as in a multi-armed bandit.
mod thompson_sampling;
mod ucb;

pub use thompson_sampling::{LocalThompsonSamplingAgent, LocalThompsonSamplingAgentConfig};
pub use ucb::{LocalUCBAgent, LocalUCBAgentConfig};
