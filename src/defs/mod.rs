//! Definition structures
mod agent;
mod env;

pub use agent::GraphAgentDef;
pub use env::{GraphBanditDef, GraphDef};
