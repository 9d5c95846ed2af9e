//! Utilities
pub mod iter;
pub mod stats;
