//! corrprune: Correlation-based Feature Pruning
//!
//! Reduces multicollinearity in a numeric dataset by repeatedly removing one
//! variable from the first pair whose absolute correlation exceeds a threshold,
//! keeping the variable with the lower mean absolute correlation.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
