//! Report module - summarizing pruning results

pub mod prune_report;
pub mod summary;

pub use prune_report::*;
pub use summary::*;
