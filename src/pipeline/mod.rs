//! Pipeline module - correlation computation, pruning and dataset I/O

pub mod correlation;
pub mod error;
pub mod loader;
pub mod matrix;
pub mod pruner;

pub use correlation::*;
pub use error::PruneError;
pub use loader::*;
pub use matrix::{CorrelationMatrix, SYMMETRY_TOLERANCE};
pub use pruner::{prune, prune_with_trace, PruneConfig, PruneOutcome, PruneStep, Removal};
