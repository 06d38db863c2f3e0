//! Iterative correlation pruning
//!
//! Repeatedly takes the first pair (row-major) whose absolute correlation
//! exceeds the threshold and removes whichever of the two variables has the
//! higher mean absolute correlation, until no pair exceeds the threshold.

use serde::Serialize;

use super::error::PruneError;
use super::matrix::CorrelationMatrix;

/// Options for a pruning run
#[derive(Debug, Clone, PartialEq)]
pub struct PruneConfig {
    /// Pairs with absolute correlation strictly above this value are redundant
    pub threshold: f64,
    /// Recompute means on the current matrix after every removal
    pub exact: bool,
    /// Return column labels instead of positional indices
    pub names_output: bool,
}

impl PruneConfig {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            exact: true,
            names_output: false,
        }
    }

    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    pub fn names_output(mut self, names_output: bool) -> Self {
        self.names_output = names_output;
        self
    }

    /// Reject thresholds that cannot be compared meaningfully.
    ///
    /// Out-of-range finite values are allowed: a threshold >= 1 removes nothing
    /// for proper correlations, a negative one removes all but one variable.
    pub fn validate(&self) -> Result<(), PruneError> {
        if self.threshold.is_finite() {
            Ok(())
        } else {
            Err(PruneError::InvalidThreshold(self.threshold))
        }
    }
}

/// Variables to remove, in the order they were eliminated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Removal {
    Indices(Vec<usize>),
    Labels(Vec<String>),
}

impl Removal {
    pub fn len(&self) -> usize {
        match self {
            Removal::Indices(indices) => indices.len(),
            Removal::Labels(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One elimination decision
#[derive(Debug, Clone, PartialEq)]
pub struct PruneStep {
    /// Offending pair as found by the scan (`first < second`)
    pub pair: (usize, usize),
    pub correlation: f64,
    /// Mean absolute correlation of `pair.0` and `pair.1` at decision time
    pub means: (f64, f64),
    pub removed: usize,
    pub kept: usize,
}

/// Full result of a pruning run
#[derive(Debug, Clone)]
pub struct PruneOutcome {
    pub removed: Vec<usize>,
    pub steps: Vec<PruneStep>,
    pub labels: Option<Vec<String>>,
    pub n_variables: usize,
}

impl PruneOutcome {
    /// Indices that survived pruning, in original order.
    pub fn kept(&self) -> Vec<usize> {
        (0..self.n_variables)
            .filter(|k| !self.removed.contains(k))
            .collect()
    }

    pub fn label(&self, k: usize) -> String {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(k).cloned())
            .unwrap_or_else(|| k.to_string())
    }

    pub fn removed_labels(&self) -> Option<Vec<String>> {
        let labels = self.labels.as_ref()?;
        Some(self.removed.iter().map(|&k| labels[k].clone()).collect())
    }

    /// Translate into the requested output form.
    pub fn into_removal(self, names_output: bool) -> Result<Removal, PruneError> {
        if names_output {
            self.removed_labels()
                .map(Removal::Labels)
                .ok_or(PruneError::MissingLabels)
        } else {
            Ok(Removal::Indices(self.removed))
        }
    }
}

/// Source of a variable's mean absolute correlation during a run
trait MeanCorrelation {
    fn mean(&self, matrix: &CorrelationMatrix, k: usize) -> f64;
}

/// Means over the current, partially masked matrix
struct LiveMeans;

impl MeanCorrelation for LiveMeans {
    fn mean(&self, matrix: &CorrelationMatrix, k: usize) -> f64 {
        matrix.mean_abs_correlation(k)
    }
}

/// Means captured once from the initial matrix
struct SnapshotMeans {
    means: Vec<f64>,
}

impl SnapshotMeans {
    fn capture(matrix: &CorrelationMatrix) -> Self {
        Self {
            means: (0..matrix.n())
                .map(|k| matrix.mean_abs_correlation(k))
                .collect(),
        }
    }
}

impl MeanCorrelation for SnapshotMeans {
    fn mean(&self, _matrix: &CorrelationMatrix, k: usize) -> f64 {
        self.means[k]
    }
}

/// Compute the ordered list of variables to remove.
pub fn prune(matrix: CorrelationMatrix, config: &PruneConfig) -> Result<Removal, PruneError> {
    if config.names_output && matrix.labels().is_none() {
        return Err(PruneError::MissingLabels);
    }
    prune_with_trace(matrix, config)?.into_removal(config.names_output)
}

/// Like [`prune`], also returning every elimination decision.
pub fn prune_with_trace(
    mut matrix: CorrelationMatrix,
    config: &PruneConfig,
) -> Result<PruneOutcome, PruneError> {
    config.validate()?;

    let steps = if config.exact {
        eliminate(&mut matrix, config.threshold, &LiveMeans)
    } else {
        let snapshot = SnapshotMeans::capture(&matrix);
        eliminate(&mut matrix, config.threshold, &snapshot)
    };

    Ok(PruneOutcome {
        removed: steps.iter().map(|step| step.removed).collect(),
        steps,
        labels: matrix.labels().map(<[String]>::to_vec),
        n_variables: matrix.n(),
    })
}

fn eliminate<M: MeanCorrelation>(
    matrix: &mut CorrelationMatrix,
    threshold: f64,
    means: &M,
) -> Vec<PruneStep> {
    let mut steps = Vec::new();

    while let Some((i, j)) = matrix.first_exceeding(threshold) {
        let correlation = matrix.get(i, j).unwrap_or(f64::NAN);
        let mean_i = means.mean(matrix, i);
        let mean_j = means.mean(matrix, j);

        // Equal means remove the lower index
        let (removed, kept) = if mean_i >= mean_j { (i, j) } else { (j, i) };

        matrix.mask(removed);
        steps.push(PruneStep {
            pair: (i, j),
            correlation,
            means: (mean_i, mean_j),
            removed,
            kept,
        });
    }

    steps
}
