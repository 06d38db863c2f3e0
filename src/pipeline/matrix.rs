//! Absolute correlation matrix with in-place masking
//!
//! Eliminated variables are never removed from the matrix. Their row and column
//! are overwritten with NaN, the "undefined" marker, so every surviving variable
//! keeps its original position.

use faer::Mat;

use super::error::PruneError;

/// Maximum absolute difference tolerated between mirrored entries.
pub const SYMMETRY_TOLERANCE: f64 = 1e-8;

/// Square, symmetric matrix of absolute correlations.
///
/// The main diagonal and the rows/columns of masked variables hold NaN.
/// NaN entries never exceed a threshold and are ignored by mean computations.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    values: Mat<f64>,
    labels: Option<Vec<String>>,
    live: Vec<bool>,
}

impl CorrelationMatrix {
    /// Build a matrix from raw (possibly signed) correlations.
    ///
    /// Entries are folded to their magnitudes and the diagonal is set to NaN.
    /// Mirrored entries within [`SYMMETRY_TOLERANCE`] are accepted and stored as
    /// the upper-triangle value.
    /// Off-diagonal NaN entries are accepted as undefined correlations.
    pub fn new(values: Mat<f64>) -> Result<Self, PruneError> {
        let (rows, cols) = (values.nrows(), values.ncols());
        if rows != cols {
            return Err(PruneError::Shape { rows, cols });
        }
        if rows == 0 {
            return Err(PruneError::EmptyInput);
        }

        for i in 0..rows {
            for j in (i + 1)..cols {
                let upper = values[(i, j)];
                let lower = values[(j, i)];
                for (row, col, value) in [(i, j, upper), (j, i, lower)] {
                    if value.is_infinite() {
                        return Err(PruneError::InvalidEntry { row, col, value });
                    }
                }
                let symmetric = match (upper.is_nan(), lower.is_nan()) {
                    (true, true) => true,
                    (false, false) => (upper - lower).abs() <= SYMMETRY_TOLERANCE,
                    _ => false,
                };
                if !symmetric {
                    return Err(PruneError::NotSymmetric {
                        row: i,
                        col: j,
                        upper,
                        lower,
                    });
                }
            }
        }

        // Both cells take the upper-triangle value so the stored matrix is exactly symmetric
        let values = Mat::from_fn(rows, cols, |i, j| {
            if i == j {
                f64::NAN
            } else {
                values[(i.min(j), i.max(j))].abs()
            }
        });

        Ok(Self {
            values,
            labels: None,
            live: vec![true; rows],
        })
    }

    /// Build a matrix from row vectors.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, PruneError> {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|row| row.len() != n) {
            return Err(PruneError::Shape {
                rows: n,
                cols: bad.len(),
            });
        }
        Self::new(Mat::from_fn(n, n, |i, j| rows[i][j]))
    }

    /// Attach column labels, one per variable.
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self, PruneError> {
        if labels.len() != self.n() {
            return Err(PruneError::LabelCount {
                expected: self.n(),
                actual: labels.len(),
            });
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// Number of variables, live or masked.
    pub fn n(&self) -> usize {
        self.values.nrows()
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Label of variable `k`, falling back to its index.
    pub fn label(&self, k: usize) -> String {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(k).cloned())
            .unwrap_or_else(|| k.to_string())
    }

    /// Absolute correlation between `i` and `j`, or `None` when undefined.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let value = self.values[(i, j)];
        (!value.is_nan()).then_some(value)
    }

    pub fn is_live(&self, k: usize) -> bool {
        self.live[k]
    }

    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|&&live| live).count()
    }

    /// Indices of variables that have not been masked.
    pub fn live_indices(&self) -> Vec<usize> {
        (0..self.n()).filter(|&k| self.live[k]).collect()
    }

    /// First entry strictly above `threshold`, scanning rows in increasing
    /// order and columns in increasing order within a row.
    ///
    /// The stored matrix is exactly symmetric, so the returned pair satisfies `i < j`.
    pub fn first_exceeding(&self, threshold: f64) -> Option<(usize, usize)> {
        let n = self.n();
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .find(|&(i, j)| self.values[(i, j)] > threshold)
    }

    /// Mean of the defined entries in row `k`; NaN if the row has none.
    pub fn mean_abs_correlation(&self, k: usize) -> f64 {
        let (sum, count) = (0..self.n())
            .map(|j| self.values[(k, j)])
            .filter(|v| !v.is_nan())
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

        if count == 0 {
            f64::NAN
        } else {
            sum / count as f64
        }
    }

    /// Mask variable `k`: its whole row and column become undefined.
    pub fn mask(&mut self, k: usize) {
        for idx in 0..self.n() {
            self.values[(k, idx)] = f64::NAN;
            self.values[(idx, k)] = f64::NAN;
        }
        self.live[k] = false;
    }
}
