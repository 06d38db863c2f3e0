//! Pairwise Pearson correlation over the numeric columns of a dataset
//!
//! Produces the absolute correlation matrix consumed by the pruner. Missing
//! values (nulls and NaN) only exclude a row from the pairs that involve the
//! missing column.

use anyhow::{Context, Result};
use faer::Mat;
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;

use super::matrix::CorrelationMatrix;
use super::pruner::{prune, PruneConfig, Removal};

/// Names of the numeric columns of `df`, skipping any listed in `exclude`.
pub fn numeric_columns(df: &DataFrame, exclude: &[String]) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| {
            col.dtype().is_primitive_numeric() && !exclude.iter().any(|e| e == col.name().as_str())
        })
        .map(|col| col.name().to_string())
        .collect()
}

/// Compute the labelled absolute correlation matrix of all numeric columns.
///
/// Pairs with fewer than two complete observations, or where either column is
/// constant over the paired rows, are left undefined.
pub fn absolute_correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let names = numeric_columns(df, &[]);
    let num_cols = names.len();

    // Extract values up front; NaN is treated the same as null
    let columns: Vec<Vec<Option<f64>>> = names
        .iter()
        .map(|name| -> Result<Vec<Option<f64>>> {
            let col = df
                .column(name)?
                .cast(&DataType::Float64)
                .with_context(|| format!("Failed to cast column '{}' to Float64", name))?;
            let values = col
                .f64()
                .with_context(|| format!("Failed to read column '{}' as Float64", name))?
                .iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect();
            Ok(values)
        })
        .collect::<Result<_>>()?;

    let total_pairs = num_cols * num_cols.saturating_sub(1) / 2;
    let pb = ProgressBar::new(total_pairs as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "   Calculating correlations [{bar:40.cyan/blue}] {pos}/{len} pairs ({percent}%) [{eta}]",
            )
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );

    let mut values = Mat::<f64>::zeros(num_cols, num_cols);
    for i in 0..num_cols {
        for j in (i + 1)..num_cols {
            let corr = pairwise_pearson(&columns[i], &columns[j]).unwrap_or(f64::NAN);
            values[(i, j)] = corr;
            values[(j, i)] = corr;
            pb.inc(1);
        }
    }

    pb.finish_with_message(format!(
        "   [OK] Analyzed {} column pairs across {} columns",
        total_pairs, num_cols
    ));

    let matrix = CorrelationMatrix::new(values)?.with_labels(names)?;
    Ok(matrix)
}

/// Pearson correlation over the rows where both values are present.
///
/// Uses a single-pass Welford update for numerical stability.
pub fn pairwise_pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&x, &y) in x.iter().zip(y.iter()) {
        if let (Some(x), Some(y)) = (x, y) {
            n += 1.0;
            let dx = x - mean_x;
            let dy = y - mean_y;
            mean_x += dx / n;
            mean_y += dy / n;
            var_x += dx * (x - mean_x);
            var_y += dy * (y - mean_y);
            cov_xy += dx * (y - mean_y);
        }
    }

    if n < 2.0 || var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    let corr = cov_xy / (var_x.sqrt() * var_y.sqrt());
    // Rounding can push perfectly correlated columns just past +/-1
    Some(corr.clamp(-1.0, 1.0))
}

/// Compute the correlation matrix of `df` and prune it.
///
/// Indices in the result refer to positions among the numeric columns.
pub fn find_correlation(df: &DataFrame, config: &PruneConfig) -> Result<Removal> {
    let matrix = absolute_correlation_matrix(df)?;
    Ok(prune(matrix, config)?)
}
