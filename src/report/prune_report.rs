//! JSON report of a pruning run
//!
//! Records the configuration, every elimination decision in order, and the
//! features that were kept.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{PruneConfig, PruneOutcome};

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub corrprune_version: String,
    pub input_file: String,
    pub threshold: f64,
    pub mean_mode: String,
}

/// A single elimination decision
#[derive(Debug, Clone, Serialize)]
pub struct StepEntry {
    pub order: usize,
    pub removed: String,
    pub removed_index: usize,
    pub kept: String,
    pub kept_index: usize,
    pub correlation: f64,
    /// `None` when the mean is undefined
    pub removed_mean: Option<f64>,
    pub kept_mean: Option<f64>,
}

/// Complete pruning report
#[derive(Debug, Clone, Serialize)]
pub struct PruneReport {
    pub metadata: ReportMetadata,
    pub initial_features: usize,
    pub steps: Vec<StepEntry>,
    pub removed: Vec<String>,
    pub kept: Vec<String>,
}

fn defined(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

impl PruneReport {
    pub fn new(outcome: &PruneOutcome, config: &PruneConfig, input: &Path) -> Self {
        let steps = outcome
            .steps
            .iter()
            .enumerate()
            .map(|(order, step)| {
                let (removed_mean, kept_mean) = if step.removed == step.pair.0 {
                    step.means
                } else {
                    (step.means.1, step.means.0)
                };
                StepEntry {
                    order: order + 1,
                    removed: outcome.label(step.removed),
                    removed_index: step.removed,
                    kept: outcome.label(step.kept),
                    kept_index: step.kept,
                    correlation: step.correlation,
                    removed_mean: defined(removed_mean),
                    kept_mean: defined(kept_mean),
                }
            })
            .collect();

        Self {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                corrprune_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input.display().to_string(),
                threshold: config.threshold,
                mean_mode: if config.exact { "exact" } else { "initial" }.to_string(),
            },
            initial_features: outcome.n_variables,
            steps,
            removed: outcome.removed.iter().map(|&k| outcome.label(k)).collect(),
            kept: outcome.kept().into_iter().map(|k| outcome.label(k)).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize pruning report")
    }
}

/// Write the pruning report as pretty-printed JSON
pub fn export_prune_report(report: &PruneReport, path: &Path) -> Result<()> {
    let json = report.to_json()?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;
    Ok(())
}
