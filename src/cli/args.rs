//! Command-line argument definitions using clap

use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

use crate::pipeline::PruneConfig;

/// corrprune - Remove features whose pairwise absolute correlation exceeds a threshold
#[derive(Parser, Debug)]
#[command(name = "corrprune")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet dataset, or a CSV correlation matrix with --matrix)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Correlation threshold - one feature of every pair above this value is removed
    #[arg(short, long, default_value = "0.9", allow_negative_numbers = true, value_parser = validate_threshold)]
    pub threshold: f64,

    /// Recompute mean absolute correlations after every removal.
    /// With `--exact false` the means of the initial matrix are used throughout.
    #[arg(long, default_value = "true", action = ArgAction::Set)]
    pub exact: bool,

    /// Report removed features by column name instead of position
    #[arg(long, default_value = "false")]
    pub names: bool,

    /// Treat the input as a precomputed correlation matrix (CSV, header row = labels).
    /// A leading column of row labels is accepted and skipped.
    #[arg(long, default_value = "false")]
    pub matrix: bool,

    /// Columns to drop before computing correlations (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,

    /// Write the pruned dataset to this path (CSV or Parquet, by extension).
    /// Ignored with --matrix.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the pruned dataset next to the input with a '_pruned' suffix
    #[arg(long, default_value = "false")]
    pub save: bool,

    /// Write a JSON report of every elimination decision.
    /// Without a value the report is written next to the input with a '_prune_report.json' suffix.
    #[arg(long)]
    pub report: Option<Option<PathBuf>>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Pruning options selected on the command line
    pub fn prune_config(&self) -> PruneConfig {
        PruneConfig::new(self.threshold)
            .exact(self.exact)
            .names_output(self.names)
    }

    /// Get the output path for the pruned dataset, if one should be written.
    /// A derived path sits next to the input with a '_pruned' suffix.
    pub fn output_path(&self) -> Option<PathBuf> {
        if self.matrix {
            return None;
        }
        if let Some(output) = &self.output {
            return Some(output.clone());
        }
        self.save
            .then(|| derived_path(&self.input, "pruned", None))
    }

    /// Get the JSON report path, if a report was requested.
    pub fn report_path(&self) -> Option<PathBuf> {
        self.report.as_ref().map(|path| {
            path.clone()
                .unwrap_or_else(|| derived_path(&self.input, "prune_report", Some("json")))
        })
    }
}

fn derived_path(input: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = extension
        .or_else(|| input.extension().and_then(|e| e.to_str()))
        .unwrap_or("parquet");
    parent.join(format!("{}_{}.{}", stem, suffix, extension))
}

/// Validator for the threshold parameter
fn validate_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("threshold must be a finite number, got {}", value))
    }
}
