//! Tests for pruning summaries and JSON reports

use corrprune::pipeline::{prune_with_trace, PruneConfig};
use corrprune::report::{export_prune_report, PruneReport, PruneSummary};
use std::path::Path;
use tempfile::TempDir;

mod common;

#[test]
fn test_summary_counts() {
    let outcome = prune_with_trace(common::abc_matrix(), &PruneConfig::new(0.9)).unwrap();

    let summary = PruneSummary::from_outcome(&outcome);

    assert_eq!(summary.initial_features, 3);
    assert_eq!(summary.final_features, 2);
    assert_eq!(summary.removed.len(), 1);
    assert_eq!(summary.removed[0].0, "A");
    assert_eq!(summary.removed[0].1, "B");
}

#[test]
fn test_summary_tables_render() {
    let outcome = prune_with_trace(common::abc_matrix(), &PruneConfig::new(0.9)).unwrap();
    let summary = PruneSummary::from_outcome(&outcome);

    let counts = summary.counts_table().to_string();
    let removals = summary.removal_table().to_string();

    assert!(counts.contains("Final Features"));
    assert!(removals.contains("0.9500"));
}

#[test]
fn test_report_contents() {
    let config = PruneConfig::new(0.9);
    let outcome = prune_with_trace(common::abc_matrix(), &config).unwrap();

    let report = PruneReport::new(&outcome, &config, Path::new("data.csv"));

    assert_eq!(report.initial_features, 3);
    assert_eq!(report.removed, vec!["A"]);
    assert_eq!(report.kept, vec!["B", "C"]);
    assert_eq!(report.steps.len(), 1);

    let step = &report.steps[0];
    assert_eq!(step.order, 1);
    assert_eq!(step.removed, "A");
    assert_eq!(step.kept, "B");
    assert!((step.removed_mean.unwrap() - 0.675).abs() < 1e-12);
    assert!((step.kept_mean.unwrap() - 0.625).abs() < 1e-12);
    assert_eq!(report.metadata.mean_mode, "exact");
}

#[test]
fn test_report_means_follow_removed_variable() {
    // Here the second variable of the pair is the one removed
    let m = corrprune::pipeline::CorrelationMatrix::from_rows(&[
        vec![1.0, 0.9, 0.1],
        vec![0.9, 1.0, 0.5],
        vec![0.1, 0.5, 1.0],
    ])
    .unwrap();
    let config = PruneConfig::new(0.8).exact(false);
    let outcome = prune_with_trace(m, &config).unwrap();

    let report = PruneReport::new(&outcome, &config, Path::new("matrix.csv"));

    let step = &report.steps[0];
    assert_eq!(step.removed, "1");
    assert_eq!(step.kept, "0");
    assert!((step.removed_mean.unwrap() - 0.7).abs() < 1e-12);
    assert!((step.kept_mean.unwrap() - 0.5).abs() < 1e-12);
    assert_eq!(report.metadata.mean_mode, "initial");
}

#[test]
fn test_export_report_writes_json() {
    let config = PruneConfig::new(0.9);
    let outcome = prune_with_trace(common::abc_matrix(), &config).unwrap();
    let report = PruneReport::new(&outcome, &config, Path::new("data.csv"));
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.json");

    export_prune_report(&report, &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["removed"][0], "A");
    assert_eq!(json["metadata"]["threshold"], 0.9);
    assert_eq!(json["steps"][0]["removed_index"], 0);
}
