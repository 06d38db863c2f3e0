//! Shared test utilities and fixture generators

#![allow(dead_code)]

use corrprune::pipeline::CorrelationMatrix;
use polars::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Variables A, B, C with |AB| = 0.95, |AC| = 0.40, |BC| = 0.30
pub fn abc_matrix() -> CorrelationMatrix {
    CorrelationMatrix::from_rows(&[
        vec![1.0, 0.95, 0.40],
        vec![0.95, 1.0, 0.30],
        vec![0.40, 0.30, 1.0],
    ])
    .unwrap()
    .with_labels(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    .unwrap()
}

/// Three variables whose mean ranking flips after the first removal.
///
/// At threshold 0.9 both modes first remove 0; the exact mode then ties on
/// (1, 2) and removes 1, while the initial means favour removing 2.
pub fn divergent_matrix() -> CorrelationMatrix {
    CorrelationMatrix::from_rows(&[
        vec![1.0, 0.91, 0.95],
        vec![0.91, 1.0, 0.92],
        vec![0.95, 0.92, 1.0],
    ])
    .unwrap()
}

/// Create a DataFrame with known correlation patterns
pub fn create_correlation_test_dataframe() -> DataFrame {
    df! {
        "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        "b" => [2.0f64, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0], // Perfectly correlated with a (b = 2*a)
        "c" => [10.0f64, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0], // Negatively correlated with a
        "d" => [5.0f64, 1.0, 8.0, 2.0, 9.0, 3.0, 7.0, 4.0, 6.0, 0.0], // Weakly correlated
    }
    .unwrap()
}

/// Create a larger random DataFrame where every third column tracks an earlier one
pub fn create_random_dataframe(rows: usize, cols: usize, seed: u64) -> DataFrame {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let mut values: Vec<Vec<f64>> = Vec::with_capacity(cols);
    for i in 0..cols {
        let column: Vec<f64> = if i % 3 == 2 {
            values[i - 2]
                .iter()
                .map(|v| v + rng.gen::<f64>() * 0.3)
                .collect()
        } else {
            (0..rows).map(|_| rng.gen::<f64>()).collect()
        };
        values.push(column);
    }

    let columns: Vec<Column> = values
        .into_iter()
        .enumerate()
        .map(|(i, v)| Column::new(format!("feature_{}", i).into(), v))
        .collect();
    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Write the A/B/C correlation matrix as CSV (header row = labels)
pub fn create_temp_matrix_csv() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corr.csv");

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "A,B,C").unwrap();
    writeln!(file, "1.0,0.95,0.40").unwrap();
    writeln!(file, "0.95,1.0,0.30").unwrap();
    writeln!(file, "0.40,0.30,1.0").unwrap();
    drop(file);

    (temp_dir, path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
