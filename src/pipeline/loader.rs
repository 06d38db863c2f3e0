//! Dataset loader and writer for CSV and Parquet files

use anyhow::{Context, Result};
use faer::Mat;
use polars::prelude::*;
use std::path::Path;

use super::matrix::CorrelationMatrix;

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// `infer_schema_length` only applies to CSV; 0 scans the whole file.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = file_extension(path);

    let lf = match extension.as_str() {
        "csv" => {
            let schema_length = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            LazyCsvReader::new(path)
                .with_infer_schema_length(schema_length)
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Load a precomputed correlation matrix from CSV.
///
/// The header row names the variables; the body holds one row per variable in
/// the same order. A leading non-numeric column of row labels, as written by
/// `pandas.DataFrame.corr().to_csv()`, is skipped. Empty cells are read as
/// undefined correlations.
pub fn load_correlation_matrix(path: &Path) -> Result<CorrelationMatrix> {
    let mut df = load_dataset(path, 0)?;
    if df.width() == df.height() + 1 {
        let label_column = df
            .get_columns()
            .first()
            .filter(|col| !col.dtype().is_primitive_numeric())
            .map(|col| col.name().to_string());
        if let Some(name) = label_column {
            df = df
                .drop(&name)
                .with_context(|| format!("Failed to drop row label column '{}'", name))?;
        }
    }

    let labels: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let (rows, cols) = df.shape();
    if rows != cols {
        anyhow::bail!(
            "Correlation matrix in {} must be square, got {} rows and {} columns",
            path.display(),
            rows,
            cols
        );
    }

    let mut values = Mat::<f64>::zeros(rows, cols);
    for (j, column) in df.get_columns().iter().enumerate() {
        let column = column
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", labels[j]))?;
        for (i, value) in column.f64()?.iter().enumerate() {
            values[(i, j)] = value.unwrap_or(f64::NAN);
        }
    }

    let matrix = CorrelationMatrix::new(values)
        .and_then(|m| m.with_labels(labels))
        .with_context(|| format!("Invalid correlation matrix: {}", path.display()))?;
    Ok(matrix)
}

/// Names in `columns` that are not present in the dataset
pub fn missing_columns(df: &DataFrame, columns: &[String]) -> Vec<String> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    columns
        .iter()
        .filter(|name| !present.contains(name))
        .cloned()
        .collect()
}

/// Remove the named columns from the dataset
pub fn drop_removed(df: &DataFrame, removed: &[String]) -> DataFrame {
    df.drop_many(removed.iter().map(String::as_str))
}

/// Save dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = file_extension(path);

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
