//! Dataset loader for CSV and Parquet files

use crate::data::frame::{FeatureMatrix, LabelVector};
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// A dataset split into features and labels, ready for experiments.
#[derive(Debug)]
pub struct PreparedDataset {
    pub features: FeatureMatrix,
    pub labels: LabelVector,
    /// Non-numeric columns that were excluded from the feature matrix.
    pub dropped_columns: Vec<String>,
    /// Rows removed because they contained nulls.
    pub dropped_rows: usize,
}

/// Load a dataset from a file (CSV or Parquet based on extension)
pub fn load_dataset(path: &Path) -> Result<LazyFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    Ok(lf)
}

/// Split a materialized dataset into a feature matrix and a label vector.
///
/// Rows with nulls are dropped, the target column becomes the labels, and
/// every remaining numeric column becomes a feature. Non-numeric columns
/// are excluded and reported back so the caller can warn about them.
pub fn prepare_dataset(lf: LazyFrame, target: &str) -> Result<PreparedDataset> {
    let df = lf.collect().context("Failed to materialize dataset")?;
    let total_rows = df.height();
    let df = df
        .lazy()
        .drop_nulls(None)
        .collect()
        .context("Failed to drop rows with null values")?;
    let dropped_rows = total_rows - df.height();

    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?
        .clone();
    let labels = LabelVector::from_column(&target_col)?;

    let features = df.drop(target)?;
    let mut numeric = Vec::new();
    let mut dropped_columns = Vec::new();
    for col in features.get_columns() {
        if col.dtype().is_primitive_numeric() {
            numeric.push(col.clone());
        } else {
            dropped_columns.push(col.name().to_string());
        }
    }
    if numeric.is_empty() {
        anyhow::bail!("No numeric feature columns remain after dropping the target");
    }

    let features = FeatureMatrix::new(DataFrame::new(numeric)?)?;
    labels.check_alignment(&features)?;

    Ok(PreparedDataset {
        features,
        labels,
        dropped_columns,
        dropped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_splits_target_and_features() {
        let df = df! {
            "x1" => [1.0f64, 2.0, 3.0, 4.0],
            "x2" => [4.0f64, 3.0, 2.0, 1.0],
            "label" => [0i64, 1, 0, 1],
        }
        .unwrap();
        let prepared = prepare_dataset(df.lazy(), "label").unwrap();
        assert_eq!(prepared.features.names(), vec!["x1", "x2"]);
        assert_eq!(prepared.labels.values(), &[0, 1, 0, 1]);
        assert_eq!(prepared.dropped_rows, 0);
        assert!(prepared.dropped_columns.is_empty());
    }

    #[test]
    fn test_prepare_drops_null_rows_and_text_columns() {
        let df = df! {
            "x1" => [Some(1.0f64), None, Some(3.0), Some(4.0)],
            "id" => ["a", "b", "c", "d"],
            "label" => [0i64, 1, 0, 1],
        }
        .unwrap();
        let prepared = prepare_dataset(df.lazy(), "label").unwrap();
        assert_eq!(prepared.dropped_rows, 1);
        assert_eq!(prepared.dropped_columns, vec!["id"]);
        assert_eq!(prepared.features.n_rows(), 3);
        assert_eq!(prepared.labels.values(), &[0, 0, 1]);
    }

    #[test]
    fn test_prepare_missing_target() {
        let df = df! { "x1" => [1.0f64, 2.0] }.unwrap();
        let err = prepare_dataset(df.lazy(), "label").unwrap_err();
        assert!(err.to_string().contains("label"), "got: {}", err);
    }
}
