//! Shared test utilities and fixture generators

use ablate::data::{FeatureMatrix, LabelVector};
use ablate::pipeline::Ranking;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small labeled DataFrame with known feature quality
///
/// This DataFrame includes:
/// - `target`: Binary target column (0/1), alternating
/// - `strong`: Wide class separation, best feature
/// - `mild`: Half the separation of `strong`
/// - `flat`: Constant value, carries no signal
pub fn create_test_dataframe() -> DataFrame {
    df! {
        "target" => [0i64, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
        "strong" => [0.1f64, 8.2, 0.3, 8.1, 0.2, 8.3, 0.0, 8.0, 0.4, 8.4, 0.1, 8.2],
        "mild" => [0.2f64, 4.1, 0.1, 4.3, 0.3, 4.0, 0.2, 4.2, 0.0, 4.1, 0.3, 4.3],
        "flat" => [5.0f64; 12],
    }
    .unwrap()
}

/// Build a linearly separable two-class dataset
///
/// Rows alternate class 0 and class 1, so both classes land in every
/// training partition for any reasonable fold count. Every column places
/// class 0 near zero and class 1 near an offset between 6.0 and 2.0 that
/// shrinks with the column index, so every column separates the classes
/// cleanly while `f_1` stays the strongest. All jitter comes from the
/// given seed, so the same arguments always produce the same matrix.
pub fn create_separable_dataset(
    rows_per_class: usize,
    informative: usize,
    seed: u64,
) -> (FeatureMatrix, LabelVector) {
    let mut rng = StdRng::seed_from_u64(seed);
    let n_rows = rows_per_class * 2;
    let mut values = vec![vec![0.0f64; n_rows]; informative];
    let mut labels = Vec::with_capacity(n_rows);

    for row in 0..n_rows {
        let class = (row % 2) as i64;
        labels.push(class);
        for (col, column) in values.iter_mut().enumerate() {
            // The floor of 2.0 keeps even the last column far above any
            // random column's relevance.
            let offset = 2.0 + 4.0 * (informative - col) as f64 / informative as f64;
            let jitter: f64 = rng.gen_range(-0.5..0.5);
            column[row] = class as f64 * offset + jitter;
        }
    }

    let columns: Vec<Column> = values
        .into_iter()
        .enumerate()
        .map(|(idx, vals)| Column::new(format!("f_{}", idx + 1).into(), vals))
        .collect();
    let matrix = FeatureMatrix::new(DataFrame::new(columns).unwrap()).unwrap();
    (matrix, LabelVector::new(labels))
}

/// Build a deterministic matrix with four graded separator columns
///
/// Class offsets are 8, 4, 2 and 1 with only a tiny deterministic wobble
/// on top, so the relevance ordering strong > medium > weak > faint is
/// exact and free of sampling noise.
pub fn create_graded_matrix() -> (FeatureMatrix, LabelVector) {
    let n_rows = 20;
    let offsets = [("strong", 8.0), ("medium", 4.0), ("weak", 2.0), ("faint", 1.0)];
    let mut labels = Vec::with_capacity(n_rows);
    let mut cols: Vec<(&str, Vec<f64>)> = offsets
        .iter()
        .map(|(name, _)| (*name, Vec::new()))
        .collect();

    for row in 0..n_rows {
        let class = (row % 2) as f64;
        labels.push(class as i64);
        for (idx, (_, offset)) in offsets.iter().enumerate() {
            let wobble = ((row * 7 + idx * 3) % 5) as f64 * 0.02;
            cols[idx].1.push(class * offset + wobble);
        }
    }

    (matrix_from_columns(&cols), LabelVector::new(labels))
}

/// Build a FeatureMatrix from named f64 columns
pub fn matrix_from_columns(cols: &[(&str, Vec<f64>)]) -> FeatureMatrix {
    let columns: Vec<Column> = cols
        .iter()
        .map(|(name, vals)| Column::new((*name).into(), vals.clone()))
        .collect();
    FeatureMatrix::new(DataFrame::new(columns).unwrap()).unwrap()
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

/// Write a separable dataset (features plus a `target` column) to a CSV
/// in a fresh temporary directory
pub fn create_labeled_csv(
    rows_per_class: usize,
    informative: usize,
    seed: u64,
) -> (TempDir, PathBuf) {
    let (matrix, labels) = create_separable_dataset(rows_per_class, informative, seed);
    let mut df = matrix.frame().clone();
    df.with_column(Column::new("target".into(), labels.values().to_vec()))
        .unwrap();
    create_temp_csv(&mut df)
}

/// Assert that ranks are exactly the permutation 1..=N
pub fn assert_rank_permutation(ranking: &Ranking) {
    let mut sorted: Vec<usize> = ranking.ranks().to_vec();
    sorted.sort_unstable();
    let expected: Vec<usize> = (1..=ranking.n_features()).collect();
    assert_eq!(
        sorted,
        expected,
        "Ranks must be a permutation of 1..={}: {:?}",
        ranking.n_features(),
        ranking.ranks()
    );
}

/// Assert that a matrix carries exactly the expected column names, in order
pub fn assert_feature_names(matrix: &FeatureMatrix, expected: &[&str]) {
    let actual = matrix.names();
    assert_eq!(
        actual, expected,
        "Feature name mismatch: expected {:?}, got {:?}",
        expected, actual
    );
}
