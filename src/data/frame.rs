//! Core data model: validated feature matrices and label vectors
//!
//! A `FeatureMatrix` wraps a polars DataFrame whose columns are all numeric,
//! null-free and cast to Float64 once at construction. Selection operations
//! never mutate in place; they produce new matrices.

use crate::error::{AblateError, Result};
use polars::prelude::*;
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Tolerance for deciding that a float label is a whole number.
const LABEL_TOLERANCE: f64 = 1e-9;

/// An ordered set of named numeric feature columns over a fixed row count.
///
/// Invariants (enforced at construction): column names are unique (polars
/// guarantees this), every column is numeric, free of nulls, and stored as
/// Float64.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    df: DataFrame,
}

impl FeatureMatrix {
    /// Validate a DataFrame and take ownership of it as a feature matrix.
    ///
    /// Non-numeric columns and columns containing nulls are rejected with an
    /// error naming the column. All columns are cast to Float64 up front so
    /// later reads never re-check dtypes.
    pub fn new(df: DataFrame) -> Result<Self> {
        let mut cast_columns = Vec::with_capacity(df.width());
        for col in df.get_columns() {
            if !col.dtype().is_primitive_numeric() {
                return Err(AblateError::InvalidColumn {
                    column: col.name().to_string(),
                    reason: format!("non-numeric dtype {}", col.dtype()),
                });
            }
            if col.null_count() > 0 {
                return Err(AblateError::InvalidColumn {
                    column: col.name().to_string(),
                    reason: format!("contains {} null values", col.null_count()),
                });
            }
            cast_columns.push(col.cast(&DataType::Float64)?);
        }
        Ok(Self {
            df: DataFrame::new(cast_columns)?,
        })
    }

    /// Borrow the backing DataFrame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Column names in matrix order.
    pub fn names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    pub fn n_rows(&self) -> usize {
        self.df.height()
    }

    pub fn n_features(&self) -> usize {
        self.df.width()
    }

    /// Values of a single column.
    pub fn column_values(&self, name: &str) -> Result<Vec<f64>> {
        let ca = self.df.column(name)?.f64()?;
        Ok(ca.into_iter().filter_map(|v| v).collect())
    }

    /// New matrix containing only the named columns, in the given order.
    pub fn select_names(&self, names: &[String]) -> Result<FeatureMatrix> {
        let df = self.df.select(names.iter().map(|n| n.as_str()))?;
        Ok(FeatureMatrix { df })
    }

    /// New matrix retaining columns where `mask` is true, preserving order.
    ///
    /// The mask must cover every column of this matrix.
    pub fn select_mask(&self, mask: &[bool]) -> Result<FeatureMatrix> {
        if mask.len() != self.n_features() {
            return Err(AblateError::RankingMismatch {
                expected: mask.len(),
                actual: self.n_features(),
            });
        }
        let names = self.names();
        let retained: Vec<String> = names
            .into_iter()
            .zip(mask.iter())
            .filter(|(_, keep)| **keep)
            .map(|(name, _)| name)
            .collect();
        self.select_names(&retained)
    }

    /// New matrix containing the given rows, in the given order.
    pub fn take_rows(&self, indices: &[usize]) -> Result<FeatureMatrix> {
        let idx = IdxCa::from_vec(
            "idx".into(),
            indices.iter().map(|&i| i as IdxSize).collect(),
        );
        let df = self.df.take(&idx)?;
        Ok(FeatureMatrix { df })
    }

    /// Row-major copy of the matrix values.
    pub fn to_rows(&self) -> Result<Vec<Vec<f64>>> {
        let columns: Vec<Vec<f64>> = self
            .names()
            .iter()
            .map(|name| self.column_values(name))
            .collect::<Result<_>>()?;
        let mut rows = vec![Vec::with_capacity(self.n_features()); self.n_rows()];
        for column in &columns {
            for (row, value) in rows.iter_mut().zip(column.iter()) {
                row.push(*value);
            }
        }
        Ok(rows)
    }

    /// Dense copy for the estimator boundary.
    pub fn to_dense(&self) -> Result<DenseMatrix<f64>> {
        let rows = self.to_rows()?;
        Ok(DenseMatrix::from_2d_vec(&rows)?)
    }
}

/// Discrete class labels aligned by row index with a `FeatureMatrix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVector {
    values: Vec<i64>,
}

impl LabelVector {
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    /// Build labels from a polars column.
    ///
    /// Accepts integer, boolean and whole-valued float columns; anything
    /// else is rejected with an error naming the column.
    pub fn from_column(col: &Column) -> Result<Self> {
        let dtype = col.dtype();
        if !dtype.is_primitive_numeric() && !matches!(dtype, DataType::Boolean) {
            return Err(AblateError::InvalidColumn {
                column: col.name().to_string(),
                reason: format!("expected numeric or boolean labels, found {}", dtype),
            });
        }
        let float = col.cast(&DataType::Float64)?;
        let ca = float.f64()?;
        let mut values = Vec::with_capacity(ca.len());
        for v in ca.into_iter() {
            match v {
                Some(x) if (x - x.round()).abs() < LABEL_TOLERANCE => {
                    values.push(x.round() as i64);
                }
                Some(x) => {
                    return Err(AblateError::InvalidColumn {
                        column: col.name().to_string(),
                        reason: format!("label value {} is not a whole number", x),
                    });
                }
                None => {
                    return Err(AblateError::InvalidColumn {
                        column: col.name().to_string(),
                        reason: "contains null labels".to_string(),
                    });
                }
            }
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sorted distinct class labels.
    pub fn classes(&self) -> Vec<i64> {
        let mut classes = self.values.clone();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// Labels at the given row indices, in the given order.
    pub fn take(&self, indices: &[usize]) -> LabelVector {
        LabelVector {
            values: indices.iter().map(|&i| self.values[i]).collect(),
        }
    }

    /// Error unless the label count matches the matrix row count.
    pub fn check_alignment(&self, matrix: &FeatureMatrix) -> Result<()> {
        if self.len() != matrix.n_rows() {
            return Err(AblateError::DimensionMismatch {
                rows: matrix.n_rows(),
                labels: self.len(),
            });
        }
        Ok(())
    }
}
