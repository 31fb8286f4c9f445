//! Principal component projection
//!
//! Standardizes the feature matrix, decomposes its scatter matrix with
//! faer, and projects onto the leading components. Used as the
//! dimensionality-reduction baseline in the experiment suite.

use crate::data::FeatureMatrix;
use crate::error::{AblateError, Result};
use faer::linalg::matmul::matmul;
use faer::{Accum, Mat, Par, Side};
use polars::prelude::*;

/// Default number of retained components.
pub const DEFAULT_COMPONENTS: usize = 5;

/// Columns whose population variance falls below this are treated as
/// constant and standardized to all zeros.
const VARIANCE_FLOOR: f64 = 1e-12;

/// Principal component analysis over a [`FeatureMatrix`].
#[derive(Debug, Clone, Copy)]
pub struct Pca {
    components: usize,
}

/// A projected matrix plus the variance share of each kept component.
#[derive(Debug)]
pub struct PcaProjection {
    /// Projected data with columns `pc_1..pc_k`, most variance first.
    pub matrix: FeatureMatrix,
    /// Fraction of total variance captured by each kept component,
    /// descending. Sums to at most 1.
    pub explained_variance_ratio: Vec<f64>,
}

impl Default for Pca {
    fn default() -> Self {
        Self::new(DEFAULT_COMPONENTS)
    }
}

impl Pca {
    pub fn new(components: usize) -> Self {
        Self {
            components: components.max(1),
        }
    }

    pub fn components(&self) -> usize {
        self.components
    }

    /// Project the matrix onto its leading principal components.
    ///
    /// Columns are standardized to zero mean and unit population variance
    /// first, so the decomposition runs on the correlation structure
    /// rather than raw scales. The component count is clamped to the
    /// number of features.
    pub fn project(&self, matrix: &FeatureMatrix) -> Result<PcaProjection> {
        let n_rows = matrix.n_rows();
        let n_features = matrix.n_features();
        if n_rows < 2 {
            return Err(AblateError::Estimator {
                detail: format!(
                    "principal component projection needs at least 2 rows, got {}",
                    n_rows
                ),
            });
        }
        let k = self.components.min(n_features);

        let z = standardized_matrix(matrix)?;

        // Eigenvalue ratios are invariant to the 1/n scaling of the
        // covariance, so the raw scatter matrix is decomposed directly.
        let mut scatter = Mat::<f64>::zeros(n_features, n_features);
        matmul(
            scatter.as_mut(),
            Accum::Replace,
            z.as_ref().transpose(),
            z.as_ref(),
            1.0,
            Par::Seq,
        );
        let eig = scatter
            .as_ref()
            .self_adjoint_eigen(Side::Lower)
            .map_err(|err| AblateError::Estimator {
                detail: format!("eigendecomposition of the scatter matrix failed: {:?}", err),
            })?;
        let diag = eig.S();
        let u = eig.U();

        // Pair each eigenvalue with its column of U and order the pairs by
        // descending eigenvalue, ties by ascending column.
        let mut pairs: Vec<(usize, f64)> = (0..diag.dim())
            .map(|idx| (idx, diag[idx].max(0.0)))
            .collect();
        pairs.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let total: f64 = pairs.iter().map(|(_, value)| value).sum();
        let mut basis = Mat::<f64>::zeros(n_features, k);
        let mut explained_variance_ratio = Vec::with_capacity(k);
        for (c, (source, value)) in pairs.iter().take(k).enumerate() {
            for f in 0..n_features {
                basis[(f, c)] = u[(f, *source)];
            }
            let share = if total > 0.0 { value / total } else { 0.0 };
            explained_variance_ratio.push(share);
        }

        let mut scores = Mat::<f64>::zeros(n_rows, k);
        matmul(
            scores.as_mut(),
            Accum::Replace,
            z.as_ref(),
            basis.as_ref(),
            1.0,
            Par::Seq,
        );
        let mut columns = Vec::with_capacity(k);
        for c in 0..k {
            let values: Vec<f64> = (0..n_rows).map(|i| scores[(i, c)]).collect();
            columns.push(Column::new(format!("pc_{}", c + 1).into(), values));
        }
        let projected = FeatureMatrix::new(DataFrame::new(columns)?)?;

        Ok(PcaProjection {
            matrix: projected,
            explained_variance_ratio,
        })
    }
}

/// Column-wise standardization into a faer matrix. Uses the population
/// standard deviation; constant columns become all zeros instead of
/// dividing by zero.
fn standardized_matrix(matrix: &FeatureMatrix) -> Result<Mat<f64>> {
    let n_rows = matrix.n_rows();
    let names = matrix.names();
    let mut z = Mat::<f64>::zeros(n_rows, names.len());
    for (j, name) in names.iter().enumerate() {
        let values = matrix.column_values(name)?;
        let mean = values.iter().sum::<f64>() / n_rows as f64;
        let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        let variance = sum_sq / n_rows as f64;
        if variance > VARIANCE_FLOOR {
            let std = variance.sqrt();
            for (i, value) in values.iter().enumerate() {
                z[(i, j)] = (value - mean) / std;
            }
        }
    }
    Ok(z)
}
