//! Permutation importance over any classifier
//!
//! smartcore's tree ensembles do not expose impurity-based feature
//! importances, so model-driven importance is measured the direct way:
//! fit once, then shuffle one column at a time and record how far the
//! in-sample accuracy falls. Columns the model never relies on shuffle
//! for free.

use crate::error::Result;
use crate::model::{accuracy, Classifier, ImportanceEstimator};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Default number of shuffles averaged per feature.
const DEFAULT_REPEATS: usize = 5;

/// Seeded permutation importance estimator.
pub struct PermutationImportance<C: Classifier> {
    classifier: C,
    repeats: usize,
    seed: u64,
}

impl<C: Classifier> PermutationImportance<C> {
    pub fn new(classifier: C, seed: u64) -> Self {
        Self {
            classifier,
            repeats: DEFAULT_REPEATS,
            seed,
        }
    }

    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats.max(1);
        self
    }
}

impl<C: Classifier> ImportanceEstimator for PermutationImportance<C> {
    fn name(&self) -> &str {
        "permutation"
    }

    fn fit_importance(&self, x: &DenseMatrix<f64>, y: &[i64]) -> Result<Vec<f64>> {
        let fitted = self.classifier.fit(x, y)?;
        let baseline = accuracy(y, &fitted.predict(x)?);

        let (n_rows, n_cols) = x.shape();
        let mut rows: Vec<Vec<f64>> = (0..n_rows)
            .map(|i| (0..n_cols).map(|j| *x.get((i, j))).collect())
            .collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut importance = Vec::with_capacity(n_cols);
        for j in 0..n_cols {
            let original: Vec<f64> = rows.iter().map(|r| r[j]).collect();
            let mut drop_total = 0.0;
            for _ in 0..self.repeats {
                let mut order: Vec<usize> = (0..n_rows).collect();
                order.shuffle(&mut rng);
                for (i, &src) in order.iter().enumerate() {
                    rows[i][j] = original[src];
                }
                let permuted = DenseMatrix::from_2d_vec(&rows)?;
                let score = accuracy(y, &fitted.predict(&permuted)?);
                drop_total += baseline - score;
            }
            // restore the column before moving to the next one
            for (i, value) in original.iter().enumerate() {
                rows[i][j] = *value;
            }
            importance.push(drop_total / self.repeats as f64);
        }
        Ok(importance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeClassifier;

    // Feature 0 decides the label, feature 1 is constant.
    fn fixture() -> (DenseMatrix<f64>, Vec<i64>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..10 {
            rows.push(vec![i as f64, 3.0]);
            labels.push(if i < 5 { 0 } else { 1 });
        }
        (DenseMatrix::from_2d_vec(&rows).unwrap(), labels)
    }

    #[test]
    fn test_informative_feature_dominates() {
        let (x, y) = fixture();
        let estimator = PermutationImportance::new(TreeClassifier::new(), 42);
        let importance = estimator.fit_importance(&x, &y).unwrap();
        assert_eq!(importance.len(), 2);
        assert!(
            importance[0] > importance[1],
            "expected feature 0 to matter: {:?}",
            importance
        );
        assert!(
            importance[1].abs() < 1e-9,
            "constant feature should shuffle for free: {:?}",
            importance
        );
    }

    #[test]
    fn test_same_seed_same_importance() {
        let (x, y) = fixture();
        let estimator = PermutationImportance::new(TreeClassifier::new(), 7);
        let first = estimator.fit_importance(&x, &y).unwrap();
        let second = estimator.fit_importance(&x, &y).unwrap();
        assert_eq!(first, second);
    }
}
