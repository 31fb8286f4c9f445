//! Cross-validated scoring of a classifier on a feature matrix

use crate::data::{FeatureMatrix, LabelVector};
use crate::error::{AblateError, Result};
use crate::model::{accuracy, Classifier};
use crate::pipeline::folds::{FoldIndices, KFold};
use rayon::prelude::*;

/// Fold count used when none is configured.
pub const DEFAULT_FOLDS: usize = 10;

/// k-fold cross-validated mean accuracy.
///
/// The fold partition is seeded, so the same inputs always produce
/// bit-identical scores (provided the classifier itself is deterministic).
/// Folds are evaluated in parallel but collected in fold order and reduced
/// by a sequential mean, so thread count never changes the result.
#[derive(Debug, Clone, Copy)]
pub struct CrossValidator {
    folds: usize,
    seed: u64,
}

impl CrossValidator {
    pub fn new(folds: usize, seed: u64) -> Self {
        Self { folds, seed }
    }

    pub fn folds(&self) -> usize {
        self.folds
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Mean held-out accuracy of `classifier` over the k folds.
    ///
    /// Fails with `InsufficientData` when the rows cannot support the fold
    /// count and with `MissingClass` when some class would be entirely
    /// absent from a fold's training partition. The class check runs over
    /// every fold before any fit, so the error surfaces cheaply.
    pub fn evaluate(
        &self,
        matrix: &FeatureMatrix,
        labels: &LabelVector,
        classifier: &dyn Classifier,
    ) -> Result<f64> {
        labels.check_alignment(matrix)?;
        let splits = KFold::new(self.folds, self.seed).split(matrix.n_rows())?;

        let classes = labels.classes();
        for (fold, split) in splits.iter().enumerate() {
            let train_labels = labels.take(&split.train);
            for class in &classes {
                if !train_labels.values().contains(class) {
                    return Err(AblateError::MissingClass {
                        label: *class,
                        fold,
                    });
                }
            }
        }

        let scores: Vec<f64> = splits
            .par_iter()
            .map(|split| self.evaluate_fold(matrix, labels, classifier, split))
            .collect::<Result<_>>()?;

        Ok(scores.iter().sum::<f64>() / scores.len() as f64)
    }

    fn evaluate_fold(
        &self,
        matrix: &FeatureMatrix,
        labels: &LabelVector,
        classifier: &dyn Classifier,
        split: &FoldIndices,
    ) -> Result<f64> {
        let train_x = matrix.take_rows(&split.train)?.to_dense()?;
        let train_y = labels.take(&split.train);
        let test_x = matrix.take_rows(&split.test)?.to_dense()?;
        let test_y = labels.take(&split.test);

        let fitted = classifier.fit(&train_x, train_y.values())?;
        let predicted = fitted.predict(&test_x)?;
        Ok(accuracy(test_y.values(), &predicted))
    }
}

impl Default for CrossValidator {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDS, 42)
    }
}
