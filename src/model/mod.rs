//! Classifier wrappers and importance estimators
//!
//! Thin adapters over smartcore estimators so the pipeline can treat
//! "something fittable that predicts" and "something that scores features
//! after a fit" as opaque capabilities.

pub mod forest;
pub mod knn;
pub mod logistic;
pub mod permutation;
pub mod tree;

pub use forest::ForestClassifier;
pub use knn::KnnClassifier;
pub use logistic::{CoefficientImportance, LogisticClassifier};
pub use permutation::PermutationImportance;
pub use tree::TreeClassifier;

use crate::error::Result;
use smartcore::linalg::basic::matrix::DenseMatrix;

/// A classifier that can be fitted repeatedly on different feature subsets.
pub trait Classifier: Send + Sync {
    /// Short name used in experiment labels and error messages.
    fn name(&self) -> &str;

    /// Fit on a dense matrix and discrete labels.
    fn fit(&self, x: &DenseMatrix<f64>, y: &[i64]) -> Result<Box<dyn FittedClassifier>>;
}

/// A fitted classifier ready to predict.
pub trait FittedClassifier: Send + Sync {
    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<i64>>;
}

/// Produces one importance value per feature column from a single fit.
pub trait ImportanceEstimator: Send + Sync {
    /// Short name used in experiment labels and error messages.
    fn name(&self) -> &str;

    fn fit_importance(&self, x: &DenseMatrix<f64>, y: &[i64]) -> Result<Vec<f64>>;
}

impl<T: ImportanceEstimator + ?Sized> ImportanceEstimator for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fit_importance(&self, x: &DenseMatrix<f64>, y: &[i64]) -> Result<Vec<f64>> {
        (**self).fit_importance(x, y)
    }
}

/// Evaluation classifier selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ClassifierKind {
    #[default]
    Knn,
    Logistic,
    Tree,
    Forest,
}

impl ClassifierKind {
    pub fn build(&self, seed: u64) -> Box<dyn Classifier> {
        match self {
            ClassifierKind::Knn => Box::new(KnnClassifier::default()),
            ClassifierKind::Logistic => Box::new(LogisticClassifier::default()),
            ClassifierKind::Tree => Box::new(TreeClassifier::new()),
            ClassifierKind::Forest => Box::new(ForestClassifier::new(seed)),
        }
    }
}

impl std::fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierKind::Knn => write!(f, "knn"),
            ClassifierKind::Logistic => write!(f, "logistic"),
            ClassifierKind::Tree => write!(f, "tree"),
            ClassifierKind::Forest => write!(f, "forest"),
        }
    }
}

impl std::str::FromStr for ClassifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "knn" => Ok(ClassifierKind::Knn),
            "logistic" => Ok(ClassifierKind::Logistic),
            "tree" => Ok(ClassifierKind::Tree),
            "forest" => Ok(ClassifierKind::Forest),
            _ => Err(format!(
                "Invalid classifier: '{}'. Valid options: knn, logistic, tree, forest",
                s
            )),
        }
    }
}

/// Importance estimator driving the recursive elimination.
///
/// Tree and forest estimators wrap the classifier in permutation
/// importance, since the smartcore ensembles do not expose impurity
/// importances.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EstimatorKind {
    #[default]
    Logistic,
    Tree,
    Forest,
}

impl EstimatorKind {
    pub fn build(&self, seed: u64) -> Box<dyn ImportanceEstimator> {
        match self {
            EstimatorKind::Logistic => Box::new(CoefficientImportance::default()),
            EstimatorKind::Tree => Box::new(PermutationImportance::new(TreeClassifier::new(), seed)),
            EstimatorKind::Forest => Box::new(PermutationImportance::new(
                ForestClassifier::new(seed),
                seed,
            )),
        }
    }
}

impl std::fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimatorKind::Logistic => write!(f, "logistic"),
            EstimatorKind::Tree => write!(f, "tree"),
            EstimatorKind::Forest => write!(f, "forest"),
        }
    }
}

impl std::str::FromStr for EstimatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic" => Ok(EstimatorKind::Logistic),
            "tree" => Ok(EstimatorKind::Tree),
            "forest" => Ok(EstimatorKind::Forest),
            _ => Err(format!(
                "Invalid rfe estimator: '{}'. Valid options: logistic, tree, forest",
                s
            )),
        }
    }
}

/// Fraction of predictions matching the true labels.
pub fn accuracy(y_true: &[i64], y_pred: &[i64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / y_true.len() as f64
}
