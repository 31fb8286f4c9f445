//! k-nearest-neighbors wrapper

use crate::error::Result;
use crate::model::{Classifier, FittedClassifier};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::distance::euclidian::Euclidian;
use smartcore::neighbors::knn_classifier::{KNNClassifier, KNNClassifierParameters};

/// Default neighbor count.
const DEFAULT_NEIGHBORS: usize = 5;

/// k-NN classifier. Fully deterministic, which makes it the cheapest
/// choice for reproducibility checks.
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
}

impl KnnClassifier {
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }
}

impl Default for KnnClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_NEIGHBORS)
    }
}

impl Classifier for KnnClassifier {
    fn name(&self) -> &str {
        "knn"
    }

    fn fit(&self, x: &DenseMatrix<f64>, y: &[i64]) -> Result<Box<dyn FittedClassifier>> {
        let params = KNNClassifierParameters::default().with_k(self.k);
        let model = KNNClassifier::fit(x, &y.to_vec(), params)?;
        Ok(Box::new(FittedKnn { model }))
    }
}

struct FittedKnn {
    model: KNNClassifier<f64, i64, DenseMatrix<f64>, Vec<i64>, Euclidian<f64>>,
}

impl FittedClassifier for FittedKnn {
    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<i64>> {
        Ok(self.model.predict(x)?)
    }
}
