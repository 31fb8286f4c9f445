//! Random forest wrapper

use crate::error::Result;
use crate::model::{Classifier, FittedClassifier};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Default number of trees in the ensemble.
const DEFAULT_TREES: u16 = 100;

/// Random forest classifier with a fixed seed so repeated fits agree.
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    n_trees: u16,
    max_depth: Option<u16>,
    seed: u64,
}

impl ForestClassifier {
    pub fn new(seed: u64) -> Self {
        Self {
            n_trees: DEFAULT_TREES,
            max_depth: None,
            seed,
        }
    }

    pub fn with_n_trees(mut self, n_trees: u16) -> Self {
        self.n_trees = n_trees;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    fn parameters(&self) -> RandomForestClassifierParameters {
        let mut params = RandomForestClassifierParameters::default()
            .with_n_trees(self.n_trees)
            .with_seed(self.seed);
        if let Some(depth) = self.max_depth {
            params = params.with_max_depth(depth);
        }
        params
    }
}

impl Classifier for ForestClassifier {
    fn name(&self) -> &str {
        "forest"
    }

    fn fit(&self, x: &DenseMatrix<f64>, y: &[i64]) -> Result<Box<dyn FittedClassifier>> {
        let model = RandomForestClassifier::fit(x, &y.to_vec(), self.parameters())?;
        Ok(Box::new(FittedForest { model }))
    }
}

struct FittedForest {
    model: RandomForestClassifier<f64, i64, DenseMatrix<f64>, Vec<i64>>,
}

impl FittedClassifier for FittedForest {
    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<i64>> {
        Ok(self.model.predict(x)?)
    }
}
