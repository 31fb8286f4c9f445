//! Decision tree wrapper

use crate::error::Result;
use crate::model::{Classifier, FittedClassifier};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};

/// Single CART decision tree classifier.
#[derive(Debug, Clone, Default)]
pub struct TreeClassifier {
    max_depth: Option<u16>,
}

impl TreeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    fn parameters(&self) -> DecisionTreeClassifierParameters {
        let mut params = DecisionTreeClassifierParameters::default();
        if let Some(depth) = self.max_depth {
            params = params.with_max_depth(depth);
        }
        params
    }
}

impl Classifier for TreeClassifier {
    fn name(&self) -> &str {
        "tree"
    }

    fn fit(&self, x: &DenseMatrix<f64>, y: &[i64]) -> Result<Box<dyn FittedClassifier>> {
        let model = DecisionTreeClassifier::fit(x, &y.to_vec(), self.parameters())?;
        Ok(Box::new(FittedTree { model }))
    }
}

struct FittedTree {
    model: DecisionTreeClassifier<f64, i64, DenseMatrix<f64>, Vec<i64>>,
}

impl FittedClassifier for FittedTree {
    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<i64>> {
        Ok(self.model.predict(x)?)
    }
}
