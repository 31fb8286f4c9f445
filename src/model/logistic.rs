//! Logistic regression wrapper and coefficient-magnitude importance

use crate::error::{AblateError, Result};
use crate::model::{Classifier, FittedClassifier, ImportanceEstimator};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};

/// Logistic regression classifier (LBFGS solver).
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    /// L2 regularization strength. Zero disables regularization.
    alpha: f64,
}

impl LogisticClassifier {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    fn parameters(&self) -> LogisticRegressionParameters<f64> {
        LogisticRegressionParameters::default().with_alpha(self.alpha)
    }
}

impl Default for LogisticClassifier {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Classifier for LogisticClassifier {
    fn name(&self) -> &str {
        "logistic"
    }

    fn fit(&self, x: &DenseMatrix<f64>, y: &[i64]) -> Result<Box<dyn FittedClassifier>> {
        let model = LogisticRegression::fit(x, &y.to_vec(), self.parameters())?;
        Ok(Box::new(FittedLogistic { model }))
    }
}

struct FittedLogistic {
    model: LogisticRegression<f64, i64, DenseMatrix<f64>, Vec<i64>>,
}

impl FittedClassifier for FittedLogistic {
    fn predict(&self, x: &DenseMatrix<f64>) -> Result<Vec<i64>> {
        Ok(self.model.predict(x)?)
    }
}

/// Importance = summed absolute logistic coefficient per feature.
///
/// For multinomial problems the coefficient magnitudes of all classes are
/// folded into one value per feature.
#[derive(Debug, Clone)]
pub struct CoefficientImportance {
    alpha: f64,
}

impl CoefficientImportance {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl Default for CoefficientImportance {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ImportanceEstimator for CoefficientImportance {
    fn name(&self) -> &str {
        "logistic_coefficients"
    }

    fn fit_importance(&self, x: &DenseMatrix<f64>, y: &[i64]) -> Result<Vec<f64>> {
        let params = LogisticRegressionParameters::default().with_alpha(self.alpha);
        let model = LogisticRegression::fit(x, &y.to_vec(), params)?;
        let coef = model.coefficients();
        let (rows, cols) = coef.shape();
        let n_features = x.shape().1;

        // smartcore lays coefficients out per class; fold whichever axis
        // matches the feature count.
        let mut importance = vec![0.0; n_features];
        if rows == n_features {
            for (i, imp) in importance.iter_mut().enumerate() {
                for j in 0..cols {
                    *imp += coef.get((i, j)).abs();
                }
            }
        } else if cols == n_features {
            for (j, imp) in importance.iter_mut().enumerate() {
                for i in 0..rows {
                    *imp += coef.get((i, j)).abs();
                }
            }
        } else {
            return Err(AblateError::Estimator {
                detail: format!(
                    "coefficient shape {}x{} does not cover {} features",
                    rows, cols, n_features
                ),
            });
        }
        Ok(importance)
    }
}
