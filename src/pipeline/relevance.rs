//! Per-feature relevance scoring strategies
//!
//! A relevance scorer maps a feature matrix and labels to one scalar per
//! feature, higher meaning more label-associated. Univariate scorers use
//! the statistics in [`crate::pipeline::stats`]; model scorers delegate to
//! an [`ImportanceEstimator`] fitted on the full matrix.

use crate::data::{FeatureMatrix, LabelVector};
use crate::error::{AblateError, Result};
use crate::model::ImportanceEstimator;
use crate::pipeline::stats::{anova_f, chi_square, mutual_information, DEFAULT_MI_BINS};

/// Per-feature relevance values aligned with matrix column order.
///
/// `p_values` is only present for tests with a reference distribution
/// (ANOVA F and chi-squared); both orderings agree, so consumers may rank
/// by either.
#[derive(Debug, Clone)]
pub struct RelevanceScore {
    pub names: Vec<String>,
    pub values: Vec<f64>,
    pub p_values: Option<Vec<f64>>,
}

impl RelevanceScore {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Strategy for turning a matrix and labels into per-feature relevance.
pub trait RelevanceScorer: Send + Sync {
    /// Short name used in experiment labels and error messages.
    fn name(&self) -> &str;

    fn score(&self, matrix: &FeatureMatrix, labels: &LabelVector) -> Result<RelevanceScore>;
}

/// Univariate statistical test applied independently to every feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnivariateTest {
    /// One-way ANOVA F statistic (default)
    #[default]
    AnovaF,
    /// Chi-squared on non-negative feature mass per class
    ChiSquare,
    /// Histogram mutual information (no p-values)
    MutualInfo,
}

impl std::fmt::Display for UnivariateTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnivariateTest::AnovaF => write!(f, "anova_f"),
            UnivariateTest::ChiSquare => write!(f, "chi2"),
            UnivariateTest::MutualInfo => write!(f, "mutual_info"),
        }
    }
}

impl std::str::FromStr for UnivariateTest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anova_f" | "anova" | "f" => Ok(UnivariateTest::AnovaF),
            "chi2" | "chi_square" => Ok(UnivariateTest::ChiSquare),
            "mutual_info" | "mi" => Ok(UnivariateTest::MutualInfo),
            _ => Err(format!(
                "Unknown univariate test: '{}'. Use 'anova_f', 'chi2' or 'mutual_info'.",
                s
            )),
        }
    }
}

/// Scores each feature with a univariate statistic against the labels.
#[derive(Debug, Clone)]
pub struct UnivariateScorer {
    test: UnivariateTest,
    bins: usize,
}

impl UnivariateScorer {
    pub fn new(test: UnivariateTest) -> Self {
        Self {
            test,
            bins: DEFAULT_MI_BINS,
        }
    }

    /// Bin count for the mutual information histogram. Ignored by the
    /// other tests.
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins.max(2);
        self
    }

    pub fn test(&self) -> UnivariateTest {
        self.test
    }
}

impl RelevanceScorer for UnivariateScorer {
    fn name(&self) -> &str {
        match self.test {
            UnivariateTest::AnovaF => "anova_f",
            UnivariateTest::ChiSquare => "chi2",
            UnivariateTest::MutualInfo => "mutual_info",
        }
    }

    fn score(&self, matrix: &FeatureMatrix, labels: &LabelVector) -> Result<RelevanceScore> {
        labels.check_alignment(matrix)?;
        let classes = labels.classes();
        let names = matrix.names();

        let mut values = Vec::with_capacity(names.len());
        let mut p_values = Vec::with_capacity(names.len());
        for name in &names {
            let column = matrix.column_values(name)?;
            match self.test {
                UnivariateTest::AnovaF => {
                    let (statistic, p) = anova_f(&column, labels.values(), &classes);
                    values.push(statistic);
                    p_values.push(p);
                }
                UnivariateTest::ChiSquare => {
                    if let Some(bad) = column.iter().find(|v| **v < 0.0) {
                        return Err(AblateError::InvalidColumn {
                            column: name.clone(),
                            reason: format!(
                                "chi-squared requires non-negative values, found {}",
                                bad
                            ),
                        });
                    }
                    let (statistic, p) = chi_square(&column, labels.values(), &classes);
                    values.push(statistic);
                    p_values.push(p);
                }
                UnivariateTest::MutualInfo => {
                    values.push(mutual_information(
                        &column,
                        labels.values(),
                        &classes,
                        self.bins,
                    ));
                }
            }
        }

        let p_values = match self.test {
            UnivariateTest::MutualInfo => None,
            _ => Some(p_values),
        };
        Ok(RelevanceScore {
            names,
            values,
            p_values,
        })
    }
}

/// Adapts an importance estimator (fitted once on the full matrix) into a
/// relevance scorer.
pub struct ModelScorer<E: ImportanceEstimator> {
    estimator: E,
}

impl<E: ImportanceEstimator> ModelScorer<E> {
    pub fn new(estimator: E) -> Self {
        Self { estimator }
    }
}

impl<E: ImportanceEstimator> RelevanceScorer for ModelScorer<E> {
    fn name(&self) -> &str {
        self.estimator.name()
    }

    fn score(&self, matrix: &FeatureMatrix, labels: &LabelVector) -> Result<RelevanceScore> {
        labels.check_alignment(matrix)?;
        let x = matrix.to_dense()?;
        let values = self.estimator.fit_importance(&x, labels.values())?;
        if values.len() != matrix.n_features() {
            return Err(AblateError::RankingMismatch {
                expected: values.len(),
                actual: matrix.n_features(),
            });
        }
        Ok(RelevanceScore {
            names: matrix.names(),
            values,
            p_values: None,
        })
    }
}
