//! Error taxonomy for the selection and evaluation pipeline
//!
//! Every failure names the offending feature, fold, iteration, or dimension
//! so a broken experiment can be traced without re-running it.

use polars::error::PolarsError;
use smartcore::error::Failed;
use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T, E = AblateError> = std::result::Result<T, E>;

/// Errors produced by the selection and evaluation pipeline.
#[derive(Debug, Error)]
pub enum AblateError {
    /// The requested fold count cannot be satisfied by the available rows.
    #[error("insufficient data: {rows} rows cannot be split into {folds} folds")]
    InsufficientData { rows: usize, folds: usize },

    /// A class present in the full label set has no rows in a fold's
    /// training partition, so the classifier would never see it.
    #[error("class {label} has no training rows in fold {fold}")]
    MissingClass { label: i64, fold: usize },

    /// The elimination engine's estimator failed mid-loop.
    #[error(
        "ranking failed at iteration {iteration} with {} features remaining ({}): {detail}",
        .remaining.len(),
        .remaining.join(", ")
    )]
    Ranking {
        iteration: usize,
        remaining: Vec<String>,
        detail: String,
    },

    /// A threshold policy retained nothing. Recovered internally by the
    /// keep-single-best fallback; public selector APIs never return this.
    #[error("selection under policy {policy} retained no features")]
    EmptySelection { policy: String },

    /// Matrix rows and label count disagree.
    #[error("dimension mismatch: {rows} matrix rows but {labels} labels")]
    DimensionMismatch { rows: usize, labels: usize },

    /// A ranking or retention mask was computed over a different feature
    /// set than the matrix it is being applied to.
    #[error("feature set mismatch: selection covers {expected} features but matrix has {actual}")]
    RankingMismatch { expected: usize, actual: usize },

    /// A column failed validation (non-numeric, nulls, duplicate name, or
    /// values a scorer cannot accept).
    #[error("invalid column '{column}': {reason}")]
    InvalidColumn { column: String, reason: String },

    /// Classifier fit or predict failure outside the elimination loop.
    #[error("estimator failure: {detail}")]
    Estimator { detail: String },

    #[error(transparent)]
    DataFrame(#[from] PolarsError),
}

impl From<Failed> for AblateError {
    fn from(err: Failed) -> Self {
        AblateError::Estimator {
            detail: err.to_string(),
        }
    }
}
