//! Recursive feature elimination
//!
//! The expensive path of the whole system: the engine refits its estimator
//! once per feature (O(N) fits over a shrinking matrix), eliminating the
//! single least-important remaining feature each round. The eliminated
//! order, reversed, is the full importance ranking.

use crate::data::{FeatureMatrix, LabelVector};
use crate::error::{AblateError, Result};
use crate::model::ImportanceEstimator;
use crate::utils::progress::create_progress_bar;

/// A total importance order over a matrix's features.
///
/// `ranks[i]` is the rank of the i-th original column: rank 1 was
/// eliminated last (most important), rank N first. Ranks always form a
/// permutation of 1..=N.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    names: Vec<String>,
    ranks: Vec<usize>,
}

impl Ranking {
    pub fn new(names: Vec<String>, ranks: Vec<usize>) -> Self {
        debug_assert_eq!(names.len(), ranks.len());
        Self { names, ranks }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    pub fn n_features(&self) -> usize {
        self.ranks.len()
    }

    /// Column indices ordered best-first (rank 1 first).
    pub fn order(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.ranks.len()).collect();
        indices.sort_by_key(|&i| self.ranks[i]);
        indices
    }

    /// Column names ordered best-first.
    pub fn ordered_names(&self) -> Vec<String> {
        self.order()
            .into_iter()
            .map(|i| self.names[i].clone())
            .collect()
    }

    /// Mask retaining the `keep` best-ranked features.
    pub fn retention_mask(&self, keep: usize) -> Vec<bool> {
        self.ranks.iter().map(|rank| *rank <= keep).collect()
    }

    /// Error unless this ranking covers exactly the matrix's columns.
    pub fn check_matches(&self, matrix: &FeatureMatrix) -> Result<()> {
        if self.names.len() != matrix.n_features() {
            return Err(AblateError::RankingMismatch {
                expected: self.names.len(),
                actual: matrix.n_features(),
            });
        }
        for (ours, theirs) in self.names.iter().zip(matrix.names().iter()) {
            if ours != theirs {
                return Err(AblateError::InvalidColumn {
                    column: theirs.clone(),
                    reason: format!("not covered by the ranking (expected '{}')", ours),
                });
            }
        }
        Ok(())
    }
}

/// Stepwise eliminator producing a full [`Ranking`].
///
/// Iterations are strictly sequential: each fit depends on the previous
/// elimination decision. Abandoning a call mid-loop leaves no state
/// behind; the partial assignment only becomes a `Ranking` at the end.
pub struct EliminationEngine<E: ImportanceEstimator> {
    estimator: E,
    progress: bool,
}

impl<E: ImportanceEstimator> EliminationEngine<E> {
    pub fn new(estimator: E) -> Self {
        Self {
            estimator,
            progress: false,
        }
    }

    /// Show a progress bar while ranking. Off by default so library calls
    /// and tests stay silent.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Rank every feature by recursive elimination.
    ///
    /// Each round fits the estimator on the active columns, finds the
    /// lowest importance (ties broken by ascending original index) and
    /// assigns that feature the worst unassigned rank. An estimator
    /// failure aborts with the iteration index and the features that were
    /// still active.
    pub fn rank(&self, matrix: &FeatureMatrix, labels: &LabelVector) -> Result<Ranking> {
        labels.check_alignment(matrix)?;
        let names = matrix.names();
        let n = names.len();

        let mut active = vec![true; n];
        let mut ranks = vec![0usize; n];

        let bar = self
            .progress
            .then(|| create_progress_bar(n as u64, "   Eliminating features"));

        for next_rank in (1..=n).rev() {
            let iteration = n - next_rank;
            let remaining: Vec<String> = names
                .iter()
                .zip(active.iter())
                .filter(|(_, live)| **live)
                .map(|(name, _)| name.clone())
                .collect();

            let sub = matrix.select_names(&remaining)?;
            let x = sub.to_dense()?;
            let importance = self
                .estimator
                .fit_importance(&x, labels.values())
                .map_err(|err| AblateError::Ranking {
                    iteration,
                    remaining: remaining.clone(),
                    detail: err.to_string(),
                })?;
            if importance.len() != remaining.len() {
                return Err(AblateError::Ranking {
                    iteration,
                    remaining: remaining.clone(),
                    detail: format!(
                        "estimator returned {} importances for {} features",
                        importance.len(),
                        remaining.len()
                    ),
                });
            }

            // lowest importance loses; strict < keeps the earliest position
            // on ties, and active columns are already in ascending original
            // order
            let mut worst_pos = 0;
            for (pos, imp) in importance.iter().enumerate() {
                if *imp < importance[worst_pos] {
                    worst_pos = pos;
                }
            }

            let worst_index = nth_active(&active, worst_pos);
            ranks[worst_index] = next_rank;
            active[worst_index] = false;

            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = &bar {
            bar.finish_with_message(format!("   [OK] Ranked {} features", n));
        }

        Ok(Ranking::new(names, ranks))
    }
}

/// Original index of the `pos`-th still-active column.
fn nth_active(active: &[bool], pos: usize) -> usize {
    active
        .iter()
        .enumerate()
        .filter(|(_, live)| **live)
        .map(|(i, _)| i)
        .nth(pos)
        .unwrap_or(0)
}
