//! Feature selectors - the strategies the experiment harness compares
//!
//! Every selector maps a training matrix to a reduced one. Selection is
//! always refit from scratch on whatever matrix it is handed, so clean
//! and noise-augmented variants of a dataset never share fitted state.

use crate::data::{FeatureMatrix, LabelVector};
use crate::error::Result;
use crate::model::ImportanceEstimator;
use crate::pipeline::elimination::EliminationEngine;
use crate::pipeline::pca::Pca;
use crate::pipeline::relevance::RelevanceScorer;
use crate::pipeline::threshold::ThresholdPolicy;

/// A reduced matrix plus the per-feature retention mask that produced it.
///
/// The mask is indexed by the input matrix's column order.
#[derive(Debug, Clone)]
pub struct SelectionResult {
    pub matrix: FeatureMatrix,
    pub mask: Vec<bool>,
}

impl SelectionResult {
    /// Number of retained features.
    pub fn kept(&self) -> usize {
        self.mask.iter().filter(|keep| **keep).count()
    }
}

/// Strategy mapping a training matrix to a reduced one.
pub trait FeatureSelector: Send + Sync {
    /// Default experiment label; callers may name rows differently.
    fn label(&self) -> String;

    fn fit_transform(&self, matrix: &FeatureMatrix, labels: &LabelVector)
        -> Result<FeatureMatrix>;
}

/// Keeps every feature. The unreduced baseline of the suite.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySelector;

impl FeatureSelector for IdentitySelector {
    fn label(&self) -> String {
        "baseline".to_string()
    }

    fn fit_transform(
        &self,
        matrix: &FeatureMatrix,
        _labels: &LabelVector,
    ) -> Result<FeatureMatrix> {
        Ok(matrix.clone())
    }
}

/// Scores every feature with a relevance scorer and keeps the ones the
/// threshold policy passes.
pub struct RelevanceSelector {
    scorer: Box<dyn RelevanceScorer>,
    policy: ThresholdPolicy,
}

impl RelevanceSelector {
    pub fn new(scorer: Box<dyn RelevanceScorer>, policy: ThresholdPolicy) -> Self {
        Self { scorer, policy }
    }

    /// Full selection with the retention mask, for callers that need to
    /// know which columns survived.
    pub fn selection(
        &self,
        matrix: &FeatureMatrix,
        labels: &LabelVector,
    ) -> Result<SelectionResult> {
        let score = self.scorer.score(matrix, labels)?;
        let mask = self.policy.select(&score.values);
        let matrix = matrix.select_mask(&mask)?;
        Ok(SelectionResult { matrix, mask })
    }
}

impl FeatureSelector for RelevanceSelector {
    fn label(&self) -> String {
        format!("{}_{}", self.scorer.name(), self.policy)
    }

    fn fit_transform(
        &self,
        matrix: &FeatureMatrix,
        labels: &LabelVector,
    ) -> Result<FeatureMatrix> {
        self.selection(matrix, labels).map(|s| s.matrix)
    }
}

/// Runs the full recursive elimination and keeps the `keep` best ranks.
pub struct EliminationSelector<E: ImportanceEstimator> {
    engine: EliminationEngine<E>,
    keep: usize,
}

impl<E: ImportanceEstimator> EliminationSelector<E> {
    pub fn new(estimator: E, keep: usize) -> Self {
        Self {
            engine: EliminationEngine::new(estimator),
            keep: keep.max(1),
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.engine = self.engine.with_progress(progress);
        self
    }

    pub fn selection(
        &self,
        matrix: &FeatureMatrix,
        labels: &LabelVector,
    ) -> Result<SelectionResult> {
        let ranking = self.engine.rank(matrix, labels)?;
        let mask = ranking.retention_mask(self.keep);
        let matrix = matrix.select_mask(&mask)?;
        Ok(SelectionResult { matrix, mask })
    }
}

impl<E: ImportanceEstimator> FeatureSelector for EliminationSelector<E> {
    fn label(&self) -> String {
        format!("rfe_top_{}", self.keep)
    }

    fn fit_transform(
        &self,
        matrix: &FeatureMatrix,
        labels: &LabelVector,
    ) -> Result<FeatureMatrix> {
        self.selection(matrix, labels).map(|s| s.matrix)
    }
}

/// Replaces the features with their leading principal components.
#[derive(Debug, Clone, Copy)]
pub struct PcaSelector {
    pca: Pca,
}

impl PcaSelector {
    pub fn new(components: usize) -> Self {
        Self {
            pca: Pca::new(components),
        }
    }
}

impl FeatureSelector for PcaSelector {
    fn label(&self) -> String {
        format!("pca_{}", self.pca.components())
    }

    fn fit_transform(
        &self,
        matrix: &FeatureMatrix,
        _labels: &LabelVector,
    ) -> Result<FeatureMatrix> {
        self.pca.project(matrix).map(|p| p.matrix)
    }
}
