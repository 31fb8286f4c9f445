//! Elimination curve: score under every ranking truncation
//!
//! Given a full ranking, evaluates the cross-validated score of the
//! top-i ranked features for i = N down to the configured floor. The
//! curve is the system's primary diagnostic: its argmax says how many
//! features were actually worth keeping.

use crate::data::{FeatureMatrix, LabelVector};
use crate::error::Result;
use crate::model::Classifier;
use crate::pipeline::elimination::Ranking;
use crate::pipeline::evaluate::CrossValidator;
use crate::utils::progress::create_progress_bar;
use serde::Serialize;

/// One evaluated truncation of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// How many best-ranked features were retained.
    pub retained: usize,
    /// Cross-validated mean accuracy at that truncation.
    pub score: f64,
}

/// The collected curve with its first-occurrence argmax.
#[derive(Debug, Clone, Serialize)]
pub struct CurveResult {
    pub points: Vec<CurvePoint>,
    pub best_index: usize,
}

impl CurveResult {
    /// The highest-scoring point, if the curve has any points.
    pub fn best(&self) -> Option<&CurvePoint> {
        self.points.get(self.best_index)
    }

    pub fn scores(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.score).collect()
    }
}

/// Evaluates a ranking's prefix truncations with a fixed validator and
/// classifier.
pub struct EliminationCurve<'a> {
    validator: &'a CrossValidator,
    classifier: &'a dyn Classifier,
    min_retained: usize,
    progress: bool,
}

impl<'a> EliminationCurve<'a> {
    pub fn new(validator: &'a CrossValidator, classifier: &'a dyn Classifier) -> Self {
        Self {
            validator,
            classifier,
            min_retained: 1,
            progress: false,
        }
    }

    /// Smallest retained-feature count to evaluate. Defaults to 1; raise
    /// it when single-feature fits are known to be degenerate for the
    /// chosen classifier.
    pub fn with_min_retained(mut self, min_retained: usize) -> Self {
        self.min_retained = min_retained.max(1);
        self
    }

    /// Show a progress bar during [`EliminationCurve::run`].
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Lazy sequence of curve points, best-first prefix lengths N, N-1, ...
    ///
    /// The iterator is finite and not restartable; an evaluation failure
    /// yields the error once and then fuses. Validation against the
    /// ranking happens up front.
    pub fn points(
        &self,
        matrix: &'a FeatureMatrix,
        labels: &'a LabelVector,
        ranking: &Ranking,
    ) -> Result<CurvePoints<'a>> {
        ranking.check_matches(matrix)?;
        labels.check_alignment(matrix)?;
        let ordered = ranking.ordered_names();
        let n = ordered.len();
        let floor = self.min_retained.clamp(1, n.max(1));
        Ok(CurvePoints {
            validator: *self.validator,
            classifier: self.classifier,
            matrix,
            labels,
            ordered,
            retained: n,
            floor,
            failed: false,
        })
    }

    /// Collect the full curve and locate its maximum (first occurrence on
    /// ties). Bit-for-bit reproducible for a fixed ranking and fold seed.
    pub fn run(
        &self,
        matrix: &'a FeatureMatrix,
        labels: &'a LabelVector,
        ranking: &Ranking,
    ) -> Result<CurveResult> {
        let iter = self.points(matrix, labels, ranking)?;
        let total = iter.remaining_evaluations();
        let bar = self
            .progress
            .then(|| create_progress_bar(total as u64, "   Evaluating truncations"));

        let mut points: Vec<CurvePoint> = Vec::with_capacity(total);
        let mut best_index = 0;
        for item in iter {
            let point = item?;
            points.push(point);
            let last = points.len() - 1;
            if points[last].score > points[best_index].score {
                best_index = last;
            }
            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }
        if let Some(bar) = &bar {
            bar.finish_with_message(format!("   [OK] Evaluated {} truncations", points.len()));
        }

        Ok(CurveResult { points, best_index })
    }
}

/// Lazy, non-restartable iterator over curve points.
pub struct CurvePoints<'a> {
    validator: CrossValidator,
    classifier: &'a dyn Classifier,
    matrix: &'a FeatureMatrix,
    labels: &'a LabelVector,
    ordered: Vec<String>,
    retained: usize,
    floor: usize,
    failed: bool,
}

impl CurvePoints<'_> {
    /// Evaluations left before the iterator runs dry.
    pub fn remaining_evaluations(&self) -> usize {
        (self.retained + 1).saturating_sub(self.floor)
    }
}

impl Iterator for CurvePoints<'_> {
    type Item = Result<CurvePoint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.retained < self.floor {
            return None;
        }
        let retained = self.retained;
        let result = self
            .matrix
            .select_names(&self.ordered[..retained])
            .and_then(|sub| self.validator.evaluate(&sub, self.labels, self.classifier));
        self.retained -= 1;
        match result {
            Ok(score) => Some(Ok(CurvePoint { retained, score })),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KnnClassifier;
    use polars::prelude::*;

    fn fixture() -> (FeatureMatrix, LabelVector, Ranking) {
        let mut informative = Vec::new();
        let mut mild = Vec::new();
        let mut noise = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            let jitter = (i % 5) as f64 * 0.1;
            informative.push(jitter);
            mild.push(jitter * 0.5);
            noise.push((i % 3) as f64);
            labels.push(0);
            informative.push(8.0 + jitter);
            mild.push(4.0 + jitter * 0.5);
            noise.push((i % 3) as f64);
            labels.push(1);
        }
        let df = df! {
            "informative" => informative,
            "mild" => mild,
            "noise" => noise,
        }
        .unwrap();
        let matrix = FeatureMatrix::new(df).unwrap();
        let ranking = Ranking::new(
            vec!["informative".into(), "mild".into(), "noise".into()],
            vec![1, 2, 3],
        );
        (matrix, LabelVector::new(labels), ranking)
    }

    #[test]
    fn test_curve_has_one_point_per_truncation() {
        let (matrix, labels, ranking) = fixture();
        let validator = CrossValidator::new(5, 42);
        let classifier = KnnClassifier::new(3);
        let result = EliminationCurve::new(&validator, &classifier)
            .run(&matrix, &labels, &ranking)
            .unwrap();
        let retained: Vec<usize> = result.points.iter().map(|p| p.retained).collect();
        assert_eq!(retained, vec![3, 2, 1]);
    }

    #[test]
    fn test_best_index_is_argmax() {
        let (matrix, labels, ranking) = fixture();
        let validator = CrossValidator::new(5, 42);
        let classifier = KnnClassifier::new(3);
        let result = EliminationCurve::new(&validator, &classifier)
            .run(&matrix, &labels, &ranking)
            .unwrap();
        let best = result.best().unwrap();
        for point in &result.points {
            assert!(best.score >= point.score);
        }
        // first occurrence: no earlier point reaches the best score
        for point in &result.points[..result.best_index] {
            assert!(point.score < best.score);
        }
    }

    #[test]
    fn test_curve_bit_identical_across_runs() {
        let (matrix, labels, ranking) = fixture();
        let validator = CrossValidator::new(5, 9);
        let classifier = KnnClassifier::new(3);
        let curve = EliminationCurve::new(&validator, &classifier);
        let first = curve.run(&matrix, &labels, &ranking).unwrap();
        let second = curve.run(&matrix, &labels, &ranking).unwrap();
        assert_eq!(first.points.len(), second.points.len());
        for (a, b) in first.points.iter().zip(second.points.iter()) {
            assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }

    #[test]
    fn test_min_retained_clamps_tail() {
        let (matrix, labels, ranking) = fixture();
        let validator = CrossValidator::new(5, 42);
        let classifier = KnnClassifier::new(3);
        let result = EliminationCurve::new(&validator, &classifier)
            .with_min_retained(2)
            .run(&matrix, &labels, &ranking)
            .unwrap();
        let retained: Vec<usize> = result.points.iter().map(|p| p.retained).collect();
        assert_eq!(retained, vec![3, 2]);
    }

    #[test]
    fn test_foreign_ranking_rejected() {
        let (matrix, labels, _) = fixture();
        let ranking = Ranking::new(vec!["other".into()], vec![1]);
        let validator = CrossValidator::new(5, 42);
        let classifier = KnnClassifier::new(3);
        let err = EliminationCurve::new(&validator, &classifier)
            .run(&matrix, &labels, &ranking)
            .unwrap_err();
        assert!(
            matches!(err, crate::error::AblateError::RankingMismatch { expected: 1, actual: 3 }),
            "got: {}",
            err
        );
    }

    #[test]
    fn test_points_iterator_is_lazy_and_finite() {
        let (matrix, labels, ranking) = fixture();
        let validator = CrossValidator::new(5, 42);
        let classifier = KnnClassifier::new(3);
        let curve = EliminationCurve::new(&validator, &classifier);
        let mut iter = curve.points(&matrix, &labels, &ranking).unwrap();
        assert_eq!(iter.remaining_evaluations(), 3);
        let first = iter.next().unwrap().unwrap();
        assert_eq!(first.retained, 3);
        assert_eq!(iter.remaining_evaluations(), 2);
        assert_eq!(iter.by_ref().count(), 2);
        assert!(iter.next().is_none());
    }
}
