//! Experiment harness - runs named selection experiments into the ledger
//!
//! One harness owns the results ledger for a comparison run. Selectors
//! and evaluators never reach the ledger directly; every row goes
//! through [`ExperimentHarness::run`], which is the single writer.

use crate::data::{FeatureMatrix, LabelVector};
use crate::error::Result;
use crate::model::Classifier;
use crate::pipeline::{CrossValidator, FeatureSelector};
use crate::report::{ExperimentRow, ResultsLedger};

pub struct ExperimentHarness {
    validator: CrossValidator,
    classifier: Box<dyn Classifier>,
    ledger: ResultsLedger,
}

impl ExperimentHarness {
    pub fn new(validator: CrossValidator, classifier: Box<dyn Classifier>) -> Self {
        Self {
            validator,
            classifier,
            ledger: ResultsLedger::new(),
        }
    }

    pub fn ledger(&self) -> &ResultsLedger {
        &self.ledger
    }

    pub fn into_ledger(self) -> ResultsLedger {
        self.ledger
    }

    /// Run one named experiment and record its row.
    ///
    /// The selector is refit independently on the clean and the
    /// noise-augmented matrix; a selection computed on one is never
    /// applied to the other. Deltas compare each selection against its
    /// own dataset's all-features baseline. Any failure propagates
    /// before the ledger is touched, so a failed experiment leaves no
    /// partial row behind.
    pub fn run(
        &mut self,
        name: &str,
        selector: &dyn FeatureSelector,
        clean: &FeatureMatrix,
        noisy: &FeatureMatrix,
        labels: &LabelVector,
    ) -> Result<ExperimentRow> {
        let clean_selected = selector.fit_transform(clean, labels)?;
        let noisy_selected = selector.fit_transform(noisy, labels)?;

        let baseline_clean = self.validator.evaluate(clean, labels, &*self.classifier)?;
        let baseline_noisy = self.validator.evaluate(noisy, labels, &*self.classifier)?;
        let score_clean = self
            .validator
            .evaluate(&clean_selected, labels, &*self.classifier)?;
        let score_noisy = self
            .validator
            .evaluate(&noisy_selected, labels, &*self.classifier)?;

        let row = ExperimentRow {
            name: name.to_string(),
            score_clean,
            delta_clean: score_clean - baseline_clean,
            score_noisy,
            delta_noisy: score_noisy - baseline_noisy,
            clean_features: clean_selected.n_features(),
            noisy_features: noisy_selected.n_features(),
        };
        self.ledger.upsert(row.clone());
        Ok(row)
    }
}
