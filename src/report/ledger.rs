//! Results ledger - the comparative experiment table and its export

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::CurveResult;

/// One experiment's outcome on the clean and noise-augmented datasets.
///
/// Deltas are measured against each dataset's own unselected baseline,
/// so a positive delta means selection beat using every feature.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentRow {
    /// Experiment name; unique within a ledger.
    pub name: String,
    /// Mean CV accuracy of the selection on the clean dataset.
    pub score_clean: f64,
    /// `score_clean` minus the clean all-features baseline.
    pub delta_clean: f64,
    /// Mean CV accuracy of the selection on the noisy dataset.
    pub score_noisy: f64,
    /// `score_noisy` minus the noisy all-features baseline.
    pub delta_noisy: f64,
    /// Features the selection kept on the clean dataset.
    pub clean_features: usize,
    /// Features the selection kept on the noisy dataset.
    pub noisy_features: usize,
}

/// Insertion-ordered table of experiment rows keyed by name.
///
/// Re-running an experiment under an existing name overwrites that row in
/// place; its position in the table never moves.
#[derive(Debug, Default)]
pub struct ResultsLedger {
    rows: Vec<ExperimentRow>,
}

impl ResultsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the row, replacing any existing row with the same name.
    pub fn upsert(&mut self, row: ExperimentRow) {
        match self.rows.iter_mut().find(|r| r.name == row.name) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ExperimentRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    pub fn rows(&self) -> &[ExperimentRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.rows)
    }

    /// Render the comparison table to stdout.
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📊").cyan(),
            style("EXPERIMENT RESULTS").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Experiment").add_attribute(Attribute::Bold),
            Cell::new("Clean").add_attribute(Attribute::Bold),
            Cell::new("Δ Clean").add_attribute(Attribute::Bold),
            Cell::new("Noisy").add_attribute(Attribute::Bold),
            Cell::new("Δ Noisy").add_attribute(Attribute::Bold),
            Cell::new("Kept (c/n)").add_attribute(Attribute::Bold),
        ]);

        for row in &self.rows {
            table.add_row(vec![
                Cell::new(&row.name),
                Cell::new(format!("{:.4}", row.score_clean)),
                delta_cell(row.delta_clean),
                Cell::new(format!("{:.4}", row.score_noisy)),
                delta_cell(row.delta_noisy),
                Cell::new(format!("{} / {}", row.clean_features, row.noisy_features)),
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}

fn delta_cell(delta: f64) -> Cell {
    let text = format!("{:+.4}", delta);
    if delta > 0.0 {
        Cell::new(text).fg(Color::Green)
    } else if delta < 0.0 {
        Cell::new(text).fg(Color::Red)
    } else {
        Cell::new(text).fg(Color::White)
    }
}

/// Metadata about the comparison run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Ablate version
    pub ablate_version: String,
    /// Input file path
    pub input_file: String,
    /// Target column name
    pub target_column: String,
    /// Seed driving folds, noise, and permutation shuffles
    pub seed: u64,
    /// Cross-validation fold count
    pub folds: usize,
    /// Number of synthetic noise columns appended
    pub noise_columns: usize,
    /// Evaluation classifier
    pub classifier: String,
}

/// Complete run export: metadata, experiment rows, optional curve
#[derive(Serialize)]
pub struct RunExport<'a> {
    pub metadata: RunMetadata,
    pub experiments: &'a [ExperimentRow],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<&'a CurveResult>,
}

/// Parameters for the run export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub target_column: &'a str,
    pub seed: u64,
    pub folds: usize,
    pub noise_columns: usize,
    pub classifier: &'a str,
}

/// Export the ledger (and the elimination curve, when computed) to a JSON
/// file with run metadata.
pub fn export_results(
    ledger: &ResultsLedger,
    curve: Option<&CurveResult>,
    output_path: &Path,
    params: &ExportParams,
) -> anyhow::Result<()> {
    let export = RunExport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            ablate_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            target_column: params.target_column.to_string(),
            seed: params.seed,
            folds: params.folds,
            noise_columns: params.noise_columns,
            classifier: params.classifier.to_string(),
        },
        experiments: ledger.rows(),
        curve,
    };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize experiment results to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write results to {}", output_path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, score_clean: f64) -> ExperimentRow {
        ExperimentRow {
            name: name.to_string(),
            score_clean,
            delta_clean: 0.0,
            score_noisy: score_clean - 0.1,
            delta_noisy: -0.1,
            clean_features: 10,
            noisy_features: 12,
        }
    }

    #[test]
    fn test_upsert_appends_new_names() {
        let mut ledger = ResultsLedger::new();
        ledger.upsert(row("baseline", 0.9));
        ledger.upsert(row("anova", 0.92));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.rows()[0].name, "baseline");
        assert_eq!(ledger.rows()[1].name, "anova");
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut ledger = ResultsLedger::new();
        ledger.upsert(row("baseline", 0.9));
        ledger.upsert(row("anova", 0.92));
        ledger.upsert(row("baseline", 0.95));
        assert_eq!(ledger.len(), 2, "overwrite must not duplicate");
        assert_eq!(ledger.rows()[0].name, "baseline", "position preserved");
        assert!((ledger.rows()[0].score_clean - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_get_by_name() {
        let mut ledger = ResultsLedger::new();
        ledger.upsert(row("rfe", 0.88));
        assert!(ledger.get("rfe").is_some());
        assert!(ledger.get("missing").is_none());
    }

    #[test]
    fn test_json_round_trips_names() {
        let mut ledger = ResultsLedger::new();
        ledger.upsert(row("baseline", 0.9));
        let json = ledger.to_json().unwrap();
        assert!(json.contains("\"baseline\""));
        assert!(json.contains("score_clean"));
    }
}
