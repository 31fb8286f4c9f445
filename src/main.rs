//! Ablate: feature selection comparison CLI
//!
//! Loads a labeled dataset, appends synthetic noise columns, and runs a
//! suite of cross-validated selection experiments so the strategies can
//! be compared on equal footing.

mod cli;
mod data;
mod error;
mod harness;
mod model;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use cli::Cli;
use data::{augment_with_noise, load_dataset, prepare_dataset, FeatureMatrix};
use harness::ExperimentHarness;
use model::{
    ClassifierKind, CoefficientImportance, EstimatorKind, ForestClassifier, PermutationImportance,
};
use pipeline::{
    CrossValidator, EliminationCurve, EliminationEngine, EliminationSelector, IdentitySelector,
    ModelScorer, PcaSelector, RelevanceSelector, ThresholdPolicy, UnivariateScorer, UnivariateTest,
};
use report::{export_results, ExperimentRow, ExportParams};
use utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let classifier_kind: ClassifierKind = cli
        .classifier
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let estimator_kind: EstimatorKind = cli
        .rfe_estimator
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        &cli.target,
        &classifier_kind.to_string(),
        cli.seed,
        cli.folds,
        cli.top_k,
        cli.noise_columns,
    );

    let run_start = Instant::now();

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let spinner = create_spinner("Loading dataset...");
    let lf = load_dataset(&cli.input)?;
    let prepared = prepare_dataset(lf, &cli.target)?;
    finish_with_success(&spinner, "Dataset loaded");

    let clean = prepared.features;
    let labels = prepared.labels;
    print_count("numeric feature column(s)", clean.n_features(), None);
    if !prepared.dropped_columns.is_empty() {
        print_info(&format!(
            "Ignored {} non-numeric column(s)",
            prepared.dropped_columns.len()
        ));
    }
    if prepared.dropped_rows > 0 {
        print_info(&format!(
            "Dropped {} row(s) containing nulls",
            prepared.dropped_rows
        ));
    }

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", clean.n_rows());
    println!("      Features: {}", clean.n_features());
    println!("      Classes: {}", labels.classes().len());

    // Step 2: Synthesize noise columns
    print_step_header(2, "Synthesize Noise Columns");
    let noisy = augment_with_noise(&clean, cli.noise_columns, cli.seed)?;
    if cli.noise_columns == 0 {
        print_warning("No noise columns requested; clean and noisy runs will agree");
    } else {
        print_success(&format!(
            "Appended {} uniform-random noise column(s) ({} total features)",
            cli.noise_columns,
            noisy.n_features()
        ));
    }

    // Step 3: Experiment suite
    print_step_header(3, "Run Experiment Suite");
    let validator = CrossValidator::new(cli.folds, cli.seed);
    let mut harness = ExperimentHarness::new(validator, classifier_kind.build(cli.seed));
    let policy = ThresholdPolicy::TopK(cli.top_k);

    let spinner = create_spinner("Running baseline...");
    let row = harness.run("baseline", &IdentitySelector, &clean, &noisy, &labels)?;
    finish_with_success(&spinner, &row_summary(&row));

    let spinner = create_spinner("Running anova_top_k...");
    let selector = RelevanceSelector::new(
        Box::new(UnivariateScorer::new(UnivariateTest::AnovaF)),
        policy,
    );
    let row = harness.run("anova_top_k", &selector, &clean, &noisy, &labels)?;
    finish_with_success(&spinner, &row_summary(&row));

    let spinner = create_spinner("Running chi2_top_k...");
    if has_negative_values(&clean)? {
        finish_with_warning(&spinner, "chi2_top_k skipped: the matrix contains negative values");
    } else {
        let selector = RelevanceSelector::new(
            Box::new(UnivariateScorer::new(UnivariateTest::ChiSquare)),
            policy,
        );
        let row = harness.run("chi2_top_k", &selector, &clean, &noisy, &labels)?;
        finish_with_success(&spinner, &row_summary(&row));
    }

    let spinner = create_spinner("Running mutual_info_top_k...");
    let selector = RelevanceSelector::new(
        Box::new(UnivariateScorer::new(UnivariateTest::MutualInfo)),
        policy,
    );
    let row = harness.run("mutual_info_top_k", &selector, &clean, &noisy, &labels)?;
    finish_with_success(&spinner, &row_summary(&row));

    let spinner = create_spinner("Running logistic_coef...");
    let selector = RelevanceSelector::new(
        Box::new(ModelScorer::new(CoefficientImportance::default())),
        policy,
    );
    let row = harness.run("logistic_coef", &selector, &clean, &noisy, &labels)?;
    finish_with_success(&spinner, &row_summary(&row));

    let spinner = create_spinner("Running forest_importance...");
    let selector = RelevanceSelector::new(
        Box::new(ModelScorer::new(PermutationImportance::new(
            ForestClassifier::new(cli.seed),
            cli.seed,
        ))),
        policy,
    );
    let row = harness.run("forest_importance", &selector, &clean, &noisy, &labels)?;
    finish_with_success(&spinner, &row_summary(&row));

    print_info(&format!(
        "Ranking features by recursive elimination ({} estimator)",
        estimator_kind
    ));
    let selector =
        EliminationSelector::new(estimator_kind.build(cli.seed), cli.top_k).with_progress(true);
    let row = harness.run("rfe_top_k", &selector, &clean, &noisy, &labels)?;
    print_success(&row_summary(&row));

    let spinner = create_spinner("Running pca_components...");
    let selector = PcaSelector::new(cli.components);
    let row = harness.run("pca_components", &selector, &clean, &noisy, &labels)?;
    finish_with_success(&spinner, &row_summary(&row));

    // Step 4: Elimination curve
    print_step_header(4, "Elimination Curve");
    let curve = if cli.curve {
        let engine = EliminationEngine::new(estimator_kind.build(cli.seed)).with_progress(true);
        // Deterministic, so this matches the ranking the rfe experiment used.
        let ranking = engine.rank(&noisy, &labels)?;
        let curve_classifier = classifier_kind.build(cli.seed);
        let curve = EliminationCurve::new(&validator, &*curve_classifier)
            .with_progress(true)
            .run(&noisy, &labels, &ranking)?;
        if let Some(best) = curve.best() {
            print_success(&format!(
                "Best truncation: {} feature(s) at accuracy {:.4}",
                best.retained, best.score
            ));
        }
        Some(curve)
    } else {
        print_info("Skipped (enable with --curve)");
        None
    };

    // Step 5: Results
    print_step_header(5, "Results");
    harness.ledger().display();

    if let Some(path) = cli.export_path() {
        let input_display = cli.input.display().to_string();
        let classifier_name = classifier_kind.to_string();
        let params = ExportParams {
            input_file: &input_display,
            target_column: &cli.target,
            seed: cli.seed,
            folds: cli.folds,
            noise_columns: cli.noise_columns,
            classifier: &classifier_name,
        };
        export_results(harness.ledger(), curve.as_ref(), &path, &params)?;
        print_success(&format!("Exported results to {}", path.display()));
    }

    println!(
        "\n    {} Completed in {:.2?}",
        style("⏱").cyan(),
        run_start.elapsed()
    );
    print_completion();

    Ok(())
}

/// One-line score summary for a finished experiment.
fn row_summary(row: &ExperimentRow) -> String {
    format!(
        "{}: clean {:.4} ({:+.4})  noisy {:.4} ({:+.4})",
        row.name, row.score_clean, row.delta_clean, row.score_noisy, row.delta_noisy
    )
}

/// Whether any feature column holds a negative value (chi-squared needs
/// non-negative inputs).
fn has_negative_values(matrix: &FeatureMatrix) -> Result<bool> {
    for name in matrix.names() {
        let values = matrix.column_values(&name)?;
        if values.iter().any(|v| *v < 0.0) {
            return Ok(true);
        }
    }
    Ok(false)
}
