//! Command-line argument definitions using clap

use clap::builder::TypedValueParser;
use clap::Parser;
use std::path::PathBuf;

/// Ablate - Compare feature selection strategies with cross-validated experiments
#[derive(Parser, Debug)]
#[command(name = "ablate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target column name containing the discrete class labels
    #[arg(short, long)]
    pub target: String,

    /// Seed driving fold shuffling, noise synthesis, and permutation importance
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of cross-validation folds
    #[arg(long, default_value = "10", value_parser = validate_folds)]
    pub folds: usize,

    /// Features retained by the top-k selection experiments
    #[arg(long, default_value = "10", value_parser = validate_at_least_one)]
    pub top_k: usize,

    /// Synthetic uniform-random noise columns appended for the robustness comparison
    #[arg(long, default_value = "30")]
    pub noise_columns: usize,

    /// Principal components retained by the PCA experiment
    #[arg(long, default_value = "5", value_parser = validate_at_least_one)]
    pub components: usize,

    /// Evaluation classifier used for every experiment score.
    /// Options: "knn" (default), "logistic", "tree", "forest"
    #[arg(long, default_value = "knn")]
    pub classifier: String,

    /// Importance estimator driving the recursive elimination experiment.
    /// Options: "logistic" (coefficient magnitudes, default), "tree" or
    /// "forest" (permutation importance)
    #[arg(long, default_value = "logistic")]
    pub rfe_estimator: String,

    /// Evaluate the elimination curve on the noisy matrix and report the
    /// best-scoring truncation
    #[arg(long, default_value = "false")]
    pub curve: bool,

    /// Export the ledger (and curve, when computed) to a JSON file.
    /// Defaults next to the input with an '_ablate.json' suffix.
    // The empty sentinel needs a parser that accepts empty values;
    // clap's default PathBuf parser rejects them.
    #[arg(
        short,
        long,
        num_args = 0..=1,
        default_missing_value = "",
        value_parser = clap::builder::OsStringValueParser::new().map(PathBuf::from)
    )]
    pub export: Option<PathBuf>,
}

impl Cli {
    /// Resolved export path: the explicit value of `--export`, or a path
    /// derived from the input file when the flag is given bare.
    pub fn export_path(&self) -> Option<PathBuf> {
        let given = self.export.as_ref()?;
        if !given.as_os_str().is_empty() {
            return Some(given.clone());
        }
        let parent = self
            .input
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."));
        let stem = self
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("results");
        Some(parent.join(format!("{}_ablate.json", stem)))
    }
}

/// Validator for the fold count
fn validate_folds(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value < 2 {
        Err(format!("folds must be at least 2, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for counts that must be positive
fn validate_at_least_one(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value == 0 {
        Err("value must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["ablate", "--input", "data.csv", "--target", "label"]);
        assert_eq!(cli.seed, 42);
        assert_eq!(cli.folds, 10);
        assert_eq!(cli.top_k, 10);
        assert_eq!(cli.noise_columns, 30);
        assert_eq!(cli.components, 5);
        assert_eq!(cli.classifier, "knn");
        assert_eq!(cli.rfe_estimator, "logistic");
        assert!(!cli.curve);
        assert!(cli.export.is_none());
    }

    #[test]
    fn test_bare_export_derives_path() {
        let cli = Cli::parse_from([
            "ablate", "--input", "data/run.csv", "--target", "label", "--export",
        ]);
        let path = cli.export_path().unwrap();
        assert_eq!(path, PathBuf::from("data/run_ablate.json"));
    }

    #[test]
    fn test_explicit_export_path_wins() {
        let cli = Cli::parse_from([
            "ablate", "--input", "run.csv", "--target", "label", "--export", "out.json",
        ]);
        assert_eq!(cli.export_path().unwrap(), PathBuf::from("out.json"));
    }

    #[test]
    fn test_folds_validator_rejects_one() {
        let result = Cli::try_parse_from([
            "ablate", "--input", "x.csv", "--target", "y", "--folds", "1",
        ]);
        assert!(result.is_err());
    }
}
