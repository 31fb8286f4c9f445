//! Noise-robustness tests: synthetic noise columns must lose to real signal

use ablate::data::augment_with_noise;
use ablate::pipeline::{
    RelevanceScorer, RelevanceSelector, ThresholdPolicy, UnivariateScorer, UnivariateTest,
};

mod common;

use common::*;

const INFORMATIVE: usize = 30;
const NOISE: usize = 30;

/// Median of the first `INFORMATIVE` values versus the max of the rest.
fn split_scores(values: &[f64]) -> (f64, f64) {
    let mut informative: Vec<f64> = values[..INFORMATIVE].to_vec();
    informative.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let median = informative[INFORMATIVE / 2];
    let noise_max = values[INFORMATIVE..]
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    (median, noise_max)
}

#[test]
fn test_noise_columns_score_below_informative_median_anova() {
    let (matrix, labels) = create_separable_dataset(150, INFORMATIVE, 21);
    let noisy = augment_with_noise(&matrix, NOISE, 42).unwrap();

    let score = UnivariateScorer::new(UnivariateTest::AnovaF)
        .score(&noisy, &labels)
        .unwrap();

    assert_eq!(score.len(), INFORMATIVE + NOISE);
    let (median, noise_max) = split_scores(&score.values);
    assert!(
        noise_max < median,
        "every noise F must sit below the median informative F: noise max {}, median {}",
        noise_max,
        median
    );
}

#[test]
fn test_noise_columns_score_below_informative_median_mutual_info() {
    let (matrix, labels) = create_separable_dataset(150, INFORMATIVE, 21);
    let noisy = augment_with_noise(&matrix, NOISE, 42).unwrap();

    let score = UnivariateScorer::new(UnivariateTest::MutualInfo)
        .score(&noisy, &labels)
        .unwrap();

    let (median, noise_max) = split_scores(&score.values);
    assert!(
        noise_max < median,
        "every noise MI must sit below the median informative MI: noise max {}, median {}",
        noise_max,
        median
    );
}

#[test]
fn test_top_k_on_noisy_matrix_keeps_only_informative_columns() {
    let (matrix, labels) = create_separable_dataset(150, INFORMATIVE, 21);
    let noisy = augment_with_noise(&matrix, NOISE, 42).unwrap();

    let selector = RelevanceSelector::new(
        Box::new(UnivariateScorer::new(UnivariateTest::AnovaF)),
        ThresholdPolicy::TopK(INFORMATIVE),
    );
    let result = selector.selection(&noisy, &labels).unwrap();

    assert_eq!(result.kept(), INFORMATIVE);
    for name in result.matrix.names() {
        assert!(
            name.starts_with("f_"),
            "a noise column slipped through selection: {}",
            name
        );
    }
}

#[test]
fn test_augmentation_appends_named_columns_and_preserves_originals() {
    let (matrix, _) = create_separable_dataset(10, 3, 3);
    let noisy = augment_with_noise(&matrix, 2, 9).unwrap();

    assert_eq!(noisy.n_features(), 5);
    assert_eq!(noisy.n_rows(), matrix.n_rows());
    assert_feature_names(&noisy, &["f_1", "f_2", "f_3", "noise_1", "noise_2"]);
    assert_eq!(
        noisy.column_values("f_2").unwrap(),
        matrix.column_values("f_2").unwrap(),
        "original values must pass through untouched"
    );
}

#[test]
fn test_augmentation_is_seeded() {
    let (matrix, _) = create_separable_dataset(10, 2, 3);

    let a = augment_with_noise(&matrix, 3, 77).unwrap();
    let b = augment_with_noise(&matrix, 3, 77).unwrap();
    let c = augment_with_noise(&matrix, 3, 78).unwrap();

    assert_eq!(
        a.column_values("noise_1").unwrap(),
        b.column_values("noise_1").unwrap(),
        "same seed, same noise"
    );
    assert_ne!(
        a.column_values("noise_1").unwrap(),
        c.column_values("noise_1").unwrap(),
        "different seed, different noise"
    );
}
