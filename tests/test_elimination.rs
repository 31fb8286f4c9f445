//! Integration tests for recursive feature elimination with real estimators

use ablate::data::augment_with_noise;
use ablate::model::{
    CoefficientImportance, EstimatorKind, KnnClassifier, PermutationImportance,
};
use ablate::pipeline::EliminationEngine;

mod common;

use common::*;

#[test]
fn test_full_ranking_is_a_permutation() {
    let (matrix, labels) = create_separable_dataset(30, 6, 7);

    let ranking = EliminationEngine::new(CoefficientImportance::default())
        .rank(&matrix, &labels)
        .unwrap();

    assert_eq!(ranking.n_features(), 6);
    assert_rank_permutation(&ranking);
}

#[test]
fn test_single_informative_feature_survives_to_rank_one() {
    // One separating column among pure noise: whatever round it reaches,
    // shuffling it destroys accuracy while shuffling noise is free, so it
    // must be the last feature standing.
    let (matrix, labels) = create_separable_dataset(40, 1, 11);
    let noisy = augment_with_noise(&matrix, 4, 99).unwrap();

    let estimator = PermutationImportance::new(KnnClassifier::default(), 5);
    let ranking = EliminationEngine::new(estimator).rank(&noisy, &labels).unwrap();

    assert_rank_permutation(&ranking);
    assert_eq!(
        ranking.ranks()[0],
        1,
        "informative column should outlast every noise column: {:?}",
        ranking.ranks()
    );
    assert_eq!(ranking.ordered_names()[0], "f_1");
}

#[test]
fn test_coefficient_importance_agrees_on_the_survivor() {
    let (matrix, labels) = create_separable_dataset(40, 1, 13);
    let noisy = augment_with_noise(&matrix, 4, 17).unwrap();

    let ranking = EliminationEngine::new(CoefficientImportance::default())
        .rank(&noisy, &labels)
        .unwrap();

    assert_eq!(
        ranking.ordered_names()[0],
        "f_1",
        "logistic coefficients should keep the separating column longest"
    );
}

#[test]
fn test_ranking_is_deterministic_across_runs() {
    let (matrix, labels) = create_separable_dataset(25, 4, 3);
    let noisy = augment_with_noise(&matrix, 3, 8).unwrap();

    let first = EliminationEngine::new(PermutationImportance::new(KnnClassifier::default(), 21))
        .rank(&noisy, &labels)
        .unwrap();
    let second = EliminationEngine::new(PermutationImportance::new(KnnClassifier::default(), 21))
        .rank(&noisy, &labels)
        .unwrap();

    assert_eq!(first.ranks(), second.ranks());
    assert_eq!(first.ordered_names(), second.ordered_names());
}

#[test]
fn test_seeded_forest_estimator_is_reproducible() {
    let (matrix, labels) = create_separable_dataset(20, 3, 19);

    let first = EliminationEngine::new(EstimatorKind::Forest.build(42))
        .rank(&matrix, &labels)
        .unwrap();
    let second = EliminationEngine::new(EstimatorKind::Forest.build(42))
        .rank(&matrix, &labels)
        .unwrap();

    assert_eq!(first.ranks(), second.ranks());
}

#[test]
fn test_retention_mask_matches_rank_prefix() {
    let (matrix, labels) = create_separable_dataset(30, 5, 29);

    let ranking = EliminationEngine::new(CoefficientImportance::default())
        .rank(&matrix, &labels)
        .unwrap();
    let mask = ranking.retention_mask(2);

    assert_eq!(mask.len(), 5);
    assert_eq!(mask.iter().filter(|keep| **keep).count(), 2);
    for (idx, keep) in mask.iter().enumerate() {
        assert_eq!(
            *keep,
            ranking.ranks()[idx] <= 2,
            "mask at {} disagrees with rank {}",
            idx,
            ranking.ranks()[idx]
        );
    }

    // The mask must carve out exactly the two best-ranked columns.
    let reduced = matrix.select_mask(&mask).unwrap();
    let mut expected = ranking.ordered_names()[..2].to_vec();
    expected.sort();
    let mut actual = reduced.names();
    actual.sort();
    assert_eq!(actual, expected);
}

#[test]
fn test_mismatched_labels_are_rejected() {
    let (matrix, _) = create_separable_dataset(10, 3, 31);
    let (_, short_labels) = create_separable_dataset(5, 3, 31);

    let result =
        EliminationEngine::new(CoefficientImportance::default()).rank(&matrix, &short_labels);

    assert!(result.is_err(), "row/label mismatch must not rank");
}
