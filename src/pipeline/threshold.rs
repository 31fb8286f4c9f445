//! Cutoff policies over per-feature relevance values

use crate::error::{AblateError, Result};

/// Policy deciding which features pass, given their relevance values.
///
/// Boundary ties under `TopK` and `TopPercentile` resolve toward ascending
/// index. The `Above*` policies use a strict greater-than, so an all-equal
/// score vector selects nothing and lands on the fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdPolicy {
    /// Retain the k features with highest relevance
    TopK(usize),
    /// Retain the ceil(p% of N) features with highest relevance
    TopPercentile(f64),
    /// Retain features strictly above the mean relevance
    AboveMean,
    /// Retain features strictly above half the mean relevance
    AboveHalfMean,
    /// Retain features strictly above the median relevance
    AboveMedian,
}

impl std::fmt::Display for ThresholdPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThresholdPolicy::TopK(k) => write!(f, "top_k({})", k),
            ThresholdPolicy::TopPercentile(p) => write!(f, "top_percentile({}%)", p),
            ThresholdPolicy::AboveMean => write!(f, "above_mean"),
            ThresholdPolicy::AboveHalfMean => write!(f, "above_half_mean"),
            ThresholdPolicy::AboveMedian => write!(f, "above_median"),
        }
    }
}

impl ThresholdPolicy {
    /// Retention mask over the relevance values.
    ///
    /// Never empty for non-empty input: a policy that would retain zero
    /// features falls back to the single highest-relevance feature
    /// (lowest index on ties), because downstream classifiers cannot
    /// train on an empty matrix.
    pub fn select(&self, relevance: &[f64]) -> Vec<bool> {
        match self.try_select(relevance) {
            Ok(mask) => mask,
            Err(_) => fallback_single_best(relevance),
        }
    }

    fn try_select(&self, relevance: &[f64]) -> Result<Vec<bool>> {
        let n = relevance.len();
        let mask = match self {
            ThresholdPolicy::TopK(k) => top_k_mask(relevance, *k),
            ThresholdPolicy::TopPercentile(p) => {
                let k = ((p / 100.0) * n as f64).ceil() as usize;
                top_k_mask(relevance, k)
            }
            ThresholdPolicy::AboveMean => {
                let mean = mean(relevance);
                relevance.iter().map(|v| *v > mean).collect()
            }
            ThresholdPolicy::AboveHalfMean => {
                let threshold = mean(relevance) / 2.0;
                relevance.iter().map(|v| *v > threshold).collect()
            }
            ThresholdPolicy::AboveMedian => {
                let threshold = median(relevance);
                relevance.iter().map(|v| *v > threshold).collect()
            }
        };
        if !mask.is_empty() && !mask.iter().any(|kept| *kept) {
            return Err(AblateError::EmptySelection {
                policy: self.to_string(),
            });
        }
        Ok(mask)
    }
}

/// Indices sorted by descending relevance, ties by ascending index.
fn ranked_indices(relevance: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..relevance.len()).collect();
    indices.sort_by(|&a, &b| {
        relevance[b]
            .partial_cmp(&relevance[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    indices
}

fn top_k_mask(relevance: &[f64], k: usize) -> Vec<bool> {
    let n = relevance.len();
    let keep = k.min(n);
    let mut mask = vec![false; n];
    for &idx in ranked_indices(relevance).iter().take(keep) {
        mask[idx] = true;
    }
    mask
}

fn fallback_single_best(relevance: &[f64]) -> Vec<bool> {
    let mut mask = vec![false; relevance.len()];
    if let Some(&best) = ranked_indices(relevance).first() {
        mask[best] = true;
    }
    mask
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
