//! Univariate statistics relating a single feature to discrete labels
//!
//! These are the black-box scoring primitives behind the univariate
//! relevance scorers: one-way ANOVA F, chi-squared on non-negative feature
//! mass, and histogram mutual information. Each returns a statistic where
//! higher means more label-associated; F and chi-squared also return the
//! matching p-value from the reference distribution.

use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor};

/// Sums of squares below this are treated as zero variance.
const VARIANCE_FLOOR: f64 = 1e-12;

/// Equal-width bin count used when discretizing a feature for mutual
/// information.
pub const DEFAULT_MI_BINS: usize = 16;

// ==================== One-way ANOVA F ====================

/// One-way ANOVA F statistic and p-value for one feature column.
///
/// `classes` must be the sorted distinct values of `labels`. A feature
/// with zero within-class variance but real between-class separation gets
/// an infinite statistic (p = 0); a constant feature gets zero (p = 1).
pub fn anova_f(column: &[f64], labels: &[i64], classes: &[i64]) -> (f64, f64) {
    let n = column.len();
    let k = classes.len();
    if n == 0 || k < 2 {
        return (0.0, 1.0);
    }

    let grand_mean = column.iter().sum::<f64>() / n as f64;
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for class in classes {
        let group: Vec<f64> = column
            .iter()
            .zip(labels.iter())
            .filter(|(_, l)| *l == class)
            .map(|(v, _)| *v)
            .collect();
        if group.is_empty() {
            continue;
        }
        let mean = group.iter().sum::<f64>() / group.len() as f64;
        ss_between += group.len() as f64 * (mean - grand_mean).powi(2);
        ss_within += group.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    }

    let df_between = (k - 1) as f64;
    let df_within = n as f64 - k as f64;
    if df_within < 1.0 || ss_within < VARIANCE_FLOOR {
        return if ss_between > VARIANCE_FLOOR {
            (f64::INFINITY, 0.0)
        } else {
            (0.0, 1.0)
        };
    }

    let statistic = (ss_between / df_between) / (ss_within / df_within);
    let p_value = match FisherSnedecor::new(df_between, df_within) {
        Ok(dist) => 1.0 - dist.cdf(statistic),
        Err(_) => 1.0,
    };
    (statistic, p_value)
}

// ==================== Chi-squared ====================

/// Chi-squared statistic and p-value for one non-negative feature column.
///
/// Observed values are the per-class sums of the feature; expected values
/// distribute the total feature mass by class frequency. The caller must
/// ensure the column is non-negative.
pub fn chi_square(column: &[f64], labels: &[i64], classes: &[i64]) -> (f64, f64) {
    let n = column.len();
    let k = classes.len();
    if n == 0 || k < 2 {
        return (0.0, 1.0);
    }
    let total: f64 = column.iter().sum();
    if total <= 0.0 {
        return (0.0, 1.0);
    }

    let mut statistic = 0.0;
    for class in classes {
        let count = labels.iter().filter(|l| *l == class).count();
        let observed: f64 = column
            .iter()
            .zip(labels.iter())
            .filter(|(_, l)| *l == class)
            .map(|(v, _)| *v)
            .sum();
        let expected = total * count as f64 / n as f64;
        if expected > 0.0 {
            statistic += (observed - expected).powi(2) / expected;
        }
    }

    let p_value = match ChiSquared::new((k - 1) as f64) {
        Ok(dist) => 1.0 - dist.cdf(statistic),
        Err(_) => 1.0,
    };
    (statistic, p_value)
}

// ==================== Mutual information ====================

/// Histogram mutual information (in nats) between an equal-width-binned
/// feature and the discrete labels. Constant columns carry no information
/// and score zero.
pub fn mutual_information(column: &[f64], labels: &[i64], classes: &[i64], bins: usize) -> f64 {
    let n = column.len();
    let k = classes.len();
    if n == 0 || k < 2 || bins == 0 {
        return 0.0;
    }

    let min = column.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = column.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !(max > min) {
        return 0.0;
    }
    let width = (max - min) / bins as f64;

    let mut joint = vec![0usize; bins * k];
    let mut bin_totals = vec![0usize; bins];
    let mut class_totals = vec![0usize; k];
    for (value, label) in column.iter().zip(labels.iter()) {
        let b = (((value - min) / width) as usize).min(bins - 1);
        let c = match classes.binary_search(label) {
            Ok(c) => c,
            Err(_) => continue,
        };
        joint[b * k + c] += 1;
        bin_totals[b] += 1;
        class_totals[c] += 1;
    }

    let n = n as f64;
    let mut mi = 0.0;
    for b in 0..bins {
        for c in 0..k {
            let n_bc = joint[b * k + c];
            if n_bc == 0 {
                continue;
            }
            let joint_p = n_bc as f64 / n;
            let ratio = (n_bc as f64 * n) / (bin_totals[b] as f64 * class_totals[c] as f64);
            mi += joint_p * ratio.ln();
        }
    }
    mi.max(0.0)
}
