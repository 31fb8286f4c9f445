//! Synthetic noise-column augmentation
//!
//! Appends label-independent uniform random columns to a feature matrix so
//! selection strategies can be stress-tested on features that carry no
//! signal at all.

use crate::data::frame::FeatureMatrix;
use crate::error::Result;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Append `columns` uniform random columns named `noise_1..noise_k`.
///
/// The generator is seeded, so the same seed always produces the same
/// noise values.
pub fn augment_with_noise(
    matrix: &FeatureMatrix,
    columns: usize,
    seed: u64,
) -> Result<FeatureMatrix> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n_rows = matrix.n_rows();
    let mut df = matrix.frame().clone();
    for j in 0..columns {
        let values: Vec<f64> = (0..n_rows).map(|_| rng.gen::<f64>()).collect();
        let col = Column::new(format!("noise_{}", j + 1).into(), values);
        df.hstack_mut(&[col])?;
    }
    FeatureMatrix::new(df)
}
