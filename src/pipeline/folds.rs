//! Deterministic k-fold partitioning of row indices

use crate::error::{AblateError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Train/test row indices for one fold.
#[derive(Debug, Clone)]
pub struct FoldIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Seeded k-way splitter. The same seed and row count always produce the
/// same partition, so scores computed over it are comparable across calls.
#[derive(Debug, Clone, Copy)]
pub struct KFold {
    folds: usize,
    seed: u64,
}

impl KFold {
    pub fn new(folds: usize, seed: u64) -> Self {
        Self { folds, seed }
    }

    /// Partition `0..n_rows` into `folds` shuffled, near-equal folds.
    ///
    /// The remainder rows are spread one each over the first folds, so fold
    /// sizes never differ by more than one.
    pub fn split(&self, n_rows: usize) -> Result<Vec<FoldIndices>> {
        if self.folds < 2 || self.folds > n_rows {
            return Err(AblateError::InsufficientData {
                rows: n_rows,
                folds: self.folds,
            });
        }

        let mut indices: Vec<usize> = (0..n_rows).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let base = n_rows / self.folds;
        let extra = n_rows % self.folds;

        let mut splits = Vec::with_capacity(self.folds);
        let mut start = 0;
        for f in 0..self.folds {
            let size = base + usize::from(f < extra);
            let test = indices[start..start + size].to_vec();
            let mut train = Vec::with_capacity(n_rows - size);
            train.extend_from_slice(&indices[..start]);
            train.extend_from_slice(&indices[start + size..]);
            splits.push(FoldIndices { train, test });
            start += size;
        }
        Ok(splits)
    }
}
