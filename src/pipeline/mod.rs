//! Pipeline module - scoring, ranking, selection, and evaluation stages

pub mod curve;
pub mod elimination;
pub mod evaluate;
pub mod folds;
pub mod pca;
pub mod relevance;
pub mod selectors;
pub mod stats;
pub mod threshold;

pub use curve::*;
pub use elimination::*;
pub use evaluate::*;
pub use folds::*;
pub use pca::*;
pub use relevance::*;
pub use selectors::*;
pub use stats::*;
pub use threshold::*;
