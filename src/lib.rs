//! Ablate: feature ranking and recursive-elimination evaluation
//!
//! A library for comparing feature selection strategies on labeled
//! datasets: univariate relevance tests, model-based importances,
//! recursive feature elimination, and principal component baselines,
//! all scored by seeded k-fold cross-validation.

pub mod cli;
pub mod data;
pub mod error;
pub mod harness;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod utils;
