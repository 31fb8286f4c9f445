//! Report module - result tables and exports

pub mod ledger;

pub use ledger::*;
