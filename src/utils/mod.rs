//! Utility module - progress and terminal styling helpers

pub mod progress;
pub mod styling;

pub use progress::*;
pub use styling::*;
