//! Data model - matrices, labels, loading and noise augmentation

pub mod frame;
pub mod loader;
pub mod noise;

pub use frame::{FeatureMatrix, LabelVector};
pub use loader::{load_dataset, prepare_dataset, PreparedDataset};
pub use noise::augment_with_noise;
