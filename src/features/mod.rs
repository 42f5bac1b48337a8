//! Win/loss history features for the external classifier
//!
//! Turns recent results into fixed-width binary vectors and assembles
//! them into an exportable training set.

pub mod dataset;
pub mod window;

pub use dataset::{DatasetConfig, TrainingSet};
pub use window::{history_window, require_history_window};
