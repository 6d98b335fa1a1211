//! Classifier training behind a swappable trait; the forest is the bundled learner.

mod forest;
mod report;
mod split;
mod tree;

pub use forest::RandomForest;
pub use report::{ClassMetrics, ClassificationReport};
pub use split::train_test_split;

use crate::corpus::{Dataset, Label};
use crate::features::FeatureVector;

#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error("training set is empty")]
    EmptyTrainingSet,
    #[error("invalid training parameter: {0}")]
    InvalidParameter(String),
}

/// Any learner that yields one non-negative importance per feature slot.
pub trait Classifier {
    /// Fit on labeled vectors; returns importances in slot order.
    fn fit(&mut self, data: &Dataset) -> Result<Vec<f64>, TrainError>;

    fn predict(&self, features: &FeatureVector) -> Label;
}
