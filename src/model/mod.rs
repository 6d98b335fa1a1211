//! Exported linear model: artifact codec and the dot-product scorer it implies.

mod artifact;
mod scorer;

pub use artifact::{ArtifactError, ExportReceipt, ModelArtifact, DEFAULT_THRESHOLD};
pub use scorer::{ScoreResult, Scorer, Verdict};
