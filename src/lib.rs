//! Webshell trainer — feature extraction and linear model export for webshell detection.
//!
//! Modular structure:
//! - [`features`] — Fixed 5-slot substring-count feature vector
//! - [`corpus`] — Benign/malicious corpus walking and labeled datasets
//! - [`training`] — Classifier trait, random forest, split and evaluation
//! - [`model`] — Weight/threshold artifact export, loading and scoring
//! - [`pipeline`] — End-to-end batch run
//! - [`logging`] — Structured logging

pub mod config;
pub mod corpus;
pub mod features;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod training;

pub use config::TrainerConfig;
pub use corpus::{CorpusCollector, Dataset, Label, LabeledSample};
pub use features::{FeatureExtractor, FeatureVector, FEATURE_COUNT};
pub use logging::StructuredLogger;
pub use model::{ModelArtifact, Scorer};
pub use training::{Classifier, RandomForest};
