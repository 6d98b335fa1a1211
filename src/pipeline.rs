//! Batch run: collect corpus → halt if empty → split → fit → evaluate → export.

use crate::config::TrainerConfig;
use crate::corpus::{CorpusCollector, CorpusError, Label};
use crate::model::{ArtifactError, ExportReceipt, ModelArtifact};
use crate::training::{train_test_split, ClassificationReport, Classifier, TrainError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error("training failed: {0}")]
    Train(#[from] TrainError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub benign_samples: usize,
    pub malicious_samples: usize,
    pub train_size: usize,
    pub test_size: usize,
    /// `None` when the split left nothing to evaluate on
    pub report: Option<ClassificationReport>,
    pub artifact: ModelArtifact,
    pub receipt: ExportReceipt,
}

pub fn run(
    config: &TrainerConfig,
    classifier: &mut dyn Classifier,
) -> Result<RunSummary, PipelineError> {
    tracing::info!("collecting samples");
    let dataset = CorpusCollector::new(&config.corpus).collect()?;
    let benign_samples = dataset.count_label(Label::Benign);
    let malicious_samples = dataset.count_label(Label::Malicious);

    let (train, test) = train_test_split(
        &dataset,
        config.training.test_fraction,
        config.training.seed,
    )?;
    tracing::info!(
        train = train.len(),
        test = test.len(),
        benign = benign_samples,
        malicious = malicious_samples,
        "training model"
    );
    let importances = classifier.fit(&train)?;

    let report = ClassificationReport::evaluate(&*classifier, &test);
    if report.is_none() {
        tracing::warn!("no held-out samples; evaluation skipped");
    }

    let artifact = ModelArtifact::from_importances(importances)?;
    let receipt = artifact.export(&config.model_path)?;

    Ok(RunSummary {
        benign_samples,
        malicious_samples,
        train_size: train.len(),
        test_size: test.len(),
        report,
        artifact,
        receipt,
    })
}
