//! Dot-product scoring against a loaded artifact: malicious iff score >= threshold.

use super::{ArtifactError, ModelArtifact};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Benign,
    Malicious,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub verdict: Verdict,
}

pub struct Scorer {
    weights: Vec<f64>,
    threshold: f64,
}

impl Scorer {
    /// Validates the artifact and that it matches the extractor layout.
    pub fn new(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        artifact.validate()?;
        artifact.check_layout()?;
        Ok(Self {
            weights: artifact.weights,
            threshold: artifact.threshold,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `Σ weight[i] * feature[i]`, unclamped
    pub fn score(&self, features: &FeatureVector) -> f64 {
        self.weights
            .iter()
            .zip(features.to_f64())
            .map(|(w, f)| w * f)
            .sum()
    }

    pub fn classify(&self, features: &FeatureVector) -> ScoreResult {
        let score = self.score(features);
        let verdict = if score >= self.threshold {
            Verdict::Malicious
        } else {
            Verdict::Benign
        };
        ScoreResult { score, verdict }
    }
}
