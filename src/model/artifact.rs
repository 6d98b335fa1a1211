//! Linear scoring artifact: per-feature weights, a fixed threshold and the feature count.
//!
//! The JSON field names (`weights`, `threshold`, `feature_count`) are read by
//! inference engines outside this crate and must not change.

use crate::features::FEATURE_COUNT;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Decision threshold written into every artifact. Not learned from the classifier.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to write artifact {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode artifact: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("weight count {weights} does not match feature_count {feature_count}")]
    LengthMismatch { weights: usize, feature_count: usize },
    #[error("threshold {0} outside [0, 1]")]
    ThresholdOutOfRange(f64),
    #[error("weight {index} is not finite ({value})")]
    NonFiniteWeight { index: usize, value: f64 },
    #[error("artifact has {found} features, extractor produces {expected}")]
    LayoutMismatch { expected: usize, found: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub weights: Vec<f64>,
    pub threshold: f64,
    pub feature_count: usize,
}

/// Outcome of [`ModelArtifact::export`]
#[derive(Debug, Clone)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub bytes: usize,
    pub sha256: String,
}

impl ModelArtifact {
    /// Wrap classifier importances, one per slot in extractor order.
    pub fn from_importances(weights: Vec<f64>) -> Result<Self, ArtifactError> {
        if let Some((index, &value)) = weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
            return Err(ArtifactError::NonFiniteWeight { index, value });
        }
        let feature_count = weights.len();
        Ok(Self {
            weights,
            threshold: DEFAULT_THRESHOLD,
            feature_count,
        })
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.weights.len() != self.feature_count {
            return Err(ArtifactError::LengthMismatch {
                weights: self.weights.len(),
                feature_count: self.feature_count,
            });
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ArtifactError::ThresholdOutOfRange(self.threshold));
        }
        Ok(())
    }

    /// Reject artifacts trained against a different vector layout
    pub fn check_layout(&self) -> Result<(), ArtifactError> {
        if self.feature_count != FEATURE_COUNT {
            return Err(ArtifactError::LayoutMismatch {
                expected: FEATURE_COUNT,
                found: self.feature_count,
            });
        }
        Ok(())
    }

    /// Pretty JSON (2-space indent) with a trailing newline
    pub fn to_json(&self) -> Result<String, ArtifactError> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    pub fn from_json(data: &str) -> Result<Self, ArtifactError> {
        let artifact: ModelArtifact = serde_json::from_str(data)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Write to `path`, creating parent directories and replacing any existing file.
    pub fn export(&self, path: &Path) -> Result<ExportReceipt, ArtifactError> {
        self.validate()?;
        let json = self.to_json()?;
        let write_err = |source: std::io::Error| ArtifactError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, json.as_bytes()).map_err(write_err)?;

        let mut h = Sha256::new();
        h.update(json.as_bytes());
        let receipt = ExportReceipt {
            path: path.to_path_buf(),
            bytes: json.len(),
            sha256: format!("{:x}", h.finalize()),
        };
        tracing::info!(
            path = %receipt.path.display(),
            bytes = receipt.bytes,
            sha256 = %receipt.sha256,
            "model artifact written"
        );
        Ok(receipt)
    }

    /// Read and validate. Length mismatches are rejected, never truncated or padded.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let data = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_importances_fixes_threshold_and_count() {
        let a = ModelArtifact::from_importances(vec![0.1, 0.4, 0.2, 0.2, 0.1]).unwrap();
        assert_eq!(a.threshold, 0.5);
        assert_eq!(a.feature_count, 5);
        assert_eq!(a.weights, vec![0.1, 0.4, 0.2, 0.2, 0.1]);
    }

    #[test]
    fn json_has_exactly_three_fields() {
        let a = ModelArtifact::from_importances(vec![0.25, 0.75]).unwrap();
        let v: serde_json::Value = serde_json::from_str(&a.to_json().unwrap()).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj["weights"].is_array());
        assert_eq!(obj["threshold"].as_f64(), Some(0.5));
        assert_eq!(obj["feature_count"].as_u64(), Some(2));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = ModelArtifact::from_json(
            r#"{"weights":[0.1,0.2,0.3],"threshold":0.5,"feature_count":5}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::LengthMismatch {
                weights: 3,
                feature_count: 5
            }
        ));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let err =
            ModelArtifact::from_json(r#"{"weights":[1.0],"threshold":1.5,"feature_count":1}"#)
                .unwrap_err();
        assert!(matches!(err, ArtifactError::ThresholdOutOfRange(_)));
    }

    #[test]
    fn rejects_missing_field() {
        let err = ModelArtifact::from_json(r#"{"weights":[1.0],"threshold":0.5}"#).unwrap_err();
        assert!(matches!(err, ArtifactError::Decode(_)));
    }

    #[test]
    fn rejects_non_finite_weights() {
        let err = ModelArtifact::from_importances(vec![0.1, f64::NAN]).unwrap_err();
        assert!(matches!(err, ArtifactError::NonFiniteWeight { index: 1, .. }));
    }

    #[test]
    fn layout_check() {
        let ok = ModelArtifact::from_importances(vec![0.2; FEATURE_COUNT]).unwrap();
        assert!(ok.check_layout().is_ok());
        let bad = ModelArtifact::from_importances(vec![0.2; 3]).unwrap();
        assert!(matches!(
            bad.check_layout(),
            Err(ArtifactError::LayoutMismatch { expected: 5, found: 3 })
        ));
    }
}
