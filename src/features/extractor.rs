//! Extraction pipeline: file bytes → lossy text → rule table → vector.

use super::{FeatureRule, FeatureVector, FEATURE_COUNT, FEATURE_RULES};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct FeatureExtractor {
    rules: &'static [FeatureRule; FEATURE_COUNT],
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self {
            rules: &FEATURE_RULES,
        }
    }

    /// Reduce already-decoded content to a vector
    pub fn extract(&self, content: &str) -> FeatureVector {
        let mut values = [0u64; FEATURE_COUNT];
        for rule in self.rules.iter() {
            values[rule.slot] = rule.measure(content);
        }
        FeatureVector::from_counts(values)
    }

    /// Raw bytes are decoded permissively; invalid UTF-8 becomes U+FFFD.
    pub fn extract_bytes(&self, bytes: &[u8]) -> FeatureVector {
        self.extract(&String::from_utf8_lossy(bytes))
    }

    /// Read and extract one file. A read failure yields no vector.
    pub fn extract_file(&self, path: &Path) -> Result<FeatureVector, FeatureError> {
        let bytes = std::fs::read(path).map_err(|source| FeatureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.extract_bytes(&bytes))
    }
}
