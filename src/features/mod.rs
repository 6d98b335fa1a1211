//! Heuristic feature extraction from source text: content → fixed 5-slot count vector.

mod extractor;
mod rules;

pub use extractor::{FeatureError, FeatureExtractor};
pub use rules::{count_occurrences, FeatureRule, Measure, FEATURE_RULES};

use serde::{Deserialize, Serialize};

/// Number of slots in every [`FeatureVector`]. Artifacts must carry the same count.
pub const FEATURE_COUNT: usize = 5;

/// Fixed-size count vector. Slot order follows [`FEATURE_RULES`] and is part of
/// the artifact contract: slots may be appended, never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [u64; FEATURE_COUNT],
}

impl FeatureVector {
    pub(crate) fn from_counts(values: [u64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[u64; FEATURE_COUNT] {
        &self.values
    }

    pub fn get(&self, slot: usize) -> Option<u64> {
        self.values.get(slot).copied()
    }

    /// Values widened to f64 for training matrices and scoring
    pub fn to_f64(&self) -> [f64; FEATURE_COUNT] {
        self.values.map(|v| v as f64)
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Human-readable slot names, in slot order, for reports
pub fn feature_names() -> impl Iterator<Item = &'static str> {
    FEATURE_RULES.iter().map(|r| r.display_name)
}
