//! Labeled corpus: two directory trees, the tree a file lives under is its label.

mod collector;

pub use collector::CorpusCollector;

use crate::features::{FeatureVector, FEATURE_COUNT};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Benign,
    Malicious,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Benign, Label::Malicious];

    /// Numeric class id: 0 = benign, 1 = malicious
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Benign => 0,
            Label::Malicious => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Label::Benign),
            1 => Some(Label::Malicious),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Benign => "benign",
            Label::Malicious => "malicious",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub label: Label,
    /// Source file, kept for diagnostics only
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("no samples found")]
    NoSamples,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    samples: Vec<LabeledSample>,
}

impl Dataset {
    pub fn new(samples: Vec<LabeledSample>) -> Self {
        Self { samples }
    }

    pub fn push(&mut self, sample: LabeledSample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[LabeledSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn count_label(&self, label: Label) -> usize {
        self.samples.iter().filter(|s| s.label == label).count()
    }

    /// Subset by sample index, in the given order
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            samples: indices.iter().map(|&i| self.samples[i].clone()).collect(),
        }
    }

    /// Row-major feature matrix `[n_samples, FEATURE_COUNT]` and class ids
    pub fn to_arrays(&self) -> (Array2<f64>, Array1<u8>) {
        let mut x = Array2::<f64>::zeros((self.samples.len(), FEATURE_COUNT));
        let mut y = Array1::<u8>::zeros(self.samples.len());
        for (i, s) in self.samples.iter().enumerate() {
            for (j, v) in s.features.to_f64().iter().enumerate() {
                x[[i, j]] = *v;
            }
            y[i] = s.label.as_u8();
        }
        (x, y)
    }
}
