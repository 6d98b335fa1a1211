//! Trainer configuration. Corpus roots, split/forest parameters and the artifact path.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Labeled corpus roots
    pub corpus: CorpusConfig,
    /// Split and classifier parameters
    pub training: TrainingConfig,
    /// Where the exported artifact is written (overwritten on every run)
    pub model_path: PathBuf,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Every file under this root is labeled benign
    pub benign_dir: PathBuf,
    /// Every file under this root is labeled malicious
    pub malicious_dir: PathBuf,
    /// Only files with this extension (no leading dot) are collected
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Share of samples held out for evaluation (0.0–1.0)
    pub test_fraction: f64,
    /// Seed for the split shuffle and bootstrap sampling
    pub seed: u64,
    pub n_estimators: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig::default(),
            training: TrainingConfig::default(),
            model_path: PathBuf::from("data/models/rf_model.bin"),
            log: LogConfig::default(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            benign_dir: PathBuf::from("training_data/normal"),
            malicious_dir: PathBuf::from("training_data/webshell"),
            extension: "php".to_string(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            n_estimators: 100,
            max_depth: 10,
            min_samples_split: 2,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl TrainerConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<TrainerConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
