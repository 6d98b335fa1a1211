//! Walks the benign and malicious roots and extracts every matching file.

use super::{CorpusError, Dataset, Label, LabeledSample};
use crate::config::CorpusConfig;
use crate::features::FeatureExtractor;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct CorpusCollector {
    benign_dir: PathBuf,
    malicious_dir: PathBuf,
    extension: String,
    extractor: FeatureExtractor,
}

impl CorpusCollector {
    pub fn new(config: &CorpusConfig) -> Self {
        Self {
            benign_dir: config.benign_dir.clone(),
            malicious_dir: config.malicious_dir.clone(),
            extension: config.extension.clone(),
            extractor: FeatureExtractor::new(),
        }
    }

    /// Suffix match on the raw file name, so `.php` itself and non-UTF-8 names qualify.
    fn matches_extension(&self, file_name: &OsStr) -> bool {
        let suffix = format!(".{}", self.extension);
        file_name.as_encoded_bytes().ends_with(suffix.as_bytes())
    }

    /// Extract every matching file under `root`, labeled `label`.
    /// Unreadable files and walk errors are logged and skipped.
    pub fn collect_root(&self, root: &Path, label: Label, out: &mut Dataset) -> usize {
        let before = out.len();
        let mut skipped = 0usize;
        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(root = %root.display(), error = %e, "walk error; skipping entry");
                    continue;
                }
            };
            // Symlinks are not followed but still read, so a dangling link is a read failure.
            if entry.file_type().is_dir() || !self.matches_extension(entry.file_name()) {
                continue;
            }
            match self.extractor.extract_file(entry.path()) {
                Ok(features) => out.push(LabeledSample {
                    features,
                    label,
                    path: entry.path().to_path_buf(),
                }),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(error = %e, "skipping unreadable file");
                }
            }
        }
        let added = out.len() - before;
        tracing::info!(
            root = %root.display(),
            label = label.as_str(),
            samples = added,
            skipped,
            "collected corpus root"
        );
        added
    }

    /// Collect both roots. An empty combined set is an error, not an empty dataset.
    pub fn collect(&self) -> Result<Dataset, CorpusError> {
        let mut dataset = Dataset::default();
        self.collect_root(&self.benign_dir, Label::Benign, &mut dataset);
        self.collect_root(&self.malicious_dir, Label::Malicious, &mut dataset);
        if dataset.is_empty() {
            return Err(CorpusError::NoSamples);
        }
        Ok(dataset)
    }
}
