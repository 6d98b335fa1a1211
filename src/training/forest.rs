//! Bagged CART ensemble. Importances are the mean of per-tree normalized
//! impurity decreases, renormalized to sum 1.

use super::tree::{DecisionTree, TreeParams};
use super::{Classifier, TrainError};
use crate::config::TrainingConfig;
use crate::corpus::{Dataset, Label};
use crate::features::FeatureVector;
use ndarray::ArrayView1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct RandomForest {
    config: TrainingConfig,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
        }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Mean malicious probability across trees
    pub fn predict_proba(&self, features: &FeatureVector) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let row = features.to_f64();
        let view = ArrayView1::from(&row[..]);
        let sum: f64 = self.trees.iter().map(|t| t.predict_proba(view)).sum();
        sum / self.trees.len() as f64
    }

    fn max_features(n_features: usize) -> usize {
        ((n_features as f64).sqrt().floor() as usize).max(1)
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, data: &Dataset) -> Result<Vec<f64>, TrainError> {
        if data.is_empty() {
            return Err(TrainError::EmptyTrainingSet);
        }
        if self.config.n_estimators == 0 {
            return Err(TrainError::InvalidParameter(
                "n_estimators must be at least 1".to_string(),
            ));
        }

        let (x, y) = data.to_arrays();
        let n = x.nrows();
        let params = TreeParams {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            max_features: Self::max_features(x.ncols()),
        };
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        self.trees = (0..self.config.n_estimators)
            .map(|_| {
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::fit(x.view(), y.view(), bootstrap, params, &mut rng)
            })
            .collect();

        let mut importances = vec![0.0; x.ncols()];
        for tree in &self.trees {
            for (acc, v) in importances.iter_mut().zip(tree.importances()) {
                *acc += v;
            }
        }
        let sum: f64 = importances.iter().sum();
        if sum > 0.0 {
            importances.iter_mut().for_each(|v| *v /= sum);
        }

        tracing::debug!(
            trees = self.trees.len(),
            max_depth = self.trees.iter().map(|t| t.depth()).max().unwrap_or(0),
            "forest fitted"
        );
        Ok(importances)
    }

    fn predict(&self, features: &FeatureVector) -> Label {
        if self.predict_proba(features) > 0.5 {
            Label::Malicious
        } else {
            Label::Benign
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::LabeledSample;
    use crate::features::FeatureExtractor;
    use std::path::PathBuf;

    fn sample(content: &str, label: Label) -> LabeledSample {
        LabeledSample {
            features: FeatureExtractor::new().extract(content),
            label,
            path: PathBuf::from("mem"),
        }
    }

    fn corpus() -> Dataset {
        let mut d = Dataset::default();
        for i in 0..10 {
            d.push(sample(&format!("<?php echo 'page {}'; ?>", i), Label::Benign));
            d.push(sample(
                &format!("<?php eval($_POST['{}']); ?>", i),
                Label::Malicious,
            ));
        }
        d
    }

    fn config() -> TrainingConfig {
        TrainingConfig {
            n_estimators: 10,
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn importances_cover_every_slot_and_sum_to_one() {
        let mut rf = RandomForest::new(config());
        let imp = rf.fit(&corpus()).unwrap();
        assert_eq!(imp.len(), 5);
        assert!(imp.iter().all(|v| *v >= 0.0));
        assert!((imp.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert_eq!(rf.n_trees(), 10);
    }

    #[test]
    fn separates_obvious_samples() {
        let mut rf = RandomForest::new(config());
        rf.fit(&corpus()).unwrap();
        let ex = FeatureExtractor::new();
        assert_eq!(rf.predict(&ex.extract("<?php eval($_POST['z']); ?>")), Label::Malicious);
        assert_eq!(rf.predict(&ex.extract("<?php echo 'hi'; ?>")), Label::Benign);
    }

    #[test]
    fn same_seed_same_importances() {
        let a = RandomForest::new(config()).fit(&corpus()).unwrap();
        let b = RandomForest::new(config()).fit(&corpus()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = RandomForest::new(config()).fit(&Dataset::default()).unwrap_err();
        assert!(matches!(err, TrainError::EmptyTrainingSet));
    }
}
