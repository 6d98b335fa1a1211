//! Held-out evaluation: per-class precision/recall/F1, accuracy, macro and weighted averages.

use super::Classifier;
use crate::corpus::{Dataset, Label};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub benign: ClassMetrics,
    pub malicious: ClassMetrics,
    pub accuracy: f64,
    pub total: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn metrics_for(label: Label, actual: &[Label], predicted: &[Label]) -> ClassMetrics {
    let mut tp = 0;
    let mut predicted_pos = 0;
    let mut support = 0;
    for (a, p) in actual.iter().zip(predicted) {
        if *a == label {
            support += 1;
        }
        if *p == label {
            predicted_pos += 1;
            if *a == label {
                tp += 1;
            }
        }
    }
    let precision = ratio(tp, predicted_pos);
    let recall = ratio(tp, support);
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };
    ClassMetrics {
        precision,
        recall,
        f1,
        support,
    }
}

impl ClassificationReport {
    /// `None` when there is nothing to compare.
    pub fn from_predictions(actual: &[Label], predicted: &[Label]) -> Option<Self> {
        if actual.is_empty() || actual.len() != predicted.len() {
            return None;
        }
        let correct = actual.iter().zip(predicted).filter(|(a, p)| a == p).count();
        Some(Self {
            benign: metrics_for(Label::Benign, actual, predicted),
            malicious: metrics_for(Label::Malicious, actual, predicted),
            accuracy: ratio(correct, actual.len()),
            total: actual.len(),
        })
    }

    pub fn evaluate(classifier: &dyn Classifier, test: &Dataset) -> Option<Self> {
        let actual: Vec<Label> = test.samples().iter().map(|s| s.label).collect();
        let predicted: Vec<Label> = test
            .samples()
            .iter()
            .map(|s| classifier.predict(&s.features))
            .collect();
        Self::from_predictions(&actual, &predicted)
    }

    pub fn class(&self, label: Label) -> &ClassMetrics {
        match label {
            Label::Benign => &self.benign,
            Label::Malicious => &self.malicious,
        }
    }

    pub fn macro_avg(&self) -> ClassMetrics {
        let n = Label::ALL.len() as f64;
        let mut out = ClassMetrics {
            support: self.total,
            ..ClassMetrics::default()
        };
        for l in Label::ALL {
            let m = self.class(l);
            out.precision += m.precision / n;
            out.recall += m.recall / n;
            out.f1 += m.f1 / n;
        }
        out
    }

    pub fn weighted_avg(&self) -> ClassMetrics {
        let mut out = ClassMetrics {
            support: self.total,
            ..ClassMetrics::default()
        };
        for l in Label::ALL {
            let m = self.class(l);
            let w = ratio(m.support, self.total);
            out.precision += m.precision * w;
            out.recall += m.recall * w;
            out.f1 += m.f1 * w;
        }
        out
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, name: &str, m: &ClassMetrics) -> fmt::Result {
    writeln!(
        f,
        "{:>12} {:>10.2} {:>9.2} {:>9.2} {:>9}",
        name, m.precision, m.recall, m.f1, m.support
    )
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>10} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for l in Label::ALL {
            write_row(f, l.as_str(), self.class(l))?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>10} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.total
        )?;
        write_row(f, "macro avg", &self.macro_avg())?;
        write_row(f, "weighted avg", &self.weighted_avg())
    }
}
