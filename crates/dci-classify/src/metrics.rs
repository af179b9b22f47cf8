// crates/dci-classify/src/metrics.rs
//
// Evaluation of binary predictions: accuracy, confusion matrix with margins,
// and a per-class precision/recall/F1 report rendered as plain-text tables.
//
// Scores come from smartcore's metrics. Precision and recall of a class are
// the accuracy over the rows predicted as, respectively labeled as, that
// class; F1 is smartcore's one-vs-rest F-score.

use std::fmt;

use serde::{Deserialize, Serialize};
use smartcore::metrics;
use tabled::builder::Builder;
use tabled::settings::Style;

use dci_core::{DciError, Label};

/// Fraction of positions where `truth` and `predicted` agree. 0.0 if empty.
pub fn accuracy(truth: &[Label], predicted: &[Label]) -> Result<f64, DciError> {
    check_lengths(truth, predicted)?;
    if truth.is_empty() {
        return Ok(0.0);
    }
    Ok(metrics::accuracy(&truth.to_vec(), &predicted.to_vec()))
}

/// Accuracy restricted to the rows `keep` selects. 0.0 if none are selected.
fn accuracy_where(truth: &[Label], predicted: &[Label], keep: impl Fn(Label, Label) -> bool) -> f64 {
    let (t, p): (Vec<Label>, Vec<Label>) = truth
        .iter()
        .zip(predicted)
        .filter(|&(&t, &p)| keep(t, p))
        .map(|(&t, &p)| (t, p))
        .unzip();
    if t.is_empty() {
        0.0
    } else {
        metrics::accuracy(&t, &p)
    }
}

/// One-vs-rest F1 of `class`. 0.0 when precision or recall is zero.
fn f1_score(truth: &[Label], predicted: &[Label], class: Label, precision: f64, recall: f64) -> f64 {
    if precision == 0.0 || recall == 0.0 {
        return 0.0;
    }
    let t: Vec<f64> = truth.iter().map(|&l| f64::from(u8::from(l == class))).collect();
    let p: Vec<f64> = predicted.iter().map(|&l| f64::from(u8::from(l == class))).collect();
    let both_present = |v: &[f64]| v.contains(&0.0) && v.contains(&1.0);
    if both_present(&t) && both_present(&p) {
        metrics::f1(&t, &p, 1.0)
    } else {
        // Every row belongs to (or is predicted as) `class`.
        2.0 * precision * recall / (precision + recall)
    }
}

fn check_lengths(truth: &[Label], predicted: &[Label]) -> Result<(), DciError> {
    if truth.len() != predicted.len() {
        return Err(DciError::Shape(format!(
            "{} true labels vs {} predictions",
            truth.len(),
            predicted.len()
        )));
    }
    Ok(())
}

/// 2×2 confusion counts, rows = true label, columns = predicted label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Display names of label 0 and label 1.
    pub labels: [String; 2],
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn new(
        labels: [String; 2],
        truth: &[Label],
        predicted: &[Label],
    ) -> Result<Self, DciError> {
        check_lengths(truth, predicted)?;
        let mut counts = [[0usize; 2]; 2];
        for (&t, &p) in truth.iter().zip(predicted) {
            if t > 1 || p > 1 {
                return Err(DciError::InputSchema(format!(
                    "non-binary label pair ({}, {})",
                    t, p
                )));
            }
            counts[t as usize][p as usize] += 1;
        }
        Ok(Self { labels, counts })
    }

    pub fn row_total(&self, t: usize) -> usize {
        self.counts[t].iter().sum()
    }

    pub fn column_total(&self, p: usize) -> usize {
        self.counts.iter().map(|row| row[p]).sum()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

impl fmt::Display for ConfusionMatrix {
    /// Crosstab with `All` margins.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record([
            "Predicted".to_string(),
            self.labels[0].clone(),
            self.labels[1].clone(),
            "All".to_string(),
        ]);
        builder.push_record(["True".to_string(), String::new(), String::new(), String::new()]);
        for t in 0..2 {
            builder.push_record([
                self.labels[t].clone(),
                self.counts[t][0].to_string(),
                self.counts[t][1].to_string(),
                self.row_total(t).to_string(),
            ]);
        }
        builder.push_record([
            "All".to_string(),
            self.column_total(0).to_string(),
            self.column_total(1).to_string(),
            self.total().to_string(),
        ]);
        let mut table = builder.build();
        table.with(Style::blank());
        write!(f, "{}", table)
    }
}

/// Precision, recall, F1 and support for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus accuracy and macro/weighted averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

/// Weighted mean of each metric over `classes`.
fn average(label: &str, classes: &[ClassMetrics], weights: &[f64], support: usize) -> ClassMetrics {
    let norm: f64 = weights.iter().sum();
    let mean = |field: fn(&ClassMetrics) -> f64| {
        if norm == 0.0 {
            0.0
        } else {
            classes.iter().zip(weights).map(|(m, w)| field(m) * w).sum::<f64>() / norm
        }
    };
    ClassMetrics {
        label: label.to_string(),
        precision: mean(|m| m.precision),
        recall: mean(|m| m.recall),
        f1: mean(|m| m.f1),
        support,
    }
}

impl ClassificationReport {
    /// Ill-defined precision or recall (no predicted or no true members)
    /// is reported as 0.0.
    pub fn new(
        labels: [String; 2],
        truth: &[Label],
        predicted: &[Label],
    ) -> Result<Self, DciError> {
        let confusion = ConfusionMatrix::new(labels, truth, predicted)?;
        let classes: Vec<ClassMetrics> = (0..2u8)
            .map(|c| {
                let precision = accuracy_where(truth, predicted, |_, p| p == c);
                let recall = accuracy_where(truth, predicted, |t, _| t == c);
                ClassMetrics {
                    label: confusion.labels[usize::from(c)].clone(),
                    precision,
                    recall,
                    f1: f1_score(truth, predicted, c, precision, recall),
                    support: confusion.row_total(usize::from(c)),
                }
            })
            .collect();

        let total = confusion.total();
        let macro_avg = average("macro avg", &classes, &[1.0, 1.0], total);
        let supports: Vec<f64> = classes.iter().map(|m| m.support as f64).collect();
        let weighted_avg = average("weighted avg", &classes, &supports, total);

        Ok(Self {
            classes,
            accuracy: accuracy(truth, predicted)?,
            macro_avg,
            weighted_avg,
        })
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |m: &ClassMetrics| {
            [
                m.label.clone(),
                format!("{:.2}", m.precision),
                format!("{:.2}", m.recall),
                format!("{:.2}", m.f1),
                m.support.to_string(),
            ]
        };
        let blank = || [String::new(), String::new(), String::new(), String::new(), String::new()];

        let mut builder = Builder::default();
        builder.push_record([
            String::new(),
            "precision".to_string(),
            "recall".to_string(),
            "f1-score".to_string(),
            "support".to_string(),
        ]);
        builder.push_record(blank());
        for m in &self.classes {
            builder.push_record(row(m));
        }
        builder.push_record(blank());
        builder.push_record([
            "accuracy".to_string(),
            String::new(),
            String::new(),
            format!("{:.2}", self.accuracy),
            self.macro_avg.support.to_string(),
        ]);
        builder.push_record(row(&self.macro_avg));
        builder.push_record(row(&self.weighted_avg));

        let mut table = builder.build();
        table.with(Style::blank());
        write!(f, "{}", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> [String; 2] {
        ["negative".to_string(), "positive".to_string()]
    }

    #[test]
    fn accuracy_counts_agreements() {
        assert_eq!(accuracy(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap(), 0.75);
        assert_eq!(accuracy(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn accuracy_rejects_length_mismatch() {
        assert!(matches!(accuracy(&[0, 1, 1], &[0, 1]), Err(DciError::Shape(_))));
    }

    #[test]
    fn confusion_counts_and_margins() {
        let cm = ConfusionMatrix::new(labels(), &[0, 0, 1, 1, 1], &[0, 1, 1, 1, 0]).unwrap();
        assert_eq!(cm.counts, [[1, 1], [1, 2]]);
        assert_eq!(cm.row_total(1), 3);
        assert_eq!(cm.column_total(1), 3);
        assert_eq!(cm.total(), 5);

        let text = cm.to_string();
        assert!(text.contains("Predicted"));
        assert!(text.contains("All"));
        assert!(text.contains("positive"));
    }

    #[test]
    fn length_mismatch_rejected() {
        assert!(matches!(
            ConfusionMatrix::new(labels(), &[0, 1], &[0]),
            Err(DciError::Shape(_))
        ));
    }

    #[test]
    fn report_metrics() {
        // truth:     0 0 0 0 1 1 1 1
        // predicted: 0 0 0 1 1 1 1 1
        let r = ClassificationReport::new(labels(), &[0, 0, 0, 0, 1, 1, 1, 1], &[0, 0, 0, 1, 1, 1, 1, 1])
            .unwrap();
        let neg = &r.classes[0];
        let pos = &r.classes[1];
        assert_eq!(neg.precision, 1.0);
        assert_eq!(neg.recall, 0.75);
        assert_eq!(pos.precision, 0.8);
        assert_eq!(pos.recall, 1.0);
        assert!((neg.f1 - 6.0 / 7.0).abs() < 1e-12);
        assert!((pos.f1 - 8.0 / 9.0).abs() < 1e-12);
        assert_eq!(neg.support, 4);
        assert_eq!(r.accuracy, 0.875);
        assert!((r.macro_avg.precision - 0.9).abs() < 1e-12);
        assert!((r.weighted_avg.recall - 0.875).abs() < 1e-12);
        assert_eq!(r.macro_avg.support, 8);
    }

    #[test]
    fn class_never_predicted_scores_zero() {
        let r = ClassificationReport::new(labels(), &[0, 1, 1], &[1, 1, 1]).unwrap();
        assert_eq!(r.classes[0].precision, 0.0);
        assert_eq!(r.classes[0].f1, 0.0);
        // Every row predicted positive: F1 falls back to the harmonic mean.
        assert!((r.classes[1].precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((r.classes[1].f1 - 0.8).abs() < 1e-12);
    }

    #[test]
    fn report_renders_all_rows() {
        let r = ClassificationReport::new(labels(), &[0, 1], &[0, 1]).unwrap();
        let text = r.to_string();
        for needle in ["precision", "f1-score", "accuracy", "macro avg", "weighted avg", "1.00"] {
            assert!(text.contains(needle), "missing {}", needle);
        }
    }

    #[test]
    fn report_serializes() {
        let r = ClassificationReport::new(labels(), &[0, 1], &[1, 1]).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("weighted_avg"));
    }
}
