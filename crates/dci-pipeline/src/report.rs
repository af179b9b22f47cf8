// crates/dci-pipeline/src/report.rs
//
// Run artifacts: predictions.csv and report.txt.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use dci_classify::{ClassificationReport, ConfusionMatrix};
use dci_core::{DciError, Label};

use crate::corpus::LabelSet;

/// Wall-clock seconds per stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimings {
    pub pivot_selection: f64,
    pub dci: f64,
    pub classifier: f64,
    pub test: f64,
}

/// One predicted label string per line, in target document order.
pub fn write_predictions(
    path: impl AsRef<Path>,
    predictions: &[Label],
    labels: &LabelSet,
) -> Result<(), DciError> {
    let mut out = String::with_capacity(predictions.len() * 8);
    for &p in predictions {
        out.push_str(labels.name(p));
        out.push('\n');
    }
    fs::write(path.as_ref(), out)?;
    Ok(())
}

/// Render the report: stage timings, confusion matrix, classification report.
pub fn render_report(
    timings: &StageTimings,
    confusion: &ConfusionMatrix,
    classification: &ClassificationReport,
) -> String {
    format!(
        "pivot selection time = {:.5} secs\n\
         dci time = {:.5} secs\n\
         classifier time = {:.5} secs\n\
         test time = {:.5} secs\n\
         \n\
         {}\n\
         \n\
         {}\n",
        timings.pivot_selection, timings.dci, timings.classifier, timings.test, confusion, classification
    )
}

pub fn write_report(
    path: impl AsRef<Path>,
    timings: &StageTimings,
    confusion: &ConfusionMatrix,
    classification: &ClassificationReport,
) -> Result<(), DciError> {
    fs::write(path.as_ref(), render_report(timings, confusion, classification))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn labels() -> LabelSet {
        LabelSet::from_labels(&["neg".to_string(), "pos".to_string()]).unwrap()
    }

    #[test]
    fn report_layout() {
        let timings = StageTimings {
            pivot_selection: 0.5,
            dci: 1.25,
            classifier: 0.0,
            test: 0.000004,
        };
        let names = labels().names().clone();
        let cm = ConfusionMatrix::new(names.clone(), &[0, 1], &[0, 1]).unwrap();
        let cr = ClassificationReport::new(names, &[0, 1], &[0, 1]).unwrap();
        let text = render_report(&timings, &cm, &cr);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "pivot selection time = 0.50000 secs");
        assert_eq!(lines[1], "dci time = 1.25000 secs");
        assert_eq!(lines[2], "classifier time = 0.00000 secs");
        assert_eq!(lines[3], "test time = 0.00000 secs");
        assert_eq!(lines[4], "");
        assert!(text.contains("Predicted"));
        assert!(text.contains("weighted avg"));
    }

    #[test]
    fn predictions_are_label_strings() {
        let path = std::env::temp_dir().join(format!("dci_predictions_{}.csv", Uuid::now_v7()));
        write_predictions(&path, &[1, 0, 1], &labels()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "pos\nneg\npos\n");
        fs::remove_file(path).ok();
    }
}
