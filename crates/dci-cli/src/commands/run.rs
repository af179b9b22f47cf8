// crates/dci-cli/src/commands/run.rs
//
// `dci full | nodict | nounlabeled` — one cross-domain run.

use std::fs;

use dci_core::ProgressReporter;
use dci_pipeline::{run_cross, RunKind, RunParams};

use crate::output::{render_outcome, OutputFormat};
use crate::status::FileStatusReporter;

/// Run the pipeline for the given run shape.
///
/// A fatal error is reported as progress 100 with the error text before it
/// is returned, so pollers of the status file see the run end.
pub fn run(
    kind: RunKind,
    params: &RunParams,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(&params.output_dir)?;
    let reporter =
        FileStatusReporter::in_dir(&params.output_dir).with_quiet(format == OutputFormat::Json);

    match run_cross(kind, params, &reporter) {
        Ok(outcome) => {
            println!("{}", render_outcome(&outcome, format));
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            reporter.report(100, Some(&format!("Error: {}", e)));
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn failed_run_ends_status_at_100_and_returns_error() {
        let dir = std::env::temp_dir().join(format!("dci_failed_run_{}", Uuid::now_v7()));
        let mut params = RunParams::new(dir.join("missing_train.csv"), dir.join("missing_test.csv"));
        params.output_dir = dir.clone();

        let result = run(RunKind::NoDict, &params, OutputFormat::Json);

        assert!(result.is_err());
        let status = fs::read_to_string(dir.join(FileStatusReporter::FILE_NAME)).unwrap();
        assert_eq!(status, "100\n");
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn invalid_run_shape_is_reported_the_same_way() {
        let dir = std::env::temp_dir().join(format!("dci_bad_shape_{}", Uuid::now_v7()));
        let mut params = RunParams::new(dir.join("train.csv"), dir.join("test.csv"));
        params.output_dir = dir.clone();

        // A full run needs a dictionary.
        let err = run(RunKind::Full, &params, OutputFormat::Json).unwrap_err();

        assert!(err.to_string().contains("dictionary"), "{}", err);
        let status = fs::read_to_string(dir.join(FileStatusReporter::FILE_NAME)).unwrap();
        assert_eq!(status, "100\n");
        fs::remove_dir_all(dir).ok();
    }
}
