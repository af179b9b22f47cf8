// crates/dci-cli/src/output.rs
//
// Output formatting for the run summary.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::{Table, Tabled};

use dci_pipeline::RunOutcome;

/// Output format for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// One line of the run summary table.
#[derive(Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

pub fn summary_rows(outcome: &RunOutcome) -> Vec<SummaryRow> {
    let row = |field, value: String| SummaryRow { field, value };
    vec![
        row("Accuracy", format!("{:.4}", outcome.accuracy)),
        row(
            "Pivots",
            format!("{} of {} requested", outcome.pivots, outcome.requested_pivots),
        ),
        row("Aligned pairs", outcome.aligned_pairs.to_string()),
        row("Classifier C", outcome.c.to_string()),
        row("Pivot selection", format!("{:.5} s", outcome.timings.pivot_selection)),
        row("DCI", format!("{:.5} s", outcome.timings.dci)),
        row("Classifier", format!("{:.5} s", outcome.timings.classifier)),
        row("Test", format!("{:.5} s", outcome.timings.test)),
        row("Predictions", outcome.predictions_path.display().to_string()),
        row("Report", outcome.report_path.display().to_string()),
    ]
}

/// Render the run summary in the requested format.
pub fn render_outcome(outcome: &RunOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => format_table(&summary_rows(outcome)),
        OutputFormat::Json => format_json(outcome),
    }
}
