// crates/dci-pipeline/src/progress.rs
//
// Fixed progress milestones of a cross-domain run.

use std::sync::Mutex;

use dci_core::ProgressReporter;

/// Milestones in the order a run reaches them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Milestone {
    Started,
    InputParameters,
    LoadSourceTraining,
    LoadSourceUnlabeled,
    LoadTargetTest,
    LoadTargetUnlabeled,
    LoadDictionary,
    SourceDomain,
    TargetDomain,
    Oracle,
    PivotSelection,
    Dci,
    Induction,
    SavingOutput,
    Done,
}

impl Milestone {
    /// Progress value in 0..=100.
    pub fn progress(self) -> u8 {
        match self {
            Milestone::Started => 0,
            Milestone::InputParameters => 1,
            Milestone::LoadSourceTraining => 2,
            Milestone::LoadSourceUnlabeled => 4,
            Milestone::LoadTargetTest => 6,
            Milestone::LoadTargetUnlabeled => 8,
            Milestone::LoadDictionary => 10,
            Milestone::SourceDomain => 12,
            Milestone::TargetDomain => 21,
            Milestone::Oracle => 32,
            Milestone::PivotSelection => 33,
            Milestone::Dci => 47,
            Milestone::Induction => 63,
            Milestone::SavingOutput => 95,
            Milestone::Done => 100,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Milestone::Started => "Started",
            Milestone::InputParameters => "Input parameters",
            Milestone::LoadSourceTraining => "Loading source training data",
            Milestone::LoadSourceUnlabeled => "Loading source unlabeled data",
            Milestone::LoadTargetTest => "Loading target test data",
            Milestone::LoadTargetUnlabeled => "Loading target unlabeled data",
            Milestone::LoadDictionary => "Loading dictionary",
            Milestone::SourceDomain => "Defining source domain",
            Milestone::TargetDomain => "Defining target domain",
            Milestone::Oracle => "Defining word oracle",
            Milestone::PivotSelection => "Pivot selection",
            Milestone::Dci => "DCI",
            Milestone::Induction => "Training and testing classifier",
            Milestone::SavingOutput => "Saving output",
            Milestone::Done => "Done",
        }
    }

    /// Report this milestone with its default message.
    pub fn report(self, reporter: &dyn ProgressReporter) {
        reporter.report(self.progress(), Some(self.message()));
    }

    /// Report this milestone with extra detail appended to the message.
    pub fn report_with(self, reporter: &dyn ProgressReporter, detail: &str) {
        let message = format!("{}: {}", self.message(), detail);
        reporter.report(self.progress(), Some(&message));
    }
}

/// Reporter that keeps every update in memory.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    updates: Mutex<Vec<(u8, Option<String>)>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates received so far, in order.
    pub fn updates(&self) -> Vec<(u8, Option<String>)> {
        match self.updates.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Progress values received so far, in order.
    pub fn values(&self) -> Vec<u8> {
        self.updates().into_iter().map(|(p, _)| p).collect()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, progress: u8, message: Option<&str>) {
        let entry = (progress, message.map(str::to_string));
        match self.updates.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
