use std::any::Any;
use std::fmt;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use super::ScanSettings;
use crate::error::Result;
use crate::evidence::{EvidenceRecorder, Finding};
use crate::materialize::{Materializer, Narrowing, NarrowingOutcome};
use crate::scanner::{DirectoryScanner, FileScanner, decode};
use crate::search::RepositoryDescriptor;

/// Lifecycle of one repository task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Materializing,
    Walking,
    Scanning,
    Recording,
    Done,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Materializing => "materializing",
            Self::Walking => "walking",
            Self::Scanning => "scanning",
            Self::Recording => "recording",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Counters gathered while a task runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub lossy_files: usize,
    pub findings: usize,
    pub records_written: usize,
    pub record_failures: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Done,
    /// The task stopped while in `stage`; nothing after it ran.
    Failed { stage: TaskState, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub repository: String,
    pub status: TaskStatus,
    pub narrowing: NarrowingOutcome,
    pub stats: TaskStats,
}

impl TaskOutcome {
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.status, TaskStatus::Done)
    }
}

/// One repository bound to the shared scan settings.
pub struct ScanTask<'a> {
    repo: &'a RepositoryDescriptor,
    settings: &'a ScanSettings,
    narrowing: Option<&'a Narrowing>,
    state: TaskState,
    narrowing_outcome: NarrowingOutcome,
    stats: TaskStats,
}

impl<'a> ScanTask<'a> {
    #[must_use]
    pub fn new(
        repo: &'a RepositoryDescriptor,
        settings: &'a ScanSettings,
        narrowing: Option<&'a Narrowing>,
    ) -> Self {
        Self {
            repo,
            settings,
            narrowing,
            state: TaskState::Pending,
            narrowing_outcome: NarrowingOutcome::NotRequested,
            stats: TaskStats::default(),
        }
    }

    /// Run the task to completion, turning errors and panics into a
    /// `Failed` outcome so sibling tasks are never affected.
    pub fn run(
        mut self,
        materializer: &dyn Materializer,
        recorder: &EvidenceRecorder,
    ) -> TaskOutcome {
        log::info!("Processing repository: {}", self.repo.clone_url);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.execute(materializer, recorder)
        }));

        let status = match result {
            Ok(Ok(())) => {
                self.transition(TaskState::Done);
                TaskStatus::Done
            }
            Ok(Err(err)) => self.fail(err.to_string()),
            Err(payload) => self.fail(format!("panicked: {}", panic_message(&*payload))),
        };

        TaskOutcome {
            repository: self.repo.full_name(),
            status,
            narrowing: self.narrowing_outcome,
            stats: self.stats,
        }
    }

    fn fail(&self, reason: String) -> TaskStatus {
        log::warn!(
            "Error during processing of {} while {}: {reason}",
            self.repo.full_name(),
            self.state
        );
        TaskStatus::Failed {
            stage: self.state,
            reason,
        }
    }

    fn transition(&mut self, next: TaskState) {
        log::trace!("{}: {} -> {next}", self.repo.full_name(), self.state);
        self.state = next;
    }

    fn execute(&mut self, materializer: &dyn Materializer, recorder: &EvidenceRecorder) -> Result<()> {
        self.transition(TaskState::Materializing);
        let copy = materializer.materialize(&self.repo.clone_url, self.narrowing)?;
        self.narrowing_outcome = copy.narrowing().clone();

        self.transition(TaskState::Walking);
        let files = DirectoryScanner::new(&self.settings.filter).scan(copy.root())?;
        log::debug!(
            "{}: {} candidate files under {}",
            self.repo.full_name(),
            files.len(),
            copy.root().display()
        );

        for file in &files {
            self.scan_file(file, recorder);
        }
        Ok(())
    }

    fn scan_file(&mut self, path: &Path, recorder: &EvidenceRecorder) {
        self.transition(TaskState::Scanning);
        log::debug!("Checking file: {}", path.display());

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("Skipping unreadable file {}: {err}", path.display());
                self.stats.files_skipped += 1;
                return;
            }
        };

        let text = decode(bytes);
        if text.is_lossy() {
            log::debug!("Repaired invalid UTF-8 in {}", path.display());
            self.stats.lossy_files += 1;
        }

        let matches = self.settings.scanner.scan(text.as_str());
        self.stats.files_scanned += 1;
        if matches.is_empty() {
            log::debug!("No issues found in {}", path.display());
            return;
        }

        self.transition(TaskState::Recording);
        let absolute = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        log::info!("Issues found in {}: {} lines", absolute.display(), matches.len());

        for line_match in matches {
            self.stats.findings += 1;
            let finding = Finding::new(
                self.repo,
                absolute.clone(),
                line_match.line_number,
                line_match.line,
            );
            match recorder.record(&finding) {
                Ok(_) => self.stats.records_written += 1,
                Err(err) => {
                    log::warn!(
                        "Failed to record finding {}:{}: {err}",
                        absolute.display(),
                        finding.line_number
                    );
                    self.stats.record_failures += 1;
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
