use std::fmt;

use super::task::{TaskOutcome, TaskStatus};

/// Aggregate of every task outcome in one run. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub repositories: usize,
    pub completed: usize,
    pub failed: Vec<String>,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub lossy_files: usize,
    pub findings: usize,
    pub records_written: usize,
    pub record_failures: usize,
}

impl RunSummary {
    #[must_use]
    pub fn from_outcomes(outcomes: &[TaskOutcome]) -> Self {
        let mut summary = Self {
            repositories: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            match &outcome.status {
                TaskStatus::Done => summary.completed += 1,
                TaskStatus::Failed { .. } => summary.failed.push(outcome.repository.clone()),
            }
            let stats = &outcome.stats;
            summary.files_scanned += stats.files_scanned;
            summary.files_skipped += stats.files_skipped;
            summary.lossy_files += stats.lossy_files;
            summary.findings += stats.findings;
            summary.records_written += stats.records_written;
            summary.record_failures += stats.record_failures;
        }

        summary.failed.sort();
        summary
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Audited {} repositories ({} completed, {} failed): {} files scanned, {} findings, {} evidence records written",
            self.repositories,
            self.completed,
            self.failed.len(),
            self.files_scanned,
            self.findings,
            self.records_written
        )?;
        if self.files_skipped > 0 || self.record_failures > 0 {
            write!(
                f,
                " ({} unreadable files, {} unrecorded findings)",
                self.files_skipped, self.record_failures
            )?;
        }
        Ok(())
    }
}
