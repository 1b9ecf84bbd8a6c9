//! Search, clone and scan pipeline.
//!
//! The orchestrator fetches a bounded repository list and then runs one
//! [`ScanTask`] per repository on a fixed-size rayon pool. Each task owns its
//! working copy; the only state shared between tasks is the evidence counter
//! inside [`EvidenceRecorder`].

mod summary;
mod task;

pub use summary::RunSummary;
pub use task::{ScanTask, TaskOutcome, TaskState, TaskStats, TaskStatus};

use std::num::NonZeroUsize;
use std::thread;

use rayon::prelude::*;

use crate::error::Result;
use crate::evidence::EvidenceRecorder;
use crate::materialize::{Materializer, Narrowing};
use crate::output::ScanProgress;
use crate::scanner::{ExtensionFilter, WhitespaceScanner};
use crate::search::{HttpClient, RepositoryDescriptor, SearchClient, SearchQuery};

/// Worker count used when none is configured: one core is left for the
/// coordinating thread.
#[must_use]
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .saturating_sub(1)
        .max(1)
}

/// Per-run scan configuration shared read-only by every task.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub scanner: WhitespaceScanner,
    pub filter: ExtensionFilter,
    pub narrow: bool,
}

impl ScanSettings {
    /// # Errors
    /// Returns an error if the threshold is zero or the extension list is invalid.
    pub fn new<S: AsRef<str>>(threshold: usize, extensions: &[S], narrow: bool) -> Result<Self> {
        Ok(Self {
            scanner: WhitespaceScanner::new(threshold)?,
            filter: ExtensionFilter::new(extensions)?,
            narrow,
        })
    }

    /// Narrowing request handed to the materializer, if enabled.
    #[must_use]
    pub fn narrowing(&self) -> Option<Narrowing> {
        self.narrow
            .then(|| Narrowing::new(self.filter.patterns()))
    }
}

pub struct ScanOrchestrator<C: HttpClient, M: Materializer> {
    search: SearchClient<C>,
    materializer: M,
    recorder: EvidenceRecorder,
    settings: ScanSettings,
    workers: usize,
    show_progress: bool,
}

impl<C: HttpClient, M: Materializer> ScanOrchestrator<C, M> {
    #[must_use]
    pub fn new(
        search: SearchClient<C>,
        materializer: M,
        recorder: EvidenceRecorder,
        settings: ScanSettings,
    ) -> Self {
        Self {
            search,
            materializer,
            recorder,
            settings,
            workers: default_workers(),
            show_progress: false,
        }
    }

    /// Set the pool size; zero selects [`default_workers`].
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = if workers == 0 { default_workers() } else { workers };
        self
    }

    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub const fn recorder(&self) -> &EvidenceRecorder {
        &self.recorder
    }

    /// Fetch up to `max_repos` repositories for `query` and scan them all.
    ///
    /// # Errors
    /// Returns an error only if the worker pool cannot be created; failures
    /// inside individual repositories are reported in the summary.
    pub fn run(&self, query: &SearchQuery, max_repos: usize) -> Result<RunSummary> {
        log::info!("Fetching repositories for query: {query}");
        let repos = self.search.fetch_repositories(query, max_repos);
        self.scan_repositories(&repos)
    }

    /// Scan an already-fetched repository list.
    ///
    /// # Errors
    /// Returns an error only if the worker pool cannot be created.
    pub fn scan_repositories(&self, repos: &[RepositoryDescriptor]) -> Result<RunSummary> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("ws-audit-worker-{i}"))
            .build()?;
        log::info!(
            "Using {} worker threads, flagging runs of {} or more blanks",
            self.workers,
            self.settings.scanner.threshold()
        );

        let narrowing = self.settings.narrowing();
        let progress = ScanProgress::new(repos.len() as u64, !self.show_progress);

        let outcomes: Vec<TaskOutcome> = pool.install(|| {
            repos
                .par_iter()
                .with_max_len(1)
                .map(|repo| {
                    progress.start(&repo.full_name());
                    let task = ScanTask::new(repo, &self.settings, narrowing.as_ref());
                    let outcome = task.run(&self.materializer, &self.recorder);
                    progress.complete(outcome.is_done());
                    outcome
                })
                .collect()
        });
        progress.finish();

        let summary = RunSummary::from_outcomes(&outcomes);
        log::info!("{summary}");
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
