use std::io::IsTerminal;
use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str =
    "{spinner:.green} Auditing [{bar:40.cyan/blue}] {pos}/{len} repositories ({elapsed}) {wide_msg}";

/// Per-repository progress for one audit run, drawn on stderr.
///
/// Counts are tracked whether or not the bar is visible. The bar is hidden
/// in quiet mode or when stderr is not a TTY.
pub struct ScanProgress {
    bar: ProgressBar,
    completed: AtomicU64,
    failed: AtomicU64,
}

impl ScanProgress {
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let visible = !quiet && std::io::stderr().is_terminal();
        Self::with_target(total, visible)
    }

    fn with_target(total: u64, visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(total), target);
        bar.set_style(
            ProgressStyle::with_template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        Self {
            bar,
            completed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    /// Show `repository` as the one most recently picked up by a worker.
    pub fn start(&self, repository: &str) {
        self.bar.set_message(repository.to_string());
    }

    /// Count one finished repository task. Safe to call from any worker.
    pub fn complete(&self, succeeded: bool) {
        if !succeeded {
            let failed = self.failed.fetch_add(1, Ordering::Relaxed) + 1;
            self.bar.println(format!("{failed} repositories failed so far"));
        }
        let done = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        self.bar.set_position(done);
    }

    #[must_use]
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Clear the bar from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
