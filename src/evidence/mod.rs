//! Durable evidence records for detected findings.
//!
//! Each finding is written to its own file under the output directory, named
//! with a run-scoped sequence number. Sequence numbers come from a single
//! [`EvidenceCounter`]; the lock is held only for the increment, so writes
//! from different workers proceed in parallel.

mod counter;
mod record;

pub use counter::EvidenceCounter;
pub use record::{Finding, format_record};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "Detected";

const RECORD_PREFIX: &str = "detected_";
const RECORD_EXTENSION: &str = "txt";

#[derive(Debug)]
pub struct EvidenceRecorder {
    output_dir: PathBuf,
    counter: EvidenceCounter,
}

impl EvidenceRecorder {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            counter: EvidenceCounter::new(),
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the evidence file for a given identifier.
    #[must_use]
    pub fn record_path(&self, id: u64) -> PathBuf {
        self.output_dir
            .join(format!("{RECORD_PREFIX}{id}.{RECORD_EXTENSION}"))
    }

    /// Number of identifiers claimed so far, including failed writes.
    #[must_use]
    pub fn claimed(&self) -> u64 {
        self.counter.claimed()
    }

    /// Persist one finding and return its identifier.
    ///
    /// The identifier is claimed before the write and is not returned to the
    /// counter if the write fails.
    ///
    /// # Errors
    /// Returns an error if the output directory or the record cannot be written.
    pub fn record(&self, finding: &Finding) -> Result<u64> {
        let id = self.counter.claim();
        ensure_dir(&self.output_dir)?;
        fs::write(self.record_path(id), format_record(finding))?;
        log::debug!(
            "Recorded evidence #{id} for {}:{}",
            finding.path.display(),
            finding.line_number
        );
        Ok(id)
    }
}

/// Create `dir` if absent; concurrent callers racing on creation all succeed.
fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    match fs::create_dir_all(dir) {
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        other => other,
    }
}

#[cfg(test)]
#[path = "evidence_tests.rs"]
mod tests;
