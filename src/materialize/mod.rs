//! Shallow, self-cleaning working copies of remote repositories.

mod git_cli;
mod gix_backend;

pub use git_cli::GitCliMaterializer;
pub use gix_backend::GixMaterializer;

use std::fmt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::Result;

const TEMP_PREFIX: &str = "ws-audit-";
const CHECKOUT_DIR: &str = "repo";

/// Request to restrict a working copy to files matching these patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrowing {
    patterns: Vec<String>,
}

impl Narrowing {
    #[must_use]
    pub const fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// What became of a narrowing request. Never a reason to fail the task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NarrowingOutcome {
    #[default]
    NotRequested,
    Applied,
    Unsupported,
    Failed(String),
}

impl fmt::Display for NarrowingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRequested => write!(f, "not requested"),
            Self::Applied => write!(f, "applied"),
            Self::Unsupported => write!(f, "unsupported by backend"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// A temporary checkout owned by exactly one task.
///
/// The backing directory is removed when this value is dropped, whichever
/// way the owning scope exits.
#[derive(Debug)]
pub struct WorkingCopy {
    dir: TempDir,
    root: PathBuf,
    narrowing: NarrowingOutcome,
}

impl WorkingCopy {
    /// Reserve a fresh temporary location. The checkout root itself is not
    /// created; clone backends expect to create it.
    ///
    /// # Errors
    /// Returns an error if the temporary directory cannot be created.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(TEMP_PREFIX).tempdir()?;
        let root = dir.path().join(CHECKOUT_DIR);
        Ok(Self {
            dir,
            root,
            narrowing: NarrowingOutcome::NotRequested,
        })
    }

    /// Directory containing the checked-out tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Temporary directory that is removed on drop.
    #[must_use]
    pub fn location(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub const fn narrowing(&self) -> &NarrowingOutcome {
        &self.narrowing
    }

    pub(crate) fn set_narrowing(&mut self, outcome: NarrowingOutcome) {
        self.narrowing = outcome;
    }
}

/// Acquires a shallow working copy of one repository.
pub trait Materializer: Send + Sync {
    /// Clone `clone_url` at depth 1 into a fresh [`WorkingCopy`].
    ///
    /// `narrowing` is best-effort; the outcome is reported through
    /// [`WorkingCopy::narrowing`] rather than as an error.
    ///
    /// # Errors
    /// Returns an error if the repository cannot be retrieved.
    fn materialize(&self, clone_url: &str, narrowing: Option<&Narrowing>) -> Result<WorkingCopy>;
}

/// Clone backend selectable from the command line and config.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Pure-Rust clone via gix (no sparse checkout)
    #[default]
    Gix,
    /// System `git` binary (supports sparse checkout narrowing)
    Git,
}

impl Backend {
    #[must_use]
    pub fn materializer(self) -> Box<dyn Materializer> {
        match self {
            Self::Gix => Box::new(GixMaterializer::new()),
            Self::Git => Box::new(GitCliMaterializer::new()),
        }
    }
}

impl Materializer for Box<dyn Materializer> {
    fn materialize(&self, clone_url: &str, narrowing: Option<&Narrowing>) -> Result<WorkingCopy> {
        (**self).materialize(clone_url, narrowing)
    }
}

#[cfg(test)]
#[path = "materialize_tests.rs"]
mod tests;
