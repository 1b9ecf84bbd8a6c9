use std::fmt::Write;
use std::path::PathBuf;

use crate::search::RepositoryDescriptor;

const SEPARATOR_WIDTH: usize = 40;

/// One offending line plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub repository: String,
    pub owner: String,
    pub clone_url: String,
    pub path: PathBuf,
    pub line_number: usize,
    pub line: String,
}

impl Finding {
    #[must_use]
    pub fn new(repo: &RepositoryDescriptor, path: PathBuf, line_number: usize, line: String) -> Self {
        Self {
            repository: repo.name.clone(),
            owner: repo.owner.clone(),
            clone_url: repo.clone_url.clone(),
            path,
            line_number,
            line,
        }
    }
}

/// Render the human-readable evidence document for a finding.
#[must_use]
pub fn format_record(finding: &Finding) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "Repository: {}", finding.repository);
    let _ = writeln!(out, "Owner: {}", finding.owner);
    let _ = writeln!(out, "Repository URL: {}", finding.clone_url);
    let _ = writeln!(out, "File: {}", finding.path.display());
    let _ = writeln!(out, "{separator}");
    let _ = writeln!(out, "Line {}: {}", finding.line_number, finding.line);
    let _ = writeln!(out, "{separator}");
    out
}
