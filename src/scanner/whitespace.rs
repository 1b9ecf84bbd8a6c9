use regex::Regex;

use crate::error::{Result, WsAuditError};

/// Default minimum run of spaces/tabs that marks a line as offending.
pub const DEFAULT_THRESHOLD: usize = 5;

/// One offending line: 1-based line number and the trimmed line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub line_number: usize,
    pub line: String,
}

/// Flags lines containing a run of spaces or tabs at least `threshold` long.
///
/// Holds only the compiled pattern, so one instance can be shared by every
/// worker without coordination.
#[derive(Debug, Clone)]
pub struct WhitespaceScanner {
    threshold: usize,
    pattern: Regex,
}

impl WhitespaceScanner {
    /// Compile a scanner for the given threshold.
    ///
    /// # Errors
    /// Returns [`WsAuditError::InvalidThreshold`] when `threshold` is zero.
    pub fn new(threshold: usize) -> Result<Self> {
        if threshold == 0 {
            return Err(WsAuditError::InvalidThreshold(threshold));
        }

        let pattern = Regex::new(&format!("[ \t]{{{threshold},}}")).map_err(|e| {
            WsAuditError::Config(format!("Invalid whitespace threshold {threshold}: {e}"))
        })?;

        Ok(Self { threshold, pattern })
    }

    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns `true` if `line` holds a qualifying whitespace run.
    #[must_use]
    pub fn is_offending(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<LineMatch> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| self.is_offending(line))
            .map(|(idx, line)| LineMatch {
                line_number: idx + 1,
                line: line.trim().to_string(),
            })
            .collect()
    }
}

/// Convenience wrapper compiling a scanner for a one-off scan.
///
/// # Errors
/// Returns [`WsAuditError::InvalidThreshold`] when `threshold` is zero.
pub fn scan(text: &str, threshold: usize) -> Result<Vec<LineMatch>> {
    Ok(WhitespaceScanner::new(threshold)?.scan(text))
}

#[cfg(test)]
#[path = "whitespace_tests.rs"]
mod tests;
