use std::path::Path;

use crate::error::{Result, WsAuditError};

/// Default script/source extensions audited when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".py", ".lua", ".js", ".ts", ".c", ".cpp", ".java", ".rb", ".php", ".html", ".css",
];

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

impl<F: FileFilter + ?Sized> FileFilter for &F {
    fn should_include(&self, path: &Path) -> bool {
        (**self).should_include(path)
    }
}

/// Accepts files whose name ends with one of the configured suffixes.
///
/// Suffixes are normalized to carry a leading dot, so `py`, `.py` and `*.py`
/// are equivalent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    /// Create a filter from user-supplied extensions.
    ///
    /// # Errors
    /// Returns an error if the list is empty or contains a blank entry.
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Result<Self> {
        if extensions.is_empty() {
            return Err(WsAuditError::Config(
                "At least one file extension must be configured".to_string(),
            ));
        }

        let suffixes = extensions
            .iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { suffixes })
    }

    #[must_use]
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Sparse-checkout style patterns (`*.py`) for narrowing a clone.
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        self.suffixes.iter().map(|s| format!("*{s}")).collect()
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl FileFilter for ExtensionFilter {
    fn should_include(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }
}

fn normalize_extension(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_start_matches('*');
    if trimmed.is_empty() || trimmed == "." {
        return Err(WsAuditError::Config(format!(
            "Invalid file extension '{raw}'"
        )));
    }

    if trimmed.starts_with('.') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!(".{trimmed}"))
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
