use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::evidence::DEFAULT_OUTPUT_DIR;
use crate::materialize::Backend;
use crate::scanner::{DEFAULT_EXTENSIONS, DEFAULT_THRESHOLD};
use crate::search::{
    DEFAULT_COOLDOWN_SECS, DEFAULT_ENDPOINT, DEFAULT_MAX_THROTTLE_RETRIES, DEFAULT_PER_PAGE,
    SearchSettings,
};

/// Default cap on repositories fetched per run.
pub const DEFAULT_MAX_REPOS: usize = 500;

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditConfig {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Search service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Results requested per page (the service caps this at 100).
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Seconds to wait before retrying a throttled page.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    #[serde(default = "default_max_throttle_retries")]
    pub max_throttle_retries: u32,

    /// API token. `--token` and `GITHUB_TOKEN` take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            per_page: default_per_page(),
            cooldown_secs: default_cooldown_secs(),
            max_throttle_retries: default_max_throttle_retries(),
            token: None,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn to_settings(&self) -> SearchSettings {
        SearchSettings {
            endpoint: self.endpoint.clone(),
            per_page: self.per_page,
            cooldown: Duration::from_secs(self.cooldown_secs),
            max_throttle_retries: self.max_throttle_retries,
            token: self.token.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    /// Minimum run of spaces/tabs that marks a line as offending.
    #[serde(default = "default_threshold")]
    pub threshold: usize,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Ask the clone backend to check out only matching files.
    #[serde(default)]
    pub narrow: bool,

    #[serde(default = "default_max_repos")]
    pub max_repos: usize,

    /// Worker threads; 0 picks one less than the available cores.
    #[serde(default)]
    pub workers: usize,

    #[serde(default)]
    pub backend: Backend,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            extensions: default_extensions(),
            narrow: false,
            max_repos: default_max_repos(),
            workers: 0,
            backend: Backend::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory receiving evidence records.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

const fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

const fn default_cooldown_secs() -> u64 {
    DEFAULT_COOLDOWN_SECS
}

const fn default_max_throttle_retries() -> u32 {
    DEFAULT_MAX_THROTTLE_RETRIES
}

const fn default_threshold() -> usize {
    DEFAULT_THRESHOLD
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect()
}

const fn default_max_repos() -> usize {
    DEFAULT_MAX_REPOS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
