use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsAuditError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Failed to clone {url}: {message}")]
    Clone { url: String, message: String },

    #[error("Invalid whitespace threshold {0}: must be at least 1")]
    InvalidThreshold(usize),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl WsAuditError {
    /// Short machine-friendly name of the error variant.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::Io(_) => "Io",
            Self::TomlParse(_) => "TomlParse",
            Self::JsonParse(_) => "JsonParse",
            Self::Http(_) => "Http",
            Self::Clone { .. } => "Clone",
            Self::InvalidThreshold(_) => "InvalidThreshold",
            Self::ThreadPool(_) => "ThreadPool",
            Self::Prompt(_) => "Prompt",
        }
    }

    /// Build a [`WsAuditError::Clone`] from any displayable backend error.
    pub fn clone_failed(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Clone {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WsAuditError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
