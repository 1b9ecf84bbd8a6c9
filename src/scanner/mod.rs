mod decode;
mod directory;
mod filter;
mod whitespace;

pub use decode::{DecodedText, decode};
pub use directory::DirectoryScanner;
pub use filter::{DEFAULT_EXTENSIONS, ExtensionFilter, FileFilter};
pub use whitespace::{DEFAULT_THRESHOLD, LineMatch, WhitespaceScanner, scan};

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Trait for scanning directories and finding files.
pub trait FileScanner {
    /// Scan a directory and return all matching file paths.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}
